/// Default number of entries an in-memory cache action keeps
pub const DEFAULT_CACHE_MAXIMUM_SIZE: u64 = 1000;
/// Default time-to-live of an in-memory cache entry, in milliseconds
pub const DEFAULT_CACHE_TTL_MS: u64 = 5000;
/// Default `tracing` filter used when neither `RUST_LOG` nor the config file sets one
pub const DEFAULT_LOG_FILTER: &str = "info";
/// Consecutive failed invocations after which a circuit breaker opens
pub const DEFAULT_CIRCUIT_MAX_FAILURES: u32 = 5;
/// Default time allowed for one invocation behind a circuit breaker, in milliseconds
pub const DEFAULT_CIRCUIT_TIMEOUT_MS: u64 = 10_000;
/// Default time an open circuit waits before letting a trial invocation through, in milliseconds
pub const DEFAULT_CIRCUIT_RESET_TIMEOUT_MS: u64 = 30_000;
/// Default number of retries after a failed invocation
pub const DEFAULT_CIRCUIT_MAX_RETRIES: u32 = 0;
