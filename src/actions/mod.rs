// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Action implementations shipped with the engine.
//!
//! Every action here reaches the engine only through the [`Action`](crate::traits::Action)
//! trait; the engine has no knowledge of any of them.
//!
//! * [`InMemoryCacheAction`] - cache-aside decorator around another action
//! * [`CircuitBreakerAction`] - timeout, retries and circuit breaker around another action
//! * [`PayloadToBodyAction`] - renders a payload entry into the fragment body
//! * [`InlinePayloadAction`] / [`InlineBodyAction`] - static payload entry / static body
//!
//! The test-only `stub` module holds the doubles used by the engine tests.

pub mod action_log;
pub mod circuit_breaker;
pub mod in_memory_cache;
pub mod inline;
pub mod payload_to_body;
pub mod placeholders;
#[cfg(test)]
pub(crate) mod stub;

pub use action_log::{ActionLogLevel, ActionLogger};
pub use circuit_breaker::CircuitBreakerAction;
pub use in_memory_cache::InMemoryCacheAction;
pub use inline::{InlineBodyAction, InlinePayloadAction};
pub use payload_to_body::PayloadToBodyAction;
