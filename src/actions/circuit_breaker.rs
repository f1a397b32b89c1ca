// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::actions::{ActionLogLevel, ActionLogger};
use crate::config::CircuitBreakerActionOptions;
use crate::domain::{FragmentContext, FragmentResult, ERROR_TRANSITION};
use crate::errors::ActionError;
use crate::observability::messages::action::{CircuitFallback, CircuitOpened};
use crate::observability::messages::StructuredLog;
use crate::traits::Action;

/// Transition answered when every attempt failed and `fallbackOnFailure` is on.
pub const FALLBACK_TRANSITION: &str = "_fallback";

pub const INVOCATION_COUNT: &str = "INVOCATION_COUNT";
pub const FALLBACK: &str = "fallback";

const CIRCUIT_OPEN: &str = "circuit open";

/// State of a circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Invocations flow normally.
    Closed,
    /// Invocations are refused until the reset timeout has passed.
    Open,
    /// One trial invocation decides whether the circuit closes again.
    HalfOpen,
}

impl Display for CircuitState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitState::Closed => write!(f, "closed"),
            CircuitState::Open => write!(f, "open"),
            CircuitState::HalfOpen => write!(f, "half-open"),
        }
    }
}

/// Guards a wrapped action with a timeout, retries and a circuit breaker.
///
/// A wrapped result with the `_error` transition, a recoverable error and a timeout all
/// count as failed attempts. After `maxFailures` consecutive failures the circuit opens
/// and the wrapped action is not called again until `resetTimeout` has passed. When no
/// attempt succeeds the action answers `_fallback` (or `_error` with
/// `fallbackOnFailure: false`) with the fragment it was given. Fatal errors are passed
/// through untouched.
pub struct CircuitBreakerAction {
    alias: String,
    timeout: Duration,
    max_retries: u32,
    fallback_on_failure: bool,
    log_level: ActionLogLevel,
    breaker: CircuitBreaker,
    do_action: Arc<dyn Action>,
}

impl CircuitBreakerAction {
    pub fn new(
        alias: impl Into<String>,
        options: CircuitBreakerActionOptions,
        do_action: Arc<dyn Action>,
    ) -> Self {
        let breaker_options = &options.circuit_breaker_options;
        Self {
            alias: alias.into(),
            timeout: breaker_options.get_timeout(),
            max_retries: breaker_options.get_max_retries(),
            fallback_on_failure: options.get_fallback_on_failure(),
            log_level: options.get_log_level(),
            breaker: CircuitBreaker::new(
                breaker_options.get_max_failures(),
                breaker_options.get_reset_timeout(),
            ),
            do_action,
        }
    }

    pub fn state(&self) -> CircuitState {
        self.breaker.state()
    }

    fn record_failure(&self) {
        if let Some(failures) = self.breaker.record_failure() {
            CircuitOpened {
                alias: &self.alias,
                failures,
            }
            .log();
        }
    }

    fn fallback(
        &self,
        ctx: FragmentContext,
        reason: &str,
        logger: &mut ActionLogger,
    ) -> FragmentResult {
        let transition = if self.fallback_on_failure {
            FALLBACK_TRANSITION
        } else {
            ERROR_TRANSITION
        };
        CircuitFallback {
            alias: &self.alias,
            reason,
            transition,
        }
        .log();
        logger.error(FALLBACK, reason);
        FragmentResult::new(ctx.fragment, transition).with_node_log(logger.to_log())
    }
}

#[async_trait]
impl Action for CircuitBreakerAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        let mut logger = ActionLogger::new(&self.alias, self.log_level);
        let mut invocations: u32 = 0;
        let mut reason = CIRCUIT_OPEN.to_string();

        for _ in 0..=self.max_retries {
            if !self.breaker.allow_request() {
                reason = CIRCUIT_OPEN.to_string();
                break;
            }
            invocations += 1;

            let started = Instant::now();
            match tokio::time::timeout(self.timeout, self.do_action.apply(ctx.clone())).await {
                Ok(Ok(result)) if !result.is_error() => {
                    logger.do_action_log(started.elapsed(), result.node_log.clone());
                    logger.info(INVOCATION_COUNT, invocations);
                    self.breaker.record_success();
                    return Ok(FragmentResult {
                        node_log: Some(logger.to_log()),
                        ..result
                    });
                }
                Ok(Ok(result)) => {
                    logger.do_action_log(started.elapsed(), result.node_log);
                    reason = format!("wrapped action returned '{}'", result.transition);
                }
                Ok(Err(error)) if error.is_fatal() => return Err(error),
                Ok(Err(error)) => reason = error.message().to_string(),
                Err(_) => {
                    reason = format!(
                        "wrapped action timed out after {} ms",
                        self.timeout.as_millis()
                    )
                }
            }
            self.record_failure();
        }

        logger.info(INVOCATION_COUNT, invocations);
        Ok(self.fallback(ctx, &reason, &mut logger))
    }

    fn name(&self) -> &'static str {
        "circuit-breaker"
    }
}

struct BreakerState {
    state: CircuitState,
    failures: u32,
    opened_at: Option<Instant>,
}

/// Consecutive-failure circuit breaker. Shared by every invocation of one action.
struct CircuitBreaker {
    max_failures: u32,
    reset_timeout: Duration,
    inner: Mutex<BreakerState>,
}

impl CircuitBreaker {
    fn new(max_failures: u32, reset_timeout: Duration) -> Self {
        Self {
            max_failures,
            reset_timeout,
            inner: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                failures: 0,
                opened_at: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state(&self) -> CircuitState {
        self.lock().state
    }

    /// An open circuit lets a single trial through once the reset timeout has passed.
    fn allow_request(&self) -> bool {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed => true,
            CircuitState::HalfOpen => false,
            CircuitState::Open => {
                let expired = inner
                    .opened_at
                    .map_or(true, |opened_at| opened_at.elapsed() >= self.reset_timeout);
                if expired {
                    inner.state = CircuitState::HalfOpen;
                }
                expired
            }
        }
    }

    fn record_success(&self) {
        let mut inner = self.lock();
        inner.state = CircuitState::Closed;
        inner.failures = 0;
        inner.opened_at = None;
    }

    /// Returns the failure count when this failure opened the circuit.
    fn record_failure(&self) -> Option<u32> {
        let mut inner = self.lock();
        inner.failures += 1;
        let opens = match inner.state {
            CircuitState::HalfOpen => true,
            CircuitState::Closed => inner.failures >= self.max_failures,
            CircuitState::Open => false,
        };
        if !opens {
            return None;
        }
        inner.state = CircuitState::Open;
        inner.opened_at = Some(Instant::now());
        Some(inner.failures)
    }
}
