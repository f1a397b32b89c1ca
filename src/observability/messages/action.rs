// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for action invocations and the bundled action implementations.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An action reported a recoverable failure; the node resolves it as `_error`.
///
/// # Log Level
/// `warn!` - Recovered locally
pub struct ActionFailed<'a> {
    pub task: &'a str,
    pub node: &'a str,
    pub action: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ActionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Action '{}' of node '{}' failed: {}",
            self.action, self.node, self.error
        )
    }
}

impl StructuredLog for ActionFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            task = self.task,
            node = self.node,
            action = self.action,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("action_failed", span_name = name, node = self.node)
    }
}

/// An action failed fatally; the whole run is aborted.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ActionFatal<'a> {
    pub task: &'a str,
    pub node: &'a str,
    pub action: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ActionFatal<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Action '{}' of node '{}' failed fatally, aborting task '{}': {}",
            self.action, self.node, self.task, self.error
        )
    }
}

impl StructuredLog for ActionFatal<'_> {
    fn log(&self) {
        tracing::error!(
            task = self.task,
            node = self.node,
            action = self.action,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("action_fatal", span_name = name, node = self.node)
    }
}

/// Outcome of a cache lookup in the in-memory cache action.
///
/// # Log Level
/// `debug!` - Per-invocation detail
///
/// # Example
/// ```
/// use fragment_tasks::observability::messages::action::CacheLookup;
///
/// let msg = CacheLookup {
///     alias: "product-cache",
///     cache_key: "product-42",
///     hit: true,
/// };
///
/// assert_eq!(msg.to_string(), "Cache 'product-cache' hit for key 'product-42'");
/// ```
pub struct CacheLookup<'a> {
    pub alias: &'a str,
    pub cache_key: &'a str,
    pub hit: bool,
}

impl Display for CacheLookup<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let outcome = if self.hit { "hit" } else { "miss" };
        write!(
            f,
            "Cache '{}' {} for key '{}'",
            self.alias, outcome, self.cache_key
        )
    }
}

impl StructuredLog for CacheLookup<'_> {
    fn log(&self) {
        tracing::debug!(
            alias = self.alias,
            cache_key = self.cache_key,
            hit = self.hit,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "cache_lookup",
            span_name = name,
            alias = self.alias,
            cache_key = self.cache_key,
        )
    }
}

/// The wrapped action's result was not cached.
pub struct CachePassed<'a> {
    pub alias: &'a str,
    pub cache_key: &'a str,
    pub transition: &'a str,
}

impl Display for CachePassed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cache '{}' not storing key '{}': wrapped action returned '{}'",
            self.alias, self.cache_key, self.transition
        )
    }
}

impl StructuredLog for CachePassed<'_> {
    fn log(&self) {
        tracing::debug!(
            alias = self.alias,
            cache_key = self.cache_key,
            transition = self.transition,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("cache_pass", span_name = name, alias = self.alias)
    }
}

/// No payload value exists under the key the payload-to-body action reads.
///
/// # Log Level
/// `warn!` - Action resolves to `_error`
pub struct PayloadKeyMissing<'a> {
    pub alias: &'a str,
    pub key: &'a str,
}

impl Display for PayloadKeyMissing<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Action '{}' found no value under payload key '{}'",
            self.alias, self.key
        )
    }
}

impl StructuredLog for PayloadKeyMissing<'_> {
    fn log(&self) {
        tracing::warn!(alias = self.alias, key = self.key, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("payload_key_missing", span_name = name, alias = self.alias)
    }
}

/// A circuit breaker stopped letting invocations through.
///
/// # Log Level
/// `warn!` - Wrapped action is unhealthy
pub struct CircuitOpened<'a> {
    pub alias: &'a str,
    pub failures: u32,
}

impl Display for CircuitOpened<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Circuit '{}' opened after {} consecutive failures",
            self.alias, self.failures
        )
    }
}

impl StructuredLog for CircuitOpened<'_> {
    fn log(&self) {
        tracing::warn!(alias = self.alias, failures = self.failures, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("circuit_opened", span_name = name, alias = self.alias)
    }
}

/// A circuit breaker gave up on the wrapped action for this invocation.
///
/// # Log Level
/// `warn!` - Action resolves to its fallback transition
pub struct CircuitFallback<'a> {
    pub alias: &'a str,
    pub reason: &'a str,
    pub transition: &'a str,
}

impl Display for CircuitFallback<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Circuit '{}' answering '{}': {}",
            self.alias, self.transition, self.reason
        )
    }
}

impl StructuredLog for CircuitFallback<'_> {
    fn log(&self) {
        tracing::warn!(
            alias = self.alias,
            reason = self.reason,
            transition = self.transition,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("circuit_fallback", span_name = name, alias = self.alias)
    }
}
