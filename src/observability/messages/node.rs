// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for node evaluation.
//!
//! Covers single-node action outcomes, transitions without a mapped node and the
//! fan-out/fan-in of composite nodes.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A single node's action finished and produced a transition.
///
/// # Log Level
/// `debug!` - Per-node detail
pub struct NodeCompleted<'a> {
    pub task: &'a str,
    pub node: &'a str,
    pub transition: &'a str,
    pub order: u64,
}

impl Display for NodeCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' produced transition '{}' (order {})",
            self.node, self.transition, self.order
        )
    }
}

impl StructuredLog for NodeCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            task = self.task,
            node = self.node,
            transition = self.transition,
            order = self.order,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "node",
            span_name = name,
            task = self.task,
            node = self.node,
        )
    }
}

/// A transition has no mapped next node and the branch ends in failure.
///
/// # Log Level
/// `warn!` - Branch failed without a fallback
///
/// # Example
/// ```
/// use fragment_tasks::observability::messages::node::UnsupportedTransition;
///
/// let msg = UnsupportedTransition {
///     task: "product-page",
///     node: "fetch-product",
///     transition: "_error",
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Node 'fetch-product' has no node mapped for transition '_error'"
/// );
/// ```
pub struct UnsupportedTransition<'a> {
    pub task: &'a str,
    pub node: &'a str,
    pub transition: &'a str,
}

impl Display for UnsupportedTransition<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' has no node mapped for transition '{}'",
            self.node, self.transition
        )
    }
}

impl StructuredLog for UnsupportedTransition<'_> {
    fn log(&self) {
        tracing::warn!(
            task = self.task,
            node = self.node,
            transition = self.transition,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "unsupported_transition",
            span_name = name,
            task = self.task,
            node = self.node,
            transition = self.transition,
        )
    }
}

/// A node was not evaluated because the run had already been cancelled.
pub struct NodeSkipped<'a> {
    pub task: &'a str,
    pub node: &'a str,
}

impl Display for NodeSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Skipping node '{}': task run cancelled", self.node)
    }
}

impl StructuredLog for NodeSkipped<'_> {
    fn log(&self) {
        tracing::debug!(task = self.task, node = self.node, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("node_skipped", span_name = name, node = self.node)
    }
}

/// A composite node dispatched its children.
///
/// # Log Level
/// `debug!` - Per-node detail
pub struct CompositeFanOut<'a> {
    pub task: &'a str,
    pub node: &'a str,
    pub children: usize,
}

impl Display for CompositeFanOut<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Composite '{}' dispatching {} children",
            self.node, self.children
        )
    }
}

impl StructuredLog for CompositeFanOut<'_> {
    fn log(&self) {
        tracing::debug!(
            task = self.task,
            node = self.node,
            children = self.children,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "composite",
            span_name = name,
            task = self.task,
            node = self.node,
            children = self.children,
        )
    }
}

/// All children of a composite node finished.
///
/// # Log Level
/// `debug!` - Per-node detail
pub struct CompositeFanIn<'a> {
    pub task: &'a str,
    pub node: &'a str,
    pub succeeded: usize,
    pub failed: usize,
    pub fatal: usize,
}

impl Display for CompositeFanIn<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Composite '{}' joined children: {} succeeded, {} failed, {} fatal",
            self.node, self.succeeded, self.failed, self.fatal
        )
    }
}

impl StructuredLog for CompositeFanIn<'_> {
    fn log(&self) {
        tracing::debug!(
            task = self.task,
            node = self.node,
            succeeded = self.succeeded,
            failed = self.failed,
            fatal = self.fatal,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "composite_fan_in",
            span_name = name,
            task = self.task,
            node = self.node,
        )
    }
}

/// A spawned child task of a composite node could not be joined.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ChildJoinFailed<'a> {
    pub task: &'a str,
    pub node: &'a str,
    pub child: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ChildJoinFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Composite '{}' failed to join child '{}': {}",
            self.node, self.child, self.error
        )
    }
}

impl StructuredLog for ChildJoinFailed<'_> {
    fn log(&self) {
        tracing::error!(
            task = self.task,
            node = self.node,
            child = self.child,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "child_join_failed",
            span_name = name,
            node = self.node,
            child = self.child,
        )
    }
}
