// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the task run lifecycle.
//!
//! This module contains message types for logging events related to:
//! * A task run starting against a root node
//! * A task run reaching a terminal status
//! * A task run aborted by fatal failures or cancelled from outside

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Task run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use fragment_tasks::observability::messages::engine::TaskStarted;
///
/// let msg = TaskStarted {
///     task: "product-page",
///     root_node: "composite",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct TaskStarted<'a> {
    pub task: &'a str,
    pub root_node: &'a str,
}

impl Display for TaskStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting task '{}' at root node '{}'",
            self.task, self.root_node
        )
    }
}

impl StructuredLog for TaskStarted<'_> {
    fn log(&self) {
        tracing::info!(task = self.task, root_node = self.root_node, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "task",
            span_name = name,
            task = self.task,
            root_node = self.root_node,
        )
    }
}

/// Task run reached a terminal status.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use fragment_tasks::observability::messages::engine::TaskCompleted;
/// use std::time::Duration;
///
/// let msg = TaskCompleted {
///     task: "product-page",
///     status: "SUCCESS",
///     log_entries: 4,
///     duration: Duration::from_millis(12),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct TaskCompleted<'a> {
    pub task: &'a str,
    pub status: &'a str,
    pub log_entries: usize,
    pub duration: Duration,
}

impl Display for TaskCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Task '{}' completed with status {}: {} log entries in {:?}",
            self.task, self.status, self.log_entries, self.duration
        )
    }
}

impl StructuredLog for TaskCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            task = self.task,
            status = self.status,
            log_entries = self.log_entries,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "task_completed",
            span_name = name,
            task = self.task,
            status = self.status,
            duration = ?self.duration,
        )
    }
}

/// Task run aborted because one or more actions failed fatally.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct TaskAborted<'a> {
    pub task: &'a str,
    pub cause_count: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for TaskAborted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Task '{}' aborted by {} fatal failure(s): {}",
            self.task, self.cause_count, self.error
        )
    }
}

impl StructuredLog for TaskAborted<'_> {
    fn log(&self) {
        tracing::error!(
            task = self.task,
            cause_count = self.cause_count,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "task_aborted",
            span_name = name,
            task = self.task,
            cause_count = self.cause_count,
        )
    }
}

/// Task run cancelled through the engine's cancellation token.
///
/// # Log Level
/// `warn!` - Run ended without a result
pub struct TaskCancelled<'a> {
    pub task: &'a str,
}

impl Display for TaskCancelled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Task '{}' was cancelled before completion", self.task)
    }
}

impl StructuredLog for TaskCancelled<'_> {
    fn log(&self) {
        tracing::warn!(task = self.task, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("task_cancelled", span_name = name, task = self.task)
    }
}
