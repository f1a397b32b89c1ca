// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::engine::{FragmentEvent, FragmentEventContext, NodeFailure, TaskContext};
use crate::errors::TaskError;
use crate::observability::messages::engine::{TaskAborted, TaskCancelled, TaskCompleted, TaskStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::Node;

/// Drives a task graph against one fragment.
///
/// The engine holds no per-run state, so one instance can start any number of runs,
/// concurrently or one after another. Every run gets its own cancellation token; when an
/// external token is supplied through [`TaskEngine::with_cancellation`], each run's token
/// is a child of it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fragment_tasks::actions::InlineBodyAction;
/// use fragment_tasks::domain::{ClientRequest, Fragment};
/// use fragment_tasks::engine::{FragmentEventContext, SingleNode, Status, TaskEngine};
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// runtime.block_on(async {
///     let root = SingleNode::new("render", Arc::new(InlineBodyAction::new("render", "<p>hi</p>")))
///         .into_node();
///     let context = FragmentEventContext::new(Fragment::new("snippet", ""), ClientRequest::default());
///
///     let event = TaskEngine::new().start("page", root, context).await.unwrap();
///
///     assert_eq!(event.status, Status::Success);
///     assert_eq!(event.fragment.body, "<p>hi</p>");
///     assert_eq!(event.log.len(), 1);
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskEngine {
    cancellation: Option<CancellationToken>,
}

impl TaskEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Once `token` is cancelled, runs in flight stop at their next transition and new
    /// runs end as [`TaskError::Cancelled`] without invoking any action.
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancellation: Some(token),
        }
    }

    /// Evaluate `root` against the event in `context`.
    ///
    /// Resolves to the terminal event, whose status is the root subtree's status, or
    /// fails with every fatal cause raised during the run.
    pub async fn start(
        &self,
        task_name: &str,
        root: Arc<dyn Node>,
        context: FragmentEventContext,
    ) -> Result<FragmentEvent, TaskError> {
        let FragmentEventContext {
            fragment_event,
            client_request,
        } = context;
        let FragmentEvent { fragment, log, .. } = fragment_event;

        let cancellation = match &self.cancellation {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        let ctx = TaskContext::new(task_name, client_request, log.clone(), cancellation);

        let started = TaskStarted {
            task: task_name,
            root_node: root.id(),
        };
        let span = started.span("task_run");
        started.log();
        let start_time = Instant::now();

        let result = if ctx.is_cancelled() {
            Err(NodeFailure::Cancelled)
        } else {
            root.evaluate(ctx, fragment).instrument(span).await
        };

        match result {
            Ok(outcome) => {
                let event = FragmentEvent {
                    fragment: outcome.fragment,
                    status: outcome.status,
                    log,
                };
                TaskCompleted {
                    task: task_name,
                    status: event.status.as_str(),
                    log_entries: event.log.len(),
                    duration: start_time.elapsed(),
                }
                .log();
                Ok(event)
            }
            Err(NodeFailure::Fatal(causes)) => {
                let error = TaskError::Fatal {
                    task: task_name.to_string(),
                    causes,
                };
                TaskAborted {
                    task: task_name,
                    cause_count: error.causes().len(),
                    error: &error,
                }
                .log();
                Err(error)
            }
            Err(NodeFailure::Cancelled) => {
                TaskCancelled { task: task_name }.log();
                Err(TaskError::Cancelled {
                    task: task_name.to_string(),
                })
            }
        }
    }
}
