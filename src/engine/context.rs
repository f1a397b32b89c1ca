// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::domain::{ClientRequest, Fragment};
use crate::engine::{EventLog, EventType, Status};
use crate::errors::FatalNodeFailure;
use crate::observability::messages::node::NodeSkipped;
use crate::observability::messages::StructuredLog;
use crate::traits::Node;

/// Run-wide state handed to every node of one task run.
///
/// Cheap to clone: every clone shares the same event log and cancellation token, which
/// is how concurrently running branches agree on log order and on a fatal abort.
#[derive(Debug, Clone)]
pub struct TaskContext {
    task: Arc<str>,
    client_request: Arc<ClientRequest>,
    log: EventLog,
    cancellation: CancellationToken,
}

impl TaskContext {
    pub fn new(
        task: &str,
        client_request: ClientRequest,
        log: EventLog,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            task: Arc::from(task),
            client_request: Arc::new(client_request),
            log,
            cancellation,
        }
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn client_request(&self) -> &ClientRequest {
        &self.client_request
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn record(&self, node: &str, event_type: EventType, node_log: Option<Value>) -> u64 {
        self.log.record(&self.task, node, event_type, node_log)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Stop pending transitions: nodes reached through a transition, `on_success` or
    /// `on_error` are skipped from now on.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Evaluate `next` as the continuation of a node that already recorded its own
    /// outcome. Skipped once the run is cancelled.
    pub async fn continue_with(
        &self,
        next: &Arc<dyn Node>,
        fragment: Fragment,
    ) -> Result<NodeOutcome, NodeFailure> {
        if self.is_cancelled() {
            NodeSkipped {
                task: self.task(),
                node: next.id(),
            }
            .log();
            return Err(NodeFailure::Cancelled);
        }
        next.evaluate(self.clone(), fragment)
            .await
            .map(NodeOutcome::settled)
    }
}

/// Result of evaluating a subtree: the fragment it ended with and its status.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeOutcome {
    pub fragment: Fragment,
    pub status: Status,
}

impl NodeOutcome {
    pub fn new(fragment: Fragment, status: Status) -> Self {
        Self { fragment, status }
    }

    pub fn success(fragment: Fragment) -> Self {
        Self::new(fragment, Status::Success)
    }

    pub fn failure(fragment: Fragment) -> Self {
        Self::new(fragment, Status::Failure)
    }

    pub fn unprocessed(fragment: Fragment) -> Self {
        Self::new(fragment, Status::Unprocessed)
    }

    /// The outcome as seen from a node that has already done its own work: a continuation
    /// that had nothing to do leaves the branch successful.
    pub fn settled(self) -> Self {
        match self.status {
            Status::Unprocessed => Self::success(self.fragment),
            _ => self,
        }
    }
}

/// Ways a subtree can end without an outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeFailure {
    /// Every fatal failure collected in the subtree.
    Fatal(Vec<FatalNodeFailure>),
    /// The run was cancelled before the subtree could finish.
    Cancelled,
}

impl NodeFailure {
    pub fn fatal(node_id: &str, message: impl Into<String>) -> Self {
        NodeFailure::Fatal(vec![FatalNodeFailure::new(node_id, message)])
    }
}
