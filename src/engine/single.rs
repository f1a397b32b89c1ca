// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{Fragment, FragmentContext, FragmentResult, ERROR_TRANSITION, SUCCESS_TRANSITION};
use crate::engine::{EventType, NodeFailure, NodeOutcome, TaskContext};
use crate::errors::ActionError;
use crate::observability::messages::action::{ActionFailed, ActionFatal};
use crate::observability::messages::node::{NodeCompleted, UnsupportedTransition};
use crate::observability::messages::StructuredLog;
use crate::traits::{Action, Node};

/// A node that invokes one action and follows the transition it returns.
///
/// The node records its own outcome before evaluating the next node, so its log entry
/// always precedes the entries of whatever it transitions to. The action always runs once
/// the node is evaluated; a cancelled run only stops the transition to the next node.
///
/// | transition | mapped node | log entries | branch |
/// |---|---|---|---|
/// | `_success` or custom | yes | `SUCCESS` | continues |
/// | `_error` | yes | `ERROR` | continues (fallback) |
/// | `_success` | no | `SUCCESS` | `SUCCESS` |
/// | custom | no | `SUCCESS`, `UNSUPPORTED_TRANSITION` | `FAILURE` |
/// | `_error` | no | `ERROR`, `UNSUPPORTED_TRANSITION` | `FAILURE` |
pub struct SingleNode {
    id: String,
    action: Arc<dyn Action>,
    transitions: HashMap<String, Arc<dyn Node>>,
}

impl SingleNode {
    pub fn new(id: impl Into<String>, action: Arc<dyn Action>) -> Self {
        Self {
            id: id.into(),
            action,
            transitions: HashMap::new(),
        }
    }

    /// Map `transition` to the node evaluated next when the action produces it.
    pub fn with_transition(mut self, transition: impl Into<String>, next: Arc<dyn Node>) -> Self {
        self.transitions.insert(transition.into(), next);
        self
    }

    pub fn with_transitions(mut self, transitions: HashMap<String, Arc<dyn Node>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    pub fn next(&self, transition: &str) -> Option<&Arc<dyn Node>> {
        self.transitions.get(transition)
    }

    pub fn into_node(self) -> Arc<dyn Node> {
        Arc::new(self)
    }

    /// Run the action, turning a recoverable failure into an `_error` result on the
    /// untouched fragment.
    async fn apply_action(
        &self,
        ctx: &TaskContext,
        fragment: Fragment,
    ) -> Result<FragmentResult, NodeFailure> {
        let fragment_context = FragmentContext::new(fragment.clone(), ctx.client_request().clone());

        match self.action.apply(fragment_context).await {
            Ok(result) => Ok(result),
            Err(error @ ActionError::Recoverable { .. }) => {
                ActionFailed {
                    task: ctx.task(),
                    node: &self.id,
                    action: self.action.name(),
                    error: &error,
                }
                .log();
                Ok(FragmentResult::error(fragment)
                    .with_node_log(json!({ "error": error.message() })))
            }
            Err(error @ ActionError::Fatal { .. }) => {
                ActionFatal {
                    task: ctx.task(),
                    node: &self.id,
                    action: self.action.name(),
                    error: &error,
                }
                .log();
                ctx.cancel();
                Err(NodeFailure::fatal(&self.id, error.message()))
            }
        }
    }
}

#[async_trait]
impl Node for SingleNode {
    fn id(&self) -> &str {
        &self.id
    }

    async fn evaluate(
        &self,
        ctx: TaskContext,
        fragment: Fragment,
    ) -> Result<NodeOutcome, NodeFailure> {
        let FragmentResult {
            fragment,
            transition,
            node_log,
        } = self.apply_action(&ctx, fragment).await?;

        let event_type = if transition == ERROR_TRANSITION {
            EventType::Error
        } else {
            EventType::Success
        };
        let order = ctx.record(&self.id, event_type, node_log);
        NodeCompleted {
            task: ctx.task(),
            node: &self.id,
            transition: &transition,
            order,
        }
        .log();

        match self.next(&transition) {
            Some(next) => ctx.continue_with(next, fragment).await,
            None if transition == SUCCESS_TRANSITION => Ok(NodeOutcome::success(fragment)),
            None => {
                UnsupportedTransition {
                    task: ctx.task(),
                    node: &self.id,
                    transition: &transition,
                }
                .log();
                ctx.record(
                    &self.id,
                    EventType::UnsupportedTransition,
                    Some(json!({ "transition": transition })),
                );
                Ok(NodeOutcome::failure(fragment))
            }
        }
    }
}
