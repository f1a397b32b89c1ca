// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::Instrument;

use crate::domain::{Fragment, ERROR_TRANSITION};
use crate::engine::{EventType, NodeFailure, NodeOutcome, Status, TaskContext};
use crate::errors::FatalNodeFailure;
use crate::observability::messages::node::{
    ChildJoinFailed, CompositeFanIn, CompositeFanOut, UnsupportedTransition,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Node;

/// A node that runs its children concurrently and continues once all of them are done.
///
/// Each child gets its own copy of the fragment as it was before the composite started.
/// After fan-in, payloads of children that did not fail are merged into that fragment
/// in declaration order, so a key written by two children keeps the later child's value.
///
/// * all children succeeded (or had nothing to do): `SUCCESS` entry, then `on_success`
/// * any child failed: `ERROR` entry, then `on_error`; without `on_error` an
///   `UNSUPPORTED_TRANSITION` entry follows and the subtree fails
/// * no children: no entry at all, straight to `on_success`, otherwise `UNPROCESSED`
///
/// Fatal failures from any child are collected after every child has finished and
/// reported together.
pub struct CompositeNode {
    id: String,
    children: Vec<Arc<dyn Node>>,
    on_success: Option<Arc<dyn Node>>,
    on_error: Option<Arc<dyn Node>>,
}

/// How the children of one composite ended, once all of them are joined.
struct FanIn {
    merged: Fragment,
    succeeded: usize,
    failed: usize,
    cancelled: usize,
    fatal: Vec<FatalNodeFailure>,
}

impl FanIn {
    fn new(merged: Fragment) -> Self {
        Self {
            merged,
            succeeded: 0,
            failed: 0,
            cancelled: 0,
            fatal: Vec::new(),
        }
    }
}

impl CompositeNode {
    pub fn new(id: impl Into<String>, children: Vec<Arc<dyn Node>>) -> Self {
        Self {
            id: id.into(),
            children,
            on_success: None,
            on_error: None,
        }
    }

    pub fn with_on_success(mut self, node: Arc<dyn Node>) -> Self {
        self.on_success = Some(node);
        self
    }

    pub fn with_on_error(mut self, node: Arc<dyn Node>) -> Self {
        self.on_error = Some(node);
        self
    }

    pub fn children(&self) -> &[Arc<dyn Node>] {
        &self.children
    }

    pub fn into_node(self) -> Arc<dyn Node> {
        Arc::new(self)
    }

    /// Spawn every child on its own task and wait for all of them.
    async fn fan_out(&self, ctx: &TaskContext, fragment: &Fragment) -> FanIn {
        CompositeFanOut {
            task: ctx.task(),
            node: &self.id,
            children: self.children.len(),
        }
        .log();

        let handles: Vec<_> = self
            .children
            .iter()
            .map(|child| {
                let child = Arc::clone(child);
                let ctx = ctx.clone();
                let fragment = fragment.clone();
                tokio::spawn(
                    async move { child.evaluate(ctx, fragment).await }
                        .instrument(tracing::Span::current()),
                )
            })
            .collect();

        let mut fan_in = FanIn::new(fragment.clone());
        for (child, handle) in self.children.iter().zip(handles) {
            match handle.await {
                Ok(Ok(outcome)) if outcome.status.is_failure() => fan_in.failed += 1,
                Ok(Ok(outcome)) => {
                    fan_in.merged.merge_payload(&outcome.fragment);
                    fan_in.succeeded += 1;
                }
                Ok(Err(NodeFailure::Fatal(causes))) => fan_in.fatal.extend(causes),
                Ok(Err(NodeFailure::Cancelled)) => fan_in.cancelled += 1,
                Err(join_error) => {
                    ChildJoinFailed {
                        task: ctx.task(),
                        node: &self.id,
                        child: child.id(),
                        error: &join_error,
                    }
                    .log();
                    ctx.cancel();
                    fan_in
                        .fatal
                        .push(FatalNodeFailure::new(child.id(), join_error.to_string()));
                }
            }
        }

        CompositeFanIn {
            task: ctx.task(),
            node: &self.id,
            succeeded: fan_in.succeeded,
            failed: fan_in.failed,
            fatal: fan_in.fatal.len(),
        }
        .log();

        fan_in
    }
}

#[async_trait]
impl Node for CompositeNode {
    fn id(&self) -> &str {
        &self.id
    }

    async fn evaluate(
        &self,
        ctx: TaskContext,
        fragment: Fragment,
    ) -> Result<NodeOutcome, NodeFailure> {
        if self.children.is_empty() {
            return match &self.on_success {
                Some(next) => next.evaluate(ctx, fragment).await,
                None => Ok(NodeOutcome::unprocessed(fragment)),
            };
        }

        let fan_in = self.fan_out(&ctx, &fragment).await;
        if !fan_in.fatal.is_empty() {
            return Err(NodeFailure::Fatal(fan_in.fatal));
        }
        if fan_in.cancelled > 0 {
            return Err(NodeFailure::Cancelled);
        }

        let merged = fan_in.merged;
        if fan_in.failed == 0 {
            ctx.record(&self.id, EventType::Success, None);
            return match &self.on_success {
                Some(next) => ctx.continue_with(next, merged).await,
                None => Ok(NodeOutcome::success(merged)),
            };
        }

        ctx.record(&self.id, EventType::Error, None);
        match &self.on_error {
            Some(fallback) => ctx.continue_with(fallback, merged).await,
            None => {
                UnsupportedTransition {
                    task: ctx.task(),
                    node: &self.id,
                    transition: ERROR_TRANSITION,
                }
                .log();
                ctx.record(
                    &self.id,
                    EventType::UnsupportedTransition,
                    Some(json!({ "transition": ERROR_TRANSITION })),
                );
                Ok(NodeOutcome::new(merged, Status::Failure))
            }
        }
    }
}
