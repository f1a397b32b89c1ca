// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::domain::Fragment;
use crate::engine::{NodeFailure, NodeOutcome, TaskContext};

/// An element of a task graph.
///
/// `evaluate` runs the node (and everything reachable from it) against `fragment`
/// and reports the subtree's status together with the fragment it ended with.
/// Recoverable problems are part of the outcome; only fatal failures and
/// cancellation come back as `Err`.
#[async_trait]
pub trait Node: Send + Sync {
    fn id(&self) -> &str;

    async fn evaluate(&self, ctx: TaskContext, fragment: Fragment)
        -> Result<NodeOutcome, NodeFailure>;
}
