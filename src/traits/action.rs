// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::domain::{FragmentContext, FragmentResult};
use crate::errors::ActionError;

/// An asynchronous unit of work invoked by a `SingleNode`.
///
/// Implementations return the fragment to continue with and a transition, or an
/// `ActionError`. The engine only looks at the transition, the returned fragment and
/// the optional node log; how the result was computed stays inside the action.
#[async_trait]
pub trait Action: Send + Sync {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError>;

    fn name(&self) -> &'static str;
}
