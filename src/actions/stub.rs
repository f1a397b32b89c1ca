// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test doubles for exercising the engine and the decorating actions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{FragmentContext, FragmentResult};
use crate::errors::ActionError;
use crate::traits::Action;

#[derive(Default)]
struct Invocations(AtomicUsize);

impl Invocations {
    fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Succeeds with the fragment untouched.
#[derive(Default)]
pub struct StubAction {
    invocations: Invocations,
}

impl StubAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> usize {
        self.invocations.count()
    }
}

#[async_trait]
impl Action for StubAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        self.invocations.hit();
        Ok(FragmentResult::success(ctx.fragment))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Always answers with the `_error` transition.
#[derive(Default)]
pub struct FailingAction {
    invocations: Invocations,
}

impl FailingAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> usize {
        self.invocations.count()
    }
}

#[async_trait]
impl Action for FailingAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        self.invocations.hit();
        Ok(FragmentResult::error(ctx.fragment))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

pub struct RecoverableErrorAction {
    message: String,
}

impl RecoverableErrorAction {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Action for RecoverableErrorAction {
    async fn apply(&self, _ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        Err(ActionError::recoverable(self.message.as_str()))
    }

    fn name(&self) -> &'static str {
        "recoverable-error"
    }
}

pub struct FatalAction {
    message: String,
}

impl FatalAction {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Action for FatalAction {
    async fn apply(&self, _ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        Err(ActionError::fatal(self.message.as_str()))
    }

    fn name(&self) -> &'static str {
        "fatal"
    }
}

/// Succeeds with a custom transition label.
pub struct TransitionAction {
    transition: String,
}

impl TransitionAction {
    pub fn new(transition: impl Into<String>) -> Self {
        Self {
            transition: transition.into(),
        }
    }
}

#[async_trait]
impl Action for TransitionAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        Ok(FragmentResult::new(ctx.fragment, self.transition.as_str()))
    }

    fn name(&self) -> &'static str {
        "transition"
    }
}

pub struct AppendBodyAction {
    suffix: String,
}

impl AppendBodyAction {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

#[async_trait]
impl Action for AppendBodyAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        let body = format!("{}{}", ctx.fragment.body, self.suffix);
        Ok(FragmentResult::success(ctx.fragment.with_body(body)))
    }

    fn name(&self) -> &'static str {
        "append-body"
    }
}

pub struct AppendPayloadAction {
    key: String,
    value: Value,
    invocations: Invocations,
}

impl AppendPayloadAction {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            invocations: Invocations::default(),
        }
    }

    pub fn invocations(&self) -> usize {
        self.invocations.count()
    }
}

#[async_trait]
impl Action for AppendPayloadAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        self.invocations.hit();
        let fragment = ctx
            .fragment
            .append_payload(self.key.as_str(), self.value.clone());
        Ok(FragmentResult::success(fragment))
    }

    fn name(&self) -> &'static str {
        "append-payload"
    }
}

pub struct SuccessWithNodeLogAction {
    node_log: Value,
}

impl SuccessWithNodeLogAction {
    pub fn new(node_log: Value) -> Self {
        Self { node_log }
    }
}

#[async_trait]
impl Action for SuccessWithNodeLogAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        Ok(FragmentResult::success(ctx.fragment).with_node_log(self.node_log.clone()))
    }

    fn name(&self) -> &'static str {
        "success-with-node-log"
    }
}

/// Sleeps before putting `key: true` into the payload.
pub struct DelayedAction {
    key: String,
    delay: Duration,
    invocations: Invocations,
}

impl DelayedAction {
    pub fn new(key: impl Into<String>, delay: Duration) -> Self {
        Self {
            key: key.into(),
            delay,
            invocations: Invocations::default(),
        }
    }

    pub fn invocations(&self) -> usize {
        self.invocations.count()
    }
}

#[async_trait]
impl Action for DelayedAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        self.invocations.hit();
        tokio::time::sleep(self.delay).await;
        let fragment = ctx.fragment.append_payload(self.key.as_str(), true);
        Ok(FragmentResult::success(fragment))
    }

    fn name(&self) -> &'static str {
        "delayed"
    }
}

/// Answers `_error` on its first invocation and `_success` on every later one.
#[derive(Default)]
pub struct FailFirstAction {
    invocations: Invocations,
}

impl FailFirstAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> usize {
        self.invocations.count()
    }
}

#[async_trait]
impl Action for FailFirstAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        self.invocations.hit();
        if self.invocations.count() == 1 {
            return Ok(FragmentResult::error(ctx.fragment));
        }
        Ok(FragmentResult::success(ctx.fragment))
    }

    fn name(&self) -> &'static str {
        "fail-first"
    }
}
