// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Actions producing static content, handy for wiring graphs and for demos.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::{FragmentContext, FragmentResult};
use crate::errors::ActionError;
use crate::traits::Action;

/// Puts a fixed value under `key` in the payload.
pub struct InlinePayloadAction {
    alias: String,
    key: String,
    value: Value,
}

impl InlinePayloadAction {
    pub fn new(alias: impl Into<String>, key: impl Into<String>, value: Value) -> Self {
        Self {
            alias: alias.into(),
            key: key.into(),
            value,
        }
    }
}

#[async_trait]
impl Action for InlinePayloadAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        let fragment = ctx
            .fragment
            .append_payload(self.key.as_str(), self.value.clone());
        Ok(FragmentResult::success(fragment).with_node_log(json!({
            "alias": self.alias,
            "key": self.key,
        })))
    }

    fn name(&self) -> &'static str {
        "inline-payload"
    }
}

/// Replaces the fragment body with a fixed text.
pub struct InlineBodyAction {
    alias: String,
    body: String,
}

impl InlineBodyAction {
    pub fn new(alias: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
impl Action for InlineBodyAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        let fragment = ctx.fragment.with_body(self.body.as_str());
        Ok(FragmentResult::success(fragment).with_node_log(json!({ "alias": self.alias })))
    }

    fn name(&self) -> &'static str {
        "inline-body"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientRequest, Fragment};

    fn context() -> FragmentContext {
        FragmentContext::new(
            Fragment::new("snippet", "body").append_payload("kept", true),
            ClientRequest::default(),
        )
    }

    #[tokio::test]
    async fn test_inline_payload() {
        let action = InlinePayloadAction::new("user", "user", json!({"name": "ada"}));

        let result = action.apply(context()).await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.fragment.payload_value("user"), Some(&json!({"name": "ada"})));
        assert_eq!(result.fragment.payload_value("kept"), Some(&json!(true)));
        assert_eq!(result.node_log.unwrap()["key"], json!("user"));
    }

    #[tokio::test]
    async fn test_inline_body() {
        let action = InlineBodyAction::new("render", "<p>hi</p>");

        let result = action.apply(context()).await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.fragment.body, "<p>hi</p>");
        assert_eq!(result.fragment.payload.len(), 1);
    }
}
