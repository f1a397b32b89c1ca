// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use crate::actions::ActionLogger;
use crate::config::PayloadToBodyOptions;
use crate::domain::{FragmentContext, FragmentResult};
use crate::errors::ActionError;
use crate::observability::messages::action::PayloadKeyMissing;
use crate::observability::messages::StructuredLog;
use crate::traits::Action;

const BODY: &str = "body";

/// Renders payload data into the fragment body as pretty-printed JSON.
///
/// With a `key` the value under that key is rendered; dots walk into nested objects
/// (`user.address`). Without a key the whole payload is rendered. A key with no value
/// resolves to `_error` and leaves the fragment as it was.
pub struct PayloadToBodyAction {
    alias: String,
    options: PayloadToBodyOptions,
}

impl PayloadToBodyAction {
    pub fn new(alias: impl Into<String>, options: PayloadToBodyOptions) -> Self {
        Self {
            alias: alias.into(),
            options,
        }
    }

    fn body_source<'a>(&self, ctx: &'a FragmentContext) -> Option<Value> {
        match self.options.key.as_deref() {
            None => Some(Value::Object(ctx.fragment.payload.clone())),
            Some(key) => {
                let mut parts = key.split('.');
                let first = parts.next()?;
                let mut current: &'a Value = ctx.fragment.payload_value(first)?;
                for part in parts {
                    current = current.get(part)?;
                }
                Some(current.clone())
            }
        }
    }
}

#[async_trait]
impl Action for PayloadToBodyAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        let mut logger = ActionLogger::new(&self.alias, self.options.get_log_level());

        let Some(source) = self.body_source(&ctx) else {
            let key = self.options.key.as_deref().unwrap_or_default();
            PayloadKeyMissing {
                alias: &self.alias,
                key,
            }
            .log();
            logger.error(BODY, format!("No value found under key in payload {key}"));
            return Ok(FragmentResult::error(ctx.fragment).with_node_log(logger.to_log()));
        };

        let body = serde_json::to_string_pretty(&source)
            .map_err(|e| ActionError::recoverable(e.to_string()))?;
        logger.info(BODY, body.as_str());
        let fragment = ctx.fragment.with_body(body);

        Ok(FragmentResult::success(fragment).with_node_log(logger.to_log()))
    }

    fn name(&self) -> &'static str {
        "payload-to-body"
    }
}
