// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::actions::placeholders;
use crate::actions::{ActionLogLevel, ActionLogger};
use crate::config::InMemoryCacheOptions;
use crate::domain::{FragmentContext, FragmentResult};
use crate::errors::{ActionError, ConfigError};
use crate::observability::messages::action::{CacheLookup, CachePassed};
use crate::observability::messages::StructuredLog;
use crate::traits::Action;

pub const CACHE_LOOKUP: &str = "CACHE_LOOKUP";
pub const CACHE_MISS: &str = "CACHE_MISS";
pub const CACHE_HIT: &str = "CACHE_HIT";
pub const CACHE_PASS: &str = "CACHE_PASS";

/// Cache-aside decorator around another action.
///
/// The cache key is resolved from the configured template against the client request.
/// On a hit the cached value is put under `payload_key` and the action succeeds without
/// calling the wrapped action. On a miss the wrapped action runs; its value under
/// `payload_key` is cached only when it returned `_success` and actually produced the key.
/// Failures of the wrapped action are passed through unchanged.
pub struct InMemoryCacheAction {
    alias: String,
    cache_key: String,
    payload_key: String,
    log_level: ActionLogLevel,
    cache: PayloadCache,
    do_action: Arc<dyn Action>,
}

impl InMemoryCacheAction {
    pub fn new(
        alias: impl Into<String>,
        options: InMemoryCacheOptions,
        do_action: Arc<dyn Action>,
    ) -> Result<Self, ConfigError> {
        let alias = alias.into();
        if options.cache_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                alias,
                field: "cacheKey",
            });
        }
        if options.payload_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                alias,
                field: "payloadKey",
            });
        }

        let log_level = options.get_log_level();
        Ok(Self {
            alias,
            cache: PayloadCache::new(
                options.cache.get_maximum_size() as usize,
                options.cache.get_ttl(),
            ),
            cache_key: options.cache_key,
            payload_key: options.payload_key,
            log_level,
            do_action,
        })
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }

    async fn call_do_action_and_cache(
        &self,
        ctx: FragmentContext,
        cache_key: &str,
        logger: &mut ActionLogger,
    ) -> Result<FragmentResult, ActionError> {
        let started = Instant::now();
        let result = self.do_action.apply(ctx).await?;
        logger.do_action_log(started.elapsed(), result.node_log.clone());

        match self.cacheable_value(&result) {
            Some(value) => {
                self.cache.put(cache_key.to_string(), value.clone()).await;
                logger.info(CACHE_MISS, value);
            }
            None => {
                CachePassed {
                    alias: &self.alias,
                    cache_key,
                    transition: &result.transition,
                }
                .log();
                logger.info(CACHE_PASS, json!({ "TRANSITION": &result.transition }));
            }
        }

        Ok(FragmentResult {
            node_log: Some(logger.to_log()),
            ..result
        })
    }

    fn cacheable_value(&self, result: &FragmentResult) -> Option<Value> {
        if !result.is_success() {
            return None;
        }
        result.fragment.payload_value(&self.payload_key).cloned()
    }
}

#[async_trait]
impl Action for InMemoryCacheAction {
    async fn apply(&self, ctx: FragmentContext) -> Result<FragmentResult, ActionError> {
        let mut logger = ActionLogger::new(&self.alias, self.log_level);
        let cache_key = placeholders::resolve(&self.cache_key, &ctx.client_request);
        logger.info(CACHE_LOOKUP, cache_key.as_str());

        let cached = self.cache.get(&cache_key).await;
        CacheLookup {
            alias: &self.alias,
            cache_key: &cache_key,
            hit: cached.is_some(),
        }
        .log();

        match cached {
            Some(value) => {
                logger.info(CACHE_HIT, value.clone());
                let fragment = ctx.fragment.append_payload(self.payload_key.as_str(), value);
                Ok(FragmentResult::success(fragment).with_node_log(logger.to_log()))
            }
            None => {
                self.call_do_action_and_cache(ctx, &cache_key, &mut logger)
                    .await
            }
        }
    }

    fn name(&self) -> &'static str {
        "in-memory-cache"
    }
}

struct CachedValue {
    value: Value,
    written_at: Instant,
}

/// Bounded map whose entries expire a fixed time after they were written.
/// When full, the oldest entry makes room for a new key.
struct PayloadCache {
    maximum_size: usize,
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedValue>>,
}

impl PayloadCache {
    fn new(maximum_size: usize, ttl: Duration) -> Self {
        Self {
            maximum_size,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    async fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().await;
        let expired = match entries.get(key) {
            Some(entry) if entry.written_at.elapsed() < self.ttl => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        None
    }

    async fn put(&self, key: String, value: Value) {
        if self.maximum_size == 0 {
            return;
        }
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.written_at.elapsed() < self.ttl);

        if !entries.contains_key(&key) && entries.len() >= self.maximum_size {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.written_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CachedValue {
                value,
                written_at: Instant::now(),
            },
        );
    }

    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::stub::{AppendPayloadAction, FailingAction, RecoverableErrorAction};
    use crate::config::CacheOptions;
    use crate::domain::{ClientRequest, Fragment};

    fn options(max: u64, ttl_ms: u64) -> InMemoryCacheOptions {
        InMemoryCacheOptions {
            cache: CacheOptions {
                maximum_size: Some(max),
                ttl: Some(ttl_ms),
            },
            cache_key: "product-{param.id}".to_string(),
            payload_key: "product".to_string(),
            log_level: Some(ActionLogLevel::Info),
        }
    }

    fn context(id: &str) -> FragmentContext {
        FragmentContext::new(
            Fragment::new("snippet", "body"),
            ClientRequest::new("/products").with_param("id", id),
        )
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let inner = Arc::new(AppendPayloadAction::new("product", json!({"id": 1})));
        let action = InMemoryCacheAction::new("cache", options(10, 5000), inner.clone()).unwrap();

        let first = action.apply(context("1")).await.unwrap();
        let second = action.apply(context("1")).await.unwrap();

        assert_eq!(inner.invocations(), 1);
        assert_eq!(second.fragment.payload_value("product"), Some(&json!({"id": 1})));
        assert!(second.is_success());

        let first_log = first.node_log.unwrap();
        assert_eq!(first_log["logs"][CACHE_LOOKUP], json!("product-1"));
        assert_eq!(first_log["logs"][CACHE_MISS], json!({"id": 1}));
        assert_eq!(first_log["doActionLogs"].as_array().unwrap().len(), 1);

        let second_log = second.node_log.unwrap();
        assert_eq!(second_log["logs"][CACHE_HIT], json!({"id": 1}));
        assert_eq!(second_log["alias"], json!("cache"));
    }

    #[tokio::test]
    async fn test_keys_resolved_per_request() {
        let inner = Arc::new(AppendPayloadAction::new("product", json!("value")));
        let action = InMemoryCacheAction::new("cache", options(10, 5000), inner.clone()).unwrap();

        action.apply(context("1")).await.unwrap();
        action.apply(context("2")).await.unwrap();

        assert_eq!(inner.invocations(), 2);
        assert_eq!(action.cached_entries().await, 2);
    }

    #[tokio::test]
    async fn test_error_transition_is_not_cached() {
        let inner = Arc::new(FailingAction::new());
        let action = InMemoryCacheAction::new("cache", options(10, 5000), inner.clone()).unwrap();

        let result = action.apply(context("1")).await.unwrap();
        action.apply(context("1")).await.unwrap();

        assert!(result.is_error());
        assert_eq!(inner.invocations(), 2);
        assert_eq!(
            result.node_log.unwrap()["logs"][CACHE_PASS],
            json!({"TRANSITION": "_error"})
        );
    }

    #[tokio::test]
    async fn test_success_without_payload_key_is_not_cached() {
        let inner = Arc::new(AppendPayloadAction::new("other", json!(1)));
        let action = InMemoryCacheAction::new("cache", options(10, 5000), inner.clone()).unwrap();

        action.apply(context("1")).await.unwrap();

        assert_eq!(action.cached_entries().await, 0);
    }

    #[tokio::test]
    async fn test_wrapped_failure_passes_through() {
        let inner = Arc::new(RecoverableErrorAction::new("upstream down"));
        let action = InMemoryCacheAction::new("cache", options(10, 5000), inner).unwrap();

        let error = action.apply(context("1")).await.unwrap_err();

        assert_eq!(error, ActionError::recoverable("upstream down"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let inner = Arc::new(AppendPayloadAction::new("product", json!("value")));
        let action = InMemoryCacheAction::new("cache", options(10, 1000), inner.clone()).unwrap();

        action.apply(context("1")).await.unwrap();
        tokio::time::advance(Duration::from_millis(500)).await;
        action.apply(context("1")).await.unwrap();
        assert_eq!(inner.invocations(), 1);

        tokio::time::advance(Duration::from_millis(600)).await;
        action.apply(context("1")).await.unwrap();
        assert_eq!(inner.invocations(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_oldest_entry_evicted_when_full() {
        let inner = Arc::new(AppendPayloadAction::new("product", json!("value")));
        let action = InMemoryCacheAction::new("cache", options(2, 5000), inner.clone()).unwrap();

        action.apply(context("1")).await.unwrap();
        tokio::time::advance(Duration::from_millis(10)).await;
        action.apply(context("2")).await.unwrap();
        tokio::time::advance(Duration::from_millis(10)).await;
        action.apply(context("3")).await.unwrap();
        assert_eq!(action.cached_entries().await, 2);

        action.apply(context("3")).await.unwrap();
        assert_eq!(inner.invocations(), 3);
        action.apply(context("1")).await.unwrap();
        assert_eq!(inner.invocations(), 4);
    }

    #[test]
    fn test_blank_keys_rejected() {
        let inner: Arc<dyn Action> = Arc::new(FailingAction::new());

        let mut missing_cache_key = options(10, 5000);
        missing_cache_key.cache_key = "  ".to_string();
        let result = InMemoryCacheAction::new("cache", missing_cache_key, inner.clone());
        assert!(matches!(
            result,
            Err(ConfigError::MissingField { field: "cacheKey", .. })
        ));

        let mut missing_payload_key = options(10, 5000);
        missing_payload_key.payload_key = String::new();
        let result = InMemoryCacheAction::new("cache", missing_payload_key, inner);
        assert!(matches!(
            result,
            Err(ConfigError::MissingField { field: "payloadKey", .. })
        ));
    }
}
