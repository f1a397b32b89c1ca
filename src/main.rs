// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use fragment_tasks::actions::circuit_breaker::FALLBACK_TRANSITION;
use fragment_tasks::actions::{
    CircuitBreakerAction, InMemoryCacheAction, InlinePayloadAction, PayloadToBodyAction,
};
use fragment_tasks::config::{load_config, Config};
use fragment_tasks::domain::{ClientRequest, Fragment};
use fragment_tasks::engine::{CompositeNode, FragmentEventContext, SingleNode, TaskEngine};
use fragment_tasks::traits::Node;

const DEMO_CACHE_KEY: &str = "product-{param.id}";
const DEMO_PAYLOAD_KEY: &str = "product";

/// Fill in whatever the config file left out so the demo graph can always be built.
fn with_demo_defaults(mut config: Config) -> Config {
    if config.cache.cache_key.trim().is_empty() {
        config.cache.cache_key = DEMO_CACHE_KEY.to_string();
    }
    if config.cache.payload_key.trim().is_empty() {
        config.cache.payload_key = DEMO_PAYLOAD_KEY.to_string();
    }
    if config.payload_to_body.key.is_none() {
        config.payload_to_body.key = Some(config.cache.payload_key.clone());
    }
    if config.request.path.is_empty() && config.request.params.is_empty() {
        config.request = ClientRequest::new("/products/42").with_param("id", "42");
    }
    config
}

/// `product` (cached) and `offers` (behind a circuit breaker) run side by side; once both
/// are done the product is rendered into the fragment body.
fn demo_graph(
    config: &Config,
    cache: Arc<InMemoryCacheAction>,
    offers: Arc<CircuitBreakerAction>,
) -> Arc<dyn Node> {
    let no_offers = InlinePayloadAction::new("no-offers", "offers", json!([]));
    let render = PayloadToBodyAction::new("render", config.payload_to_body.clone());

    CompositeNode::new(
        "fetch",
        vec![
            SingleNode::new("product", cache).into_node(),
            SingleNode::new("offers", offers)
                .with_transition(
                    FALLBACK_TRANSITION,
                    SingleNode::new("no-offers", Arc::new(no_offers)).into_node(),
                )
                .into_node(),
        ],
    )
    .with_on_success(SingleNode::new("render", Arc::new(render)).into_node())
    .into_node()
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = match env::args().nth(1) {
        Some(path) => load_config(&path).with_context(|| format!("loading config {path}"))?,
        None => Config::default(),
    };
    let config = with_demo_defaults(config);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.get_filter()))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let product = InlinePayloadAction::new(
        "product-source",
        config.cache.payload_key.as_str(),
        json!({"id": config.request.param("id"), "name": "Espresso machine"}),
    );
    let cache = Arc::new(
        InMemoryCacheAction::new("product-cache", config.cache.clone(), Arc::new(product))
            .context("building the product cache")?,
    );

    let offers = InlinePayloadAction::new("offers-source", "offers", json!([{"price": 9.99}]));
    let offers = Arc::new(CircuitBreakerAction::new(
        "offers",
        config.circuit_breaker.clone(),
        Arc::new(offers),
    ));

    let engine = TaskEngine::new();
    for run in 1..=2 {
        let context = FragmentEventContext::new(
            Fragment::new("snippet", "<div>placeholder</div>"),
            config.request.clone(),
        );
        let graph = demo_graph(&config, Arc::clone(&cache), Arc::clone(&offers));
        let event = engine
            .start("product-page", graph, context)
            .await
            .with_context(|| format!("run {run} aborted"))?;

        println!("run {run}: {}", event.status.as_str());
        println!("body:\n{}", event.fragment.body);
        println!("log:\n{}", serde_json::to_string_pretty(&event.log)?);
    }

    Ok(())
}
