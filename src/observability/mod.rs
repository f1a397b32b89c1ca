// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with a `Display` implementation so the
//! wording of every log line lives in one place and each message knows which
//! structured fields and level it is emitted with.
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - task run lifecycle
//! * `messages::node` - node evaluation, transitions and composite fan-out/fan-in
//! * `messages::action` - bundled action implementations (cache, payload-to-body)
//!
//! # Usage
//!
//! ```rust
//! use fragment_tasks::observability::messages::{node::UnsupportedTransition, StructuredLog};
//!
//! UnsupportedTransition {
//!     task: "product-page",
//!     node: "fetch-product",
//!     transition: "_error",
//! }
//! .log();
//! ```

pub mod messages;
