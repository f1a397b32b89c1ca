// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.

use tracing::Span;

pub mod action;
pub mod engine;
pub mod node;

/// A message that knows how to emit itself through `tracing`.
///
/// `log` emits an event at the message's level with its structured fields;
/// `span` opens a span carrying the same fields for work done on behalf of the message.
pub trait StructuredLog {
    fn log(&self);

    fn span(&self, name: &str) -> Span;
}
