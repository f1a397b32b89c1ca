// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Failures an action can report instead of a `FragmentResult`.

use thiserror::Error;

/// Why an action could not produce a result.
///
/// The engine branches on the variant: a recoverable failure is resolved like an
/// `_error` transition, a fatal one aborts the whole task run.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("action failed: {message}")]
    Recoverable { message: String },

    #[error("action failed fatally: {message}")]
    Fatal { message: String },
}

impl ActionError {
    pub fn recoverable(message: impl Into<String>) -> Self {
        ActionError::Recoverable {
            message: message.into(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        ActionError::Fatal {
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ActionError::Fatal { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            ActionError::Recoverable { message } | ActionError::Fatal { message } => message,
        }
    }
}
