// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// A single fatal failure raised while evaluating a node.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("node '{node_id}' failed fatally: {message}")]
pub struct FatalNodeFailure {
    pub node_id: String,
    pub message: String,
}

impl FatalNodeFailure {
    pub fn new(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            message: message.into(),
        }
    }
}

/// Run-level failure returned by `TaskEngine::start`.
///
/// Recoverable problems never show up here; they end as a `FAILURE` status on the
/// returned event instead.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskError {
    /// One or more actions failed fatally. Every cause seen before the abort took
    /// effect is kept, in the order the composite fan-in collected them.
    #[error("task '{task}' aborted: {}", format_causes(.causes))]
    Fatal {
        task: String,
        causes: Vec<FatalNodeFailure>,
    },

    /// The run was cancelled from outside before it could finish.
    #[error("task '{task}' was cancelled")]
    Cancelled { task: String },
}

impl TaskError {
    pub fn causes(&self) -> &[FatalNodeFailure] {
        match self {
            TaskError::Fatal { causes, .. } => causes,
            TaskError::Cancelled { .. } => &[],
        }
    }
}

fn format_causes(causes: &[FatalNodeFailure]) -> String {
    causes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_display_lists_every_cause() {
        let error = TaskError::Fatal {
            task: "product".to_string(),
            causes: vec![
                FatalNodeFailure::new("a", "boom"),
                FatalNodeFailure::new("b", "bang"),
            ],
        };

        assert_eq!(
            error.to_string(),
            "task 'product' aborted: node 'a' failed fatally: boom; node 'b' failed fatally: bang"
        );
        assert_eq!(error.causes().len(), 2);
    }

    #[test]
    fn test_cancelled_has_no_causes() {
        let error = TaskError::Cancelled {
            task: "product".to_string(),
        };
        assert!(error.causes().is_empty());
    }
}
