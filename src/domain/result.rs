// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::domain::Fragment;

/// Transition produced by an action that finished its work.
pub const SUCCESS_TRANSITION: &str = "_success";
/// Transition produced by an action that could not do its work.
pub const ERROR_TRANSITION: &str = "_error";

/// What an action hands back: the fragment to continue with, the transition that picks
/// the next node and an optional opaque log recorded in the event log.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentResult {
    pub fragment: Fragment,
    pub transition: String,
    pub node_log: Option<Value>,
}

impl FragmentResult {
    pub fn new(fragment: Fragment, transition: impl Into<String>) -> Self {
        Self {
            fragment,
            transition: transition.into(),
            node_log: None,
        }
    }

    pub fn success(fragment: Fragment) -> Self {
        Self::new(fragment, SUCCESS_TRANSITION)
    }

    pub fn error(fragment: Fragment) -> Self {
        Self::new(fragment, ERROR_TRANSITION)
    }

    pub fn with_node_log(mut self, node_log: Value) -> Self {
        self.node_log = Some(node_log);
        self
    }

    pub fn is_success(&self) -> bool {
        self.transition == SUCCESS_TRANSITION
    }

    pub fn is_error(&self) -> bool {
        self.transition == ERROR_TRANSITION
    }
}
