// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{ClientRequest, Fragment};
use crate::engine::EventLog;

/// Overall status of a fragment event, or of a subtree while it is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Unprocessed,
    Success,
    Failure,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unprocessed => "UNPROCESSED",
            Status::Success => "SUCCESS",
            Status::Failure => "FAILURE",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Failure)
    }
}

/// The per-run record: the current fragment, the run's status and its event log.
#[derive(Debug, Clone, Serialize)]
pub struct FragmentEvent {
    pub fragment: Fragment,
    pub status: Status,
    pub log: EventLog,
}

impl FragmentEvent {
    /// A fresh, unprocessed event with an empty log.
    pub fn new(fragment: Fragment) -> Self {
        Self {
            fragment,
            status: Status::Unprocessed,
            log: EventLog::new(),
        }
    }

    pub fn log_as_json(&self) -> Value {
        self.log.to_json()
    }
}

/// Everything a task run starts from.
#[derive(Debug, Clone)]
pub struct FragmentEventContext {
    pub fragment_event: FragmentEvent,
    pub client_request: ClientRequest,
}

impl FragmentEventContext {
    pub fn new(fragment: Fragment, client_request: ClientRequest) -> Self {
        Self {
            fragment_event: FragmentEvent::new(fragment),
            client_request,
        }
    }
}
