// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The content unit flowing through a task graph.
///
/// Actions receive a copy of the fragment and hand back the (possibly changed) value,
/// which then replaces the engine's working copy. The engine itself only ever merges
/// payload keys produced by parallel branches; it never rewrites them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(rename = "type")]
    pub fragment_type: String,
    #[serde(default)]
    pub payload: Map<String, Value>,
    #[serde(default)]
    pub body: String,
}

impl Fragment {
    pub fn new(fragment_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            fragment_type: fragment_type.into(),
            payload: Map::new(),
            body: body.into(),
        }
    }

    /// Store `value` under `key`, replacing whatever was there.
    pub fn append_payload(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn payload_value(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Copy every payload entry of `other` into this fragment. Keys present in both
    /// take the value from `other`.
    pub fn merge_payload(&mut self, other: &Fragment) {
        for (key, value) in &other.payload {
            self.payload.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_payload_and_body() {
        let fragment = Fragment::new("snippet", "initial body")
            .append_payload("user", json!({"name": "ada"}))
            .with_body("changed");

        assert_eq!(fragment.body, "changed");
        assert_eq!(fragment.payload_value("user"), Some(&json!({"name": "ada"})));
    }

    #[test]
    fn test_merge_payload_last_writer_wins() {
        let mut target = Fragment::new("snippet", "body")
            .append_payload("a", 1)
            .append_payload("shared", "old");
        let other = Fragment::new("snippet", "other body")
            .append_payload("b", 2)
            .append_payload("shared", "new");

        target.merge_payload(&other);

        assert_eq!(target.body, "body");
        assert_eq!(target.payload.len(), 3);
        assert_eq!(target.payload_value("shared"), Some(&json!("new")));
    }

    #[test]
    fn test_serializes_type_field() {
        let fragment = Fragment::new("snippet", "body");
        let value = serde_json::to_value(&fragment).unwrap();
        assert_eq!(value["type"], json!("snippet"));
        assert_eq!(value["body"], json!("body"));
    }
}
