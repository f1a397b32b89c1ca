// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Resolves `{source.name}` placeholders against a client request.
//!
//! Supported sources are `param`, `header` (case-insensitive) and `uri` (`{uri.path}`).
//! A placeholder of a supported source with no matching value resolves to an empty
//! string; text in braces that is not a supported placeholder is left as is.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::domain::ClientRequest;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{(param|header|uri)\.([^{}]+)\}").expect("placeholder pattern is valid")
    })
}

pub fn resolve(template: &str, request: &ClientRequest) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures| {
            lookup(&caps[1], &caps[2], request).unwrap_or_default()
        })
        .into_owned()
}

fn lookup(source: &str, name: &str, request: &ClientRequest) -> Option<String> {
    let value = match source {
        "param" => request.param(name),
        "header" => request.header(name),
        "uri" if name == "path" => Some(request.path.as_str()),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ClientRequest {
        ClientRequest::new("/products/42.html")
            .with_param("id", "42")
            .with_header("X-Market", "pl")
    }

    #[test]
    fn test_resolves_every_source() {
        assert_eq!(
            resolve("product-{param.id}-{header.x-market}-{uri.path}", &request()),
            "product-42-pl-/products/42.html"
        );
    }

    #[test]
    fn test_missing_value_resolves_empty() {
        assert_eq!(resolve("product-{param.sku}", &request()), "product-");
    }

    #[test]
    fn test_unknown_source_left_untouched() {
        assert_eq!(resolve("{cookie.session}-{param.id}", &request()), "{cookie.session}-42");
    }
}
