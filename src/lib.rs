// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod actions;    // bundled action implementations
pub mod config;     // config file + action options
pub mod domain;     // fragment, request, action results
pub mod engine;     // task graph nodes + engine
pub mod errors;     // error handling
pub mod observability;
pub mod traits;     // Action and Node abstractions
