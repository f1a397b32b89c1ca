// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Data carried through a task run: the fragment itself, the client request it was
//! produced for, and the result an action hands back to the engine.

mod context;
mod fragment;
mod result;

pub use context::{ClientRequest, FragmentContext};
pub use fragment::Fragment;
pub use result::{FragmentResult, ERROR_TRANSITION, SUCCESS_TRANSITION};
