// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Task graph execution.
//!
//! A task graph is a tree of [`Node`](crate::traits::Node)s: a [`SingleNode`] invokes one
//! action and follows the transition it returns, a [`CompositeNode`] runs its children
//! concurrently and continues with its success or fallback node once all of them are done.
//! [`TaskEngine`] drives a graph against a fragment and returns the terminal
//! [`FragmentEvent`] with its ordered [`EventLog`].

mod composite;
mod context;
mod event;
mod event_log;
mod single;
mod task_engine;


pub use composite::CompositeNode;
pub use context::{NodeFailure, NodeOutcome, TaskContext};
pub use event::{FragmentEvent, FragmentEventContext, Status};
pub use event_log::{EventLog, EventLogEntry, EventType};
pub use single::SingleNode;
pub use task_engine::TaskEngine;
