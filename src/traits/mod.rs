pub mod action;
pub mod node;

pub use action::Action;
pub use node::Node;
