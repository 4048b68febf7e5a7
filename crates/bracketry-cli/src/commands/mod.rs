//! CLI command implementations.

pub mod candidates;
pub mod common;
pub mod generate;
pub mod link;
pub mod list;
pub mod remove;
pub mod rounds;
pub mod validate;
