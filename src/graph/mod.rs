//! Code for the `graph *` sub commands.

pub mod export;
pub mod query;
