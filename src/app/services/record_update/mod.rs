//! Record update protocol
//!
//! This module implements the rules governing how updates are applied to a
//! collection of loosely-typed records identified by an `id` field:
//! string-normalized id matching, set-like bulk mutations of list-valued
//! fields, partial merges, full replacement, creation, and deletion, with
//! reporting of which ids were actually affected.
//!
//! The entry point is [`MarkerService`], which validates request
//! contracts, serializes writers per collection key, and runs the
//! load-mutate-save cycle against the document store.

pub mod bulk;
pub mod dispatcher;
pub mod matcher;
pub mod ops;
pub mod patch;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use dispatcher::MarkerService;
