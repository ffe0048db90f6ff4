//! Cypher text compiler for the cypherstore CRUD/graph contract.
//!
//! Everything in this crate is pure string building: no I/O, no shared
//! state. The store façade feeds request data in and gets a
//! [`Statement`](cypherstore_api::Statement) back.
//!
//! Layers, leaf to root:
//!
//! - [`fragment`]: clause fragments (identity anchors, labels, property
//!   objects, sorting and paging).
//! - [`clause`]: a small clause IR with separate `START`, `MATCH` and `WHERE`
//!   slots, rendered once.
//! - [`endpoint`]: from/to endpoint compilation and the relationship pattern.
//! - [`compile`]: one statement compiler per store operation.
//!
//! # Injection surface
//!
//! Labels, relationship types, property keys and sort property names are
//! embedded into the query text verbatim. Property *values* are either sent as
//! parameters (write form) or rendered as JSON literals (match form). Callers
//! handling untrusted input must validate names before they reach this crate.

pub mod clause;
pub mod compile;
pub mod endpoint;
pub mod fragment;
pub mod options;

pub use clause::{ClauseSet, RelationMatch};
pub use compile::{RelationSpec, SetMode};
pub use endpoint::{
    Endpoint, EndpointQuery, IdAddressing, NodePattern, RelationShape, related_endpoints,
    relationship_pattern,
};
pub use options::{ListOptions, SortSpec};

/// Query variable bound to the primary node (or the `from` endpoint).
pub const NODE_VAR: &str = "n";

/// Query variable bound to the `to` endpoint of a relationship.
pub const OTHER_NODE_VAR: &str = "m";

/// Query variable bound to the relationship.
pub const REL_VAR: &str = "r";
