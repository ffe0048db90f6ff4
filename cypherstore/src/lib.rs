//! # cypherstore
//!
//! A CRUD/graph store contract compiled to Cypher.
//!
//! The [`Store`] turns request objects (labels, property filters, identities,
//! relationship endpoints, sort and paging options) into Cypher statements,
//! runs them through an external database [`Driver`], and maps the returned
//! records onto [`NodeModel`] and [`RelationModel`].
//!
//! ```rust,ignore
//! use cypherstore::{CreateRequest, Store};
//!
//! let mut store = Store::new(driver);
//! let node = store
//!     .create(CreateRequest::new(vec!["Person".into()], data))
//!     .await?;
//! ```
//!
//! ## Crates
//!
//! - [`api`]: identities, raw record values and the `Session`/`Driver` traits
//!   a database integration implements.
//! - [`query`]: the pure Cypher text compiler.
//!
//! ## Injection surface
//!
//! Labels, relationship types and property keys are written into the query
//! text as given. Validate them before passing untrusted input to a store.

mod config;
mod error;
mod model;
pub mod parser;
mod request;
mod store;

pub use config::{DEFAULT_LABEL, StoreConfig};
pub use error::{EXISTS_ERROR, Error, Result};
pub use model::{Collapsed, NodeModel, RelationModel};
pub use parser::Normalized;
pub use request::{
    CreateRelationRequest, CreateRequest, CypherRequest, EndNodesRequest, ExistsRequest,
    FindRelationRequest, FindRequest, IdRequest, NodesOnRelationRequest, RelationExistsRequest,
    RemoveRelationRequest, RemoveRequest, StartNodesRequest, UpdateByIdRequest,
    UpdateRelationRequest, UpdateRequest,
};
pub use store::Store;

pub use cypherstore_api as api;
pub use cypherstore_api::{
    Driver, Identity, IdentityError, NodeValue, PropertyMap, Record, RelationshipValue, Session,
    Statement, Value,
};
pub use cypherstore_query as query;
pub use cypherstore_query::{Endpoint, ListOptions, NodePattern, SortSpec};
