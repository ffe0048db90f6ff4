//! Shared data types for cypherstore and the collaborator traits the store
//! runs its statements through.
//!
//! No query building happens here. These are the types passed between the
//! query compiler, the store façade and the external graph database driver.

mod identity;
mod session;
mod value;

pub use identity::{Identity, IdentityError};
pub use session::{Driver, Session};
pub use value::{NodeValue, Record, RelationshipValue, Value};

/// A property bag: string keys mapped to JSON values, in insertion order.
///
/// Insertion order matters because rendered query fragments list keys in the
/// order the caller supplied them.
pub type PropertyMap = serde_json::Map<String, serde_json::Value>;

/// A compiled query: Cypher text plus the parameter map it references.
///
/// `params` is `None` when the text contains no placeholders; drivers must
/// not be handed an empty map in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    text: String,
    params: Option<PropertyMap>,
}

impl Statement {
    /// Creates a parameterless statement.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: None,
        }
    }

    /// Attaches a parameter map, replacing any previous one.
    pub fn with_params(mut self, params: PropertyMap) -> Self {
        self.params = Some(params);
        self
    }

    /// Attaches a parameter map when one is given.
    pub fn with_optional_params(mut self, params: Option<PropertyMap>) -> Self {
        self.params = params;
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn params(&self) -> Option<&PropertyMap> {
        self.params.as_ref()
    }

    pub fn into_parts(self) -> (String, Option<PropertyMap>) {
        (self.text, self.params)
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
