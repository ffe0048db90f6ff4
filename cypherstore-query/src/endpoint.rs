//! Endpoint compilation for relationship operations.

use crate::clause::{ClauseSet, RelationMatch};
use crate::fragment::{label_fragment, properties_match_fragment, spaced};
use crate::{NODE_VAR, OTHER_NODE_VAR, REL_VAR};
use cypherstore_api::{Identity, PropertyMap};
use serde::Deserialize;

/// Label/property constraint on a node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodePattern {
    pub labels: Vec<String>,
    #[serde(rename = "query")]
    pub filter: Option<PropertyMap>,
}

impl NodePattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn filter(mut self, filter: PropertyMap) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Pattern text following the variable: `:A:B { k: v }`.
    ///
    /// Empty for a pattern with neither labels nor filter.
    pub fn body(&self) -> String {
        let mut out = label_fragment(&self.labels);
        if let Some(filter) = &self.filter {
            out.push(' ');
            out.push_str(&properties_match_fragment(filter));
        }
        out
    }
}

/// One side of a relationship operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Option<EndpointRepr>")]
pub enum Endpoint {
    /// Unconstrained: any node.
    #[default]
    Any,
    /// Exact identity match.
    Id(Identity),
    /// Label/property pattern match.
    Pattern(NodePattern),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EndpointRepr {
    ById { id: Identity },
    ByPattern(NodePattern),
}

impl From<Option<EndpointRepr>> for Endpoint {
    fn from(repr: Option<EndpointRepr>) -> Self {
        match repr {
            None => Endpoint::Any,
            Some(EndpointRepr::ById { id }) => Endpoint::Id(id),
            Some(EndpointRepr::ByPattern(pattern)) => Endpoint::Pattern(pattern),
        }
    }
}

impl From<Identity> for Endpoint {
    fn from(id: Identity) -> Self {
        Endpoint::Id(id)
    }
}

impl From<NodePattern> for Endpoint {
    fn from(pattern: NodePattern) -> Self {
        Endpoint::Pattern(pattern)
    }
}

impl Endpoint {
    /// Whether the endpoint names a node in the relationship pattern.
    pub fn is_defined(&self) -> bool {
        !matches!(self, Endpoint::Any)
    }
}

/// How identity-constrained endpoints are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdAddressing {
    /// `START n=node(ID)`.
    Start,
    /// `MATCH (n) … WHERE id(n) = ID`. Used where `START` anchors cannot be
    /// combined with the rest of the query.
    Where,
}

/// Which endpoints are named in the relationship pattern, and whether it is
/// directed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelationShape {
    pub from_defined: bool,
    pub to_defined: bool,
    pub any_direction: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointQuery {
    pub clauses: ClauseSet,
    pub shape: RelationShape,
}

impl EndpointQuery {
    /// Relationship pattern shaped by these endpoints.
    pub fn relationship_pattern(&self, rel_type: Option<&str>, properties: &str) -> String {
        relationship_pattern(rel_type, properties, self.shape)
    }

    /// Composes the endpoint clauses with a relationship pattern.
    pub fn attach_relation(self, pattern: &str, mode: RelationMatch) -> String {
        self.clauses.attach_relation(pattern, mode)
    }
}

/// Compiles both endpoints of a relationship operation.
///
/// `from` binds [`NODE_VAR`], `to` binds [`OTHER_NODE_VAR`].
pub fn related_endpoints(
    from: &Endpoint,
    to: &Endpoint,
    any_direction: bool,
    addressing: IdAddressing,
) -> EndpointQuery {
    let mut clauses = ClauseSet::new();
    add_endpoint(&mut clauses, from, NODE_VAR, addressing);
    add_endpoint(&mut clauses, to, OTHER_NODE_VAR, addressing);

    EndpointQuery {
        clauses,
        shape: RelationShape {
            from_defined: from.is_defined(),
            to_defined: to.is_defined(),
            any_direction,
        },
    }
}

fn add_endpoint(
    clauses: &mut ClauseSet,
    endpoint: &Endpoint,
    var: &str,
    addressing: IdAddressing,
) {
    match endpoint {
        Endpoint::Any => {}
        Endpoint::Id(id) => match addressing {
            IdAddressing::Start => clauses.start_node(*id, var),
            IdAddressing::Where => {
                clauses.node(var, "");
                clauses.where_id(*id, var);
            }
        },
        Endpoint::Pattern(pattern) => clauses.node(var, pattern.body()),
    }
}

/// `(n)-[r:TYPE { props }]->(m)` and its anonymous/undirected variants.
///
/// Undefined endpoints render as `()`. The arrow is only emitted for a
/// directed relationship with at least one defined endpoint.
pub fn relationship_pattern(
    rel_type: Option<&str>,
    properties: &str,
    shape: RelationShape,
) -> String {
    let from = if shape.from_defined {
        format!("({NODE_VAR})")
    } else {
        "()".to_string()
    };

    let mut to = if shape.to_defined {
        format!("({OTHER_NODE_VAR})")
    } else {
        "()".to_string()
    };

    if !shape.any_direction && (shape.from_defined || shape.to_defined) {
        to.insert(0, '>');
    }

    let rel_label = match rel_type {
        Some(t) if !t.is_empty() => label_fragment(&[t]),
        _ => String::new(),
    };

    format!("{from}-[{REL_VAR}{rel_label}{}]-{to}", spaced(properties))
}
