use cypherstore_api::{Identity, NodeValue, PropertyMap, RelationshipValue};
use serde::Serialize;

/// A node as returned to store callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeModel {
    pub id: Identity,
    pub labels: Vec<String>,
    pub properties: PropertyMap,
}

impl From<NodeValue> for NodeModel {
    fn from(node: NodeValue) -> Self {
        Self {
            id: node.identity,
            labels: node.labels,
            properties: node.properties,
        }
    }
}

/// A relationship as returned to store callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationModel {
    pub id: Identity,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub from: Identity,
    pub to: Identity,
    pub properties: PropertyMap,
}

impl From<RelationshipValue> for RelationModel {
    fn from(rel: RelationshipValue) -> Self {
        Self {
            id: rel.identity,
            rel_type: rel.rel_type,
            from: rel.start,
            to: rel.end,
            properties: rel.properties,
        }
    }
}

/// Result of `update`/`replace`: nothing, one model, or several.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Collapsed<T> {
    Empty,
    Single(T),
    Multiple(Vec<T>),
}

impl<T> Collapsed<T> {
    pub fn from_vec(mut items: Vec<T>) -> Self {
        match items.len() {
            0 => Collapsed::Empty,
            1 => match items.pop() {
                Some(item) => Collapsed::Single(item),
                None => Collapsed::Empty,
            },
            _ => Collapsed::Multiple(items),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Collapsed::Empty)
    }

    pub fn len(&self) -> usize {
        match self {
            Collapsed::Empty => 0,
            Collapsed::Single(_) => 1,
            Collapsed::Multiple(items) => items.len(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Collapsed::Empty => Vec::new(),
            Collapsed::Single(item) => vec![item],
            Collapsed::Multiple(items) => items,
        }
    }
}
