//! Request objects for every store operation.
//!
//! Wire names follow the JSON request shapes callers already send
//! (`labels`, `query`, `type`, `anyDirection`, ...). Absent fields mean
//! "unconstrained".

use cypherstore_api::{Identity, PropertyMap};
use cypherstore_query::{Endpoint, ListOptions, RelationSpec};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CreateRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub data: PropertyMap,
}

impl CreateRequest {
    pub fn new(labels: Vec<String>, data: PropertyMap) -> Self {
        Self { labels, data }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RemoveRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    pub query: Option<PropertyMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpdateRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    pub query: Option<PropertyMap>,
    #[serde(deserialize_with = "null_as_default")]
    pub data: PropertyMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FindRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    pub query: Option<PropertyMap>,
    pub options: Option<ListOptions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IdRequest {
    pub id: Identity,
}

impl IdRequest {
    pub fn new(id: impl Into<Identity>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateByIdRequest {
    pub id: Identity,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: PropertyMap,
}

impl UpdateByIdRequest {
    pub fn new(id: impl Into<Identity>, data: PropertyMap) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// Input to `exists`. `id` wins over `query`/`labels` when it is a
/// non-negative identity; an unreadable id counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExistsRequest {
    #[serde(deserialize_with = "lenient_identity")]
    pub id: Option<Identity>,
    pub query: Option<PropertyMap>,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CreateRelationRequest {
    pub from: Endpoint,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
    pub to: Endpoint,
    #[serde(deserialize_with = "null_as_default")]
    pub data: PropertyMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateRelationRequest {
    pub from: Endpoint,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
    pub to: Endpoint,
    #[serde(deserialize_with = "null_as_default")]
    pub any_direction: bool,
    pub query: Option<PropertyMap>,
    #[serde(deserialize_with = "null_as_default")]
    pub data: PropertyMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoveRelationRequest {
    pub from: Endpoint,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
    pub to: Endpoint,
    #[serde(deserialize_with = "null_as_default")]
    pub any_direction: bool,
    pub query: Option<PropertyMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FindRelationRequest {
    pub from: Endpoint,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
    pub to: Endpoint,
    #[serde(deserialize_with = "null_as_default")]
    pub any_direction: bool,
    pub query: Option<PropertyMap>,
    pub options: Option<ListOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StartNodesRequest {
    pub to: Endpoint,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
    pub query: Option<PropertyMap>,
    pub options: Option<ListOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EndNodesRequest {
    pub from: Endpoint,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
    pub query: Option<PropertyMap>,
    pub options: Option<ListOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodesOnRelationRequest {
    pub any_node: Endpoint,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
    pub query: Option<PropertyMap>,
    pub options: Option<ListOptions>,
}

/// Input to `relation_exists`, with the same id precedence as
/// [`ExistsRequest`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelationExistsRequest {
    #[serde(deserialize_with = "lenient_identity")]
    pub id: Option<Identity>,
    pub from: Endpoint,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
    pub to: Endpoint,
    #[serde(deserialize_with = "null_as_default")]
    pub any_direction: bool,
}

/// Raw Cypher passthrough.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CypherRequest {
    pub query: String,
    pub parameters: Option<PropertyMap>,
}

impl CypherRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            parameters: None,
        }
    }

    pub fn parameters(mut self, parameters: PropertyMap) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

macro_rules! relation_spec {
    ($($request:ty),*) => {$(
        impl $request {
            pub fn spec(&self) -> RelationSpec<'_> {
                RelationSpec {
                    from: &self.from,
                    rel_type: self.rel_type.as_deref(),
                    to: &self.to,
                    any_direction: self.any_direction,
                    filter: self.query.as_ref(),
                }
            }
        }
    )*};
}

relation_spec!(UpdateRelationRequest, RemoveRelationRequest, FindRelationRequest);

// Explicit `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn lenient_identity<'de, D>(deserializer: D) -> Result<Option<Identity>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| Identity::deserialize(value).ok()))
}
