//! Maps raw record values onto [`NodeModel`] and [`RelationModel`].

use crate::error::{Error, Result};
use crate::model::{NodeModel, RelationModel};
use cypherstore_api::{Record, Value};

/// Output of the list normalizers.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<T> {
    /// The input was a list; every element was converted.
    Models(Vec<T>),
    /// The input was not a list and is handed back untouched.
    Unchanged(Value),
}

pub fn parse_node(column: &str, value: Value) -> Result<NodeModel> {
    match value {
        Value::Node(node) => Ok(node.into()),
        other => Err(unexpected(column, "node", &other)),
    }
}

pub fn parse_nodes(column: &str, values: Vec<Value>) -> Result<Vec<NodeModel>> {
    values.into_iter().map(|v| parse_node(column, v)).collect()
}

pub fn parse_relation(column: &str, value: Value) -> Result<RelationModel> {
    match value {
        Value::Relationship(rel) => Ok(rel.into()),
        other => Err(unexpected(column, "relationship", &other)),
    }
}

pub fn parse_relations(column: &str, values: Vec<Value>) -> Result<Vec<RelationModel>> {
    values
        .into_iter()
        .map(|v| parse_relation(column, v))
        .collect()
}

/// Converts a list of nodes; anything that is not a list passes through.
///
/// The store never calls this itself. It is the mapper for list columns
/// returned by [`Store::execute_cypher_query`](crate::Store::execute_cypher_query).
pub fn normalize_nodes(column: &str, value: Value) -> Result<Normalized<NodeModel>> {
    match value {
        Value::List(items) => parse_nodes(column, items).map(Normalized::Models),
        other => Ok(Normalized::Unchanged(other)),
    }
}

/// Converts a list of relationships; anything that is not a list passes
/// through. Like [`normalize_nodes`], meant for passthrough query output.
pub fn normalize_relations(column: &str, value: Value) -> Result<Normalized<RelationModel>> {
    match value {
        Value::List(items) => parse_relations(column, items).map(Normalized::Models),
        other => Ok(Normalized::Unchanged(other)),
    }
}

fn unexpected(column: &str, expected: &'static str, found: &Value) -> Error {
    Error::UnexpectedValue {
        column: column.to_string(),
        expected,
        found: found.kind(),
    }
}

// Missing and null columns are the OPTIONAL MATCH miss case.
fn present(record: &mut Record, column: &str) -> Option<Value> {
    record.take(column).filter(|v| !v.is_null())
}

pub(crate) fn first_node(records: Vec<Record>, column: &str) -> Result<Option<NodeModel>> {
    match records.into_iter().next() {
        Some(mut record) => present(&mut record, column)
            .map(|v| parse_node(column, v))
            .transpose(),
        None => Ok(None),
    }
}

pub(crate) fn first_relation(records: Vec<Record>, column: &str) -> Result<Option<RelationModel>> {
    match records.into_iter().next() {
        Some(mut record) => present(&mut record, column)
            .map(|v| parse_relation(column, v))
            .transpose(),
        None => Ok(None),
    }
}

pub(crate) fn all_nodes(records: Vec<Record>, column: &str) -> Result<Vec<NodeModel>> {
    let values = records
        .into_iter()
        .filter_map(|mut record| present(&mut record, column))
        .collect();
    parse_nodes(column, values)
}

pub(crate) fn all_relations(records: Vec<Record>, column: &str) -> Result<Vec<RelationModel>> {
    let values = records
        .into_iter()
        .filter_map(|mut record| present(&mut record, column))
        .collect();
    parse_relations(column, values)
}

/// Reads a `COUNT(..) as count` column. A missing row or column counts as 0.
pub(crate) fn count(records: Vec<Record>, column: &str) -> Result<u64> {
    let Some(mut record) = records.into_iter().next() else {
        return Ok(0);
    };
    match present(&mut record, column) {
        None => Ok(0),
        Some(Value::Int(n)) => Ok(u64::try_from(n).unwrap_or(0)),
        Some(other) => Err(unexpected(column, "int", &other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cypherstore_api::{Identity, NodeValue, PropertyMap, RelationshipValue};
    use serde_json::json;

    fn person(id: i64, name: &str) -> Value {
        let mut properties = PropertyMap::new();
        properties.insert("name".to_string(), json!(name));
        Value::Node(NodeValue {
            identity: Identity::new(id),
            labels: vec!["Person".to_string()],
            properties,
        })
    }

    fn knows(id: i64, start: i64, end: i64) -> Value {
        Value::Relationship(RelationshipValue {
            identity: Identity::new(id),
            start: Identity::new(start),
            end: Identity::new(end),
            rel_type: "KNOWS".to_string(),
            properties: PropertyMap::new(),
        })
    }

    #[test]
    fn node_model_carries_identity_labels_and_properties() {
        let model = parse_node("n", person(4, "Ann")).unwrap();
        assert_eq!(model.id, Identity::new(4));
        assert_eq!(model.labels, vec!["Person".to_string()]);
        assert_eq!(model.properties.get("name"), Some(&json!("Ann")));
    }

    #[test]
    fn relation_model_carries_endpoints() {
        let model = parse_relation("r", knows(9, 1, 2)).unwrap();
        assert_eq!(model.rel_type, "KNOWS");
        assert_eq!((model.from, model.to), (Identity::new(1), Identity::new(2)));
    }

    #[test]
    fn wrong_kind_is_reported() {
        let err = parse_node("n", Value::Int(3)).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedValue { expected: "node", found: "int", .. }
        ));
        assert!(parse_relation("r", person(1, "Ann")).is_err());
    }

    #[test]
    fn normalizers_map_lists_and_pass_through_the_rest() {
        let list = Value::List(vec![person(1, "Ann"), person(2, "Bob")]);
        match normalize_nodes("n", list).unwrap() {
            Normalized::Models(models) => {
                let ids: Vec<i64> = models.iter().map(|m| m.id.get()).collect();
                assert_eq!(ids, vec![1, 2]);
            }
            Normalized::Unchanged(v) => panic!("expected models, got {v:?}"),
        }

        assert_eq!(
            normalize_relations("r", Value::Null).unwrap(),
            Normalized::Unchanged(Value::Null)
        );
        assert_eq!(
            normalize_nodes("n", Value::from("x")).unwrap(),
            Normalized::Unchanged(Value::from("x"))
        );
    }

    #[test]
    fn null_columns_are_skipped() {
        let records = vec![
            Record::default().with("r", knows(1, 1, 2)),
            Record::default().with("r", Value::Null),
            Record::default(),
            Record::default().with("r", knows(2, 2, 3)),
        ];
        let models = all_relations(records, "r").unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[1].id, Identity::new(2));
    }

    #[test]
    fn counts_default_to_zero() {
        assert_eq!(count(vec![], "count").unwrap(), 0);
        assert_eq!(count(vec![Record::default()], "count").unwrap(), 0);
        assert_eq!(
            count(vec![Record::default().with("count", 3_i64)], "count").unwrap(),
            3
        );
        assert!(count(vec![Record::default().with("count", "3")], "count").is_err());
    }
}
