//! Statement compilers, one per store operation.
//!
//! Node write payloads travel as parameters (write form). Filters on nodes
//! matched by `find`/`update`/`replace`, endpoint filters, relationship
//! filters and relationship `SET` payloads render as JSON literals (match
//! form).

use crate::clause::RelationMatch;
use crate::endpoint::{Endpoint, IdAddressing, NodePattern, related_endpoints};
use crate::fragment::{
    label_fragment, options_fragment, properties_match_fragment, properties_write_fragment,
    spaced, start_statement_for_id, start_statement_for_rel_id, where_statement_for_id,
};
use crate::options::ListOptions;
use crate::{NODE_VAR, OTHER_NODE_VAR, REL_VAR};
use cypherstore_api::{Identity, PropertyMap, Statement};

/// `SET x += …` (merge) versus `SET x = …` (overwrite).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    Merge,
    Overwrite,
}

impl SetMode {
    pub fn operator(self) -> &'static str {
        match self {
            SetMode::Merge => "+=",
            SetMode::Overwrite => "=",
        }
    }
}

/// Selects relationships by endpoints, type and property filter.
#[derive(Debug, Clone, Copy)]
pub struct RelationSpec<'a> {
    pub from: &'a Endpoint,
    pub rel_type: Option<&'a str>,
    pub to: &'a Endpoint,
    pub any_direction: bool,
    pub filter: Option<&'a PropertyMap>,
}

impl RelationSpec<'_> {
    fn filter_fragment(&self) -> String {
        self.filter.map(properties_match_fragment).unwrap_or_default()
    }
}

fn node_pattern(var: &str, labels: &[String], properties: &str) -> String {
    format!("({var}{}{})", label_fragment(labels), spaced(properties))
}

fn write_payload(data: &PropertyMap) -> String {
    let fragment = properties_write_fragment(data);
    if fragment.is_empty() {
        "{}".to_string()
    } else {
        fragment
    }
}

fn params_for(data: &PropertyMap) -> Option<PropertyMap> {
    (!data.is_empty()).then(|| data.clone())
}

fn with_options(mut text: String, options: Option<&ListOptions>, var: &str) -> String {
    if let Some(options) = options {
        text.push_str(&spaced(&options_fragment(options, var)));
    }
    text
}

/// `CREATE (n:L { k : {k} }) RETURN n`. `labels` must already carry the
/// default label when the caller gave none.
pub fn create(labels: &[String], data: &PropertyMap) -> Statement {
    let pattern = node_pattern(NODE_VAR, labels, &properties_write_fragment(data));
    Statement::new(format!("CREATE {pattern} RETURN {NODE_VAR}"))
        .with_optional_params(params_for(data))
}

/// `MATCH (n:L { k : {k} }) DELETE n RETURN COUNT(n) as count`.
pub fn remove(labels: &[String], filter: Option<&PropertyMap>) -> Statement {
    let properties = filter.map(properties_write_fragment).unwrap_or_default();
    let pattern = node_pattern(NODE_VAR, labels, &properties);
    Statement::new(format!(
        "MATCH {pattern} DELETE {NODE_VAR} RETURN COUNT({NODE_VAR}) as count"
    ))
    .with_optional_params(filter.and_then(params_for))
}

pub fn remove_by_id(id: Identity) -> Statement {
    Statement::new(format!(
        "{} DELETE {NODE_VAR} RETURN COUNT({NODE_VAR}) as count",
        start_statement_for_id(id, NODE_VAR)
    ))
}

/// `MATCH (n:L { k: v }) SET n += { d : {d} } RETURN n`.
pub fn update(
    labels: &[String],
    filter: Option<&PropertyMap>,
    data: &PropertyMap,
    mode: SetMode,
) -> Statement {
    let properties = filter.map(properties_match_fragment).unwrap_or_default();
    let pattern = node_pattern(NODE_VAR, labels, &properties);
    Statement::new(format!(
        "MATCH {pattern} SET {NODE_VAR} {} {} RETURN {NODE_VAR}",
        mode.operator(),
        write_payload(data)
    ))
    .with_optional_params(params_for(data))
}

pub fn update_by_id(id: Identity, data: &PropertyMap, mode: SetMode) -> Statement {
    Statement::new(format!(
        "{} SET {NODE_VAR} {} {} RETURN {NODE_VAR}",
        start_statement_for_id(id, NODE_VAR),
        mode.operator(),
        write_payload(data)
    ))
    .with_optional_params(params_for(data))
}

/// `MATCH (n:L { k: v }) RETURN n ORDER BY … SKIP … LIMIT …`.
pub fn find(
    labels: &[String],
    filter: Option<&PropertyMap>,
    options: Option<&ListOptions>,
) -> Statement {
    let properties = filter.map(properties_match_fragment).unwrap_or_default();
    let pattern = node_pattern(NODE_VAR, labels, &properties);
    let text = format!("MATCH {pattern} RETURN {NODE_VAR}");
    Statement::new(with_options(text, options, NODE_VAR))
}

pub fn find_by_id(id: Identity) -> Statement {
    Statement::new(format!(
        "MATCH ({NODE_VAR}) {} RETURN {NODE_VAR}",
        where_statement_for_id(id, NODE_VAR)
    ))
}

/// `<endpoints> CREATE (n)-[r:T { d : {d} }]->(m) RETURN r`.
pub fn create_relation(
    from: &Endpoint,
    rel_type: Option<&str>,
    to: &Endpoint,
    data: &PropertyMap,
) -> Statement {
    let endpoints = related_endpoints(from, to, false, IdAddressing::Start);
    let relation = endpoints.relationship_pattern(rel_type, &properties_write_fragment(data));
    let anchors = endpoints.clauses.render();
    let text = if anchors.is_empty() {
        format!("CREATE {relation} RETURN {REL_VAR}")
    } else {
        format!("{anchors} CREATE {relation} RETURN {REL_VAR}")
    };
    Statement::new(text).with_optional_params(params_for(data))
}

fn match_relation(spec: &RelationSpec<'_>, addressing: IdAddressing) -> String {
    let endpoints = related_endpoints(spec.from, spec.to, spec.any_direction, addressing);
    let relation = endpoints.relationship_pattern(spec.rel_type, &spec.filter_fragment());
    endpoints.attach_relation(&relation, RelationMatch::Optional)
}

/// `<endpoints> OPTIONAL MATCH (n)-[r:T { k: v }]->(m) SET r += { d: v } RETURN r`.
pub fn update_relation(spec: &RelationSpec<'_>, data: &PropertyMap, mode: SetMode) -> Statement {
    Statement::new(format!(
        "{} SET {REL_VAR} {} {} RETURN {REL_VAR}",
        match_relation(spec, IdAddressing::Start),
        mode.operator(),
        properties_match_fragment(data)
    ))
}

pub fn update_relation_by_id(id: Identity, data: &PropertyMap, mode: SetMode) -> Statement {
    Statement::new(format!(
        "{} SET {REL_VAR} {} {} RETURN {REL_VAR}",
        start_statement_for_rel_id(id, REL_VAR),
        mode.operator(),
        write_payload(data)
    ))
    .with_optional_params(params_for(data))
}

pub fn remove_relation(spec: &RelationSpec<'_>) -> Statement {
    Statement::new(format!(
        "{} DELETE {REL_VAR} RETURN COUNT({REL_VAR}) as count",
        match_relation(spec, IdAddressing::Start)
    ))
}

pub fn remove_relation_by_id(id: Identity) -> Statement {
    Statement::new(format!(
        "{} DELETE {REL_VAR} RETURN COUNT({REL_VAR}) as count",
        start_statement_for_rel_id(id, REL_VAR)
    ))
}

/// Endpoint identities are matched with `WHERE id(…)`, so both endpoints can
/// be constrained by identity at once.
pub fn find_relation(spec: &RelationSpec<'_>, options: Option<&ListOptions>) -> Statement {
    let text = format!(
        "{} RETURN DISTINCT {REL_VAR}",
        match_relation(spec, IdAddressing::Where)
    );
    Statement::new(with_options(text, options, REL_VAR))
}

// Binds a variable without constraining it.
fn bound() -> Endpoint {
    Endpoint::Pattern(NodePattern::new())
}

fn match_one_sided(
    from: &Endpoint,
    to: &Endpoint,
    any_direction: bool,
    rel_type: Option<&str>,
    filter: Option<&PropertyMap>,
) -> String {
    let endpoints = related_endpoints(from, to, any_direction, IdAddressing::Start);
    let properties = filter.map(properties_match_fragment).unwrap_or_default();
    let relation = endpoints.relationship_pattern(rel_type, &properties);
    endpoints.attach_relation(&relation, RelationMatch::Fold)
}

/// Start nodes of matching relationships ending at `to`.
pub fn find_relation_start_nodes(
    to: &Endpoint,
    rel_type: Option<&str>,
    filter: Option<&PropertyMap>,
    options: Option<&ListOptions>,
) -> Statement {
    let text = format!(
        "{} RETURN DISTINCT {NODE_VAR}",
        match_one_sided(&bound(), to, false, rel_type, filter)
    );
    Statement::new(with_options(text, options, NODE_VAR))
}

/// End nodes of matching relationships starting at `from`.
pub fn find_relation_end_nodes(
    from: &Endpoint,
    rel_type: Option<&str>,
    filter: Option<&PropertyMap>,
    options: Option<&ListOptions>,
) -> Statement {
    let text = format!(
        "{} RETURN DISTINCT {OTHER_NODE_VAR}",
        match_one_sided(from, &bound(), false, rel_type, filter)
    );
    Statement::new(with_options(text, options, OTHER_NODE_VAR))
}

/// Nodes on either side of a matching relationship whose other side is
/// `any_node`.
pub fn find_nodes_on_relation(
    any_node: &Endpoint,
    rel_type: Option<&str>,
    filter: Option<&PropertyMap>,
    options: Option<&ListOptions>,
) -> Statement {
    let text = format!(
        "{} RETURN DISTINCT {NODE_VAR}",
        match_one_sided(&bound(), any_node, true, rel_type, filter)
    );
    Statement::new(with_options(text, options, NODE_VAR))
}

pub fn find_relation_by_id(id: Identity) -> Statement {
    Statement::new(format!(
        "MATCH ()-[{REL_VAR}]-() {} RETURN DISTINCT {REL_VAR}",
        where_statement_for_id(id, REL_VAR)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn create_without_data_has_no_params() {
        let stmt = create(&labels(&["UNKNOWN"]), &PropertyMap::new());
        assert_eq!(stmt.text(), "CREATE (n:UNKNOWN) RETURN n");
        assert!(stmt.params().is_none());
    }

    #[test]
    fn set_mode_operators() {
        assert_eq!(SetMode::Merge.operator(), "+=");
        assert_eq!(SetMode::Overwrite.operator(), "=");
    }

    #[test]
    fn empty_set_payload_renders_braces() {
        let stmt = update_by_id(Identity::new(4), &PropertyMap::new(), SetMode::Overwrite);
        assert_eq!(stmt.text(), "START n=node(4) SET n = {} RETURN n");
        assert!(stmt.params().is_none());
    }

    #[test]
    fn relation_update_inlines_payload() {
        let mut data = PropertyMap::new();
        data.insert("since".to_string(), json!(2001));
        let from = Endpoint::Id(Identity::new(1));
        let spec = RelationSpec {
            from: &from,
            rel_type: Some("KNOWS"),
            to: &Endpoint::Any,
            any_direction: false,
            filter: None,
        };
        let stmt = update_relation(&spec, &data, SetMode::Merge);
        assert_eq!(
            stmt.text(),
            "START n=node(1) OPTIONAL MATCH (n)-[r:KNOWS]->() SET r += { since: 2001 } RETURN r"
        );
        assert!(stmt.params().is_none());
    }
}
