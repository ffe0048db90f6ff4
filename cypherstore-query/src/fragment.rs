//! Stateless clause fragment builders.

use crate::NODE_VAR;
use crate::options::{ListOptions, SortSpec};
use cypherstore_api::{Identity, PropertyMap};

/// `n=node(ID)`
pub fn node_start(id: Identity, var: &str) -> String {
    format!("{var}=node({id})")
}

/// `r=rel(ID)`
pub fn rel_start(id: Identity, var: &str) -> String {
    format!("{var}=rel({id})")
}

/// `id(n) = ID`
pub fn id_condition(id: Identity, var: &str) -> String {
    format!("id({var}) = {id}")
}

/// `START n=node(ID)`
pub fn start_statement_for_id(id: Identity, var: &str) -> String {
    format!("START {}", node_start(id, var))
}

/// `START r=rel(ID)`
pub fn start_statement_for_rel_id(id: Identity, var: &str) -> String {
    format!("START {}", rel_start(id, var))
}

/// `WHERE id(n) = ID`
pub fn where_statement_for_id(id: Identity, var: &str) -> String {
    format!("WHERE {}", id_condition(id, var))
}

/// Joins partial node patterns into one `MATCH` clause.
///
/// `patterns[i]` is prefixed with `vars[i]`; a missing or empty variable
/// name falls back to [`NODE_VAR`]. Returns an empty string when there is
/// nothing to match.
pub fn match_statement(patterns: &[&str], vars: &[&str]) -> String {
    if patterns.is_empty() {
        return String::new();
    }

    let body = patterns
        .iter()
        .enumerate()
        .map(|(i, pattern)| {
            let var = vars
                .get(i)
                .copied()
                .filter(|v| !v.is_empty())
                .unwrap_or(NODE_VAR);
            format!("({var}{pattern})")
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("MATCH {body}")
}

/// `:Label1:Label2`, or an empty string for no labels.
pub fn label_fragment<S: AsRef<str>>(labels: &[S]) -> String {
    let mut out = String::new();
    for label in labels {
        out.push(':');
        out.push_str(label.as_ref());
    }
    out
}

/// Parameterized property object: `{ k : {k}, ... }`.
///
/// Returns an empty string (not `{}`) for an empty bag.
pub fn properties_write_fragment(data: &PropertyMap) -> String {
    if data.is_empty() {
        return String::new();
    }

    let entries = data
        .keys()
        .map(|key| format!("{key} : {{{key}}}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!("{{ {entries} }}")
}

/// Literal property object for match clauses: `{ k: <json>, ... }`.
///
/// Returns `{}` for an empty bag.
pub fn properties_match_fragment(data: &PropertyMap) -> String {
    if data.is_empty() {
        return "{}".to_string();
    }

    let entries = data
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!("{{ {entries} }}")
}

/// `ORDER BY n.a, n.b DESC`, or an empty string when no property is named.
pub fn sort_fragment(spec: &SortSpec, var: &str) -> String {
    let mut terms = Vec::new();
    collect_sort_terms(spec, var, &mut terms);
    if terms.is_empty() {
        return String::new();
    }
    format!("ORDER BY {}", terms.join(", "))
}

fn collect_sort_terms(spec: &SortSpec, var: &str, out: &mut Vec<String>) {
    match spec {
        SortSpec::Property(property) => {
            if !property.is_empty() {
                out.push(format!("{var}.{property}"));
            }
        }
        SortSpec::Rule { property, desc } => {
            let direction = if *desc { " DESC" } else { "" };
            out.push(format!("{var}.{property}{direction}"));
        }
        SortSpec::List(items) => {
            for item in items {
                collect_sort_terms(item, var, out);
            }
        }
    }
}

/// Sort, skip and limit in that order, space separated.
pub fn options_fragment(options: &ListOptions, var: &str) -> String {
    let mut parts = Vec::new();

    if let Some(spec) = &options.order_by {
        let sort = sort_fragment(spec, var);
        if !sort.is_empty() {
            parts.push(sort);
        }
    }

    if let Some(offset) = options.offset.filter(|offset| *offset > 0) {
        parts.push(format!("SKIP {offset}"));
    }

    if let Some(limit) = options.limit.filter(|limit| *limit > 0) {
        parts.push(format!("LIMIT {limit}"));
    }

    parts.join(" ")
}

/// Prefixes a non-empty fragment with a single space.
pub(crate) fn spaced(fragment: &str) -> String {
    if fragment.is_empty() {
        String::new()
    } else {
        format!(" {fragment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(pairs: &[(&str, serde_json::Value)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn identity_anchors() {
        let id = Identity::from_words(1, 0);
        assert_eq!(start_statement_for_id(id, "n"), "START n=node(1)");
        assert_eq!(start_statement_for_rel_id(Identity::new(9), "r"), "START r=rel(9)");
        assert_eq!(where_statement_for_id(Identity::new(3), "m"), "WHERE id(m) = 3");
    }

    #[test]
    fn match_statement_defaults_missing_vars() {
        assert_eq!(match_statement(&[], &[]), "");
        assert_eq!(
            match_statement(&[":A", "", ":B"], &["x", ""]),
            "MATCH (x:A), (n), (n:B)"
        );
    }

    #[test]
    fn labels_join_with_colons() {
        assert_eq!(label_fragment(&["Person", "Admin"]), ":Person:Admin");
        assert_eq!(label_fragment::<&str>(&[]), "");
    }

    #[test]
    fn write_fragment_is_parameterized() {
        let data = bag(&[("name", json!("Ann")), ("age", json!(33))]);
        assert_eq!(
            properties_write_fragment(&data),
            "{ name : {name}, age : {age} }"
        );
        assert_eq!(properties_write_fragment(&PropertyMap::new()), "");
    }

    #[test]
    fn match_fragment_inlines_json() {
        let data = bag(&[
            ("name", json!("Ann")),
            ("tags", json!(["a", "b"])),
            ("ok", json!(true)),
        ]);
        assert_eq!(
            properties_match_fragment(&data),
            r#"{ name: "Ann", tags: ["a","b"], ok: true }"#
        );
        assert_eq!(properties_match_fragment(&PropertyMap::new()), "{}");
    }

    #[test]
    fn sort_mixed_rules() {
        let spec = SortSpec::List(vec![SortSpec::asc("a"), SortSpec::desc("b")]);
        assert_eq!(sort_fragment(&spec, "n"), "ORDER BY n.a, n.b DESC");
    }

    #[test]
    fn sort_flattens_nested_lists() {
        let spec = SortSpec::List(vec![
            SortSpec::List(vec![SortSpec::asc("a"), SortSpec::asc("b")]),
            SortSpec::desc("c"),
        ]);
        assert_eq!(sort_fragment(&spec, "r"), "ORDER BY r.a, r.b, r.c DESC");
        assert_eq!(sort_fragment(&SortSpec::List(vec![]), "n"), "");
        assert_eq!(sort_fragment(&SortSpec::asc(""), "n"), "");
    }

    #[test]
    fn options_honor_sentinels() {
        let opts = ListOptions::new().order_by("name").offset(10).limit(5);
        assert_eq!(
            options_fragment(&opts, "n"),
            "ORDER BY n.name SKIP 10 LIMIT 5"
        );

        let unbounded = ListOptions::new().offset(0).limit(-1);
        assert_eq!(options_fragment(&unbounded, "n"), "");

        let negative_skip = ListOptions::new().offset(-4).limit(2);
        assert_eq!(options_fragment(&negative_skip, "m"), "LIMIT 2");
    }
}
