//! Clause IR for statements that anchor on one or more nodes.
//!
//! Each clause kind has its own slot, so combining contributions from both
//! relationship endpoints can never interleave keywords: the rendered text is
//! always `START …`, then `MATCH …`, then `WHERE …`.

use crate::fragment::{id_condition, match_statement, node_start};
use cypherstore_api::Identity;

/// How a relationship pattern joins the clauses that anchor its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelationMatch {
    /// `… OPTIONAL MATCH <pattern>`: endpoints match even without the
    /// relationship.
    #[default]
    Optional,
    /// The pattern joins the existing `MATCH` slot, so the relationship is
    /// mandatory. Unconstrained node patterns are dropped because the
    /// relationship pattern binds those variables itself.
    Fold,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseSet {
    start: Vec<String>,
    // (variable, pattern body without the variable)
    nodes: Vec<(String, String)>,
    paths: Vec<String>,
    conditions: Vec<String>,
}

impl ClauseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchors `var` to a node identity through the `START` slot.
    pub fn start_node(&mut self, id: Identity, var: &str) {
        self.start.push(node_start(id, var));
    }

    /// Adds `(var<body>)` to the `MATCH` slot.
    pub fn node(&mut self, var: &str, body: impl Into<String>) {
        self.nodes.push((var.to_string(), body.into()));
    }

    /// Adds an already rendered path pattern to the `MATCH` slot.
    pub fn path(&mut self, pattern: impl Into<String>) {
        self.paths.push(pattern.into());
    }

    /// Adds `id(var) = ID` to the `WHERE` slot.
    pub fn where_id(&mut self, id: Identity, var: &str) {
        self.conditions.push(id_condition(id, var));
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty()
            && self.nodes.is_empty()
            && self.paths.is_empty()
            && self.conditions.is_empty()
    }

    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(3);

        if !self.start.is_empty() {
            parts.push(format!("START {}", self.start.join(", ")));
        }

        let vars: Vec<&str> = self.nodes.iter().map(|(var, _)| var.as_str()).collect();
        let bodies: Vec<&str> = self.nodes.iter().map(|(_, body)| body.as_str()).collect();
        let mut matches = match_statement(&bodies, &vars);
        for path in &self.paths {
            if matches.is_empty() {
                matches = format!("MATCH {path}");
            } else {
                matches.push_str(", ");
                matches.push_str(path);
            }
        }
        if !matches.is_empty() {
            parts.push(matches);
        }

        if !self.conditions.is_empty() {
            parts.push(format!("WHERE {}", self.conditions.join(" AND ")));
        }

        parts.join(" ")
    }

    /// Composes a relationship pattern with the anchoring clauses.
    ///
    /// With nothing to anchor on, the pattern becomes a mandatory `MATCH`
    /// regardless of `mode`.
    pub fn attach_relation(mut self, pattern: &str, mode: RelationMatch) -> String {
        if self.is_empty() {
            return format!("MATCH {pattern}");
        }

        match mode {
            RelationMatch::Optional => format!("{} OPTIONAL MATCH {pattern}", self.render()),
            RelationMatch::Fold => {
                self.nodes.retain(|(_, body)| !body.is_empty());
                self.path(pattern);
                self.render()
            }
        }
    }
}
