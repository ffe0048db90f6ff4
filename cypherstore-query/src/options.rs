use serde::Deserialize;

/// Sort specification for list operations.
///
/// Accepts a bare property name (ascending), a `{ property, desc }` rule, or a
/// sequence of either. Sequences may nest; they are flattened in order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SortSpec {
    Property(String),
    Rule {
        property: String,
        #[serde(default)]
        desc: bool,
    },
    List(Vec<SortSpec>),
}

impl SortSpec {
    pub fn asc(property: impl Into<String>) -> Self {
        SortSpec::Property(property.into())
    }

    pub fn desc(property: impl Into<String>) -> Self {
        SortSpec::Rule {
            property: property.into(),
            desc: true,
        }
    }
}

impl From<&str> for SortSpec {
    fn from(property: &str) -> Self {
        SortSpec::Property(property.to_string())
    }
}

impl From<Vec<SortSpec>> for SortSpec {
    fn from(items: Vec<SortSpec>) -> Self {
        SortSpec::List(items)
    }
}

/// Sorting and paging for list operations.
///
/// - `limit == 0` means "match nothing": list operations return without
///   querying.
/// - `limit < 0` means no limit.
/// - `offset <= 0` means no skip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListOptions {
    pub order_by: Option<SortSpec>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: i64) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn order_by(mut self, spec: impl Into<SortSpec>) -> Self {
        self.order_by = Some(spec.into());
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True for the `limit == 0` sentinel.
    #[inline]
    pub fn is_empty_page(&self) -> bool {
        self.limit == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::{ListOptions, SortSpec};

    #[test]
    fn sort_spec_deserializes_all_shapes() {
        let spec: SortSpec =
            serde_json::from_str(r#"["a", {"property": "b", "desc": true}, [{"property": "c"}]]"#)
                .unwrap();

        assert_eq!(
            spec,
            SortSpec::List(vec![
                SortSpec::asc("a"),
                SortSpec::desc("b"),
                SortSpec::List(vec![SortSpec::Rule {
                    property: "c".to_string(),
                    desc: false,
                }]),
            ])
        );
    }

    #[test]
    fn list_options_use_camel_case_field_names() {
        let opts: ListOptions =
            serde_json::from_str(r#"{"orderBy": "name", "offset": 5, "limit": 0}"#).unwrap();

        assert_eq!(opts.order_by, Some(SortSpec::asc("name")));
        assert_eq!(opts.offset, Some(5));
        assert!(opts.is_empty_page());
        assert!(!ListOptions::with_limit(-1).is_empty_page());
    }
}
