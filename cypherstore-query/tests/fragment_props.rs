use cypherstore_api::PropertyMap;
use cypherstore_query::fragment::{
    label_fragment, properties_match_fragment, properties_write_fragment,
};
use proptest::prelude::*;
use serde_json::{Value, json};

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(|v| json!(v)),
        any::<bool>().prop_map(|v| json!(v)),
        "[a-zA-Z0-9 ,:{}\"]{0,10}".prop_map(|v| json!(v)),
        prop::collection::vec(any::<i32>(), 0..4).prop_map(|v| json!(v)),
        ("[a-z]{1,5}", any::<i64>()).prop_map(|(k, v)| json!({ k: v })),
    ]
}

fn entries_strategy() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec(("[a-z][a-z0-9_]{0,8}", value_strategy()), 0..8)
}

fn to_map(entries: &[(String, Value)]) -> PropertyMap {
    entries.iter().cloned().collect()
}

// Keys in first-seen order, with the last value written for each.
fn dedup(entries: &[(String, Value)]) -> Vec<(String, Value)> {
    let mut out: Vec<(String, Value)> = Vec::new();
    for (key, value) in entries {
        match out.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value.clone(),
            None => out.push((key.clone(), value.clone())),
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn write_fragment_lists_input_keys_once_in_order(entries in entries_strategy()) {
        let fragment = properties_write_fragment(&to_map(&entries));
        let expected = dedup(&entries);

        if expected.is_empty() {
            prop_assert_eq!(fragment, "");
        } else {
            let body: Vec<String> = expected
                .iter()
                .map(|(k, _)| format!("{k} : {{{k}}}"))
                .collect();
            prop_assert_eq!(fragment, format!("{{ {} }}", body.join(", ")));
        }
    }

    #[test]
    fn match_fragment_inlines_values_that_parse_back(entries in entries_strategy()) {
        let fragment = properties_match_fragment(&to_map(&entries));
        let expected = dedup(&entries);

        prop_assert!(
            fragment.starts_with('{') && fragment.ends_with('}'),
            "unbraced fragment: {}",
            fragment
        );
        if expected.is_empty() {
            prop_assert_eq!(fragment, "{}");
            return Ok(());
        }

        let mut rest = fragment
            .strip_prefix("{ ")
            .and_then(|s| s.strip_suffix(" }"))
            .unwrap_or_default();
        for (i, (key, value)) in expected.iter().enumerate() {
            let literal = serde_json::to_string(value).unwrap();
            let entry = format!("{key}: {literal}");
            prop_assert!(rest.starts_with(&entry), "{} not next in {}", entry, fragment);

            let parsed: Value = serde_json::from_str(&literal).unwrap();
            prop_assert_eq!(&parsed, value);

            rest = &rest[entry.len()..];
            if i + 1 < expected.len() {
                rest = rest.strip_prefix(", ").unwrap_or(rest);
            }
        }
        prop_assert_eq!(rest, "");
    }

    #[test]
    fn label_fragment_prefixes_each_label(
        labels in prop::collection::vec("[A-Z][a-z]{0,6}", 0..5)
    ) {
        let fragment = label_fragment(&labels);
        let expected: String = labels.iter().map(|l| format!(":{l}")).collect();
        prop_assert_eq!(fragment.matches(':').count(), labels.len());
        prop_assert_eq!(fragment, expected);
    }
}
