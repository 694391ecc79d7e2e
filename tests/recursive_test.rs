//! Integration tests for self-referential decoders.

use decant::{decode, BoxDecoder, Decode, DecoderExt, ConfigValue, FailureReason};
use serde_json::json;

#[derive(Debug, PartialEq)]
struct Category {
    name: String,
    subcategories: Vec<Category>,
}

fn category_decoder() -> BoxDecoder<Category> {
    Decode::record(
        Decode::field("name", Decode::string())
            .zip(Decode::field(
                "subcategories",
                Decode::list(Decode::lazy(category_decoder)),
            ))
            .map(|(name, subcategories)| Category {
                name,
                subcategories,
            }),
    )
    .boxed()
}

#[test]
fn test_decodes_nested_levels() {
    let tree = ConfigValue::from(json!({
        "name": "root",
        "subcategories": [
            {
                "name": "books",
                "subcategories": [
                    {"name": "fiction", "subcategories": []}
                ]
            },
            {"name": "music", "subcategories": []}
        ]
    }));

    let category = decode(&category_decoder(), &tree).unwrap();
    assert_eq!(category.name, "root");
    assert_eq!(category.subcategories.len(), 2);
    assert_eq!(category.subcategories[0].subcategories[0].name, "fiction");
}

#[test]
fn test_leaf_level_terminates_recursion() {
    let tree = ConfigValue::from(json!({"name": "leaf", "subcategories": []}));
    let category = decode(&category_decoder(), &tree).unwrap();
    assert!(category.subcategories.is_empty());
}

#[test]
fn test_failures_at_depth_carry_full_paths() {
    // Two independent problems at different depths, both reported.
    let tree = ConfigValue::from(json!({
        "name": "root",
        "subcategories": [
            {"name": 1, "subcategories": []},
            {
                "name": "ok",
                "subcategories": [
                    {"name": "deep", "subcategories": [{"name": "x"}]}
                ]
            }
        ]
    }));

    let error = decode(&category_decoder(), &tree).unwrap_err();
    let failures = error.failures();
    assert_eq!(failures.len(), 2);

    let paths: Vec<String> = failures.iter().map(|f| f.path.to_string()).collect();
    assert!(paths.contains(&"subcategories.0.name".to_string()));
    assert!(paths.contains(&"subcategories.1.subcategories.0.subcategories.0".to_string()));
}

#[derive(Debug, PartialEq)]
struct Menu {
    label: String,
    entries: indexmap::IndexMap<String, Menu>,
}

fn menu_decoder() -> BoxDecoder<Menu> {
    Decode::record(
        Decode::field("label", Decode::string())
            .zip(Decode::field("entries", Decode::map(Decode::lazy(menu_decoder))))
            .map(|(label, entries)| Menu { label, entries }),
    )
    .boxed()
}

#[test]
fn test_recursive_map_with_two_bad_leaves() {
    let tree = ConfigValue::from(json!({
        "label": "main",
        "entries": {
            "file": {
                "label": "File",
                "entries": {
                    "open": {"label": 1, "entries": {}}
                }
            },
            "edit": {
                "label": "Edit",
                "entries": {
                    "undo": {"label": "Undo"}
                }
            }
        }
    }));

    let error = decode(&menu_decoder(), &tree).unwrap_err();
    let failures = error.failures();
    assert_eq!(failures.len(), 2);

    let paths: Vec<String> = failures.iter().map(|f| f.path.to_string()).collect();
    assert!(paths.contains(&"entries.file.entries.open.label".to_string()));
    assert!(paths.contains(&"entries.edit.entries.undo".to_string()));
}

#[test]
fn test_wrong_shape_mid_recursion() {
    let tree = ConfigValue::from(json!({
        "name": "root",
        "subcategories": ["not a category"]
    }));

    let error = decode(&category_decoder(), &tree).unwrap_err();
    let failure = error.failures().first();
    assert_eq!(failure.path.to_string(), "subcategories.0");
    assert!(matches!(failure.reason, FailureReason::WrongType { .. }));
}
