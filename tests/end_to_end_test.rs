//! Integration tests for whole-tree decoding and failure reporting.

use decant::{
    decode, decode_all, Decode, DecoderExt, ConfigOrigin, ConfigValue, FailureReason, Failures,
};
use serde_json::json;

#[derive(Debug, PartialEq)]
struct Settings {
    a: i64,
    b: String,
    c: i64,
}

fn settings_decoder() -> impl decant::Decoder<Output = Settings> {
    Decode::record(
        Decode::field("a", Decode::int())
            .zip(Decode::field("b", Decode::string()))
            .zip(Decode::field("c", Decode::int()))
            .map(|((a, b), c)| Settings { a, b, c }),
    )
}

#[test]
fn test_valid_tree_decodes_completely() {
    let tree = ConfigValue::from(json!({"a": 1, "b": "two", "c": 3}));
    let settings = decode(&settings_decoder(), &tree).unwrap();
    assert_eq!(
        settings,
        Settings {
            a: 1,
            b: "two".to_string(),
            c: 3
        }
    );
}

#[test]
fn test_every_problem_reported_in_one_pass() {
    // 'a' holds a string where a number belongs; 'b' and 'c' are absent.
    let tree = ConfigValue::from(json!({"a": "string"}));

    let error = decode(&settings_decoder(), &tree).unwrap_err();
    let failures = error.failures();
    assert_eq!(failures.len(), 3);

    let at_a = failures
        .iter()
        .find(|f| f.path.to_string() == "a")
        .expect("failure at 'a'");
    assert!(matches!(at_a.reason, FailureReason::WrongType { .. }));

    let missing: Vec<&str> = failures
        .iter()
        .filter(|f| f.path.is_root())
        .map(|f| match &f.reason {
            FailureReason::KeyNotFound { key, .. } => key.as_str(),
            other => panic!("unexpected reason: {:?}", other),
        })
        .collect();
    assert_eq!(missing, vec!["b", "c"]);
}

#[test]
fn test_report_groups_root_first() {
    let tree = ConfigValue::from(json!({"a": "string"}));
    let report = decode(&settings_decoder(), &tree).unwrap_err().to_string();

    assert!(report.starts_with("Cannot convert configuration to type"));
    let root_pos = report.find("at the root:").expect("root heading");
    let a_pos = report.find("at 'a':").expect("a heading");
    assert!(root_pos < a_pos);
    assert!(report.contains("- Key not found: 'b'."));
    assert!(report.contains("- Key not found: 'c'."));
    assert!(report.contains("- Expected type NUMBER. Found STRING instead."));
}

#[test]
fn test_origins_surface_in_the_report() {
    let tree = ConfigValue::object([(
        "a".to_string(),
        ConfigValue::string("oops").with_origin(ConfigOrigin::new("app.conf", 14)),
    )])
    .with_origin(ConfigOrigin::new("app.conf", 13));

    let decoder = Decode::record(Decode::field("a", Decode::int()));
    let report = decode(&decoder, &tree).unwrap_err().to_string();
    assert!(report.contains("(app.conf:14)"));
}

#[test]
fn test_deep_mixed_paths() {
    let decoder = Decode::record(Decode::field(
        "servers",
        Decode::list(Decode::record(
            Decode::field("host", Decode::string()).zip(Decode::field("port", Decode::int())),
        )),
    ));

    let tree = ConfigValue::from(json!({
        "servers": [
            {"host": "a.example.com", "port": 80},
            {"host": 7, "port": 81},
            {"host": "c.example.com"}
        ]
    }));

    let failures = decode(&decoder, &tree).unwrap_err().failures().clone();
    assert_eq!(failures.len(), 2);

    let paths: Vec<String> = failures.iter().map(|f| f.path.to_string()).collect();
    assert!(paths.contains(&"servers.1.host".to_string()));
    // The missing 'port' reports at the record that lacks it.
    assert!(paths.contains(&"servers.2".to_string()));
}

#[test]
fn test_decode_all_many_documents() {
    let decoder = Decode::record(
        Decode::field("name", Decode::string())
            .zip(Decode::field("replicas", Decode::int()))
            .map(|(name, replicas)| (name, replicas)),
    );
    let trees: Vec<ConfigValue> = vec![
        ConfigValue::from(json!({"name": "api", "replicas": 3})),
        ConfigValue::from(json!({"name": "worker"})),
        ConfigValue::from(json!({"name": "cron", "replicas": 1})),
    ];

    let results = decode_all(&decoder, &trees);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_success());
    assert!(results[1].is_failure());
    assert!(results[2].is_success());
}

#[test]
fn test_pre_structural_failures_are_singletons() {
    let failures = Failures::cannot_read("app.conf", "permission denied");
    assert_eq!(failures.len(), 1);
    assert!(failures.first().path.is_root());

    let failures = Failures::cannot_parse(
        "unexpected end of input",
        Some(ConfigOrigin::new("app.conf", 22)),
    );
    assert_eq!(failures.len(), 1);
    assert_eq!(failures.first().origin, Some(ConfigOrigin::new("app.conf", 22)));
}

#[test]
fn test_and_then_refinement_in_context() {
    let decoder = Decode::record(Decode::field(
        "level",
        Decode::string().and_then(|s| match s.as_str() {
            "debug" | "info" | "warn" | "error" => Ok(s),
            other => Err(format!("unknown log level '{}'", other)),
        }),
    ));

    let tree = ConfigValue::from(json!({"level": "verbose"}));
    let error = decode(&decoder, &tree).unwrap_err();
    let failure = error.failures().first();
    assert_eq!(failure.path.to_string(), "level");
    assert!(matches!(failure.reason, FailureReason::CannotParse { .. }));
}
