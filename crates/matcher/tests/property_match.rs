// Property-based tests for the matching cascade.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use serde_json::{json, Value};

use matchkit_engine::evidence::verify_coverage;
use matchkit_engine::similarity::{sequence_ratio, similarity};
use matchkit_engine::{match_items, Record};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn fields() -> Vec<String> {
    vec!["text".to_string(), "page".to_string()]
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Field value: mostly short text from a small alphabet (so collisions and
/// near-matches happen), sometimes numbers, null or empty.
fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => "[abc ]{0,8}".prop_map(Value::String),
        2 => (0i64..5).prop_map(|n| json!(n)),
        1 => Just(Value::Null),
        1 => Just(json!("")),
    ]
}

fn arb_record() -> impl Strategy<Value = Record> {
    (arb_value(), proptest::option::of(arb_value())).prop_map(|(text, page)| {
        let mut fields = serde_json::Map::new();
        fields.insert("text".to_string(), text);
        if let Some(page) = page {
            fields.insert("page".to_string(), page);
        }
        Record::from_map(fields)
    })
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec(arb_record(), 0..7)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn every_record_lands_in_exactly_one_triple(expected in arb_records(), actual in arb_records()) {
        let result = match_items(&expected, &actual, &fields());
        prop_assert!(verify_coverage(&result, expected.len(), actual.len()).is_ok());

        let with_expected = result.matches.iter().filter(|m| m.expected.is_some()).count();
        let with_actual = result.matches.iter().filter(|m| m.actual.is_some()).count();
        prop_assert_eq!(with_expected, expected.len());
        prop_assert_eq!(with_actual, actual.len());
    }

    #[test]
    fn coverage_holds_without_fields(expected in arb_records(), actual in arb_records()) {
        let result = match_items(&expected, &actual, &[]);
        prop_assert!(verify_coverage(&result, expected.len(), actual.len()).is_ok());
    }

    #[test]
    fn strategy_label_is_one_of_the_cascade(expected in arb_records(), actual in arb_records()) {
        let result = match_items(&expected, &actual, &fields());
        let label = result.strategy.as_str();
        prop_assert!(matches!(label, "empty" | "by_text" | "by_index" | "best_effort"), "{}", label);
        if expected.is_empty() && actual.is_empty() {
            prop_assert_eq!(label, "empty");
        }
    }

    #[test]
    fn matching_is_deterministic(expected in arb_records(), actual in arb_records()) {
        let first = serde_json::to_string(&match_items(&expected, &actual, &fields())).unwrap();
        let second = serde_json::to_string(&match_items(&expected, &actual, &fields())).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ratio_is_bounded(a in "[a-d]{0,30}", b in "[a-d]{0,30}") {
        let r = sequence_ratio(&a, &b);
        prop_assert!((0.0..=1.0).contains(&r));
        prop_assert_eq!(sequence_ratio(&a, &a), 1.0);
    }

    #[test]
    fn similarity_is_bounded(a in arb_record(), b in arb_record()) {
        let s = similarity(&a, &b, &fields());
        prop_assert!((0.0..=1.0).contains(&s));
    }
}
