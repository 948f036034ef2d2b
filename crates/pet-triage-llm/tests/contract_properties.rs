//! Property tests for the output contract parser.

use pet_triage_core::{normalize, MAX_CARE, MAX_CONDITIONS, MAX_RED_FLAGS};
use pet_triage_llm::parse_contract;
use proptest::prelude::*;

proptest! {
    #[test]
    fn parser_is_total(text in ".{0,300}") {
        let _ = parse_contract(&text);
    }

    #[test]
    fn embedded_contract_survives_noise(
        prefix in "[a-zA-Z ,.']{0,40}",
        suffix in "[a-zA-Z ,.']{0,40}",
        names in prop::collection::vec("[a-z]{1,12}", 1..8),
    ) {
        let conditions: Vec<String> = names
            .iter()
            .map(|n| format!(r#"{{"name":"{n}","reason":"r"}}"#))
            .collect();
        let text = format!(r#"{prefix}{{"conditions":[{}]}}{suffix}"#, conditions.join(","));

        let draft = parse_contract(&text).unwrap();
        prop_assert_eq!(draft.conditions.len(), names.len());

        let content = normalize(draft);
        prop_assert!(content.conditions.len() <= MAX_CONDITIONS);
        prop_assert!(content.red_flags.len() <= MAX_RED_FLAGS);
        prop_assert!(content.care.len() <= MAX_CARE);
        prop_assert_eq!(&content.conditions[0].name, &names[0]);
    }
}
