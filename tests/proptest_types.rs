//! Property-based tests for core model types.
//!
//! Ensures value types handle arbitrary input without panicking, and that
//! key invariants hold across random inputs.

use proptest::prelude::*;
use spdx_tools::model::{
    Actor, ActorType, Checksum, ChecksumAlgorithm, LicenseExpression, ThreeValued,
};
use spdx_tools::validation::{validate_checksum, SpdxVersion};

fn any_algorithm() -> impl Strategy<Value = ChecksumAlgorithm> {
    prop::sample::select(ChecksumAlgorithm::ALL.to_vec())
}

fn any_actor_type() -> impl Strategy<Value = ActorType> {
    prop::sample::select(vec![
        ActorType::Person,
        ActorType::Organization,
        ActorType::Tool,
    ])
}

fn license_expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        prop::sample::select(vec!["MIT", "Apache-2.0", "GPL-2.0-only", "BSD-3-Clause"])
            .prop_map(str::to_string),
        "[A-Za-z0-9.]{1,12}".prop_map(|id| format!("LicenseRef-{id}")),
        prop::sample::select(vec!["GPL-2.0", "LGPL-2.1"]).prop_map(|id| format!("{id}+")),
        Just("GPL-2.0-or-later WITH Classpath-exception-2.0".to_string()),
    ];
    leaf.prop_recursive(4, 16, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a} AND {b}")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a} OR {b}")),
            inner.prop_map(|e| format!("({e})")),
        ]
    })
}

proptest! {
    // Type invariant checks are fast, so they get broader coverage than
    // the parser tests.
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn checksum_length_is_enforced(
        algorithm in any_algorithm(),
        value in "[0-9a-f]{0,600}",
    ) {
        let checksum = Checksum::new(algorithm, value.clone());
        let messages = validate_checksum(&checksum, "SPDXRef-File", SpdxVersion::V2_3);
        let length_ok = match algorithm.hex_length() {
            Some(expected) => value.len() == expected,
            None if algorithm == ChecksumAlgorithm::Blake3 => value.len() >= 256,
            None => value.len() <= 512,
        };
        prop_assert_eq!(messages.is_empty(), length_ok, "{} {}", algorithm, value.len());
    }

    #[test]
    fn uppercase_checksum_is_rejected(algorithm in any_algorithm(), value in "[0-9A-F]{40}") {
        prop_assume!(value.chars().any(|c| c.is_ascii_uppercase()));
        let checksum = Checksum::new(algorithm, value);
        prop_assert!(!validate_checksum(&checksum, "SPDXRef-File", SpdxVersion::V2_3).is_empty());
    }

    #[test]
    fn checksum_display_parses_back(algorithm in any_algorithm(), value in "[0-9a-f]{1,128}") {
        let checksum = Checksum::new(algorithm, value);
        let parsed: Checksum = checksum.to_string().parse().unwrap();
        prop_assert_eq!(parsed, checksum);
    }

    #[test]
    fn actor_construction(
        actor_type in any_actor_type(),
        name in "\\PC{0,40}",
        email in prop::option::of("[a-z]{1,10}@[a-z]{1,10}\\.org"),
    ) {
        let result = Actor::new(actor_type, name.clone(), email.clone());
        let expect_ok = !name.trim().is_empty()
            && !(actor_type == ActorType::Tool && email.is_some());
        prop_assert_eq!(result.is_ok(), expect_ok);
        if let Ok(actor) = result {
            prop_assert_eq!(actor.name, name);
            prop_assert_eq!(actor.email, email);
        }
    }

    #[test]
    fn three_valued_display_is_stable(raw in "\\PC{0,40}") {
        let parsed = ThreeValued::parse_str(&raw);
        let reparsed = ThreeValued::parse_str(&parsed.to_string());
        prop_assert_eq!(reparsed, parsed);
    }

    #[test]
    fn license_expression_print_parse_is_stable(expression in license_expression()) {
        let parsed: LicenseExpression = expression.parse().unwrap();
        let printed = parsed.to_string();
        let reparsed: LicenseExpression = printed.parse().unwrap();
        prop_assert_eq!(&reparsed, &parsed);
        prop_assert_eq!(reparsed.to_string(), printed);
    }

    #[test]
    fn license_expression_doesnt_panic(s in "\\PC{0,200}") {
        if let Ok(expression) = s.parse::<LicenseExpression>() {
            let _ = expression.license_ids();
            let _ = expression.exception_ids();
            let _ = expression.to_string();
        }
    }
}
