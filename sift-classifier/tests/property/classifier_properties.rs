use proptest::prelude::*;
use sift_classifier::parse_classification;
use sift_core::Intent;

proptest! {
    #[test]
    fn parsed_confidence_is_always_in_unit_range(confidence in -1.0e6f64..1.0e6) {
        let reply = format!(r#"{{"intent": "search", "confidence": {confidence}}}"#);
        let c = parse_classification(&reply).unwrap();
        prop_assert!((0.0..=1.0).contains(&c.confidence));
    }

    #[test]
    fn any_label_yields_a_known_intent(label in "[a-zA-Z]{0,12}") {
        let reply = format!(r#"{{"intent": "{label}", "confidence": 0.8, "requires_retrieval": true}}"#);
        let c = parse_classification(&reply).unwrap();
        if Intent::from_label(&label).is_none() {
            prop_assert_eq!(c.intent, Intent::General);
        }
        if c.intent == Intent::General {
            prop_assert!(!c.requires_retrieval);
        }
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".{0,200}") {
        let _ = parse_classification(&text);
    }
}
