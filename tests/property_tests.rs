use entrylab::geometry::{ideal_travel, sanitize_prompt};
use entrylab::metrics::{error_rate, levenshtein};
use entrylab::stats::reject_outliers;
use entrylab::trial::Layout;
use proptest::prelude::*;

// --- STRATEGIES ---

fn arb_layout() -> impl Strategy<Value = Layout> {
    prop_oneof![
        Just(Layout::SliderOnly),
        Just(Layout::ArcType),
        Just(Layout::TiltType),
        Just(Layout::Raycast),
    ]
}

prop_compose! {
    fn arb_prompt()(s in "[a-zA-Z ]{0,40}") -> String {
        s
    }
}

proptest! {
    #[test]
    fn ideal_travel_is_non_negative(layout in arb_layout(), prompt in arb_prompt()) {
        let t = ideal_travel(layout, &prompt).unwrap();
        prop_assert!(t.x >= 0.0);
        prop_assert!(t.z >= 0.0);
    }

    #[test]
    fn single_char_prompt_has_no_travel(layout in arb_layout(), prompt in "[a-z ]?") {
        prop_assert_eq!(ideal_travel(layout, &prompt).unwrap().norm(), 0.0);
    }

    #[test]
    fn sanitized_text_is_always_placeable(layout in arb_layout(), text in ".{0,40}") {
        let clean = sanitize_prompt(&text);
        prop_assert!(ideal_travel(layout, &clean).is_ok());
    }

    #[test]
    fn error_rate_identity_and_range(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
        prop_assert_eq!(error_rate(&a, &a), 0.0);
        let e = error_rate(&a, &b);
        prop_assert!((0.0..=100.0).contains(&e));
    }

    #[test]
    fn levenshtein_is_symmetric(a in "[a-z]{0,15}", b in "[a-z]{0,15}") {
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
        let bound = a.chars().count().max(b.chars().count());
        prop_assert!(levenshtein(&a, &b) <= bound);
    }

    #[test]
    fn reject_outliers_never_grows(
        samples in prop::collection::vec(-1000.0..1000.0f64, 0..50),
        m in 0.5..4.0f64
    ) {
        let kept = reject_outliers(&samples, m);
        prop_assert!(kept.len() <= samples.len());
        prop_assert!(kept.iter().all(|x| samples.contains(x)));
    }

    #[test]
    fn reject_outliers_keeps_constant_input(v in -100.0..100.0f64, n in 1usize..30) {
        let samples = vec![v; n];
        prop_assert_eq!(reject_outliers(&samples, 2.0), samples);
    }
}
