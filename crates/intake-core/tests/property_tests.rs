//! # Property-Based Tests
//!
//! Verification tests using proptest.
//!
//! These tests ensure determinism and correctness invariants of the
//! assignment engine, the listing order, and the tally.

use intake_core::{
    Group, GroupTally, MemoryStore, Recorder, ResponseStore, Submission, SurveyResponse,
    TimeRange, Timestamp, assign_group, filter_newest_first, parse_csv, render_csv,
};
use proptest::collection::vec;
use proptest::prelude::*;

/// Arbitrary text for the two branching answers, biased toward the
/// recognized categories but free to wander outside them.
fn answer_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("never".to_string()),
        Just("demo_only".to_string()),
        Just("often".to_string()),
        Just("very_uncomfortable".to_string()),
        Just("neutral".to_string()),
        Just("comfortable".to_string()),
        Just("very_comfortable".to_string()),
        "[a-z_]{0,16}",
    ]
}

fn record_strategy() -> impl Strategy<Value = SurveyResponse> {
    (
        prop_oneof![
            // Canonical timestamps across a few years.
            (2024u32..2027, 1u32..13, 1u32..29, 0u32..24, 0u32..60, 0u32..60).prop_map(
                |(y, mo, d, h, mi, s)| format!("{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}")
            ),
            // Text that will never parse.
            "[a-z ]{0,12}",
        ],
        "[a-zA-Z ]{1,20}",
        0u32..120,
        answer_strategy(),
        answer_strategy(),
    )
        .prop_map(|(timestamp, name, age, experience, comfort)| SurveyResponse {
            timestamp: Timestamp::new(timestamp),
            name,
            age,
            q_arm_experience: experience.clone(),
            q_control: "joystick".to_string(),
            q_comfort: comfort.clone(),
            assigned_group: assign_group(&experience, &comfort).as_str().to_string(),
        })
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// The engine is total and deterministic over arbitrary answer text.
    #[test]
    fn assignment_is_deterministic(
        experience in answer_strategy(),
        comfort in answer_strategy()
    ) {
        let first = assign_group(&experience, &comfort);
        let second = assign_group(&experience, &comfort);
        prop_assert_eq!(first, second);
    }

    /// Rule 1 dominates: "never" wins whatever the comfort answer says.
    #[test]
    fn never_dominates_all_comfort_answers(comfort in answer_strategy()) {
        prop_assert_eq!(assign_group("never", &comfort), Group::Tutorial);
    }

    /// Rule 1 dominates: "very_uncomfortable" wins whatever the experience says.
    #[test]
    fn very_uncomfortable_dominates_all_experience_answers(experience in answer_strategy()) {
        prop_assert_eq!(
            assign_group(&experience, "very_uncomfortable"),
            Group::Tutorial
        );
    }

    /// N valid submissions produce exactly N listed records.
    #[test]
    fn append_count_matches_listing_length(
        names in vec("[a-zA-Z]{1,12}", 1..20)
    ) {
        let mut store = MemoryStore::new();
        for name in &names {
            let submission = Submission::new(name.clone(), "30", "often", "joystick", "neutral");
            Recorder::record(&mut store, &submission).expect("record");
        }

        let listed = store.list(&TimeRange::all()).expect("list");
        prop_assert_eq!(listed.len(), names.len());
    }

    /// Listing order is newest first with unparsable timestamps last,
    /// regardless of stored order.
    #[test]
    fn listing_order_invariant(records in vec(record_strategy(), 0..40)) {
        let listed = filter_newest_first(records, &TimeRange::all());

        let times: Vec<_> = listed.iter().map(|r| r.submitted_at()).collect();
        let split = times.iter().take_while(|t| t.is_some()).count();

        // Everything after the first None is also None.
        prop_assert!(times[split..].iter().all(|t| t.is_none()));
        // The parsable prefix is non-increasing.
        for pair in times[..split].windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
    }

    /// A bounded window never returns a record outside it.
    #[test]
    fn bounded_listing_respects_the_window(records in vec(record_strategy(), 0..40)) {
        let range = TimeRange::from_bounds(Some("2025-01-01"), Some("2025-12-31"));
        let listed = filter_newest_first(records, &range);

        for record in listed {
            let t = record.submitted_at().expect("bounded match implies parsable");
            prop_assert!(range.contains(Some(t)));
        }
    }

    /// The tally total always equals the sum of its buckets.
    #[test]
    fn tally_total_equals_bucket_sum(records in vec(record_strategy(), 0..60)) {
        let tally = GroupTally::from_records(&records);
        prop_assert_eq!(tally.total, tally.bucket_sum());
        prop_assert_eq!(tally.total as usize, records.len());
    }

    /// Records the engine itself assigned never land in the other bucket.
    #[test]
    fn engine_output_never_counts_as_other(records in vec(record_strategy(), 0..60)) {
        let tally = GroupTally::from_records(&records);
        prop_assert_eq!(tally.other, 0);
    }

    /// Export then re-parse round-trips every field value unchanged.
    #[test]
    fn csv_round_trip_is_lossless(records in vec(record_strategy(), 0..30)) {
        let text = render_csv(&records).expect("render");
        let parsed = parse_csv(&text).expect("parse");
        prop_assert_eq!(parsed, records);
    }
}
