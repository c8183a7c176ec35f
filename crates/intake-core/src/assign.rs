//! # Group Assignment Engine
//!
//! The decision table that buckets a respondent into a study group from
//! two questionnaire answers.
//!
//! ## Determinism Guarantees
//!
//! - Total: every input pair maps to a group, unrecognized answers fall
//!   through to the standard track
//! - Pure: no side effects, no failure modes
//! - Ordered: first matching rule wins, and the rules are NOT mutually
//!   exclusive (a `never` respondent lands in the tutorial track no matter
//!   how comfortable they report being), so rule order is load-bearing

use crate::types::Group;

/// Comfort answers that keep a demo-only respondent on the standard track.
const SETTLED_COMFORT: [&str; 3] = ["neutral", "comfortable", "very_comfortable"];

/// Comfort answers that move a frequent user onto the advanced track.
const CONFIDENT_COMFORT: [&str; 2] = ["comfortable", "very_comfortable"];

/// Assign a study group from the experience and comfort answers.
///
/// Precedence, first match wins:
/// 1. never used a robotic arm OR very uncomfortable  -> tutorial
/// 2. demo_only AND at least neutral comfort          -> standard
/// 3. often AND comfortable or better                 -> advanced
/// 4. fallback                                        -> standard
#[must_use]
pub fn assign_group(experience: &str, comfort: &str) -> Group {
    if experience == "never" || comfort == "very_uncomfortable" {
        return Group::Tutorial;
    }
    if experience == "demo_only" && SETTLED_COMFORT.contains(&comfort) {
        return Group::Standard;
    }
    if experience == "often" && CONFIDENT_COMFORT.contains(&comfort) {
        return Group::Advanced;
    }
    Group::Standard
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const COMFORT_VALUES: [&str; 4] = [
        "very_uncomfortable",
        "neutral",
        "comfortable",
        "very_comfortable",
    ];

    const EXPERIENCE_VALUES: [&str; 3] = ["never", "demo_only", "often"];

    #[test]
    fn never_always_lands_in_tutorial() {
        for comfort in COMFORT_VALUES {
            assert_eq!(assign_group("never", comfort), Group::Tutorial);
        }
        // Even paired with answers outside the recognized set.
        assert_eq!(assign_group("never", "ecstatic"), Group::Tutorial);
        assert_eq!(assign_group("never", ""), Group::Tutorial);
    }

    #[test]
    fn very_uncomfortable_always_lands_in_tutorial() {
        for experience in EXPERIENCE_VALUES {
            assert_eq!(
                assign_group(experience, "very_uncomfortable"),
                Group::Tutorial
            );
        }
        assert_eq!(assign_group("daily", "very_uncomfortable"), Group::Tutorial);
        assert_eq!(assign_group("", "very_uncomfortable"), Group::Tutorial);
    }

    #[test]
    fn demo_only_with_settled_comfort_is_standard() {
        for comfort in ["neutral", "comfortable", "very_comfortable"] {
            assert_eq!(assign_group("demo_only", comfort), Group::Standard);
        }
    }

    #[test]
    fn often_with_confident_comfort_is_advanced() {
        assert_eq!(assign_group("often", "comfortable"), Group::Advanced);
        assert_eq!(assign_group("often", "very_comfortable"), Group::Advanced);
    }

    #[test]
    fn often_with_neutral_comfort_falls_back_to_standard() {
        // Rule 3 requires comfortable or better; neutral drops through.
        assert_eq!(assign_group("often", "neutral"), Group::Standard);
    }

    #[test]
    fn unrecognized_answers_fall_back_to_standard() {
        assert_eq!(assign_group("occasionally", "neutral"), Group::Standard);
        assert_eq!(assign_group("", ""), Group::Standard);
        assert_eq!(assign_group("demo_only", "unsure"), Group::Standard);
        assert_eq!(assign_group("often", "somewhat_ok"), Group::Standard);
    }

    #[test]
    fn rule_order_is_observable() {
        // "never" + "very_comfortable" satisfies nothing below rule 1 but
        // the tutorial rule must still win.
        assert_eq!(assign_group("never", "very_comfortable"), Group::Tutorial);
        // "demo_only" + "very_uncomfortable" matches rule 1 before rule 2
        // gets a look.
        assert_eq!(
            assign_group("demo_only", "very_uncomfortable"),
            Group::Tutorial
        );
    }

    #[test]
    fn full_table_never_panics_and_is_total() {
        let experiences = ["never", "demo_only", "often", "occasionally", ""];
        for experience in experiences {
            for comfort in COMFORT_VALUES.iter().chain(["", "unsure"].iter()) {
                let _ = assign_group(experience, comfort);
            }
        }
    }
}
