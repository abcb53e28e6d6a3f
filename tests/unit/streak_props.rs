use std::collections::BTreeSet;

use chrono::Days;
use habit_streaks::{current_streak, Cadence};
use proptest::prelude::*;

use super::day;

fn cadence() -> impl Strategy<Value = Cadence> {
    prop_oneof![Just(Cadence::Daily), Just(Cadence::Weekly), Just(Cadence::Monthly)]
}

fn completion_set() -> impl Strategy<Value = BTreeSet<u64>> {
    proptest::collection::btree_set(0u64..200, 0..80)
}

proptest! {
    #[test]
    fn daily_streak_is_consecutive_prefix(set in completion_set(), today_offset in 0u64..220) {
        let today = day(today_offset);
        let dates: Vec<_> = set.iter().map(|o| day(*o)).collect();

        let mut expected = 0u32;
        let mut cursor = Some(today);
        while let Some(d) = cursor {
            if !dates.contains(&d) {
                break;
            }
            expected += 1;
            cursor = d.checked_sub_days(Days::new(1));
        }

        prop_assert_eq!(current_streak(Cadence::Daily, today, &dates), expected);
    }

    #[test]
    fn adding_today_never_shortens_streak(
        cadence in cadence(),
        set in completion_set(),
        today_offset in 0u64..220,
    ) {
        let today = day(today_offset);
        let mut dates: Vec<_> = set.iter().map(|o| day(*o)).collect();
        let before = current_streak(cadence, today, &dates);

        dates.push(today);
        prop_assert!(current_streak(cadence, today, &dates) >= before);
    }

    #[test]
    fn removing_a_past_completion_never_lengthens_streak(
        cadence in cadence(),
        set in completion_set(),
        today_offset in 0u64..220,
        pick in any::<proptest::sample::Index>(),
    ) {
        let today = day(today_offset);
        let dates: Vec<_> = set.iter().map(|o| day(*o)).collect();
        prop_assume!(!dates.is_empty());

        let removed = dates[pick.index(dates.len())];
        prop_assume!(removed < today);
        let fewer: Vec<_> = dates.iter().copied().filter(|d| *d != removed).collect();

        prop_assert!(current_streak(cadence, today, &fewer) <= current_streak(cadence, today, &dates));
    }

    #[test]
    fn order_and_duplicates_do_not_matter(cadence in cadence(), set in completion_set(), today_offset in 0u64..220) {
        let today = day(today_offset);
        let ascending: Vec<_> = set.iter().map(|o| day(*o)).collect();
        let mut shuffled: Vec<_> = ascending.iter().rev().copied().collect();
        shuffled.extend(ascending.iter().copied());

        prop_assert_eq!(
            current_streak(cadence, today, &ascending),
            current_streak(cadence, today, &shuffled)
        );
    }

    #[test]
    fn unknown_cadence_never_parses(name in "[a-z]{1,10}") {
        prop_assume!(!matches!(name.as_str(), "daily" | "weekly" | "monthly"));
        prop_assert!(name.parse::<Cadence>().is_err());
    }
}
