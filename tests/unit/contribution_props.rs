use std::collections::BTreeSet;

use habit_streaks::build_contribution;
use proptest::prelude::*;

use super::day;

proptest! {
    #[test]
    fn contribution_is_dense_and_ascending(start in 0u64..400, span in 0u64..120) {
        let from = day(start);
        let to = day(start + span);
        let days = build_contribution(from, to, Vec::new());

        prop_assert_eq!(days.len() as u64, span + 1);
        prop_assert_eq!(days.first().map(|d| d.date), Some(from));
        prop_assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn contribution_marks_exactly_the_completed_days(
        span in 0u64..90,
        completed in proptest::collection::vec(0u64..150, 0..60),
    ) {
        let from = day(20);
        let to = day(20 + span);
        let set: BTreeSet<_> = completed.iter().map(|o| day(*o)).collect();

        let days = build_contribution(from, to, set.iter().copied());

        for (i, entry) in days.iter().enumerate() {
            prop_assert_eq!(entry.date, day(20 + i as u64));
            prop_assert_eq!(entry.completed, set.contains(&entry.date));
        }
    }

    #[test]
    fn inverted_window_is_empty(start in 1u64..400, back in 1u64..30) {
        let from = day(start + back);
        let to = day(start);
        prop_assert!(build_contribution(from, to, vec![from, to]).is_empty());
    }
}
