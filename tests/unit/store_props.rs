use std::sync::Arc;

use habit_streaks::{Cadence, CompletionStore, HabitService, ManualClock, Schedule, SqliteStorage};
use proptest::prelude::*;

use super::day;

fn service(offset: u64) -> (HabitService<SqliteStorage>, Arc<ManualClock>) {
    let storage = Arc::new(SqliteStorage::in_memory().expect("Failed to open storage"));
    let clock = Arc::new(ManualClock::new(day(offset)));
    (HabitService::new(storage, clock.clone()), clock)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn marking_done_is_idempotent(offset in 0u64..1000, repeats in 1usize..4) {
        let (service, _) = service(offset);
        let id = service
            .create_habit("Read", Cadence::Daily, Schedule::every_day(), day(0), "#40c463")
            .unwrap();

        for _ in 0..repeats {
            let today = service.mark_done_today(id).unwrap();
            let rows = service.store().list_in_range(id, today, today).unwrap();
            prop_assert_eq!(rows.len(), 1);
            prop_assert_eq!(rows[0].record_date, day(offset));
        }
    }

    #[test]
    fn delete_removes_every_completion(offsets in proptest::collection::vec(0u64..500, 1..20)) {
        let (service, clock) = service(0);
        let id = service
            .create_habit("Run", Cadence::Weekly, Schedule::weekly([2]), day(0), "#216e39")
            .unwrap();

        for offset in &offsets {
            clock.set(day(*offset));
            service.mark_done_today(id).unwrap();
        }
        service.delete_habit(id).unwrap();

        let left = service.store().list_in_range(id, day(0), day(600)).unwrap();
        prop_assert!(left.is_empty());
    }
}
