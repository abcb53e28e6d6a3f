/// End-to-end scenarios for streaks, contributions and deletion
use habit_streaks::*;
use tempfile::TempDir;

use super::{date, service_at};

fn temp_db() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_daily_streak_breaks_on_gap() {
    let dir = temp_db();
    let (service, clock) = service_at(&dir.path().join("habits.db"), date(2025, 1, 1));
    let id = service
        .create_habit("Read", Cadence::Daily, Schedule::every_day(), date(2025, 1, 1), "#40c463")
        .unwrap();

    for day in [1, 2, 3, 5] {
        clock.set(date(2025, 1, day));
        assert_eq!(service.mark_done_today(id).unwrap(), date(2025, 1, day));
    }

    assert_eq!(service.get_streak(id).unwrap().current_count, 1);
    assert_eq!(service.get_streak_at(id, date(2025, 1, 3)).unwrap().current_count, 3);
}

#[test]
fn test_new_habit_has_blank_week() {
    let dir = temp_db();
    let (service, _) = service_at(&dir.path().join("habits.db"), date(2025, 1, 7));

    for cadence in [Cadence::Daily, Cadence::Weekly, Cadence::Monthly] {
        let id = service
            .create_habit("Stretch", cadence, Schedule::every_day(), date(2025, 1, 1), "#216e39")
            .unwrap();

        assert_eq!(service.get_streak(id).unwrap().current_count, 0);

        let days = service.get_contribution(id, date(2025, 1, 1), date(2025, 1, 7)).unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, date(2025, 1, 1));
        assert_eq!(days[6].date, date(2025, 1, 7));
        assert!(days.iter().all(|d| !d.completed));
    }
}

#[test]
fn test_weekly_streak_spans_year_boundary() {
    let dir = temp_db();
    let (service, _) = service_at(&dir.path().join("habits.db"), date(2025, 1, 9));
    let id = service
        .create_habit("Long run", Cadence::Weekly, Schedule::weekly([3]), date(2024, 12, 1), "#30a14e")
        .unwrap();

    service.mark_done_on(id, date(2025, 1, 1)).unwrap();
    service.mark_done_on(id, date(2025, 1, 8)).unwrap();

    assert_eq!(service.get_streak(id).unwrap().current_count, 2);
}

#[test]
fn test_monthly_streak_stops_at_missing_month() {
    let dir = temp_db();
    let (service, _) = service_at(&dir.path().join("habits.db"), date(2025, 3, 20));
    let id = service
        .create_habit("Budget review", Cadence::Monthly, Schedule::monthly([1]), date(2024, 1, 1), "#9be9a8")
        .unwrap();

    for d in [date(2025, 3, 15), date(2025, 2, 28), date(2024, 12, 10)] {
        service.mark_done_on(id, d).unwrap();
    }

    let streak = service.get_streak(id).unwrap();
    assert_eq!(streak.current_count, 2);
    assert_eq!(streak.label(Cadence::Monthly), "2 months streak");
}

#[test]
fn test_marking_twice_keeps_one_row() {
    let dir = temp_db();
    let (service, _) = service_at(&dir.path().join("habits.db"), date(2025, 1, 9));
    let id = service
        .create_habit("Read", Cadence::Daily, Schedule::every_day(), date(2025, 1, 1), "#40c463")
        .unwrap();

    service.mark_done_today(id).unwrap();
    let first = service.store().list_in_range(id, date(2025, 1, 9), date(2025, 1, 9)).unwrap();
    service.mark_done_today(id).unwrap();
    let second = service.store().list_in_range(id, date(2025, 1, 9), date(2025, 1, 9)).unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].record_date, date(2025, 1, 9));
    assert!(second[0].completed_at >= first[0].completed_at);
}

#[test]
fn test_delete_removes_habit_and_completions() {
    let dir = temp_db();
    let (service, _) = service_at(&dir.path().join("habits.db"), date(2025, 1, 9));
    let id = service
        .create_habit("Read", Cadence::Daily, Schedule::every_day(), date(2025, 1, 1), "#40c463")
        .unwrap();
    service.mark_done_on(id, date(2025, 1, 8)).unwrap();
    service.mark_done_today(id).unwrap();

    service.delete_habit(id).unwrap();

    assert!(matches!(service.get_habit(id), Err(ServiceError::NotFound { .. })));
    assert!(service
        .store()
        .list_in_range(id, date(1970, 1, 1), date(2999, 12, 31))
        .unwrap()
        .is_empty());
    assert!(matches!(service.delete_habit(id), Err(ServiceError::NotFound { .. })));
}

#[test]
fn test_update_replaces_schedule() {
    let dir = temp_db();
    let (service, _) = service_at(&dir.path().join("habits.db"), date(2025, 1, 9));
    let id = service
        .create_habit("Swim", Cadence::Weekly, Schedule::weekly([1, 3]), date(2025, 1, 1), "#40c463")
        .unwrap();

    service
        .update_habit(id, "Swim laps", Cadence::Monthly, Schedule::monthly([9]), date(2025, 1, 2), "#216e39")
        .unwrap();

    let habit = service.get_habit(id).unwrap().habit;
    assert_eq!(habit.description, "Swim laps");
    assert_eq!(habit.cadence, Cadence::Monthly);
    assert_eq!(habit.schedule, Schedule::monthly([9]));
    assert!(service.is_scheduled(id, date(2025, 1, 9)).unwrap());
    assert!(!service.is_scheduled(id, date(2025, 1, 8)).unwrap());
}
