/// Data written through one server survives reopening the database
use habit_streaks::*;

use super::{date, service_at};

#[test]
fn test_habits_survive_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("habits.db");

    let id = {
        let (service, _) = service_at(&path, date(2025, 1, 3));
        let id = service
            .create_habit("Meditate", Cadence::Weekly, Schedule::weekly([0, 6]), date(2025, 1, 1), "#40c463")
            .unwrap();
        service.mark_done_on(id, date(2025, 1, 2)).unwrap();
        service.mark_done_today(id).unwrap();
        id
    };

    let (service, _) = service_at(&path, date(2025, 1, 3));
    let summary = service.get_habit(id).unwrap();
    assert_eq!(summary.habit.description, "Meditate");
    assert_eq!(summary.habit.schedule, Schedule::weekly([0, 6]));
    assert!(summary.completed_today);

    let days = service.get_contribution(id, date(2025, 1, 1), date(2025, 1, 3)).unwrap();
    assert_eq!(days.iter().map(|d| d.completed).collect::<Vec<_>>(), vec![false, true, true]);
}

#[tokio::test]
async fn test_server_opens_fresh_database() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("server.db");

    let server = HabitStreakServer::new(path.clone())
        .await
        .expect("Failed to create server");
    assert!(server.service().list_habits().unwrap().is_empty());
    assert!(path.exists());

    // A second server on the same file sees the same schema version
    let again = HabitStreakServer::new(path).await.expect("Failed to reopen server");
    assert!(again.service().list_habits().unwrap().is_empty());
}
