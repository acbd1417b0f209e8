//! Controller integration tests: the side-effect chain and progression.

use chrono::Utc;
use skyjo_ledger::controller::{EngineEvent, EngineSnapshot, SessionController};
use skyjo_ledger::core::{score_map, EngineConfig, PlayerId, XpTable};
use skyjo_ledger::history::{GameHistoryEntry, GameType, HistoryPlayer};
use skyjo_ledger::progression::AchievementId;
use skyjo_ledger::session::SessionStatus;

fn started(config: EngineConfig) -> (SessionController, PlayerId, PlayerId) {
    let mut controller = SessionController::with_seed(config, 99);
    let me = controller.add_player("Me", "😎").unwrap();
    let rival = controller.add_player("Rival", "🤖").unwrap();
    controller.set_threshold(20).unwrap();
    controller.start_game().unwrap();
    controller.drain_events();
    (controller, me, rival)
}

fn play_quick_win(controller: &mut SessionController, me: PlayerId, rival: PlayerId) {
    controller.add_round(score_map([(me, 2), (rival, 21)]), me).unwrap();
}

/// A reader that sees FINISHED also sees history and progression.
#[test]
fn test_finish_is_atomic() {
    let (mut controller, me, rival) = started(EngineConfig::new().with_profile("Me"));

    let snapshot = controller.add_round(score_map([(me, 2), (rival, 21)]), me).unwrap();

    assert_eq!(snapshot.status, SessionStatus::Finished);
    let entry = controller.history().latest().unwrap();
    assert_eq!(entry.winner().unwrap().name, "Me");
    assert_eq!(controller.progression().current_xp(), 5);
    assert!(controller.progression().is_unlocked(&AchievementId::new("first_game")));
}

/// Events arrive in chain order.
#[test]
fn test_event_order() {
    let config = EngineConfig::new().with_xp_table(XpTable::flat(25));
    let (mut controller, me, rival) = started(config);
    play_quick_win(&mut controller, me, rival);

    let events = controller.drain_events();
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e {
            EngineEvent::RoundCommitted { .. } => "round",
            EngineEvent::GameFinished { .. } => "finished",
            EngineEvent::LevelUp { .. } => "level",
            EngineEvent::AchievementUnlocked { .. } => "achievement",
            _ => "other",
        })
        .collect();

    assert_eq!(&kinds[..3], &["round", "finished", "level"]);
    assert!(kinds[3..].iter().all(|k| *k == "achievement"));
    assert_eq!(events[2], EngineEvent::LevelUp { previous: 1, level: 3 });
    assert!(events[2].is_celebration());
}

/// Achievements fire once across games.
#[test]
fn test_achievements_fire_once() {
    let (mut controller, me, rival) = started(EngineConfig::new());
    play_quick_win(&mut controller, me, rival);
    let first: Vec<_> = controller
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, EngineEvent::AchievementUnlocked { .. }))
        .collect();
    assert!(first.contains(&EngineEvent::AchievementUnlocked { id: AchievementId::new("first_game") }));

    controller.reset_game();
    let me = controller.add_player("Me", "").unwrap();
    let rival = controller.add_player("Rival", "").unwrap();
    controller.start_game().unwrap();
    controller.add_round(score_map([(me, 2), (rival, 120)]), me).unwrap();

    let again: Vec<_> = controller
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, EngineEvent::AchievementUnlocked { id } if id.as_str() == "first_game"))
        .collect();
    assert!(again.is_empty());

    let unlocked = controller.progression().achievements();
    let count = unlocked.iter().filter(|id| id.as_str() == "first_game").count();
    assert_eq!(count, 1);
}

/// Level-up stays pending until acknowledged.
#[test]
fn test_level_up_acknowledgement() {
    let (mut controller, me, rival) = started(EngineConfig::new().with_xp_table(XpTable::flat(10)));
    assert!(!controller.has_pending_level_up());

    play_quick_win(&mut controller, me, rival);
    assert!(controller.has_pending_level_up());
    assert_eq!(controller.progression().level(), 2);

    controller.acknowledge_level_up();
    assert!(!controller.has_pending_level_up());
    assert_eq!(controller.progression().last_acknowledged_level(), 2);
}

/// Games recorded from outside still drive progression and stats.
#[test]
fn test_record_external_game() {
    let mut controller = SessionController::with_seed(EngineConfig::new().with_profile("Me"), 5);
    let entry = GameHistoryEntry::new("online-1", Utc::now(), GameType::Online)
        .with_player(HistoryPlayer::new("Rival", 40))
        .with_player(HistoryPlayer::new("Me", 60))
        .with_rounds_played(6);

    let report = controller.record_external_game(entry);
    assert_eq!(report.xp_awarded, 3);

    let stats = controller.stats();
    assert_eq!(stats.total_games, 1);
    assert_eq!(stats.player("Rival").unwrap().wins, 1);
}

/// Import through the controller reports and merges.
#[test]
fn test_import_export_through_controller() {
    let (mut controller, me, rival) = started(EngineConfig::new());
    play_quick_win(&mut controller, me, rival);
    let payload = controller.export_history().unwrap();

    let mut other = SessionController::with_seed(EngineConfig::new(), 1);
    let summary = other.import_history(&payload).unwrap();
    assert_eq!(summary.added, 1);
    assert_eq!(other.drain_events(), vec![EngineEvent::HistoryImported { added: 1 }]);

    assert_eq!(other.import_history(&payload).unwrap().added, 0);
    assert!(other.import_history("{}").is_err());
    assert_eq!(other.history().len(), 1);
}

/// Storage round trip mid-game.
#[test]
fn test_snapshot_bytes_round_trip() {
    let (mut controller, me, rival) = started(EngineConfig::new());
    controller.add_round(score_map([(me, 4), (rival, 6)]), rival).unwrap();

    let bytes = controller.to_snapshot().to_bytes().unwrap();
    let snapshot = EngineSnapshot::from_bytes(&bytes).unwrap();
    let mut restored = SessionController::from_snapshot(EngineConfig::new(), snapshot);

    assert_eq!(restored.snapshot(), controller.snapshot());

    restored.add_round(score_map([(me, 20), (rival, 0)]), rival).unwrap();
    assert_eq!(restored.snapshot().status, SessionStatus::Finished);
    assert_eq!(restored.history().len(), 1);

    // Finished game with detailed history and unlocked achievements
    let bytes = restored.to_snapshot().to_bytes().unwrap();
    let mut again = SessionController::from_snapshot(EngineConfig::new(), EngineSnapshot::from_bytes(&bytes).unwrap());

    assert_eq!(again.history(), restored.history());
    assert_eq!(again.progression(), restored.progression());
    assert_eq!(again.stats(), restored.stats());
    let entry = again.history().latest().unwrap();
    assert_eq!(entry.rounds.as_ref().map(|r| r.len()), Some(2));
    assert_eq!(entry.winner().unwrap().name, "Rival");

    // The restored controller still knows which entry belongs to this game
    again.undo_last_round().unwrap();
    assert!(again.history().is_empty());
}

/// A corrupt snapshot is an error, not a panic.
#[test]
fn test_snapshot_corrupt_bytes() {
    assert!(EngineSnapshot::from_bytes(&[1, 2, 3]).is_err());
}
