//! Integration tests for ViewCoordinator driven by the form controller, using
//! the in-memory store in place of the endpoint.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use form::{EntryMode, Field, FormController, FormValues};
use storage::{AppendBehavior, InMemoryStore, MatchStore, StorageError};
use tokio::sync::Notify;
use tracker::{
    LogNotifier, Notification, NotificationKind, Notifier, SubmitOutcome, ViewCoordinator,
};
use types::{Format, GameScore, MatchRecord, Recorded};

#[derive(Default)]
struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn seen(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// Holds every append until the gate is opened.
#[derive(Default)]
struct GatedStore {
    inner: InMemoryStore,
    gate: Notify,
}

#[async_trait]
impl MatchStore for GatedStore {
    async fn fetch_all(&self) -> Vec<MatchRecord> {
        self.inner.fetch_all().await
    }

    async fn append(&self, record: &MatchRecord) -> Result<bool, StorageError> {
        self.gate.notified().await;
        self.inner.append(record).await
    }
}

fn record(player: &str, opponent: &str, player_deck: &str, opponent_deck: &str) -> MatchRecord {
    MatchRecord {
        id: None,
        player: player.to_string(),
        opponent: opponent.to_string(),
        format: Format::Modern.into(),
        player_deck: player_deck.to_string(),
        opponent_deck: opponent_deck.to_string(),
        games: GameScore::new(2, 1).into(),
        play_draw: None,
        sideboard_status: None,
        date: None,
    }
}

fn coordinator_with(
    records: Vec<MatchRecord>,
) -> ViewCoordinator<InMemoryStore, RecordingNotifier> {
    ViewCoordinator::new(
        InMemoryStore::with_records(records),
        RecordingNotifier::default(),
    )
}

fn fill_scenario(form: &mut FormController) {
    form.set(Field::Player, "Ann");
    form.set(Field::Opponent, "Bo");
    form.set(Field::Format, "Modern");
    form.set(Field::PlayerDeck, "Burn");
    form.set(Field::OpponentDeck, "Control");
    form.set(Field::Wins, "2");
    form.set(Field::Losses, "1");
}

#[tokio::test]
async fn test_load_derives_pools() {
    let coordinator = coordinator_with(vec![
        record("Ann", "Bo", "Burn", "Control"),
        record("Cy", "Ann", "Affinity", "Burn"),
    ]);

    assert_eq!(coordinator.load().await, 2);
    assert_eq!(coordinator.name_pool().await, vec!["Ann", "Bo", "Cy"]);
    assert_eq!(
        coordinator.deck_pool().await,
        vec!["Affinity", "Burn", "Control"]
    );
}

#[tokio::test]
async fn test_pools_include_rows_with_unrecognized_cells() {
    let mut unknown_format = record("Eve", "Ann", "Tokens", "Burn");
    unknown_format.format = Recorded::Unrecognized("Oathbreaker".to_string());
    let mut date_score = record("Cy", "Dee", "Storm", "Delver");
    date_score.games = Recorded::Unrecognized("2024-02-01T08:00:00.000Z".to_string());
    let coordinator = ViewCoordinator::new(
        InMemoryStore::with_records(vec![
            record("Ann", "Bo", "Burn", "Control"),
            date_score,
            unknown_format,
        ]),
        LogNotifier,
    );

    assert_eq!(coordinator.load().await, 3);
    assert_eq!(
        coordinator.name_pool().await,
        vec!["Ann", "Bo", "Cy", "Dee", "Eve"]
    );
    assert_eq!(
        coordinator.deck_pool().await,
        vec!["Burn", "Control", "Delver", "Storm", "Tokens"]
    );
    assert_eq!(
        coordinator.submit(record("Ann", "Eve", "Burn", "Tokens")).await,
        SubmitOutcome::Saved
    );
    assert_eq!(coordinator.records().await.len(), 4);
}

#[tokio::test]
async fn test_empty_store_gives_empty_pools() {
    let coordinator = coordinator_with(Vec::new());
    assert_eq!(coordinator.load().await, 0);
    assert!(coordinator.records().await.is_empty());
    assert!(coordinator.name_pool().await.is_empty());
    assert!(coordinator.deck_pool().await.is_empty());
}

#[tokio::test]
async fn test_saved_submission_reloads_exactly_once() {
    let coordinator = coordinator_with(vec![record("Ann", "Bo", "Burn", "Control")]);
    coordinator.load().await;
    let fetches_before = coordinator.store().fetch_count();

    let outcome = coordinator.submit(record("Dee", "Ann", "Tron", "Burn")).await;

    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(coordinator.store().fetch_count(), fetches_before + 1);
    assert!(!coordinator.is_busy());
    assert_eq!(coordinator.name_pool().await, vec!["Ann", "Bo", "Dee"]);
    assert_eq!(coordinator.deck_pool().await, vec!["Burn", "Control", "Tron"]);

    // identity comes from the store, not from the submitted record
    let ids: Vec<_> = coordinator
        .records()
        .await
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![Some("1".to_string()), Some("2".to_string())]);

    assert_eq!(
        coordinator.notifier().seen(),
        vec![Notification::success("Match result saved successfully!")]
    );
}

#[tokio::test]
async fn test_rejected_submission_leaves_records_untouched() {
    let coordinator = coordinator_with(vec![record("Ann", "Bo", "Burn", "Control")]);
    coordinator.load().await;
    let before = coordinator.records().await;
    let store = coordinator.store();
    store.set_append_behavior(AppendBehavior::Reject);

    let outcome = coordinator.submit(record("Dee", "Ann", "Tron", "Burn")).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(coordinator.records().await, before);
    assert_eq!(store.fetch_count(), 1);
    assert!(!coordinator.is_busy());
    assert_eq!(
        coordinator.notifier().seen(),
        vec![Notification::error(
            "Failed to save match result - check console for details"
        )]
    );
}

#[tokio::test]
async fn test_failed_submission_reports_reason() {
    let coordinator = coordinator_with(Vec::new());
    coordinator.load().await;
    let store = coordinator.store();
    store.set_append_behavior(AppendBehavior::Fail("quota exceeded".to_string()));

    let outcome = coordinator.submit(record("Ann", "Bo", "Burn", "Control")).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert!(coordinator.records().await.is_empty());
    assert!(!coordinator.is_busy());
    let seen = coordinator.notifier().seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].kind, NotificationKind::Error);
    assert_eq!(
        seen[0].message,
        "Failed to save: Endpoint rejected the request: quota exceeded"
    );
}

#[tokio::test]
async fn test_second_submission_while_busy_is_refused() {
    let coordinator = ViewCoordinator::new(GatedStore::default(), RecordingNotifier::default());

    let (first, second, ()) = tokio::join!(
        coordinator.submit(record("Ann", "Bo", "Burn", "Control")),
        coordinator.submit(record("Cy", "Dee", "Tron", "Elves")),
        async {
            assert!(coordinator.is_busy());
            coordinator.store().gate.notify_one();
        }
    );

    assert_eq!(first, SubmitOutcome::Saved);
    assert_eq!(second, SubmitOutcome::Busy);
    assert!(!coordinator.is_busy());
    assert_eq!(coordinator.store().inner.append_count(), 1);
    assert_eq!(coordinator.name_pool().await, vec!["Ann", "Bo"]);
}

#[tokio::test]
async fn test_form_submission_end_to_end() {
    let coordinator = coordinator_with(Vec::new());
    coordinator.load().await;
    let mut form = FormController::new();
    fill_scenario(&mut form);

    let today = Utc::now().date_naive();
    let outcome = form
        .submit(|record| coordinator.submit(record))
        .await
        .expect("Scenario input is valid");

    assert_eq!(outcome, SubmitOutcome::Saved);
    let stored = coordinator.store().stored();
    assert_eq!(stored.len(), 1);
    let saved = &stored[0];
    assert_eq!(saved.player, "Ann");
    assert_eq!(saved.opponent, "Bo");
    assert_eq!(saved.format, Recorded::Known(Format::Modern));
    assert_eq!(saved.games.to_string(), "2-1");
    assert_eq!(saved.play_draw, None);
    assert_eq!(saved.sideboard_status, None);
    let date = saved.date.expect("Submitted records are dated");
    assert!(date >= today && date <= Utc::now().date_naive());

    assert_eq!(form.values(), &FormValues::default());
    assert_eq!(coordinator.name_pool().await, vec!["Ann", "Bo"]);
}

#[tokio::test]
async fn test_failed_form_submission_still_resets_form() {
    let coordinator = coordinator_with(vec![record("Ann", "Bo", "Burn", "Control")]);
    coordinator.load().await;
    let store = coordinator.store();
    store.set_append_behavior(AppendBehavior::Reject);
    let names = coordinator.name_pool().await;

    let mut form = FormController::new();
    fill_scenario(&mut form);
    form.enter_manually(Field::Player);
    form.set(Field::Player, "Newcomer");

    let outcome = form
        .submit(|record| coordinator.submit(record))
        .await
        .expect("Input is valid");

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form.value(Field::Player), "");
    assert_eq!(form.value(Field::Wins), "0");
    assert_eq!(form.entry_mode(Field::Player, &names), EntryMode::Choose);
    assert_eq!(coordinator.name_pool().await, vec!["Ann", "Bo"]);
}

#[tokio::test]
async fn test_invalid_form_never_reaches_storage() {
    let coordinator = coordinator_with(Vec::new());
    let mut form = FormController::new();
    form.set(Field::Player, "Ann");

    let errors = form
        .submit(|record| coordinator.submit(record))
        .await
        .unwrap_err();

    assert!(!errors.is_empty());
    assert_eq!(coordinator.store().append_count(), 0);
    assert!(coordinator.notifier().seen().is_empty());
}
