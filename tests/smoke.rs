// ABOUTME: End-to-end smoke test for the full novus persistence lifecycle.
// ABOUTME: Exercises every store against on-disk backends across a simulated restart.

use std::sync::Arc;

use novus_core::{HISTORY_LIMIT, Mood, NewJournalEntry, ProfilePatch, Quote, ThemeId};
use novus_store::testing::FaultyBackend;
use novus_store::{BackendKind, Lifecycle, StoreError, Stores, open_backend};

fn catalog() -> Vec<Quote> {
    (0..60)
        .map(|i| {
            Quote::new(
                &format!("q{i}"),
                &format!("Quote number {i}"),
                "Novus",
                if i % 2 == 0 { "Growth" } else { "Calm" },
            )
        })
        .collect()
}

async fn run_lifecycle(kind: BackendKind) {
    let dir = tempfile::TempDir::new().unwrap();
    let home = dir.path().to_path_buf();
    let quotes = catalog();

    // 1. First launch: everything starts from defaults
    let backend = open_backend(kind, &home).unwrap();
    let stores = Stores::open_ready(backend).await.unwrap();
    assert_eq!(stores.user.user().name, "Traveler");
    assert!(!stores.onboarding.is_completed());
    assert_eq!(stores.theme.current_theme_id(), ThemeId::Dark);

    // 2. Onboarding fills in the profile step by step
    stores
        .user
        .update_user(ProfilePatch::new().name("Robin").age("25-34"))
        .unwrap()
        .await
        .unwrap();
    stores
        .user
        .update_user(
            ProfilePatch::new()
                .wellness_focus(["anxiety", "sleep"])
                .mood_baseline(6),
        )
        .unwrap()
        .await
        .unwrap();
    stores.theme.set_theme_id("light").unwrap().await.unwrap();
    stores.onboarding.complete().await.unwrap();

    // 3. Daily use
    for quote in &quotes[..=HISTORY_LIMIT] {
        let _ = stores.history.add_to_history(quote.clone());
    }
    stores.history.add_to_history(quotes[10].clone()).await.unwrap();
    stores.favorites.toggle_favorite("q3").await.unwrap();
    stores.favorites.toggle_favorite("q5").await.unwrap();
    stores.favorites.toggle_favorite("q3").await.unwrap();
    let (kept, _) = stores
        .journal
        .add_entry(NewJournalEntry::new(Mood::Happy).topics(["family"]).note("Good day"));
    let (removed, _) = stores.journal.add_entry(NewJournalEntry::new(Mood::Tired));
    stores.journal.delete_entry(&removed.id).await.unwrap();
    stores.user.set_daily_focus("calm").await.unwrap();
    drop(stores);

    // 4. Restart and verify everything was reloaded
    let backend = open_backend(kind, &home).unwrap();
    let stores = Stores::open_ready(backend).await.unwrap();
    assert!(
        stores
            .lifecycles()
            .iter()
            .all(|(_, state)| *state == Lifecycle::Ready)
    );

    let profile = stores.user.user();
    assert_eq!(profile.name, "Robin");
    assert_eq!(profile.age, "25-34");
    assert_eq!(profile.mood_baseline, 6);
    assert_eq!(profile.focus_candidates(), vec!["calm"]);
    assert!(stores.onboarding.is_completed());
    assert_eq!(stores.theme.current_theme_id(), ThemeId::Light);

    let history = stores.history.history();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history.entries()[0].id, "q10");
    assert_eq!(history.entries()[1].id, format!("q{HISTORY_LIMIT}"));
    assert!(history.entries().iter().all(|q| q.id != "q0"));

    let favorites = stores.favorites.favorite_quotes(&quotes);
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, "q5");

    let journal = stores.journal.entries();
    assert_eq!(journal.len(), 1);
    assert_eq!(journal.entries()[0], kept);

    // 5. Account reset wipes the profile and onboarding state only
    stores.user.reset_user().await.unwrap();
    drop(stores);

    let backend = open_backend(kind, &home).unwrap();
    let stores = Stores::open_ready(backend).await.unwrap();
    assert_eq!(stores.user.user().name, "Traveler");
    assert!(!stores.onboarding.is_completed());
    assert!(stores.favorites.is_favorite("q5"));
}

#[tokio::test]
async fn smoke_test_sqlite_lifecycle() {
    run_lifecycle(BackendKind::Sqlite).await;
}

#[tokio::test]
async fn smoke_test_file_lifecycle() {
    run_lifecycle(BackendKind::File).await;
}

#[tokio::test]
async fn failed_writes_never_block_the_caller() {
    let backend = Arc::new(FaultyBackend::new());
    let stores = Stores::open_ready(backend.clone()).await.unwrap();
    backend.fail_writes(true);

    let handle = stores.favorites.toggle_favorite("q1");
    assert!(stores.favorites.is_favorite("q1"));
    assert!(matches!(handle.await, Err(StoreError::Backend(_))));

    let rejected = stores.theme.set_theme_id("not-a-real-theme");
    assert!(rejected.is_err());
    assert_eq!(stores.theme.current_theme_id(), ThemeId::Dark);

    // Once the backend recovers, the next write carries the current value
    backend.fail_writes(false);
    stores.favorites.toggle_favorite("q2").await.unwrap();
    assert_eq!(
        backend.peek("@favorites").await.as_deref(),
        Some(r#"["q1","q2"]"#)
    );
}
