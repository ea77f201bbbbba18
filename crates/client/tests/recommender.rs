//! Debounce and stale-response handling of the slot recommender.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use meetsync_client::inmemory::ScriptedRecommendations;
use meetsync_client::recommender::Preferences;
use meetsync_client::SlotRecommender;
use meetsync_core::recommend::{CalculationStatus, CandidateInterval, CandidateSet, MinuteOfDay};

fn t(s: &str) -> MinuteOfDay {
    s.parse().unwrap()
}

fn candidates(days: u32) -> CandidateSet {
    let intervals = (1..=days)
        .map(|d| {
            let date = NaiveDate::from_ymd_opt(2025, 12, 9 + d).unwrap();
            CandidateInterval::new(date, t("09:00"), t("17:00"))
                .unwrap()
                .with_participants(3, 3)
        })
        .collect();
    CandidateSet {
        appointment_name: Some("Team dinner".to_string()),
        total_participants: 3,
        status: CalculationStatus::Complete,
        intervals,
    }
}

fn prefs(duration: u16) -> Preferences {
    Preferences::new(duration, t("09:00"), t("18:00"))
}

#[tokio::test(start_paused = true)]
async fn test_rapid_changes_send_one_request() {
    let source = Arc::new(ScriptedRecommendations::new(candidates(2)));
    let recommender = SlotRecommender::new(Arc::clone(&source), "invite-1");

    for duration in [30, 45, 60] {
        recommender.update(prefs(duration)).await;
        tokio::time::advance(Duration::from_millis(100)).await;
    }
    recommender.wait_idle().await;

    assert_eq!(source.calls().await, vec![("invite-1".to_string(), 60)]);
    let slots = recommender.displayed().await;
    assert_eq!(slots.len(), 2);
    assert!(slots.iter().all(|slot| slot.duration_minutes == 60));
}

#[tokio::test(start_paused = true)]
async fn test_spaced_changes_each_send() {
    let source = Arc::new(ScriptedRecommendations::new(candidates(1)));
    let recommender = SlotRecommender::new(Arc::clone(&source), "invite-1");

    recommender.update(prefs(30)).await;
    recommender.wait_idle().await;
    recommender.update(prefs(90)).await;
    recommender.wait_idle().await;

    let durations: Vec<u16> = source.calls().await.into_iter().map(|(_, d)| d).collect();
    assert_eq!(durations, vec![30, 90]);
    assert_eq!(recommender.displayed().await[0].end, t("10:30"));
}

#[tokio::test(start_paused = true)]
async fn test_late_response_for_superseded_request_is_discarded() {
    let source = Arc::new(ScriptedRecommendations::new(candidates(1)));
    source.delay_for(30, Duration::from_secs(5)).await;
    source.respond_for(30, candidates(4)).await;
    let recommender = SlotRecommender::new(Arc::clone(&source), "invite-1");

    recommender.update(prefs(30)).await;
    // let the first request leave the debounce window
    tokio::time::sleep(Duration::from_millis(400)).await;
    recommender.update(prefs(60)).await;
    recommender.wait_idle().await;

    assert_eq!(source.calls().await.len(), 2);
    let snapshot = recommender.snapshot().await;
    assert!(!snapshot.loading);
    assert_eq!(snapshot.recommendation.slots.len(), 1);
    assert_eq!(snapshot.recommendation.slots[0].duration_minutes, 60);
}

#[tokio::test(start_paused = true)]
async fn test_display_limit_caps_without_reordering() {
    let source = Arc::new(ScriptedRecommendations::new(candidates(8)));
    let recommender = SlotRecommender::new(Arc::clone(&source), "invite-1");

    recommender.update(prefs(60)).await;
    recommender.wait_idle().await;

    let snapshot = recommender.snapshot().await;
    assert_eq!(snapshot.recommendation.slots.len(), 8);
    let shown = recommender.displayed().await;
    assert_eq!(shown.len(), 5);
    assert_eq!(shown[0].date, NaiveDate::from_ymd_opt(2025, 12, 10).unwrap());
    assert_eq!(shown[4].date, NaiveDate::from_ymd_opt(2025, 12, 14).unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_clearing_input_clears_result() {
    let source = Arc::new(ScriptedRecommendations::new(candidates(1)));
    let recommender = SlotRecommender::new(Arc::clone(&source), "invite-1");
    recommender.update(prefs(60)).await;
    recommender.wait_idle().await;
    assert!(!recommender.displayed().await.is_empty());

    recommender
        .update(Preferences {
            end: None,
            ..prefs(60)
        })
        .await;

    assert!(recommender.displayed().await.is_empty());
    assert!(recommender.snapshot().await.recommendation.message.is_none());
}
