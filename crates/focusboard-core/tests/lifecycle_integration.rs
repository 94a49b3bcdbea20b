//! Integration tests for the session lifecycle.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use focusboard_core::{
    Category, FocusStore, Session, SessionMetadata, Settings, TimerMode, TimerState,
};
use proptest::prelude::*;

fn local(d: u32, h: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(2026, 4, d, h, 0, 0)
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

fn stopwatch_store() -> FocusStore {
    let mut store = FocusStore::new();
    store
        .set_settings(Settings {
            timer_mode: TimerMode::Stopwatch,
            ..Settings::default()
        })
        .unwrap();
    store
}

proptest! {
    #[test]
    fn duration_equals_tick_count(ticks in 0u64..5_000) {
        let mut store = FocusStore::new();
        let start = local(6, 9);
        store.start(start);
        for _ in 0..ticks {
            store.tick();
        }
        let session = store.stop(SessionMetadata::default(), start).unwrap();
        prop_assert_eq!(session.duration, ticks);
    }

    #[test]
    fn manual_duration_never_negative(offset in -100_000i64..100_000) {
        let start = local(6, 12);
        let end = start + Duration::seconds(offset);
        let session = Session::manual(Category::Work, start, end, SessionMetadata::default()).unwrap();
        prop_assert_eq!(session.duration, offset.max(0) as u64);
    }

    #[test]
    fn rapid_start_stop_never_panics(ops in proptest::collection::vec(0u8..4, 0..200)) {
        let mut store = FocusStore::new();
        let now = local(6, 9);
        for op in ops {
            match op {
                0 => { store.start(now); }
                1 => { store.tick(); }
                2 => { store.pause(now); }
                _ => { store.stop(SessionMetadata::default(), now); }
            }
        }
        for s in store.sessions() {
            prop_assert!(s.end_time >= s.start_time);
        }
    }
}

#[test]
fn focus_session_from_preset() {
    let mut store = FocusStore::new();
    store.set_preset(Category::Focus, 1500);
    let start = local(6, 9);
    store.start(start);
    for _ in 0..1500 {
        store.tick();
    }
    let session = store
        .stop(SessionMetadata::default(), start + Duration::seconds(1500))
        .unwrap();
    assert_eq!(session.duration, 1500);
    assert_eq!(session.category, Category::Focus);
    assert_eq!(session.satisfaction, Some(3));
}

#[test]
fn countdown_keeps_ticks_past_the_preset() {
    let mut store = FocusStore::new();
    store.set_preset(Category::Focus, 60);
    let start = local(6, 9);
    store.start(start);
    let mut reached = 0;
    for _ in 0..100 {
        reached += store
            .tick()
            .iter()
            .filter(|e| e.name() == "target_reached")
            .count();
    }
    assert_eq!(reached, 1);
    let session = store
        .stop(SessionMetadata::default(), start + Duration::seconds(100))
        .unwrap();
    assert_eq!(session.duration, 100);
}

#[test]
fn category_switch_discards_uncommitted_time() {
    let mut store = FocusStore::new();
    store.set_preset(Category::Study, 1800);
    store.start(local(6, 9));
    for _ in 0..120 {
        store.tick();
    }
    store.set_category(Category::Study, local(6, 9));
    assert_eq!(store.timer().elapsed_secs(), 0);
    assert_eq!(store.timer().target_secs(), 1800);
    assert_eq!(store.timer().state(), TimerState::Idle);

    store.start(local(6, 10));
    store.tick();
    let session = store.stop(SessionMetadata::default(), local(6, 10)).unwrap();
    assert_eq!(session.duration, 1);
    assert_eq!(session.category, Category::Study);
}

#[test]
fn pause_excludes_time_from_duration() {
    let mut store = stopwatch_store();
    let start = local(6, 9);
    store.start(start);
    store.catch_up(start + Duration::seconds(600));
    store.pause(start + Duration::seconds(600));
    // An hour passes while paused.
    store.catch_up(start + Duration::seconds(4200));
    store.start(start + Duration::seconds(4200));
    store.catch_up(start + Duration::seconds(4500));
    let session = store
        .stop(SessionMetadata::default(), start + Duration::seconds(4500))
        .unwrap();
    assert_eq!(session.duration, 900);
    assert_eq!(session.end_time - session.start_time, Duration::seconds(4500));
}

#[test]
fn metadata_is_merged_with_defaults() {
    let mut store = FocusStore::new();
    store.start(local(6, 9));
    store.tick();
    let session = store
        .stop(
            SessionMetadata {
                name: Some("Chapter 3".into()),
                tags: vec!["reading".into()],
                ..Default::default()
            },
            local(6, 10),
        )
        .unwrap();
    assert_eq!(session.name.as_deref(), Some("Chapter 3"));
    assert_eq!(session.tags, vec!["reading"]);
    assert_eq!(session.satisfaction, Some(3));
    assert!(session.description.is_none());
}

#[test]
fn today_sessions_scenario() {
    let mut store = FocusStore::new();
    let make = |start: DateTime<Utc>| {
        Session::manual(
            Category::Focus,
            start,
            start + Duration::minutes(25),
            SessionMetadata::default(),
        )
        .unwrap()
    };
    let a = make(local(10, 8));
    let b = make(local(10, 8));
    let yesterday = make(local(9, 8));
    store.add_session(a.clone());
    store.add_session(b.clone());
    store.add_session(yesterday.clone());

    let today: Vec<&str> = store
        .today_sessions(local(10, 21))
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(today.len(), 2);
    assert!(today.contains(&a.id.as_str()));
    assert!(today.contains(&b.id.as_str()));
    assert!(!today.contains(&yesterday.id.as_str()));
}
