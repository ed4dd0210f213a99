//! Tests for startup reconciliation across consecutive page loads

use crate::config::StorageKeys;
use crate::kanji::{default_kanjis, Kanji, KanjiStatus, KanjiType, DEFAULT_KANJI_VERSION};
use crate::link::{share_link, LinkMode};
use crate::storage::{load_kanjis, reconcile, save_kanjis, BaseSource, KeyValueStore, MemoryStore};

fn keys() -> StorageKeys {
    StorageKeys::default()
}

fn search_of(link: &str) -> String {
    let url = url::Url::parse(link).unwrap();
    format!("?{}", url.query().unwrap_or(""))
}

// ============================================================================
// Page-load sequences
// ============================================================================

#[test]
fn test_second_load_is_stable() {
    let mut store = MemoryStore::new();
    let first = reconcile(&mut store, &keys(), "").unwrap();
    let second = reconcile(&mut store, &keys(), "").unwrap();

    assert!(first.should_update);
    assert!(!second.should_update);
    assert_eq!(second.base, BaseSource::Stored);
    assert_eq!(first.kanjis, second.kanjis);
}

#[test]
fn test_corrupt_then_clean_load() {
    let mut store = MemoryStore::new().with_item("kanjis", "{\"kanji\": 3}");
    let first = reconcile(&mut store, &keys(), "").unwrap();
    assert!(first.warning.is_some());

    let second = reconcile(&mut store, &keys(), "").unwrap();
    assert!(second.warning.is_none());
    assert_eq!(second.base, BaseSource::Stored);
}

#[test]
fn test_custom_keys_are_respected() {
    let keys = StorageKeys {
        kanjis: "tracker:kanjis".to_string(),
        version: "tracker:version".to_string(),
        row_count: "tracker:rows".to_string(),
    };
    let mut store = MemoryStore::new();
    reconcile(&mut store, &keys, "").unwrap();

    assert!(store.get_item("kanjis").unwrap().is_none());
    assert!(load_kanjis(&store, "tracker:kanjis").unwrap().is_some());
    assert_eq!(
        store.get_item("tracker:version").unwrap().as_deref(),
        Some(DEFAULT_KANJI_VERSION)
    );
}

// ============================================================================
// Sharing between two trackers
// ============================================================================

#[test]
fn test_merge_link_carries_progress_to_another_tracker() {
    // Sender marks two defaults and adds one extra
    let mut sent = default_kanjis();
    sent[0].status = KanjiStatus::Completed;
    sent[1].status = KanjiStatus::Learning;
    sent.push(Kanji::new("烏", 3, KanjiType::Extra, KanjiStatus::Learning));
    let link = share_link("https://kanji.example", &sent, &default_kanjis(), LinkMode::Merge).unwrap();

    // Receiver has its own edit on the first default's level
    let mut mine = default_kanjis();
    mine[0].lvl = 9;
    let mut store = MemoryStore::new().with_item("default_kanji_version", DEFAULT_KANJI_VERSION);
    save_kanjis(&mut store, "kanjis", &mine).unwrap();

    let out = reconcile(&mut store, &keys(), &search_of(&link)).unwrap();

    assert_eq!(out.mode, Some(LinkMode::Merge));
    assert_eq!(out.imported, 3);
    assert_eq!(out.kanjis[0].lvl, 9);
    assert_eq!(out.kanjis[0].status, KanjiStatus::Completed);
    assert_eq!(out.kanjis[1].status, KanjiStatus::Learning);
    assert_eq!(out.kanjis.last(), Some(&Kanji::new("烏", 3, KanjiType::Extra, KanjiStatus::Learning)));
    assert_eq!(out.kanjis.len(), default_kanjis().len() + 1);
}

#[test]
fn test_reset_link_replaces_receiver_state() {
    let mut sent = default_kanjis();
    sent[2].status = KanjiStatus::Completed;
    let link = share_link("https://kanji.example", &sent, &default_kanjis(), LinkMode::Reset).unwrap();

    let mine = vec![Kanji::new("鴉", 4, KanjiType::Extra, KanjiStatus::Completed)];
    let mut store = MemoryStore::new();
    save_kanjis(&mut store, "kanjis", &mine).unwrap();

    let out = reconcile(&mut store, &keys(), &search_of(&link)).unwrap();

    assert_eq!(out.base, BaseSource::Reset);
    assert_eq!(out.kanjis, sent);
    assert_eq!(load_kanjis(&store, "kanjis").unwrap(), Some(sent));
}

#[test]
fn test_garbled_link_falls_back_to_stored() {
    let mine = vec![Kanji::new("日", 1, KanjiType::Base, KanjiStatus::Learning)];
    let mut store = MemoryStore::new();
    save_kanjis(&mut store, "kanjis", &mine).unwrap();

    let out = reconcile(&mut store, &keys(), "?n=%E6%97%A5%ZZ&c=(,1)&l=[月,0]&t=m").unwrap();

    assert_eq!(out.imported, 0);
    assert_eq!(out.kanjis, mine);
}
