//! Tests for the full tracker loop: reconcile, mutate through the store,
//! persist, reload

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{StorageKeys, TrackerConfig};
use crate::error::StorageError;
use crate::filter::KanjiFilter;
use crate::kanji::{default_kanjis, AddRequest, Kanji, KanjiStatus, KanjiType};
use crate::link::{share_link, LinkMode};
use crate::storage::{load_row_count, reconcile, save_kanjis, save_row_count, MemoryStore};
use crate::store::KanjiStore;

/// Reconcile against `storage` and wire a store that writes back into it
fn open(storage: &Rc<RefCell<MemoryStore>>, search: &str) -> KanjiStore {
    let keys = StorageKeys::default();
    let reconciled = reconcile(&mut *storage.borrow_mut(), &keys, search).unwrap();

    let sink = Rc::clone(storage);
    KanjiStore::new(
        reconciled.kanjis,
        reconciled.should_update,
        Box::new(move |kanjis: &[Kanji]| -> Result<(), StorageError> {
            save_kanjis(&mut *sink.borrow_mut(), &keys.kanjis, kanjis)
        }),
    )
}

#[test]
fn test_edits_survive_reload() {
    let storage = Rc::new(RefCell::new(MemoryStore::new()));

    let mut store = open(&storage, "");
    let first = store.kanjis()[0].kanji.clone();
    store.cycle_status(&first).unwrap();
    store.cycle_status(&first).unwrap();
    store
        .add_from_form(&AddRequest {
            kanjis: Some("烏 鴉".to_string()),
            lvl: Some("3".to_string()),
            kanji_type: Some("extra".to_string()),
            status: None,
        })
        .unwrap_err();
    store
        .add_from_form(&AddRequest {
            kanjis: Some("烏 鴉".to_string()),
            lvl: Some("3".to_string()),
            kanji_type: Some("extra".to_string()),
            status: Some("learning".to_string()),
        })
        .unwrap();
    drop(store);

    let reloaded = open(&storage, "");
    assert!(!reloaded.should_update());
    assert_eq!(reloaded.get(&first).map(|k| k.status), Some(KanjiStatus::Completed));
    assert_eq!(
        reloaded.get("鴉"),
        Some(&Kanji::new("鴉", 3, KanjiType::Extra, KanjiStatus::Learning))
    );
    assert_eq!(reloaded.len(), default_kanjis().len() + 2);
}

#[test]
fn test_share_then_import_in_fresh_tracker() {
    let sender = Rc::new(RefCell::new(MemoryStore::new()));
    let mut store = open(&sender, "");
    store.cycle_status("日").unwrap();
    store.add_kanji(Kanji::new("烏", 3, KanjiType::Extra, KanjiStatus::New)).unwrap();
    let link = share_link("https://kanji.example", store.kanjis(), &default_kanjis(), LinkMode::Merge).unwrap();
    let search = format!("?{}", url::Url::parse(&link).unwrap().query().unwrap());

    let receiver = Rc::new(RefCell::new(MemoryStore::new()));
    let imported = open(&receiver, &search);

    assert_eq!(imported.get("日").map(|k| k.status), Some(KanjiStatus::Learning));
    assert!(imported.get("烏").is_some());

    let visible: Vec<&str> = imported
        .filtered(&KanjiFilter::parse("lrn extra"))
        .iter()
        .map(|k| k.kanji.as_str())
        .collect();
    assert!(visible.contains(&"日"));
    assert!(visible.contains(&"烏"));
}

#[test]
fn test_reset_to_default_is_persisted() {
    let storage = Rc::new(RefCell::new(MemoryStore::new()));
    let mut store = open(&storage, "");
    store.remove_kanji("日").unwrap();
    assert!(store.get("日").is_none());

    store.reset_to_default().unwrap();
    drop(store);

    let reloaded = open(&storage, "");
    assert_eq!(reloaded.kanjis(), default_kanjis().as_slice());
}

#[test]
fn test_row_count_lives_beside_collection() {
    let storage = Rc::new(RefCell::new(MemoryStore::new()));
    let config = TrackerConfig::default();

    assert_eq!(load_row_count(&*storage.borrow(), &config).unwrap(), 10);
    assert_eq!(save_row_count(&mut *storage.borrow_mut(), &config, 0).unwrap(), 1);

    let _store = open(&storage, "");
    assert_eq!(load_row_count(&*storage.borrow(), &config).unwrap(), 1);
}
