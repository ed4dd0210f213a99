//! WASM bindings
//!
//! `KanjiTracker` is the view's handle on the tracker. Constructing it runs
//! startup reconciliation against `window.localStorage` and the current
//! location; every mutation afterwards writes back to local storage.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::TrackerConfig;
use crate::console::{console_error, console_log, console_warn};
use crate::error::TrackerError;
use crate::filter::KanjiFilter;
use crate::kanji::{catalog_summary, default_kanjis, log_catalog_summary, AddRequest, Kanji, KanjiPatch, DEFAULT_KANJI_VERSION};
use crate::link::{decode_query, share_link, LinkMode};
use crate::storage::{load_row_count, reconcile, save_kanjis, save_row_count, BrowserStore, KeyValueStore};
use crate::store::KanjiStore;

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))
}

// =============================================================================
// KanjiTracker
// =============================================================================

#[wasm_bindgen]
pub struct KanjiTracker {
    store: KanjiStore,
    storage: Rc<RefCell<BrowserStore>>,
    config: TrackerConfig,
    mode: Option<LinkMode>,
    row_count: u32,
}

#[wasm_bindgen]
impl KanjiTracker {
    /// Reconcile stored state with the default catalog and any link in
    /// `location.search`. `config` is an optional partial `TrackerConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<KanjiTracker, JsValue> {
        let config: TrackerConfig = if config.is_undefined() || config.is_null() {
            TrackerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };

        let start = js_sys::Date::now();
        let window = window()?;
        let location = window.location();
        let search = location.search()?;

        let storage = Rc::new(RefCell::new(BrowserStore::local()?));
        let reconciled = reconcile(&mut *storage.borrow_mut(), &config.storage_keys, &search)?;

        if !reconciled.keep_query {
            window.history()?.replace_state_with_url(&JsValue::from_str(""), "", Some("/#"))?;
        }
        if let Some(warning) = &reconciled.warning {
            window.alert_with_message(warning)?;
        }

        let row_count = load_row_count(&*storage.borrow(), &config)?;

        let sink = Rc::clone(&storage);
        let key = config.storage_keys.kanjis.clone();
        let store = KanjiStore::new(
            reconciled.kanjis,
            reconciled.should_update,
            Box::new(move |kanjis: &[Kanji]| save_kanjis(&mut *sink.borrow_mut(), &key, kanjis)),
        );

        console_log!(
            "[KanjiTracker] Ready with {} kanji in {:.1}ms",
            store.len(),
            js_sys::Date::now() - start
        );

        Ok(KanjiTracker {
            store,
            storage,
            config,
            mode: reconciled.mode,
            row_count,
        })
    }

    /// The live collection as `{ kanji, lvl, type, status }[]`
    #[wasm_bindgen(js_name = kanjis)]
    pub fn js_kanjis(&self) -> Result<JsValue, JsValue> {
        to_js(self.store.kanjis())
    }

    /// Characters of the records matching a filter string, for grid cells
    #[wasm_bindgen(js_name = visibleCharacters)]
    pub fn visible_characters(&self, filter: &str) -> js_sys::Array {
        let filter = KanjiFilter::parse(filter);
        self.store
            .filtered(&filter)
            .into_iter()
            .map(|k| JsValue::from_str(&k.kanji))
            .collect()
    }

    /// Records matching a filter string (`森`, `lvl1 base cpl`, ...)
    #[wasm_bindgen(js_name = filterKanjis)]
    pub fn filter_kanjis(&self, filter: &str) -> Result<JsValue, JsValue> {
        let filter = KanjiFilter::parse(filter);
        to_js(&self.store.filtered(&filter))
    }

    #[wasm_bindgen(getter, js_name = shouldUpdate)]
    pub fn should_update(&self) -> bool {
        self.store.should_update()
    }

    #[wasm_bindgen(js_name = setShouldUpdate)]
    pub fn set_should_update(&mut self, should_update: bool) {
        self.store.set_should_update(should_update);
    }

    /// Import mode of the link this session was opened with, if any
    #[wasm_bindgen(getter, js_name = importMode)]
    pub fn import_mode(&self) -> Option<String> {
        self.mode.map(|m| m.to_string())
    }

    /// Primary activation: advance status, returns the new status
    #[wasm_bindgen(js_name = cycleStatus)]
    pub fn cycle_status(&mut self, kanji: &str) -> Result<Option<String>, JsValue> {
        Ok(self.store.cycle_status(kanji)?.map(|s| s.to_string()))
    }

    /// Partial update with `{ lvl?, type?, status? }`
    #[wasm_bindgen(js_name = updateKanji)]
    pub fn update_kanji(&mut self, kanji: &str, patch: JsValue) -> Result<bool, JsValue> {
        let patch: KanjiPatch = serde_wasm_bindgen::from_value(patch)
            .map_err(|e| TrackerError::InvalidArgument(format!("patch: {}", e)))?;
        Ok(self.store.update_kanji(kanji, &patch)?)
    }

    /// Add-form submission `{ kanjis, lvl, type, status }`; returns how many
    /// records were added
    #[wasm_bindgen(js_name = addKanjis)]
    pub fn add_kanjis(&mut self, form: JsValue) -> Result<usize, JsValue> {
        let request: AddRequest = serde_wasm_bindgen::from_value(form)
            .map_err(|e| TrackerError::InvalidArgument(format!("form: {}", e)))?;
        Ok(self.store.add_from_form(&request)?)
    }

    /// Secondary activation: delete the record
    #[wasm_bindgen(js_name = removeKanji)]
    pub fn remove_kanji(&mut self, kanji: &str) -> Result<bool, JsValue> {
        Ok(self.store.remove_kanji(kanji)?)
    }

    #[wasm_bindgen(js_name = resetToDefault)]
    pub fn reset_to_default(&mut self) -> Result<(), JsValue> {
        Ok(self.store.reset_to_default()?)
    }

    /// Share link on the page's origin. `mode` is `add`, `reset`, `merge` or
    /// `preview`; defaults to the configured share mode.
    #[wasm_bindgen(js_name = shareLink)]
    pub fn share_link(&self, mode: Option<String>) -> Result<String, JsValue> {
        let mode = match mode.as_deref() {
            None => self.config.share_mode,
            Some(raw) => LinkMode::parse(raw)
                .ok_or_else(|| TrackerError::InvalidArgument(format!("unknown link mode '{}'", raw)))?,
        };
        let origin = window()?.location().origin()?;
        let link = share_link(&origin, self.store.kanjis(), &default_kanjis(), mode).map_err(TrackerError::from)?;
        Ok(link)
    }

    #[wasm_bindgen(getter, js_name = rowCount)]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    #[wasm_bindgen(js_name = setRowCount)]
    pub fn set_row_count(&mut self, count: u32) -> Result<u32, JsValue> {
        let written = save_row_count(&mut *self.storage.borrow_mut(), &self.config, count)?;
        self.row_count = written;
        Ok(written)
    }

    #[wasm_bindgen(js_name = incrementRowCount)]
    pub fn increment_row_count(&mut self) -> Result<u32, JsValue> {
        self.set_row_count(self.row_count.saturating_add(1))
    }

    #[wasm_bindgen(js_name = decrementRowCount)]
    pub fn decrement_row_count(&mut self) -> Result<u32, JsValue> {
        self.set_row_count(self.row_count.saturating_sub(1))
    }

    /// How long notifications should stay up, in ms
    #[wasm_bindgen(getter, js_name = popupMs)]
    pub fn popup_ms(&self) -> u32 {
        self.config.popup_ms
    }

    /// Drop everything this tracker stored
    #[wasm_bindgen(js_name = clearStorage)]
    pub fn clear_storage(&mut self) -> Result<(), JsValue> {
        let keys = &self.config.storage_keys;
        let mut storage = self.storage.borrow_mut();
        for key in [&keys.kanjis, &keys.version, &keys.row_count] {
            if let Err(e) = storage.remove_item(key) {
                console_error!("[KanjiTracker] Failed to clear '{}': {}", key, e);
                return Err(e.into());
            }
        }
        Ok(())
    }
}

// =============================================================================
// Free functions
// =============================================================================

/// The default catalog as `{ kanji, lvl, type, status }[]`
#[wasm_bindgen(js_name = defaultKanjis)]
pub fn js_default_kanjis() -> Result<JsValue, JsValue> {
    to_js(&default_kanjis())
}

#[wasm_bindgen(js_name = defaultKanjiVersion)]
pub fn default_kanji_version() -> String {
    DEFAULT_KANJI_VERSION.to_string()
}

/// The default catalog grouped as `{ lvl, type, count, kanjis }[]`
#[wasm_bindgen(js_name = catalogSummary)]
pub fn js_catalog_summary() -> Result<JsValue, JsValue> {
    to_js(&catalog_summary())
}

/// Log the default catalog grouped by level and type
#[wasm_bindgen(js_name = logCatalogSummary)]
pub fn js_log_catalog_summary() {
    log_catalog_summary();
}

/// Encode arbitrary records into a share link rooted at `origin`
#[wasm_bindgen(js_name = encodeShareLink)]
pub fn encode_share_link(origin: &str, kanjis: JsValue, mode: &str) -> Result<String, JsValue> {
    let kanjis: Vec<Kanji> = serde_wasm_bindgen::from_value(kanjis)
        .map_err(|e| TrackerError::InvalidArgument(format!("kanjis: {}", e)))?;
    let mode = LinkMode::parse(mode).unwrap_or_else(|| {
        console_warn!("[LinkCodec] Unknown mode '{}', using merge", mode);
        LinkMode::Merge
    });
    Ok(share_link(origin, &kanjis, &default_kanjis(), mode).map_err(TrackerError::from)?)
}

/// Decode the records carried by a location search string
#[wasm_bindgen(js_name = decodeShareQuery)]
pub fn decode_share_query(search: &str) -> Result<JsValue, JsValue> {
    to_js(&decode_query(search))
}
