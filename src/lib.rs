//! KanjiCore: Kanji Progress Tracker Core
//!
//! A Rust/WASM implementation of the kanji tracker's state layer.
//!
//! # Architecture
//!
//! ## Record Components
//! - `kanji/mod.rs` - Kanji record, status/type enums, partial updates
//! - `kanji/catalog.rs` - Default catalog builder (versioned starter set)
//! - `kanji/merge.rs` - Dedup/merge engine with override policies
//! - `kanji/form.rs` - Add-form validation
//!
//! ## Link Components
//! - `link/grammar.rs` - `(漢字,1)[失態,4]` bucket grammar
//! - `link/mode.rs` - Import mode flag (`t=a|r|m|p`)
//! - `link/mod.rs` - Share-link encoder and query decoder
//!
//! ## State Components
//! - `storage/` - Key-value store seam, version marker, startup reconciliation
//! - `store.rs` - KanjiStore: live collection with injected persistence
//! - `filter.rs` - Filter-string matching for the grid
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { KanjiTracker } from 'kanjicore';
//!
//! await init();
//!
//! // Reconciles localStorage, defaults and any link in location.search
//! const tracker = new KanjiTracker();
//!
//! tracker.cycleStatus('日');               // new -> learning
//! tracker.addKanjis({ kanjis: '烏', lvl: '3', type: 'extra', status: 'new' });
//!
//! const visible = tracker.filterKanjis('lvl2 extra');
//! const link = tracker.shareLink('merge');
//! ```

mod console;

pub mod config;
pub mod error;
pub mod filter;
pub mod kanji;
pub mod link;
pub mod storage;
pub mod store;
pub mod wasm;

// Public exports
pub use config::*;
pub use error::*;
pub use filter::*;
pub use kanji::*;
pub use link::*;
pub use storage::*;
pub use store::*;
pub use wasm::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("kanjicore v{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests;
