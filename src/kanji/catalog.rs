//! Default Catalog Builder
//!
//! The built-in, versioned starter set. Each source text is tagged with a
//! level and type; every distinct non-whitespace grapheme in it becomes a
//! `new` record. Sources are concatenated in table order and deduplicated
//! with `NoOverride`, so a character listed twice keeps its first
//! (earlier, base) classification.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

use super::{remove_duplicates, Kanji, KanjiStatus, KanjiType, OverridePolicy};
use crate::console::console_log;

/// Version of the catalog below; bump whenever the source texts change
pub const DEFAULT_KANJI_VERSION: &str = "1.0.0";

const L1_KANJIS: &str = "
日月木山川田人口車門
火水金土子女学先生私
一二三四五六七八九十百千万円年
上下中大小本半分力何
明休体好男林森間畑岩
目耳手足雨竹米貝石糸
花茶肉文字物牛馬鳥魚
新古長短高安低暗多少
行来帰食飲見聞読書話買教
朝昼夜晩夕方午前後毎週曜
作泳油海酒待校時言計語飯
宅客室家英薬会今雪雲電売
広店度病疲痛屋国回困開閉
近遠速遅道青晴静寺持荷歌
友父母兄弟姉妹夫妻彼主奥
元気有名親切便利不若早忙
出入乗降着渡通走歩止動働
右左東南北西外内部駅社院
地鉄工場図館公園住所番号
市町村区都府県島京様
練習勉強研究留質問題答宿
政治経済歴史育化理数科医
";

const L2_KANJIS: &str = "
映画写真音楽料組思色白黒赤
起寝遊立座使始終貸借返送
結婚離欠席予定洋式和活
春夏秋冬暑熱寒冷暖温涼天
仕事運転者記議員商業農
良悪正違同適当難次形味
試験面接説果合格受落残念
指折払投打深洗流消決
旅約案準備相談連絡泊特急
線発到交機関局信路故注意
押引割営自由取求願知
台窓具器用服紙辞雑誌
銀資品個価産期々報告
感心情悲泣笑頭覚忘考
伝代呼焼曲脱別集並喜驚
細太重軽狭弱眠苦簡単
空港飛階建設完成費放
位置横向原平野風両橋
老族配術退効民訪顔歯
卒論実調必要類得失礼
増加減変移続過進以美
比反対賛共直表現初
全最無非第的性法律制課
";

/// One tagged source text
struct CatalogSource {
    text: &'static str,
    lvl: u32,
    kanji_type: KanjiType,
}

const CATALOG_SOURCES: &[CatalogSource] = &[
    CatalogSource { text: L1_KANJIS, lvl: 1, kanji_type: KanjiType::Base },
    CatalogSource { text: L2_KANJIS, lvl: 2, kanji_type: KanjiType::Base },
];

static DEFAULT_KANJIS: OnceLock<Vec<Kanji>> = OnceLock::new();

/// Split a text into `new` records, one per non-whitespace grapheme
pub fn text_to_kanjis(text: &str, lvl: u32, kanji_type: KanjiType) -> Vec<Kanji> {
    text.graphemes(true)
        .filter(|g| !g.chars().all(char::is_whitespace))
        .map(|g| Kanji::new(g, lvl, kanji_type, KanjiStatus::New))
        .collect()
}

fn build_default_kanjis() -> Vec<Kanji> {
    let all = CATALOG_SOURCES
        .iter()
        .flat_map(|source| text_to_kanjis(source.text, source.lvl, source.kanji_type));
    remove_duplicates(all, &OverridePolicy::NoOverride)
}

/// The default catalog. Returns a fresh copy on every call.
pub fn default_kanjis() -> Vec<Kanji> {
    DEFAULT_KANJIS.get_or_init(build_default_kanjis).clone()
}

/// Look up the default record for a character
pub fn default_kanji(kanji: &str) -> Option<Kanji> {
    DEFAULT_KANJIS
        .get_or_init(build_default_kanjis)
        .iter()
        .find(|k| k.kanji == kanji)
        .cloned()
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Catalog records grouped by level and type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogGroup {
    pub lvl: u32,
    #[serde(rename = "type")]
    pub kanji_type: KanjiType,
    pub count: usize,
    pub kanjis: String,
}

/// Group the default catalog by `(level, type)` in first-seen order
pub fn catalog_summary() -> Vec<CatalogGroup> {
    let mut groups: Vec<CatalogGroup> = Vec::new();
    for k in DEFAULT_KANJIS.get_or_init(build_default_kanjis) {
        let pos = groups
            .iter()
            .position(|g| g.lvl == k.lvl && g.kanji_type == k.kanji_type);
        match pos {
            Some(i) => {
                groups[i].count += 1;
                groups[i].kanjis.push_str(&k.kanji);
            }
            None => groups.push(CatalogGroup {
                lvl: k.lvl,
                kanji_type: k.kanji_type,
                count: 1,
                kanjis: k.kanji.clone(),
            }),
        }
    }
    groups
}

/// Print the grouped catalog to the console
pub fn log_catalog_summary() {
    for group in catalog_summary() {
        console_log!(
            "[Catalog] v{} lvl{} {}: {} kanji",
            DEFAULT_KANJI_VERSION,
            group.lvl,
            group.kanji_type,
            group.count
        );
    }
}
