//! Click-counter runs and their top-10 leaderboard
//!
//! Persisted to LocalStorage under the `clickforge.*` keys. A fresh (or
//! unreadable) board starts from a fixed seed list so there is always
//! something to beat.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of scores kept on the board
pub const MAX_ENTRIES: usize = 10;

/// Board contents before anyone has played
pub const SEED_SCORES: [u64; MAX_ENTRIES] = [240, 220, 205, 190, 175, 160, 150, 130, 120, 110];

/// Label shown when a run missed the board or nothing was recorded yet
pub const NO_RANK: &str = "—";

/// Where a finished run landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// 1-indexed rank; equal scores share a rank
    Ranked(usize),
    Unranked,
}

impl Placement {
    pub fn label(&self) -> String {
        match self {
            Placement::Ranked(rank) => format!("#{}", rank),
            Placement::Unranked => NO_RANK.to_string(),
        }
    }
}

/// The most recently recorded run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastRun {
    pub score: u64,
    /// Unix timestamp (ms)
    pub time: f64,
}

/// Top-10 click counts, sorted descending
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    pub scores: Vec<u64>,
    pub last_run: Option<LastRun>,
    /// "#N" or "—"
    pub last_rank: Option<String>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Coerce a stored entry to a score the way a browser reads a number
///
/// `null`, `false` and blank strings count as 0, `true` as 1. Non-numeric
/// strings, arrays and objects are dropped.
fn score_from_value(value: &Value) -> Option<u64> {
    let n = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then(|| n.max(0.0).round() as u64)
}

impl Leaderboard {
    const STORAGE_TOP: &'static str = "clickforge.top10";
    const STORAGE_LAST: &'static str = "clickforge.last";
    const STORAGE_RANK: &'static str = "clickforge.lastRank";

    /// Board holding only the seed scores
    pub fn seeded() -> Self {
        Self {
            scores: SEED_SCORES.to_vec(),
            last_run: None,
            last_rank: None,
        }
    }

    /// Parse a stored top-10 list
    ///
    /// A non-empty JSON array keeps its numeric entries (first ten) after
    /// coercion, so `null` becomes 0. An empty
    /// array, any other JSON value, or unparseable text yields the seed list.
    pub fn parse_scores(json: &str) -> Vec<u64> {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Array(items)) if !items.is_empty() => items
                .iter()
                .filter_map(score_from_value)
                .take(MAX_ENTRIES)
                .collect(),
            Ok(_) => SEED_SCORES.to_vec(),
            Err(e) => {
                log::warn!("Unreadable leaderboard ({}), reseeding", e);
                SEED_SCORES.to_vec()
            }
        }
    }

    /// Rank a score would take (1 + number of strictly greater entries)
    pub fn rank_of(&self, score: u64) -> usize {
        self.scores.iter().filter(|&&s| s > score).count() + 1
    }

    /// Record a finished run and return where it landed
    pub fn add_score(&mut self, score: u64, timestamp: f64) -> Placement {
        let rank = self.rank_of(score);
        self.scores.insert(rank - 1, score);
        self.scores.truncate(MAX_ENTRIES);

        let placement = if rank <= MAX_ENTRIES {
            Placement::Ranked(rank)
        } else {
            Placement::Unranked
        };

        self.last_run = Some(LastRun {
            score,
            time: timestamp,
        });
        self.last_rank = Some(placement.label());
        placement
    }

    /// Wipe history and go back to the seed list
    pub fn reset(&mut self) {
        *self = Self::seeded();
        log::info!("Leaderboard reset to seed scores");
    }

    pub fn top_score(&self) -> Option<u64> {
        self.scores.first().copied()
    }

    /// "Last run: 42 clicks (<date>)" or "Last run: —"
    pub fn last_run_label(&self) -> String {
        match self.last_run {
            Some(run) => format!("Last run: {} clicks ({})", run.score, format_timestamp(run.time)),
            None => format!("Last run: {}", NO_RANK),
        }
    }

    /// "Top 10 rank: #3" or "Top 10 rank: —"
    pub fn last_rank_label(&self) -> String {
        format!(
            "Top 10 rank: {}",
            self.last_rank.as_deref().unwrap_or(NO_RANK)
        )
    }

    /// Read the board from `store`
    ///
    /// A missing top-10 key is seeded and written back; the last-run and rank
    /// keys are left as they are.
    pub fn load_from(store: &mut impl ScoreStore) -> Self {
        let scores = match store.get(Self::STORAGE_TOP) {
            Some(json) => Self::parse_scores(&json),
            None => {
                let scores = SEED_SCORES.to_vec();
                Self::write_scores(store, &scores);
                scores
            }
        };
        let last_run = store
            .get(Self::STORAGE_LAST)
            .and_then(|json| serde_json::from_str::<LastRun>(&json).ok());
        let last_rank = store.get(Self::STORAGE_RANK).filter(|s| !s.is_empty());

        log::info!("Loaded leaderboard ({} entries)", scores.len());
        Self {
            scores,
            last_run,
            last_rank,
        }
    }

    /// Write every key, clearing the last-run keys when nothing is recorded
    pub fn save_to(&self, store: &mut impl ScoreStore) {
        Self::write_scores(store, &self.scores);
        match self.last_run.as_ref().map(serde_json::to_string) {
            Some(Ok(json)) => store.set(Self::STORAGE_LAST, &json),
            _ => store.remove(Self::STORAGE_LAST),
        }
        match &self.last_rank {
            Some(rank) => store.set(Self::STORAGE_RANK, rank),
            None => store.remove(Self::STORAGE_RANK),
        }
        log::info!("Leaderboard saved ({} entries)", self.scores.len());
    }

    fn write_scores(store: &mut impl ScoreStore, scores: &[u64]) {
        if let Ok(json) = serde_json::to_string(scores) {
            store.set(Self::STORAGE_TOP, &json);
        }
    }

    /// Load the board from LocalStorage (WASM only), seeding it if absent
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match local_storage() {
            Some(mut storage) => Self::load_from(&mut storage),
            None => {
                log::warn!("LocalStorage unavailable, leaderboard will not persist");
                Self::seeded()
            }
        }
    }

    /// Save the board to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(mut storage) = local_storage() {
            self.save_to(&mut storage);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::seeded()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// String key-value storage the leaderboard persists through
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

impl ScoreStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        HashMap::remove(self, key);
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for web_sys::Storage {
    fn get(&self, key: &str) -> Option<String> {
        self.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let _ = self.set_item(key, value);
    }

    fn remove(&mut self, key: &str) {
        let _ = self.remove_item(key);
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Format a timestamp in the browser's locale
#[cfg(target_arch = "wasm32")]
pub fn format_timestamp(timestamp: f64) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp));
    String::from(date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn format_timestamp(_timestamp: f64) -> String {
    "N/A".to_string()
}

/// A single click-counting run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickRun {
    pub count: u64,
    /// Already written to the board
    pub saved: bool,
    /// At least one click since the run started
    pub run_active: bool,
}

impl ClickRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn click(&mut self) {
        self.run_active = true;
        self.count += 1;
    }

    /// Record the run once; later calls and untouched runs are ignored
    pub fn finish(&mut self, board: &mut Leaderboard, timestamp: f64) -> Option<Placement> {
        if self.saved || !self.run_active {
            return None;
        }
        self.saved = true;
        let placement = board.add_score(self.count, timestamp);
        log::info!("Run finished: {} clicks ({})", self.count, placement.label());
        Some(placement)
    }

    pub fn restart(&mut self) {
        *self = Self::default();
    }

    /// "End run" button: record, then start over
    pub fn end_run(&mut self, board: &mut Leaderboard, timestamp: f64) -> Option<Placement> {
        let placement = self.finish(board, timestamp);
        self.restart();
        placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_board() {
        let board = Leaderboard::seeded();
        assert_eq!(board.scores.len(), MAX_ENTRIES);
        assert_eq!(board.top_score(), Some(240));
        assert_eq!(board.last_run_label(), "Last run: —");
        assert_eq!(board.last_rank_label(), "Top 10 rank: —");
    }

    #[test]
    fn test_add_score_ranks_and_trims() {
        let mut board = Leaderboard::seeded();
        let placement = board.add_score(200, 1000.0);

        assert_eq!(placement, Placement::Ranked(4));
        assert_eq!(board.scores.len(), MAX_ENTRIES);
        assert_eq!(board.scores[3], 200);
        assert_eq!(*board.scores.last().unwrap(), 120);
        assert_eq!(board.last_rank.as_deref(), Some("#4"));
        assert_eq!(board.last_run, Some(LastRun { score: 200, time: 1000.0 }));
    }

    #[test]
    fn test_add_score_too_low() {
        let mut board = Leaderboard::seeded();
        let placement = board.add_score(5, 0.0);

        assert_eq!(placement, Placement::Unranked);
        assert_eq!(board.scores, SEED_SCORES.to_vec());
        assert_eq!(board.last_rank_label(), "Top 10 rank: —");
        assert_eq!(board.last_run.map(|r| r.score), Some(5));
    }

    #[test]
    fn test_tie_shares_rank() {
        let mut board = Leaderboard::seeded();
        assert_eq!(board.add_score(110, 0.0), Placement::Ranked(10));
        assert_eq!(board.add_score(240, 0.0), Placement::Ranked(1));
        assert_eq!(board.scores[..2], [240, 240]);
    }

    #[test]
    fn test_short_board_always_ranks() {
        let mut board = Leaderboard {
            scores: vec![50],
            last_run: None,
            last_rank: None,
        };
        assert_eq!(board.add_score(1, 0.0), Placement::Ranked(2));
        assert_eq!(board.scores, vec![50, 1]);
    }

    #[test]
    fn test_parse_scores() {
        assert_eq!(Leaderboard::parse_scores("[3, 2, 1]"), vec![3, 2, 1]);
        assert_eq!(Leaderboard::parse_scores(r#"[9, "7", null, "x", 4]"#), vec![9, 7, 0, 4]);
        assert_eq!(Leaderboard::parse_scores("[]"), SEED_SCORES.to_vec());
        assert_eq!(Leaderboard::parse_scores("null"), SEED_SCORES.to_vec());
        assert_eq!(Leaderboard::parse_scores("{not json"), SEED_SCORES.to_vec());

        let long: Vec<u64> = (0..15).rev().collect();
        let json = serde_json::to_string(&long).unwrap();
        assert_eq!(Leaderboard::parse_scores(&json).len(), MAX_ENTRIES);
    }

    #[test]
    fn test_parse_scores_coerces_like_a_browser() {
        assert_eq!(
            Leaderboard::parse_scores(r#"[true, false, "", " 12 ", {}, [3], "1e2"]"#),
            vec![1, 0, 0, 12, 100]
        );
        assert_eq!(Leaderboard::parse_scores("[null, null]"), vec![0, 0]);
        // Nothing survives coercion: empty board, not the seed list
        assert!(Leaderboard::parse_scores(r#"["x", {}]"#).is_empty());
    }

    #[test]
    fn test_load_seeds_only_the_top_list() {
        let mut store: HashMap<String, String> = HashMap::new();
        store.set("clickforge.last", r#"{"score":42,"time":1000.0}"#);
        store.set("clickforge.lastRank", "#7");

        let board = Leaderboard::load_from(&mut store);

        assert_eq!(board.scores, SEED_SCORES.to_vec());
        assert_eq!(board.last_run, Some(LastRun { score: 42, time: 1000.0 }));
        assert_eq!(board.last_rank.as_deref(), Some("#7"));
        // Seeding wrote the list and left the last-run keys alone
        let stored = ScoreStore::get(&store, "clickforge.top10").unwrap();
        assert_eq!(Leaderboard::parse_scores(&stored), SEED_SCORES.to_vec());
        assert!(store.contains_key("clickforge.last"));
        assert_eq!(store["clickforge.lastRank"], "#7");
    }

    #[test]
    fn test_save_then_load() {
        let mut store: HashMap<String, String> = HashMap::new();
        let mut board = Leaderboard::seeded();
        board.add_score(230, 5.0);
        board.save_to(&mut store);

        let loaded = Leaderboard::load_from(&mut store);
        assert_eq!(loaded, board);

        board.reset();
        board.save_to(&mut store);
        assert!(!store.contains_key("clickforge.last"));
        assert!(!store.contains_key("clickforge.lastRank"));
    }

    #[test]
    fn test_reset() {
        let mut board = Leaderboard::seeded();
        board.add_score(999, 1.0);
        board.reset();
        assert_eq!(board, Leaderboard::seeded());
    }

    #[test]
    fn test_click_run_finishes_once() {
        let mut board = Leaderboard::seeded();
        let mut run = ClickRun::new();
        for _ in 0..300 {
            run.click();
        }

        assert_eq!(run.finish(&mut board, 5.0), Some(Placement::Ranked(1)));
        assert_eq!(run.finish(&mut board, 6.0), None);
        assert_eq!(board.scores.iter().filter(|&&s| s == 300).count(), 1);
    }

    #[test]
    fn test_idle_run_is_not_recorded() {
        let mut board = Leaderboard::seeded();
        let mut run = ClickRun::new();
        assert_eq!(run.end_run(&mut board, 0.0), None);
        assert!(board.last_run.is_none());
    }

    #[test]
    fn test_end_run_restarts() {
        let mut board = Leaderboard::seeded();
        let mut run = ClickRun::new();
        run.click();
        run.click();

        assert_eq!(run.end_run(&mut board, 0.0), Some(Placement::Unranked));
        assert_eq!(run, ClickRun::default());

        run.click();
        assert!(run.finish(&mut board, 1.0).is_some());
    }
}
