//! Win/loss streak tracking persisted across games.
//!
//! The record is loaded once when the store is opened and written back after
//! every mutation. Storage problems are logged and otherwise ignored: a broken
//! disk must never stop a game from being played.

use crate::storage::KeyValueStore;
use crate::{debug_log, info_log};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

pub const STREAK_STORAGE_KEY: &str = "guess5-streaks";

/// A streak survives this long without a game being played.
pub const STREAK_EXPIRY_HOURS: i64 = 24;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_games: u32,
    pub total_wins: u32,
    pub last_played_date: Option<DateTime<Utc>>,
}

impl StreakRecord {
    fn is_consistent(&self) -> bool {
        self.total_wins <= self.total_games && self.current_streak <= self.longest_streak
    }

    #[must_use]
    pub fn win_percentage(&self) -> u32 {
        if self.total_games == 0 {
            return 0;
        }
        (100.0 * f64::from(self.total_wins) / f64::from(self.total_games)).round() as u32
    }
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_games: u32,
    pub total_wins: u32,
    pub win_percentage: u32,
    pub last_played_date: Option<DateTime<Utc>>,
}

pub struct StreakStore<S: KeyValueStore> {
    storage: S,
    record: StreakRecord,
}

impl<S: KeyValueStore> StreakStore<S> {
    pub fn open(storage: S) -> Self {
        let record = Self::load(&storage);
        Self { storage, record }
    }

    /// Read the record from storage, falling back to zeros when it is
    /// missing, unreadable, or fails its own invariants.
    pub fn load(storage: &S) -> StreakRecord {
        let raw = match storage.get(STREAK_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return StreakRecord::default(),
            Err(e) => {
                log::warn!("Failed to read streaks: {e}");
                return StreakRecord::default();
            }
        };
        match serde_json::from_str::<StreakRecord>(&raw) {
            Ok(record) if record.is_consistent() => record,
            Ok(record) => {
                log::warn!("Ignoring inconsistent streak record: {record:?}");
                StreakRecord::default()
            }
            Err(e) => {
                log::warn!("Ignoring corrupt streak record: {e}");
                StreakRecord::default()
            }
        }
    }

    #[must_use]
    pub fn record(&self) -> &StreakRecord {
        &self.record
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn record_win(&mut self) {
        self.record_win_at(Utc::now());
    }

    pub fn record_win_at(&mut self, now: DateTime<Utc>) {
        let r = &mut self.record;
        r.current_streak = r.current_streak.saturating_add(1);
        r.total_wins = r.total_wins.saturating_add(1);
        r.total_games = r.total_games.saturating_add(1);
        r.last_played_date = Some(now);
        r.longest_streak = r.longest_streak.max(r.current_streak);
        info_log!("Recorded win, streak now {}", r.current_streak);
        self.save();
    }

    pub fn record_loss(&mut self) {
        self.record_loss_at(Utc::now());
    }

    pub fn record_loss_at(&mut self, now: DateTime<Utc>) {
        let r = &mut self.record;
        r.current_streak = 0;
        r.total_games = r.total_games.saturating_add(1);
        r.last_played_date = Some(now);
        info_log!("Recorded loss after {} games", r.total_games);
        self.save();
    }

    /// Drop the current streak if the last game is more than
    /// [`STREAK_EXPIRY_HOURS`] old. Returns whether anything changed.
    pub fn check_and_reset_streak(&mut self) -> bool {
        self.check_and_reset_streak_at(Utc::now())
    }

    pub fn check_and_reset_streak_at(&mut self, now: DateTime<Utc>) -> bool {
        let Some(last) = self.record.last_played_date else {
            return false;
        };
        if now - last <= TimeDelta::hours(STREAK_EXPIRY_HOURS) {
            return false;
        }
        debug_log!("Streak expired (last played {last})");
        self.record.current_streak = 0;
        self.save();
        true
    }

    #[must_use]
    pub fn win_percentage(&self) -> u32 {
        self.record.win_percentage()
    }

    pub fn reset_all_stats(&mut self) {
        self.record = StreakRecord::default();
        self.save();
    }

    #[must_use]
    pub fn stats(&self) -> StreakStats {
        let r = &self.record;
        StreakStats {
            current_streak: r.current_streak,
            longest_streak: r.longest_streak,
            total_games: r.total_games,
            total_wins: r.total_wins,
            win_percentage: r.win_percentage(),
            last_played_date: r.last_played_date,
        }
    }

    fn save(&mut self) {
        let result = serde_json::to_string(&self.record)
            .map_err(Into::into)
            .and_then(|json| self.storage.set(STREAK_STORAGE_KEY, &json));
        if let Err(e) = result {
            log::warn!("Failed to save streaks: {e}");
        }
    }
}
