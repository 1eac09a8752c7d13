//! Training progress bookkeeping
//!
//! Tracks per-episode scores, a rolling period summary (every 100 games by
//! default) and a leaderboard of the best episodes.

use serde::{Deserialize, Serialize};

/// Default number of games per reporting period
pub const DEFAULT_PERIOD: u64 = 100;

/// Maximum number of leaderboard entries to keep
pub const MAX_BEST_EPISODES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeEntry {
    /// Walls cleared
    pub score: u32,
    /// 1-based episode number
    pub episode: u64,
    /// Steps survived
    pub steps: u64,
}

/// Best episodes by score (descending); equal scores rank the shorter
/// episode first, then the earlier one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<EpisodeEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert an episode; returns its rank (1-indexed) if it made the board.
    /// Scoreless episodes never rank.
    pub fn add(&mut self, entry: EpisodeEntry) -> Option<usize> {
        if entry.score == 0 {
            return None;
        }
        let slot = self.entries.partition_point(|e| {
            e.score > entry.score || (e.score == entry.score && e.steps <= entry.steps)
        });
        if slot >= MAX_BEST_EPISODES {
            return None;
        }
        self.entries.insert(slot, entry);
        self.entries.truncate(MAX_BEST_EPISODES);
        Some(slot + 1)
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

/// Aggregate of one closed reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Games played when the period closed
    pub games: u64,
    pub mean_score: f64,
    pub mean_steps: f64,
    /// Best score within the period
    pub record: u32,
}

/// Running totals of the open period
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PeriodTotals {
    games: u64,
    score: u64,
    steps: u64,
    record: u32,
}

/// Everything a training run wants to plot afterwards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingStats {
    pub games: u64,
    /// Best score over the whole run
    pub record: u32,
    pub total_score: u64,
    pub total_steps: u64,
    /// Score of each episode in order
    pub scores: Vec<u32>,
    /// Running mean score after each episode
    pub mean_scores: Vec<f64>,
    pub periods: Vec<PeriodSummary>,
    pub best: Leaderboard,
    pub period_len: u64,
    period: PeriodTotals,
}

impl Default for TrainingStats {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}

impl TrainingStats {
    pub fn new(period_len: u64) -> Self {
        Self {
            games: 0,
            record: 0,
            total_score: 0,
            total_steps: 0,
            scores: Vec::new(),
            mean_scores: Vec::new(),
            periods: Vec::new(),
            best: Leaderboard::new(),
            period_len: period_len.max(1),
            period: PeriodTotals::default(),
        }
    }

    /// Mean score over all games
    pub fn mean_score(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games as f64
        }
    }

    /// Record a finished episode; returns the period summary if one closed
    pub fn record_episode(&mut self, score: u32, steps: u64) -> Option<PeriodSummary> {
        self.games += 1;
        self.total_score += score as u64;
        self.total_steps += steps;
        self.record = self.record.max(score);
        self.scores.push(score);
        self.mean_scores.push(self.mean_score());
        self.best.add(EpisodeEntry {
            score,
            episode: self.games,
            steps,
        });

        self.period.games += 1;
        self.period.score += score as u64;
        self.period.steps += steps;
        self.period.record = self.period.record.max(score);

        if self.period.games < self.period_len {
            return None;
        }

        let n = self.period.games as f64;
        let summary = PeriodSummary {
            games: self.games,
            mean_score: self.period.score as f64 / n,
            mean_steps: self.period.steps as f64 / n,
            record: self.period.record,
        };
        log::info!(
            "Game {} Mean Score {:.2} Record: {} Steps: {:.1}",
            summary.games,
            summary.mean_score,
            summary.record,
            summary.mean_steps
        );
        self.periods.push(summary.clone());
        self.period = PeriodTotals::default();
        Some(summary)
    }
}
