use alloc::collections::VecDeque;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::*;

/// Identifies a score by its creation time in milliseconds.
///
/// Two scores recorded within the same millisecond share an id, lookups then resolve to the most recent one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreId(pub i64);

impl ScoreId {
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub id: ScoreId,
    pub clicks: u32,
    /// Seconds actually used, see [`ClickSession::used_secs`]
    pub time: u32,
    pub created_at: DateTime<Utc>,
    pub mode: ClickMode,
}

impl Score {
    pub fn clicks_per_second(&self) -> f64 {
        clicks_per_second(self.clicks, self.time)
    }

    pub fn speed_tier(&self) -> SpeedTier {
        SpeedTier::from_cps(self.clicks_per_second())
    }
}

/// Clicks divided by seconds, 0.0 when no time has passed.
pub fn clicks_per_second(clicks: u32, secs: u32) -> f64 {
    if secs == 0 {
        0.0
    } else {
        f64::from(clicks) / f64::from(secs)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpeedTier {
    /// below 5 CPS
    Casual,
    /// 5 to 8 CPS
    Quick,
    /// 8 to 11 CPS
    Fast,
    /// 11 CPS and above
    Blazing,
}

impl SpeedTier {
    pub fn from_cps(cps: f64) -> Self {
        if !(cps >= 5.0) {
            Self::Casual
        } else if cps < 8.0 {
            Self::Quick
        } else if cps < 11.0 {
            Self::Fast
        } else {
            Self::Blazing
        }
    }

    pub const fn label(self) -> &'static str {
        use SpeedTier::*;
        match self {
            Casual => "Casual",
            Quick => "Quick",
            Fast => "Fast",
            Blazing => "Blazing",
        }
    }
}

/// Recorded scores, most recent first, never longer than its capacity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreHistory {
    entries: VecDeque<Score>,
    capacity: usize,
}

impl ScoreHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Prepends `score`, returning the oldest entry if it had to be evicted.
    pub fn push(&mut self, score: Score) -> Option<Score> {
        self.entries.push_front(score);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn latest(&self) -> Option<&Score> {
        self.entries.front()
    }

    pub fn get(&self, index: usize) -> Option<&Score> {
        self.entries.get(index)
    }

    pub fn find(&self, id: ScoreId) -> Option<&Score> {
        self.entries.iter().find(|score| score.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Score> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ScoreHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_at(millis: i64, clicks: u32) -> Score {
        let created_at = DateTime::<Utc>::from_timestamp_millis(millis).unwrap();
        Score {
            id: ScoreId::from_timestamp(created_at),
            clicks,
            time: 5,
            created_at,
            mode: ClickMode::Time,
        }
    }

    #[test]
    fn cps_guards_zero_seconds() {
        assert_eq!(clicks_per_second(50, 0), 0.0);
        assert_eq!(clicks_per_second(50, 5), 10.0);
    }

    #[test]
    fn tiers_follow_half_open_ranges() {
        assert_eq!(SpeedTier::from_cps(0.0), SpeedTier::Casual);
        assert_eq!(SpeedTier::from_cps(4.99), SpeedTier::Casual);
        assert_eq!(SpeedTier::from_cps(5.0), SpeedTier::Quick);
        assert_eq!(SpeedTier::from_cps(7.99), SpeedTier::Quick);
        assert_eq!(SpeedTier::from_cps(8.0), SpeedTier::Fast);
        assert_eq!(SpeedTier::from_cps(11.0), SpeedTier::Blazing);
        assert_eq!(SpeedTier::from_cps(f64::NAN), SpeedTier::Casual);
    }

    #[test]
    fn score_tier_uses_its_own_cps() {
        assert_eq!(score_at(0, 50).speed_tier(), SpeedTier::Fast);
        assert_eq!(score_at(0, 60).speed_tier(), SpeedTier::Blazing);
    }

    #[test]
    fn history_evicts_oldest_first() {
        let mut history = ScoreHistory::new(10);

        for i in 0..10 {
            assert_eq!(history.push(score_at(i, i as u32)), None);
        }
        let evicted = history.push(score_at(10, 10));
        history.push(score_at(11, 11));

        assert_eq!(evicted.map(|score| score.clicks), Some(0));
        assert_eq!(history.len(), 10);
        assert_eq!(history.latest().map(|score| score.clicks), Some(11));
        assert_eq!(history.get(9).map(|score| score.clicks), Some(2));
        assert!(history.find(ScoreId(1)).is_none());
    }

    #[test]
    fn clear_empties_history() {
        let mut history = ScoreHistory::default();
        history.push(score_at(0, 1));

        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.capacity(), 10);
    }

    #[test]
    fn score_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(score_at(1_000, 42)).unwrap();

        assert_eq!(json["id"], 1_000);
        assert_eq!(json["clicks"], 42);
        assert_eq!(json["time"], 5);
        assert_eq!(json["mode"], "time");
        assert!(json["createdAt"].is_string());
    }
}
