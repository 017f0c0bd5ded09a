pub mod errors;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub use errors::{Error, MetricFailure, Result, ResultExt};

/// Severity of the gap behind a recommendation.
///
/// Declaration order is the ranking order: `Critical` sorts first.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, Ord, PartialOrd)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, lower comes first
    pub fn rank(self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Priority, &str)] = &[
            (Priority::Critical, "critical"),
            (Priority::High, "high"),
            (Priority::Medium, "medium"),
            (Priority::Low, "low"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(p, _)| p == self)
            .map(|(_, s)| *s)
            .unwrap_or("unknown");

        write!(f, "{display_str}")
    }
}

/// Effort or impact rating attached to a recommendation rule.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
pub enum Rating {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub category: String,
    pub issue: String,
    pub action: String,
    pub priority: Priority,
    pub effort: Rating,
    pub impact: Rating,
}

impl Recommendation {
    pub fn new(
        category: impl Into<String>,
        priority: Priority,
        issue: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            issue: issue.into(),
            action: action.into(),
            priority,
            effort: Rating::Medium,
            impact: Rating::Medium,
        }
    }

    pub fn rated(mut self, effort: Rating, impact: Rating) -> Self {
        self.effort = effort;
        self.impact = impact;
        self
    }

    pub fn is_quick_win(&self) -> bool {
        self.effort == Rating::Low && self.impact == Rating::High
    }
}

/// A named sub-score, always within 0..=100.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubScore {
    pub name: &'static str,
    pub value: u32,
}

impl SubScore {
    pub fn new(name: &'static str, value: u32) -> Self {
        Self {
            name,
            value: value.min(100),
        }
    }
}

/// Ordered sub-score breakdown; serializes as a JSON object in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreCard {
    entries: Vec<SubScore>,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: u32) -> Self {
        self.entries.push(SubScore::new(name, value));
        self
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.value)
    }

    pub fn values(&self) -> Vec<u32> {
        self.entries.iter().map(|s| s.value).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubScore> {
        self.entries.iter()
    }
}

impl Serialize for ScoreCard {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.name, &entry.value)?;
        }
        map.end()
    }
}
