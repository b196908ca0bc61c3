use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_BUCKET_COUNT: usize = 23;

/// Sizing of the clue -> suspect table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub bucket_count: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}

/// The three progressive game variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Plain walk over the mansion.
    Explorer,
    /// Walk and collect clues into the sorted index.
    Collector,
    /// Collect clues, link them to suspects and accuse someone at the end.
    #[default]
    Master,
}

impl Level {
    pub fn collects_clues(self) -> bool {
        !matches!(self, Level::Explorer)
    }

    pub fn tracks_suspects(self) -> bool {
        matches!(self, Level::Master)
    }

    /// Whether reaching a room with no children ends the walk when the
    /// player has not chosen explicitly.
    pub fn ends_at_leaf_by_default(self) -> bool {
        !matches!(self, Level::Master)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Explorer => "explorer",
            Level::Collector => "collector",
            Level::Master => "master",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestConfig {
    pub level: Level,
    pub ledger: LedgerConfig,
    /// Overrides the level's leaf behaviour when set.
    pub stop_at_leaf: Option<bool>,
}

impl QuestConfig {
    pub fn for_level(level: Level) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn ends_at_leaf(&self) -> bool {
        self.stop_at_leaf
            .unwrap_or_else(|| self.level.ends_at_leaf_by_default())
    }
}
