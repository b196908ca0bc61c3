pub mod clue_index;
pub mod command;
pub mod config;
pub mod error;
pub mod expedition;
pub mod room_tree;
pub mod scripted;
pub mod suspect_ledger;

pub use clue_index::ClueIndex;
pub use command::{Command, CommandSource, Side};
pub use config::{LedgerConfig, Level, QuestConfig};
pub use error::QuestError;
pub use expedition::{EndReason, Event, Expedition, Narrator, Position, SessionReport, Verdict};
pub use room_tree::{Evidence, Room, RoomId, RoomTree, RoomTreeBuilder};
pub use scripted::ScriptedCommands;
pub use suspect_ledger::{SuspectLedger, SuspectRecord};
