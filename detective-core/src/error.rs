use crate::command::Side;
use crate::config::Level;
use crate::room_tree::RoomId;

#[derive(Debug, thiserror::Error)]
pub enum QuestError {
    #[error("Ledger bucket count must be at least 1")]
    InvalidBucketCount,
    #[error("Unknown room id: {0}")]
    UnknownRoom(RoomId),
    #[error("Room {parent} already has a {side} child")]
    SlotOccupied { parent: RoomId, side: Side },
    #[error("Room {0} already has a parent")]
    AlreadyLinked(RoomId),
    #[error("Linking room {child} under room {parent} would break the tree shape")]
    WouldCycle { parent: RoomId, child: RoomId },
    #[error("Room {0} is not reachable from the root")]
    Detached(RoomId),
    #[error("Accusations are only available at the master level (current: {0})")]
    AccusationUnavailable(Level),
    #[error("Failed to read player input: {0}")]
    Input(#[from] std::io::Error),
    #[error("Failed to write narration: {0}")]
    Output(std::io::Error),
}
