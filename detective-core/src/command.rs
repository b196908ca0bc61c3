use crate::error::QuestError;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "left",
            Side::Right => "right",
        })
    }
}

/// A navigation command typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Go(Side),
    Exit,
}

impl FromStr for Command {
    /// The unrecognised token, trimmed.
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "e" | "esquerda" => Ok(Command::Go(Side::Left)),
            "d" | "direita" => Ok(Command::Go(Side::Right)),
            "s" | "sair" => Ok(Command::Exit),
            other => Err(other.to_string()),
        }
    }
}

/// Pull-based supply of player input lines.
///
/// `Ok(None)` means the stream is closed; the walk treats it as an exit.
#[async_trait]
pub trait CommandSource: Send {
    async fn next_line(&mut self) -> Result<Option<String>, QuestError>;
}
