use async_trait::async_trait;
use detective_core::{CommandSource, QuestError};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::signal;

/// Stands in for a line that could not be decoded; it never parses as a command.
pub const UNREADABLE_LINE: &str = "\u{FFFD}";

/// Reads player input line by line.
///
/// Ctrl+C while waiting closes the stream instead of killing the process,
/// so the session still reaches its summary. A line that is not valid UTF-8
/// is handed on as `UNREADABLE_LINE` so the walk re-prompts.
pub struct LineCommands<R> {
    lines: Lines<R>,
    interrupted: bool,
}

pub type StdinCommands = LineCommands<BufReader<Stdin>>;

impl<R: AsyncBufRead + Unpin> LineCommands<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            interrupted: false,
        }
    }
}

impl Default for StdinCommands {
    fn default() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> CommandSource for LineCommands<R> {
    async fn next_line(&mut self) -> Result<Option<String>, QuestError> {
        if self.interrupted {
            return Ok(None);
        }
        let read = tokio::select! {
            line = self.lines.next_line() => Some(line),
            _ = signal::ctrl_c() => None,
        };
        match read {
            Some(Ok(line)) => Ok(line),
            // the undecodable bytes are already consumed; the next read starts fresh
            Some(Err(e)) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!("discarding input line that is not valid UTF-8");
                Ok(Some(UNREADABLE_LINE.to_string()))
            }
            Some(Err(e)) => Err(QuestError::Input(e)),
            None => {
                tracing::info!("interrupted, closing input");
                self.interrupted = true;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use detective_core::{EndReason, Event, Expedition, QuestConfig, RoomTree};

    #[tokio::test]
    async fn default_reads_stdin() {
        let input = StdinCommands::default();
        assert!(!input.interrupted);
    }

    #[tokio::test]
    async fn undecodable_line_becomes_placeholder() {
        let mut input = LineCommands::from_reader(BufReader::new(&b"\xff\ne\n"[..]));
        assert_eq!(input.next_line().await.unwrap().as_deref(), Some(UNREADABLE_LINE));
        assert_eq!(input.next_line().await.unwrap().as_deref(), Some("e"));
        assert_eq!(input.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn undecodable_line_reprompts_without_losing_state() {
        let mut input = LineCommands::from_reader(BufReader::new(&b"\xff\ne\ns\n"[..]));
        let tree = RoomTree::mansion().unwrap();
        let mut expedition = Expedition::new(tree, QuestConfig::default()).unwrap();
        let mut events = Vec::<Event>::new();

        let end = expedition.explore(&mut input, &mut events).await.unwrap();

        assert_eq!(end, EndReason::PlayerExit);
        assert!(events.contains(&Event::InvalidOption(UNREADABLE_LINE.to_string())));
        assert_eq!(expedition.visited(), ["Entrance Hall", "Sitting Room"]);
        assert_eq!(expedition.clues().len(), 2);
    }
}
