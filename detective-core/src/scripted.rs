use crate::command::CommandSource;
use crate::error::QuestError;
use async_trait::async_trait;
use std::collections::VecDeque;

/// Replays a fixed list of input lines, then reports the stream as closed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommands {
    lines: VecDeque<String>,
}

impl ScriptedCommands {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

#[async_trait]
impl CommandSource for ScriptedCommands {
    async fn next_line(&mut self) -> Result<Option<String>, QuestError> {
        Ok(self.lines.pop_front())
    }
}
