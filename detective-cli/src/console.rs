use detective_core::{Event, Narrator};
use std::io::{self, Write};

/// Prints events to a writer, standard output by default. Prompts stay on the
/// input line and are flushed immediately.
#[derive(Debug)]
pub struct ConsoleNarrator<W> {
    out: W,
}

impl<W: Write> ConsoleNarrator<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl Default for ConsoleNarrator<io::Stdout> {
    fn default() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Narrator for ConsoleNarrator<W> {
    fn narrate(&mut self, event: &Event) -> io::Result<()> {
        match event {
            Event::Entered { .. } => writeln!(self.out, "\n{event}"),
            Event::Prompt { .. } => {
                write!(self.out, "{event}")?;
                self.out.flush()
            }
            _ => writeln!(self.out, "{event}"),
        }
    }
}
