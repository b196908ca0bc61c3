use crate::clue_index::ClueIndex;
use crate::command::{Command, CommandSource, Side};
use crate::config::{Level, QuestConfig};
use crate::error::QuestError;
use crate::room_tree::{Evidence, RoomId, RoomTree};
use crate::suspect_ledger::{SuspectLedger, SuspectRecord};
use serde::Serialize;
use std::{fmt, io};
use tracing::{debug, info};

/// Number of clues that must point at the accused for the case to close.
pub const CONVICTION_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    AtRoom(RoomId),
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    PlayerExit,
    InputClosed,
    DeadEnd,
}

/// Narrative produced while walking the mansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Entered { room: String },
    ClueFound { clue: String },
    NoClue,
    /// Waiting for a command; flags tell which doors exist.
    Prompt { left: bool, right: bool },
    NoRoom(Side),
    InvalidOption(String),
    DeadEnd { room: String },
    Ended(EndReason),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Entered { room } => write!(f, "You are in: {room}"),
            Event::ClueFound { clue } => write!(f, "Clue found: {clue}"),
            Event::NoClue => write!(f, "No clue in this room."),
            Event::Prompt { left, right } => {
                let choices = match (left, right) {
                    (true, true) => "(e) left, (d) right, (s) exit",
                    (true, false) => "(e) left, (s) exit",
                    (false, true) => "(d) right, (s) exit",
                    (false, false) => "(s) exit",
                };
                write!(f, "Choose a path: {choices}: ")
            }
            Event::NoRoom(side) => write!(f, "There is no room to the {side}."),
            Event::InvalidOption(_) => write!(f, "Invalid option. Use e, d or s."),
            Event::DeadEnd { room } => write!(f, "{room} has no further doors."),
            Event::Ended(EndReason::PlayerExit) => write!(f, "Exploration ended by the player."),
            Event::Ended(EndReason::InputClosed) => write!(f, "Input closed. Exploration ended."),
            Event::Ended(EndReason::DeadEnd) => write!(f, "Nowhere left to go. Exploration ended."),
        }
    }
}

/// Receives events as the expedition produces them.
///
/// A write failure aborts the walk with `QuestError::Output`.
pub trait Narrator {
    fn narrate(&mut self, event: &Event) -> io::Result<()>;
}

impl Narrator for Vec<Event> {
    fn narrate(&mut self, event: &Event) -> io::Result<()> {
        self.push(event.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub accused: String,
    pub matching_clues: usize,
    pub accepted: bool,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.accepted {
            writeln!(
                f,
                "Accusation accepted! {} is linked to {} clues.",
                self.accused, self.matching_clues
            )?;
            write!(f, "The case is solved.")
        } else {
            writeln!(
                f,
                "Weak accusation! {} is linked to only {} clue(s).",
                self.accused, self.matching_clues
            )?;
            write!(f, "The mystery remains unsolved.")
        }
    }
}

/// Counts collected clues whose suspect matches `accused`, ignoring ASCII case.
/// Clues missing from the ledger do not count.
pub fn tally(clues: &ClueIndex, ledger: &SuspectLedger, accused: &str) -> usize {
    let accused = accused.trim();
    clues
        .iter()
        .filter_map(|clue| ledger.lookup(clue))
        .filter(|suspect| suspect.eq_ignore_ascii_case(accused))
        .count()
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub level: Level,
    pub config: QuestConfig,
    pub visited: Vec<String>,
    pub clues: Vec<String>,
    pub suspects: Vec<SuspectRecord>,
    pub end: Option<EndReason>,
    pub verdict: Option<Verdict>,
}

/// One interactive walk over the mansion plus the accusation that follows.
#[derive(Debug)]
pub struct Expedition {
    tree: RoomTree,
    config: QuestConfig,
    clues: ClueIndex,
    ledger: Option<SuspectLedger>,
    position: Position,
    started: bool,
    visited: Vec<String>,
    end: Option<EndReason>,
}

impl Expedition {
    pub fn new(tree: RoomTree, config: QuestConfig) -> Result<Self, QuestError> {
        let ledger = if config.level.tracks_suspects() {
            Some(SuspectLedger::new(config.ledger)?)
        } else {
            None
        };
        let root = tree.root();
        Ok(Self {
            tree,
            config,
            clues: ClueIndex::new(),
            ledger,
            position: Position::AtRoom(root),
            started: false,
            visited: Vec::new(),
            end: None,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn clues(&self) -> &ClueIndex {
        &self.clues
    }

    pub fn ledger(&self) -> Option<&SuspectLedger> {
        self.ledger.as_ref()
    }

    pub fn tree(&self) -> &RoomTree {
        &self.tree
    }

    /// Names of the rooms entered, in order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end
    }

    /// Enters the starting room. Returns no events once the walk has begun.
    pub fn start(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.started {
            return events;
        }
        self.started = true;
        let root = self.tree.root();
        self.enter(root, &mut events);
        events
    }

    /// Applies one line of player input. `None` means input is closed.
    pub fn step(&mut self, input: Option<&str>) -> Vec<Event> {
        let mut events = self.start();
        let Position::AtRoom(current) = self.position else {
            return events;
        };

        let Some(line) = input else {
            self.finish(EndReason::InputClosed, &mut events);
            return events;
        };

        match line.parse::<Command>() {
            Ok(Command::Exit) => self.finish(EndReason::PlayerExit, &mut events),
            Ok(Command::Go(side)) => match self.tree.child(current, side) {
                Some(next) => {
                    debug!(from = %current, to = %next, %side, "moving");
                    self.enter(next, &mut events);
                }
                None => {
                    events.push(Event::NoRoom(side));
                    self.prompt(current, &mut events);
                }
            },
            Err(token) => {
                debug!(token = %token, "invalid command");
                events.push(Event::InvalidOption(token));
                self.prompt(current, &mut events);
            }
        }
        events
    }

    /// Runs the walk to completion, pulling commands from `source`.
    pub async fn explore<S, N>(&mut self, source: &mut S, narrator: &mut N) -> Result<EndReason, QuestError>
    where
        S: CommandSource + ?Sized,
        N: Narrator + ?Sized,
    {
        for event in self.start() {
            narrator.narrate(&event).map_err(QuestError::Output)?;
        }
        while let Position::AtRoom(_) = self.position {
            let line = source.next_line().await?;
            for event in self.step(line.as_deref()) {
                narrator.narrate(&event).map_err(QuestError::Output)?;
            }
        }
        Ok(self.end.unwrap_or(EndReason::InputClosed))
    }

    /// Judges an accusation against the collected clues.
    ///
    /// A blank name withdraws the accusation and yields `Ok(None)`.
    pub fn accuse(&self, accused: &str) -> Result<Option<Verdict>, QuestError> {
        let ledger = self
            .ledger
            .as_ref()
            .ok_or(QuestError::AccusationUnavailable(self.config.level))?;
        let accused = accused.trim();
        if accused.is_empty() {
            return Ok(None);
        }
        let matching_clues = tally(&self.clues, ledger, accused);
        let verdict = Verdict {
            accused: accused.to_string(),
            matching_clues,
            accepted: matching_clues >= CONVICTION_THRESHOLD,
        };
        info!(accused, matching_clues, accepted = verdict.accepted, "accusation judged");
        Ok(Some(verdict))
    }

    pub fn report(&self, verdict: Option<Verdict>) -> SessionReport {
        let suspects = match &self.ledger {
            Some(ledger) => self
                .clues
                .iter()
                .filter_map(|clue| {
                    ledger.lookup(clue).map(|suspect| SuspectRecord {
                        clue: clue.to_string(),
                        suspect: suspect.to_string(),
                    })
                })
                .collect(),
            None => Vec::new(),
        };
        SessionReport {
            level: self.config.level,
            config: self.config,
            visited: self.visited.clone(),
            clues: self.clues.in_order_list(),
            suspects,
            end: self.end,
            verdict,
        }
    }

    fn enter(&mut self, id: RoomId, events: &mut Vec<Event>) {
        self.position = Position::AtRoom(id);
        let name = self
            .tree
            .room(id)
            .map(|r| r.name.clone())
            .unwrap_or_default();
        self.visited.push(name.clone());
        events.push(Event::Entered { room: name.clone() });

        if self.config.level.collects_clues() {
            self.collect(id, &name, events);
        }

        if self.tree.is_leaf(id) && self.config.ends_at_leaf() {
            events.push(Event::DeadEnd { room: name });
            self.finish(EndReason::DeadEnd, events);
        } else {
            self.prompt(id, events);
        }
    }

    fn collect(&mut self, id: RoomId, room: &str, events: &mut Vec<Event>) {
        let Some(Evidence { clue, suspect }) = self.tree.take_evidence(id) else {
            events.push(Event::NoClue);
            return;
        };
        info!(room, clue = %clue, "clue collected");
        self.clues.insert(&clue);
        if let Some(ledger) = self.ledger.as_mut() {
            ledger.upsert(&clue, &suspect);
        }
        events.push(Event::ClueFound { clue });
    }

    fn prompt(&self, id: RoomId, events: &mut Vec<Event>) {
        events.push(Event::Prompt {
            left: self.tree.child(id, Side::Left).is_some(),
            right: self.tree.child(id, Side::Right).is_some(),
        });
    }

    fn finish(&mut self, reason: EndReason, events: &mut Vec<Event>) {
        info!(?reason, rooms = self.visited.len(), clues = self.clues.len(), "exploration ended");
        self.position = Position::Ended;
        self.end = Some(reason);
        events.push(Event::Ended(reason));
    }
}
