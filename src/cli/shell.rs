//! Interactive Bacon game shell.
//!
//! Reads single-letter commands from any `BufRead` and writes answers to any
//! `Write`, so the same loop drives a terminal or a test buffer. Lookup
//! failures are reported and the loop carries on; only I/O errors end it.

use std::io::{BufRead, Write};
use tracing::debug;

use crate::error::{BaconError, Result};
use crate::graph::CostarGraph;
use crate::query::BaconSession;

const ROOT_PROMPT: &str = "Enter the name of a root actor: ";
const COMMAND_PROMPT: &str = "Command (q, n, m, A, a, g, s, ?): ";
const UNKNOWN_ACTOR: &str = "That actor is not in the database. Try again.";

const COMMAND_HELP: &str = "Commands are
  q: quit
  n: newGraph
  m: maxDistance
  A: actorsAtDistance
  a: averageDistance
  g: getDegree
  s: graph stats
  ?: print this command list
";

/// A shell command, keyed by the first character of the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    NewRoot,
    MaxDistance,
    ActorsAtDistance,
    AverageDistance,
    Degree,
    Stats,
    Help,
}

impl Command {
    pub fn from_line(line: &str) -> Option<Self> {
        match line.chars().next()? {
            'q' => Some(Command::Quit),
            'n' => Some(Command::NewRoot),
            'm' => Some(Command::MaxDistance),
            'A' => Some(Command::ActorsAtDistance),
            'a' => Some(Command::AverageDistance),
            'g' => Some(Command::Degree),
            's' => Some(Command::Stats),
            '?' => Some(Command::Help),
            _ => None,
        }
    }
}

pub struct Shell<'g, R, W> {
    graph: &'g CostarGraph,
    input: R,
    output: W,
}

impl<'g, R: BufRead, W: Write> Shell<'g, R, W> {
    pub fn new(graph: &'g CostarGraph, input: R, output: W) -> Self {
        Self {
            graph,
            input,
            output,
        }
    }

    /// Run the game until `q` or end of input. A known `root` skips the
    /// opening prompt.
    pub fn run(&mut self, root: Option<&str>) -> Result<()> {
        let root = match root {
            Some(root) if self.graph.contains_actor(root) => Some(root.to_string()),
            Some(_) => {
                writeln!(self.output, "{}", UNKNOWN_ACTOR)?;
                self.prompt_root(ROOT_PROMPT)?
            }
            None => self.prompt_root(ROOT_PROMPT)?,
        };
        let Some(root) = root else {
            return Ok(());
        };

        let mut session = BaconSession::new(self.graph, &root)?;

        while let Some(line) = self.prompt(COMMAND_PROMPT)? {
            let Some(command) = Command::from_line(&line) else {
                writeln!(self.output, "Huh?")?;
                continue;
            };
            debug!(?command, root = session.root(), "shell command");

            match command {
                Command::Quit => {
                    writeln!(self.output, "Thanks for playing!")?;
                    break;
                }
                Command::NewRoot => {
                    let Some(root) = self.prompt_root("Enter new root: ")? else {
                        break;
                    };
                    session.reroot(self.graph, &root)?;
                }
                Command::MaxDistance => {
                    writeln!(
                        self.output,
                        "The maximum degrees of separation from {} are {}.",
                        session.root(),
                        session.max_distance()
                    )?;
                }
                Command::ActorsAtDistance => {
                    if !self.actors_at_distance(&session)? {
                        break;
                    }
                }
                Command::AverageDistance => match session.average_distance() {
                    Ok(average) => writeln!(
                        self.output,
                        "The average degrees of separation from {} are {:.2}.",
                        session.root(),
                        average
                    )?,
                    Err(BaconError::EmptyTree(root)) => {
                        writeln!(self.output, "No data: {} has no connected actors.", root)?
                    }
                    Err(e) => return Err(e),
                },
                Command::Degree => {
                    if !self.degree(&session)? {
                        break;
                    }
                }
                Command::Stats => {
                    let json = serde_json::to_string_pretty(&self.graph.stats())?;
                    writeln!(self.output, "{}", json)?;
                }
                Command::Help => {
                    writeln!(self.output, "{}", COMMAND_HELP)?;
                }
            }
        }

        self.output.flush()?;
        Ok(())
    }

    /// `A`: list the actors at a given distance. Returns false on end of input.
    fn actors_at_distance(&mut self, session: &BaconSession) -> Result<bool> {
        let Some(line) = self.prompt("Enter degrees of separation(integer): ")? else {
            return Ok(false);
        };
        let Ok(distance) = line.parse::<usize>() else {
            writeln!(self.output, "That is not a number.")?;
            return Ok(true);
        };

        match session.actors_at(distance) {
            Some(actors) => {
                for actor in actors {
                    writeln!(self.output, "{}", actor)?;
                }
            }
            None => writeln!(self.output, "No actors at this degree of separation!")?,
        }
        Ok(true)
    }

    /// `g`: report one actor's number and path. Returns false on end of input.
    fn degree(&mut self, session: &BaconSession) -> Result<bool> {
        let Some(name) = self.prompt("Enter name: ")? else {
            return Ok(false);
        };
        let root = session.root();

        if !self.graph.contains_actor(&name) {
            writeln!(self.output, "{}", UNKNOWN_ACTOR)?;
        } else if name == root {
            writeln!(self.output, "{}'s {} number is 0!", name, root)?;
        } else {
            match session.path_to_root(&name) {
                Ok(path) => {
                    writeln!(self.output, "{}'s {} number is {}.", name, root, path.len())?;
                    for step in &path {
                        writeln!(self.output, "{}", step)?;
                    }
                }
                Err(BaconError::NotFound(_)) => {
                    writeln!(self.output, "{}'s {} number is infinity.", name, root)?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }

    /// Ask for an actor until a known one is given. `None` on end of input.
    fn prompt_root(&mut self, first_prompt: &str) -> Result<Option<String>> {
        let mut prompt = first_prompt;
        loop {
            let Some(name) = self.prompt(prompt)? else {
                return Ok(None);
            };
            if self.graph.contains_actor(&name) {
                return Ok(Some(name));
            }
            writeln!(self.output, "{}", UNKNOWN_ACTOR)?;
            prompt = ROOT_PROMPT;
        }
    }

    /// Print `prompt` and read one trimmed line. `None` on end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
