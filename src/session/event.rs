//! User input events for the interactive session.

use std::fmt;

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Show a recipe by id
    Select(String),
    /// Calculator submission; the raw text is validated by the engine
    People(String),
    /// Re-render the current view
    Show,
    /// Print the navigation list only
    List,
    /// Forget the selection and fall back to the first recipe
    Reset,
    Help,
    Quit,
}

/// Input line that is not a known command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command '{}' (try 'help')", self.0)
    }
}

pub const HELP: &str = "commands: select <id> | people <n> | show | list | reset | help | quit";

impl Event {
    /// Parse a line. Blank lines are `None`.
    pub fn parse(line: &str) -> Option<Result<Self, UnknownCommand>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        let event = match command {
            "select" | "s" if !rest.is_empty() => Self::Select(rest.to_string()),
            "people" | "p" => Self::People(rest.to_string()),
            "show" => Self::Show,
            "list" | "ls" => Self::List,
            "reset" => Self::Reset,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Some(Err(UnknownCommand(line.to_string()))),
        };
        Some(Ok(event))
    }
}
