//! Text commands accepted by the host loop, one per line.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Assign,
    Move,
    Restart,
    SelectK(usize),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("`k` expects one positive integer, got `{0}`")]
    InvalidK(String),
    #[error("`{command}` takes no arguments")]
    UnexpectedArgument { command: &'static str },
}

pub const HELP: &str = "commands: assign | move | restart | k <n> | show | help | quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let rest: Vec<&str> = words.collect();

        let bare = |command: &'static str, parsed: Command| {
            if rest.is_empty() {
                Ok(parsed)
            } else {
                Err(CommandError::UnexpectedArgument { command })
            }
        };

        match head.to_lowercase().as_str() {
            "assign" => bare("assign", Command::Assign),
            "move" => bare("move", Command::Move),
            "restart" => bare("restart", Command::Restart),
            "show" => bare("show", Command::Show),
            "help" | "?" => bare("help", Command::Help),
            "quit" | "exit" => bare("quit", Command::Quit),
            "k" => match rest.as_slice() {
                // digits only: `usize::from_str` would also take a leading `+`
                [value] if value.bytes().all(|b| b.is_ascii_digit()) => value
                    .parse::<usize>()
                    .map(Command::SelectK)
                    .map_err(|_| CommandError::InvalidK((*value).to_string())),
                _ => Err(CommandError::InvalidK(rest.join(" "))),
            },
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
