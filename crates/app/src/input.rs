use std::fmt;

use quiz_core::model::QuizMode;
use services::Intent;

/// One parsed line of terminal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Unknown(String),
    MissingPosition,
    InvalidNumber(String),
    UnexpectedArgument(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Unknown(raw) => write!(f, "unknown command: {raw} (type ? for help)"),
            InputError::MissingPosition => write!(f, "jump needs a question number"),
            InputError::InvalidNumber(raw) => write!(f, "not a valid number: {raw}"),
            InputError::UnexpectedArgument(raw) => write!(f, "unexpected argument: {raw}"),
        }
    }
}

impl std::error::Error for InputError {}

/// Parse a command line. Option and question numbers are 1-based.
pub fn parse(line: &str) -> Result<Command, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Empty);
    };
    let head = head.to_ascii_lowercase();

    let command = match head.as_str() {
        "n" | "next" => Command::Intent(Intent::Advance),
        "p" | "prev" | "previous" => Command::Intent(Intent::Retreat),
        "h" | "home" => Command::Intent(Intent::GoHome),
        "d" | "theme" | "dark" => Command::Intent(Intent::ToggleTheme),
        "?" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        "j" | "jump" => {
            let raw = words.next().ok_or(InputError::MissingPosition)?;
            Command::Intent(Intent::JumpTo(one_based(raw)?))
        }
        word if word.starts_with(|c: char| c.is_ascii_digit()) => {
            Command::Intent(Intent::SelectAnswer(one_based(word)?))
        }
        word => match word.parse::<QuizMode>() {
            Ok(mode) => Command::Intent(Intent::Start(mode)),
            Err(_) => return Err(InputError::Unknown(word.to_owned())),
        },
    };

    if let Some(extra) = words.next() {
        return Err(InputError::UnexpectedArgument(extra.to_owned()));
    }
    Ok(command)
}

fn one_based(raw: &str) -> Result<usize, InputError> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(InputError::InvalidNumber(raw.to_owned())),
    }
}
