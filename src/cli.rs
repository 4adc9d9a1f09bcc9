//! Terminal front end for the mulligan engine: parses user intents and
//! renders the round state as text.

use crate::rng::RandomSource;
use crate::simulation::mulligan::{MulliganEngine, Phase};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// A user intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle(usize),
    Confirm,
    Restart,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}' (type 'h' for help)")]
    Unknown(String),
    #[error("Expected a card number, got '{0}'")]
    BadIndex(String),
}

pub const HELP: &str = "\
Commands:
  t <n>, toggle <n>   mark/unmark card n for exchange
  c, confirm          exchange the marked cards
  r, restart          shuffle and deal a new hand
  h, help             show this help
  q, quit             leave";

/// Parse one input line
///
/// Card numbers are 1-based on screen; the returned index is 0-based.
/// A bare number is shorthand for toggling that card.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut parts = line.split_whitespace();
    let head = parts.next().ok_or(CommandError::Empty)?.to_lowercase();

    if let Ok(n) = head.parse::<usize>() {
        return to_index(n, &head).map(Command::Toggle);
    }

    match head.as_str() {
        "t" | "toggle" => {
            let arg = parts.next().unwrap_or("");
            let n = arg
                .parse::<usize>()
                .map_err(|_| CommandError::BadIndex(arg.to_string()))?;
            to_index(n, arg).map(Command::Toggle)
        }
        "c" | "confirm" => Ok(Command::Confirm),
        "r" | "restart" => Ok(Command::Restart),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(head)),
    }
}

fn to_index(n: usize, raw: &str) -> Result<usize, CommandError> {
    n.checked_sub(1)
        .ok_or_else(|| CommandError::BadIndex(raw.to_string()))
}

/// Render the opening hand with exchange marks, then the result section
pub fn render<R: RandomSource>(engine: &MulliganEngine<R>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "CHANGE  (deck: {} cards)", engine.deck_size());
    for (i, card) in engine.hand().iter().enumerate() {
        let mark = if engine.is_selected(i) { "[x]" } else { "[ ]" };
        let _ = writeln!(out, "  {} {}. {}", mark, i + 1, card);
    }

    let _ = writeln!(out, "RESULT");
    match engine.final_hand() {
        Some(hand) => {
            for (i, card) in hand.iter().enumerate() {
                let _ = writeln!(out, "      {}. {}", i + 1, card);
            }
        }
        None => {
            let _ = writeln!(out, "  (confirm to lock in your hand)");
        }
    }

    out
}

/// Apply a command; returns a message for the user when there is one
pub fn apply<R: RandomSource>(engine: &mut MulliganEngine<R>, command: Command) -> Option<String> {
    match command {
        Command::Toggle(i) => engine.toggle_selection(i).err().map(|e| e.to_string()),
        Command::Confirm => {
            if engine.phase() == Phase::Resolved {
                Some("Already confirmed; restart to deal again".to_string())
            } else {
                engine.confirm();
                None
            }
        }
        Command::Restart => {
            engine.restart();
            None
        }
        Command::Help => Some(HELP.to_string()),
        Command::Quit => None,
    }
}

/// Interactive loop over `input`, writing the rendered state to `output`
pub fn run_session<R, I, O>(engine: &mut MulliganEngine<R>, input: I, mut output: O) -> io::Result<()>
where
    R: RandomSource,
    I: BufRead,
    O: Write,
{
    write!(output, "{}", render(engine))?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(output, "> ")?;
            output.flush()?;
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                let message = apply(engine, command);
                if let Some(message) = message {
                    writeln!(output, "{}", message)?;
                }
                if command != Command::Help {
                    write!(output, "{}", render(engine))?;
                }
            }
            Err(e) => writeln!(output, "{}", e)?,
        }

        write!(output, "> ")?;
        output.flush()?;
    }

    Ok(())
}
