//! Commands typed at the prompt

use std::str::FromStr;
use workout_types::PlanField;

use crate::error::CliError;

pub const HELP: &str = "\
commands:
  start                 begin the workout
  pause                 pause or resume the clocks
  next                  move to the next phase
  reset                 back to the start, clocks cleared
  set <field> <value>   change a plan field (before start or after reset)
  plan                  show the plan and its schedule
  status                print the current state as JSON
  help                  this list
  quit                  exit";

/// One line of input, parsed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    TogglePause,
    Next,
    Reset,
    /// `value` is raw text; blank or `0` clears the field
    Set { field: PlanField, value: String },
    Plan,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CliError::Usage("type a command, or 'help'"));
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "start" => Command::Start,
            "pause" | "resume" | "p" => Command::TogglePause,
            "next" | "n" => Command::Next,
            "reset" => Command::Reset,
            "set" => {
                let field = words
                    .next()
                    .ok_or(CliError::Usage("set <field> <value>"))?
                    .parse::<PlanField>()?;
                let value = words.collect::<Vec<_>>().join(" ");
                Command::Set { field, value }
            }
            "plan" => Command::Plan,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}
