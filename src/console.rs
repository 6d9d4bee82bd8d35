// SPDX-License-Identifier: MPL-2.0
//! Line-oriented command language for the `toastkit` console.
//!
//! ```text
//! show [severity=..] [position=..] [duration=..] [pausable=..] [closeable=..] <message...>
//! dismiss <id> | hover <id> | leave <id>
//! clear | list | journal | help | quit
//! ```
//!
//! Identifiers may be written as `3` or `#3`. Option tokens are only
//! recognised before the message; the first token that is not a known
//! `key=value` pair starts the message text.

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;
use std::time::Duration;

use crate::notifications::{Phase, Position, Severity, ShowOptions, Snapshot, ToastId};

/// Text printed by the `help` command.
pub const COMMAND_HELP: &str = "\
commands:
  show [severity=info|success|warning|error] [position=top-left|top-center|top-right|bottom-left|bottom-center|bottom-right]
       [duration=<ms>] [pausable=true|false] [closeable=true|false] <message...>
  dismiss <id>     close a toast
  hover <id>       pointer enters a toast (pauses it)
  leave <id>       pointer leaves a toast (resumes it)
  clear            remove every toast immediately
  list             print active toasts by position
  journal          print the lifecycle journal as JSON
  help             print this text
  quit             exit";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(ShowRequest),
    Dismiss(ToastId),
    Hover(ToastId),
    Leave(ToastId),
    Clear,
    List,
    Journal,
    Help,
    Quit,
}

/// Arguments of a `show` command. Unset fields fall back to the configured
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowRequest {
    pub message: String,
    pub severity: Option<Severity>,
    pub position: Option<Position>,
    pub duration_ms: Option<i64>,
    pub pausable: Option<bool>,
    pub closeable: Option<bool>,
}

impl ShowRequest {
    /// Builds the options passed to the manager.
    #[must_use]
    pub fn options(&self) -> ShowOptions {
        let mut options = ShowOptions::new();
        if let Some(severity) = self.severity {
            options = options.severity(severity);
        }
        if let Some(position) = self.position {
            options = options.position(position);
        }
        if let Some(duration_ms) = self.duration_ms {
            options = options.duration_ms(duration_ms);
        }
        if let Some(pausable) = self.pausable {
            options = options.pausable(pausable);
        }
        if let Some(closeable) = self.closeable {
            options = options.closeable(closeable);
        }
        options
    }
}

/// Why a console line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownCommand(String),
    MissingId(&'static str),
    InvalidId(String),
    InvalidValue { key: &'static str, value: String },
    MissingMessage,
    UnexpectedArgument(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::UnknownCommand(name) => {
                write!(f, "unknown command '{name}' (try 'help')")
            }
            ParseError::MissingId(command) => write!(f, "'{command}' needs a toast id"),
            ParseError::InvalidId(raw) => write!(f, "'{raw}' is not a toast id"),
            ParseError::InvalidValue { key, value } => {
                write!(f, "invalid value '{value}' for {key}")
            }
            ParseError::MissingMessage => write!(f, "'show' needs a message"),
            ParseError::UnexpectedArgument(arg) => write!(f, "unexpected argument '{arg}'"),
        }
    }
}

impl std::error::Error for ParseError {}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(ParseError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "show" => return parse_show(tokens).map(Command::Show),
            "dismiss" => Command::Dismiss(parse_id("dismiss", tokens.next())?),
            "hover" => Command::Hover(parse_id("hover", tokens.next())?),
            "leave" => Command::Leave(parse_id("leave", tokens.next())?),
            "clear" => Command::Clear,
            "list" | "ls" => Command::List,
            "journal" => Command::Journal,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(ParseError::UnknownCommand(name.to_string())),
        };

        match tokens.next() {
            Some(extra) => Err(ParseError::UnexpectedArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn parse_id(command: &'static str, token: Option<&str>) -> Result<ToastId, ParseError> {
    let token = token.ok_or(ParseError::MissingId(command))?;
    token
        .trim_start_matches('#')
        .parse::<u64>()
        .map(ToastId::from_raw)
        .map_err(|_| ParseError::InvalidId(token.to_string()))
}

fn parse_show<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<ShowRequest, ParseError> {
    let mut request = ShowRequest::default();
    let mut words = Vec::new();

    for token in tokens {
        if words.is_empty() {
            if let Some((key, value)) = token.split_once('=') {
                if apply_option(&mut request, key, value)? {
                    continue;
                }
            }
        }
        words.push(token);
    }

    if words.is_empty() {
        return Err(ParseError::MissingMessage);
    }
    request.message = words.join(" ");
    Ok(request)
}

/// Returns `false` when `key` is not an option name.
fn apply_option(request: &mut ShowRequest, key: &str, value: &str) -> Result<bool, ParseError> {
    fn invalid(key: &'static str, value: &str) -> ParseError {
        ParseError::InvalidValue {
            key,
            value: value.to_string(),
        }
    }

    match key.to_ascii_lowercase().as_str() {
        "severity" => {
            request.severity = Some(value.parse().map_err(|_| invalid("severity", value))?);
        }
        "position" => {
            request.position = Some(value.parse().map_err(|_| invalid("position", value))?);
        }
        "duration" => {
            request.duration_ms = Some(value.parse().map_err(|_| invalid("duration", value))?);
        }
        "pausable" => {
            request.pausable = Some(value.parse().map_err(|_| invalid("pausable", value))?);
        }
        "closeable" => {
            request.closeable = Some(value.parse().map_err(|_| invalid("closeable", value))?);
        }
        _ => return Ok(false),
    }
    Ok(true)
}

/// Renders a snapshot as the `list` command prints it.
#[must_use]
pub fn format_snapshot(snapshot: &Snapshot<String>) -> String {
    if snapshot.is_empty() {
        return "no active toasts".to_string();
    }

    let mut out = String::new();
    for (position, toasts) in snapshot.iter() {
        if toasts.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{position}:");
        for toast in toasts {
            let _ = writeln!(
                out,
                "  {} [{}] {} {}  {}",
                toast.id,
                toast.severity,
                phase_label(toast.phase),
                format_remaining(toast.remaining),
                toast.message
            );
        }
    }
    out.truncate(out.trim_end().len());
    out
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Running => "running",
        Phase::Paused => "paused",
        Phase::Exiting => "exiting",
        Phase::Removed => "removed",
    }
}

fn format_remaining(remaining: Option<Duration>) -> String {
    match remaining {
        Some(left) => format!("{:.1}s", left.as_secs_f64()),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_show() {
        let command: Command = "show Saved the file".parse().expect("valid command");
        assert_eq!(
            command,
            Command::Show(ShowRequest {
                message: "Saved the file".to_string(),
                ..ShowRequest::default()
            })
        );
    }

    #[test]
    fn parses_show_options_before_message() {
        let command: Command =
            "show severity=error position=bottom-left duration=0 pausable=false closeable=false Disk full"
                .parse()
                .expect("valid command");
        assert_eq!(
            command,
            Command::Show(ShowRequest {
                message: "Disk full".to_string(),
                severity: Some(Severity::Error),
                position: Some(Position::BottomLeft),
                duration_ms: Some(0),
                pausable: Some(false),
                closeable: Some(false),
            })
        );
    }

    #[test]
    fn option_like_words_after_message_are_text() {
        let command: Command = "show ratio is x=2 severity=error".parse().expect("valid");
        match command {
            Command::Show(request) => {
                assert_eq!(request.message, "ratio is x=2 severity=error");
                assert_eq!(request.severity, None);
            }
            other => panic!("expected show, got {other:?}"),
        }
    }

    #[test]
    fn unknown_key_starts_message() {
        let command: Command = "show eta=5m remaining".parse().expect("valid");
        assert!(matches!(command, Command::Show(r) if r.message == "eta=5m remaining"));
    }

    #[test]
    fn negative_duration_is_accepted() {
        let command: Command = "show duration=-1 sticky".parse().expect("valid");
        assert!(matches!(command, Command::Show(r) if r.duration_ms == Some(-1)));
    }

    #[test]
    fn rejects_bad_option_values() {
        assert_eq!(
            "show severity=loud hi".parse::<Command>(),
            Err(ParseError::InvalidValue {
                key: "severity",
                value: "loud".to_string()
            })
        );
        assert!(matches!(
            "show duration=soon hi".parse::<Command>(),
            Err(ParseError::InvalidValue { key: "duration", .. })
        ));
    }

    #[test]
    fn show_without_message_fails() {
        assert_eq!("show".parse::<Command>(), Err(ParseError::MissingMessage));
        assert_eq!(
            "show severity=info".parse::<Command>(),
            Err(ParseError::MissingMessage)
        );
    }

    #[test]
    fn parses_id_commands() {
        assert_eq!(
            "dismiss 3".parse::<Command>(),
            Ok(Command::Dismiss(ToastId::from_raw(3)))
        );
        assert_eq!(
            "hover #7".parse::<Command>(),
            Ok(Command::Hover(ToastId::from_raw(7)))
        );
        assert_eq!(
            "LEAVE 1".parse::<Command>(),
            Ok(Command::Leave(ToastId::from_raw(1)))
        );
    }

    #[test]
    fn id_errors_are_reported() {
        assert_eq!(
            "dismiss".parse::<Command>(),
            Err(ParseError::MissingId("dismiss"))
        );
        assert_eq!(
            "hover abc".parse::<Command>(),
            Err(ParseError::InvalidId("abc".to_string()))
        );
        assert_eq!(
            "leave 1 2".parse::<Command>(),
            Err(ParseError::UnexpectedArgument("2".to_string()))
        );
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!("clear".parse::<Command>(), Ok(Command::Clear));
        assert_eq!("  list  ".parse::<Command>(), Ok(Command::List));
        assert_eq!("journal".parse::<Command>(), Ok(Command::Journal));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!(
            "launch".parse::<Command>(),
            Err(ParseError::UnknownCommand("launch".to_string()))
        );
    }

    #[test]
    fn empty_snapshot_formats_placeholder() {
        assert_eq!(format_snapshot(&Snapshot::default()), "no active toasts");
    }

    #[test]
    fn snapshot_lists_each_occupied_position() {
        use crate::notifications::{Manager, ManualClock};

        let clock = ManualClock::new();
        let mut manager = Manager::with_clock(clock.clone());
        manager.show("Saved".to_string(), ShowOptions::new().duration_ms(3000));
        manager.show(
            "Offline".to_string(),
            ShowOptions::new()
                .severity(Severity::Warning)
                .position(Position::BottomLeft)
                .duration_ms(0),
        );
        clock.advance_ms(500);

        let text = format_snapshot(&manager.snapshot());

        assert_eq!(
            text,
            "top-right:\n  #1 [info] running 2.5s  Saved\n\
             bottom-left:\n  #2 [warning] running -  Offline"
        );
    }
}
