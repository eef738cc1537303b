//! Replay scripts: a line-oriented list of UI events.
//!
//! ```text
//! # Open the Villa, walk through it, leave with Escape
//! open villa-ikoyi
//! next; next
//! jump 1
//! key Escape
//! settle
//! ```
//!
//! | Command | Meaning |
//! |---|---|
//! | `open <n\|slug>` | Activate a card by 1-based grid position or project slug |
//! | `next`, `prev` | Navigation controls |
//! | `jump <n>` | Indicator `n`, 1-based |
//! | `close [overlay\|button\|key]` | Close affordance, `button` by default |
//! | `key <Name>` | A key press by `KeyboardEvent.key` name |
//! | `settle` | Let the exit transition in flight finish |
//!
//! `;` separates commands on one line and `#` starts a comment.

use crate::lightbox::CloseTrigger;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

/// Which card an `open` targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 0-based grid position.
    Position(usize),
    Slug(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(Target),
    Next,
    Prev,
    /// 0-based indicator index.
    Jump(usize),
    Close(CloseTrigger),
    Key(String),
    Settle,
}

/// A command with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub line: usize,
    pub text: String,
    pub command: Command,
}

pub fn parse_script(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        let line = i + 1;
        let code = raw.split_once('#').map_or(raw, |(code, _)| code);
        for text in code.split(';').map(str::trim).filter(|t| !t.is_empty()) {
            let command = parse_command(text).map_err(|message| ScriptError {
                line,
                message: format!("{message} in `{text}`"),
            })?;
            steps.push(Step {
                line,
                text: text.to_string(),
                command,
            });
        }
    }
    Ok(steps)
}

fn parse_command(text: &str) -> Result<Command, String> {
    let mut words = text.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let arg = words.next();
    if words.next().is_some() {
        return Err("too many arguments".into());
    }

    match (verb, arg) {
        ("open", Some(target)) => Ok(Command::Open(parse_target(target)?)),
        ("next", None) => Ok(Command::Next),
        ("prev", None) => Ok(Command::Prev),
        ("jump", Some(n)) => Ok(Command::Jump(parse_position(n)?)),
        ("close", None) => Ok(Command::Close(CloseTrigger::CloseButton)),
        ("close", Some(via)) => Ok(Command::Close(parse_trigger(via)?)),
        ("key", Some(name)) => Ok(Command::Key(name.to_string())),
        ("settle", None) => Ok(Command::Settle),
        ("open" | "jump" | "key", None) => Err(format!("`{verb}` needs an argument")),
        ("next" | "prev" | "settle", Some(_)) => Err(format!("`{verb}` takes no argument")),
        _ => Err(format!("unknown command `{verb}`")),
    }
}

fn parse_target(target: &str) -> Result<Target, String> {
    if target.bytes().all(|b| b.is_ascii_digit()) {
        parse_position(target).map(Target::Position)
    } else {
        Ok(Target::Slug(target.to_lowercase()))
    }
}

fn parse_position(n: &str) -> Result<usize, String> {
    match n.parse::<usize>() {
        Ok(0) => Err("positions start at 1".into()),
        Ok(n) => Ok(n - 1),
        Err(_) => Err(format!("`{n}` is not a position")),
    }
}

fn parse_trigger(via: &str) -> Result<CloseTrigger, String> {
    match via {
        "overlay" => Ok(CloseTrigger::Overlay),
        "button" => Ok(CloseTrigger::CloseButton),
        "key" => Ok(CloseTrigger::CancelKey),
        other => Err(format!(
            "unknown close trigger `{other}` (expected overlay, button or key)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(source: &str) -> Vec<Command> {
        parse_script(source)
            .unwrap()
            .into_iter()
            .map(|s| s.command)
            .collect()
    }

    #[test]
    fn parses_every_command() {
        let script = "open 2\nopen Villa-Ikoyi\nnext\nprev\njump 3\nclose\nclose overlay\nclose key\nkey Escape\nsettle\n";
        assert_eq!(
            commands(script),
            vec![
                Command::Open(Target::Position(1)),
                Command::Open(Target::Slug("villa-ikoyi".into())),
                Command::Next,
                Command::Prev,
                Command::Jump(2),
                Command::Close(CloseTrigger::CloseButton),
                Command::Close(CloseTrigger::Overlay),
                Command::Close(CloseTrigger::CancelKey),
                Command::Key("Escape".into()),
                Command::Settle,
            ]
        );
    }

    #[test]
    fn semicolons_and_comments() {
        let steps = parse_script("# walk\n\nopen 1; next ;next # twice\n").unwrap();
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|s| s.line == 3));
        assert_eq!(steps[1].text, "next");
    }

    #[test]
    fn key_names_keep_case() {
        assert_eq!(
            commands("key ArrowRight"),
            vec![Command::Key("ArrowRight".into())]
        );
    }

    #[test]
    fn unknown_command_reports_line() {
        let err = parse_script("open 1\n\nzoom in\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("unknown command `zoom`"));
        assert!(err.to_string().starts_with("line 3:"));
    }

    #[test]
    fn positions_are_one_based() {
        let err = parse_script("jump 0").unwrap_err();
        assert!(err.message.contains("start at 1"));
        let err = parse_script("open 0").unwrap_err();
        assert!(err.message.contains("start at 1"));
    }

    #[test]
    fn argument_errors() {
        assert!(parse_script("open").unwrap_err().message.contains("needs an argument"));
        assert!(parse_script("next 2").unwrap_err().message.contains("takes no argument"));
        assert!(parse_script("jump x").unwrap_err().message.contains("not a position"));
        assert!(parse_script("close door").unwrap_err().message.contains("close trigger"));
        assert!(parse_script("key a b").unwrap_err().message.contains("too many"));
    }

    #[test]
    fn error_quotes_offending_command() {
        let err = parse_script("open 1; warp 9").unwrap_err();
        assert!(err.message.ends_with("in `warp 9`"));
    }

    #[test]
    fn empty_script_is_empty() {
        assert!(parse_script("# nothing\n\n").unwrap().is_empty());
    }
}
