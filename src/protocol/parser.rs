//! Driver command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the engine main loop can dispatch on.

use serde_json::Value;
use tracing::warn;

/// A parsed driver-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a game: `newgame <species> [<species> ...]`.
    NewGame { species: Vec<String> },

    /// Advance the game if no requests are pending.
    Next,

    /// Answer a request: `submit <player_id> <proposal json>`.
    ///
    /// The id is kept signed so out-of-range negatives reach the game as a
    /// rejected submission rather than a parse failure.
    Submit { player_id: i64, proposal: Value },

    /// Print the current game as a JSON snapshot.
    Snapshot,

    /// Replace the current game with a JSON snapshot.
    Load { json: String },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "next" => Some(Command::Next),
        "snapshot" => Some(Command::Snapshot),

        "setoption" => parse_setoption(&tokens),
        "newgame" => parse_newgame(&tokens),
        "submit" => parse_submit(&tokens, trimmed),
        "load" => parse_load(trimmed),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
///
/// Option ids are a single token; the value may contain spaces.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    match tokens {
        [_, "name", name] => Some(Command::SetOption {
            name: name.to_string(),
            value: None,
        }),
        [_, "name", name, "value", value @ ..] if !value.is_empty() => Some(Command::SetOption {
            name: name.to_string(),
            value: Some(value.join(" ")),
        }),
        _ => {
            warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
            None
        }
    }
}

/// Parses `newgame <species> [<species> ...]`.
///
/// Species names are validated when the game starts, not here.
fn parse_newgame(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed newgame: expected 'newgame <species> [<species> ...]'");
        return None;
    }
    let species = tokens[1..].iter().map(|s| s.to_string()).collect();
    Some(Command::NewGame { species })
}

/// Parses `submit <player_id> <proposal json>`. The JSON may contain spaces.
fn parse_submit(tokens: &[&str], full_line: &str) -> Option<Command> {
    if tokens.len() < 3 {
        warn!("malformed submit: expected 'submit <player_id> <proposal json>'");
        return None;
    }
    let player_id = match tokens[1].parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            warn!("invalid player id: '{}'", tokens[1]);
            return None;
        }
    };
    let raw = rest_after(full_line, 2);
    match serde_json::from_str::<Value>(raw) {
        Ok(proposal) => Some(Command::Submit { player_id, proposal }),
        Err(e) => {
            warn!("invalid proposal json: {}", e);
            None
        }
    }
}

/// Parses `load <snapshot json>`.
fn parse_load(full_line: &str) -> Option<Command> {
    let json = rest_after(full_line, 1);
    if json.is_empty() {
        warn!("malformed load: expected 'load <snapshot json>'");
        return None;
    }
    Some(Command::Load {
        json: json.to_string(),
    })
}

/// Returns the remainder of `line` after skipping `n` whitespace-separated tokens.
fn rest_after(line: &str, n: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..n {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest.trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_isready_command() {
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
    }

    #[test]
    fn parse_quit_command() {
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn parse_next_and_snapshot() {
        assert_eq!(parse_command("next"), Some(Command::Next));
        assert_eq!(parse_command("  snapshot  "), Some(Command::Snapshot));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        let cmd = parse_command("setoption name Seed value 42").unwrap();
        assert_eq!(
            cmd,
            Command::SetOption {
                name: "Seed".to_string(),
                value: Some("42".to_string()),
            }
        );
    }

    #[test]
    fn parse_setoption_no_value() {
        let cmd = parse_command("setoption name Seed").unwrap();
        assert_eq!(
            cmd,
            Command::SetOption {
                name: "Seed".to_string(),
                value: None,
            }
        );
    }

    #[test]
    fn parse_setoption_malformed() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption Seed 4"), None);
        assert_eq!(parse_command("setoption name value 4"), None);
        assert_eq!(parse_command("setoption name Seed value"), None);
        assert_eq!(parse_command("setoption name Random Seed value 4"), None);
    }

    #[test]
    fn parse_newgame_species() {
        assert_eq!(
            parse_command("newgame human Xenite"),
            Some(Command::NewGame {
                species: vec!["human".to_string(), "Xenite".to_string()],
            })
        );
        assert_eq!(parse_command("newgame"), None);
    }

    #[test]
    fn parse_submit_with_spaced_json() {
        let cmd = parse_command(r#"submit 1 {"type": "build", "option": {"defender": 2}}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Submit {
                player_id: 1,
                proposal: json!({"type": "build", "option": {"defender": 2}}),
            }
        );
    }

    #[test]
    fn parse_submit_negative_id() {
        let cmd = parse_command(r#"submit -5 {"type":"build","option":{}}"#).unwrap();
        assert!(matches!(cmd, Command::Submit { player_id: -5, .. }));
    }

    #[test]
    fn parse_submit_malformed() {
        assert_eq!(parse_command("submit 0"), None);
        assert_eq!(parse_command("submit zero {}"), None);
        assert_eq!(parse_command("submit 0 {not json"), None);
    }

    #[test]
    fn parse_load_keeps_whole_json() {
        let cmd = parse_command(r#"load {"phase": "BUILD", "players": []}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Load {
                json: r#"{"phase": "BUILD", "players": []}"#.to_string(),
            }
        );
        assert_eq!(parse_command("load"), None);
    }

    #[test]
    fn rest_after_skips_tokens() {
        assert_eq!(rest_after("a  b   c d", 2), "c d");
        assert_eq!(rest_after("a", 2), "");
    }
}
