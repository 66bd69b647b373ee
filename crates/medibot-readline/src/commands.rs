//! Slash commands understood by the REPL.

/// Commands offered on each screen, for completion and `/help`.
pub const SIGN_IN_COMMANDS: &[&str] = &["/help", "/quit"];
pub const CONSULTATION_COMMANDS: &[&str] = &[
    "/history",
    "/new",
    "/prescription",
    "/logout",
    "/help",
    "/quit",
];
pub const HISTORY_COMMANDS: &[&str] = &["/open", "/new", "/back", "/help", "/quit"];
pub const WIZARD_COMMANDS: &[&str] = &["/back", "/download", "/home", "/help", "/quit"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    History,
    New,
    Prescription,
    Logout,
    Help,
    Quit,
    /// `/open N`, one-based as shown on the cards
    Open(usize),
    Back,
    Download,
    Home,
    Unknown(String),
}

/// Parses a slash command. Returns `None` for plain text.
pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    let rest = line.strip_prefix('/')?;
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "history" => Command::History,
        "new" => Command::New,
        "prescription" => Command::Prescription,
        "logout" => Command::Logout,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "back" => Command::Back,
        "download" => Command::Download,
        "home" => Command::Home,
        "open" => match arg.parse::<usize>() {
            Ok(n) if n > 0 => Command::Open(n),
            _ => Command::Unknown(line.to_string()),
        },
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse("How to improve appetite?"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("/history"), Some(Command::History));
        assert_eq!(parse("  /quit "), Some(Command::Quit));
        assert_eq!(parse("/exit"), Some(Command::Quit));
        assert_eq!(parse("/open 2"), Some(Command::Open(2)));
    }

    #[test]
    fn test_open_needs_positive_number() {
        assert!(matches!(parse("/open"), Some(Command::Unknown(_))));
        assert!(matches!(parse("/open 0"), Some(Command::Unknown(_))));
        assert!(matches!(parse("/open two"), Some(Command::Unknown(_))));
    }

    #[test]
    fn test_every_listed_command_parses() {
        for cmd in CONSULTATION_COMMANDS
            .iter()
            .chain(HISTORY_COMMANDS)
            .chain(WIZARD_COMMANDS)
            .filter(|c| **c != "/open")
        {
            assert!(
                !matches!(parse(cmd), Some(Command::Unknown(_)) | None),
                "{cmd} should parse"
            );
        }
    }
}
