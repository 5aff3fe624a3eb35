//! Raw-input classification into command kinds.

/// The classified intent of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    Now,
    Clear,
    List,
    Bye,
    Occurring,
    Mark,
    Unmark,
    Delete,
    Find,
    Snooze,
    /// Fallback for anything unrecognized: the whole line becomes
    /// task-creation text.
    Add,
}

/// Ephemeral pair of command kind and the unmodified raw input line,
/// produced here and consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandData {
    pub kind: CommandKind,
    pub raw: String,
}

/// Classifies the first whitespace-delimited token of `input`, ASCII
/// case-insensitively. `help|now|clear|list|bye` match exactly;
/// `occurring|mark|unmark|delete|find|snooze` match by prefix; anything
/// else is the implicit add command.
pub fn parse_command(input: &str) -> CommandData {
    let head = input
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    CommandData {
        kind: classify(&head),
        raw: input.to_string(),
    }
}

fn classify(head: &str) -> CommandKind {
    match head {
        "help" => CommandKind::Help,
        "now" => CommandKind::Now,
        "clear" => CommandKind::Clear,
        "list" => CommandKind::List,
        "bye" => CommandKind::Bye,
        // `unmark` is checked before `mark`; prefix tests would otherwise
        // never see it.
        _ if head.starts_with("occurring") => CommandKind::Occurring,
        _ if head.starts_with("unmark") => CommandKind::Unmark,
        _ if head.starts_with("mark") => CommandKind::Mark,
        _ if head.starts_with("delete") => CommandKind::Delete,
        _ if head.starts_with("find") => CommandKind::Find,
        _ if head.starts_with("snooze") => CommandKind::Snooze,
        _ => CommandKind::Add,
    }
}
