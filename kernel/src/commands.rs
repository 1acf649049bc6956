use crate::device::PowerRequest;

/// What the terminal should do with a submitted line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Lines(&'static [&'static str]),
    Clear,
    CharsTyped,
    Power(PowerRequest, &'static str),
    NotFound,
}

pub const NOT_FOUND: &str = "command not found";

#[derive(Copy, Clone)]
enum Pattern {
    Exact(&'static str),
    /// Literal prefix followed by a non-blank argument.
    WithArg(&'static str),
}

impl Pattern {
    fn matches(self, line: &str) -> bool {
        match self {
            Pattern::Exact(name) => line == name,
            Pattern::WithArg(prefix) => line
                .strip_prefix(prefix)
                .map(|arg| !arg.trim().is_empty())
                .unwrap_or(false),
        }
    }
}

struct Command {
    pattern: Pattern,
    reply: Reply,
}

const HELP: &[&str] = &["commands:", "help ls dir cd mkdir", "clear wpm shutdown reboot"];
const LISTING: &[&str] = &["bin  docs  home", "readme.txt"];

static COMMANDS: [Command; 10] = [
    Command { pattern: Pattern::Exact("help"), reply: Reply::Lines(HELP) },
    Command { pattern: Pattern::Exact("ls"), reply: Reply::Lines(LISTING) },
    Command { pattern: Pattern::Exact("dir"), reply: Reply::Lines(LISTING) },
    Command { pattern: Pattern::WithArg("ls "), reply: Reply::Lines(&["(empty)"]) },
    Command { pattern: Pattern::WithArg("cd "), reply: Reply::Lines(&["cd: no filesystem"]) },
    Command { pattern: Pattern::WithArg("mkdir "), reply: Reply::Lines(&["mkdir: read-only"]) },
    Command { pattern: Pattern::Exact("clear"), reply: Reply::Clear },
    Command { pattern: Pattern::Exact("wpm"), reply: Reply::CharsTyped },
    Command {
        pattern: Pattern::Exact("shutdown"),
        reply: Reply::Power(PowerRequest::Shutdown, "Shutting down..."),
    },
    Command {
        pattern: Pattern::Exact("reboot"),
        reply: Reply::Power(PowerRequest::Reboot, "Rebooting..."),
    },
];

/// Case-sensitive lookup. Callers handle the empty line themselves.
pub fn lookup(line: &str) -> Reply {
    COMMANDS
        .iter()
        .find(|cmd| cmd.pattern.matches(line))
        .map(|cmd| cmd.reply)
        .unwrap_or(Reply::NotFound)
}
