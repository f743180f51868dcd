//! Parsing of the text commands accepted by [`super::Engine`].
//!
//! Parsing only splits the line into the command and its raw arguments.
//! Arguments are validated when the command is executed, so that the error
//! message can explain what exactly is wrong with them.

#[derive(Debug, PartialEq)]
pub(super) enum Command {
    /// `position startpos [moves ...]` or `position fen <placement> [...]
    /// [moves ...]`. `fen` is [`None`] for the starting position.
    SetPosition {
        fen: Option<String>,
        moves: Vec<String>,
    },
    /// `move e2e4`
    MakeMove(String),
    /// `moves <w|b>`
    GenerateMoves { color: String },
    /// `perft <w|b> <depth>`
    Perft { color: String, depth: String },
    /// `d`
    Display,
    /// `fen`
    Fen,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_setposition(parts: &[&str]) -> Option<Command> {
    let moves_index = parts.iter().position(|&x| x == "moves");
    let setup_end = moves_index.unwrap_or(parts.len());
    let fen = match parts.get(1) {
        Some(&"startpos") if setup_end == 2 => None,
        Some(&"fen") if setup_end > 2 => Some(parts[2..setup_end].join(" ")),
        _ => return None,
    };
    let moves = moves_index.map_or_else(Vec::new, |index| {
        parts[index + 1..]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    });
    Some(Command::SetPosition { fen, moves })
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let unknown = || Self::Unknown(input.trim().to_string());

        match parts.as_slice() {
            [] => Self::Empty,
            ["position", ..] => parse_setposition(&parts).unwrap_or_else(unknown),
            ["move", next_move] => Self::MakeMove((*next_move).to_string()),
            ["moves", color] => Self::GenerateMoves {
                color: (*color).to_string(),
            },
            ["perft", color, depth] => Self::Perft {
                color: (*color).to_string(),
                depth: (*depth).to_string(),
            },
            ["d"] => Self::Display,
            ["fen"] => Self::Fen,
            ["quit"] => Self::Quit,
            _ => unknown(),
        }
    }
}
