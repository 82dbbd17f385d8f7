//! Text command session for a human playing against the engine.
//!
//! Each input line is a command followed by point names:
//!
//! - `place <p>` - Place a piece (opening phase)
//! - `move <from> <to>` - Slide or fly a piece
//! - `take <p>` - Capture after closing a mill
//! - `moves` - List the legal moves
//! - `show` - Print the board
//! - `new` - Start a new game
//! - `help` - List the commands
//! - `quit` - Exit
//!
//! After every accepted human move the computer replies immediately.
//!
//! ## Example
//!
//! ```ignore
//! use mill_rust::board::Color;
//! use mill_rust::game::GameSession;
//! use mill_rust::search::MoveSelector;
//! let mut session = GameSession::new(Color::White, MoveSelector::new(1));
//! session.run()?;
//! ```

use std::io::{self, BufRead, Write};

use log::info;

use crate::board::Color;
use crate::position::{Move, MoveError, Position, parse_point, str_point};
use crate::search::MoveSelector;

/// The list of known session commands.
const KNOWN_COMMANDS: &[&str] = &["help", "move", "moves", "new", "place", "quit", "show", "take"];

/// Result of a finished game, or `None` while it is in progress.
///
/// On top of [`Position::winner`], a side to move without any legal
/// successor loses.
pub fn game_result(pos: &Position) -> Option<Color> {
    pos.winner().or_else(|| {
        if pos.generate_next_states().is_empty() {
            Some(pos.enemy_color())
        } else {
            None
        }
    })
}

/// Game session state.
pub struct GameSession {
    /// Current game position
    pos: Position,
    /// Side played by the human
    human: Color,
    /// Selector used for the computer's moves
    selector: MoveSelector,
    /// Mill-closing move waiting for a `take`
    pending: Option<Move>,
}

impl GameSession {
    /// Start a game. If the computer has the first move it is played right away.
    pub fn new(human: Color, selector: MoveSelector) -> Self {
        let mut session = Self {
            pos: Position::initial(),
            human,
            selector,
            pending: None,
        };
        session.computer_reply();
        session
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn pending_capture(&self) -> Option<Move> {
        self.pending
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        writeln!(stdout, "{}", self.pos)?;
        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            writeln!(stdout, "{prefix} {message}")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "help" => (true, KNOWN_COMMANDS.join(" ")),

            "quit" => (true, String::new()),

            "show" => (true, self.pos.to_string()),

            "new" => {
                self.pos = Position::initial();
                self.pending = None;
                let reply = self.computer_reply();
                (true, format!("{reply}{}", self.pos))
            }

            "moves" => {
                let moves: Vec<String> = self
                    .pos
                    .generate_next_states()
                    .iter()
                    .filter_map(|next| Move::between(&self.pos, next))
                    .map(|mv| mv.to_string())
                    .collect();
                (true, moves.join(" "))
            }

            "place" | "move" => {
                if let Some(winner) = game_result(&self.pos) {
                    return (false, format!("game over, {winner} won"));
                }
                if let Some(pending) = self.pending {
                    return (false, format!("{pending} closed a mill, take a piece first"));
                }
                let points = match parse_points(args) {
                    Ok(points) => points,
                    Err(message) => return (false, message),
                };
                let mv = match (command, points.as_slice()) {
                    ("place", [to]) => Move::place(*to),
                    ("move", [from, to]) => Move::shift(*from, *to),
                    _ => return (false, "wrong number of points".to_string()),
                };
                self.submit(mv)
            }

            "take" => {
                let Some(pending) = self.pending else {
                    return (false, "nothing to take".to_string());
                };
                let target = match parse_points(args).as_deref() {
                    Ok([target]) => *target,
                    Ok(_) => return (false, "wrong number of points".to_string()),
                    Err(message) => return (false, message.clone()),
                };
                self.submit(pending.with_capture(target))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn submit(&mut self, mv: Move) -> (bool, String) {
        match self.pos.apply_move(&mv) {
            Ok(next) => {
                self.pending = None;
                info!("human plays {mv}");
                self.pos = next;
                let reply = self.computer_reply();
                (true, format!("{reply}{}", self.pos))
            }
            Err(MoveError::CaptureRequired) => {
                let targets = self.pos.capture_targets();
                if targets.is_empty() {
                    return (false, "mill closed but no piece can be taken".to_string());
                }
                self.pending = Some(mv);
                let names: Vec<&str> = targets.into_iter().map(str_point).collect();
                (true, format!("mill! take one of: {}", names.join(" ")))
            }
            Err(err) => (false, err.to_string()),
        }
    }

    /// Let the computer move if it is its turn. Returns a line describing
    /// what happened (empty if nothing did).
    fn computer_reply(&mut self) -> String {
        if let Some(winner) = game_result(&self.pos) {
            return format!("game over, {winner} won\n");
        }
        if self.pos.current_color() == self.human {
            return String::new();
        }
        let Some(next) = self.selector.select(&self.pos) else {
            return String::new();
        };
        let description = Move::between(&self.pos, &next)
            .map(|mv| mv.to_string())
            .unwrap_or_else(|| "-".to_string());
        info!("computer plays {description}");
        self.pos = next;

        let mut message = format!("computer plays {description}\n");
        if let Some(winner) = game_result(&self.pos) {
            message.push_str(&format!("game over, {winner} won\n"));
        }
        message
    }
}

fn parse_points(args: &[&str]) -> Result<Vec<usize>, String> {
    args.iter()
        .map(|arg| parse_point(arg).ok_or_else(|| format!("invalid point: {arg}")))
        .collect()
}
