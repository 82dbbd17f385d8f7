//! Mill position representation and successor generation.
//!
//! This module provides the core game logic, including:
//! - Position state (cells, pieces left to place, side to move)
//! - Derived queries (phase, flying, winner)
//! - Successor generation across the place and play phases
//! - The capture sub-generator used whenever a mill is closed
//! - Validation of human moves against the generated successors
//!
//! A position is a plain value. Generation never touches `self`; every
//! successor is an independently owned clone.

use std::fmt;

use crate::board::{Color, Point, is_adjacent, is_mill_closed};
use crate::constants::{JUMP_THRESHOLD, LOSS_THRESHOLD, NUM_POINTS, PIECES_PER_SIDE, POINT_NAMES};

/// Game phase, derived from the pieces still to be placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// At least one side still has pieces in hand.
    Place,
    /// All pieces are on the board; pieces slide (or fly).
    Play,
}

/// Reason a proposed human move was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// A point index outside the board
    OutOfRange(usize),
    /// Destination is not empty
    Occupied,
    /// Source point does not hold a piece of the side to move
    NotOwnPiece,
    /// Play phase move without a source point
    MissingSource,
    /// Place phase move with a source point
    UnexpectedSource,
    /// Sliding move between non-adjacent points
    NotAdjacent,
    /// Move closes a mill but names nothing to capture
    CaptureRequired,
    /// Capture named on a move that closes no mill
    CaptureNotAllowed,
    /// Capture target is empty, own piece, or protected by a mill
    InvalidCapture,
    /// Resulting position is not among the legal successors
    Illegal,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfRange(pt) => write!(f, "illegal move: point {pt} is off the board"),
            MoveError::Occupied => write!(f, "illegal move: point not empty"),
            MoveError::NotOwnPiece => write!(f, "illegal move: no own piece on source point"),
            MoveError::MissingSource => write!(f, "illegal move: source point required"),
            MoveError::UnexpectedSource => write!(f, "illegal move: pieces are still being placed"),
            MoveError::NotAdjacent => write!(f, "illegal move: points are not adjacent"),
            MoveError::CaptureRequired => write!(f, "illegal move: mill closed, capture required"),
            MoveError::CaptureNotAllowed => write!(f, "illegal move: no mill closed"),
            MoveError::InvalidCapture => write!(f, "illegal move: piece cannot be captured"),
            MoveError::Illegal => write!(f, "illegal move"),
        }
    }
}

impl std::error::Error for MoveError {}

/// A move as entered by a player: optional source, destination and capture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Option<Point>,
    pub to: Point,
    pub capture: Option<Point>,
}

impl Move {
    /// Placement of a new piece.
    pub fn place(to: Point) -> Self {
        Self {
            from: None,
            to,
            capture: None,
        }
    }

    /// Slide or jump of a piece already on the board.
    pub fn shift(from: Point, to: Point) -> Self {
        Self {
            from: Some(from),
            to,
            capture: None,
        }
    }

    pub fn with_capture(mut self, capture: Point) -> Self {
        self.capture = Some(capture);
        self
    }

    /// Reconstruct the move leading from `before` to its successor `after`.
    ///
    /// A flying piece may land back on its own square. Such a successor is
    /// reported as a move with `from == to`, using the first own piece whose
    /// mill state matches the capture (a re-closed mill if something was
    /// taken). Returns `None` if `after` is not a successor of this kind.
    pub fn between(before: &Position, after: &Position) -> Option<Move> {
        let me = before.side_to_move;
        let enemy = me.opponent();
        let mut from = None;
        let mut to = None;
        let mut capture = None;
        for pt in 0..NUM_POINTS {
            match (before.cells[pt], after.cells[pt]) {
                (None, Some(c)) if c == me => to = Some(pt),
                (Some(c), None) if c == me => from = Some(pt),
                (Some(c), None) if c == enemy => capture = Some(pt),
                _ => {}
            }
        }
        match to {
            Some(to) => Some(Move { from, to, capture }),
            None => {
                let src = after
                    .points_of(me)
                    .find(|&pt| is_mill_closed(&after.cells, pt) == capture.is_some())?;
                Some(Move {
                    from: Some(src),
                    to: src,
                    capture,
                })
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(from) = self.from {
            write!(f, "{}-", str_point(from))?;
        }
        write!(f, "{}", str_point(self.to))?;
        if let Some(capture) = self.capture {
            write!(f, "x{}", str_point(capture))?;
        }
        Ok(())
    }
}

/// A Mill position.
///
/// Equality and hashing cover the whole state, so the same position reached
/// through different move orders compares equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    cells: [Option<Color>; NUM_POINTS],
    white_to_place: u8,
    black_to_place: u8,
    side_to_move: Color,
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl Position {
    /// Starting position: empty board, nine pieces each in hand, White to move.
    pub fn initial() -> Self {
        Self {
            cells: [None; NUM_POINTS],
            white_to_place: PIECES_PER_SIDE,
            black_to_place: PIECES_PER_SIDE,
            side_to_move: Color::White,
        }
    }

    /// Build an arbitrary position, e.g. for analysis or tests.
    pub fn from_parts(
        cells: [Option<Color>; NUM_POINTS],
        white_to_place: u8,
        black_to_place: u8,
        side_to_move: Color,
    ) -> Self {
        debug_assert!(white_to_place <= PIECES_PER_SIDE && black_to_place <= PIECES_PER_SIDE);
        Self {
            cells,
            white_to_place,
            black_to_place,
            side_to_move,
        }
    }

    #[inline]
    pub fn cells(&self) -> &[Option<Color>; NUM_POINTS] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, pt: Point) -> Option<Color> {
        self.cells[pt]
    }

    #[inline]
    pub fn current_color(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn enemy_color(&self) -> Color {
        self.side_to_move.opponent()
    }

    pub fn pieces_to_place(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white_to_place,
            Color::Black => self.black_to_place,
        }
    }

    pub fn pieces_on_board(&self, color: Color) -> u8 {
        self.cells.iter().filter(|&&c| c == Some(color)).count() as u8
    }

    /// Pieces on the board plus pieces still in hand.
    pub fn total_pieces(&self, color: Color) -> u8 {
        self.pieces_on_board(color) + self.pieces_to_place(color)
    }

    pub fn phase(&self) -> Phase {
        if self.white_to_place > 0 || self.black_to_place > 0 {
            Phase::Place
        } else {
            Phase::Play
        }
    }

    /// A side down to three pieces may fly to any empty point.
    pub fn can_jump(&self, color: Color) -> bool {
        self.total_pieces(color) < JUMP_THRESHOLD
    }

    /// The side that has won, if any.
    ///
    /// Only material is checked; a side without legal moves is not
    /// reported as lost here.
    pub fn winner(&self) -> Option<Color> {
        if self.total_pieces(Color::White) < LOSS_THRESHOLD {
            Some(Color::Black)
        } else if self.total_pieces(Color::Black) < LOSS_THRESHOLD {
            Some(Color::White)
        } else {
            None
        }
    }

    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..NUM_POINTS).filter(move |&pt| self.cells[pt].is_none())
    }

    pub fn points_of(&self, color: Color) -> impl Iterator<Item = Point> + '_ {
        (0..NUM_POINTS).filter(move |&pt| self.cells[pt] == Some(color))
    }

    fn use_placement(&mut self, color: Color) {
        let counter = match color {
            Color::White => &mut self.white_to_place,
            Color::Black => &mut self.black_to_place,
        };
        debug_assert!(*counter > 0, "{color} has no pieces left to place");
        *counter = counter.saturating_sub(1);
    }

    /// Generate every position reachable by one full move of the side to move.
    ///
    /// Successors come out in board order (source point, then destination,
    /// then capture target) and already have the opponent to move.
    pub fn generate_next_states(&self) -> Vec<Position> {
        let me = self.side_to_move;
        let mut states = Vec::new();

        match self.phase() {
            Phase::Place => {
                for dest in self.empty_points() {
                    let mut next = self.clone();
                    next.cells[dest] = Some(me);
                    next.use_placement(me);
                    next.push_or_capture(dest, &mut states);
                }
            }
            Phase::Play => {
                let jump = self.can_jump(me);
                for src in self.points_of(me) {
                    let mut lifted = self.clone();
                    lifted.cells[src] = None;
                    // `src` is empty in `lifted`, so a flying piece may land back on it.
                    for dest in lifted.empty_points() {
                        if !jump && !is_adjacent(src, dest) {
                            continue;
                        }
                        let mut next = lifted.clone();
                        next.cells[dest] = Some(me);
                        next.push_or_capture(dest, &mut states);
                    }
                }
            }
        }

        for state in &mut states {
            state.side_to_move = state.side_to_move.opponent();
        }
        states
    }

    /// Emit `self` unchanged, or all of its captures if the piece that just
    /// landed on `landed` closed a mill.
    fn push_or_capture(self, landed: Point, out: &mut Vec<Position>) {
        if is_mill_closed(&self.cells, landed) {
            out.extend(self.generate_captures());
        } else {
            out.push(self);
        }
    }

    /// Enemy points that may be captured: enemy pieces outside closed mills.
    pub fn capture_targets(&self) -> Vec<Point> {
        let enemy = self.enemy_color();
        self.points_of(enemy)
            .filter(|&pt| !is_mill_closed(&self.cells, pt))
            .collect()
    }

    /// All positions resulting from removing one capturable enemy piece.
    ///
    /// Empty when every enemy piece sits in a closed mill.
    pub fn generate_captures(&self) -> Vec<Position> {
        self.capture_targets()
            .into_iter()
            .map(|pt| {
                let mut next = self.clone();
                next.cells[pt] = None;
                next
            })
            .collect()
    }

    /// Whether moving a piece from `from` (or placing one, if `None`) to `to`
    /// would close a mill for the side to move. No legality checks.
    pub fn closes_mill(&self, from: Option<Point>, to: Point) -> bool {
        let mut cells = self.cells;
        if let Some(from) = from {
            cells[from] = None;
        }
        cells[to] = Some(self.side_to_move);
        is_mill_closed(&cells, to)
    }

    /// Apply a human move, returning the resulting position.
    ///
    /// The result is accepted only if it is one of `generate_next_states()`.
    pub fn apply_move(&self, mv: &Move) -> Result<Position, MoveError> {
        for pt in [mv.from, Some(mv.to), mv.capture].into_iter().flatten() {
            if pt >= NUM_POINTS {
                return Err(MoveError::OutOfRange(pt));
            }
        }

        let me = self.side_to_move;
        let mut next = self.clone();
        match self.phase() {
            Phase::Place => {
                if mv.from.is_some() {
                    return Err(MoveError::UnexpectedSource);
                }
                if self.cells[mv.to].is_some() {
                    return Err(MoveError::Occupied);
                }
                next.cells[mv.to] = Some(me);
                next.use_placement(me);
            }
            Phase::Play => {
                let from = mv.from.ok_or(MoveError::MissingSource)?;
                if self.cells[from] != Some(me) {
                    return Err(MoveError::NotOwnPiece);
                }
                next.cells[from] = None;
                if next.cells[mv.to].is_some() {
                    return Err(MoveError::Occupied);
                }
                if !self.can_jump(me) && !is_adjacent(from, mv.to) {
                    return Err(MoveError::NotAdjacent);
                }
                next.cells[mv.to] = Some(me);
            }
        }

        if is_mill_closed(&next.cells, mv.to) {
            let target = mv.capture.ok_or(MoveError::CaptureRequired)?;
            if next.cells[target] != Some(me.opponent()) || is_mill_closed(&next.cells, target) {
                return Err(MoveError::InvalidCapture);
            }
            next.cells[target] = None;
        } else if mv.capture.is_some() {
            return Err(MoveError::CaptureNotAllowed);
        }
        next.side_to_move = me.opponent();

        if self.generate_next_states().contains(&next) {
            Ok(next)
        } else {
            Err(MoveError::Illegal)
        }
    }
}

/// Parse a point name such as `"d6"` (case-insensitive).
pub fn parse_point(s: &str) -> Option<Point> {
    let s = s.trim();
    POINT_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(s))
}

/// Name of a point, e.g. `"a7"` for 0.
pub fn str_point(pt: Point) -> &'static str {
    POINT_NAMES[pt]
}

/// Board drawing; each `*` is replaced by the next point in index order.
const BOARD_TEMPLATE: &str = "\
7 *-----------*-----------*
  |           |           |
6 |   *-------*-------*   |
  |   |       |       |   |
5 |   |   *---*---*   |   |
  |   |   |       |   |   |
4 *---*---*       *---*---*
  |   |   |       |   |   |
3 |   |   *---*---*   |   |
  |   |       |       |   |
2 |   *-------*-------*   |
  |           |           |
1 *-----------*-----------*
  a   b   c   d   e   f   g";

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells = self.cells.iter();
        for ch in BOARD_TEMPLATE.chars() {
            if ch == '*' {
                let symbol = match cells.next() {
                    Some(Some(color)) => color.symbol(),
                    _ => '.',
                };
                write!(f, "{symbol}")?;
            } else {
                write!(f, "{ch}")?;
            }
        }
        writeln!(f)?;
        match self.phase() {
            Phase::Place => writeln!(
                f,
                "{} to move (place: White {} / Black {} in hand)",
                self.side_to_move, self.white_to_place, self.black_to_place
            ),
            Phase::Play => writeln!(f, "{} to move (play)", self.side_to_move),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_pieces(white: &[Point], black: &[Point], side: Color) -> Position {
        let mut cells = [None; NUM_POINTS];
        for &pt in white {
            cells[pt] = Some(Color::White);
        }
        for &pt in black {
            cells[pt] = Some(Color::Black);
        }
        Position::from_parts(cells, 0, 0, side)
    }

    #[test]
    fn test_initial_position() {
        let pos = Position::initial();
        assert_eq!(pos.empty_points().count(), NUM_POINTS);
        assert_eq!(pos.phase(), Phase::Place);
        assert_eq!(pos.current_color(), Color::White);
        assert_eq!(pos.total_pieces(Color::White), 9);
        assert_eq!(pos.winner(), None);
    }

    #[test]
    fn test_initial_successors() {
        let states = Position::initial().generate_next_states();
        assert_eq!(states.len(), 24);
        for (pt, s) in states.iter().enumerate() {
            assert_eq!(s.cell(pt), Some(Color::White));
            assert_eq!(s.pieces_to_place(Color::White), 8);
            assert_eq!(s.pieces_to_place(Color::Black), 9);
            assert_eq!(s.current_color(), Color::Black);
        }
    }

    #[test]
    fn test_place_closing_mill_captures() {
        // White a7 d7, Black b6 d6; White to place on g7 closes the top row.
        let mut cells = [None; NUM_POINTS];
        cells[0] = Some(Color::White);
        cells[1] = Some(Color::White);
        cells[3] = Some(Color::Black);
        cells[4] = Some(Color::Black);
        let pos = Position::from_parts(cells, 7, 7, Color::White);

        let states = pos.generate_next_states();
        let mill: Vec<_> = states
            .iter()
            .filter(|s| s.cell(2) == Some(Color::White))
            .collect();
        assert_eq!(mill.len(), 2);
        assert!(mill.iter().all(|s| s.pieces_on_board(Color::Black) == 1));
        // 19 quiet placements plus two captures from g7.
        assert_eq!(states.len(), 19 + 2);
    }

    #[test]
    fn test_adjacent_moves_only() {
        let pos = with_pieces(&[0, 4, 8, 21], &[2, 14, 23, 19], Color::White);
        assert!(!pos.can_jump(Color::White));
        let states = pos.generate_next_states();
        for s in &states {
            let mv = Move::between(&pos, s).expect("piece moved");
            let from = mv.from.expect("play phase move has a source");
            assert!(is_adjacent(from, mv.to));
        }
    }

    #[test]
    fn test_jump_includes_self_move() {
        let pos = with_pieces(&[0, 4, 8], &[2, 14, 23, 19], Color::White);
        assert!(pos.can_jump(Color::White));
        let states = pos.generate_next_states();
        // The unchanged board, handed to Black, is a successor.
        let mut noop = pos.clone();
        noop.side_to_move = Color::Black;
        assert!(states.contains(&noop));
        // 3 pieces x 18 destinations (17 empty + own vacated square), no mills.
        assert_eq!(states.len(), 3 * 18);
    }

    #[test]
    fn test_mill_locked_enemy_blocks_capture() {
        // Black's only pieces form the bottom mill; White closes a mill by sliding.
        let pos = with_pieces(&[0, 1, 14, 9, 10], &[21, 22, 23], Color::White);
        // g4-g7 closes a7-d7-g7 but nothing can be taken.
        assert!(pos.closes_mill(Some(14), 2));
        let states = pos.generate_next_states();
        assert!(!states.is_empty());
        assert!(
            states
                .iter()
                .all(|s| [0, 1, 2].iter().any(|&pt| s.cell(pt) != Some(Color::White)))
        );
    }

    #[test]
    fn test_capture_targets_skip_mills() {
        let pos = with_pieces(&[0, 1, 5], &[21, 22, 23, 3], Color::White);
        assert_eq!(pos.capture_targets(), vec![3]);
    }

    #[test]
    fn test_winner() {
        let pos = with_pieces(&[0, 1], &[21, 22, 23], Color::Black);
        assert_eq!(pos.winner(), Some(Color::Black));
        let pos = with_pieces(&[0, 1, 2], &[21, 22], Color::White);
        assert_eq!(pos.winner(), Some(Color::White));
    }

    #[test]
    fn test_apply_move_place() {
        let pos = Position::initial();
        let next = pos.apply_move(&Move::place(4)).expect("legal placement");
        assert_eq!(next.cell(4), Some(Color::White));
        assert_eq!(next.current_color(), Color::Black);
        assert_eq!(next.apply_move(&Move::place(4)), Err(MoveError::Occupied));
        assert_eq!(next.apply_move(&Move::shift(4, 1)), Err(MoveError::UnexpectedSource));
    }

    #[test]
    fn test_apply_move_capture_rules() {
        let pos = with_pieces(&[0, 1, 14, 9], &[3, 4, 21, 22, 23], Color::White);
        assert_eq!(pos.apply_move(&Move::shift(14, 2)), Err(MoveError::CaptureRequired));
        assert_eq!(
            pos.apply_move(&Move::shift(14, 2).with_capture(21)),
            Err(MoveError::InvalidCapture)
        );
        let next = pos
            .apply_move(&Move::shift(14, 2).with_capture(3))
            .expect("capture outside mill");
        assert_eq!(next.cell(3), None);
        assert_eq!(
            pos.apply_move(&Move::shift(9, 10).with_capture(3)),
            Err(MoveError::CaptureNotAllowed)
        );
        assert_eq!(pos.apply_move(&Move::shift(9, 11)), Err(MoveError::NotAdjacent));
        assert_eq!(pos.apply_move(&Move::shift(3, 10)), Err(MoveError::NotOwnPiece));
    }

    #[test]
    fn test_move_between_and_display() {
        let pos = with_pieces(&[0, 1, 14, 9], &[3, 4, 21, 22, 23], Color::White);
        let mv = Move::shift(14, 2).with_capture(3);
        let next = pos.apply_move(&mv).expect("legal");
        assert_eq!(Move::between(&pos, &next), Some(mv));
        assert_eq!(mv.to_string(), "g4-g7xb6");
        assert_eq!(Move::place(7).to_string(), "d5");
    }

    #[test]
    fn test_move_between_in_place_capture() {
        // White a7-d7-g7 is a mill and White flies with three pieces, so each
        // piece may land back on its own square and take again.
        let pos = with_pieces(&[0, 1, 2], &[3, 4, 9, 10], Color::White);
        let in_place: Vec<_> = pos
            .generate_next_states()
            .into_iter()
            .filter(|s| s.points_of(Color::White).eq([0, 1, 2]))
            .collect();
        // Three sources times four black targets.
        assert_eq!(in_place.len(), 12);
        for s in &in_place {
            let mv = Move::between(&pos, s).expect("in-place capture is reported");
            assert_eq!(mv.from, Some(mv.to));
            let capture = mv.capture.expect("capture is kept");
            assert_eq!(s.cell(capture), None);
            assert_eq!(pos.cell(capture), Some(Color::Black));
            assert_eq!(pos.apply_move(&mv).as_ref(), Ok(s));
        }
        let mv = Move::between(&pos, &in_place[0]).expect("in-place capture");
        assert_eq!(mv.to_string(), "a7-a7xb6");
    }

    #[test]
    fn test_point_names_roundtrip() {
        for pt in 0..NUM_POINTS {
            assert_eq!(parse_point(str_point(pt)), Some(pt));
        }
        assert_eq!(parse_point("D6"), Some(4));
        assert_eq!(parse_point("d4"), None);
        assert_eq!(parse_point("h1"), None);
    }

    #[test]
    fn test_display_counts_symbols() {
        let pos = with_pieces(&[0, 1], &[23], Color::White);
        let text = pos.to_string();
        assert_eq!(text.matches('W').count(), 1 + 2); // "White to move" + two pieces
        assert!(text.starts_with("7 W-----------W-----------."));
    }
}
