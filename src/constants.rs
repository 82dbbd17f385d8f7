//! Board topology and engine parameters.
//!
//! The 24 intersections are numbered row by row from the top of the board,
//! left to right:
//!
//! ```text
//! 0-----------1-----------2
//! |           |           |
//! |   3-------4-------5   |
//! |   |       |       |   |
//! |   |   6---7---8   |   |
//! |   |   |       |   |   |
//! 9---10--11      12--13--14
//! |   |   |       |   |   |
//! |   |   15--16--17  |   |
//! |   |       |       |   |
//! |   18------19------20  |
//! |           |           |
//! 21----------22----------23
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of intersections on the board.
pub const NUM_POINTS: usize = 24;

/// Number of three-in-a-row lines.
pub const NUM_MILLS: usize = 16;

/// Number of adjacency edges.
pub const NUM_CONNECTIONS: usize = 32;

/// Every mill line as a triple of intersection indices.
pub const MILLS: [[usize; 3]; NUM_MILLS] = [
    // Horizontal
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [9, 10, 11],
    [12, 13, 14],
    [15, 16, 17],
    [18, 19, 20],
    [21, 22, 23],
    // Vertical
    [0, 9, 21],
    [3, 10, 18],
    [6, 11, 15],
    [1, 4, 7],
    [16, 19, 22],
    [8, 12, 17],
    [5, 13, 20],
    [2, 14, 23],
];

/// Undirected adjacency edges used by non-jump moves.
pub const CONNECTIONS: [(usize, usize); NUM_CONNECTIONS] = [
    // Horizontal
    (0, 1),
    (1, 2),
    (3, 4),
    (4, 5),
    (6, 7),
    (7, 8),
    (9, 10),
    (10, 11),
    (12, 13),
    (13, 14),
    (15, 16),
    (16, 17),
    (18, 19),
    (19, 20),
    (21, 22),
    (22, 23),
    // Vertical
    (0, 9),
    (9, 21),
    (3, 10),
    (10, 18),
    (6, 11),
    (11, 15),
    (1, 4),
    (4, 7),
    (16, 19),
    (19, 22),
    (8, 12),
    (12, 17),
    (5, 13),
    (13, 20),
    (2, 14),
    (14, 23),
];

/// Algebraic names of the intersections, indexed like the board.
pub const POINT_NAMES: [&str; NUM_POINTS] = [
    "a7", "d7", "g7", //
    "b6", "d6", "f6", //
    "c5", "d5", "e5", //
    "a4", "b4", "c4", "e4", "f4", "g4", //
    "c3", "d3", "e3", //
    "b2", "d2", "f2", //
    "a1", "d1", "g1",
];

// =============================================================================
// Rules
// =============================================================================

/// Pieces each side places during the opening.
pub const PIECES_PER_SIDE: u8 = 9;

/// A side whose total piece count falls below this may fly (jump anywhere).
pub const JUMP_THRESHOLD: u8 = 4;

/// A side whose total piece count falls below this has lost.
pub const LOSS_THRESHOLD: u8 = 3;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default recursion depth for the move selector (0 looks one ply ahead).
pub const DEFAULT_DEPTH: u32 = 1;

/// Default ply cap for self-play games.
pub const MAX_GAME_PLIES: usize = 200;
