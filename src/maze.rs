/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      maze.rs
 * Purpose:   Maze grids, solver actions, and path verification.
 * 
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * 
 * License:
 * This file is part of the MazeScript project.
 * 
 * MazeScript is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A grid coordinate. `x` grows rightwards, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i64,
    pub y: i64,
}

impl Pos {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// One of the four moves, with the integer codes scripts use.
///
/// | code | direction |
/// |------|-----------|
/// | 0    | right     |
/// | 1    | up        |
/// | 2    | left      |
/// | 3    | down      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    pub fn code(self) -> i64 {
        match self {
            Direction::Right => 0,
            Direction::Up => 1,
            Direction::Left => 2,
            Direction::Down => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Down => "down",
        }
    }

    /// The neighbouring position one step away.
    pub fn step(self, pos: Pos) -> Pos {
        match self {
            Direction::Right => Pos::new(pos.x + 1, pos.y),
            Direction::Up => Pos::new(pos.x, pos.y - 1),
            Direction::Left => Pos::new(pos.x - 1, pos.y),
            Direction::Down => Pos::new(pos.x, pos.y + 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Wall,
}

/// One recorded solver event.
///
/// ```json
/// {"type":"move","dir":"up"}
/// {"type":"lookup","pos":{"x":1,"y":2}}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Move { dir: Direction },
    Lookup { pos: Pos },
}

/// The ordered actions a solver performed.
pub type Path = Vec<Action>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze must have at least one row and one column")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized character {found:?} at row {row}, column {column}")]
    UnknownCell {
        found: char,
        row: usize,
        column: usize,
    },

    #[error("maze has more than one start")]
    DuplicateStart,

    #[error("maze has more than one end")]
    DuplicateEnd,

    #[error("maze has no start")]
    MissingStart,

    #[error("maze has no end")]
    MissingEnd,

    #[error("unrecognized move {0:?}; expected one of W, A, S, D")]
    UnknownMove(char),
}

/// Why a path does not solve a maze.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("step {step} moves into a wall at ({}, {})", .pos.x, .pos.y)]
    HitWall { step: usize, pos: Pos },

    #[error("step {step} leaves the maze at ({}, {})", .pos.x, .pos.y)]
    LeftMaze { step: usize, pos: Pos },

    #[error("step {step} looks up ({}, {}) outside the maze", .pos.x, .pos.y)]
    LookupOutOfBounds { step: usize, pos: Pos },

    #[error("path ends at ({}, {}) instead of the exit", .pos.x, .pos.y)]
    WrongEnd { pos: Pos },
}

/// A rectangular grid with one start and one end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    start: Pos,
    end: Pos,
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Maze {
    /// Builds a maze from text rows: `' '` empty, `'#'` wall, `'S'` start,
    /// `'E'` end. Start and end cells are empty.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MazeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if height == 0 || width == 0 {
            return Err(MazeError::Empty);
        }

        let mut start = None;
        let mut end = None;
        let mut cells = Vec::with_capacity(height);

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(MazeError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }

            let mut line = Vec::with_capacity(width);
            for (x, ch) in row.chars().enumerate() {
                let pos = Pos::new(x as i64, y as i64);
                let cell = match ch {
                    ' ' => Cell::Empty,
                    '#' => Cell::Wall,
                    'S' => {
                        if start.replace(pos).is_some() {
                            return Err(MazeError::DuplicateStart);
                        }
                        Cell::Empty
                    }
                    'E' => {
                        if end.replace(pos).is_some() {
                            return Err(MazeError::DuplicateEnd);
                        }
                        Cell::Empty
                    }
                    found => {
                        return Err(MazeError::UnknownCell {
                            found,
                            row: y,
                            column: x,
                        })
                    }
                };
                line.push(cell);
            }
            cells.push(line);
        }

        Ok(Self {
            start: start.ok_or(MazeError::MissingStart)?,
            end: end.ok_or(MazeError::MissingEnd)?,
            width,
            height,
            cells,
        })
    }

    /// Same as [`Maze::from_rows`], one row per line.
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = text.lines().collect();
        Self::from_rows(&rows)
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn end(&self) -> Pos {
        self.end
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.cell(pos).is_some()
    }

    /// The cell at `pos`, or `None` outside the grid.
    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        self.cells.get(y)?.get(x).copied()
    }

    /// Out-of-bounds positions count as walls.
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.cell(pos).map_or(true, |cell| cell == Cell::Wall)
    }
}

/// Replays `path` from the maze start.
///
/// # Errors
/// The first move into a wall or off the grid, the first lookup outside
/// the grid, or a final position other than the end.
pub fn verify_path(path: &[Action], maze: &Maze) -> Result<(), PathError> {
    let mut pos = maze.start();

    for (step, action) in path.iter().enumerate() {
        match *action {
            Action::Move { dir } => {
                pos = dir.step(pos);
                match maze.cell(pos) {
                    None => return Err(PathError::LeftMaze { step, pos }),
                    Some(Cell::Wall) => return Err(PathError::HitWall { step, pos }),
                    Some(Cell::Empty) => {}
                }
            }
            Action::Lookup { pos: target } => {
                if !maze.in_bounds(target) {
                    return Err(PathError::LookupOutOfBounds { step, pos: target });
                }
            }
        }
    }

    if pos == maze.end() {
        Ok(())
    } else {
        Err(PathError::WrongEnd { pos })
    }
}

/// Builds a move-only path: `W` up, `A` left, `S` down, `D` right.
pub fn parse_moves(text: &str) -> Result<Path, MazeError> {
    text.chars()
        .map(|ch| {
            let dir = match ch {
                'W' => Direction::Up,
                'A' => Direction::Left,
                'S' => Direction::Down,
                'D' => Direction::Right,
                other => return Err(MazeError::UnknownMove(other)),
            };
            Ok(Action::Move { dir })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn corridor() -> Maze {
        Maze::from_rows(&["S ###", "# ###", "#   #", "###E#"]).unwrap()
    }

    #[test]
    fn parses_rows() {
        let maze = corridor();
        assert_eq!(maze.start(), Pos::new(0, 0));
        assert_eq!(maze.end(), Pos::new(3, 3));
        assert_eq!((maze.width(), maze.height()), (5, 4));
        assert!(maze.is_wall(Pos::new(2, 0)));
        assert!(!maze.is_wall(Pos::new(1, 0)));
        assert!(maze.is_wall(Pos::new(-1, 0)));
        assert_eq!(maze.cell(Pos::new(5, 0)), None);
    }

    #[test]
    fn rejects_malformed_mazes() {
        let empty: [&str; 0] = [];
        assert_eq!(Maze::from_rows(&empty), Err(MazeError::Empty));
        assert_eq!(Maze::from_rows(&[""]), Err(MazeError::Empty));
        assert!(matches!(
            Maze::from_rows(&["S ", "E"]),
            Err(MazeError::Ragged { row: 1, .. })
        ));
        assert_eq!(Maze::from_rows(&["SSE"]), Err(MazeError::DuplicateStart));
        assert_eq!(Maze::from_rows(&["SEE"]), Err(MazeError::DuplicateEnd));
        assert_eq!(Maze::from_rows(&["  E"]), Err(MazeError::MissingStart));
        assert_eq!(Maze::from_rows(&["S  "]), Err(MazeError::MissingEnd));
        assert!(matches!(
            Maze::from_rows(&["S?E"]),
            Err(MazeError::UnknownCell { found: '?', .. })
        ));
    }

    #[test]
    fn verifies_paths() {
        let maze = corridor();
        assert_eq!(
            verify_path(&parse_moves("DSSDD").unwrap(), &maze),
            Err(PathError::WrongEnd { pos: Pos::new(3, 2) })
        );
        assert!(verify_path(&parse_moves("DSSDDS").unwrap(), &maze).is_ok());
        assert_eq!(
            verify_path(&parse_moves("S").unwrap(), &maze),
            Err(PathError::HitWall { step: 0, pos: Pos::new(0, 1) })
        );
        assert_eq!(
            verify_path(&parse_moves("W").unwrap(), &maze),
            Err(PathError::LeftMaze { step: 0, pos: Pos::new(0, -1) })
        );

        let lookup = vec![Action::Lookup { pos: Pos::new(9, 9) }];
        assert!(matches!(
            verify_path(&lookup, &maze),
            Err(PathError::LookupOutOfBounds { step: 0, .. })
        ));
    }

    #[test]
    fn moves_from_letters() {
        assert_eq!(
            parse_moves("WASD").unwrap(),
            vec![
                Action::Move { dir: Direction::Up },
                Action::Move { dir: Direction::Left },
                Action::Move { dir: Direction::Down },
                Action::Move { dir: Direction::Right },
            ]
        );
        assert_eq!(parse_moves("WX"), Err(MazeError::UnknownMove('X')));
    }

    #[test]
    fn actions_serialize_as_tagged_json() {
        let moved = serde_json::to_string(&Action::Move { dir: Direction::Up }).unwrap();
        assert_eq!(moved, r#"{"type":"move","dir":"up"}"#);

        let looked = serde_json::to_string(&Action::Lookup { pos: Pos::new(1, 2) }).unwrap();
        assert_eq!(looked, r#"{"type":"lookup","pos":{"x":1,"y":2}}"#);

        let back: Action = serde_json::from_str(&looked).unwrap();
        assert_eq!(back, Action::Lookup { pos: Pos::new(1, 2) });
    }

    #[test]
    fn direction_codes() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_code(dir.code()), Some(dir));
        }
        assert_eq!(Direction::from_code(4), None);
        assert_eq!(Direction::from_code(-1), None);
        assert_eq!(Direction::Up.step(Pos::new(2, 2)), Pos::new(2, 1));
    }
}
