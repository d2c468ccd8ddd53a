/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      solver.rs
 * Purpose:   Adapter that runs a MazeScript program as a maze solver.
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

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::Block;
use crate::config::Config;
use crate::error::{ScriptError, ScriptResult};
use crate::interpreter::{run_program, OutputLog, Prelude};
use crate::lexer::tokenize_with;
use crate::maze::{Action, Cell, Direction, Maze, Path, Pos};
use crate::parser::parse;
use crate::value::Value;

/// Host state the adapter closures share during one solve.
struct SolverState {
    maze: Maze,
    position: Pos,
    path: Path,
}

impl SolverState {
    fn record(&mut self, action: Action) {
        tracing::trace!(?action, "solver action");
        self.path.push(action);
    }
}

/// A parsed solver program.
///
/// Each [`Solver::run`] evaluates the program again from a fresh global
/// frame, so top-level state never leaks between mazes. All runs append to
/// the same [`OutputLog`].
pub struct Solver {
    program: Block,
    config: Config,
    output: OutputLog,
}

/// Everything one solve produced.
///
/// The path is kept even when the program fails part-way, since actions
/// already recorded remain valid for replay.
#[derive(Debug)]
pub struct SolverRun {
    pub path: Path,
    pub outcome: ScriptResult<Value>,
}

/// Parses `source` as a solver with default settings.
///
/// Returns the solver together with the output log its runs write to.
pub fn evaluate_as_solver(source: &str) -> ScriptResult<(Solver, OutputLog)> {
    evaluate_as_solver_with(source, &Config::default())
}

pub fn evaluate_as_solver_with(source: &str, config: &Config) -> ScriptResult<(Solver, OutputLog)> {
    let program = parse(tokenize_with(source, config)?)?;
    let output = OutputLog::new();
    let solver = Solver {
        program,
        config: config.clone(),
        output: output.clone(),
    };
    Ok((solver, output))
}

impl Solver {
    /// Runs the program against `maze`, calling `main(goal_x, goal_y)`.
    #[tracing::instrument(level = "debug", skip_all, fields(width = maze.width(), height = maze.height()))]
    pub fn run(&self, maze: &Maze) -> SolverRun {
        let goal = maze.end();
        let state = Rc::new(RefCell::new(SolverState {
            maze: maze.clone(),
            position: maze.start(),
            path: Vec::new(),
        }));

        let outcome = run_program(&self.program, &self.config, self.output.clone(), adapter(&state))
            .and_then(|entry| entry.call(vec![Value::Integer(goal.x), Value::Integer(goal.y)]));

        let path = std::mem::take(&mut state.borrow_mut().path);
        tracing::debug!(actions = path.len(), ok = outcome.is_ok(), "solver finished");
        SolverRun { path, outcome }
    }

    /// Runs the program and returns its path, or the failure that stopped it.
    pub fn solve(&self, maze: &Maze) -> ScriptResult<Path> {
        let run = self.run(maze);
        run.outcome.map(|_| run.path)
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }
}

/// Direction constants plus closures over `state`.
///
/// | name       | arity | effect                                          |
/// |------------|-------|-------------------------------------------------|
/// | `get_x`    | 0     | current x                                       |
/// | `get_y`    | 0     | current y                                       |
/// | `in_bound` | 2     | `1` when `(x, y)` is inside the maze            |
/// | `is_wall`  | 2     | `1` for walls; records a lookup when in bounds  |
/// | `move`     | 1     | records a move and steps the position           |
fn adapter(state: &Rc<RefCell<SolverState>>) -> Prelude {
    let mut prelude = Prelude::new();

    for dir in Direction::ALL {
        prelude.insert(dir.name().to_string(), Value::Integer(dir.code()));
    }

    let s = Rc::clone(state);
    prelude.insert(
        "get_x".to_string(),
        Value::builtin("get_x", Some(0), move |_| {
            Ok(Some(Value::Integer(s.borrow().position.x)))
        }),
    );

    let s = Rc::clone(state);
    prelude.insert(
        "get_y".to_string(),
        Value::builtin("get_y", Some(0), move |_| {
            Ok(Some(Value::Integer(s.borrow().position.y)))
        }),
    );

    let s = Rc::clone(state);
    prelude.insert(
        "in_bound".to_string(),
        Value::builtin("in_bound", Some(2), move |args| {
            let pos = coordinates(&args, "in_bound")?;
            Ok(Some(Value::from_bool(s.borrow().maze.in_bounds(pos))))
        }),
    );

    let s = Rc::clone(state);
    prelude.insert(
        "is_wall".to_string(),
        Value::builtin("is_wall", Some(2), move |args| {
            let pos = coordinates(&args, "is_wall")?;
            let mut state = s.borrow_mut();
            match state.maze.cell(pos) {
                None => Ok(Some(Value::Integer(1))),
                Some(cell) => {
                    state.record(Action::Lookup { pos });
                    Ok(Some(Value::from_bool(cell == Cell::Wall)))
                }
            }
        }),
    );

    let s = Rc::clone(state);
    prelude.insert(
        "move".to_string(),
        Value::builtin("move", Some(1), move |args| {
            let code = args[0].as_int().ok_or_else(|| {
                ScriptError::type_error(format!(
                    "Invalid type '{}' in move function.",
                    args[0].type_name()
                ))
            })?;
            let dir = Direction::from_code(code).ok_or_else(|| {
                ScriptError::type_error(format!("Invalid direction '{}' in move function.", code))
            })?;

            let mut state = s.borrow_mut();
            state.record(Action::Move { dir });
            state.position = dir.step(state.position);
            Ok(None)
        }),
    );

    prelude
}

/// Reads `(x, y)` integer arguments.
fn coordinates(args: &[Value], function: &str) -> ScriptResult<Pos> {
    match (&args[0], &args[1]) {
        (Value::Integer(x), Value::Integer(y)) => Ok(Pos::new(*x, *y)),
        (x, y) => Err(ScriptError::type_error(format!(
            "Invalid types '{}', '{}' in {} function.",
            x.type_name(),
            y.type_name(),
            function
        ))),
    }
}
