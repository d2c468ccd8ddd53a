/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      main.rs
 * Purpose:   Command-line runner for MazeScript programs and solvers.
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

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use mazescript::diagnostics::DiagnosticPrinter;
use mazescript::globals::solver::evaluate_as_solver_with;
use mazescript::maze::{verify_path, Action, Maze};
use mazescript::{evaluate_with, Config, OutputLog, Prelude, ScriptError, Value};

/// MazeScript is a small sandboxed language for writing custom maze
/// solvers.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Settings {
    /// JSON file with `tab_size`, `print_depth`, and `max_call_depth`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the tab stop width used for columns.
    #[arg(long, global = true)]
    tab_size: Option<usize>,

    /// Overrides how deep `print` descends into nested arrays.
    #[arg(long, global = true)]
    print_depth: Option<usize>,

    /// Overrides the nested call limit.
    #[arg(long, global = true)]
    max_call_depth: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs a program and calls its `main` with integer arguments.
    Run {
        file: PathBuf,

        #[arg(allow_negative_numbers = true)]
        args: Vec<i64>,
    },

    /// Runs a solver program against a maze file and prints the JSON report.
    Solve { program: PathBuf, maze: PathBuf },
}

#[derive(Serialize)]
struct SolveReport {
    verified: bool,
    error: Option<String>,
    output: Vec<String>,
    path: Vec<Action>,
}

static TRACING_INIT: Once = Once::new();

/// Enable with `RUST_LOG=mazescript=debug` or `RUST_LOG=mazescript=trace`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let config = match load_config(&cli.settings) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Command::Run { file, args } => run(file, args, &config),
        Command::Solve { program, maze } => solve(program, maze, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("{message}");
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(settings: &Settings) -> Result<Config, String> {
    let mut config = match &settings.config {
        Some(path) => Config::load(path)
            .map_err(|e| format!("Failed to read config '{}': {e}", path.display()))?,
        None => Config::default(),
    };

    if let Some(tab_size) = settings.tab_size {
        config = config.with_tab_size(tab_size);
    }
    if let Some(print_depth) = settings.print_depth {
        config = config.with_print_depth(print_depth);
    }
    if let Some(max_call_depth) = settings.max_call_depth {
        config = config.with_max_call_depth(max_call_depth);
    }

    Ok(config)
}

fn read(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|_| {
        format!(
            "Failed to read the input file '{}'. Perhaps this file does not exist?",
            path.display()
        )
    })
}

/// Prints the diagnostic and returns an empty message, since the
/// diagnostic already explains the failure.
fn report(file: &Path, source: &str, config: &Config, error: &ScriptError) -> String {
    DiagnosticPrinter::new(file.display().to_string(), source)
        .with_tab_size(config.tab_size)
        .print(error);
    String::new()
}

fn run(file: &Path, args: &[i64], config: &Config) -> Result<(), String> {
    let source = read(file)?;
    let output = OutputLog::new();

    let outcome = evaluate_with(&source, config, output.clone(), Prelude::new()).and_then(|entry| {
        entry.call(args.iter().copied().map(Value::Integer).collect())
    });

    for line in output.lines() {
        println!("{line}");
    }

    match outcome {
        Ok(value) => {
            println!("=> {value}");
            Ok(())
        }
        Err(error) => Err(report(file, &source, config, &error)),
    }
}

fn solve(program: &Path, maze_file: &Path, config: &Config) -> Result<(), String> {
    let source = read(program)?;
    let maze = Maze::parse(&read(maze_file)?)
        .map_err(|e| format!("Invalid maze '{}': {e}", maze_file.display()))?;

    let (solver, output) = evaluate_as_solver_with(&source, config)
        .map_err(|error| report(program, &source, config, &error))?;

    let run = solver.run(&maze);
    let error = match &run.outcome {
        Ok(_) => None,
        Err(error) => {
            report(program, &source, config, error);
            Some(error.to_string())
        }
    };

    let report = SolveReport {
        verified: error.is_none() && verify_path(&run.path, &maze).is_ok(),
        error,
        output: output.lines(),
        path: run.path,
    };

    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{json}");

    if report.verified {
        Ok(())
    } else {
        Err(String::new())
    }
}
