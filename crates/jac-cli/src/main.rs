// -------------------------------------------------------------------------
// SPDX-FileCopyrightText: Copyright © 2025 The Typhon Project
// SPDX-FileName: crates/jac-cli/src/main.rs
// SPDX-FileType: SOURCE
// SPDX-License-Identifier: Apache-2.0
// -------------------------------------------------------------------------
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
// -------------------------------------------------------------------------
//! Jac CLI
//!
//! Command-line interface for the Jac-to-Python compiler. Every subcommand
//! that compiles a module reports diagnostics and writes (or prints)
//! generated Python; none of them spawn a Python interpreter to actually
//! run the result.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jac_compiler::driver::Driver;
use jac_compiler::schedule::Schedule;
use jac_runtime::hooks::HookRegistry;
use jac_source::diagnostic::DiagnosticSink;

mod error;

use error::CliError;

/// The Jac-to-Python compiler and tooling.
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,

    /// Show verbose output, including warnings alongside errors.
    #[clap(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a module and write its generated Python under `__jac_gen__`.
    Run {
        /// Path to the `.jac` entry-point file.
        input: PathBuf,
    },
    /// Compile a module interactively, same pipeline as `run`.
    Enter {
        /// Path to the `.jac` entry-point file.
        input: PathBuf,
    },
    /// Compile a module's tests, same pipeline as `run`.
    Test {
        /// Path to the `.jac` file containing tests.
        input: PathBuf,
    },
    /// Print a module's generated Python to stdout without writing it to disk.
    AstTool {
        /// Path to the `.jac` file to inspect.
        input: PathBuf,
    },
    /// Remove a module's generated `__jac_gen__` output, if present.
    Clean {
        /// Path to the `.jac` file whose output should be removed.
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Dispatches `args.command`. Returns `Ok(false)` when the module compiled
/// but reported diagnostics serious enough to treat the run as failed
/// (mirrors the schedules' own error/warning split, not a hard error).
fn run(args: &Args) -> Result<bool> {
    match &args.command {
        Command::Clean { input } => {
            jac_compiler::pyout::clean_generated(input)
                .map_err(|source| CliError::Clean { path: input.clone(), source })?;
            Ok(true)
        }
        Command::AstTool { input } => {
            let mut driver = Driver::with_hooks(default_hooks(), Box::new(jac_compiler::typecheck::NullTypeChecker));
            let outcome = driver
                .compile_file(Schedule::PyCodeGen, input)
                .map_err(|source| CliError::Compile { path: input.clone(), source })?;
            print!("{}", outcome.py_source);
            Ok(report_diagnostics(&outcome.diagnostics, args.verbose))
        }
        Command::Run { input } | Command::Enter { input } | Command::Test { input } => {
            let mut driver = Driver::with_hooks(default_hooks(), Box::new(jac_compiler::typecheck::NullTypeChecker));
            let outcome = driver
                .compile_file(Schedule::PyCompiler, input)
                .map_err(|source| CliError::Compile { path: input.clone(), source })?;
            let ok = report_diagnostics(&outcome.diagnostics, args.verbose);
            if let Some(path) = &outcome.output_path {
                println!("generated {}", path.display());
            }
            Ok(ok)
        }
    }
}

/// Prints every error, and every warning when `verbose`. Returns whether the
/// run should be treated as successful (no errors).
fn report_diagnostics(sink: &DiagnosticSink, verbose: bool) -> bool {
    if verbose {
        for warning in sink.warnings() {
            eprintln!("{warning}");
        }
    }
    for error in sink.errors() {
        eprintln!("{error}");
    }
    !sink.has_errors()
}

/// The hook registry backing a standalone CLI run. Bootstrap ships no
/// runtime library of its own, so every hook is marked available; a real
/// embedding would narrow this to whatever its runtime actually backs.
fn default_hooks() -> HookRegistry { HookRegistry::full() }
