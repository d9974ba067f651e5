// -------------------------------------------------------------------------
// SPDX-FileCopyrightText: Copyright © 2025 The Typhon Project
// SPDX-FileName: crates/jac-compiler/src/lib.rs
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
//! The Jac-to-Python compiler: the analyzer's five passes plus code
//! generation, optional type checking, and output, composed into the named
//! schedules `SPEC_FULL.md` §6 specifies.
//!
//! Parsing and semantic analysis live upstream, in `jac-parser` and
//! `jac-analyzer`; this crate is everything downstream of a fully-analyzed
//! `AST`: [`codegen`] lowers it to Python text, [`typecheck`] optionally
//! delegates that text to an external checker, [`pyout`] writes it to disk,
//! [`schedule`] wires the three together, and [`driver`] is the facade
//! `jac-cli` drives.

/// Version of the Jac-to-Python compiler.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod codegen;
pub mod config;
pub mod driver;
pub mod error;
pub mod pyout;
pub mod schedule;
pub mod typecheck;

pub use config::CompilerConfig;
pub use driver::Driver;
pub use error::CompileError;
pub use schedule::{CompileOutcome, Schedule};
