// -------------------------------------------------------------------------
// SPDX-FileCopyrightText: Copyright © 2025 The Typhon Project
// SPDX-FileName: crates/jac-compiler/src/driver/mod.rs
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
//! Compiler driver module.
//!
//! [`Driver`] is the facade `jac-cli` drives: it owns the pieces a schedule
//! run needs beyond the module being compiled (which hooks the configured
//! runtime backs, which type checker to delegate to) so a caller running
//! many files doesn't have to thread them through by hand.

use std::path::Path;

use jac_runtime::hooks::HookRegistry;

use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::schedule::{self, CompileOutcome, Schedule};
use crate::typecheck::{NullTypeChecker, TypeChecker};

/// Compiler driver responsible for coordinating the compilation pipeline.
pub struct Driver {
    config: CompilerConfig,
    hooks: HookRegistry,
    type_checker: Box<dyn TypeChecker>,
}

impl Default for Driver {
    fn default() -> Self { Self::new() }
}

impl Driver {
    /// Creates a driver backed by the full bootstrap hook surface, default
    /// configuration, and no real type checker.
    #[must_use]
    pub fn new() -> Self {
        Self { config: CompilerConfig::default(), hooks: HookRegistry::full(), type_checker: Box::new(NullTypeChecker) }
    }

    /// Creates a driver backed by `hooks` and `type_checker`, for a caller
    /// wiring in a runtime library that doesn't back every hook, or a real
    /// type-checking tool. Uses default configuration; see
    /// [`Driver::with_config`] to also override that.
    #[must_use]
    pub fn with_hooks(hooks: HookRegistry, type_checker: Box<dyn TypeChecker>) -> Self {
        Self { config: CompilerConfig::default(), hooks, type_checker }
    }

    /// Creates a driver backed by `config`, `hooks`, and `type_checker`.
    #[must_use]
    pub fn with_config(config: CompilerConfig, hooks: HookRegistry, type_checker: Box<dyn TypeChecker>) -> Self {
        Self { config, hooks, type_checker }
    }

    /// Compiles the module at `path` under `schedule`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] on any fatal pipeline failure; see
    /// [`schedule::run`].
    pub fn compile_file(&mut self, schedule: Schedule, path: &Path) -> Result<CompileOutcome, CompileError> {
        schedule::run(schedule, path, &self.config, &self.hooks, self.type_checker.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_compiles_a_minimal_module() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("foo.jac");
        std::fs::write(&path, "object Foo {}\n").expect("write source");

        let mut driver = Driver::new();
        let outcome = driver.compile_file(Schedule::PyCodeGen, &path).expect("compiles");
        assert!(outcome.py_source.contains("class Foo"));
    }
}
