// -------------------------------------------------------------------------
// SPDX-FileCopyrightText: Copyright © 2025 The Typhon Project
// SPDX-FileName: crates/jac-cli/src/error.rs
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
//! Errors the CLI itself can raise, as opposed to diagnostics about the Jac
//! program it's compiling.
//!
//! Every subcommand handler returns [`anyhow::Result`] at the call site
//! (`main` only needs to print and set an exit code, it never matches on
//! *which* error occurred), but each fallible operation the CLI owns
//! directly — as opposed to bubbling up a [`jac_compiler::CompileError`]
//! unchanged — is still a named variant here rather than an ad hoc string,
//! so a future caller that *does* need to match on failure kind can.

use std::path::PathBuf;

use thiserror::Error;

/// A CLI-level failure.
#[derive(Debug, Error)]
pub enum CliError {
    /// The compiler pipeline itself failed; see the wrapped error for detail.
    #[error("failed to compile {path}: {source}")]
    Compile {
        path: PathBuf,
        #[source]
        source: jac_compiler::CompileError,
    },
    /// Removing a module's generated output failed.
    #[error("failed to clean generated output for {path}: {source}")]
    Clean {
        path: PathBuf,
        #[source]
        source: jac_compiler::CompileError,
    },
}
