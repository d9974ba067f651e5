// -------------------------------------------------------------------------
// SPDX-FileCopyrightText: Copyright © 2025 The Typhon Project
// SPDX-FileName: crates/jac-runtime/src/lib.rs
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
//! Data-spatial runtime hook surface for generated Jac-to-Python code.
//!
//! Generated Python code never reimplements graph traversal, edge creation,
//! or walker scheduling inline — it calls back into this surface. This
//! crate doesn't execute Python; it defines the hook contract
//! ([`hooks::HookSpec`]) and the registry the code generator consults to
//! decide whether a given data-spatial construct has a hook to call
//! ([`hooks::HookRegistry`]).

pub mod errors;
pub mod hooks;

/// Version of the hook surface, exposed so generated code can assert
/// compatibility with the runtime library it's paired with.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
