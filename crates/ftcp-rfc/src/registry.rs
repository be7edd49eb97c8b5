// FTCP - File Transfer Communication Protocol
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Named compliance checks.
//!
//! Checks are plain functions looked up by the name written in the
//! metadata file. The registry is built explicitly; nothing is discovered
//! at runtime.

use std::collections::BTreeMap;

/// A zero-argument compliance check. `true` means the requirement holds.
pub type Check = fn() -> bool;

/// Checks shipped with the tool.
pub mod checks {
    /// Always passes.
    pub fn test_true() -> bool {
        true
    }

    /// Always fails.
    pub fn test_false() -> bool {
        false
    }
}

/// Mapping from check name to check function.
///
/// `Default` gives an empty registry; use [`CheckRegistry::builtin`] for the
/// shipped checks.
#[derive(Debug, Clone, Default)]
pub struct CheckRegistry {
    checks: BTreeMap<String, Check>,
}

impl CheckRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with the built-in checks.
    pub fn builtin() -> Self {
        Self::new()
            .with("test_true", checks::test_true)
            .with("test_false", checks::test_false)
    }

    /// Registers `check` under `name`, returning any check it replaced.
    pub fn register(&mut self, name: impl Into<String>, check: Check) -> Option<Check> {
        self.checks.insert(name.into(), check)
    }

    /// Builder form of [`CheckRegistry::register`].
    pub fn with(mut self, name: impl Into<String>, check: Check) -> Self {
        self.register(name, check);
        self
    }

    /// Looks up a check by name.
    pub fn resolve(&self, name: &str) -> Option<Check> {
        self.checks.get(name).copied()
    }

    /// Whether a check named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.checks.keys().map(String::as_str)
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no check is registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
