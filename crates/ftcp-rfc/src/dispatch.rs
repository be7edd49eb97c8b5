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

//! Resolving and running the check named by each test row.

use crate::error::{RfcError, Result};
use crate::registry::CheckRegistry;
use tracing::debug;

/// Result of one compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The requirement holds.
    Pass,
    /// The requirement does not hold.
    Fail,
}

impl Outcome {
    /// Maps a check's return value.
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }

    /// Glyph shown in the results table.
    pub fn glyph(self) -> &'static str {
        match self {
            Outcome::Pass => "✅",
            Outcome::Fail => "❌",
        }
    }
}

/// Runs checks from a registry by name.
#[derive(Debug, Clone, Copy)]
pub struct CheckDispatcher<'a> {
    registry: &'a CheckRegistry,
}

impl<'a> CheckDispatcher<'a> {
    /// Creates a dispatcher over `registry`.
    pub fn new(registry: &'a CheckRegistry) -> Self {
        Self { registry }
    }

    /// Resolves `check` and runs it.
    ///
    /// # Errors
    ///
    /// Returns [`RfcError::UnknownCheck`] naming the row's description and
    /// check when the name is not registered.
    pub fn dispatch(&self, description: &str, check: &str) -> Result<Outcome> {
        let Some(run) = self.registry.resolve(check) else {
            debug!(description, check, "test row references an unregistered check");
            return Err(RfcError::UnknownCheck {
                description: description.to_string(),
                check: check.to_string(),
            });
        };

        let outcome = Outcome::from_bool(run());
        debug!(check, ?outcome, "ran compliance check");
        Ok(outcome)
    }
}
