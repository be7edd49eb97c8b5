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

//! Atomic artifact writes.

use crate::error::{BenchError, Result};
use std::io::Write;
use std::path::Path;

/// Unix mode of written files. Temporary files are created owner-only.
#[cfg(unix)]
const REPORT_MODE: u32 = 0o644;

/// Writes `contents` to `path` via a temporary file in the same directory.
///
/// Readers never observe a partially written artifact.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| BenchError::io(dir, e))?;
    tmp.write_all(contents).map_err(|e| BenchError::io(path, e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(REPORT_MODE))
            .map_err(|e| BenchError::io(path, e))?;
    }
    tmp.persist(path).map_err(|e| BenchError::io(path, e.error))?;
    Ok(())
}
