// =============================================================================
// Atomic file replacement
// =============================================================================
//
// Write into `<path>.tmp`, then rename over `path`.  A reader of `path` sees
// either the old content or the complete new content, never a partial file.
// =============================================================================

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Sibling temp path: `forex_config.json` -> `forex_config.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Replace `path` with whatever `write` puts into a fresh file.
///
/// On failure the temp file is removed and `path` is left untouched.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let tmp = tmp_path(path);

    let outcome = File::create(&tmp)
        .with_context(|| format!("failed to create {}", tmp.display()))
        .and_then(|mut file| {
            write(&mut file)?;
            file.sync_all()
                .with_context(|| format!("failed to sync {}", tmp.display()))
        })
        .and_then(|()| {
            std::fs::rename(&tmp, path).with_context(|| {
                format!("failed to rename {} to {}", tmp.display(), path.display())
            })
        });

    if outcome.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    outcome
}
