use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::CaptionResult;

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> CaptionResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "output".into());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Write `bytes` to `path` so that readers see either the old file or the complete new one.
///
/// Data goes to a temporary file next to `path` which is then renamed over it.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CaptionResult<()> {
    ensure_parent_dir(path)?;
    let tmp = temp_sibling(path);

    let result = (|| -> anyhow::Result<()> {
        let mut f = std::fs::File::create(&tmp)
            .with_context(|| format!("failed to create '{}'", tmp.display()))?;
        f.write_all(bytes)
            .with_context(|| format!("failed to write '{}'", tmp.display()))?;
        f.sync_all()
            .with_context(|| format!("failed to sync '{}'", tmp.display()))?;
        std::fs::rename(&tmp, path).with_context(|| {
            format!("failed to move '{}' to '{}'", tmp.display(), path.display())
        })?;
        Ok(())
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    Ok(result?)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/output.rs"]
mod tests;
