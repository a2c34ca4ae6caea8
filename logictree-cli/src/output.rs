use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write fully rendered output, creating parent directories as needed.
///
/// Callers render before calling this, so a failed conversion never leaves
/// a partial file behind.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parent_directories() {
        let temp_dir = std::env::temp_dir().join("logictree_test_output");
        let path = temp_dir.join("nested/dir/tree.json");

        write_output(&path, "[]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");

        // Clean up
        fs::remove_dir_all(temp_dir).ok();
    }
}
