//! Wall layout text files.
//!
//! One line per x-index, one marker character per y-index. See
//! [`BoundaryCategory::from_marker`](crate::sim::heat_transfer::BoundaryCategory::from_marker)
//! for the marker table.

use crate::sim::heat_transfer::Layout;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads and validates a layout file.
///
/// Fails on unreadable files, ragged rows, unknown markers and layouts
/// smaller than 3x3.
pub fn read_layout(path: &Path) -> Result<Layout> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout: {}", path.display()))?;
    let layout = Layout::parse(&text)
        .with_context(|| format!("Invalid layout in: {}", path.display()))?;
    Ok(layout)
}

/// Writes a layout back to its text form.
pub fn write_layout(path: &Path, layout: &Layout) -> Result<()> {
    fs::write(path, layout.to_string())
        .with_context(|| format!("Failed to write layout: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::heat_transfer::{BoundaryCategory, DomainError, GeometricBox};
    use tempfile::tempdir;

    #[test]
    fn test_read_layout() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("box.txt");
        fs::write(&path, "HHHHH\nv   \"\nv 6 \"\nv   \"\nCCCCC\n")?;

        let layout = read_layout(&path)?;
        assert_eq!(layout.shape(), (5, 5));
        assert_eq!(layout.get(2, 2), BoundaryCategory::CornerUpperLeft);
        Ok(())
    }

    #[test]
    fn test_write_and_read_layout() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("geometric.txt");
        let original = GeometricBox::new(6, 4)?.to_layout();

        write_layout(&path, &original)?;
        let loaded = read_layout(&path)?;
        assert_eq!(loaded, original);
        Ok(())
    }

    #[test]
    fn test_ragged_file_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("ragged.txt");
        fs::write(&path, "HHHH\nv  \"\nv \"\nCCCC\n")?;

        let err = read_layout(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::RaggedRows {
                row: 2,
                expected: 4,
                found: 3
            })
        );
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = read_layout(Path::new("/nonexistent/layout.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read layout"));
    }
}
