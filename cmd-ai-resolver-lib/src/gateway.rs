//! Reads command documents from disk and writes them back atomically.

use crate::error::ResolveError;
use crate::tag::contains_tag_bytes;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder as TempFileBuilder;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ResolveError + '_ {
    move |source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// A command file as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    /// Not valid UTF-8 and without an instruction tag; only the pass-through
    /// command can handle it.
    Untagged,
}

/// Reads the whole document at `path`.
///
/// Undecodable bytes are only an error when the file also carries a tag,
/// since the instruction could not be sent to the model faithfully.
pub fn read_document(path: &Path) -> Result<FileContent, ResolveError> {
    let bytes = fs::read(path).map_err(io_error(path))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(FileContent::Text(text)),
        Err(err) if contains_tag_bytes(err.as_bytes()) => Err(ResolveError::InvalidEncoding {
            path: path.to_path_buf(),
        }),
        Err(_) => Ok(FileContent::Untagged),
    }
}

/// Replaces the file at `path` with `content`.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over the original, so an interrupted write never leaves a
/// truncated document behind. The original file's permissions are kept.
pub fn write_document(path: &Path, content: &str) -> Result<(), ResolveError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp_file = TempFileBuilder::new()
        .prefix(".cmd-ai-resolver-")
        .suffix(".tmp")
        .tempfile_in(&parent_dir)
        .map_err(io_error(&parent_dir))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(io_error(temp_file.path()))?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp_file.path(), metadata.permissions())
            .map_err(io_error(temp_file.path()))?;
    }

    temp_file
        .persist(path)
        .map_err(|e| io_error(path)(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_replaces_content_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmd.sh");
        fs::write(&path, "echo hi | <AI>upper</AI>\n").unwrap();

        write_document(&path, "echo hi | tr a-z A-Z\n").unwrap();

        assert_eq!(
            read_document(&path).unwrap(),
            FileContent::Text("echo hi | tr a-z A-Z\n".to_string())
        );
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn write_keeps_original_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmd.sh");
        fs::write(&path, "ls\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_document(&path, "ls -la\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn read_error_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.sh");
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, ResolveError::Io { path: ref p, .. } if p == &path));
        assert!(err.to_string().contains("missing.sh"));
    }

    #[test]
    fn non_utf8_without_tag_is_untagged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.sh");
        fs::write(&path, b"echo caf\xe9\n").unwrap();

        assert_eq!(read_document(&path).unwrap(), FileContent::Untagged);
    }

    #[test]
    fn non_utf8_with_tag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.sh");
        fs::write(&path, b"echo caf\xe9 | <AI>upper\xe9</AI>\n").unwrap();

        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidEncoding { path: ref p } if p == &path));
    }
}
