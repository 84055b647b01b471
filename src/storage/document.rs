use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::MirrorResult;

/// Replace `path` with `contents` via a sibling temp file and rename, creating parent directories
pub fn write_atomic(path: &Path, contents: &[u8]) -> MirrorResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(contents)?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write a rendered feed document in full
pub fn write_document(path: &Path, document: &str) -> MirrorResult<()> {
    write_atomic(path, document.as_bytes())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_writes_into_new_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("public/feeds/journal9.xml");

        write_document(&path, "<rss/>").unwrap();
        write_document(&path, "<rss version=\"2.0\"/>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<rss version=\"2.0\"/>");
    }

    #[test]
    fn test_leaves_no_temp_files_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("journal9.xml");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("journal9.xml")]);
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_failed_write_keeps_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("journal9.xml");
        write_atomic(&path, b"kept").unwrap();

        // A directory cannot be replaced by a file
        let blocked = dir.path().join("blocked");
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("inner"), "x").unwrap();
        assert!(write_atomic(&blocked, b"new").is_err());

        assert_eq!(fs::read(&path).unwrap(), b"kept");
    }
}
