use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not open file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not determine the length of file {}: {source}", path.display())]
    Size {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not allocate {len} bytes for file {}", path.display())]
    Allocation { path: PathBuf, len: u64 },
    #[error("could not read the contents of file {} ({got}/{expected} bytes)", path.display())]
    Read {
        path: PathBuf,
        expected: usize,
        got: usize,
    },
}

/// Reads a file's entire byte content. The content is returned exactly as
/// stored, with no trailing NUL and no interpretation.
pub fn read_entire_file(path: impl AsRef<Path>) -> Result<Vec<u8>, SourceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let length = file
        .metadata()
        .map_err(|source| SourceError::Size {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    let expected = usize::try_from(length).map_err(|_| SourceError::Allocation {
        path: path.to_path_buf(),
        len: length,
    })?;

    let mut buffer = Vec::new();
    if buffer.try_reserve_exact(expected).is_err() {
        return Err(SourceError::Allocation {
            path: path.to_path_buf(),
            len: length,
        });
    }

    // Cap the read at the reported length so the result is exactly as long
    // as the metadata said, even if the file grows underneath us.
    let got = match file.take(length).read_to_end(&mut buffer) {
        Ok(got) => got,
        Err(_) => {
            return Err(SourceError::Read {
                path: path.to_path_buf(),
                expected,
                got: buffer.len(),
            })
        }
    };
    if got != expected {
        return Err(SourceError::Read {
            path: path.to_path_buf(),
            expected,
            got,
        });
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_round_trip() {
        let content = b"#version 330 core\nvoid main() { gl_Position = vec4(0.0); }\n";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();

        let bytes = read_entire_file(file.path()).unwrap();
        assert_eq!(bytes.len(), content.len());
        assert_eq!(bytes, content);
    }

    #[test]
    fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(read_entire_file(file.path()).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = read_entire_file("no/such/dir/triangle.vert").unwrap_err();
        assert!(matches!(err, SourceError::Open { .. }));
        assert!(err.to_string().contains("triangle.vert"));
    }

    #[test]
    fn test_directory_is_not_readable() {
        let dir = tempfile::tempdir().unwrap();
        // Opening a directory either fails outright or fails on read,
        // depending on the platform; it never succeeds.
        assert!(read_entire_file(dir.path()).is_err());
    }
}
