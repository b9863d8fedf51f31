use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

const EXTENSION: &str = ".zen";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("[ERROR] File must have a .zen extension: '{}'", .0.display())]
    WrongExtension(PathBuf),
    #[error("[ERROR] Could not open file '{}'", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loads a script, refusing anything that is not a `.zen` file with a name.
pub fn read_source(path: &Path) -> Result<String, SourceError> {
    let name = path.to_string_lossy();
    if name.len() <= EXTENSION.len() || !name.ends_with(EXTENSION) {
        return Err(SourceError::WrongExtension(path.to_owned()));
    }

    debug!("reading source from {}", name);
    fs::read_to_string(path).map_err(|source| SourceError::Unreadable {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_extension() {
        let inputs = vec![
            "script.txt",
            "script",
            ".zen",
            "script.zen.bak",
            "script.ZEN",
        ];

        for input in inputs {
            let error = read_source(Path::new(input)).unwrap_err();

            assert!(matches!(error, SourceError::WrongExtension(_)), "{}", input);
            assert_eq!(
                error.to_string(),
                format!("[ERROR] File must have a .zen extension: '{}'", input)
            );
        }
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let path = Path::new("definitely/not/here.zen");
        let error = read_source(path).unwrap_err();

        assert!(matches!(error, SourceError::Unreadable { .. }));
        assert_eq!(
            error.to_string(),
            "[ERROR] Could not open file 'definitely/not/here.zen'"
        );
    }

    #[test]
    fn test_reads_zen_file() {
        let path = std::env::temp_dir().join(format!("zenith-source-{}.zen", std::process::id()));
        fs::write(&path, "display(1);\n").unwrap();

        let result = read_source(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(result.unwrap(), "display(1);\n");
    }
}
