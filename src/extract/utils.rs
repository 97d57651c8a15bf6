/// Shared file I/O helpers for extractors.
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads a file's entire contents into a String.
pub(crate) fn read_file_to_string(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content)
}
