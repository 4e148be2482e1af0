//! Thin filesystem helpers. Every handle is scoped to the call that opens it.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Decoded content of a text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    pub content: String,
    /// Invalid UTF-8 sequences were replaced with U+FFFD
    pub lossy: bool,
}

/// Read a whole file as text. Invalid UTF-8 does not fail the read; the bad
/// bytes are replaced and the result is flagged as lossy.
pub fn read_file(path: &Path) -> io::Result<TextFile> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(content) => TextFile {
            content,
            lossy: false,
        },
        Err(e) => TextFile {
            content: String::from_utf8_lossy(e.as_bytes()).into_owned(),
            lossy: true,
        },
    })
}

pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(content.as_bytes())?;
    writer.flush()
}

/// First line of a file without its line terminator, `None` for an empty file
pub fn read_first_line(path: &Path) -> io::Result<Option<String>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&line);
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}
