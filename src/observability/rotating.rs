//! Append-only file with size-based rotation into numbered backups.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Appends lines to `path`; once it exceeds `max_bytes` it is shifted to
/// `path.1`, `path.1` to `path.2`, and so on up to `backups`.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: Option<File>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            file: None,
        }
    }

    /// Appends `line` and a newline, rotating first if the file is full.
    pub fn append_line(&mut self, line: &str) -> io::Result<()> {
        if fs::metadata(&self.path).is_ok_and(|m| m.len() >= self.max_bytes) {
            self.file = None;
            self.rotate()?;
        }

        if self.file.is_none() {
            self.file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        if let Some(file) = &mut self.file {
            writeln!(file, "{line}")?;
            file.flush()?;
        }
        Ok(())
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = backup_path(&self.path, self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.backups).rev() {
            let from = backup_path(&self.path, n);
            if from.exists() {
                fs::rename(&from, backup_path(&self.path, n + 1))?;
            }
        }
        fs::rename(&self.path, backup_path(&self.path, 1))
    }
}

fn backup_path(path: &Path, n: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let mut file = RotatingFile::new(path.clone(), 1024, 2);

        file.append_line("one").unwrap();
        file.append_line("two").unwrap();

        assert_eq!(read(&path), "one\ntwo\n");
    }

    #[test]
    fn rotates_into_numbered_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let mut file = RotatingFile::new(path.clone(), 4, 2);

        for line in ["aaaa", "bbbb", "cccc", "dddd"] {
            file.append_line(line).unwrap();
        }

        assert_eq!(read(&path), "dddd\n");
        assert_eq!(read(&backup_path(&path, 1)), "cccc\n");
        assert_eq!(read(&backup_path(&path, 2)), "bbbb\n");
        assert!(!backup_path(&path, 3).exists());
    }
}
