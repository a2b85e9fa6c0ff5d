//! Rotating file writer with size-based rotation and backup retention.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// When to rotate and how many rotated files to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Size above which the file is rotated before the next write.
    pub max_bytes: u64,
    /// Number of rotated backups retained; older ones are deleted.
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    /// 10 MB files, 3 backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Thread-safe, line-oriented writer that rotates its file by size.
///
/// A rotated file is renamed to `<name>.<UTC timestamp>` next to the original,
/// e.g. `imgfinder-otlp.json.20261018T101500.123456789`. The timestamp format
/// sorts lexicographically, which is how the oldest backups are found.
pub struct FileWriter {
    file_path: PathBuf,
    policy: RotationPolicy,
    /// Opened lazily on first write.
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer for `file_path`; nothing is opened until the first write.
    pub const fn new(file_path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            file_path,
            policy,
            writer: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is too big.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation, opening, writing or flushing fails, or the
    /// lock was poisoned by a panicking writer.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::other(format!("mutex poisoned: {e}")))?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }
        let Some(file) = writer.as_mut() else {
            return Err(io::Error::other("trace file unavailable"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn check_and_rotate(&self, writer: &mut Option<File>) -> io::Result<()> {
        let Ok(metadata) = fs::metadata(&self.file_path) else {
            return Ok(());
        };
        if metadata.len() <= self.policy.max_bytes {
            return Ok(());
        }

        *writer = None;
        let backup = self.backup_path();
        fs::rename(&self.file_path, &backup)?;
        self.cleanup_old_backups()
    }

    fn backup_path(&self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.9f").to_string();
        let base = format!("{}.{stamp}", self.file_name());
        let mut candidate = self.parent_dir().join(&base);
        let mut suffix = 1;
        while candidate.exists() {
            candidate = self.parent_dir().join(format!("{base}-{suffix}"));
            suffix += 1;
        }
        candidate
    }

    /// Deletes the oldest backups beyond the retention limit. Individual
    /// deletion failures are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let mut backups = self.backups()?;
        backups.sort();
        let excess = backups.len().saturating_sub(self.policy.max_backups);
        for old_backup in backups.iter().take(excess) {
            let _ = fs::remove_file(old_backup);
        }
        Ok(())
    }

    /// Rotated backups of this file, unsorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let prefix = format!("{}.", self.file_name());
        Ok(fs::read_dir(self.parent_dir())?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect())
    }

    fn file_name(&self) -> &str {
        self.file_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("trace")
    }

    fn parent_dir(&self) -> &Path {
        self.file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_lines_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone(), RotationPolicy::default());
        assert!(!path.exists());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
        assert!(writer.backups().unwrap().is_empty());
    }

    #[test]
    fn rotates_and_keeps_limited_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let policy = RotationPolicy {
            max_bytes: 8,
            max_backups: 2,
        };
        let writer = FileWriter::new(path.clone(), policy);

        for i in 0..6 {
            writer.write_line(&format!("line-number-{i}")).unwrap();
        }

        let backups = writer.backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "line-number-5\n");

        let mut contents: Vec<String> = backups
            .iter()
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();
        contents.sort();
        assert_eq!(contents, vec!["line-number-3\n", "line-number-4\n"]);
    }
}
