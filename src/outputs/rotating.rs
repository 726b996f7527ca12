//! Size based rotating file writer
//!
//! `app.log` is rotated to `app.log.1` once the next write would push it past
//! the size limit; older backups shift to `app.log.2`, `app.log.3`, ... and
//! the ones beyond `max_backups` are deleted. Backups can be gzip compressed
//! (`app.log.1.gz`) and expired by age.

use crate::core::{Result, SyplError, WARN_PREFIX};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Rotation settings for [`RotatingWriter`]
///
/// # Examples
///
/// ```
/// use sypl::outputs::RotationOptions;
/// use std::time::Duration;
///
/// let options = RotationOptions::new()
///     .with_max_size(50 * 1024 * 1024)
///     .with_max_backups(7)
///     .with_max_age(Duration::from_secs(7 * 24 * 3600))
///     .with_compression(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationOptions {
    /// Size in bytes a file may reach before rotating
    pub max_bytes: u64,
    /// Rotated files kept
    pub max_backups: usize,
    /// Rotated files older than this are deleted
    pub max_age: Option<Duration>,
    /// Gzip rotated files
    pub compress: bool,
}

impl Default for RotationOptions {
    fn default() -> Self {
        Self {
            max_bytes: 100 * 1024 * 1024,
            max_backups: 5,
            max_age: None,
            compress: false,
        }
    }
}

impl RotationOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

/// File writer rotating according to [`RotationOptions`]
pub struct RotatingWriter {
    base_path: PathBuf,
    options: RotationOptions,
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl RotatingWriter {
    /// Open (or create) `path` for appending
    ///
    /// # Errors
    ///
    /// Returns error if the parent directory or the file can't be created
    pub fn new<P: AsRef<Path>>(path: P, options: RotationOptions) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SyplError::file_output(
                    base_path.display().to_string(),
                    format!("Failed to create directory '{}': {}", parent.display(), e),
                )
            })?;
        }

        let file = open_append(&base_path).map_err(|e| {
            SyplError::file_output(base_path.display().to_string(), format!("Failed to open: {}", e))
        })?;

        let current_size = file.metadata().map(|m| m.len()).map_err(|e| {
            SyplError::file_output(
                base_path.display().to_string(),
                format!("Cannot access file metadata: {}", e),
            )
        })?;

        Ok(Self {
            base_path,
            options,
            writer: Some(BufWriter::new(file)),
            current_size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    pub fn options(&self) -> &RotationOptions {
        &self.options
    }

    /// Bytes in the current file
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    fn should_rotate(&self, incoming: usize) -> bool {
        self.current_size > 0 && self.current_size + incoming as u64 > self.options.max_bytes
    }

    /// Move the current file to `.1`, shifting and pruning older backups
    pub fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                SyplError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.options.max_backups == 0 {
            remove_if_exists(&self.base_path);
        } else {
            let oldest = self.backup_path(self.options.max_backups);
            remove_if_exists(&oldest);
            remove_if_exists(&gz_path(&oldest));

            for i in (1..self.options.max_backups).rev() {
                let old_path = self.backup_path(i);
                let new_path = self.backup_path(i + 1);

                for (from, to) in [(gz_path(&old_path), gz_path(&new_path)), (old_path, new_path)] {
                    if from.exists() {
                        fs::rename(&from, &to).map_err(|e| {
                            SyplError::file_rotation(
                                from.display().to_string(),
                                format!("Failed to rotate backup files: {}", e),
                            )
                        })?;
                    }
                }
            }

            if self.base_path.exists() {
                let backup_path = self.backup_path(1);
                fs::rename(&self.base_path, &backup_path).map_err(|e| {
                    SyplError::file_rotation(
                        self.base_path.display().to_string(),
                        format!("Failed to rotate current log file: {}", e),
                    )
                })?;

                if self.options.compress {
                    if let Err(e) = compress_file(&backup_path) {
                        eprintln!("{} {}. Keeping it uncompressed", WARN_PREFIX, e);
                    }
                }
            }
        }

        self.remove_expired_backups();

        let file = open_append(&self.base_path).map_err(|e| {
            SyplError::file_rotation(
                self.base_path.display().to_string(),
                format!("Failed to create new log file: {}", e),
            )
        })?;

        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;

        Ok(())
    }

    fn remove_expired_backups(&self) {
        let Some(max_age) = self.options.max_age else {
            return;
        };

        for i in 1..=self.options.max_backups {
            let path = self.backup_path(i);
            for candidate in [gz_path(&path), path] {
                let expired = fs::metadata(&candidate)
                    .and_then(|m| m.modified())
                    .ok()
                    .and_then(|modified| SystemTime::now().duration_since(modified).ok())
                    .is_some_and(|age| age > max_age);

                if expired {
                    remove_if_exists(&candidate);
                }
            }
        }
    }

    /// Backup path for `index`, e.g. `app.log.2`
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log")
            .to_string();
        path.set_file_name(format!("{}.{}", filename, index));
        path
    }
}

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.should_rotate(buf.len()) {
            self.rotate()
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        }

        let writer = match self.writer.as_mut() {
            Some(writer) => writer,
            None => return Err(io::Error::new(io::ErrorKind::Other, "rotating writer not initialized")),
        };

        let written = writer.write(buf)?;
        self.current_size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for RotatingWriter {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("{} Failed to flush {}: {}", WARN_PREFIX, self.base_path.display(), e);
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn gz_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

fn remove_if_exists(path: &Path) {
    if !path.exists() {
        return;
    }

    if let Err(e) = fs::remove_file(path) {
        eprintln!("{} Failed to remove {}: {}", WARN_PREFIX, path.display(), e);
    }
}

/// Gzip `path` into `path.gz`, removing the original only once compression
/// fully succeeded
fn compress_file(path: &Path) -> Result<()> {
    let target = gz_path(path);
    let temp = {
        let mut name = target.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    };

    let compress = || -> io::Result<()> {
        let mut reader = BufReader::with_capacity(64 * 1024, File::open(path)?);
        let output = BufWriter::with_capacity(64 * 1024, File::create(&temp)?);
        let mut encoder = flate2::write::GzEncoder::new(output, flate2::Compression::default());

        io::copy(&mut reader, &mut encoder)?;
        encoder.finish()?.flush()?;
        fs::rename(&temp, &target)
    };

    if let Err(e) = compress() {
        let _ = fs::remove_file(&temp);
        return Err(SyplError::file_rotation(
            path.display().to_string(),
            format!("Failed to compress: {}", e),
        ));
    }

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "{} Compression succeeded but failed to remove original file {}: {}",
            WARN_PREFIX,
            path.display(),
            e
        );
    }

    Ok(())
}
