//! JSON persistence for the timer collection.
//!
//! All timers live in one file, `timers.json`, in the per-user data
//! directory (`~/.local/share/timekit` on Linux, `~/Library/Application
//! Support/timekit` on macOS, `%LOCALAPPDATA%\timekit` on Windows). The file
//! is a pretty-printed JSON array of flat PascalCase records:
//!
//! ```text
//! [
//!   {
//!     "Id": "1",
//!     "Duration": "25m",
//!     "Seconds": 1500,
//!     "Message": "Timer complete!",
//!     "State": "Running",
//!     "EndTime": "2026-10-16T10:25:00+02:00",
//!     ...
//!   }
//! ]
//! ```
//!
//! ## Consistency
//!
//! - **Whole-collection writes**: every change rewrites the full array
//! - **Atomic replace**: the array goes to `timers.json.<pid>.tmp` first and
//!   is renamed over the target, so a concurrent reader sees the old file or
//!   the new one, never a partial write
//! - **Empty means absent**: saving no timers removes the file
//! - **Lenient reads**: a missing, blank or malformed file reads as an empty
//!   collection; the malformed case also prints a warning
//!
//! ## Caching
//!
//! A [`Timers`] handle remembers the last collection it read or wrote with
//! the file's stamp (modification time, size and, on Unix, inode).
//! [`Timers::load`] reuses it while the stamp is unchanged, which keeps the
//! watch loop from re-parsing the file every frame. [`Timers::load_fresh`]
//! always reads the disk and is used wherever a read is followed by a write.
//!
//! ## Example
//!
//! ```rust,no_run
//! use timekit::db::timers::Timers;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut store = Timers::new()?;
//! let mut timers = store.load_fresh();
//! timers.retain(|t| t.id != "3");
//! store.save(&timers)?;
//! # Ok(())
//! # }
//! ```

use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::timer::Timer;
use crate::{msg_debug, msg_warning};
use anyhow::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub const TIMERS_FILE_NAME: &str = "timers.json";

/// Identity of the state file as last read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    modified: SystemTime,
    len: u64,
    /// Each atomic save lands a new inode, even within one mtime tick.
    inode: u64,
}

impl Stamp {
    fn of(metadata: &fs::Metadata) -> Option<Stamp> {
        #[cfg(unix)]
        let inode = std::os::unix::fs::MetadataExt::ino(metadata);
        #[cfg(not(unix))]
        let inode = 0;

        Some(Stamp {
            modified: metadata.modified().ok()?,
            len: metadata.len(),
            inode,
        })
    }
}

struct Cached {
    stamp: Stamp,
    timers: Vec<Timer>,
}

/// Handle over the persisted timer collection.
///
/// The whole collection is read and written as a unit. Reads are served from
/// an in-handle cache until the file's modification stamp changes, so a
/// watch loop polling several times a second does not re-parse an unchanged
/// file. [`Timers::load_fresh`] always goes to disk.
pub struct Timers {
    path: PathBuf,
    cache: Option<Cached>,
}

impl Timers {
    /// Opens the store in the per-user data directory.
    ///
    /// Creates the directory when it does not exist yet; the file itself is
    /// only created by the first [`save`](Timers::save).
    pub fn new() -> Result<Timers> {
        let path = DataStorage::new().get_path(TIMERS_FILE_NAME)?;
        Ok(Timers::at(path))
    }

    /// Opens a store backed by an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Timers {
        Timers { path: path.into(), cache: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every stored timer, possibly from cache.
    ///
    /// A missing, empty or malformed file yields an empty list. The cached
    /// copy is used only while the file stamp matches the one it was read
    /// with, so saves by other handles or processes are always picked up.
    pub fn load(&mut self) -> Vec<Timer> {
        self.read(false)
    }

    /// Loads every stored timer straight from disk.
    ///
    /// Use before read-modify-write sequences; the result refreshes the cache.
    pub fn load_fresh(&mut self) -> Vec<Timer> {
        self.read(true)
    }

    /// Replaces the stored collection; an empty collection removes the file.
    ///
    /// # Errors
    ///
    /// Fails when the temporary file cannot be written or renamed, or the
    /// old file cannot be removed. The previous contents stay in place.
    pub fn save(&mut self, timers: &[Timer]) -> Result<()> {
        self.cache = None;

        if timers.is_empty() {
            match fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
                _ => return Ok(()),
            }
        }

        // Write beside the target and rename so readers never see half a file.
        let tmp_path = self.path.with_extension(format!("json.{}.tmp", std::process::id()));
        fs::write(&tmp_path, serde_json::to_string_pretty(timers)?)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        if let Some(stamp) = self.stamp() {
            self.cache = Some(Cached {
                stamp,
                timers: timers.to_vec(),
            });
        }
        Ok(())
    }

    fn stamp(&self) -> Option<Stamp> {
        Stamp::of(&fs::metadata(&self.path).ok()?)
    }

    fn read(&mut self, bypass_cache: bool) -> Vec<Timer> {
        let Some(stamp) = self.stamp() else {
            self.cache = None;
            return Vec::new();
        };

        if !bypass_cache {
            if let Some(cached) = self.cache.as_ref().filter(|c| c.stamp == stamp) {
                return cached.timers.clone();
            }
        }

        let timers = match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => match serde_json::from_str::<Vec<Timer>>(&content) {
                Ok(timers) => timers,
                Err(e) => {
                    msg_debug!(format!("Timer store parse error: {}", e));
                    msg_warning!(Message::TimerStoreCorrupt(self.path.display().to_string()));
                    Vec::new()
                }
            },
            Err(e) => {
                msg_debug!(format!("Timer store read error: {}", e));
                msg_warning!(Message::TimerStoreCorrupt(self.path.display().to_string()));
                Vec::new()
            }
        };

        self.cache = Some(Cached {
            stamp,
            timers: timers.clone(),
        });
        timers
    }
}
