//! One optional picture per month.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::CalendarError;

/// Twelve picture slots, addressed by month number 1..=12.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoList {
    slots: [Option<PathBuf>; 12],
}

impl PhotoList {
    /// The same picture on every month.
    pub fn single(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            slots: std::array::from_fn(|_| Some(path.clone())),
        }
    }

    /// Pictures assigned to months in order, wrapping around when there
    /// are fewer than twelve. An empty list leaves every slot empty.
    pub fn cycle(paths: &[PathBuf]) -> Self {
        if paths.is_empty() {
            return Self::default();
        }
        Self {
            slots: std::array::from_fn(|i| Some(paths[i % paths.len()].clone())),
        }
    }

    /// Every regular file in `dir`, sorted by name, assigned with
    /// [`PhotoList::cycle`].
    pub fn from_dir(dir: &Path) -> io::Result<Self> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();
        Ok(Self::cycle(&paths))
    }

    /// Picture for `month`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn get(&self, month: u32) -> Result<Option<&Path>, CalendarError> {
        let index = month
            .checked_sub(1)
            .filter(|i| *i < 12)
            .ok_or(CalendarError::InvalidMonth { month })?;
        Ok(self.slots[index as usize].as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
