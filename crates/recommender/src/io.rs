//! Writing recommendation lists to disk.
//!
//! Each call appends one user's ranked list as `user<TAB>item<TAB>score`
//! lines, in rank order. The first call for a file passes `append = false`
//! to create or truncate it.

use crate::error::Result;
use crate::user_based::RecommendedItem;
use data_loader::UserId;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes ranked lists into one recommendation file
#[derive(Debug, Clone)]
pub struct RecommendationWriter {
    path: PathBuf,
}

impl RecommendationWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `items` for `user`. Missing parent directories are created.
    pub fn write(&self, user: UserId, items: &[RecommendedItem], append: bool) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        for item in items {
            writeln!(writer, "{}\t{}\t{}", user, item.item_id, item.score)?;
        }
        writer.flush()?;
        Ok(())
    }
}
