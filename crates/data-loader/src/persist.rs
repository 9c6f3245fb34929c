//! Saving a [`DataModel`] back to disk.
//!
//! Output format is one record per line, `user<TAB>item<TAB>value`, with a
//! fourth timestamp column for each timestamp recorded on the pair. Users and
//! items are written in ascending order, so saving the same model twice
//! produces byte-identical files.

use crate::error::Result;
use crate::types::DataModel;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Write `model` to `path`.
///
/// When the file already exists and `overwrite` is false, nothing is written
/// and `Ok(false)` is returned. Returns `Ok(true)` once the file is written.
pub fn save_data_model(model: &DataModel, path: &Path, overwrite: bool) -> Result<bool> {
    if path.exists() && !overwrite {
        warn!("Ignoring {:?}: file exists and overwrite is off", path);
        return Ok(false);
    }

    let mut writer = BufWriter::new(File::create(path)?);
    for preference in model.iter() {
        match preference.timestamp {
            Some(timestamp) => writeln!(
                writer,
                "{}\t{}\t{}\t{}",
                preference.user_id, preference.item_id, preference.value, timestamp
            )?,
            None => writeln!(
                writer,
                "{}\t{}\t{}",
                preference.user_id, preference.item_id, preference.value
            )?,
        }
    }
    writer.flush()?;

    debug!(
        "Saved {} preferences for {} users to {:?}",
        model.num_preferences(),
        model.num_users(),
        path
    );
    Ok(true)
}
