//! Dataset provisioning: fetch a zipped dataset once and unpack it.
//!
//! [`ensure_dataset`] is the entry point used by the pipeline. It checks for
//! the canonical data file and only calls the [`Fetch`] implementation when
//! the file is missing.

use crate::error::{DataLoadError, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Something that can make a dataset appear on disk
pub trait Fetch {
    fn fetch(&self) -> impl Future<Output = Result<()>> + Send;
}

/// Downloads a zip archive over HTTP(S) and unpacks it into a folder
#[derive(Debug, Clone)]
pub struct DatasetDownloader {
    url: String,
    folder: PathBuf,
}

impl DatasetDownloader {
    pub fn new(url: impl Into<String>, folder: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            folder: folder.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Where the downloaded archive is stored, named after the URL's last segment
    pub fn archive_path(&self) -> PathBuf {
        let name = self
            .url
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("dataset.zip");
        self.folder.join(name)
    }

    /// Download the archive, then extract it into the folder
    pub async fn download_and_unzip(&self) -> Result<()> {
        fs::create_dir_all(&self.folder)?;
        let archive = self.archive_path();

        info!("Downloading {} to {:?}", self.url, archive);
        let bytes = reqwest::get(&self.url)
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| DataLoadError::Download {
                url: self.url.clone(),
                source,
            })?
            .bytes()
            .await
            .map_err(|source| DataLoadError::Download {
                url: self.url.clone(),
                source,
            })?;
        fs::write(&archive, &bytes)?;
        debug!("Downloaded {} bytes", bytes.len());

        let extracted = unzip(&archive, &self.folder)?;
        info!("Extracted {} files into {:?}", extracted, self.folder);
        Ok(())
    }
}

impl Fetch for DatasetDownloader {
    async fn fetch(&self) -> Result<()> {
        self.download_and_unzip().await
    }
}

/// Make sure `data_file` exists, fetching it when it does not.
///
/// Returns `true` when a fetch happened. A fetch that leaves the file missing
/// is reported as [`DataLoadError::FileNotFound`].
pub async fn ensure_dataset<F: Fetch>(data_file: &Path, fetcher: &F) -> Result<bool> {
    if data_file.exists() {
        debug!("Dataset already present at {:?}", data_file);
        return Ok(false);
    }

    info!("Dataset missing at {:?}, fetching", data_file);
    fetcher.fetch().await?;

    if !data_file.exists() {
        return Err(DataLoadError::FileNotFound {
            path: data_file.display().to_string(),
        });
    }
    Ok(true)
}

/// Extract every file of `archive` into `dest`.
///
/// A leading directory named like `dest` itself (`ml-100k/u.data` extracted
/// into `data/ml-100k`) is dropped so files land directly in `dest`.
/// Returns the number of files written.
pub fn unzip(archive: &Path, dest: &Path) -> Result<usize> {
    let zip_error = |source| DataLoadError::Archive {
        path: archive.display().to_string(),
        source,
    };
    let mut zip = zip::ZipArchive::new(File::open(archive)?).map_err(zip_error)?;
    let dest_name = dest.file_name().map(|name| name.to_os_string());

    let mut written = 0;
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(zip_error)?;
        // Entries escaping the destination are skipped
        let Some(name) = entry.enclosed_name() else {
            continue;
        };

        let mut components = name.components().peekable();
        if let (Some(Component::Normal(first)), Some(dest_name)) =
            (components.peek(), dest_name.as_ref())
        {
            if *first == dest_name.as_os_str() {
                components.next();
            }
        }
        let relative: PathBuf = components.collect();
        if relative.as_os_str().is_empty() {
            continue;
        }

        let target = dest.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        written += 1;
    }
    Ok(written)
}
