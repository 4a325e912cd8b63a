//! Card front image sets.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::cards::AssetHandle;
use crate::core::{PairsError, Result};

/// Loads the ordered set of card fronts stored under a folder.
pub trait AssetSource {
    /// Front images in `folder`, in a stable order. Empty if the folder is
    /// unknown or holds no images.
    fn load_image_set(&self, folder: &str) -> Vec<AssetHandle>;
}

/// In-memory asset folders.
///
/// ```
/// use rust_pairs::hooks::{AssetSource, StaticAssets};
///
/// let assets = StaticAssets::new().with_folder("Cards/FrontGraphics", ["cat", "dog"]);
/// assert_eq!(assets.load_image_set("Cards/FrontGraphics").len(), 2);
/// assert!(assets.load_image_set("nowhere").is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticAssets {
    folders: FxHashMap<String, Vec<AssetHandle>>,
}

impl StaticAssets {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a folder and its images.
    #[must_use]
    pub fn with_folder<I, S>(mut self, folder: impl Into<String>, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let images = images.into_iter().map(AssetHandle::new).collect();
        self.folders.insert(folder.into(), images);
        self
    }
}

impl AssetSource for StaticAssets {
    fn load_image_set(&self, folder: &str) -> Vec<AssetHandle> {
        self.folders.get(folder).cloned().unwrap_or_default()
    }
}

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Image files under a root directory.
///
/// Handles are `folder/file_name`, sorted by file name.
#[derive(Clone, Debug)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    /// Serve folders relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectoryAssets {
    fn load_image_set(&self, folder: &str) -> Vec<AssetHandle> {
        let dir = self.root.join(folder);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "cannot read asset folder");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| {
                Path::new(name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        IMAGE_EXTENSIONS
                            .iter()
                            .any(|known| ext.eq_ignore_ascii_case(known))
                    })
            })
            .collect();
        names.sort();

        names
            .into_iter()
            .map(|name| AssetHandle::new(format!("{}/{}", folder.trim_end_matches('/'), name)))
            .collect()
    }
}

/// Load the configured image set, falling back to the default folder.
///
/// A missing, blank or empty folder is not fatal: it is logged and the
/// default folder is used instead. Only an empty default set is an error.
pub fn load_with_fallback(
    source: &dyn AssetSource,
    folder: Option<&str>,
    default_folder: &str,
) -> Result<Vec<AssetHandle>> {
    match folder.map(str::trim).filter(|f| !f.is_empty()) {
        Some(folder) => {
            let images = source.load_image_set(folder);
            if !images.is_empty() {
                return Ok(images);
            }
            tracing::warn!(folder, default = default_folder, "asset folder is empty, using default set");
        }
        None => {
            tracing::warn!(default = default_folder, "no asset folder selected, using default set");
        }
    }

    let images = source.load_image_set(default_folder);
    if images.is_empty() {
        return Err(PairsError::NoAssets {
            folder: default_folder.to_string(),
        });
    }
    Ok(images)
}
