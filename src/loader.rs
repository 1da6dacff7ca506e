use crate::error::{DashboardError, Result};
use crate::spreadsheet::Sheet;
use calamine::{Reader, open_workbook_auto};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Reads workbooks and memoizes what it read
///
/// Sheet name lists are cached per path and sheets per `(path, sheet name)`.
/// Entries are never evicted or modified, so a cached `Arc` can be handed
/// out to any number of readers. Two threads missing the same key at once
/// may both parse the file; the first result stored wins.
///
/// # Examples
/// ```no_run
/// use pv_dashboard::loader::SheetLoader;
///
/// let loader = SheetLoader::new();
/// let names = loader.list_sheets("data/Dashboard data.xlsx").unwrap();
/// let sheet = loader.read_sheet("data/Dashboard data.xlsx", &names[0]).unwrap();
/// println!("{} is {} x {}", sheet.name, sheet.rows, sheet.cols);
/// ```
#[derive(Debug, Default)]
pub struct SheetLoader {
    sheet_names: RwLock<HashMap<PathBuf, Arc<Vec<String>>>>,
    sheets: RwLock<HashMap<(PathBuf, String), Arc<Sheet>>>,
}

impl SheetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheet names of the workbook at `path`, in workbook order.
    ///
    /// # Errors
    /// * `FileNotFound` if `path` does not exist
    /// * `InvalidFormat` if the file cannot be parsed as a workbook
    pub fn list_sheets(&self, path: impl AsRef<Path>) -> Result<Arc<Vec<String>>> {
        let path = path.as_ref();
        if let Some(names) = read_lock(&self.sheet_names).get(path) {
            return Ok(Arc::clone(names));
        }

        debug!("listing sheets of {}", path.display());
        let workbook = open(path)?;
        let names = Arc::new(workbook.sheet_names());

        let mut cache = write_lock(&self.sheet_names);
        let entry = cache
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::clone(&names));
        Ok(Arc::clone(entry))
    }

    /// The sheet called `sheet_name` in the workbook at `path`.
    ///
    /// # Errors
    /// * `FileNotFound` if `path` does not exist
    /// * `InvalidFormat` if the file or the sheet cannot be parsed
    /// * `SheetNotFound` if the workbook has no sheet with that name
    pub fn read_sheet(&self, path: impl AsRef<Path>, sheet_name: &str) -> Result<Arc<Sheet>> {
        let path = path.as_ref();
        let key = (path.to_path_buf(), sheet_name.to_string());
        if let Some(sheet) = read_lock(&self.sheets).get(&key) {
            return Ok(Arc::clone(sheet));
        }

        debug!("reading sheet `{}` of {}", sheet_name, path.display());
        let mut workbook = open(path)?;
        if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
            return Err(DashboardError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: sheet_name.to_string(),
            });
        }

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| invalid_format(path, e))?;
        let sheet = Arc::new(Sheet::from_range(sheet_name, &range));

        let mut cache = write_lock(&self.sheets);
        let entry = cache.entry(key).or_insert_with(|| Arc::clone(&sheet));
        Ok(Arc::clone(entry))
    }

    /// Number of sheets currently held in the cache
    pub fn cached_sheet_count(&self) -> usize {
        read_lock(&self.sheets).len()
    }
}

fn open(path: &Path) -> Result<calamine::Sheets<std::io::BufReader<std::fs::File>>> {
    if !path.exists() {
        return Err(DashboardError::FileNotFound(path.to_path_buf()));
    }
    open_workbook_auto(path).map_err(|e| invalid_format(path, e))
}

fn invalid_format(path: &Path, err: impl std::fmt::Display) -> DashboardError {
    DashboardError::InvalidFormat {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

// The caches only ever grow, so a poisoned lock still holds consistent data
fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
