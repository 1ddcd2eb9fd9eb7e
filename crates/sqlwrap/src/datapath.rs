//! Data file locations.

use crate::error::{SqlWrapError, SqlWrapResult};
use std::fs::{self, OpenOptions};
use std::path::{Component, Path, PathBuf};

/// Resolve `file_name` inside `data_dir`, creating both if missing.
///
/// The directory is created recursively and an empty placeholder file is
/// written when the file does not exist yet. Returns an absolute path.
///
/// `file_name` must be relative and may not contain `..`.
pub fn resolve(data_dir: &Path, file_name: &str) -> SqlWrapResult<PathBuf> {
    check_file_name(file_name)?;
    fs::create_dir_all(data_dir)?;

    let path = data_dir.join(file_name);
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().write(true).create(true).truncate(false).open(&path)?;
    }

    Ok(std::path::absolute(path)?)
}

/// [`resolve`] on the blocking thread pool.
pub async fn resolve_async(data_dir: &Path, file_name: &str) -> SqlWrapResult<PathBuf> {
    let data_dir = data_dir.to_path_buf();
    let file_name = file_name.to_string();
    tokio::task::spawn_blocking(move || resolve(&data_dir, &file_name)).await?
}

fn check_file_name(file_name: &str) -> SqlWrapResult<()> {
    let contained = Path::new(file_name)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if file_name.is_empty() || !contained {
        return Err(SqlWrapError::validation(format!(
            "file name `{file_name}` must stay inside the data directory"
        )));
    }
    Ok(())
}
