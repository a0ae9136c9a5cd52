use crate::error::EncodeError;
use std::fs;
use std::path::*;
use tracing::error;

/// Recursively visits directories and collects file paths.
///
/// Directories or entries that cannot be read are skipped.
///
/// # Arguments
///
/// * `dir`: The directory to start the traversal from.
/// * `files`: The vector of file paths to populate.
pub fn find_all_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    // Gracefully handle cases where the directory cannot be read
    let dir_entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(()),
    };

    for entry in dir_entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue, // Skip problematic entries, e.g. those without access.
        };

        let path = entry.path();
        if path.is_dir() {
            find_all_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

/// Canonicalizes a CLI path argument, creating the directory if it doesn't exist.
pub fn canonicalize_cli_path(value: &str) -> Result<PathBuf, String> {
    let path = Path::new(value);

    // If path doesn't exist, create it
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| format!("Failed to create directory: {e}"))?;
    }

    fs::canonicalize(path).map_err(|e| format!("Invalid path: {e}"))
}

/// Path of the `.rif` file for `input`, keeping its location relative to `input_root`.
///
/// When `input` is not under `input_root` (a single input file), only its file name is kept.
pub fn output_path_for(input: &Path, input_root: &Path, output_dir: &Path) -> PathBuf {
    let relative = match input.strip_prefix(input_root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative,
        _ => Path::new(input.file_name().unwrap_or_default()),
    };
    output_dir.join(relative).with_extension("rif")
}

/// Logs the error from processing a single file, returning `true` on success.
pub fn handle_process_entry_error(path: &Path, result: Result<(), EncodeError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            error!(path = %path.display(), "{e}");
            false
        }
    }
}
