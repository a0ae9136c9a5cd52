//! Encoding straight into a memory-mapped file.

use crate::file_io::FileOperationResult;
use crate::{PreparedRif, RifEncodeBuilder};
use lightweight_mmap::handles::*;
use lightweight_mmap::mmap::*;
use rif_common::PixelGrid;
use rif_encode::PatternSizeSelection;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What [`encode_to_file`] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Size of the written file in bytes.
    pub bytes_written: usize,
    /// The pattern size selection, or [`None`] for uncompressed output.
    pub selection: Option<PatternSizeSelection>,
}

/// Encode `grid` and write the result to `output_path`.
///
/// Missing parent directories are created. The file is first written to
/// `<output_path>.partial` and then renamed over `output_path`, so an existing file is
/// only replaced once the new one is complete. If writing fails, the partial file is
/// removed and any previous file at `output_path` is left as it was.
///
/// # Arguments
///
/// * `builder` - The encode settings
/// * `grid` - The image to encode
/// * `output_path` - Path to the output file
///
/// # Returns
///
/// An [`EncodeSummary`] describing the written file.
///
/// # Example
///
/// ```no_run
/// use rif_api::file_io::{encode_to_file, FileOperationResult};
/// use rif_api::RifEncodeBuilder;
/// use rif_common::PixelGrid;
/// use std::path::{Path, PathBuf};
///
/// fn example_encode(grid: &PixelGrid, output_path: &Path) -> FileOperationResult<()> {
///     let builder = RifEncodeBuilder::new().compress(true);
///     let summary = encode_to_file(&builder, grid, output_path)?;
///     println!("wrote {} bytes", summary.bytes_written);
///     Ok(())
/// }
/// ```
pub fn encode_to_file(
    builder: &RifEncodeBuilder,
    grid: &PixelGrid,
    output_path: &Path,
) -> FileOperationResult<EncodeSummary> {
    let prepared = builder.prepare(grid)?;
    let len = prepared.encoded_len();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let partial_path = partial_path_for(output_path);
    remove_if_exists(&partial_path)?;

    let output_handle = ReadWriteFileHandle::create_preallocated(&partial_path, len as i64)?;
    let result = write_mapped(&output_handle, &prepared, len);
    drop(output_handle);

    let result = result.and_then(|bytes_written| {
        std::fs::rename(&partial_path, output_path)?;
        Ok(bytes_written)
    });

    match result {
        Ok(bytes_written) => {
            debug!(path = %output_path.display(), bytes_written, "wrote RIF file");
            Ok(EncodeSummary {
                bytes_written,
                selection: prepared.selection(),
            })
        }
        Err(error) => {
            warn!(path = %partial_path.display(), %error, "removing partially written file");
            let _ = std::fs::remove_file(&partial_path);
            Err(error)
        }
    }
}

/// Sibling path the file is written to before it replaces `output_path`.
fn partial_path_for(output_path: &Path) -> PathBuf {
    let mut name = output_path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    output_path.with_file_name(name)
}

fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

fn write_mapped(
    output_handle: &ReadWriteFileHandle,
    prepared: &PreparedRif<'_>,
    len: usize,
) -> FileOperationResult<usize> {
    let mut output_mapping = ReadWriteMmap::new(output_handle, 0, len)?;
    Ok(prepared.write_to(output_mapping.as_mut_slice())?)
}
