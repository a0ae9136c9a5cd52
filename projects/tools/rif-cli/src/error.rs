use rif_api::file_io::FileOperationError;
use rif_api::RifError;
use rif_image::ImageError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    FileOperation(#[from] FileOperationError),
    #[error(transparent)]
    Options(#[from] RifError),
    #[error("Input path does not exist: {0}")]
    MissingInput(PathBuf),
}
