use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoxfallError {
    #[error("Failed to encode heightfield bitmap: {0}")]
    Bitmap(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
