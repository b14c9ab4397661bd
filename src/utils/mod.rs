pub mod error;

pub use error::VoxfallError;
