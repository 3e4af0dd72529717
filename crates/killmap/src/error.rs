//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, malformed map geometry, unknown maps, missing background assets,
//! degenerate kill data, image encoding/decoding, IO, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid map geometry: {0}")]
    Geometry(String),

    #[error("unknown map '{map}'")]
    NotFound { map: String },

    #[error("no background image for map '{map}'")]
    AssetMissing { map: String },

    #[error("degenerate kill data: {0}")]
    DegenerateData(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns `true` for errors caused by structurally missing data: an unknown map or a
    /// missing background asset.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::AssetMissing { .. })
    }

    /// Returns `true` if the error reports kill data that cannot produce a meaningful heatmap.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Error::DegenerateData(_))
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
