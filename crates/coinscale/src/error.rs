use std::path::PathBuf;

/// Errors loading or validating a [`crate::MetrologyConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors reading frames from a [`crate::app::FrameSource`].
#[cfg(feature = "image")]
#[derive(thiserror::Error, Debug)]
pub enum AcquisitionError {
    #[error("failed to read frame {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode frame {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error("frame read took {elapsed_ms} ms (limit {limit_ms} ms)")]
    Timeout { elapsed_ms: u64, limit_ms: u64 },

    #[error("giving up after {attempts} failed reads")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<AcquisitionError>,
    },
}

/// Top-level error of a measurement run.
#[cfg(feature = "image")]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error("failed to write {path}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save edge inset {path}")]
    Inset {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error("failed to serialise report: {0}")]
    Report(#[from] serde_json::Error),
}
