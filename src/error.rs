//! Crate error type
//!
//! Gameplay never fails; errors only come from the edges (config files,
//! GPU initialization).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed tuning or settings JSON
    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),

    /// A tuning value outside its allowed range
    #[error("invalid tuning value `{field}`: {reason}")]
    InvalidTuning { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to create render surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

pub type Result<T> = std::result::Result<T, Error>;
