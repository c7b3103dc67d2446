use thiserror::Error;

/// Rendering errors.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid color '{0}', expected #rrggbb or #rgb")]
    InvalidColor(String),
}
