use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Landmark set too short: need {required} points, got {got}")]
    InsufficientLandmarks { required: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
