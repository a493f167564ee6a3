use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Unsupported PNG color type: {color_type} at {bit_depth} bits")]
    UnsupportedColor { color_type: String, bit_depth: u8 },

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Failed to allocate frame buffer")]
    Allocation,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<png::DecodingError> for ImageError {
    fn from(e: png::DecodingError) -> Self {
        ImageError::Decode(e.to_string())
    }
}

impl From<png::EncodingError> for ImageError {
    fn from(e: png::EncodingError) -> Self {
        ImageError::Encode(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Render failed: {0}")]
    Render(#[from] saturation_key::RenderError),

    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid window: {0}")]
    Window(String),
}

impl ServiceError {
    /// Status code a plugin host would have seen for this failure.
    pub fn status(&self) -> saturation_key::Status {
        match self {
            ServiceError::Render(e) => e.status(),
            ServiceError::Image(ImageError::Allocation) => saturation_key::Status::ErrMemory,
            ServiceError::Image(ImageError::UnsupportedColor { .. }) => {
                saturation_key::Status::ErrFormat
            }
            ServiceError::Window(_) => saturation_key::Status::ErrValue,
            _ => saturation_key::Status::Failed,
        }
    }
}
