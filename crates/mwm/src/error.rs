use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported fixed-width read of {0} bytes (expected 1, 2, 4, or 8)")]
    UnsupportedWidth(u8),

    #[error("coordinate projection requested before the header was read")]
    HeaderNotRead,

    #[error("feature {id} overran its declared size: read past offset {limit}")]
    FeatureOverread { id: u32, limit: usize },

    #[error("malformed tag directory or out-of-bounds tag: {0}")]
    BadMagicOrLayout(String),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
