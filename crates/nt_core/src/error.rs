use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A config file or environment value that could not be parsed.
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to decode response: {0}")]
    Decoding(String),

    /// Transport or HTTP failure. The upstream message is displayed verbatim.
    #[error("{0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
