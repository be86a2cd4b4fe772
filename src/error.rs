use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Unknown unit '{0}': not the app and not a configured plugin")]
    UnknownUnit(String),

    #[error("Template root for unit '{unit}' is not a directory: {path}")]
    BadTemplateRoot { unit: String, path: String },
}
