use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read localities file {path}: {source}")]
    LocalitiesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse localities file: {0}")]
    LocalitiesFileParse(#[from] serde_yaml::Error),

    #[error("localities validation failed: {0}")]
    Validation(String),
}
