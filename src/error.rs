use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MoveError;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("search.max_depth must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search.max_depth must be >= 1"
        );
    }

    #[test]
    fn test_file_read_error_display() {
        let err = ConfigError::FileRead {
            path: PathBuf::from("connect_four.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read config file connect_four.toml: denied"
        );
    }

    #[test]
    fn test_move_error_display() {
        assert_eq!(
            MoveError::InvalidColumn.to_string(),
            "column must be between 0 and 6"
        );
        assert_eq!(MoveError::ColumnFull.to_string(), "column is full");
    }
}
