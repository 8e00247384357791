use std::fmt;

#[derive(Debug)]
pub enum CompareError {
    /// TOML parse / deserialization error in a mapping config.
    MappingParse(String),
    /// Mapping validation error (duplicate column, empty path, etc.).
    MappingValidation(String),
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MappingParse(msg) => write!(f, "mapping parse error: {msg}"),
            Self::MappingValidation(msg) => write!(f, "mapping validation error: {msg}"),
        }
    }
}

impl std::error::Error for CompareError {}
