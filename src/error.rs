use std::fmt;
use std::io;
use std::path::PathBuf;

/// Crate error type. Only the outer surfaces (file access, configuration)
/// can fail — scanning and injection degrade silently on malformed markup,
/// so they return no error at all.
#[derive(Debug)]
pub enum PagetocError {
    NotFound {
        path: PathBuf,
    },
    PermissionDenied {
        path: PathBuf,
    },
    IoError {
        path: PathBuf,
        source: io::Error,
    },
    /// Config file failed to parse or carried invalid values.
    ConfigError {
        path: PathBuf,
        reason: String,
    },
    /// `--preset` named neither a built-in nor a config-file preset.
    UnknownPreset {
        name: String,
    },
    /// Heading level range outside 1–6 or inverted.
    InvalidLevels {
        spec: String,
        reason: String,
    },
}

impl fmt::Display for PagetocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                write!(f, "permission denied: {}", path.display())
            }
            Self::IoError { path, source } => {
                write!(f, "io error on {}: {source}", path.display())
            }
            Self::ConfigError { path, reason } => {
                write!(f, "invalid config {}: {reason}", path.display())
            }
            Self::UnknownPreset { name } => {
                write!(f, "unknown preset: {name}")
            }
            Self::InvalidLevels { spec, reason } => {
                write!(f, "invalid level range \"{spec}\": {reason}")
            }
        }
    }
}

impl std::error::Error for PagetocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}
