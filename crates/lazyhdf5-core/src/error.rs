//! Error types shared by the core and its storage backends.

use std::path::PathBuf;

use crate::family::TypeFamily;

/// Boxed error coming from a storage engine.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when inspecting or altering a container.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The storage engine could not open or create the file.
    #[error("unable to open {}: {source}", path.display())]
    Open {
        /// Path that was passed to the engine.
        path: PathBuf,
        /// The engine's own error, untouched.
        #[source]
        source: BoxError,
    },

    /// The attribute had to exist but does not.
    #[error("attribute not found: {0}")]
    KeyNotFound(String),

    /// A strict rewrite would change the attribute's type family.
    #[error("type mismatch for attribute {key}: stored {existing}, new {new}")]
    TypeMismatch {
        key: String,
        existing: TypeFamily,
        new: TypeFamily,
    },

    /// The value kind has no type family (lists, records, unknown types).
    #[error("unsupported value kind: {0}")]
    Unsupported(String),

    /// An argument has the wrong shape or an unknown spelling.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No group or dataset lives at the given path.
    #[error("object not found: {0}")]
    NotFound(String),

    /// A dataset already exists and overwriting was not requested.
    #[error("dataset already exists: {0}")]
    DatasetExists(String),

    /// Any other failure reported by the storage engine.
    #[error("storage error: {0}")]
    Backend(#[source] BoxError),
}

impl Error {
    /// Wrap an engine failure raised while opening `path`.
    pub fn open(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Error::Open {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Wrap any other engine failure.
    pub fn backend(source: impl Into<BoxError>) -> Self {
        Error::Backend(source.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_keeps_engine_error_as_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::open("missing.h5", io);
        assert!(err.to_string().contains("missing.h5"));

        let source = std::error::Error::source(&err).unwrap();
        let io = source.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn type_mismatch_display() {
        let err = Error::TypeMismatch {
            key: "gain".into(),
            existing: TypeFamily::Integer,
            new: TypeFamily::Float,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch for attribute gain: stored int, new float"
        );
    }

    #[test]
    fn backend_from_string() {
        let err = Error::backend("H5Adelete failed");
        assert!(err.to_string().contains("H5Adelete failed"));
    }
}
