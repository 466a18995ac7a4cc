//! Error types for `ModLayout`

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::formats::ResourceKind;

/// The error type for `ModLayout` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Copying a resource into the output tree failed.
    #[error("failed to copy {} to {}: {source}", source_path.display(), destination.display())]
    FileCopyFailure {
        /// The file being copied.
        source_path: PathBuf,
        /// Where it was being copied to.
        destination: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    // ==================== External Tool Errors ====================
    /// An external converter or extractor exited unsuccessfully.
    #[error("{tool} failed on {}: {status}", input.display())]
    ExternalToolFailure {
        /// Program name of the tool.
        tool: String,
        /// The file the tool was asked to process.
        input: PathBuf,
        /// Exit status reported by the process.
        status: ExitStatus,
    },

    /// An external tool could not be started at all.
    #[error("failed to run {tool}: {source}")]
    ExternalToolSpawn {
        /// Program name of the tool.
        tool: String,
        /// The spawn error.
        source: std::io::Error,
    },

    // ==================== Palette Errors ====================
    /// The palette source name does not end in a known `*palcus` suffix.
    #[error("cannot determine palette kind for {}", path.display())]
    UnknownPaletteKind {
        /// The palette source file.
        path: PathBuf,
    },

    /// The converted palette tree is missing a required field or has the wrong shape.
    #[error("invalid palette tree: {message}")]
    InvalidPaletteTree {
        /// Description of what is invalid.
        message: String,
    },

    /// A category node references a string id that the table does not contain.
    #[error("string table has no entry for STRREF {strref}")]
    MissingStringTableEntry {
        /// The missing string id.
        strref: u32,
    },

    // ==================== Module Errors ====================
    /// A resource every module must contain was not found.
    #[error("module has no {kind} resource")]
    RequiredResourceAbsent {
        /// The kind that was expected.
        kind: ResourceKind,
    },

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    /// Process exit code for this error when it ends a CLI run.
    ///
    /// Code 2 is left to clap for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::ExternalToolFailure { .. } | Error::ExternalToolSpawn { .. } => 3,
            Error::MissingStringTableEntry { .. } => 4,
            Error::RequiredResourceAbsent { .. } => 5,
            Error::FileCopyFailure { .. } => 6,
            Error::InvalidPaletteTree { .. } | Error::UnknownPaletteKind { .. } => 7,
            Error::Io(_) | Error::WalkDirError(_) | Error::JsonError(_) | Error::Config(_) => 1,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `ModLayout` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        let missing = Error::MissingStringTableEntry { strref: 9 };
        let absent = Error::RequiredResourceAbsent {
            kind: ResourceKind::Faction,
        };
        let invalid = Error::InvalidPaletteTree {
            message: "x".into(),
        };
        assert_eq!(missing.exit_code(), 4);
        assert_eq!(absent.exit_code(), 5);
        assert_eq!(invalid.exit_code(), 7);
        assert_eq!(Error::WalkDirError("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_messages_name_the_offending_item() {
        let err = Error::MissingStringTableEntry { strref: 1234 };
        assert_eq!(err.to_string(), "string table has no entry for STRREF 1234");

        let err = Error::UnknownPaletteKind {
            path: PathBuf::from("mystery.itp"),
        };
        assert!(err.to_string().contains("mystery.itp"));

        let err = Error::RequiredResourceAbsent {
            kind: ResourceKind::Faction,
        };
        assert_eq!(err.to_string(), "module has no faction resource");
    }
}
