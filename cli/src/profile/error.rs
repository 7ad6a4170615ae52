//! Profiling-specific error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a profiling experiment descriptor.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// PED file could not be read.
    #[error("Couldn't read PED file '{}': {reason}", .path.display())]
    Unreadable {
        /// The PED path.
        path: PathBuf,
        /// Underlying IO failure.
        reason: String,
    },

    /// PED file is empty or is not a YAML mapping.
    #[error("PED file '{}' is not a valid descriptor: {reason}", .path.display())]
    Malformed {
        /// The PED path.
        path: PathBuf,
        /// Why parsing failed.
        reason: String,
    },

    /// A required top-level section is absent.
    #[error("PED file is missing the '{0}' section.")]
    MissingSection(&'static str),

    /// A section is present but has the wrong shape.
    #[error("PED section '{section}' is invalid: {reason}")]
    InvalidSection {
        /// Section name.
        section: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The referenced service package does not exist.
    #[error("Service package '{}' referenced by the PED does not exist.", .0.display())]
    PackageNotFound(PathBuf),

    /// Work directory layout could not be created.
    #[error("Couldn't prepare work directory '{}': {reason}", .path.display())]
    WorkDir {
        /// The directory being created.
        path: PathBuf,
        /// Underlying IO failure.
        reason: String,
    },
}
