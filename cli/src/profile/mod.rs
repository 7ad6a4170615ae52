//! Profiling experiment preparation for `son-profile`.
//!
//! A profiling run is described by a PED (profiling experiment descriptor)
//! YAML file naming the service package to profile and the service and
//! function experiments to run against it.

pub mod error;
pub mod manager;
pub mod ped;

pub use error::ProfileError;
pub use manager::{ProfileManager, ProfileOptions, WorkDirLayout};
pub use ped::{Experiment, ExperimentKind, ProfilingDescriptor};
