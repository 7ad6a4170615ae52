//! Profiling run preparation.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::profile::error::ProfileError;
use crate::profile::ped::{Experiment, ExperimentKind, ProfilingDescriptor};

/// Extracted contents of the package under test.
pub const INPUT_SERVICE_DIR: &str = "input_service";
/// Generated experiment services.
pub const OUTPUT_SERVICES_DIR: &str = "output_services";
/// Packaged experiment services.
pub const OUTPUT_PACKAGES_DIR: &str = "output_packages";

type Result<T> = std::result::Result<T, ProfileError>;

/// Options of a profiling run.
#[derive(Debug, Clone)]
pub struct ProfileOptions {
    /// PED file, relative paths resolved against the current directory.
    pub config: PathBuf,
    /// Directory for generated artifacts. A new temporary directory is
    /// created once the PED validates when unset.
    pub work_dir: Option<PathBuf>,
    /// Skip creating the generation layout.
    pub no_generation: bool,
}

/// Directory layout inside the work dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDirLayout {
    pub input_service: PathBuf,
    pub output_services: PathBuf,
    pub output_packages: PathBuf,
}

impl WorkDirLayout {
    #[must_use]
    pub fn new(work_dir: &Path) -> Self {
        Self {
            input_service: work_dir.join(INPUT_SERVICE_DIR),
            output_services: work_dir.join(OUTPUT_SERVICES_DIR),
            output_packages: work_dir.join(OUTPUT_PACKAGES_DIR),
        }
    }

    /// Creates every directory of the layout.
    pub fn create(&self) -> Result<()> {
        for dir in [&self.input_service, &self.output_services, &self.output_packages] {
            std::fs::create_dir_all(dir).map_err(|e| ProfileError::WorkDir {
                path: dir.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

/// A validated profiling run.
#[derive(Debug)]
pub struct ProfileManager {
    ped: ProfilingDescriptor,
    work_dir: PathBuf,
    layout: WorkDirLayout,
    service_package: PathBuf,
    service_experiments: Vec<Experiment>,
    function_experiments: Vec<Experiment>,
    no_generation: bool,
}

impl ProfileManager {
    /// Loads and validates the PED, collects its experiments and resolves
    /// the work directory.
    ///
    /// # Errors
    ///
    /// Fails if the PED cannot be read, misses a required section, or
    /// references a service package that does not exist. Nothing is
    /// created on disk in those cases.
    pub fn new(options: &ProfileOptions) -> Result<Self> {
        let config = if options.config.is_absolute() {
            options.config.clone()
        } else {
            std::env::current_dir()
                .map_err(|e| ProfileError::Unreadable {
                    path: options.config.clone(),
                    reason: e.to_string(),
                })?
                .join(&options.config)
        };

        let ped = ProfilingDescriptor::load(&config)?;
        ped.validate()?;

        let service_package = ped.service_package()?;
        if !service_package.is_file() {
            return Err(ProfileError::PackageNotFound(service_package));
        }

        let service_experiments = ped.experiments(ExperimentKind::Service)?;
        let function_experiments = ped.experiments(ExperimentKind::Function)?;
        tracing::debug!(
            "PED declares {} service and {} function experiments",
            service_experiments.len(),
            function_experiments.len()
        );

        let work_dir = match &options.work_dir {
            Some(dir) => dir.clone(),
            None => temporary_work_dir()?,
        };
        tracing::debug!("Using work directory {}", work_dir.display());

        Ok(Self {
            ped,
            layout: WorkDirLayout::new(&work_dir),
            work_dir,
            service_package,
            service_experiments,
            function_experiments,
            no_generation: options.no_generation,
        })
    }

    /// Creates the work dir layout unless generation is skipped.
    pub fn prepare(&self) -> Result<()> {
        if self.no_generation {
            tracing::info!("Skipping profiling package generation");
            return Ok(());
        }

        self.layout.create()?;
        tracing::info!("Prepared work directory '{}'", self.work_dir.display());
        Ok(())
    }

    #[must_use]
    pub const fn ped(&self) -> &ProfilingDescriptor {
        &self.ped
    }

    #[must_use]
    pub const fn layout(&self) -> &WorkDirLayout {
        &self.layout
    }

    #[must_use]
    pub fn service_experiments(&self) -> &[Experiment] {
        &self.service_experiments
    }

    #[must_use]
    pub fn function_experiments(&self) -> &[Experiment] {
        &self.function_experiments
    }

    /// Human readable overview of the run.
    #[must_use]
    pub fn summary(&self) -> ProfileSummary<'_> {
        ProfileSummary(self)
    }
}

fn temporary_work_dir() -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix("son-profile-")
        .tempdir()
        .map_err(|e| ProfileError::WorkDir {
            path: std::env::temp_dir(),
            reason: e.to_string(),
        })?;
    Ok(dir.keep())
}

/// Display adapter returned by [`ProfileManager::summary`].
pub struct ProfileSummary<'a>(&'a ProfileManager);

impl fmt::Display for ProfileSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let manager = self.0;
        writeln!(f, "PED:             {}", manager.ped.path().display())?;
        writeln!(f, "Service package: {}", manager.service_package.display())?;
        writeln!(f, "Work directory:  {}", manager.work_dir.display())?;

        for experiments in [&manager.service_experiments, &manager.function_experiments] {
            for experiment in experiments {
                write!(f, "  [{}] {}", experiment.kind, experiment.name)?;
                if let Some(repetitions) = experiment.repetitions {
                    write!(f, " (repetitions: {repetitions})")?;
                }
                writeln!(f)?;
            }
        }

        write!(
            f,
            "{} service experiment(s), {} function experiment(s)",
            manager.service_experiments.len(),
            manager.function_experiments.len()
        )
    }
}
