//! Profiling experiment descriptor (PED) loading and validation.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::profile::error::ProfileError;

/// Key holding the path of the service package to profile.
pub const SERVICE_PACKAGE: &str = "service_package";
/// Key holding the service-level experiments.
pub const SERVICE_EXPERIMENTS: &str = "service_experiments";
/// Key holding the function-level experiments.
pub const FUNCTION_EXPERIMENTS: &str = "function_experiments";
/// Key added on load so referenced artifacts can be resolved.
pub const PED_PATH: &str = "ped_path";

type Result<T> = std::result::Result<T, ProfileError>;

/// Level an experiment is run at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentKind {
    Service,
    Function,
}

impl ExperimentKind {
    const fn section(self) -> &'static str {
        match self {
            Self::Service => SERVICE_EXPERIMENTS,
            Self::Function => FUNCTION_EXPERIMENTS,
        }
    }
}

impl fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service => write!(f, "service"),
            Self::Function => write!(f, "function"),
        }
    }
}

/// One experiment entry of a PED.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub kind: ExperimentKind,
    pub name: String,
    pub repetitions: Option<u64>,
    /// The entry as written, for later expansion.
    pub spec: Mapping,
}

/// A loaded PED document.
#[derive(Debug, Clone)]
pub struct ProfilingDescriptor {
    path: PathBuf,
    document: Mapping,
}

impl ProfilingDescriptor {
    /// Reads and parses the PED at `path`, annotating it with `ped_path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ProfileError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let descriptor = Self::parse(path, &contents)?;
        tracing::info!("Loaded PED file '{}'", path.display());
        Ok(descriptor)
    }

    /// Parses PED contents as if they were read from `path`.
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let malformed = |reason: String| ProfileError::Malformed {
            path: path.to_path_buf(),
            reason,
        };

        let value: Value = serde_yaml::from_str(contents).map_err(|e| malformed(e.to_string()))?;
        let mut document = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Err(malformed("file is empty".to_string())),
            _ => return Err(malformed("expected a mapping at the top level".to_string())),
        };

        document.insert(
            Value::from(PED_PATH),
            Value::from(path.to_string_lossy().into_owned()),
        );

        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn document(&self) -> &Mapping {
        &self.document
    }

    /// Checks that every section needed for profiling is present.
    pub fn validate(&self) -> Result<()> {
        for section in [SERVICE_PACKAGE, SERVICE_EXPERIMENTS, FUNCTION_EXPERIMENTS] {
            if !self.document.contains_key(section) {
                return Err(ProfileError::MissingSection(section));
            }
        }

        self.experiments(ExperimentKind::Service)?;
        self.experiments(ExperimentKind::Function)?;

        Ok(())
    }

    /// Service package path, resolved against the PED's directory.
    pub fn service_package(&self) -> Result<PathBuf> {
        let raw = self
            .document
            .get(SERVICE_PACKAGE)
            .ok_or(ProfileError::MissingSection(SERVICE_PACKAGE))?
            .as_str()
            .ok_or_else(|| ProfileError::InvalidSection {
                section: SERVICE_PACKAGE,
                reason: "expected a file path".to_string(),
            })?;

        let package = Path::new(raw);
        if package.is_absolute() {
            return Ok(package.to_path_buf());
        }

        Ok(self
            .path
            .parent()
            .map_or_else(|| package.to_path_buf(), |dir| dir.join(package)))
    }

    /// Experiments declared in the section for `kind`, in file order.
    pub fn experiments(&self, kind: ExperimentKind) -> Result<Vec<Experiment>> {
        let section = kind.section();
        let invalid = |reason: String| ProfileError::InvalidSection { section, reason };

        let entries = match self.document.get(section) {
            None => return Err(ProfileError::MissingSection(section)),
            Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Sequence(entries)) => entries,
            Some(_) => return Err(invalid("expected a list of experiments".to_string())),
        };

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let spec = entry
                    .as_mapping()
                    .ok_or_else(|| invalid(format!("entry {index} is not a mapping")))?;

                let name = spec
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid(format!("entry {index} has no name")))?;

                let repetitions = match spec.get("repetitions") {
                    None => None,
                    Some(value) => Some(value.as_u64().ok_or_else(|| {
                        invalid(format!("experiment '{name}' has a non-numeric repetitions value"))
                    })?),
                };

                Ok(Experiment {
                    kind,
                    name: name.to_string(),
                    repetitions,
                    spec: spec.clone(),
                })
            })
            .collect()
    }
}
