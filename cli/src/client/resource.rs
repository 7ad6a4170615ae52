//! Catalogue resource addressing.

use std::fmt;

use serde::Serialize;

/// Kind of catalogue resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// Network services (NSDs).
    Services,
    /// Virtual network functions (VNFDs).
    Functions,
    /// Packages.
    Packages,
}

impl ResourceType {
    /// Gatekeeper path for this resource collection.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Services => "/services",
            Self::Functions => "/functions",
            Self::Packages => "/packages",
        }
    }

    /// Singular noun, for log lines.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Services => "service",
            Self::Functions => "function",
            Self::Packages => "package",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Services => write!(f, "services"),
            Self::Functions => write!(f, "functions"),
            Self::Packages => write!(f, "packages"),
        }
    }
}

/// Composite identifier of a descriptor or package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceId {
    pub vendor: String,
    pub name: String,
    pub version: String,
}

impl ResourceId {
    #[must_use]
    pub fn new(
        vendor: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vendor={}&name={}&version={}",
            self.vendor, self.name, self.version
        )
    }
}

/// How resources are selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceQuery {
    /// Every resource of the type.
    All,
    /// Lookup by vendor, name and version.
    Id(ResourceId),
    /// Lookup by platform-generated UUID.
    Uuid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_type_paths() {
        assert_eq!(ResourceType::Services.path(), "/services");
        assert_eq!(ResourceType::Functions.path(), "/functions");
        assert_eq!(ResourceType::Packages.to_string(), "packages");
    }

    #[test]
    fn resource_id_formats_as_query() {
        let id = ResourceId::new("sonata.eu", "firewall-vnf", "1.0");
        assert_eq!(id.to_string(), "vendor=sonata.eu&name=firewall-vnf&version=1.0");
    }
}
