//! Naming of interfaces derived from concrete object types.

/// Chooses the name of an interface built from a concrete object type.
pub trait NamingStrategy: std::fmt::Debug + Send + Sync {
    fn interface_name_from_concrete(&self, concrete_name: &str) -> String;
}

/// Appends a fixed suffix: `ClassA` becomes `ClassAInterface`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultNamingStrategy {
    suffix: String,
}

impl DefaultNamingStrategy {
    pub const DEFAULT_SUFFIX: &'static str = "Interface";

    pub fn new() -> Self {
        Self::with_suffix(Self::DEFAULT_SUFFIX)
    }

    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl Default for DefaultNamingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl NamingStrategy for DefaultNamingStrategy {
    fn interface_name_from_concrete(&self, concrete_name: &str) -> String {
        format!("{}{}", concrete_name, self.suffix)
    }
}
