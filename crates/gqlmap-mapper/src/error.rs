use std::fmt;

/// Which table a lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
    /// Object types, and interfaces in `map_class_to_interface_or_type`
    Output,
    Input,
    Interface,
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingKind::Output => f.write_str("output type"),
            MappingKind::Input => f.write_str("input type"),
            MappingKind::Interface => f.write_str("interface type"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CannotMapReason {
    /// The class is not part of the hierarchy.
    UnknownClass,
    /// Neither the class nor any class it falls back to has a mapping.
    NotMapped,
}

/// The single failure of every mapping operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannotMapTypeError {
    pub class_name: String,
    pub kind: MappingKind,
    pub reason: CannotMapReason,
}

impl CannotMapTypeError {
    pub fn unknown_class(class_name: impl Into<String>, kind: MappingKind) -> Self {
        Self {
            class_name: class_name.into(),
            kind,
            reason: CannotMapReason::UnknownClass,
        }
    }

    pub fn not_mapped(class_name: impl Into<String>, kind: MappingKind) -> Self {
        Self {
            class_name: class_name.into(),
            kind,
            reason: CannotMapReason::NotMapped,
        }
    }
}

impl fmt::Display for CannotMapTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            CannotMapReason::UnknownClass => write!(
                f,
                "cannot map class \"{}\" to a GraphQL {}: class does not exist",
                self.class_name, self.kind
            ),
            CannotMapReason::NotMapped => write!(
                f,
                "cannot map class \"{}\" to a GraphQL {}: no mapping found",
                self.class_name, self.kind
            ),
        }
    }
}

impl std::error::Error for CannotMapTypeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CannotMapTypeError::unknown_class("Not exists", MappingKind::Output).to_string(),
            "cannot map class \"Not exists\" to a GraphQL output type: class does not exist"
        );
        assert_eq!(
            CannotMapTypeError::not_mapped("App\\ClassC", MappingKind::Input).to_string(),
            "cannot map class \"App\\ClassC\" to a GraphQL input type: no mapping found"
        );
    }
}
