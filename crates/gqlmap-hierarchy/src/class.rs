//! Class identifiers, kinds and declarations.

use serde::Deserialize;
use smallvec::SmallVec;
use std::fmt;

/// Unique identifier for a class in a [`ClassHierarchy`](crate::ClassHierarchy).
///
/// Ids are dense indices assigned in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a node is a concrete/abstract class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
}

impl ClassKind {
    pub fn is_interface(self) -> bool {
        self == ClassKind::Interface
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassKind::Class => f.write_str("class"),
            ClassKind::Interface => f.write_str("interface"),
        }
    }
}

/// A resolved node of the hierarchy.
///
/// Links are direct only. Transitive relationships are computed by the
/// walks on [`ClassHierarchy`](crate::ClassHierarchy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    /// Unique identifier
    pub id: ClassId,
    /// Fully-qualified class name
    pub name: String,
    pub kind: ClassKind,
    /// Direct superclass (always `None` for interfaces)
    pub superclass: Option<ClassId>,
    /// Directly declared interfaces, in declaration order.
    /// For an interface these are the interfaces it extends.
    pub interfaces: SmallVec<[ClassId; 4]>,
}

impl ClassDescriptor {
    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }
}

/// Declaration of a class before its links are resolved.
///
/// Parents are referenced by name so declarations can arrive in any order;
/// [`ClassHierarchyBuilder::build`](crate::ClassHierarchyBuilder::build)
/// resolves and validates them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    /// Superclass name. Interfaces must leave this empty and list the
    /// interfaces they extend in `implements`.
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
}

impl ClassDecl {
    /// Declare a class.
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            extends: None,
            implements: Vec::new(),
        }
    }

    /// Declare an interface.
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: ClassKind::Interface,
            ..Self::class(name)
        }
    }

    /// Set the superclass.
    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.extends = Some(superclass.into());
        self
    }

    /// Append a directly implemented (or, for interfaces, extended) interface.
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }
}
