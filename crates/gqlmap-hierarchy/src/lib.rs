//! Class hierarchy model for the gqlmap type mapper.
//!
//! Application classes are described up front as a directed acyclic graph:
//! every node knows its direct superclass and the interfaces it declares.
//! Resolvers never reflect on live classes; they walk this graph instead.
//!
//! - Class declarations and descriptors (`ClassDecl`, `ClassDescriptor`)
//! - Validating construction (`ClassHierarchyBuilder`, `HierarchyError`)
//! - Ancestor walks in a fixed, documented order (`ClassHierarchy::ancestors`)

// Class identifiers, kinds and declarations
pub mod class;
pub use class::{ClassDecl, ClassDescriptor, ClassId, ClassKind};

// Validating builder
pub mod builder;
pub use builder::{ClassHierarchyBuilder, HierarchyError};

// The immutable hierarchy graph and its walks
pub mod hierarchy;
pub use hierarchy::{ClassHierarchy, Superclasses};
