//! GraphQL type model for gqlmap.
//!
//! This crate provides the schema-side values the mappers hand out:
//! - Object, input and interface types (`ObjectType`, `InputObjectType`, `InterfaceType`)
//! - The per-class view of a shared object type (`ResolvedObjectType`)
//! - A name-keyed registry that owns the shared instances (`TypeRegistry`)
//! - Interface naming for types derived from concrete objects (`NamingStrategy`)
//! - An SDL printer (`SdlPrinter`)
//!
//! Types are handed out as `Arc`s. Mapping several classes to one type shares
//! the instance; nothing in the mapping layer clones a type.

pub mod types;
pub use types::{
    FieldDefinition, InputObjectType, InterfaceOrigin, InterfaceType, NamedType, ObjectType,
    OutputType, ResolvedObjectType,
};

pub mod registry;
pub use registry::{DuplicateTypeError, TypeRegistry};

pub mod naming;
pub use naming::{DefaultNamingStrategy, NamingStrategy};

pub mod sdl;
pub use sdl::SdlPrinter;
