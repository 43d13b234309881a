//! Name-keyed store of shared GraphQL types.
//!
//! The registry owns one instance per type name for the lifetime of the
//! schema. Every mapping entry that refers to a type by name receives the
//! same `Arc`, so attaching an interface through one entry is visible
//! through all of them.

use crate::types::{InputObjectType, InterfaceType, NamedType, ObjectType};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::trace;

/// Error returned when a second type is registered under an existing name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateTypeError {
    pub name: String,
}

impl std::fmt::Display for DuplicateTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a GraphQL type named '{}' is already registered", self.name)
    }
}

impl std::error::Error for DuplicateTypeError {}

/// Registered types in registration order.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, NamedType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type under its own name.
    pub fn register(&mut self, ty: NamedType) -> Result<(), DuplicateTypeError> {
        let name = ty.name().to_string();
        if self.types.contains_key(&name) {
            return Err(DuplicateTypeError { name });
        }
        trace!(name = %name, kind = ty.kind_name(), "registered type");
        self.types.insert(name, ty);
        Ok(())
    }

    /// Register an object type and return the shared instance.
    pub fn register_object(
        &mut self,
        object: ObjectType,
    ) -> Result<Arc<ObjectType>, DuplicateTypeError> {
        let object = Arc::new(object);
        self.register(NamedType::Object(Arc::clone(&object)))?;
        Ok(object)
    }

    /// Register an input type and return the shared instance.
    pub fn register_input(
        &mut self,
        input: InputObjectType,
    ) -> Result<Arc<InputObjectType>, DuplicateTypeError> {
        let input = Arc::new(input);
        self.register(NamedType::Input(Arc::clone(&input)))?;
        Ok(input)
    }

    /// Register an interface type and return the shared instance.
    pub fn register_interface(
        &mut self,
        interface: InterfaceType,
    ) -> Result<Arc<InterfaceType>, DuplicateTypeError> {
        let interface = Arc::new(interface);
        self.register(NamedType::Interface(Arc::clone(&interface)))?;
        Ok(interface)
    }

    pub fn get(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get_object(&self, name: &str) -> Option<Arc<ObjectType>> {
        match self.types.get(name) {
            Some(NamedType::Object(object)) => Some(Arc::clone(object)),
            _ => None,
        }
    }

    pub fn get_input(&self, name: &str) -> Option<Arc<InputObjectType>> {
        match self.types.get(name) {
            Some(NamedType::Input(input)) => Some(Arc::clone(input)),
            _ => None,
        }
    }

    pub fn get_interface(&self, name: &str) -> Option<Arc<InterfaceType>> {
        match self.types.get(name) {
            Some(NamedType::Interface(interface)) => Some(Arc::clone(interface)),
            _ => None,
        }
    }

    /// Iterate over all types in registration order
    pub fn iter(&self) -> impl Iterator<Item = &NamedType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
