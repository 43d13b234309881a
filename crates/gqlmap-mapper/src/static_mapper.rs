//! Static Type Mapper
//!
//! Holds pre-built types in fixed tables keyed by exact class name. Lookups
//! never consult the class hierarchy: a class is mappable only if it was put
//! in the table itself.

use crate::error::{CannotMapTypeError, MappingKind};
use crate::mapper::TypeMapper;
use gqlmap_schema::{InputObjectType, InterfaceType, ObjectType};
use indexmap::IndexMap;
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
pub struct StaticTypeMapper {
    types: IndexMap<String, Arc<ObjectType>>,
    input_types: IndexMap<String, Arc<InputObjectType>>,
    interfaces: IndexMap<String, Arc<InterfaceType>>,
}

impl StaticTypeMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the object-type table.
    pub fn set_types<K: Into<String>>(
        &mut self,
        types: impl IntoIterator<Item = (K, Arc<ObjectType>)>,
    ) -> &mut Self {
        self.types = types.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }

    /// Replace the input-type table.
    pub fn set_input_types<K: Into<String>>(
        &mut self,
        input_types: impl IntoIterator<Item = (K, Arc<InputObjectType>)>,
    ) -> &mut Self {
        self.input_types = input_types.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }

    /// Replace the interface table, keyed by source class or interface name.
    pub fn set_interfaces<K: Into<String>>(
        &mut self,
        interfaces: impl IntoIterator<Item = (K, Arc<InterfaceType>)>,
    ) -> &mut Self {
        self.interfaces = interfaces.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }

    /// Total number of entries across all tables
    pub fn len(&self) -> usize {
        self.types.len() + self.input_types.len() + self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TypeMapper for StaticTypeMapper {
    fn can_map_class_to_type(&self, class_name: &str) -> bool {
        self.types.contains_key(class_name)
    }

    fn map_class_to_type(&self, class_name: &str) -> Result<Arc<ObjectType>, CannotMapTypeError> {
        self.types
            .get(class_name)
            .cloned()
            .ok_or_else(|| CannotMapTypeError::not_mapped(class_name, MappingKind::Output))
    }

    fn can_map_class_to_input_type(&self, class_name: &str) -> bool {
        self.input_types.contains_key(class_name)
    }

    fn map_class_to_input_type(
        &self,
        class_name: &str,
    ) -> Result<Arc<InputObjectType>, CannotMapTypeError> {
        self.input_types
            .get(class_name)
            .cloned()
            .ok_or_else(|| CannotMapTypeError::not_mapped(class_name, MappingKind::Input))
    }

    fn can_map_class_to_interface(&self, class_name: &str) -> bool {
        self.interfaces.contains_key(class_name)
    }

    fn map_class_to_interface(
        &self,
        class_name: &str,
    ) -> Result<Arc<InterfaceType>, CannotMapTypeError> {
        self.interfaces
            .get(class_name)
            .cloned()
            .ok_or_else(|| CannotMapTypeError::not_mapped(class_name, MappingKind::Interface))
    }

    fn supported_classes(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }
}
