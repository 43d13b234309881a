//! Ordered composition of mappers.

use crate::error::{CannotMapTypeError, MappingKind};
use crate::mapper::TypeMapper;
use gqlmap_schema::{InputObjectType, InterfaceType, ObjectType};
use indexmap::IndexSet;
use std::sync::Arc;

/// Tries each mapper in order; the first one that can map a class wins.
#[derive(Default)]
pub struct CompositeTypeMapper {
    mappers: Vec<Box<dyn TypeMapper + Send + Sync>>,
}

impl CompositeTypeMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mapper with lower priority than those already added.
    pub fn push(&mut self, mapper: impl TypeMapper + Send + Sync + 'static) -> &mut Self {
        self.mappers.push(Box::new(mapper));
        self
    }

    #[must_use]
    pub fn with(mut self, mapper: impl TypeMapper + Send + Sync + 'static) -> Self {
        self.push(mapper);
        self
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }
}

impl std::fmt::Debug for CompositeTypeMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeTypeMapper")
            .field("mappers", &self.mappers.len())
            .finish()
    }
}

impl TypeMapper for CompositeTypeMapper {
    fn can_map_class_to_type(&self, class_name: &str) -> bool {
        self.mappers.iter().any(|m| m.can_map_class_to_type(class_name))
    }

    fn map_class_to_type(&self, class_name: &str) -> Result<Arc<ObjectType>, CannotMapTypeError> {
        self.mappers
            .iter()
            .find(|m| m.can_map_class_to_type(class_name))
            .ok_or_else(|| CannotMapTypeError::not_mapped(class_name, MappingKind::Output))?
            .map_class_to_type(class_name)
    }

    fn can_map_class_to_input_type(&self, class_name: &str) -> bool {
        self.mappers
            .iter()
            .any(|m| m.can_map_class_to_input_type(class_name))
    }

    fn map_class_to_input_type(
        &self,
        class_name: &str,
    ) -> Result<Arc<InputObjectType>, CannotMapTypeError> {
        self.mappers
            .iter()
            .find(|m| m.can_map_class_to_input_type(class_name))
            .ok_or_else(|| CannotMapTypeError::not_mapped(class_name, MappingKind::Input))?
            .map_class_to_input_type(class_name)
    }

    fn can_map_class_to_interface(&self, class_name: &str) -> bool {
        self.mappers
            .iter()
            .any(|m| m.can_map_class_to_interface(class_name))
    }

    fn map_class_to_interface(
        &self,
        class_name: &str,
    ) -> Result<Arc<InterfaceType>, CannotMapTypeError> {
        self.mappers
            .iter()
            .find(|m| m.can_map_class_to_interface(class_name))
            .ok_or_else(|| CannotMapTypeError::not_mapped(class_name, MappingKind::Interface))?
            .map_class_to_interface(class_name)
    }

    fn supported_classes(&self) -> Vec<String> {
        let mut classes = IndexSet::new();
        for mapper in &self.mappers {
            classes.extend(mapper.supported_classes());
        }
        classes.into_iter().collect()
    }
}
