//! Recursive Type Mapper
//!
//! Wraps one underlying [`TypeMapper`] and extends its exact-name lookups
//! along the class hierarchy:
//!
//! - Output types fall back through the ancestor chain
//!   ([`ClassHierarchy::ancestors`]) to the nearest class the underlying mapper
//!   can map. The shared instance registered for that class is returned as-is.
//! - Every resolved object type carries exactly the GraphQL interfaces of the
//!   *requested* class: one per ancestor that maps to an interface type.
//!   Classes sharing an object type each get their own interface set.
//! - Input types are never resolved through ancestors. GraphQL input types
//!   cannot implement interfaces, so there is no polymorphism to honour.
//!
//! An ancestor maps to an interface type when the underlying mapper registers
//! one for it, or, with derivation enabled, when it has an object type and
//! other mapped classes below it. Derived interfaces copy the fields of the
//! object type and are named by a [`NamingStrategy`].

use crate::error::{CannotMapTypeError, MappingKind};
use crate::mapper::TypeMapper;
use gqlmap_hierarchy::{ClassHierarchy, ClassId};
use gqlmap_schema::{
    DefaultNamingStrategy, InputObjectType, InterfaceType, NamingStrategy, ObjectType, OutputType,
    ResolvedObjectType,
};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::{debug, trace};

/// Resolves classes to GraphQL types through their ancestors.
#[derive(Debug)]
pub struct RecursiveTypeMapper<M> {
    inner: M,
    hierarchy: Arc<ClassHierarchy>,
    /// Classes with an object type and at least one other mapped class below them
    extended: FxHashSet<ClassId>,
    /// Interfaces derived from the object type of an extended class
    derived: FxHashMap<ClassId, Arc<InterfaceType>>,
}

/// Configures a [`RecursiveTypeMapper`].
#[derive(Debug)]
pub struct RecursiveTypeMapperBuilder<M> {
    inner: M,
    hierarchy: Arc<ClassHierarchy>,
    naming: Option<Box<dyn NamingStrategy>>,
}

impl<M: TypeMapper> RecursiveTypeMapperBuilder<M> {
    /// Derive interfaces for mapped classes that have mapped subclasses.
    #[must_use]
    pub fn derive_interfaces(mut self, naming: impl NamingStrategy + 'static) -> Self {
        self.naming = Some(Box::new(naming));
        self
    }

    /// Derive interfaces named with the default `Interface` suffix.
    #[must_use]
    pub fn derive_interfaces_default(self) -> Self {
        self.derive_interfaces(DefaultNamingStrategy::new())
    }

    /// Build the mapper.
    ///
    /// Fails only when derivation is enabled and the underlying mapper reports
    /// a class as mappable but then cannot produce its object type.
    pub fn build(self) -> Result<RecursiveTypeMapper<M>, CannotMapTypeError> {
        let mut mapper = RecursiveTypeMapper {
            extended: FxHashSet::default(),
            derived: FxHashMap::default(),
            inner: self.inner,
            hierarchy: self.hierarchy,
        };
        mapper.extended = mapper.collect_extended_classes();
        if let Some(naming) = self.naming {
            mapper.derived = mapper.derive_interfaces(naming.as_ref())?;
        }

        debug!(
            classes = mapper.hierarchy.len(),
            extended = mapper.extended.len(),
            derived = mapper.derived.len(),
            "recursive type mapper ready"
        );
        Ok(mapper)
    }
}

impl<M: TypeMapper> RecursiveTypeMapper<M> {
    /// Wrap `inner` without interface derivation.
    pub fn new(inner: M, hierarchy: impl Into<Arc<ClassHierarchy>>) -> Self {
        let mut mapper = RecursiveTypeMapper {
            inner,
            hierarchy: hierarchy.into(),
            extended: FxHashSet::default(),
            derived: FxHashMap::default(),
        };
        mapper.extended = mapper.collect_extended_classes();
        mapper
    }

    pub fn builder(
        inner: M,
        hierarchy: impl Into<Arc<ClassHierarchy>>,
    ) -> RecursiveTypeMapperBuilder<M> {
        RecursiveTypeMapperBuilder {
            inner,
            hierarchy: hierarchy.into(),
            naming: None,
        }
    }

    /// The wrapped mapper
    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn hierarchy(&self) -> &ClassHierarchy {
        &self.hierarchy
    }

    /// Interfaces derived from concrete types, in hierarchy order.
    pub fn derived_interfaces(&self) -> Vec<Arc<InterfaceType>> {
        self.hierarchy
            .iter()
            .filter_map(|class| self.derived.get(&class.id).cloned())
            .collect()
    }

    /// Name of the class whose object type `class_name` resolves to.
    pub fn closest_mapped_class(&self, class_name: &str) -> Option<&str> {
        let id = self.hierarchy.lookup(class_name)?;
        self.closest_mapped(id).map(|owner| self.hierarchy.name(owner))
    }

    /// Whether `class_name` or one of its ancestors has an object type.
    pub fn can_map_class_to_type(&self, class_name: &str) -> bool {
        self.hierarchy
            .lookup(class_name)
            .is_some_and(|id| self.closest_mapped(id).is_some())
    }

    /// Resolve the object type of `class_name`, falling back through its ancestors.
    ///
    /// The object is the instance the underlying mapper holds for the nearest
    /// mapped ancestor. Its interfaces are those of `class_name`, also recorded
    /// on the shared instance under that class name.
    pub fn map_class_to_type(
        &self,
        class_name: &str,
    ) -> Result<ResolvedObjectType, CannotMapTypeError> {
        let id = self.resolve(class_name, MappingKind::Output)?;
        let owner = self
            .closest_mapped(id)
            .ok_or_else(|| CannotMapTypeError::not_mapped(class_name, MappingKind::Output))?;

        let object = self.inner.map_class_to_type(self.hierarchy.name(owner))?;
        let interfaces = self.interfaces_for(id)?;
        object.attach_class_interfaces(class_name, interfaces.clone());

        trace!(
            class = class_name,
            owner = self.hierarchy.name(owner),
            type_name = object.name(),
            interfaces = interfaces.len(),
            "mapped class to object type"
        );
        Ok(ResolvedObjectType::new(class_name, object, interfaces))
    }

    /// Input types are looked up for the exact class only.
    pub fn can_map_class_to_input_type(&self, class_name: &str) -> bool {
        self.inner.can_map_class_to_input_type(class_name)
    }

    pub fn map_class_to_input_type(
        &self,
        class_name: &str,
    ) -> Result<Arc<InputObjectType>, CannotMapTypeError> {
        if !self.inner.can_map_class_to_input_type(class_name) {
            return Err(self.missing(class_name, MappingKind::Input));
        }
        self.inner.map_class_to_input_type(class_name)
    }

    /// GraphQL interfaces implemented by `class_name`.
    ///
    /// One entry per ancestor (the class itself included) that maps to an
    /// interface type, in ancestor-chain order, deduplicated by type name.
    pub fn find_interfaces(
        &self,
        class_name: &str,
    ) -> Result<Vec<Arc<InterfaceType>>, CannotMapTypeError> {
        let id = self.resolve(class_name, MappingKind::Interface)?;
        self.interfaces_for(id)
    }

    /// Resolve `class_name` to the type that best represents it in output
    /// position.
    ///
    /// The decision rests on the closest ancestor with an object type:
    /// - none: the first ancestor mapped to an interface type, if any;
    /// - one with mapped subclasses and an interface form: that interface;
    /// - otherwise the object type from [`map_class_to_type`](Self::map_class_to_type).
    pub fn map_class_to_interface_or_type(
        &self,
        class_name: &str,
    ) -> Result<OutputType, CannotMapTypeError> {
        let id = self.resolve(class_name, MappingKind::Output)?;

        let Some(owner) = self.closest_mapped(id) else {
            for ancestor in self.hierarchy.ancestors(id) {
                if let Some(interface) = self.interface_for(ancestor)? {
                    trace!(
                        class = class_name,
                        source = self.hierarchy.name(ancestor),
                        type_name = interface.name(),
                        "mapped class without object type to interface type"
                    );
                    return Ok(OutputType::Interface(interface));
                }
            }
            return Err(CannotMapTypeError::not_mapped(class_name, MappingKind::Output));
        };

        if self.extended.contains(&owner) {
            if let Some(interface) = self.interface_for(owner)? {
                trace!(
                    class = class_name,
                    source = self.hierarchy.name(owner),
                    type_name = interface.name(),
                    "mapped extended class to interface type"
                );
                return Ok(OutputType::Interface(interface));
            }
        }

        self.map_class_to_type(class_name).map(OutputType::Object)
    }

    fn resolve(&self, class_name: &str, kind: MappingKind) -> Result<ClassId, CannotMapTypeError> {
        self.hierarchy
            .lookup(class_name)
            .ok_or_else(|| CannotMapTypeError::unknown_class(class_name, kind))
    }

    fn missing(&self, class_name: &str, kind: MappingKind) -> CannotMapTypeError {
        if self.hierarchy.contains(class_name) {
            CannotMapTypeError::not_mapped(class_name, kind)
        } else {
            CannotMapTypeError::unknown_class(class_name, kind)
        }
    }

    /// Nearest ancestor (self included) with an object type.
    fn closest_mapped(&self, id: ClassId) -> Option<ClassId> {
        self.hierarchy
            .ancestors(id)
            .into_iter()
            .find(|&a| self.inner.can_map_class_to_type(self.hierarchy.name(a)))
    }

    /// The interface form of a single class: registered, else derived.
    fn interface_for(
        &self,
        id: ClassId,
    ) -> Result<Option<Arc<InterfaceType>>, CannotMapTypeError> {
        let name = self.hierarchy.name(id);
        if self.inner.can_map_class_to_interface(name) {
            return self.inner.map_class_to_interface(name).map(Some);
        }
        Ok(self.derived.get(&id).cloned())
    }

    fn interfaces_for(&self, id: ClassId) -> Result<Vec<Arc<InterfaceType>>, CannotMapTypeError> {
        let mut found: IndexMap<String, Arc<InterfaceType>> = IndexMap::new();
        for ancestor in self.hierarchy.ancestors(id) {
            if let Some(interface) = self.interface_for(ancestor)? {
                found
                    .entry(interface.name().to_string())
                    .or_insert(interface);
            }
        }
        Ok(found.into_values().collect())
    }

    /// Mapped classes that have another mapped class strictly below them.
    fn collect_extended_classes(&self) -> FxHashSet<ClassId> {
        let mut extended = FxHashSet::default();
        for class_name in self.inner.supported_classes() {
            let Some(id) = self.hierarchy.lookup(&class_name) else {
                trace!(class = %class_name, "mapped class is not part of the hierarchy");
                continue;
            };
            for ancestor in self.hierarchy.ancestors(id).into_iter().skip(1) {
                if self
                    .inner
                    .can_map_class_to_type(self.hierarchy.name(ancestor))
                {
                    extended.insert(ancestor);
                }
            }
        }
        extended
    }

    /// Build one interface per extended class lacking a registered one.
    ///
    /// Classes are processed root-most first so that a derived interface can
    /// declare the interfaces of its ancestors as parents.
    fn derive_interfaces(
        &self,
        naming: &dyn NamingStrategy,
    ) -> Result<FxHashMap<ClassId, Arc<InterfaceType>>, CannotMapTypeError> {
        let mut pending: Vec<(usize, ClassId)> = self
            .extended
            .iter()
            .filter(|&&id| {
                !self
                    .inner
                    .can_map_class_to_interface(self.hierarchy.name(id))
            })
            .map(|&id| (self.hierarchy.ancestors(id).len(), id))
            .collect();
        // A proper ancestor always has a strictly shorter ancestor chain
        pending.sort_unstable();

        let mut derived: FxHashMap<ClassId, Arc<InterfaceType>> = FxHashMap::default();
        for (_, id) in pending {
            let class_name = self.hierarchy.name(id);
            let object = self.inner.map_class_to_type(class_name)?;
            let mut interface = InterfaceType::derived_from(
                naming.interface_name_from_concrete(object.name()),
                &object,
            );

            for ancestor in self.hierarchy.ancestors(id).into_iter().skip(1) {
                let ancestor_name = self.hierarchy.name(ancestor);
                if self.inner.can_map_class_to_interface(ancestor_name) {
                    interface = interface.extends(self.inner.map_class_to_interface(ancestor_name)?);
                } else if let Some(parent) = derived.get(&ancestor) {
                    interface = interface.extends(Arc::clone(parent));
                }
            }

            trace!(
                class = class_name,
                interface = interface.name(),
                "derived interface from object type"
            );
            derived.insert(id, Arc::new(interface));
        }

        Ok(derived)
    }
}

impl<M: TypeMapper> TypeMapper for RecursiveTypeMapper<M> {
    fn can_map_class_to_type(&self, class_name: &str) -> bool {
        RecursiveTypeMapper::can_map_class_to_type(self, class_name)
    }

    /// The shared instance; the requested class's interfaces are recorded on
    /// it and readable through [`ObjectType::class_interfaces`].
    fn map_class_to_type(&self, class_name: &str) -> Result<Arc<ObjectType>, CannotMapTypeError> {
        RecursiveTypeMapper::map_class_to_type(self, class_name).map(ResolvedObjectType::into_object)
    }

    fn can_map_class_to_input_type(&self, class_name: &str) -> bool {
        RecursiveTypeMapper::can_map_class_to_input_type(self, class_name)
    }

    fn map_class_to_input_type(
        &self,
        class_name: &str,
    ) -> Result<Arc<InputObjectType>, CannotMapTypeError> {
        RecursiveTypeMapper::map_class_to_input_type(self, class_name)
    }

    /// The interface form of the class itself, registered or derived.
    fn can_map_class_to_interface(&self, class_name: &str) -> bool {
        self.hierarchy
            .lookup(class_name)
            .is_some_and(|id| matches!(self.interface_for(id), Ok(Some(_))))
    }

    fn map_class_to_interface(
        &self,
        class_name: &str,
    ) -> Result<Arc<InterfaceType>, CannotMapTypeError> {
        let id = self.resolve(class_name, MappingKind::Interface)?;
        self.interface_for(id)?
            .ok_or_else(|| CannotMapTypeError::not_mapped(class_name, MappingKind::Interface))
    }

    /// Classes with an object type of their own, as reported by the wrapped mapper.
    fn supported_classes(&self) -> Vec<String> {
        self.inner.supported_classes()
    }
}

#[cfg(test)]
#[path = "tests/recursive_tests.rs"]
mod tests;
