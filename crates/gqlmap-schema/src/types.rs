//! GraphQL type values.

use indexmap::IndexMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A field of an object, input or interface type.
///
/// `type_ref` is kept as written in SDL (`String!`, `[Post!]!`); resolving
/// it against other types is the schema generator's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub type_ref: String,
    pub description: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A concrete GraphQL object type.
///
/// Interfaces passed to [`implements`](Self::implements) are declared by the
/// type itself. Resolvers record the interfaces of each class mapped onto a
/// shared instance separately, keyed by class name, so one class never sees
/// the interfaces of another.
#[derive(Debug)]
pub struct ObjectType {
    name: String,
    description: Option<String>,
    fields: Vec<FieldDefinition>,
    interfaces: Vec<Arc<InterfaceType>>,
    class_interfaces: RwLock<IndexMap<String, Vec<Arc<InterfaceType>>>>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            interfaces: Vec::new(),
            class_interfaces: RwLock::new(IndexMap::new()),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDefinition>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Declare an interface. Idempotent by interface name.
    #[must_use]
    pub fn implements(mut self, interface: Arc<InterfaceType>) -> Self {
        if !self.interfaces.iter().any(|i| i.name() == interface.name()) {
            self.interfaces.push(interface);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn field_definitions(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Interfaces declared by the type itself.
    pub fn interfaces(&self) -> &[Arc<InterfaceType>] {
        &self.interfaces
    }

    pub fn interface_names(&self) -> Vec<&str> {
        self.interfaces.iter().map(|i| i.name()).collect()
    }

    pub fn implements_interface(&self, name: &str) -> bool {
        self.interfaces.iter().any(|i| i.name() == name)
    }

    /// Record the interfaces `class_name` implements when it resolves to
    /// this type. Replaces any earlier record for the same class.
    pub fn attach_class_interfaces(&self, class_name: &str, interfaces: Vec<Arc<InterfaceType>>) {
        self.class_interfaces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(class_name.to_string(), interfaces);
    }

    /// Interfaces recorded for `class_name`, if that class was resolved to this type.
    pub fn class_interfaces(&self, class_name: &str) -> Option<Vec<Arc<InterfaceType>>> {
        self.class_interfaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class_name)
            .cloned()
    }

    /// Classes with recorded interfaces, in first-resolution order.
    pub fn attached_classes(&self) -> Vec<String> {
        self.class_interfaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

/// An object type as resolved for one class.
///
/// `object` is the shared instance; `interfaces` are exactly those of the
/// requested class, which may differ between classes sharing the instance.
#[derive(Debug, Clone)]
pub struct ResolvedObjectType {
    class_name: String,
    object: Arc<ObjectType>,
    interfaces: Vec<Arc<InterfaceType>>,
}

impl ResolvedObjectType {
    pub fn new(
        class_name: impl Into<String>,
        object: Arc<ObjectType>,
        interfaces: Vec<Arc<InterfaceType>>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            object,
            interfaces,
        }
    }

    /// The class this type was resolved for.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The shared instance.
    pub fn object(&self) -> &Arc<ObjectType> {
        &self.object
    }

    pub fn into_object(self) -> Arc<ObjectType> {
        self.object
    }

    pub fn name(&self) -> &str {
        self.object.name()
    }

    pub fn description_text(&self) -> Option<&str> {
        self.object.description_text()
    }

    pub fn field_definitions(&self) -> &[FieldDefinition] {
        self.object.field_definitions()
    }

    pub fn interfaces(&self) -> &[Arc<InterfaceType>] {
        &self.interfaces
    }

    pub fn interface_names(&self) -> Vec<&str> {
        self.interfaces.iter().map(|i| i.name()).collect()
    }

    pub fn implements_interface(&self, name: &str) -> bool {
        self.interfaces.iter().any(|i| i.name() == name)
    }

    /// Both sides share the same object instance.
    pub fn ptr_eq(&self, other: &ResolvedObjectType) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

/// A GraphQL input object type. Input types cannot implement interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObjectType {
    name: String,
    description: Option<String>,
    fields: Vec<FieldDefinition>,
}

impl InputObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDefinition>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn field_definitions(&self) -> &[FieldDefinition] {
        &self.fields
    }
}

/// Where an interface type came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceOrigin {
    /// Registered explicitly for a source class or interface.
    Declared,
    /// Built from a concrete object type whose class has mapped subclasses.
    DerivedFrom { object_type: String },
}

/// A GraphQL interface type.
#[derive(Debug)]
pub struct InterfaceType {
    name: String,
    description: Option<String>,
    fields: Vec<FieldDefinition>,
    interfaces: Vec<Arc<InterfaceType>>,
    origin: InterfaceOrigin,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            interfaces: Vec::new(),
            origin: InterfaceOrigin::Declared,
        }
    }

    /// Build an interface exposing the same fields as `object`.
    ///
    /// The object's own interfaces become the parents of the new interface.
    pub fn derived_from(name: impl Into<String>, object: &ObjectType) -> Self {
        Self {
            name: name.into(),
            description: object.description.clone(),
            fields: object.fields.clone(),
            interfaces: object.interfaces.clone(),
            origin: InterfaceOrigin::DerivedFrom {
                object_type: object.name.clone(),
            },
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDefinition>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Declare a parent interface.
    #[must_use]
    pub fn extends(mut self, parent: Arc<InterfaceType>) -> Self {
        if !self.interfaces.iter().any(|i| i.name() == parent.name()) {
            self.interfaces.push(parent);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn field_definitions(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn interfaces(&self) -> &[Arc<InterfaceType>] {
        &self.interfaces
    }

    pub fn origin(&self) -> &InterfaceOrigin {
        &self.origin
    }

    pub fn is_derived(&self) -> bool {
        matches!(self.origin, InterfaceOrigin::DerivedFrom { .. })
    }
}

/// A type usable in output position: either a concrete object or an interface.
#[derive(Debug, Clone)]
pub enum OutputType {
    Object(ResolvedObjectType),
    Interface(Arc<InterfaceType>),
}

impl OutputType {
    pub fn name(&self) -> &str {
        match self {
            OutputType::Object(object) => object.name(),
            OutputType::Interface(interface) => interface.name(),
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, OutputType::Interface(_))
    }

    pub fn as_object(&self) -> Option<&ResolvedObjectType> {
        match self {
            OutputType::Object(object) => Some(object),
            OutputType::Interface(_) => None,
        }
    }

    pub fn as_interface(&self) -> Option<&Arc<InterfaceType>> {
        match self {
            OutputType::Object(_) => None,
            OutputType::Interface(interface) => Some(interface),
        }
    }

    /// Identity comparison: both sides refer to the same shared instance.
    pub fn ptr_eq(&self, other: &OutputType) -> bool {
        match (self, other) {
            (OutputType::Object(a), OutputType::Object(b)) => a.ptr_eq(b),
            (OutputType::Interface(a), OutputType::Interface(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<ResolvedObjectType> for OutputType {
    fn from(object: ResolvedObjectType) -> Self {
        OutputType::Object(object)
    }
}

impl From<Arc<InterfaceType>> for OutputType {
    fn from(interface: Arc<InterfaceType>) -> Self {
        OutputType::Interface(interface)
    }
}

/// Any named type held by a [`TypeRegistry`](crate::TypeRegistry).
#[derive(Debug, Clone)]
pub enum NamedType {
    Object(Arc<ObjectType>),
    Input(Arc<InputObjectType>),
    Interface(Arc<InterfaceType>),
}

impl NamedType {
    pub fn name(&self) -> &str {
        match self {
            NamedType::Object(object) => object.name(),
            NamedType::Input(input) => input.name(),
            NamedType::Interface(interface) => interface.name(),
        }
    }

    /// GraphQL keyword for this kind of type.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NamedType::Object(_) => "type",
            NamedType::Input(_) => "input",
            NamedType::Interface(_) => "interface",
        }
    }
}

impl From<OutputType> for NamedType {
    fn from(output: OutputType) -> Self {
        match output {
            OutputType::Object(object) => NamedType::Object(object.into_object()),
            OutputType::Interface(interface) => NamedType::Interface(interface),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_interfaces_are_idempotent_by_name() {
        let object = ObjectType::new("Post")
            .implements(Arc::new(InterfaceType::new("Node")))
            .implements(Arc::new(InterfaceType::new("Node")))
            .implements(Arc::new(InterfaceType::new("Timestamped")));

        assert_eq!(object.interface_names(), vec!["Node", "Timestamped"]);
        assert!(object.implements_interface("Timestamped"));
    }

    #[test]
    fn test_class_interfaces_are_kept_apart() {
        let shared = Arc::new(ObjectType::new("Animal"));
        let alias = Arc::clone(&shared);

        alias.attach_class_interfaces("Dog", vec![Arc::new(InterfaceType::new("Walker"))]);
        shared.attach_class_interfaces("Fish", vec![Arc::new(InterfaceType::new("Swimmer"))]);

        let dog = shared.class_interfaces("Dog").unwrap();
        assert_eq!(dog.len(), 1);
        assert_eq!(dog[0].name(), "Walker");
        let fish = alias.class_interfaces("Fish").unwrap();
        assert_eq!(fish.len(), 1);
        assert_eq!(fish[0].name(), "Swimmer");

        assert!(shared.class_interfaces("Animal").is_none());
        assert!(shared.interfaces().is_empty());
        assert_eq!(shared.attached_classes(), vec!["Dog", "Fish"]);
    }

    #[test]
    fn test_attaching_again_replaces_the_class_record() {
        let object = ObjectType::new("Post");
        object.attach_class_interfaces("Post", vec![Arc::new(InterfaceType::new("Node"))]);
        object.attach_class_interfaces("Post", Vec::new());

        assert_eq!(object.class_interfaces("Post").map(|i| i.len()), Some(0));
        assert_eq!(object.attached_classes(), vec!["Post"]);
    }

    #[test]
    fn test_derived_interface_copies_fields() {
        let node = Arc::new(InterfaceType::new("Node").field(FieldDefinition::new("id", "ID!")));
        let object = ObjectType::new("ClassA")
            .description("An A")
            .field(FieldDefinition::new("id", "ID!"))
            .field(FieldDefinition::new("foo", "String"))
            .implements(node);

        let derived = InterfaceType::derived_from("ClassAInterface", &object);
        assert_eq!(derived.name(), "ClassAInterface");
        assert_eq!(derived.field_definitions(), object.field_definitions());
        assert_eq!(derived.description_text(), Some("An A"));
        assert_eq!(derived.interfaces().len(), 1);
        assert_eq!(
            derived.origin(),
            &InterfaceOrigin::DerivedFrom {
                object_type: "ClassA".to_string()
            }
        );
        assert!(derived.is_derived());
    }

    #[test]
    fn test_output_type_identity() {
        let object = Arc::new(ObjectType::new("ClassB"));
        let walker = Arc::new(InterfaceType::new("Walker"));
        let a = OutputType::from(ResolvedObjectType::new(
            "Dog",
            Arc::clone(&object),
            vec![walker],
        ));
        let b = OutputType::from(ResolvedObjectType::new("Fish", object, Vec::new()));
        let c = OutputType::from(ResolvedObjectType::new(
            "Dog",
            Arc::new(ObjectType::new("ClassB")),
            Vec::new(),
        ));

        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert_eq!(c.name(), "ClassB");
        assert!(c.as_interface().is_none());

        let dog = a.as_object().unwrap();
        assert_eq!(dog.class_name(), "Dog");
        assert_eq!(dog.interface_names(), vec!["Walker"]);
        assert!(b.as_object().unwrap().interfaces().is_empty());
    }
}
