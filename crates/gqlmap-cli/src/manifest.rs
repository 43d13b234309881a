//! Mapping manifest: the JSON file describing classes, GraphQL types and
//! the tables that connect them.
//!
//! ```json
//! {
//!   "deriveInterfaces": false,
//!   "classes": [
//!     { "name": "App\\ClassA", "kind": "interface" },
//!     { "name": "App\\ClassB", "implements": ["App\\ClassA"] },
//!     { "name": "App\\ClassC", "extends": "App\\ClassB" }
//!   ],
//!   "types": [
//!     { "kind": "interface", "name": "ClassAInterface", "fields": [{ "name": "foo", "type": "String!" }] },
//!     { "kind": "object", "name": "ClassB", "fields": [{ "name": "foo", "type": "String!" }] }
//!   ],
//!   "objects": { "App\\ClassB": "ClassB" },
//!   "interfaces": { "App\\ClassA": "ClassAInterface" }
//! }
//! ```
//!
//! Interfaces listed in another interface's `implements` must be declared
//! before it in `types`.

use anyhow::{Context, Result, bail};
use gqlmap_hierarchy::{ClassDecl, ClassHierarchy, ClassHierarchyBuilder};
use gqlmap_mapper::{RecursiveTypeMapper, StaticTypeMapper};
use gqlmap_schema::{
    DefaultNamingStrategy, FieldDefinition, InputObjectType, InterfaceType, ObjectType,
    TypeRegistry,
};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Derive interfaces for mapped classes that have mapped subclasses.
    #[serde(default)]
    pub derive_interfaces: bool,
    /// Suffix appended to derived interface names.
    #[serde(default)]
    pub interface_suffix: Option<String>,
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    /// class name -> object type name
    #[serde(default)]
    pub objects: IndexMap<String, String>,
    /// class name -> input type name
    #[serde(default)]
    pub inputs: IndexMap<String, String>,
    /// class or interface name -> interface type name
    #[serde(default)]
    pub interfaces: IndexMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Object,
    Input,
    Interface,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    /// Interface type names this type implements
    #[serde(default)]
    pub implements: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl FieldDecl {
    fn to_definition(&self) -> FieldDefinition {
        let field = FieldDefinition::new(&self.name, &self.type_ref);
        match &self.description {
            Some(description) => field.description(description),
            None => field,
        }
    }
}

/// Everything a manifest resolves to.
#[derive(Debug)]
pub struct LoadedManifest {
    pub hierarchy: Arc<ClassHierarchy>,
    pub registry: TypeRegistry,
    pub mapper: RecursiveTypeMapper<StaticTypeMapper>,
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    parse_manifest(&source).with_context(|| format!("invalid manifest {}", path.display()))
}

pub fn parse_manifest(source: &str) -> Result<Manifest> {
    serde_json::from_str(source).context("failed to parse manifest JSON")
}

impl Manifest {
    /// Build the hierarchy, the shared types and the mappers.
    pub fn load(self) -> Result<LoadedManifest> {
        let mut builder = ClassHierarchyBuilder::new();
        for decl in self.classes {
            builder.declare(decl);
        }
        let hierarchy = Arc::new(builder.build().context("invalid class hierarchy")?);

        let registry = build_registry(&self.types)?;
        let static_mapper = build_static_mapper(
            &registry,
            &hierarchy,
            &self.objects,
            &self.inputs,
            &self.interfaces,
        )?;

        let mut mapper_builder = RecursiveTypeMapper::builder(static_mapper, Arc::clone(&hierarchy));
        if self.derive_interfaces {
            let naming = match self.interface_suffix {
                Some(suffix) => DefaultNamingStrategy::with_suffix(suffix),
                None => DefaultNamingStrategy::new(),
            };
            mapper_builder = mapper_builder.derive_interfaces(naming);
        }
        let mapper = mapper_builder
            .build()
            .context("failed to derive interface types")?;

        debug!(
            classes = hierarchy.len(),
            types = registry.len(),
            "loaded manifest"
        );
        Ok(LoadedManifest {
            hierarchy,
            registry,
            mapper,
        })
    }
}

fn build_registry(types: &[TypeDecl]) -> Result<TypeRegistry> {
    let mut registry = TypeRegistry::new();

    // Interfaces first, so objects may implement interfaces declared after them
    for decl in types.iter().filter(|t| t.kind == TypeKind::Interface) {
        let mut interface = InterfaceType::new(&decl.name)
            .fields(decl.fields.iter().map(FieldDecl::to_definition));
        if let Some(description) = &decl.description {
            interface = interface.description(description);
        }
        for parent in &decl.implements {
            let Some(parent_type) = registry.get_interface(parent) else {
                bail!(
                    "interface '{}' implements '{}', which is not an interface declared before it",
                    decl.name,
                    parent
                );
            };
            interface = interface.extends(parent_type);
        }
        registry.register_interface(interface)?;
    }

    for decl in types.iter().filter(|t| t.kind != TypeKind::Interface) {
        match decl.kind {
            TypeKind::Object => {
                let mut object = ObjectType::new(&decl.name)
                    .fields(decl.fields.iter().map(FieldDecl::to_definition));
                if let Some(description) = &decl.description {
                    object = object.description(description);
                }
                for name in &decl.implements {
                    let interface = registry.get_interface(name).with_context(|| {
                        format!(
                            "object type '{}' implements unknown interface '{}'",
                            decl.name, name
                        )
                    })?;
                    object = object.implements(interface);
                }
                registry.register_object(object)?;
            }
            TypeKind::Input => {
                if !decl.implements.is_empty() {
                    bail!("input type '{}' cannot implement interfaces", decl.name);
                }
                let mut input = InputObjectType::new(&decl.name)
                    .fields(decl.fields.iter().map(FieldDecl::to_definition));
                if let Some(description) = &decl.description {
                    input = input.description(description);
                }
                registry.register_input(input)?;
            }
            TypeKind::Interface => {}
        }
    }

    Ok(registry)
}

fn build_static_mapper(
    registry: &TypeRegistry,
    hierarchy: &ClassHierarchy,
    objects: &IndexMap<String, String>,
    inputs: &IndexMap<String, String>,
    interfaces: &IndexMap<String, String>,
) -> Result<StaticTypeMapper> {
    let check_class = |class: &str| -> Result<()> {
        if !hierarchy.contains(class) {
            bail!("mapping references undeclared class '{class}'");
        }
        Ok(())
    };

    let mut object_table = Vec::with_capacity(objects.len());
    for (class, type_name) in objects {
        check_class(class)?;
        let object = registry
            .get_object(type_name)
            .with_context(|| format!("class '{class}' maps to unknown object type '{type_name}'"))?;
        object_table.push((class.clone(), object));
    }

    let mut input_table = Vec::with_capacity(inputs.len());
    for (class, type_name) in inputs {
        check_class(class)?;
        let input = registry
            .get_input(type_name)
            .with_context(|| format!("class '{class}' maps to unknown input type '{type_name}'"))?;
        input_table.push((class.clone(), input));
    }

    let mut interface_table = Vec::with_capacity(interfaces.len());
    for (class, type_name) in interfaces {
        check_class(class)?;
        let interface = registry.get_interface(type_name).with_context(|| {
            format!("class '{class}' maps to unknown interface type '{type_name}'")
        })?;
        interface_table.push((class.clone(), interface));
    }

    let mut mapper = StaticTypeMapper::new();
    mapper
        .set_types(object_table)
        .set_input_types(input_table)
        .set_interfaces(interface_table);
    Ok(mapper)
}
