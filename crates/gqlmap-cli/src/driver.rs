//! Executes a parsed command line against a loaded manifest.

use crate::args::{CliArgs, Command, OutputFormat};
use crate::manifest::{LoadedManifest, load_manifest};
use anyhow::Result;
use gqlmap_mapper::{RecursiveTypeMapper, StaticTypeMapper};
use gqlmap_schema::{
    FieldDefinition, InputObjectType, InterfaceType, NamedType, ObjectType, OutputType,
    ResolvedObjectType, SdlPrinter, TypeRegistry,
};
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info_span};

/// Run the command and return what should be written to stdout.
pub fn run(args: &CliArgs) -> Result<String> {
    let _span = info_span!("run", manifest = %args.manifest.display()).entered();
    let loaded = load_manifest(&args.manifest)?.load()?;
    execute(&loaded, &args.command, args.format)
}

/// Run a command against an already loaded manifest.
pub fn execute(loaded: &LoadedManifest, command: &Command, format: OutputFormat) -> Result<String> {
    let mapper = &loaded.mapper;
    let printer = SdlPrinter::new();
    debug!(?command, ?format, "executing command");

    let output = match command {
        Command::Resolve { class } => {
            let object = mapper.map_class_to_type(class)?;
            let source = mapper.closest_mapped_class(class).unwrap_or(class.as_str());
            match format {
                OutputFormat::Text => printer.print_resolved_object(&object),
                OutputFormat::Json => render_json(&json!({
                    "class": class,
                    "source": source,
                    "type": object_json(object.object(), object.interfaces()),
                })),
            }
        }
        Command::Input { class } => {
            let input = mapper.map_class_to_input_type(class)?;
            match format {
                OutputFormat::Text => printer.print_input(&input),
                OutputFormat::Json => render_json(&json!({
                    "class": class,
                    "type": input_json(&input),
                })),
            }
        }
        Command::Interfaces { class } => {
            let interfaces = mapper.find_interfaces(class)?;
            match format {
                OutputFormat::Text => interfaces
                    .iter()
                    .map(|interface| printer.print_interface(interface))
                    .collect::<Vec<_>>()
                    .join("\n"),
                OutputFormat::Json => render_json(&json!({
                    "class": class,
                    "interfaces": interfaces.iter().map(|i| interface_json(i)).collect::<Vec<_>>(),
                })),
            }
        }
        Command::InterfaceOrType { class } => {
            let resolved = mapper.map_class_to_interface_or_type(class)?;
            match format {
                OutputFormat::Text => printer.print_output(&resolved),
                OutputFormat::Json => render_json(&json!({
                    "class": class,
                    "type": output_json(&resolved),
                })),
            }
        }
        Command::Schema => {
            let schema = collect_schema(mapper, &loaded.registry)?;
            match format {
                OutputFormat::Text => schema.to_sdl(&printer),
                OutputFormat::Json => render_json(&schema.to_json()),
            }
        }
    };
    Ok(output)
}

/// An object type as it appears in the schema.
#[derive(Debug, Clone)]
pub struct SchemaObject {
    pub object: Arc<ObjectType>,
    /// Declared interfaces, then those of every class mapped directly to the type
    pub interfaces: Vec<Arc<InterfaceType>>,
}

/// Every type reachable from the hierarchy, grouped by kind.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub interfaces: Vec<Arc<InterfaceType>>,
    pub objects: Vec<SchemaObject>,
    pub inputs: Vec<Arc<InputObjectType>>,
}

impl Schema {
    pub fn len(&self) -> usize {
        self.interfaces.len() + self.objects.len() + self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Interfaces first, then objects, then inputs, separated by blank lines.
    pub fn to_sdl(&self, printer: &SdlPrinter) -> String {
        let interfaces = self.interfaces.iter().map(|i| printer.print_interface(i));
        let objects = self
            .objects
            .iter()
            .map(|o| printer.print_object_with_interfaces(&o.object, &o.interfaces));
        let inputs = self.inputs.iter().map(|i| printer.print_input(i));
        interfaces
            .chain(objects)
            .chain(inputs)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json(&self) -> Value {
        let interfaces = self.interfaces.iter().map(|i| interface_json(i));
        let objects = self
            .objects
            .iter()
            .map(|o| object_json(&o.object, &o.interfaces));
        let inputs = self.inputs.iter().map(|i| input_json(i));
        Value::Array(interfaces.chain(objects).chain(inputs).collect())
    }
}

/// Collect every type reachable from the hierarchy, plus declared types no
/// class maps to.
///
/// An object type lists the interfaces of the classes that own it, never
/// those of classes that only reach it by falling back to an ancestor.
pub fn collect_schema(
    mapper: &RecursiveTypeMapper<StaticTypeMapper>,
    declared: &TypeRegistry,
) -> Result<Schema> {
    let mut interfaces: IndexMap<String, Arc<InterfaceType>> = IndexMap::new();
    let mut objects: IndexMap<String, SchemaObject> = IndexMap::new();
    let mut inputs: IndexMap<String, Arc<InputObjectType>> = IndexMap::new();

    for class in mapper.hierarchy().iter() {
        let owns_type = mapper.closest_mapped_class(&class.name) == Some(class.name.as_str());
        if owns_type {
            let resolved = mapper.map_class_to_type(&class.name)?;
            add_owned_object(&mut objects, &resolved);
        }
        if mapper.can_map_class_to_input_type(&class.name) {
            let input = mapper.map_class_to_input_type(&class.name)?;
            inputs.entry(input.name().to_string()).or_insert(input);
        }
        for interface in mapper.find_interfaces(&class.name)? {
            collect_interface(&mut interfaces, interface);
        }
    }
    for interface in mapper.derived_interfaces() {
        collect_interface(&mut interfaces, interface);
    }
    // Declared types no class maps to still belong to the schema
    for ty in declared.iter() {
        match ty {
            NamedType::Object(object) => {
                objects
                    .entry(object.name().to_string())
                    .or_insert_with(|| SchemaObject {
                        object: Arc::clone(object),
                        interfaces: object.interfaces().to_vec(),
                    });
            }
            NamedType::Input(input) => {
                inputs
                    .entry(input.name().to_string())
                    .or_insert_with(|| Arc::clone(input));
            }
            NamedType::Interface(interface) => {
                collect_interface(&mut interfaces, Arc::clone(interface));
            }
        }
    }
    for object in objects.values() {
        for interface in &object.interfaces {
            collect_interface(&mut interfaces, Arc::clone(interface));
        }
    }

    let schema = Schema {
        interfaces: interfaces.into_values().collect(),
        objects: objects.into_values().collect(),
        inputs: inputs.into_values().collect(),
    };
    debug!(types = schema.len(), "collected schema");
    Ok(schema)
}

fn add_owned_object(objects: &mut IndexMap<String, SchemaObject>, resolved: &ResolvedObjectType) {
    let entry = objects
        .entry(resolved.name().to_string())
        .or_insert_with(|| SchemaObject {
            object: Arc::clone(resolved.object()),
            interfaces: resolved.object().interfaces().to_vec(),
        });
    for interface in resolved.interfaces() {
        if !entry.interfaces.iter().any(|i| i.name() == interface.name()) {
            entry.interfaces.push(Arc::clone(interface));
        }
    }
}

/// Parents are inserted before the interface that extends them.
fn collect_interface(
    interfaces: &mut IndexMap<String, Arc<InterfaceType>>,
    interface: Arc<InterfaceType>,
) {
    if interfaces.contains_key(interface.name()) {
        return;
    }
    for parent in interface.interfaces() {
        collect_interface(interfaces, Arc::clone(parent));
    }
    interfaces.insert(interface.name().to_string(), interface);
}

fn render_json(value: &Value) -> String {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    out.push('\n');
    out
}

fn fields_json<'a>(fields: impl IntoIterator<Item = &'a FieldDefinition>) -> Vec<Value> {
    fields
        .into_iter()
        .map(|field| {
            json!({
                "name": field.name,
                "type": field.type_ref,
                "description": field.description,
            })
        })
        .collect()
}

fn object_json(object: &ObjectType, interfaces: &[Arc<InterfaceType>]) -> Value {
    json!({
        "kind": "type",
        "name": object.name(),
        "description": object.description_text(),
        "fields": fields_json(object.field_definitions()),
        "interfaces": interfaces.iter().map(|i| i.name()).collect::<Vec<_>>(),
    })
}

fn input_json(input: &InputObjectType) -> Value {
    json!({
        "kind": "input",
        "name": input.name(),
        "description": input.description_text(),
        "fields": fields_json(input.field_definitions()),
    })
}

fn interface_json(interface: &InterfaceType) -> Value {
    json!({
        "kind": "interface",
        "name": interface.name(),
        "description": interface.description_text(),
        "fields": fields_json(interface.field_definitions()),
        "interfaces": interface
            .interfaces()
            .iter()
            .map(|parent| parent.name())
            .collect::<Vec<_>>(),
        "derived": interface.is_derived(),
    })
}

fn output_json(output: &OutputType) -> Value {
    match output {
        OutputType::Object(resolved) => object_json(resolved.object(), resolved.interfaces()),
        OutputType::Interface(interface) => interface_json(interface),
    }
}
