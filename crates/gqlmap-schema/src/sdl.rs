//! SDL Printer - render type values as GraphQL schema definition language.
//!
//! Only the shape of named types is printed. Field type references are
//! written verbatim, so the output is exactly as precise as the input.

use crate::types::{
    FieldDefinition, InputObjectType, InterfaceType, NamedType, ObjectType, OutputType,
    ResolvedObjectType,
};
use std::fmt::Write;
use std::sync::Arc;

/// Prints GraphQL types as SDL.
///
/// # Examples
///
/// ```
/// use gqlmap_schema::{FieldDefinition, ObjectType, SdlPrinter};
///
/// let post = ObjectType::new("Post").field(FieldDefinition::new("id", "ID!"));
/// assert_eq!(SdlPrinter::new().print_object(&post), "type Post {\n  id: ID!\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct SdlPrinter {
    indent: String,
}

impl SdlPrinter {
    pub fn new() -> Self {
        Self::with_indent(2)
    }

    pub fn with_indent(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
        }
    }

    /// Print an object type with its declared interfaces.
    pub fn print_object(&self, object: &ObjectType) -> String {
        self.print_object_with_interfaces(object, object.interfaces())
    }

    /// Print an object type with the interfaces of the class it was resolved for.
    pub fn print_resolved_object(&self, resolved: &ResolvedObjectType) -> String {
        self.print_object_with_interfaces(resolved.object(), resolved.interfaces())
    }

    pub fn print_object_with_interfaces(
        &self,
        object: &ObjectType,
        interfaces: &[Arc<InterfaceType>],
    ) -> String {
        let mut out = String::new();
        self.print_description(&mut out, "", object.description_text());
        out.push_str("type ");
        out.push_str(object.name());
        self.print_implements(&mut out, interfaces);
        self.print_fields(&mut out, object.field_definitions());
        out
    }

    pub fn print_input(&self, input: &InputObjectType) -> String {
        let mut out = String::new();
        self.print_description(&mut out, "", input.description_text());
        out.push_str("input ");
        out.push_str(input.name());
        self.print_fields(&mut out, input.field_definitions());
        out
    }

    pub fn print_interface(&self, interface: &InterfaceType) -> String {
        let mut out = String::new();
        self.print_description(&mut out, "", interface.description_text());
        out.push_str("interface ");
        out.push_str(interface.name());
        self.print_implements(&mut out, interface.interfaces());
        self.print_fields(&mut out, interface.field_definitions());
        out
    }

    pub fn print_output(&self, output: &OutputType) -> String {
        match output {
            OutputType::Object(resolved) => self.print_resolved_object(resolved),
            OutputType::Interface(interface) => self.print_interface(interface),
        }
    }

    pub fn print_named(&self, ty: &NamedType) -> String {
        match ty {
            NamedType::Object(object) => self.print_object(object),
            NamedType::Input(input) => self.print_input(input),
            NamedType::Interface(interface) => self.print_interface(interface),
        }
    }

    /// Print several types separated by blank lines.
    pub fn print_all<'a>(&self, types: impl IntoIterator<Item = &'a NamedType>) -> String {
        types
            .into_iter()
            .map(|ty| self.print_named(ty))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn print_implements(&self, out: &mut String, interfaces: &[Arc<InterfaceType>]) {
        if interfaces.is_empty() {
            return;
        }
        let names: Vec<&str> = interfaces.iter().map(|i| i.name()).collect();
        out.push_str(" implements ");
        out.push_str(&names.join(" & "));
    }

    fn print_fields(&self, out: &mut String, fields: &[FieldDefinition]) {
        // A type without fields is printed as a bare declaration
        if fields.is_empty() {
            out.push('\n');
            return;
        }

        out.push_str(" {\n");
        for field in fields {
            self.print_description(out, &self.indent, field.description.as_deref());
            let _ = writeln!(out, "{}{}: {}", self.indent, field.name, field.type_ref);
        }
        out.push_str("}\n");
    }

    fn print_description(&self, out: &mut String, indent: &str, description: Option<&str>) {
        let Some(description) = description else {
            return;
        };
        if description.contains('\n') || description.contains('"') {
            let _ = writeln!(out, "{indent}\"\"\"");
            for line in description.lines() {
                let _ = writeln!(out, "{indent}{}", line.replace("\"\"\"", "\\\"\"\""));
            }
            let _ = writeln!(out, "{indent}\"\"\"");
        } else {
            let _ = writeln!(out, "{indent}\"{description}\"");
        }
    }
}

impl Default for SdlPrinter {
    fn default() -> Self {
        Self::new()
    }
}
