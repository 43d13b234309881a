//! Validating construction of a [`ClassHierarchy`].
//!
//! Declarations may reference parents that are declared later; all links are
//! resolved in [`ClassHierarchyBuilder::build`], which also rejects anything
//! that would make the ancestor walks ill-defined (dangling names, classes
//! extending interfaces, interfaces implementing classes, cycles).

use crate::class::{ClassDecl, ClassDescriptor, ClassId, ClassKind};
use crate::hierarchy::ClassHierarchy;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::debug;

/// Error returned when a set of declarations does not form a valid hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// The same name was declared twice.
    DuplicateClass { name: String },
    /// A superclass or interface name that was never declared.
    UnknownParent { class: String, parent: String },
    /// A class names an interface as its superclass.
    ExtendsInterface { class: String, superclass: String },
    /// An interface declares a superclass.
    InterfaceWithSuperclass { interface: String, superclass: String },
    /// A class or interface lists a class in its interface list.
    ImplementsClass { class: String, target: String },
    /// Following superclass/interface links leads back to the start.
    Cycle { path: Vec<String> },
}

impl std::fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HierarchyError::DuplicateClass { name } => {
                write!(f, "class '{name}' is declared more than once")
            }
            HierarchyError::UnknownParent { class, parent } => {
                write!(f, "class '{class}' references undeclared parent '{parent}'")
            }
            HierarchyError::ExtendsInterface { class, superclass } => write!(
                f,
                "class '{class}' cannot extend '{superclass}': it is an interface"
            ),
            HierarchyError::InterfaceWithSuperclass {
                interface,
                superclass,
            } => write!(
                f,
                "interface '{interface}' cannot declare superclass '{superclass}'"
            ),
            HierarchyError::ImplementsClass { class, target } => write!(
                f,
                "'{class}' cannot implement '{target}': it is not an interface"
            ),
            HierarchyError::Cycle { path } => {
                write!(f, "inheritance cycle detected: {}", path.join(" -> "))
            }
        }
    }
}

impl std::error::Error for HierarchyError {}

/// Collects class declarations and resolves them into a [`ClassHierarchy`].
#[derive(Debug, Default)]
pub struct ClassHierarchyBuilder {
    decls: IndexMap<String, ClassDecl>,
    duplicates: Vec<String>,
}

impl ClassHierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration. Duplicate names are reported by [`build`](Self::build).
    pub fn declare(&mut self, decl: ClassDecl) -> &mut Self {
        if self.decls.contains_key(&decl.name) {
            self.duplicates.push(decl.name);
        } else {
            self.decls.insert(decl.name.clone(), decl);
        }
        self
    }

    /// Declare a class with an optional superclass and its direct interfaces.
    pub fn class(&mut self, name: &str, extends: Option<&str>, implements: &[&str]) -> &mut Self {
        let mut decl = ClassDecl::class(name);
        decl.extends = extends.map(str::to_string);
        decl.implements = implements.iter().map(|s| s.to_string()).collect();
        self.declare(decl)
    }

    /// Declare an interface extending zero or more interfaces.
    pub fn interface(&mut self, name: &str, extends: &[&str]) -> &mut Self {
        let mut decl = ClassDecl::interface(name);
        decl.implements = extends.iter().map(|s| s.to_string()).collect();
        self.declare(decl)
    }

    /// Number of distinct declarations collected so far.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Resolve all links and validate the graph.
    pub fn build(self) -> Result<ClassHierarchy, HierarchyError> {
        if let Some(name) = self.duplicates.into_iter().next() {
            return Err(HierarchyError::DuplicateClass { name });
        }

        let by_name: FxHashMap<String, ClassId> = self
            .decls
            .keys()
            .enumerate()
            .map(|(index, name)| (name.clone(), ClassId(index as u32)))
            .collect();

        let mut classes = Vec::with_capacity(self.decls.len());
        for (index, decl) in self.decls.values().enumerate() {
            classes.push(resolve_decl(
                ClassId(index as u32),
                decl,
                &self.decls,
                &by_name,
            )?);
        }

        detect_cycle(&classes)?;

        let hierarchy = ClassHierarchy::from_parts(classes, by_name);
        debug!(
            classes = hierarchy.len(),
            interfaces = hierarchy.iter().filter(|c| c.is_interface()).count(),
            "built class hierarchy"
        );
        Ok(hierarchy)
    }
}

fn resolve_decl(
    id: ClassId,
    decl: &ClassDecl,
    decls: &IndexMap<String, ClassDecl>,
    by_name: &FxHashMap<String, ClassId>,
) -> Result<ClassDescriptor, HierarchyError> {
    let lookup = |parent: &str| -> Result<(ClassId, ClassKind), HierarchyError> {
        match (by_name.get(parent), decls.get(parent)) {
            (Some(&parent_id), Some(parent_decl)) => Ok((parent_id, parent_decl.kind)),
            _ => Err(HierarchyError::UnknownParent {
                class: decl.name.clone(),
                parent: parent.to_string(),
            }),
        }
    };

    let superclass = match decl.extends.as_deref() {
        None => None,
        Some(superclass) if decl.kind.is_interface() => {
            return Err(HierarchyError::InterfaceWithSuperclass {
                interface: decl.name.clone(),
                superclass: superclass.to_string(),
            });
        }
        Some(superclass) => {
            let (parent_id, parent_kind) = lookup(superclass)?;
            if parent_kind.is_interface() {
                return Err(HierarchyError::ExtendsInterface {
                    class: decl.name.clone(),
                    superclass: superclass.to_string(),
                });
            }
            Some(parent_id)
        }
    };

    let mut interfaces: SmallVec<[ClassId; 4]> = SmallVec::new();
    for target in &decl.implements {
        let (target_id, target_kind) = lookup(target)?;
        if !target_kind.is_interface() {
            return Err(HierarchyError::ImplementsClass {
                class: decl.name.clone(),
                target: target.clone(),
            });
        }
        // Repeated declarations collapse to the first occurrence
        if !interfaces.contains(&target_id) {
            interfaces.push(target_id);
        }
    }

    Ok(ClassDescriptor {
        id,
        name: decl.name.clone(),
        kind: decl.kind,
        superclass,
        interfaces,
    })
}

/// Depth-first search over superclass and interface links.
fn detect_cycle(classes: &[ClassDescriptor]) -> Result<(), HierarchyError> {
    let mut visited = FxHashSet::default();
    let mut on_path = FxHashSet::default();
    let mut path = Vec::new();

    for class in classes {
        if !visited.contains(&class.id) {
            if let Some(cycle) = visit(class.id, classes, &mut visited, &mut on_path, &mut path) {
                return Err(HierarchyError::Cycle {
                    path: cycle
                        .into_iter()
                        .map(|id| classes[id.index()].name.clone())
                        .collect(),
                });
            }
        }
    }

    Ok(())
}

fn visit(
    id: ClassId,
    classes: &[ClassDescriptor],
    visited: &mut FxHashSet<ClassId>,
    on_path: &mut FxHashSet<ClassId>,
    path: &mut Vec<ClassId>,
) -> Option<Vec<ClassId>> {
    if on_path.contains(&id) {
        // Slice the current path from the first occurrence and close the loop
        let start = path.iter().position(|&p| p == id).unwrap_or(0);
        let mut cycle = path[start..].to_vec();
        cycle.push(id);
        return Some(cycle);
    }
    if visited.contains(&id) {
        return None;
    }

    on_path.insert(id);
    path.push(id);

    let class = &classes[id.index()];
    for parent in class.superclass.iter().chain(class.interfaces.iter()) {
        if let Some(cycle) = visit(*parent, classes, visited, on_path, path) {
            return Some(cycle);
        }
    }

    path.pop();
    on_path.remove(&id);
    visited.insert(id);
    None
}
