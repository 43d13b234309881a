//! The immutable class hierarchy and its walks.
//!
//! # Ancestor chain order
//!
//! [`ClassHierarchy::ancestors`] defines the single order every resolver uses
//! when falling back from a class to its parents:
//!
//! 1. The walk proceeds level by level, starting at the class itself and
//!    following the superclass chain (nearest first, root-most last).
//! 2. At each level the level class comes first, followed by the interfaces
//!    that level introduces, breadth-first in declaration order. An
//!    interface's own parent interfaces come after its siblings.
//! 3. Every node appears once; the first occurrence wins.
//!
//! ```text
//! interface Named            ClassC extends ClassB
//! interface Entity           ClassB extends Base implements Entity, Named
//!   extends Named            Base
//!
//! ancestors(ClassC) = [ClassC, ClassB, Entity, Named, Base]
//! ```

use crate::class::{ClassDescriptor, ClassId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Precomputed class graph, validated to be acyclic.
#[derive(Debug, Clone, Default)]
pub struct ClassHierarchy {
    /// All classes, indexed by `ClassId`
    classes: Vec<ClassDescriptor>,
    /// Name to class ID mapping
    by_name: FxHashMap<String, ClassId>,
}

impl ClassHierarchy {
    /// An empty hierarchy. Use [`ClassHierarchyBuilder`](crate::ClassHierarchyBuilder)
    /// to populate one.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        classes: Vec<ClassDescriptor>,
        by_name: FxHashMap<String, ClassId>,
    ) -> Self {
        Self { classes, by_name }
    }

    /// Get a class ID by name
    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    /// Check whether a class with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get a class by ID
    pub fn get(&self, id: ClassId) -> Option<&ClassDescriptor> {
        self.classes.get(id.index())
    }

    /// Get a class by name
    pub fn get_by_name(&self, name: &str) -> Option<&ClassDescriptor> {
        self.lookup(name).and_then(|id| self.get(id))
    }

    /// Name of a class, or the empty string for a foreign ID
    pub fn name(&self, id: ClassId) -> &str {
        self.get(id).map(|c| c.name.as_str()).unwrap_or_default()
    }

    /// Iterate over all classes in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Superclass chain, nearest first. The class itself is not included.
    pub fn superclasses(&self, id: ClassId) -> Superclasses<'_> {
        Superclasses {
            hierarchy: self,
            next: self.get(id).and_then(|c| c.superclass),
        }
    }

    /// The ancestor chain of `id`, starting with `id` itself.
    ///
    /// See the module documentation for the exact order. Returns an empty
    /// vector for an ID that does not belong to this hierarchy.
    pub fn ancestors(&self, id: ClassId) -> Vec<ClassId> {
        let mut result = Vec::new();
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::new();
        let mut level = self.get(id).map(|c| c.id);

        while let Some(current) = level {
            let Some(class) = self.get(current) else {
                break;
            };
            if seen.insert(current) {
                result.push(current);
            }

            queue.extend(class.interfaces.iter().copied());
            while let Some(interface) = queue.pop_front() {
                if seen.insert(interface) {
                    result.push(interface);
                    if let Some(iface) = self.get(interface) {
                        queue.extend(iface.interfaces.iter().copied());
                    }
                }
            }

            level = class.superclass;
        }

        result
    }

    /// All interfaces implemented by `id`, directly or transitively, in
    /// ancestor-chain order. The class itself is excluded even when it is an
    /// interface.
    pub fn interfaces_of(&self, id: ClassId) -> Vec<ClassId> {
        self.ancestors(id)
            .into_iter()
            .skip(1)
            .filter(|&a| self.get(a).is_some_and(|c| c.is_interface()))
            .collect()
    }

    /// Check if `descendant` is `ancestor` or inherits from it
    pub fn is_subtype_of(&self, descendant: ClassId, ancestor: ClassId) -> bool {
        self.ancestors(descendant).contains(&ancestor)
    }

    /// Check if `descendant` strictly inherits from `ancestor`
    pub fn is_proper_subtype_of(&self, descendant: ClassId, ancestor: ClassId) -> bool {
        descendant != ancestor && self.is_subtype_of(descendant, ancestor)
    }
}

/// Iterator over a superclass chain.
#[derive(Debug, Clone)]
pub struct Superclasses<'a> {
    hierarchy: &'a ClassHierarchy,
    next: Option<ClassId>,
}

impl Iterator for Superclasses<'_> {
    type Item = ClassId;

    fn next(&mut self) -> Option<ClassId> {
        let current = self.next?;
        self.next = self.hierarchy.get(current).and_then(|c| c.superclass);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClassHierarchyBuilder;

    fn names(hierarchy: &ClassHierarchy, ids: &[ClassId]) -> Vec<String> {
        ids.iter().map(|&id| hierarchy.name(id).to_string()).collect()
    }

    #[test]
    fn test_superclasses_nearest_first() {
        let mut builder = ClassHierarchyBuilder::new();
        builder
            .class("Root", None, &[])
            .class("Mid", Some("Root"), &[])
            .class("Leaf", Some("Mid"), &[]);
        let hierarchy = builder.build().unwrap();

        let leaf = hierarchy.lookup("Leaf").unwrap();
        let chain: Vec<ClassId> = hierarchy.superclasses(leaf).collect();
        assert_eq!(names(&hierarchy, &chain), vec!["Mid", "Root"]);
    }

    #[test]
    fn test_ancestors_of_root_is_self() {
        let mut builder = ClassHierarchyBuilder::new();
        builder.class("Root", None, &[]);
        let hierarchy = builder.build().unwrap();

        let root = hierarchy.lookup("Root").unwrap();
        assert_eq!(hierarchy.ancestors(root), vec![root]);
        assert!(hierarchy.interfaces_of(root).is_empty());
    }

    #[test]
    fn test_foreign_id_has_no_ancestors() {
        let hierarchy = ClassHierarchy::new();
        assert!(hierarchy.ancestors(ClassId(7)).is_empty());
        assert_eq!(hierarchy.name(ClassId(7)), "");
        assert_eq!(hierarchy.superclasses(ClassId(7)).count(), 0);
    }

    #[test]
    fn test_is_subtype_of() {
        let mut builder = ClassHierarchyBuilder::new();
        builder
            .interface("I", &[])
            .class("A", None, &["I"])
            .class("B", Some("A"), &[]);
        let hierarchy = builder.build().unwrap();

        let i = hierarchy.lookup("I").unwrap();
        let a = hierarchy.lookup("A").unwrap();
        let b = hierarchy.lookup("B").unwrap();

        assert!(hierarchy.is_subtype_of(b, a));
        assert!(hierarchy.is_subtype_of(b, i));
        assert!(hierarchy.is_subtype_of(a, a));
        assert!(!hierarchy.is_proper_subtype_of(a, a));
        assert!(!hierarchy.is_subtype_of(a, b));
    }
}
