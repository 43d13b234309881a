//! The mapper capability contract.

use crate::error::CannotMapTypeError;
use gqlmap_schema::{InputObjectType, InterfaceType, ObjectType};
use std::sync::Arc;

/// Maps application classes, by fully-qualified name, to GraphQL types.
///
/// `can_*` methods must agree with their `map_*` counterparts: whenever
/// `can_map_class_to_type(c)` is true, `map_class_to_type(c)` succeeds, and
/// vice versa. `can_*` methods never fail.
///
/// Returned types are shared instances. Implementations hand out the same
/// `Arc` for the same class on every call.
pub trait TypeMapper {
    fn can_map_class_to_type(&self, class_name: &str) -> bool;

    fn map_class_to_type(&self, class_name: &str) -> Result<Arc<ObjectType>, CannotMapTypeError>;

    fn can_map_class_to_input_type(&self, class_name: &str) -> bool;

    fn map_class_to_input_type(
        &self,
        class_name: &str,
    ) -> Result<Arc<InputObjectType>, CannotMapTypeError>;

    /// Whether an interface type is registered for this source class or interface.
    fn can_map_class_to_interface(&self, class_name: &str) -> bool;

    fn map_class_to_interface(
        &self,
        class_name: &str,
    ) -> Result<Arc<InterfaceType>, CannotMapTypeError>;

    /// Names of every class with an object-type mapping.
    fn supported_classes(&self) -> Vec<String>;
}

macro_rules! forward_type_mapper {
    ($($ty:ty),*) => {$(
        impl<T: TypeMapper + ?Sized> TypeMapper for $ty {
            fn can_map_class_to_type(&self, class_name: &str) -> bool {
                (**self).can_map_class_to_type(class_name)
            }

            fn map_class_to_type(
                &self,
                class_name: &str,
            ) -> Result<Arc<ObjectType>, CannotMapTypeError> {
                (**self).map_class_to_type(class_name)
            }

            fn can_map_class_to_input_type(&self, class_name: &str) -> bool {
                (**self).can_map_class_to_input_type(class_name)
            }

            fn map_class_to_input_type(
                &self,
                class_name: &str,
            ) -> Result<Arc<InputObjectType>, CannotMapTypeError> {
                (**self).map_class_to_input_type(class_name)
            }

            fn can_map_class_to_interface(&self, class_name: &str) -> bool {
                (**self).can_map_class_to_interface(class_name)
            }

            fn map_class_to_interface(
                &self,
                class_name: &str,
            ) -> Result<Arc<InterfaceType>, CannotMapTypeError> {
                (**self).map_class_to_interface(class_name)
            }

            fn supported_classes(&self) -> Vec<String> {
                (**self).supported_classes()
            }
        }
    )*};
}

forward_type_mapper!(&T, Box<T>, Arc<T>);
