//! Class-to-GraphQL type mappers.
//!
//! - **`TypeMapper`**: the capability contract every mapper implements
//! - **`StaticTypeMapper`**: fixed tables from class name to type, exact lookups only
//! - **`CompositeTypeMapper`**: an ordered list of mappers tried in sequence
//! - **`RecursiveTypeMapper`**: falls back along the class hierarchy and infers
//!   the GraphQL interfaces each resolved object type implements
//!
//! All failures are reported as [`CannotMapTypeError`]; `can_*` queries never fail.

mod error;
pub use error::{CannotMapReason, CannotMapTypeError, MappingKind};

mod mapper;
pub use mapper::TypeMapper;

mod static_mapper;
pub use static_mapper::StaticTypeMapper;

mod composite;
pub use composite::CompositeTypeMapper;

mod recursive;
pub use recursive::{RecursiveTypeMapper, RecursiveTypeMapperBuilder};
