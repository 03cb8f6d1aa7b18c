//! Member resolution with .NET semantics.
//!
//! Given a type and a [`MemberKind`], this module answers which properties and fields are
//! visible on that type. Resolution follows the rules callers expect from .NET reflection,
//! which the raw metadata does not give for free:
//!
//! - A member redeclared in a derived type hides the inherited member of the same name
//! - Explicit interface implementations are only reported on request, under their qualified
//!   name, and hide inherited members with the same unqualified name
//! - Properties with a default body on an implemented interface are reported on request
//! - Indexers never appear in property lists; use [`TypeRegistry::find_indexer`]
//!
//! Results are cached per (type, kind) in the [`ReflectorCache`] of the owning
//! [`TypeRegistry`].
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use reflectscope::prelude::*;
//!
//! let registry = Arc::new(TypeRegistry::new()?);
//! let string = registry.get_primitive(CilPrimitiveKind::String)?;
//! let int32 = registry.get_primitive(CilPrimitiveKind::I4)?;
//!
//! let base = TypeBuilder::new(registry.clone())
//!     .class("Contoso", "Base")
//!     .property(PropertyBuilder::new().name("Value").property_type(&string).public())
//!     .build()?;
//! let derived = TypeBuilder::new(registry.clone())
//!     .class("Contoso", "Derived")
//!     .extends(&base)
//!     .property(PropertyBuilder::new().name("Value").property_type(&int32).public())
//!     .build()?;
//!
//! let properties = registry.get_properties(&derived, MemberKind::PUBLIC);
//! assert_eq!(properties.len(), 1);
//! assert!(properties[0].property_type.is(&int32));
//! # Ok::<(), reflectscope::Error>(())
//! ```
//!
//! [`TypeRegistry`]: crate::metadata::typesystem::TypeRegistry
//! [`TypeRegistry::find_indexer`]: crate::metadata::typesystem::TypeRegistry::find_indexer

mod attributes;
mod cache;
mod kind;
mod member;
mod query;
mod reflector;
mod synthesized;

pub use attributes::{
    has_attribute_in_hierarchy, has_attribute_in_hierarchy_matching, matching_attributes,
    AttributeProvider,
};
pub use cache::ReflectorCache;
pub use kind::MemberKind;
pub use member::Member;
pub use reflector::{ReflectedMembers, Reflector};
