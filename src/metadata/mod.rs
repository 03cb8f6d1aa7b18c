//! The type model and member resolution.
//!
//! Types live in a [`typesystem::TypeRegistry`] and are created with a
//! [`typesystem::TypeBuilder`]. The [`reflection`] module answers which members of a type are
//! visible for a given [`reflection::MemberKind`].

/// Custom attributes applied to types and members
pub mod customattributes;
/// Fields, properties and methods
pub mod members;
/// Member resolution, caching and lookups
pub mod reflection;
/// Identifiers of types and members
pub mod token;
/// Types, their registry and builder
pub mod typesystem;
