//! Custom attributes applied to types and members.
//!
//! An attribute is identified by its attribute class and carries constructor (fixed) arguments
//! plus named field and property assignments. The `inherited` flag decides whether an attribute
//! applied to a base type is also reported for derived types, see
//! [`matching_attributes`](crate::metadata::reflection::matching_attributes).
//!
//! # Key Types
//! - [`CustomAttributeValue`]: An applied attribute
//! - [`CustomAttributeArgument`], [`CustomAttributeNamedArgument`]: Argument values
//! - [`CustomAttributeBuilder`]: Fluent construction used by the type and member builders

mod builder;
mod types;

pub use builder::CustomAttributeBuilder;
pub use types::*;
