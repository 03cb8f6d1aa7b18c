//! # reflectscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the reflectscope library. Import this module to get quick access to the type model
//! and the member queries.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all reflectscope operations
pub use crate::Error;

/// The result type used throughout reflectscope
pub use crate::Result;

/// Identifier of types and members
pub use crate::metadata::token::Token;

// ================================================================================================
// Type System
// ================================================================================================

/// Core type system components
pub use crate::metadata::typesystem::{
    CilFlavor, CilPrimitiveKind, CilType, CilTypeList, CilTypeRc, CilTypeRef, CilTypeRefList,
    TypeAttributes, TypeBuilder, TypeHierarchy, TypeRegistry,
};

// ================================================================================================
// Members
// ================================================================================================

/// Fields, properties and methods with their builders
pub use crate::metadata::members::{
    Field, FieldBuilder, FieldRc, MemberAccessFlags, Method, MethodBuilder, MethodModifiers,
    MethodRc, Property, PropertyBuilder, PropertyRc,
};

/// Custom attributes
pub use crate::metadata::customattributes::{
    CustomAttributeArgument, CustomAttributeBuilder, CustomAttributeValue,
    CustomAttributeValueRc,
};

// ================================================================================================
// Member Resolution
// ================================================================================================

/// Query selection, results and attribute lookups
pub use crate::metadata::reflection::{
    has_attribute_in_hierarchy, has_attribute_in_hierarchy_matching, matching_attributes,
    AttributeProvider, Member, MemberKind, ReflectedMembers, Reflector, ReflectorCache,
};
