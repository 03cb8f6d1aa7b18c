//! Declared members of a [`CilType`](crate::metadata::typesystem::CilType).
//!
//! Fields, properties and methods are stored on the type that declares them. Properties do not
//! carry an accessibility of their own: their visibility is derived from the accessibility of
//! their getter and setter methods, exactly like in .NET metadata.
//!
//! # Key Types
//! - [`Field`], [`Property`], [`Method`]: Member descriptors, shared as `Arc`
//! - [`FieldBuilder`], [`PropertyBuilder`], [`MethodBuilder`]: Fluent member definitions
//! - [`MemberAccessFlags`]: The accessibility of a field or method

mod field;
mod method;
mod property;

use bitflags::bitflags;

pub use field::{FieldAttributes, Field, FieldBuilder, FieldList, FieldRc};
pub use method::{Method, MethodBuilder, MethodList, MethodModifiers, MethodRc};
pub use property::{Property, PropertyAttributes, PropertyBuilder, PropertyList, PropertyRc};

/// Bitmask for `ACCESS` state extraction, shared by fields and methods
pub const MEMBER_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Member access flags
    ///
    /// The values form an enumeration inside the access mask, so compare them with `==`
    /// rather than `contains`.
    pub struct MemberAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessibly by anyone in the Assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MemberAccessFlags {
    /// Extract access flags from raw field or method attributes
    #[must_use]
    pub fn from_flags(flags: u32) -> Self {
        let access = flags & MEMBER_ACCESS_MASK;
        Self::from_bits_truncate(access)
    }

    /// Accessible by anyone
    #[must_use]
    pub fn is_public(&self) -> bool {
        *self == Self::PUBLIC
    }

    /// Accessible from within the declaring assembly: `internal` or `protected internal`
    #[must_use]
    pub fn is_internal(&self) -> bool {
        *self == Self::ASSEM || *self == Self::FAM_OR_ASSEM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_from_flags() {
        assert_eq!(MemberAccessFlags::from_flags(0x0006), MemberAccessFlags::PUBLIC);
        assert_eq!(MemberAccessFlags::from_flags(0x0016), MemberAccessFlags::PUBLIC);
        assert_eq!(MemberAccessFlags::from_flags(0x0091), MemberAccessFlags::PRIVATE);
        assert_eq!(
            MemberAccessFlags::from_flags(0x0000),
            MemberAccessFlags::COMPILER_CONTROLLED
        );
    }

    #[test]
    fn test_access_categories() {
        assert!(MemberAccessFlags::PUBLIC.is_public());
        assert!(!MemberAccessFlags::PUBLIC.is_internal());

        assert!(MemberAccessFlags::ASSEM.is_internal());
        assert!(MemberAccessFlags::FAM_OR_ASSEM.is_internal());
        assert!(!MemberAccessFlags::FAM_AND_ASSEM.is_internal());
        assert!(!MemberAccessFlags::FAMILY.is_internal());
        assert!(!MemberAccessFlags::PRIVATE.is_internal());
        assert!(!MemberAccessFlags::PRIVATE.is_public());
    }
}
