use bitflags::bitflags;

use crate::metadata::members::{MemberAccessFlags, Property};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Selects which members a query returns.
    ///
    /// The visibility flags add members: `PUBLIC` and `INTERNAL` match on accessibility,
    /// `EXPLICITLY_IMPLEMENTED` adds explicit interface implementations and
    /// `DEFAULT_INTERFACE_PROPERTIES` adds properties with a body inherited from interfaces.
    /// `STATIC` switches between instance and static members: without it only instance members
    /// are returned, with it only static ones.
    pub struct MemberKind: u32 {
        /// Members whose accessibility is `public`
        const PUBLIC = 0x01;
        /// Members whose accessibility is `internal` or `protected internal`
        const INTERNAL = 0x02;
        /// Properties that explicitly implement an interface member
        const EXPLICITLY_IMPLEMENTED = 0x04;
        /// Non-abstract properties declared on implemented interfaces
        const DEFAULT_INTERFACE_PROPERTIES = 0x08;
        /// Static instead of instance members
        const STATIC = 0x10;
    }
}

impl MemberKind {
    /// Selects nothing
    pub const NONE: Self = Self::empty();

    /// Check whether the declared members of a type are considered at all
    #[must_use]
    pub fn includes_declared_members(&self) -> bool {
        self.intersects(Self::PUBLIC | Self::INTERNAL | Self::EXPLICITLY_IMPLEMENTED)
    }

    /// Check whether a member with the given accessibility is visible
    #[must_use]
    pub fn matches_access(&self, access: MemberAccessFlags) -> bool {
        (self.contains(Self::PUBLIC) && access.is_public())
            || (self.contains(Self::INTERNAL) && access.is_internal())
    }

    /// Check whether a member with the given static-ness is selected
    #[must_use]
    pub fn matches_static(&self, is_static: bool) -> bool {
        self.contains(Self::STATIC) == is_static
    }

    /// Check whether a property is visible, which is the case as soon as one of its accessors
    /// is visible
    #[must_use]
    pub fn matches_property(&self, property: &Property) -> bool {
        property
            .accessors()
            .any(|accessor| self.matches_access(accessor.flags_access))
    }
}
