//! The member resolution walk.
//!
//! [`Reflector`] collects the properties and fields visible on a type for one [`MemberKind`].
//! It walks the type and then every base type up to, but excluding, `System.Object`. A name
//! that has been accepted once is claimed: members with the same name found further up the
//! chain are hidden, which is how `new` declarations shadow inherited members.
//!
//! Within one level properties are collected in three passes:
//!
//! 1. Ordinary properties whose accessors are visible for the requested kind
//! 2. Explicit interface implementations, claimed under their unqualified name
//! 3. Properties declared on the implemented interfaces: those with a body, or all of them
//!    when the level itself is an interface
//!
//! Indexers take part in claiming names but are removed from the final result.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::metadata::{
    members::{FieldRc, PropertyRc},
    reflection::{Member, MemberKind},
    typesystem::{CilType, CilTypeRc, TypeHierarchy},
};

/// The properties and fields visible on a type for one [`MemberKind`]
pub struct ReflectedMembers {
    properties: Vec<PropertyRc>,
    fields: Vec<FieldRc>,
    members: Vec<Member>,
}

impl ReflectedMembers {
    fn empty() -> Self {
        ReflectedMembers {
            properties: Vec::new(),
            fields: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Visible properties, most derived first, indexers excluded
    #[must_use]
    pub fn properties(&self) -> &[PropertyRc] {
        &self.properties
    }

    /// Visible fields, most derived first
    #[must_use]
    pub fn fields(&self) -> &[FieldRc] {
        &self.fields
    }

    /// Properties followed by fields
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Returns true if nothing is visible
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Collects visible members of a type.
///
/// Use [`Reflector::reflect`]; the struct only carries the state of a single walk.
pub struct Reflector {
    kind: MemberKind,
    claimed: HashSet<String>,
    properties: Vec<PropertyRc>,
}

impl Reflector {
    /// Resolve the properties and fields of `target` that are visible for `kind`
    ///
    /// ## Arguments
    /// * `target` - The type to inspect
    /// * `kind`   - Which members to collect
    pub fn reflect(target: &CilTypeRc, kind: MemberKind) -> ReflectedMembers {
        if kind.is_empty() {
            return ReflectedMembers::empty();
        }

        let properties = Reflector::new(kind).load_properties(target);
        let fields = load_fields(target, kind);

        debug!(
            token = %target.token,
            kind = ?kind,
            properties = properties.len(),
            fields = fields.len(),
            "reflected members of '{}'",
            target.fullname()
        );

        let members = properties
            .iter()
            .cloned()
            .map(Member::Property)
            .chain(fields.iter().cloned().map(Member::Field))
            .collect();

        ReflectedMembers {
            properties,
            fields,
            members,
        }
    }

    fn new(kind: MemberKind) -> Self {
        Reflector {
            kind,
            claimed: HashSet::new(),
            properties: Vec::new(),
        }
    }

    fn load_properties(mut self, target: &CilTypeRc) -> Vec<PropertyRc> {
        for level in TypeHierarchy::new(target) {
            if self.kind.includes_declared_members() {
                self.add_declared_properties(&level);
            }

            if self.kind.contains(MemberKind::EXPLICITLY_IMPLEMENTED) {
                self.add_explicit_properties(&level);
            }

            if self.kind.contains(MemberKind::DEFAULT_INTERFACE_PROPERTIES) || level.is_interface()
            {
                self.add_interface_properties(&level);
            }
        }

        self.properties.retain(|property| !property.is_indexer());
        self.properties
    }

    fn add_declared_properties(&mut self, level: &CilType) {
        for (_, property) in level.properties.iter() {
            if property.is_explicitly_implemented()
                || !self.kind.matches_static(property.is_static())
                || self.claimed.contains(&property.name)
                || !self.kind.matches_property(property)
            {
                continue;
            }

            self.accept(property.name.clone(), property, level);
        }
    }

    fn add_explicit_properties(&mut self, level: &CilType) {
        for (_, property) in level.properties.iter() {
            if !property.is_explicitly_implemented()
                || !self.kind.matches_static(property.is_static())
                || self.claimed.contains(property.resolved_name())
            {
                continue;
            }

            self.accept(property.resolved_name().to_string(), property, level);
        }
    }

    fn add_interface_properties(&mut self, level: &CilType) {
        let accept_abstract = level.is_interface();

        for interface in level.all_interfaces() {
            for (_, property) in interface.properties.iter() {
                if !property.has_public_accessor()
                    || !self.kind.matches_static(property.is_static())
                    || self.claimed.contains(&property.name)
                {
                    continue;
                }

                if accept_abstract || !property.is_abstract() {
                    self.accept(property.name.clone(), property, &interface);
                }
            }
        }
    }

    fn accept(&mut self, claimed_name: String, property: &PropertyRc, level: &CilType) {
        trace!(
            property = %property.name,
            declared_on = %level.fullname(),
            "accepted property"
        );

        self.claimed.insert(claimed_name);
        self.properties.push(property.clone());
    }
}

fn load_fields(target: &CilTypeRc, kind: MemberKind) -> Vec<FieldRc> {
    let mut claimed = HashSet::new();
    let mut fields = Vec::new();

    for level in TypeHierarchy::new(target) {
        for (_, field) in level.fields.iter() {
            if !kind.matches_static(field.is_static())
                || !kind.matches_access(field.access())
                || claimed.contains(&field.name)
            {
                continue;
            }

            claimed.insert(field.name.clone());
            fields.push(field.clone());
        }
    }

    fields
}
