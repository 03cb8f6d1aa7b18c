//! Member queries on a [`TypeRegistry`].
//!
//! Property, field and member lists go through the registry's [`ReflectorCache`], so each
//! (type, kind) pair is resolved once. Indexer and method lookups walk the hierarchy directly.
//!
//! [`ReflectorCache`]: crate::metadata::reflection::ReflectorCache

use std::sync::Arc;

use crate::{
    metadata::{
        members::{FieldRc, Method, MethodRc, PropertyRc},
        reflection::{Member, MemberKind, ReflectedMembers},
        typesystem::{CilTypeRc, TypeHierarchy, TypeRegistry},
    },
    Result,
};

impl TypeRegistry {
    /// Resolve the members of `target` visible for `kind`, sharing the cached result
    ///
    /// ## Arguments
    /// * `target` - The type to inspect
    /// * `kind`   - Which members to collect
    pub fn reflect(&self, target: &CilTypeRc, kind: MemberKind) -> Arc<ReflectedMembers> {
        self.reflector_cache().get_or_reflect(target, kind)
    }

    /// Properties of `target` visible for `kind`, most derived first, indexers excluded
    pub fn get_properties(&self, target: &CilTypeRc, kind: MemberKind) -> Vec<PropertyRc> {
        self.reflect(target, kind).properties().to_vec()
    }

    /// Fields of `target` visible for `kind`, most derived first
    pub fn get_fields(&self, target: &CilTypeRc, kind: MemberKind) -> Vec<FieldRc> {
        self.reflect(target, kind).fields().to_vec()
    }

    /// Properties followed by fields of `target` visible for `kind`
    pub fn get_members(&self, target: &CilTypeRc, kind: MemberKind) -> Vec<Member> {
        self.reflect(target, kind).members().to_vec()
    }

    /// Find a visible property by name.
    ///
    /// Explicit interface implementations match both their qualified and their unqualified
    /// name.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidArgument`] if `name` is empty
    pub fn find_property(
        &self,
        target: &CilTypeRc,
        name: &str,
        kind: MemberKind,
    ) -> Result<Option<PropertyRc>> {
        if name.is_empty() {
            return Err(invalid_argument!("property name"));
        }

        Ok(self
            .reflect(target, kind)
            .properties()
            .iter()
            .find(|property| property.name == name || property.resolved_name() == name)
            .cloned())
    }

    /// Find a visible field by name
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidArgument`] if `name` is empty
    pub fn find_field(
        &self,
        target: &CilTypeRc,
        name: &str,
        kind: MemberKind,
    ) -> Result<Option<FieldRc>> {
        if name.is_empty() {
            return Err(invalid_argument!("field name"));
        }

        Ok(self
            .reflect(target, kind)
            .fields()
            .iter()
            .find(|field| field.name == name)
            .cloned())
    }

    /// Find an indexer of `target` or one of its base types with exactly the given parameter
    /// types. Visibility and static-ness follow the same rules as for ordinary properties.
    pub fn find_indexer(
        &self,
        target: &CilTypeRc,
        kind: MemberKind,
        parameter_types: &[CilTypeRc],
    ) -> Option<PropertyRc> {
        TypeHierarchy::new(target).find_map(|level| {
            level
                .properties
                .iter()
                .map(|(_, property)| property)
                .find(|property| {
                    property.is_indexer()
                        && kind.matches_static(property.is_static())
                        && kind.matches_property(property)
                        && property.matches_index_parameters(parameter_types)
                })
                .cloned()
        })
    }

    /// Find a visible method of `target` or one of its base types.
    ///
    /// Instance and static methods are both considered. An empty `parameter_types` matches
    /// any parameter list, otherwise the parameter types must match exactly.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidArgument`] if `name` is empty
    pub fn find_method(
        &self,
        target: &CilTypeRc,
        name: &str,
        kind: MemberKind,
        parameter_types: &[CilTypeRc],
    ) -> Result<Option<MethodRc>> {
        self.find_method_by(target, name, kind, |method| {
            parameter_types.is_empty() || method.matches_parameters(parameter_types)
        })
    }

    /// Find a visible method without parameters
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidArgument`] if `name` is empty
    pub fn find_parameterless_method(
        &self,
        target: &CilTypeRc,
        name: &str,
        kind: MemberKind,
    ) -> Result<Option<MethodRc>> {
        self.find_method_by(target, name, kind, |method| method.params.is_empty())
    }

    /// Check whether [`TypeRegistry::find_method`] finds a method
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidArgument`] if `name` is empty
    pub fn has_method(
        &self,
        target: &CilTypeRc,
        name: &str,
        kind: MemberKind,
        parameter_types: &[CilTypeRc],
    ) -> Result<bool> {
        Ok(self
            .find_method(target, name, kind, parameter_types)?
            .is_some())
    }

    fn find_method_by<F>(
        &self,
        target: &CilTypeRc,
        name: &str,
        kind: MemberKind,
        signature_matches: F,
    ) -> Result<Option<MethodRc>>
    where
        F: Fn(&Method) -> bool,
    {
        if name.is_empty() {
            return Err(invalid_argument!("method name"));
        }

        Ok(TypeHierarchy::new(target).find_map(|level| {
            level
                .methods
                .iter()
                .map(|(_, method)| method)
                .find(|method| {
                    method.name == name
                        && kind.matches_access(method.flags_access)
                        && signature_matches(method)
                })
                .cloned()
        }))
    }

    /// Find the `explicit operator` of `target` converting `source` into `result`
    pub fn find_explicit_conversion_operator(
        &self,
        target: &CilTypeRc,
        source: &CilTypeRc,
        result: &CilTypeRc,
    ) -> Option<MethodRc> {
        find_conversion_operator(target, "op_Explicit", source, result)
    }

    /// Find the `implicit operator` of `target` converting `source` into `result`
    pub fn find_implicit_conversion_operator(
        &self,
        target: &CilTypeRc,
        source: &CilTypeRc,
        result: &CilTypeRc,
    ) -> Option<MethodRc> {
        find_conversion_operator(target, "op_Implicit", source, result)
    }
}

fn find_conversion_operator(
    target: &CilTypeRc,
    name: &str,
    source: &CilTypeRc,
    result: &CilTypeRc,
) -> Option<MethodRc> {
    target
        .methods
        .iter()
        .map(|(_, method)| method)
        .find(|method| {
            method.name == name
                && method.is_static()
                && method.flags_access.is_public()
                && method.matches_parameters(std::slice::from_ref(source))
                && method.returns(result)
        })
        .cloned()
}
