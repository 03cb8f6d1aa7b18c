//! .NET-style type model that member resolution operates on.
//!
//! Types are shared through [`CilTypeRc`] handles and owned by a [`TypeRegistry`]. Every type
//! knows its namespace, name, flavor, single base type, directly implemented interfaces and its
//! declared fields, properties and methods. Member lists are append-only so that a type can be
//! completed after it has been registered without any interior locking.
//!
//! # Key Components
//!
//! - [`CilType`]: A class, value type or interface together with its declared members
//! - [`TypeRegistry`]: Central registry holding every type plus the member resolution cache
//! - [`TypeBuilder`]: Fluent construction of types and their members
//! - [`CilPrimitiveKind`]: Built-in primitive types (int32, string, object, etc.)
//! - [`TypeHierarchy`]: Walks a type and its ancestors, stopping at `System.Object`
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use reflectscope::metadata::typesystem::{TypeBuilder, TypeRegistry};
//!
//! let registry = Arc::new(TypeRegistry::new()?);
//! let base = TypeBuilder::new(registry.clone()).class("Contoso", "Base").build()?;
//! let derived = TypeBuilder::new(registry.clone())
//!     .class("Contoso", "Derived")
//!     .extends(&base)
//!     .build()?;
//!
//! assert!(derived.is_same_or_inherits(&base));
//! assert_eq!(derived.fullname(), "Contoso.Derived");
//! # Ok::<(), reflectscope::Error>(())
//! ```

mod base;
mod builder;
mod primitives;
mod registry;

use std::{
    collections::HashSet,
    sync::{Arc, OnceLock},
};

pub use base::{CilFlavor, CilTypeRef, CilTypeRefList};
pub use builder::TypeBuilder;
pub use primitives::CilPrimitiveKind;
pub use registry::TypeRegistry;

use crate::{
    metadata::{
        customattributes::CustomAttributeValueList,
        members::{FieldList, MethodList, PropertyList},
        token::Token,
    },
    Error::{TypeBaseAlreadySet, TypeCircularity},
    Result,
};

/// A vector that holds a list of `CilType`
pub type CilTypeList = Arc<boxcar::Vec<CilTypeRc>>;
/// Reference to a `CilType`
pub type CilTypeRc = Arc<CilType>;

#[allow(non_snake_case)]
/// All possible flags for `TypeAttributes`
pub mod TypeAttributes {
    /// Use this mask to retrieve visibility information
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Class has no public scope
    pub const NOT_PUBLIC: u32 = 0x0000_0000;
    /// Class has public scope
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Type is an interface
    pub const INTERFACE: u32 = 0x0000_0020;
    /// Class is abstract
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Class cannot be extended
    pub const SEALED: u32 = 0x0000_0100;
}

/// Represents a 'Type' of the model: a class, value type, interface or primitive.
///
/// The `Token` is the identity of a type. Two `CilType` instances with equal tokens denote the
/// same type, which is what the resolution cache relies on.
pub struct CilType {
    /// Token
    pub token: Token,
    /// `TypeNamespace` (can be empty for types in the global namespace)
    pub namespace: String,
    /// `TypeName`
    pub name: String,
    /// The `TypeFlavor`
    pub flavor: CilFlavor,
    /// Flags (a 4-byte bitmask of type `TypeAttributes`)
    pub flags: u32,
    /// This types base aka 'extends'
    base: OnceLock<CilTypeRef>,
    /// All interfaces this type directly implements (or extends, for interfaces)
    pub interfaces: CilTypeRefList,
    /// All fields this type declares
    pub fields: FieldList,
    /// All properties this type declares
    pub properties: PropertyList,
    /// All methods this type declares, including property accessors
    pub methods: MethodList,
    /// All custom attributes this type has
    pub custom_attributes: CustomAttributeValueList,
}

impl CilType {
    /// Create a new instance of a `CilType` without base type and members
    pub fn new(token: Token, namespace: String, name: String, flavor: CilFlavor, flags: u32) -> Self {
        CilType {
            token,
            namespace,
            name,
            flavor,
            flags,
            base: OnceLock::new(),
            interfaces: Arc::new(boxcar::Vec::new()),
            fields: Arc::new(boxcar::Vec::new()),
            properties: Arc::new(boxcar::Vec::new()),
            methods: Arc::new(boxcar::Vec::new()),
            custom_attributes: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Access the base type of this type, if it exists
    pub fn base(&self) -> Option<CilTypeRc> {
        let base = self.base.get()?;
        let strong = base.upgrade();
        if strong.is_none() {
            tracing::warn!(token = %self.token, "base type of '{}' has been dropped", self.name);
        }
        strong
    }

    /// Set the base type of this type.
    ///
    /// ## Arguments
    /// * `base` - The type this type extends
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeCircularity`] if `base` is this type or derives from it, and
    /// [`crate::Error::TypeBaseAlreadySet`] if a base type has been assigned before.
    pub fn set_base(&self, base: &CilTypeRc) -> Result<()> {
        let mut current = Some(base.clone());
        while let Some(ancestor) = current {
            if ancestor.token == self.token {
                return Err(TypeCircularity(self.token));
            }
            current = ancestor.base();
        }

        self.base
            .set(CilTypeRef::new(base))
            .map_err(|_| TypeBaseAlreadySet(self.token))
    }

    /// Add an interface to the directly implemented interfaces of this type.
    ///
    /// ## Arguments
    /// * `interface` - The interface this type implements (or extends, for interfaces)
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeCircularity`] if `interface` is this type or extends it.
    pub fn add_interface(&self, interface: &CilTypeRc) -> Result<()> {
        if interface.token == self.token
            || interface
                .all_interfaces()
                .iter()
                .any(|nested| nested.token == self.token)
        {
            return Err(TypeCircularity(self.token));
        }

        self.interfaces.push(CilTypeRef::new(interface));
        Ok(())
    }

    /// Returns the full name (Namespace.Name) of the entity
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{0}.{1}", self.namespace, self.name)
        }
    }

    /// Check if this type is an interface
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flavor == CilFlavor::Interface
    }

    /// Check if this type is the root of every class hierarchy (`System.Object`)
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.flavor.is_root()
    }

    /// Iterate over the base types of this type, nearest first, excluding `System.Object`
    pub fn ancestors(&self) -> TypeHierarchy {
        TypeHierarchy { next: self.base() }
    }

    /// Collect every interface this type implements.
    ///
    /// The result includes interfaces inherited from base types and interfaces extended by
    /// other interfaces. Every interface appears once, in discovery order.
    #[must_use]
    pub fn all_interfaces(&self) -> Vec<CilTypeRc> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        collect_interfaces(&self.interfaces, &mut seen, &mut result);
        for ancestor in self.ancestors() {
            collect_interfaces(&ancestor.interfaces, &mut seen, &mut result);
        }

        result
    }

    /// Check if this type is `other`, derives from it, or implements it.
    ///
    /// ## Arguments
    /// * `other` - The candidate base type or interface
    #[must_use]
    pub fn is_same_or_inherits(&self, other: &CilType) -> bool {
        if self.token == other.token {
            return true;
        }

        if other.is_root() {
            return !self.is_interface();
        }

        if other.is_interface() {
            return self
                .all_interfaces()
                .iter()
                .any(|interface| interface.token == other.token);
        }

        self.ancestors().any(|ancestor| ancestor.token == other.token)
    }

    /// Check if this type or one of its base types declares an instance
    /// `Equals(System.Object)` method.
    #[must_use]
    pub fn overrides_equals(&self) -> bool {
        let declares_equals = |ty: &CilType| {
            ty.methods.iter().any(|(_, method)| {
                method.name == "Equals"
                    && !method.is_static()
                    && method.params.len() == 1
                    && method.params[0].token() == Some(CilPrimitiveKind::Object.token())
            })
        };

        declares_equals(self) || self.ancestors().any(|ancestor| declares_equals(&ancestor))
    }
}

fn collect_interfaces(
    interfaces: &CilTypeRefList,
    seen: &mut HashSet<Token>,
    result: &mut Vec<CilTypeRc>,
) {
    for (_, interface_ref) in interfaces.iter() {
        let Some(interface) = interface_ref.upgrade() else {
            continue;
        };

        if seen.insert(interface.token) {
            let nested = interface.interfaces.clone();
            result.push(interface);
            collect_interfaces(&nested, seen, result);
        }
    }
}

/// Iterator over a type and its base types, most derived first.
///
/// The walk ends before `System.Object` and at types without a base (interfaces, or types whose
/// base has been dropped). Cycles cannot occur because [`CilType::set_base`] rejects them.
pub struct TypeHierarchy {
    next: Option<CilTypeRc>,
}

impl TypeHierarchy {
    /// Start a walk at `start`, which is yielded first
    pub fn new(start: &CilTypeRc) -> Self {
        TypeHierarchy {
            next: Some(start.clone()),
        }
    }
}

impl Iterator for TypeHierarchy {
    type Item = CilTypeRc;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if current.is_root() {
            return None;
        }

        self.next = current.base();
        Some(current)
    }
}
