use std::sync::Arc;

use crate::{
    metadata::{
        customattributes::{CustomAttributeBuilder, CustomAttributeValueList},
        members::{MemberAccessFlags, Method, MethodModifiers, MethodRc},
        token::Token,
        typesystem::{CilTypeRc, CilTypeRef, TypeRegistry},
    },
    Error, Result,
};

/// A vector that holds a list of `Property`
pub type PropertyList = Arc<boxcar::Vec<PropertyRc>>;
/// A reference to a `Property`
pub type PropertyRc = Arc<Property>;

#[allow(non_snake_case)]
/// All possible flags for `PropertyAttributes`
pub mod PropertyAttributes {
    /// Property is special
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// Runtime (metadata internal APIs) should check name encoding
    pub const RT_SPECIAL_NAME: u32 = 0x0400;
    /// Property has default
    pub const HAS_DEFAULT: u32 = 0x1000;
}

/// A property declared by a type.
///
/// A property has no accessibility or static-ness of its own, both are derived from its
/// accessors. Explicit interface implementations carry the qualified name of the interface
/// member (`Namespace.IInterface.Name`), indexers carry a non-empty parameter list.
#[derive(Debug)]
pub struct Property {
    /// Token
    pub token: Token,
    /// a 2-byte bitmask of type `PropertyAttributes`
    pub flags: u32,
    /// The name of this property
    pub name: String,
    /// The type of the property value
    pub property_type: CilTypeRef,
    /// The type that declares this property
    pub declaring_type: CilTypeRef,
    /// The `Method` that retrieves this property
    pub fn_getter: Option<MethodRc>,
    /// The `Method` that sets this property
    pub fn_setter: Option<MethodRc>,
    /// Index parameter types, empty unless this property is an indexer
    pub index_parameters: Vec<CilTypeRef>,
    /// Custom attributes attached to this property
    pub custom_attributes: CustomAttributeValueList,
}

impl Property {
    /// Iterate over the getter and setter, whichever exist
    pub fn accessors(&self) -> impl Iterator<Item = &MethodRc> {
        self.fn_getter.iter().chain(self.fn_setter.iter())
    }

    /// Takes index parameters
    #[must_use]
    pub fn is_indexer(&self) -> bool {
        !self.index_parameters.is_empty()
    }

    /// Implements an interface member explicitly, recognised by a qualified name
    #[must_use]
    pub fn is_explicitly_implemented(&self) -> bool {
        self.name.contains('.')
    }

    /// The name as seen by callers: the last segment of a qualified name
    #[must_use]
    pub fn resolved_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Defined on the type rather than per instance
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.accessors().any(|accessor| accessor.is_static())
    }

    /// Has no implementation, decided by the getter or, failing that, the setter.
    ///
    /// A property without any accessor counts as abstract.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.accessors().next().map_or(true, |accessor| accessor.is_abstract())
    }

    /// Has a getter
    #[must_use]
    pub fn can_read(&self) -> bool {
        self.fn_getter.is_some()
    }

    /// Has a setter
    #[must_use]
    pub fn can_write(&self) -> bool {
        self.fn_setter.is_some()
    }

    /// At least one accessor is `public`
    #[must_use]
    pub fn has_public_accessor(&self) -> bool {
        self.accessors()
            .any(|accessor| accessor.flags_access.is_public())
    }

    /// Check whether the index parameters equal `parameter_types`, element by element
    #[must_use]
    pub fn matches_index_parameters(&self, parameter_types: &[CilTypeRc]) -> bool {
        self.index_parameters.len() == parameter_types.len()
            && self
                .index_parameters
                .iter()
                .zip(parameter_types)
                .all(|(param, expected)| param.is(expected))
    }
}

/// Builder for properties declared through a [`TypeBuilder`](crate::metadata::typesystem::TypeBuilder).
///
/// A property starts out with a getter and a setter sharing one access level. Without an
/// explicit access level, properties of interfaces are public and all others are private.
/// Properties of interfaces are abstract unless [`PropertyBuilder::with_body`] is called.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use reflectscope::metadata::members::{MemberAccessFlags, PropertyBuilder};
/// use reflectscope::metadata::typesystem::{CilPrimitiveKind, TypeBuilder, TypeRegistry};
///
/// let registry = Arc::new(TypeRegistry::new()?);
/// let string = registry.get_primitive(CilPrimitiveKind::String)?;
///
/// let ty = TypeBuilder::new(registry.clone())
///     .class("Contoso", "Person")
///     .property(PropertyBuilder::new().name("Name").property_type(&string).public())
///     .property(
///         PropertyBuilder::new()
///             .name("Secret")
///             .property_type(&string)
///             .getter(MemberAccessFlags::PRIVATE)
///             .setter(MemberAccessFlags::PUBLIC),
///     )
///     .build()?;
///
/// assert_eq!(ty.properties.count(), 2);
/// assert_eq!(ty.methods.count(), 4);
/// # Ok::<(), reflectscope::Error>(())
/// ```
pub struct PropertyBuilder {
    name: Option<String>,
    property_type: Option<CilTypeRc>,
    explicit_interface: Option<CilTypeRc>,
    has_getter: bool,
    has_setter: bool,
    getter_access: Option<MemberAccessFlags>,
    setter_access: Option<MemberAccessFlags>,
    modifiers: MethodModifiers,
    has_body: Option<bool>,
    index_parameters: Vec<CilTypeRc>,
    attributes: Vec<CustomAttributeBuilder>,
}

impl Default for PropertyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyBuilder {
    /// Creates a new `PropertyBuilder`
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            property_type: None,
            explicit_interface: None,
            has_getter: true,
            has_setter: true,
            getter_access: None,
            setter_access: None,
            modifiers: MethodModifiers::HIDE_BY_SIG | MethodModifiers::SPECIAL_NAME,
            has_body: None,
            index_parameters: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Sets the property name, without any interface qualification
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the type of the property value
    #[must_use]
    pub fn property_type(mut self, property_type: &CilTypeRc) -> Self {
        self.property_type = Some(property_type.clone());
        self
    }

    /// Makes this an explicit implementation of the property with the same name on `interface`.
    ///
    /// The property is stored under the qualified name `Namespace.IInterface.Name` and its
    /// accessors are private unless an access level is set.
    #[must_use]
    pub fn explicit_for(mut self, interface: &CilTypeRc) -> Self {
        self.explicit_interface = Some(interface.clone());
        self.modifiers |= MethodModifiers::VIRTUAL | MethodModifiers::FINAL | MethodModifiers::NEW_SLOT;
        self
    }

    /// Sets the access level of both accessors
    #[must_use]
    pub fn access(mut self, access: MemberAccessFlags) -> Self {
        self.getter_access = Some(access);
        self.setter_access = Some(access);
        self
    }

    /// Makes both accessors `public`
    #[must_use]
    pub fn public(self) -> Self {
        self.access(MemberAccessFlags::PUBLIC)
    }

    /// Makes both accessors `internal`
    #[must_use]
    pub fn internal(self) -> Self {
        self.access(MemberAccessFlags::ASSEM)
    }

    /// Makes both accessors `protected internal`
    #[must_use]
    pub fn protected_internal(self) -> Self {
        self.access(MemberAccessFlags::FAM_OR_ASSEM)
    }

    /// Makes both accessors `protected`
    #[must_use]
    pub fn protected(self) -> Self {
        self.access(MemberAccessFlags::FAMILY)
    }

    /// Makes both accessors `private`
    #[must_use]
    pub fn private(self) -> Self {
        self.access(MemberAccessFlags::PRIVATE)
    }

    /// Declares a getter with its own access level
    #[must_use]
    pub fn getter(mut self, access: MemberAccessFlags) -> Self {
        self.has_getter = true;
        self.getter_access = Some(access);
        self
    }

    /// Declares a setter with its own access level
    #[must_use]
    pub fn setter(mut self, access: MemberAccessFlags) -> Self {
        self.has_setter = true;
        self.setter_access = Some(access);
        self
    }

    /// Removes the setter
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.has_setter = false;
        self
    }

    /// Removes the getter
    #[must_use]
    pub fn write_only(mut self) -> Self {
        self.has_getter = false;
        self
    }

    /// Makes the accessors static
    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.modifiers |= MethodModifiers::STATIC;
        self
    }

    /// Makes the accessors virtual
    #[must_use]
    pub fn virtual_member(mut self) -> Self {
        self.modifiers |= MethodModifiers::VIRTUAL;
        self
    }

    /// Makes the accessors abstract
    #[must_use]
    pub fn abstract_member(mut self) -> Self {
        self.has_body = Some(false);
        self
    }

    /// Gives an interface property a default implementation
    #[must_use]
    pub fn with_body(mut self) -> Self {
        self.has_body = Some(true);
        self
    }

    /// Appends an index parameter, turning the property into an indexer
    #[must_use]
    pub fn index(mut self, parameter_type: &CilTypeRc) -> Self {
        self.index_parameters.push(parameter_type.clone());
        self
    }

    /// Applies a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) if !name.is_empty() => {}
            _ => return Err(Error::TypeError("Property name is required".to_string())),
        }
        if self.property_type.is_none() {
            return Err(Error::TypeError("Property type is required".to_string()));
        }
        if !self.has_getter && !self.has_setter {
            return Err(Error::TypeError(
                "Property requires a getter or a setter".to_string(),
            ));
        }
        self.attributes
            .iter()
            .try_for_each(CustomAttributeBuilder::validate)
    }

    /// Builds the property together with its accessor methods
    pub(crate) fn build(
        self,
        declaring_type: &CilTypeRc,
        registry: &TypeRegistry,
    ) -> Result<(PropertyRc, Vec<MethodRc>)> {
        self.validate()?;
        let name = self
            .name
            .ok_or_else(|| Error::TypeError("Property name is required".to_string()))?;
        let property_type = self
            .property_type
            .ok_or_else(|| Error::TypeError("Property type is required".to_string()))?;

        let on_interface = declaring_type.is_interface();
        let default_access = if on_interface && self.explicit_interface.is_none() {
            MemberAccessFlags::PUBLIC
        } else {
            MemberAccessFlags::PRIVATE
        };

        let mut modifiers = self.modifiers;
        if !self.has_body.unwrap_or(!on_interface) {
            modifiers |= MethodModifiers::ABSTRACT | MethodModifiers::VIRTUAL;
        }

        let (qualifier, name) = match &self.explicit_interface {
            Some(interface) => (format!("{}.", interface.fullname()), name),
            None => (String::new(), name),
        };

        let index_parameters: Vec<CilTypeRef> =
            self.index_parameters.iter().map(CilTypeRef::new).collect();

        let accessor = |prefix: &str,
                        access: Option<MemberAccessFlags>,
                        setter: bool|
         -> Result<MethodRc> {
            let mut params = index_parameters.clone();
            if setter {
                params.push(CilTypeRef::new(&property_type));
            }

            Ok(Arc::new(Method {
                token: registry.next_member_token(Token::TABLE_METHODDEF)?,
                name: format!("{qualifier}{prefix}_{name}"),
                flags_access: access.unwrap_or(default_access),
                flags_modifiers: modifiers,
                return_type: (!setter).then(|| CilTypeRef::new(&property_type)),
                params,
                declaring_type: CilTypeRef::new(declaring_type),
                custom_attributes: Arc::new(boxcar::Vec::new()),
            }))
        };

        let fn_getter = self
            .has_getter
            .then(|| accessor("get", self.getter_access, false))
            .transpose()?;
        let fn_setter = self
            .has_setter
            .then(|| accessor("set", self.setter_access, true))
            .transpose()?;

        let property = Property {
            token: registry.next_member_token(Token::TABLE_PROPERTY)?,
            flags: 0,
            name: format!("{qualifier}{name}"),
            property_type: CilTypeRef::new(&property_type),
            declaring_type: CilTypeRef::new(declaring_type),
            fn_getter: fn_getter.clone(),
            fn_setter: fn_setter.clone(),
            index_parameters,
            custom_attributes: Arc::new(boxcar::Vec::new()),
        };

        for attribute in self.attributes {
            property.custom_attributes.push(attribute.build()?);
        }

        let accessors = fn_getter.into_iter().chain(fn_setter).collect();
        Ok((Arc::new(property), accessors))
    }
}
