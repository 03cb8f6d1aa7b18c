use std::sync::Arc;

use bitflags::bitflags;

use crate::{
    metadata::{
        customattributes::{CustomAttributeBuilder, CustomAttributeValueList},
        members::MemberAccessFlags,
        token::Token,
        typesystem::{CilType, CilTypeRc, CilTypeRef, TypeRegistry},
    },
    Error, Result,
};

/// A vector that holds a list of `Method`
pub type MethodList = Arc<boxcar::Vec<MethodRc>>;
/// A reference to a `Method`
pub type MethodRc = Arc<Method>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !super::MEMBER_ACCESS_MASK)
    }
}

/// A method declared by a type. Property accessors are methods too.
#[derive(Debug)]
pub struct Method {
    /// Token
    pub token: Token,
    /// The name of this method
    pub name: String,
    /// Accessibility of this method
    pub flags_access: MemberAccessFlags,
    /// Static, virtual, abstract and other modifiers
    pub flags_modifiers: MethodModifiers,
    /// The return type, `None` for `void`
    pub return_type: Option<CilTypeRef>,
    /// Parameter types, in declaration order
    pub params: Vec<CilTypeRef>,
    /// The type that declares this method
    pub declaring_type: CilTypeRef,
    /// Custom attributes applied to this method
    pub custom_attributes: CustomAttributeValueList,
}

impl Method {
    /// Defined on the type rather than per instance
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags_modifiers.contains(MethodModifiers::STATIC)
    }

    /// Has no implementation
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags_modifiers.contains(MethodModifiers::ABSTRACT)
    }

    /// Can be overridden
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.flags_modifiers.contains(MethodModifiers::VIRTUAL)
    }

    /// Carries a compiler-reserved name, like property accessors and operators
    #[must_use]
    pub fn is_special_name(&self) -> bool {
        self.flags_modifiers.contains(MethodModifiers::SPECIAL_NAME)
    }

    /// Check whether the parameter list equals `parameter_types`, element by element
    #[must_use]
    pub fn matches_parameters(&self, parameter_types: &[CilTypeRc]) -> bool {
        self.params.len() == parameter_types.len()
            && self
                .params
                .iter()
                .zip(parameter_types)
                .all(|(param, expected)| param.is(expected))
    }

    /// Check whether this method returns `ty`
    #[must_use]
    pub fn returns(&self, ty: &CilType) -> bool {
        self.return_type
            .as_ref()
            .is_some_and(|return_type| return_type.is(ty))
    }

    /// Check whether this method returns nothing
    #[must_use]
    pub fn returns_void(&self) -> bool {
        self.return_type.is_none()
    }
}

/// Builder for methods declared through a [`TypeBuilder`](crate::metadata::typesystem::TypeBuilder).
///
/// Without an explicit access level, methods of interfaces are public and methods of other
/// types are private. Interface methods are abstract unless [`MethodBuilder::with_body`] is
/// called.
pub struct MethodBuilder {
    name: Option<String>,
    access: Option<MemberAccessFlags>,
    modifiers: MethodModifiers,
    has_body: Option<bool>,
    return_type: Option<SignatureType>,
    params: Vec<SignatureType>,
    attributes: Vec<CustomAttributeBuilder>,
}

/// A type in a method signature, which may be the type under construction
enum SignatureType {
    Declaring,
    Known(CilTypeRc),
}

impl SignatureType {
    fn resolve(&self, declaring_type: &CilTypeRc) -> CilTypeRef {
        match self {
            SignatureType::Declaring => CilTypeRef::new(declaring_type),
            SignatureType::Known(ty) => CilTypeRef::new(ty),
        }
    }
}

impl Default for MethodBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodBuilder {
    /// Creates a new `MethodBuilder`
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            access: None,
            modifiers: MethodModifiers::HIDE_BY_SIG,
            has_body: None,
            return_type: None,
            params: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Creates a public static `op_Explicit` operator converting `source` into `target`
    #[must_use]
    pub fn explicit_operator(source: &CilTypeRc, target: &CilTypeRc) -> Self {
        Self::conversion_operator("op_Explicit", source, target)
    }

    /// Creates a public static `op_Implicit` operator converting `source` into `target`
    #[must_use]
    pub fn implicit_operator(source: &CilTypeRc, target: &CilTypeRc) -> Self {
        Self::conversion_operator("op_Implicit", source, target)
    }

    /// Creates a public static `op_Explicit` operator converting the declaring type into
    /// `target`
    #[must_use]
    pub fn explicit_operator_to(target: &CilTypeRc) -> Self {
        Self::operator("op_Explicit")
            .param_declaring_type()
            .returns(target)
    }

    /// Creates a public static `op_Implicit` operator converting `source` into the declaring
    /// type
    #[must_use]
    pub fn implicit_operator_from(source: &CilTypeRc) -> Self {
        Self::operator("op_Implicit")
            .param(source)
            .returns_declaring_type()
    }

    fn conversion_operator(name: &str, source: &CilTypeRc, target: &CilTypeRc) -> Self {
        Self::operator(name).param(source).returns(target)
    }

    fn operator(name: &str) -> Self {
        Self::new().name(name).public().static_member().special_name()
    }

    /// Sets the method name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the accessibility
    #[must_use]
    pub fn access(mut self, access: MemberAccessFlags) -> Self {
        self.access = Some(access);
        self
    }

    /// Makes the method `public`
    #[must_use]
    pub fn public(self) -> Self {
        self.access(MemberAccessFlags::PUBLIC)
    }

    /// Makes the method `internal`
    #[must_use]
    pub fn internal(self) -> Self {
        self.access(MemberAccessFlags::ASSEM)
    }

    /// Makes the method `private`
    #[must_use]
    pub fn private(self) -> Self {
        self.access(MemberAccessFlags::PRIVATE)
    }

    /// Makes the method static
    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.modifiers |= MethodModifiers::STATIC;
        self
    }

    /// Makes the method virtual
    #[must_use]
    pub fn virtual_member(mut self) -> Self {
        self.modifiers |= MethodModifiers::VIRTUAL;
        self
    }

    /// Makes the method abstract (and virtual)
    #[must_use]
    pub fn abstract_member(mut self) -> Self {
        self.has_body = Some(false);
        self
    }

    /// Gives an interface method a default implementation
    #[must_use]
    pub fn with_body(mut self) -> Self {
        self.has_body = Some(true);
        self
    }

    /// Marks the name as compiler-reserved
    #[must_use]
    pub fn special_name(mut self) -> Self {
        self.modifiers |= MethodModifiers::SPECIAL_NAME;
        self
    }

    /// Appends a parameter
    #[must_use]
    pub fn param(mut self, param_type: &CilTypeRc) -> Self {
        self.params.push(SignatureType::Known(param_type.clone()));
        self
    }

    /// Appends a parameter of the type that declares the method
    #[must_use]
    pub fn param_declaring_type(mut self) -> Self {
        self.params.push(SignatureType::Declaring);
        self
    }

    /// Sets the return type, methods without one return `void`
    #[must_use]
    pub fn returns(mut self, return_type: &CilTypeRc) -> Self {
        self.return_type = Some(SignatureType::Known(return_type.clone()));
        self
    }

    /// Returns the type that declares the method
    #[must_use]
    pub fn returns_declaring_type(mut self) -> Self {
        self.return_type = Some(SignatureType::Declaring);
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
            _ => return Err(Error::TypeError("Method name is required".to_string())),
        }
        self.attributes
            .iter()
            .try_for_each(CustomAttributeBuilder::validate)
    }

    pub(crate) fn build(self, declaring_type: &CilTypeRc, registry: &TypeRegistry) -> Result<MethodRc> {
        self.validate()?;
        let name = self
            .name
            .ok_or_else(|| Error::TypeError("Method name is required".to_string()))?;

        let on_interface = declaring_type.is_interface();
        let access = self.access.unwrap_or(if on_interface {
            MemberAccessFlags::PUBLIC
        } else {
            MemberAccessFlags::PRIVATE
        });

        let mut modifiers = self.modifiers;
        if !self.has_body.unwrap_or(!on_interface) {
            modifiers |= MethodModifiers::ABSTRACT | MethodModifiers::VIRTUAL;
        }

        let method = Method {
            token: registry.next_member_token(Token::TABLE_METHODDEF)?,
            name,
            flags_access: access,
            flags_modifiers: modifiers,
            return_type: self
                .return_type
                .as_ref()
                .map(|ty| ty.resolve(declaring_type)),
            params: self
                .params
                .iter()
                .map(|ty| ty.resolve(declaring_type))
                .collect(),
            declaring_type: CilTypeRef::new(declaring_type),
            custom_attributes: Arc::new(boxcar::Vec::new()),
        };

        for attribute in self.attributes {
            method.custom_attributes.push(attribute.build()?);
        }

        Ok(Arc::new(method))
    }
}
