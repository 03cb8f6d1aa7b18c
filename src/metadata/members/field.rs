use std::sync::Arc;

use crate::{
    metadata::{
        customattributes::{CustomAttributeBuilder, CustomAttributeValueList},
        members::MemberAccessFlags,
        token::Token,
        typesystem::{CilTypeRc, CilTypeRef, TypeRegistry},
    },
    Error, Result,
};

/// A vector that holds a list of `Field`
pub type FieldList = Arc<boxcar::Vec<FieldRc>>;
/// A reference to a field
pub type FieldRc = Arc<Field>;

#[allow(non_snake_case)]
/// All possible flags for `FieldAttributes`
pub mod FieldAttributes {
    /// These 3 bits contain one of the access values of [`MemberAccessFlags`](super::MemberAccessFlags)
    pub const FIELD_ACCESS_MASK: u32 = 0x0007;
    /// Defined on type, else per instance
    pub const STATIC: u32 = 0x0010;
    /// Field can only be initialized, not written to after init
    pub const INIT_ONLY: u32 = 0x0020;
    /// Value is compile time constant
    pub const LITERAL: u32 = 0x0040;
    /// Field is special
    pub const SPECIAL_NAME: u32 = 0x0200;
}

/// A field declared by a type
#[derive(Debug)]
pub struct Field {
    /// Token
    pub token: Token,
    /// a 2-byte bitmask of type `FieldAttributes`
    pub flags: u32,
    /// The name of this field
    pub name: String,
    /// The type of the stored value
    pub field_type: CilTypeRef,
    /// The type that declares this field
    pub declaring_type: CilTypeRef,
    /// Custom attributes applied to this field
    pub custom_attributes: CustomAttributeValueList,
}

impl Field {
    /// Accessibility of this field
    #[must_use]
    pub fn access(&self) -> MemberAccessFlags {
        MemberAccessFlags::from_flags(self.flags)
    }

    /// Defined on the type rather than per instance
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags & FieldAttributes::STATIC != 0
    }

    /// Can only be assigned during construction
    #[must_use]
    pub fn is_init_only(&self) -> bool {
        self.flags & FieldAttributes::INIT_ONLY != 0
    }

    /// Compile time constant
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.flags & FieldAttributes::LITERAL != 0
    }
}

/// Builder for fields declared through a [`TypeBuilder`](crate::metadata::typesystem::TypeBuilder).
///
/// Fields are private unless an access level is set.
pub struct FieldBuilder {
    name: Option<String>,
    field_type: Option<CilTypeRc>,
    access: MemberAccessFlags,
    flags: u32,
    attributes: Vec<CustomAttributeBuilder>,
}

impl Default for FieldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldBuilder {
    /// Creates a new `FieldBuilder`
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            field_type: None,
            access: MemberAccessFlags::PRIVATE,
            flags: 0,
            attributes: Vec::new(),
        }
    }

    /// Sets the field name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the type of the stored value
    #[must_use]
    pub fn field_type(mut self, field_type: &CilTypeRc) -> Self {
        self.field_type = Some(field_type.clone());
        self
    }

    /// Sets the accessibility
    #[must_use]
    pub fn access(mut self, access: MemberAccessFlags) -> Self {
        self.access = access;
        self
    }

    /// Makes the field `public`
    #[must_use]
    pub fn public(self) -> Self {
        self.access(MemberAccessFlags::PUBLIC)
    }

    /// Makes the field `internal`
    #[must_use]
    pub fn internal(self) -> Self {
        self.access(MemberAccessFlags::ASSEM)
    }

    /// Makes the field `protected internal`
    #[must_use]
    pub fn protected_internal(self) -> Self {
        self.access(MemberAccessFlags::FAM_OR_ASSEM)
    }

    /// Makes the field `protected`
    #[must_use]
    pub fn protected(self) -> Self {
        self.access(MemberAccessFlags::FAMILY)
    }

    /// Makes the field static
    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.flags |= FieldAttributes::STATIC;
        self
    }

    /// Makes the field `readonly`
    #[must_use]
    pub fn init_only(mut self) -> Self {
        self.flags |= FieldAttributes::INIT_ONLY;
        self
    }

    /// Makes the field a compile time constant, which implies static
    #[must_use]
    pub fn literal(mut self) -> Self {
        self.flags |= FieldAttributes::LITERAL | FieldAttributes::STATIC;
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
            _ => return Err(Error::TypeError("Field name is required".to_string())),
        }
        if self.field_type.is_none() {
            return Err(Error::TypeError("Field type is required".to_string()));
        }
        self.attributes
            .iter()
            .try_for_each(CustomAttributeBuilder::validate)
    }

    pub(crate) fn build(self, declaring_type: &CilTypeRc, registry: &TypeRegistry) -> Result<FieldRc> {
        self.validate()?;
        let name = self
            .name
            .ok_or_else(|| Error::TypeError("Field name is required".to_string()))?;
        let field_type = self
            .field_type
            .ok_or_else(|| Error::TypeError("Field type is required".to_string()))?;

        let field = Field {
            token: registry.next_member_token(Token::TABLE_FIELD)?,
            flags: self.flags | self.access.bits(),
            name,
            field_type: CilTypeRef::new(&field_type),
            declaring_type: CilTypeRef::new(declaring_type),
            custom_attributes: Arc::new(boxcar::Vec::new()),
        };

        for attribute in self.attributes {
            field.custom_attributes.push(attribute.build()?);
        }

        Ok(Arc::new(field))
    }
}
