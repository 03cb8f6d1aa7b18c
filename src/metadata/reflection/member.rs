use std::fmt;

use crate::metadata::{
    customattributes::CustomAttributeValueList,
    members::{FieldRc, PropertyRc},
    token::Token,
    typesystem::CilTypeRc,
};

/// A resolved property or field
#[derive(Clone)]
pub enum Member {
    /// A property
    Property(PropertyRc),
    /// A field
    Field(FieldRc),
}

impl Member {
    /// Token of the underlying property or field
    #[must_use]
    pub fn token(&self) -> Token {
        match self {
            Member::Property(property) => property.token,
            Member::Field(field) => field.token,
        }
    }

    /// Declared name, qualified for explicit interface implementations
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Member::Property(property) => &property.name,
            Member::Field(field) => &field.name,
        }
    }

    /// Type of the property value or of the stored field value
    #[must_use]
    pub fn member_type(&self) -> Option<CilTypeRc> {
        match self {
            Member::Property(property) => property.property_type.upgrade(),
            Member::Field(field) => field.field_type.upgrade(),
        }
    }

    /// Type that declares the member
    #[must_use]
    pub fn declaring_type(&self) -> Option<CilTypeRc> {
        match self {
            Member::Property(property) => property.declaring_type.upgrade(),
            Member::Field(field) => field.declaring_type.upgrade(),
        }
    }

    /// Custom attributes applied to the member
    #[must_use]
    pub fn custom_attributes(&self) -> &CustomAttributeValueList {
        match self {
            Member::Property(property) => &property.custom_attributes,
            Member::Field(field) => &field.custom_attributes,
        }
    }

    /// The property, if this member is one
    #[must_use]
    pub fn as_property(&self) -> Option<&PropertyRc> {
        match self {
            Member::Property(property) => Some(property),
            Member::Field(_) => None,
        }
    }

    /// The field, if this member is one
    #[must_use]
    pub fn as_field(&self) -> Option<&FieldRc> {
        match self {
            Member::Field(field) => Some(field),
            Member::Property(_) => None,
        }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Property(property) => write!(f, "Property({}, {})", property.name, property.token),
            Member::Field(field) => write!(f, "Field({}, {})", field.name, field.token),
        }
    }
}
