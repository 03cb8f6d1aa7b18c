use std::sync::Arc;

use crate::metadata::typesystem::{CilType, CilTypeRc, CilTypeRef};

/// A reference to a `CustomAttributeValue`
pub type CustomAttributeValueRc = Arc<CustomAttributeValue>;
/// A list of custom attributes applied to a type or member
pub type CustomAttributeValueList = Arc<boxcar::Vec<CustomAttributeValueRc>>;

/// An attribute applied to a type or member, with its constructor and named arguments
#[derive(Debug, Clone)]
pub struct CustomAttributeValue {
    /// The attribute class
    pub attribute_type: CilTypeRef,
    /// Whether the attribute flows to derived types (`AttributeUsage.Inherited`)
    pub inherited: bool,
    /// Constructor arguments, in declaration order
    pub fixed_args: Vec<CustomAttributeArgument>,
    /// Field and property assignments
    pub named_args: Vec<CustomAttributeNamedArgument>,
}

impl CustomAttributeValue {
    /// Get a strong reference to the attribute class, if it is still alive
    #[must_use]
    pub fn attribute_type(&self) -> Option<CilTypeRc> {
        self.attribute_type.upgrade()
    }

    /// Check whether this attribute is an instance of `attribute_type` or of a class deriving
    /// from it
    #[must_use]
    pub fn is_instance_of(&self, attribute_type: &CilType) -> bool {
        self.attribute_type()
            .is_some_and(|ty| ty.is_same_or_inherits(attribute_type))
    }

    /// Look up the value of a named argument
    #[must_use]
    pub fn named_arg(&self, name: &str) -> Option<&CustomAttributeArgument> {
        self.named_args
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }
}

/// A single argument value of a custom attribute
#[derive(Debug, Clone, PartialEq)]
pub enum CustomAttributeArgument {
    /// No value
    Void,
    /// Boolean value
    Bool(bool),
    /// Character value
    Char(char),
    /// Signed 8-bit integer
    I1(i8),
    /// Unsigned 8-bit integer
    U1(u8),
    /// Signed 16-bit integer
    I2(i16),
    /// Unsigned 16-bit integer
    U2(u16),
    /// Signed 32-bit integer
    I4(i32),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Signed 64-bit integer
    I8(i64),
    /// Unsigned 64-bit integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// Native signed integer
    I(isize),
    /// Native unsigned integer
    U(usize),
    /// String value
    String(String),
    /// Type reference, stored by full name
    Type(String),
    /// Array of values
    Array(Vec<CustomAttributeArgument>),
    /// Enum value: the enum type name and the underlying value
    Enum(String, Box<CustomAttributeArgument>),
}

/// A field or property assignment of a custom attribute
#[derive(Debug, Clone)]
pub struct CustomAttributeNamedArgument {
    /// `true` when the target is a field, `false` for a property
    pub is_field: bool,
    /// Name of the field or property
    pub name: String,
    /// Full name of the argument type
    pub arg_type: String,
    /// The assigned value
    pub value: CustomAttributeArgument,
}
