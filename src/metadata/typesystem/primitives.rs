//! Built-in primitive types seeded into every [`TypeRegistry`](crate::metadata::typesystem::TypeRegistry).
//!
//! Primitive types use artificial tokens in the `0xF000_00xx` range so that they never collide
//! with the tokens handed out for user defined types. `System.Object` is the universal root of
//! every class hierarchy: member resolution stops before reaching it.

use strum::{EnumCount, EnumIter};

use crate::metadata::{token::Token, typesystem::CilFlavor};

/// Represents all primitive types known to the type model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum CilPrimitiveKind {
    /// System.Void - represents no value
    Void,
    /// System.Boolean - true/false value
    Boolean,
    /// System.Char - Unicode 16-bit character
    Char,
    /// System.SByte - signed 8-bit integer
    I1,
    /// System.Byte - unsigned 8-bit integer
    U1,
    /// System.Int16 - signed 16-bit integer
    I2,
    /// System.UInt16 - unsigned 16-bit integer
    U2,
    /// System.Int32 - signed 32-bit integer
    I4,
    /// System.UInt32 - unsigned 32-bit integer
    U4,
    /// System.Int64 - signed 64-bit integer
    I8,
    /// System.UInt64 - unsigned 64-bit integer
    U8,
    /// System.Single - 32-bit floating point
    R4,
    /// System.Double - 64-bit floating point
    R8,
    /// System.IntPtr - native sized signed integer
    I,
    /// System.UIntPtr - native sized unsigned integer
    U,
    /// System.Object - base class for all reference types
    Object,
    /// System.String - immutable string of Unicode characters
    String,
    /// System.ValueType - base class for value types
    ValueType,
}

impl CilPrimitiveKind {
    /// Get the token for this type
    #[must_use]
    pub fn token(&self) -> Token {
        Token::new(match self {
            CilPrimitiveKind::Void => 0xF000_0001,
            CilPrimitiveKind::Boolean => 0xF000_0002,
            CilPrimitiveKind::Char => 0xF000_0003,
            CilPrimitiveKind::I1 => 0xF000_0004,
            CilPrimitiveKind::U1 => 0xF000_0005,
            CilPrimitiveKind::I2 => 0xF000_0006,
            CilPrimitiveKind::U2 => 0xF000_0007,
            CilPrimitiveKind::I4 => 0xF000_0008,
            CilPrimitiveKind::U4 => 0xF000_0009,
            CilPrimitiveKind::I8 => 0xF000_000A,
            CilPrimitiveKind::U8 => 0xF000_000B,
            CilPrimitiveKind::R4 => 0xF000_000C,
            CilPrimitiveKind::R8 => 0xF000_000D,
            CilPrimitiveKind::I => 0xF000_000E,
            CilPrimitiveKind::U => 0xF000_000F,
            CilPrimitiveKind::Object => 0xF000_0010,
            CilPrimitiveKind::String => 0xF000_0011,
            CilPrimitiveKind::ValueType => 0xF000_0013,
        })
    }

    /// Get the namespace of this primitive
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        "System"
    }

    /// Get the short name (without namespace)
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CilPrimitiveKind::Void => "Void",
            CilPrimitiveKind::Boolean => "Boolean",
            CilPrimitiveKind::Char => "Char",
            CilPrimitiveKind::I1 => "SByte",
            CilPrimitiveKind::U1 => "Byte",
            CilPrimitiveKind::I2 => "Int16",
            CilPrimitiveKind::U2 => "UInt16",
            CilPrimitiveKind::I4 => "Int32",
            CilPrimitiveKind::U4 => "UInt32",
            CilPrimitiveKind::I8 => "Int64",
            CilPrimitiveKind::U8 => "UInt64",
            CilPrimitiveKind::R4 => "Single",
            CilPrimitiveKind::R8 => "Double",
            CilPrimitiveKind::I => "IntPtr",
            CilPrimitiveKind::U => "UIntPtr",
            CilPrimitiveKind::Object => "Object",
            CilPrimitiveKind::String => "String",
            CilPrimitiveKind::ValueType => "ValueType",
        }
    }

    /// Get the flavor a type of this primitive kind carries
    #[must_use]
    pub fn to_flavor(&self) -> CilFlavor {
        match self {
            CilPrimitiveKind::Void => CilFlavor::Void,
            CilPrimitiveKind::Boolean => CilFlavor::Boolean,
            CilPrimitiveKind::Char => CilFlavor::Char,
            CilPrimitiveKind::I1 => CilFlavor::I1,
            CilPrimitiveKind::U1 => CilFlavor::U1,
            CilPrimitiveKind::I2 => CilFlavor::I2,
            CilPrimitiveKind::U2 => CilFlavor::U2,
            CilPrimitiveKind::I4 => CilFlavor::I4,
            CilPrimitiveKind::U4 => CilFlavor::U4,
            CilPrimitiveKind::I8 => CilFlavor::I8,
            CilPrimitiveKind::U8 => CilFlavor::U8,
            CilPrimitiveKind::R4 => CilFlavor::R4,
            CilPrimitiveKind::R8 => CilFlavor::R8,
            CilPrimitiveKind::I => CilFlavor::I,
            CilPrimitiveKind::U => CilFlavor::U,
            CilPrimitiveKind::Object => CilFlavor::Object,
            CilPrimitiveKind::String => CilFlavor::String,
            CilPrimitiveKind::ValueType => CilFlavor::Class,
        }
    }

    /// The primitive this kind derives from, `None` for the root `System.Object`
    #[must_use]
    pub fn base(&self) -> Option<CilPrimitiveKind> {
        match self {
            CilPrimitiveKind::Object => None,
            CilPrimitiveKind::String | CilPrimitiveKind::ValueType => Some(CilPrimitiveKind::Object),
            _ => Some(CilPrimitiveKind::ValueType),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_primitive_tokens_unique_and_artificial() {
        let tokens: HashSet<Token> = CilPrimitiveKind::iter().map(|kind| kind.token()).collect();
        assert_eq!(tokens.len(), CilPrimitiveKind::COUNT);
        assert!(tokens
            .iter()
            .all(|token| token.table() == Token::TABLE_ARTIFICIAL));
    }

    #[test]
    fn test_primitive_names() {
        assert_eq!(CilPrimitiveKind::I4.name(), "Int32");
        assert_eq!(CilPrimitiveKind::U1.name(), "Byte");
        assert_eq!(CilPrimitiveKind::String.namespace(), "System");
    }

    #[test]
    fn test_primitive_base_chain_ends_at_object() {
        for kind in CilPrimitiveKind::iter() {
            let mut current = kind;
            let mut depth = 0;
            while let Some(base) = current.base() {
                current = base;
                depth += 1;
                assert!(depth <= 2, "{kind:?} has an unexpectedly deep base chain");
            }
            assert_eq!(current, CilPrimitiveKind::Object);
        }
    }

    #[test]
    fn test_primitive_flavors() {
        assert_eq!(CilPrimitiveKind::Object.to_flavor(), CilFlavor::Object);
        assert!(CilPrimitiveKind::I4.to_flavor().is_value_type());
        assert!(CilPrimitiveKind::String.to_flavor().is_reference_type());
    }
}
