use std::fmt;
use std::hash::{Hash, Hasher};

/// A metadata token identifying a type or member of the type model.
///
/// Tokens consist of a 32-bit value where:
/// - The high byte (bits 24-31) indicates the table type
/// - The low 24 bits (bits 0-23) indicate the row index within that table
///
/// The token of a [`CilType`](crate::metadata::typesystem::CilType) is its identity: the
/// member resolution cache is keyed by it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token(pub u32);

impl Token {
    /// Table id of type definitions
    pub const TABLE_TYPEDEF: u8 = 0x02;
    /// Table id of field definitions
    pub const TABLE_FIELD: u8 = 0x04;
    /// Table id of method definitions
    pub const TABLE_METHODDEF: u8 = 0x06;
    /// Table id of property definitions
    pub const TABLE_PROPERTY: u8 = 0x17;
    /// Artificial table used for the primitive types seeded by the registry
    pub const TABLE_ARTIFICIAL: u8 = 0xF0;

    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a new token from a table id and a row index
    ///
    /// ## Arguments
    /// * `table` - The table id, stored in the high byte
    /// * `row`   - The row index, truncated to 24 bits
    #[must_use]
    pub fn from_parts(table: u8, row: u32) -> Self {
        Token((u32::from(table) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table type from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
