//! Central type registry.
//!
//! This module provides the `TypeRegistry`, a thread-safe registry owning every type of a type
//! model. Besides storing the types it hands out tokens for new types and members, and it owns
//! the [`ReflectorCache`] so that resolved member sets live exactly as long as the types they
//! were computed from.
//!
//! # Registry Architecture
//!
//! The type registry uses a multi-index approach for efficient type lookup:
//!
//! - **Token-based lookup**: Primary index using tokens
//! - **Name-based lookup**: Secondary indices for full names, simple names, and namespaces
//!
//! # Thread Safety
//!
//! - Lock-free data structures for primary storage (`SkipMap`)
//! - Concurrent hash maps for indices (`DashMap`)
//! - Atomic operations for token generation
//!
//! # Examples
//!
//! ```rust
//! use reflectscope::metadata::typesystem::{CilPrimitiveKind, TypeRegistry};
//!
//! let registry = TypeRegistry::new()?;
//!
//! let string = registry.get_by_fullname("System.String").unwrap();
//! assert_eq!(string.token, CilPrimitiveKind::String.token());
//! assert_eq!(registry.get_by_namespace("System").len(), registry.len());
//! # Ok::<(), reflectscope::Error>(())
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use strum::IntoEnumIterator;

use crate::{
    metadata::{
        reflection::ReflectorCache,
        token::Token,
        typesystem::{CilFlavor, CilPrimitiveKind, CilType, CilTypeRc},
    },
    Error::{TypeError, TypeNotFound},
    Result,
};

/// Highest row a token can address
const MAX_ROW: u32 = 0x00FF_FFFF;

/// Central registry for all types of a type model.
///
/// Primitive types are seeded on construction, so `System.Object` is always available as the
/// root of class hierarchies. New types receive `TypeDef` tokens starting at `0x02000001`.
pub struct TypeRegistry {
    /// Primary storage: token to type
    types: SkipMap<Token, CilTypeRc>,
    /// Next row for newly created types
    next_type_row: AtomicU32,
    /// Next row per member table
    next_field_row: AtomicU32,
    next_method_row: AtomicU32,
    next_property_row: AtomicU32,
    /// Index by full name (`Namespace.Name`)
    types_by_fullname: DashMap<String, Vec<Token>>,
    /// Index by simple name
    types_by_name: DashMap<String, Vec<Token>>,
    /// Index by namespace
    types_by_namespace: DashMap<String, Vec<Token>>,
    /// Resolved member sets keyed by type and member kind
    reflector_cache: ReflectorCache,
}

impl TypeRegistry {
    /// Create a new registry seeded with the primitive types
    ///
    /// # Errors
    /// Returns an error if the primitive hierarchy cannot be linked
    pub fn new() -> Result<Self> {
        let registry = TypeRegistry {
            types: SkipMap::new(),
            next_type_row: AtomicU32::new(1),
            next_field_row: AtomicU32::new(1),
            next_method_row: AtomicU32::new(1),
            next_property_row: AtomicU32::new(1),
            types_by_fullname: DashMap::new(),
            types_by_name: DashMap::new(),
            types_by_namespace: DashMap::new(),
            reflector_cache: ReflectorCache::new(),
        };

        registry.initialize_primitives()?;
        Ok(registry)
    }

    // The counter stops at MAX_ROW + 1, so an exhausted table keeps failing
    fn next_row(counter: &AtomicU32, table: u8) -> Result<Token> {
        let row = counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |row| {
                (row <= MAX_ROW).then_some(row + 1)
            })
            .map_err(|_| TypeError(format!("No rows left in table 0x{table:02x}")))?;

        Ok(Token::from_parts(table, row))
    }

    fn next_token(&self) -> Result<Token> {
        Self::next_row(&self.next_type_row, Token::TABLE_TYPEDEF)
    }

    /// Hand out a fresh token for a member of the given table
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeError`] once every row of the table is taken
    pub(crate) fn next_member_token(&self, table: u8) -> Result<Token> {
        let counter = match table {
            Token::TABLE_FIELD => &self.next_field_row,
            Token::TABLE_PROPERTY => &self.next_property_row,
            _ => &self.next_method_row,
        };
        Self::next_row(counter, table)
    }

    fn initialize_primitives(&self) -> Result<()> {
        for kind in CilPrimitiveKind::iter() {
            let new_type = Arc::new(CilType::new(
                kind.token(),
                kind.namespace().to_string(),
                kind.name().to_string(),
                kind.to_flavor(),
                0,
            ));

            self.register_type_internal(&new_type);
        }

        for kind in CilPrimitiveKind::iter() {
            if let Some(base) = kind.base() {
                let primitive = self.get_primitive(kind)?;
                primitive.set_base(&self.get_primitive(base)?)?;
            }
        }

        Ok(())
    }

    fn register_type_internal(&self, type_rc: &CilTypeRc) {
        let token = type_rc.token;
        if self.types.contains_key(&token) {
            return;
        }

        self.types.insert(token, type_rc.clone());

        if !type_rc.namespace.is_empty() {
            self.types_by_namespace
                .entry(type_rc.namespace.clone())
                .or_default()
                .push(token);
        }

        self.types_by_name
            .entry(type_rc.name.clone())
            .or_default()
            .push(token);

        self.types_by_fullname
            .entry(type_rc.fullname())
            .or_default()
            .push(token);
    }

    /// Insert a type that was created outside of the registry.
    ///
    /// A type whose token is already registered is ignored.
    ///
    /// ## Arguments
    /// * `new_type` - The type to register
    pub fn insert(&self, new_type: &CilTypeRc) {
        self.register_type_internal(new_type);
    }

    /// Create and register a new type without base type or members
    ///
    /// ## Arguments
    /// * `flavor`    - Class, value type or interface
    /// * `namespace` - The namespace, may be empty
    /// * `name`      - The simple name
    /// * `flags`     - `TypeAttributes` of the new type
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeError`] if `name` is empty or no `TypeDef` row is left
    pub fn create_type(
        &self,
        flavor: CilFlavor,
        namespace: &str,
        name: &str,
        flags: u32,
    ) -> Result<CilTypeRc> {
        if name.is_empty() {
            return Err(TypeError("Type name is required".to_string()));
        }

        let new_type = Arc::new(CilType::new(
            self.next_token()?,
            namespace.to_string(),
            name.to_string(),
            flavor,
            flags,
        ));

        self.register_type_internal(&new_type);
        Ok(new_type)
    }

    /// Get a primitive type
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the primitive is missing
    pub fn get_primitive(&self, primitive: CilPrimitiveKind) -> Result<CilTypeRc> {
        match self.types.get(&primitive.token()) {
            Some(res) => Ok(res.value().clone()),
            None => Err(TypeNotFound(primitive.token())),
        }
    }

    /// Get `System.Object`, the root of every class hierarchy
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the primitive is missing
    pub fn object(&self) -> Result<CilTypeRc> {
        self.get_primitive(CilPrimitiveKind::Object)
    }

    /// Get a type by its token
    pub fn get(&self, token: &Token) -> Option<CilTypeRc> {
        self.types.get(token).map(|entry| entry.value().clone())
    }

    /// Get all types of a namespace
    pub fn get_by_namespace(&self, namespace: &str) -> Vec<CilTypeRc> {
        self.resolve_tokens(self.types_by_namespace.get(namespace).as_deref())
    }

    /// Get all types with the given simple name
    pub fn get_by_name(&self, name: &str) -> Vec<CilTypeRc> {
        self.resolve_tokens(self.types_by_name.get(name).as_deref())
    }

    /// Get the first type registered under the given full name
    pub fn get_by_fullname(&self, fullname: &str) -> Option<CilTypeRc> {
        let tokens = self.types_by_fullname.get(fullname)?;
        tokens.first().and_then(|token| self.get(token))
    }

    fn resolve_tokens(&self, tokens: Option<&Vec<Token>>) -> Vec<CilTypeRc> {
        tokens
            .map(|tokens| tokens.iter().filter_map(|token| self.get(token)).collect())
            .unwrap_or_default()
    }

    /// Number of registered types, primitives included
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types are registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over all types in token order
    pub fn iter(&self) -> impl Iterator<Item = CilTypeRc> + '_ {
        self.types.iter().map(|entry| entry.value().clone())
    }

    /// The cache of resolved member sets
    pub fn reflector_cache(&self) -> &ReflectorCache {
        &self.reflector_cache
    }
}
