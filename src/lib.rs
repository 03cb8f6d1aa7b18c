// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # reflectscope
//!
//! Member resolution for .NET-style type hierarchies.
//!
//! Raw metadata lists the members each type declares. Tools that want to answer "which
//! properties does this type expose?" the way .NET reflection users expect have to layer
//! several rules on top of that: members redeclared with `new` hide inherited ones,
//! explicit interface implementations live under qualified names, interfaces may provide
//! default property bodies and indexers are properties that are not really properties.
//! `reflectscope` implements those rules over an in-memory type model and caches the
//! results per type and query.
//!
//! ## Features
//!
//! - **Type model** - Classes, value types and interfaces with fields, properties, methods
//!   and custom attributes, built through a fluent [`metadata::typesystem::TypeBuilder`]
//! - **Member resolution** - Shadowing, accessibility, static selection, explicit interface
//!   implementations and default interface properties, selected by
//!   [`metadata::reflection::MemberKind`]
//! - **Lookups** - Properties, fields, indexers, methods and conversion operators by name
//!   and signature
//! - **Attributes** - Attribute queries on types and members, including inherited attributes
//! - **Thread safe** - Registries and caches can be shared between threads; concurrent
//!   queries for the same type observe one result
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use reflectscope::prelude::*;
//!
//! let registry = Arc::new(TypeRegistry::new()?);
//! let string = registry.get_primitive(CilPrimitiveKind::String)?;
//!
//! let speak = TypeBuilder::new(registry.clone())
//!     .interface("Contoso", "ISpeak")
//!     .property(PropertyBuilder::new().name("Say").property_type(&string).read_only())
//!     .build()?;
//!
//! let parrot = TypeBuilder::new(registry.clone())
//!     .class("Contoso", "Parrot")
//!     .implements(&speak)
//!     .property(PropertyBuilder::new().name("Name").property_type(&string).public())
//!     .property(
//!         PropertyBuilder::new()
//!             .name("Say")
//!             .property_type(&string)
//!             .read_only()
//!             .explicit_for(&speak),
//!     )
//!     .build()?;
//!
//! let public = registry.get_properties(&parrot, MemberKind::PUBLIC);
//! assert_eq!(public.len(), 1);
//!
//! let say = registry.find_property(&parrot, "Say", MemberKind::EXPLICITLY_IMPLEMENTED)?;
//! assert_eq!(say.map(|p| p.name.clone()).as_deref(), Some("Contoso.ISpeak.Say"));
//! # Ok::<(), reflectscope::Error>(())
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events: `debug` when a type is
//! registered or a member set is resolved, `trace` for individual cache hits and accepted
//! members. Install any subscriber to see them.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use reflectscope::prelude::*;
///
/// let registry = TypeRegistry::new()?;
/// let object = registry.object()?;
/// assert!(registry.get_properties(&object, MemberKind::PUBLIC).is_empty());
/// # Ok::<(), reflectscope::Error>(())
/// ```
pub mod prelude;

/// The type model and member resolution on top of it
///
/// # Key Components
///
/// - [`metadata::typesystem`] - Types, the registry that owns them and the builder
/// - [`metadata::members`] - Fields, properties and methods
/// - [`metadata::customattributes`] - Attributes applied to types and members
/// - [`metadata::reflection`] - Member resolution, caching and lookups
/// - [`metadata::token`] - Identifiers of types and members
pub mod metadata;

/// `reflectscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `reflectscope` Error type
///
/// The main error type for all operations in this crate. Member resolution itself never
/// fails, errors come from empty query arguments and malformed type declarations.
pub use error::Error;
