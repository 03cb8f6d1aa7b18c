//! Builder for types and their declared members.
//!
//! This module provides the [`TypeBuilder`] struct, which offers a fluent API for declaring
//! classes, value types and interfaces together with their base type, implemented interfaces,
//! attributes and members. The finished type is registered in the [`TypeRegistry`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use reflectscope::metadata::members::{FieldBuilder, PropertyBuilder};
//! use reflectscope::metadata::typesystem::{CilPrimitiveKind, TypeBuilder, TypeRegistry};
//!
//! let registry = Arc::new(TypeRegistry::new()?);
//! let string = registry.get_primitive(CilPrimitiveKind::String)?;
//!
//! let named = TypeBuilder::new(registry.clone())
//!     .interface("Contoso", "INamed")
//!     .property(PropertyBuilder::new().name("Name").property_type(&string).read_only())
//!     .build()?;
//!
//! let person = TypeBuilder::new(registry.clone())
//!     .class("Contoso", "Person")
//!     .implements(&named)
//!     .field(FieldBuilder::new().name("name").field_type(&string))
//!     .property(PropertyBuilder::new().name("Name").property_type(&string).public())
//!     .build()?;
//!
//! assert_eq!(person.base().unwrap().fullname(), "System.Object");
//! assert_eq!(person.all_interfaces().len(), 1);
//! # Ok::<(), reflectscope::Error>(())
//! ```

use std::sync::Arc;

use crate::{
    metadata::{
        customattributes::CustomAttributeBuilder,
        members::{FieldBuilder, MethodBuilder, PropertyBuilder},
        typesystem::{CilFlavor, CilPrimitiveKind, CilTypeRc, TypeAttributes, TypeRegistry},
    },
    Error::TypeError,
    Result,
};

/// Provides a fluent API for building types
pub struct TypeBuilder {
    /// Type registry for storing the types
    registry: Arc<TypeRegistry>,
    flavor: CilFlavor,
    namespace: String,
    name: String,
    flags: u32,
    base: Option<CilTypeRc>,
    interfaces: Vec<CilTypeRc>,
    attributes: Vec<CustomAttributeBuilder>,
    fields: Vec<FieldBuilder>,
    properties: Vec<PropertyBuilder>,
    methods: Vec<MethodBuilder>,
}

impl TypeBuilder {
    /// Create a new builder with the given registry
    ///
    /// ## Arguments
    /// * 'registry' - The type registry to use
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        TypeBuilder {
            registry,
            flavor: CilFlavor::Class,
            namespace: String::new(),
            name: String::new(),
            flags: TypeAttributes::PUBLIC,
            base: None,
            interfaces: Vec::new(),
            attributes: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    fn named(mut self, flavor: CilFlavor, namespace: &str, name: &str) -> Self {
        self.flavor = flavor;
        self.namespace = namespace.to_string();
        self.name = name.to_string();
        self
    }

    /// Declare a class, deriving from `System.Object` unless [`TypeBuilder::extends`] is used
    ///
    /// ## Arguments
    /// * 'namespace' - The namespace of the class
    /// * 'name'      - The name of the class
    #[must_use]
    pub fn class(self, namespace: &str, name: &str) -> Self {
        self.named(CilFlavor::Class, namespace, name)
    }

    /// Declare a value type, deriving from `System.ValueType`
    ///
    /// ## Arguments
    /// * 'namespace' - The namespace of the value type
    /// * 'name'      - The name of the value type
    #[must_use]
    pub fn value_type(mut self, namespace: &str, name: &str) -> Self {
        self.flags |= TypeAttributes::SEALED;
        self.named(CilFlavor::ValueType, namespace, name)
    }

    /// Declare an interface, which has no base type
    ///
    /// ## Arguments
    /// * 'namespace' - The namespace of the interface
    /// * 'name'      - The name of the interface
    #[must_use]
    pub fn interface(mut self, namespace: &str, name: &str) -> Self {
        self.flags |= TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT;
        self.named(CilFlavor::Interface, namespace, name)
    }

    /// Replace the `TypeAttributes` of the type
    #[must_use]
    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Set the base type
    #[must_use]
    pub fn extends(mut self, base: &CilTypeRc) -> Self {
        self.base = Some(base.clone());
        self
    }

    /// Add an implemented interface, or an extended one when building an interface
    #[must_use]
    pub fn implements(mut self, interface: &CilTypeRc) -> Self {
        self.interfaces.push(interface.clone());
        self
    }

    /// Apply a custom attribute to the type
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Declare a field
    #[must_use]
    pub fn field(mut self, field: FieldBuilder) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a property, its accessors are declared as methods too
    #[must_use]
    pub fn property(mut self, property: PropertyBuilder) -> Self {
        self.properties.push(property);
        self
    }

    /// Declare a method
    #[must_use]
    pub fn method(mut self, method: MethodBuilder) -> Self {
        self.methods.push(method);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(TypeError("Type name is required".to_string()));
        }

        if let Some(base) = &self.base {
            if self.flavor == CilFlavor::Interface {
                return Err(TypeError(format!(
                    "Interface '{}' cannot extend the class '{}'",
                    self.name,
                    base.fullname()
                )));
            }
            if base.is_interface() {
                return Err(TypeError(format!(
                    "Type '{}' cannot use the interface '{}' as base type",
                    self.name,
                    base.fullname()
                )));
            }
        }

        if let Some(interface) = self.interfaces.iter().find(|ty| !ty.is_interface()) {
            return Err(TypeError(format!(
                "Type '{}' cannot implement '{}', which is not an interface",
                self.name,
                interface.fullname()
            )));
        }

        self.attributes
            .iter()
            .try_for_each(CustomAttributeBuilder::validate)?;
        self.fields.iter().try_for_each(FieldBuilder::validate)?;
        self.properties
            .iter()
            .try_for_each(PropertyBuilder::validate)?;
        self.methods.iter().try_for_each(MethodBuilder::validate)
    }

    /// Validate the declaration, then create and register the type with all of its members
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeError`] if the type or one of its members is malformed,
    /// for example when a name is missing or a class is used as interface. Nothing is
    /// registered in that case.
    pub fn build(self) -> Result<CilTypeRc> {
        self.validate()?;

        let base = match (&self.base, self.flavor) {
            (Some(base), _) => Some(base.clone()),
            (None, CilFlavor::Interface) => None,
            (None, CilFlavor::ValueType) => {
                Some(self.registry.get_primitive(CilPrimitiveKind::ValueType)?)
            }
            (None, _) => Some(self.registry.object()?),
        };

        let new_type =
            self.registry
                .create_type(self.flavor, &self.namespace, &self.name, self.flags)?;

        if let Some(base) = base {
            new_type.set_base(&base)?;
        }

        for interface in &self.interfaces {
            new_type.add_interface(interface)?;
        }

        for attribute in self.attributes {
            new_type.custom_attributes.push(attribute.build()?);
        }

        for field in self.fields {
            new_type.fields.push(field.build(&new_type, &self.registry)?);
        }

        for property in self.properties {
            let (property, accessors) = property.build(&new_type, &self.registry)?;
            new_type.properties.push(property);
            for accessor in accessors {
                new_type.methods.push(accessor);
            }
        }

        for method in self.methods {
            new_type
                .methods
                .push(method.build(&new_type, &self.registry)?);
        }

        tracing::debug!(
            token = %new_type.token,
            fields = new_type.fields.count(),
            properties = new_type.properties.count(),
            methods = new_type.methods.count(),
            "registered type '{}'",
            new_type.fullname()
        );

        Ok(new_type)
    }
}
