use std::sync::Arc;

use crate::{
    metadata::{
        customattributes::{
            CustomAttributeArgument, CustomAttributeNamedArgument, CustomAttributeValue,
            CustomAttributeValueRc,
        },
        typesystem::{CilTypeRc, CilTypeRef},
    },
    Error, Result,
};

/// Builder for attributes applied to types and members.
///
/// Attributes are inherited by derived types unless [`CustomAttributeBuilder::not_inherited`]
/// is called, mirroring the default of `AttributeUsage.Inherited`.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use reflectscope::metadata::customattributes::{CustomAttributeArgument, CustomAttributeBuilder};
/// use reflectscope::metadata::typesystem::{TypeBuilder, TypeRegistry};
///
/// let registry = Arc::new(TypeRegistry::new()?);
/// let obsolete = TypeBuilder::new(registry.clone())
///     .class("System", "ObsoleteAttribute")
///     .build()?;
///
/// let widget = TypeBuilder::new(registry.clone())
///     .class("Contoso", "Widget")
///     .attribute(
///         CustomAttributeBuilder::new()
///             .attribute_type(&obsolete)
///             .fixed_arg(CustomAttributeArgument::String("Use Gadget".into())),
///     )
///     .build()?;
///
/// assert_eq!(widget.custom_attributes.count(), 1);
/// # Ok::<(), reflectscope::Error>(())
/// ```
pub struct CustomAttributeBuilder {
    attribute_type: Option<CilTypeRc>,
    inherited: bool,
    fixed_args: Vec<CustomAttributeArgument>,
    named_args: Vec<CustomAttributeNamedArgument>,
}

impl Default for CustomAttributeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomAttributeBuilder {
    /// Creates a new `CustomAttributeBuilder`
    #[must_use]
    pub fn new() -> Self {
        Self {
            attribute_type: None,
            inherited: true,
            fixed_args: Vec::new(),
            named_args: Vec::new(),
        }
    }

    /// Sets the attribute class
    #[must_use]
    pub fn attribute_type(mut self, attribute_type: &CilTypeRc) -> Self {
        self.attribute_type = Some(attribute_type.clone());
        self
    }

    /// Marks the attribute as not flowing to derived types
    #[must_use]
    pub fn not_inherited(mut self) -> Self {
        self.inherited = false;
        self
    }

    /// Appends a constructor argument
    #[must_use]
    pub fn fixed_arg(mut self, value: CustomAttributeArgument) -> Self {
        self.fixed_args.push(value);
        self
    }

    /// Appends a property assignment
    #[must_use]
    pub fn named_property(
        mut self,
        name: impl Into<String>,
        arg_type: impl Into<String>,
        value: CustomAttributeArgument,
    ) -> Self {
        self.named_args.push(CustomAttributeNamedArgument {
            is_field: false,
            name: name.into(),
            arg_type: arg_type.into(),
            value,
        });
        self
    }

    /// Appends a field assignment
    #[must_use]
    pub fn named_field(
        mut self,
        name: impl Into<String>,
        arg_type: impl Into<String>,
        value: CustomAttributeArgument,
    ) -> Self {
        self.named_args.push(CustomAttributeNamedArgument {
            is_field: true,
            name: name.into(),
            arg_type: arg_type.into(),
            value,
        });
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.attribute_type.is_none() {
            return Err(Error::TypeError("Attribute type is required".to_string()));
        }
        Ok(())
    }

    pub(crate) fn build(self) -> Result<CustomAttributeValueRc> {
        let attribute_type = self
            .attribute_type
            .ok_or_else(|| Error::TypeError("Attribute type is required".to_string()))?;

        Ok(Arc::new(CustomAttributeValue {
            attribute_type: CilTypeRef::new(&attribute_type),
            inherited: self.inherited,
            fixed_args: self.fixed_args,
            named_args: self.named_args,
        }))
    }
}
