//! Recognition of types the C# compiler synthesizes.
//!
//! Records and anonymous types are ordinary classes and structs in metadata. They are told
//! apart by the members the compiler adds to them and by `CompilerGeneratedAttribute`:
//!
//! - A record class has a public `<Clone>$` method and a non-public `EqualityContract` property
//!   marked as compiler generated
//! - A record struct is a value type with a non-public, compiler generated
//!   `PrintMembers(System.Text.StringBuilder)` method
//! - An anonymous type carries `AnonymousType` in its name and is itself marked as compiler
//!   generated

use crate::metadata::{
    customattributes::CustomAttributeValueList,
    members::{MethodRc, PropertyRc},
    typesystem::CilType,
};

const COMPILER_GENERATED_ATTRIBUTE: &str =
    "System.Runtime.CompilerServices.CompilerGeneratedAttribute";
const STRING_BUILDER: &str = "System.Text.StringBuilder";

impl CilType {
    /// Check if this type was synthesized by the compiler: a record or an anonymous type
    #[must_use]
    pub fn is_compiler_generated(&self) -> bool {
        self.is_record() || self.is_anonymous()
    }

    /// Check if this type has a name a user can refer to in source code
    #[must_use]
    pub fn has_friendly_name(&self) -> bool {
        !self.is_anonymous()
    }

    /// Check if this type is an anonymous type (`new { Name = value }`)
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.fullname().contains("AnonymousType")
            && marks_compiler_generated(&self.custom_attributes)
    }

    /// Check if this type is a record class or a record struct
    #[must_use]
    pub fn is_record(&self) -> bool {
        self.is_record_class() || self.is_record_struct()
    }

    /// Check if this type is a `record` or `record class`
    #[must_use]
    pub fn is_record_class(&self) -> bool {
        if !self.flavor.is_reference_type() {
            return false;
        }

        let has_clone = self
            .find_method_in_hierarchy(|method| {
                method.name == "<Clone>$" && method.flags_access.is_public() && !method.is_static()
            })
            .is_some();

        has_clone
            && self
                .find_property_in_hierarchy(|property| {
                    property.name == "EqualityContract"
                        && !property.is_static()
                        && !property.has_public_accessor()
                })
                .is_some_and(|contract| {
                    marks_compiler_generated(&contract.custom_attributes)
                        || contract.fn_getter.as_ref().is_some_and(|getter| {
                            marks_compiler_generated(&getter.custom_attributes)
                        })
                })
    }

    /// Check if this type is a `record struct`
    #[must_use]
    pub fn is_record_struct(&self) -> bool {
        self.flavor.is_value_type()
            && self.methods.iter().any(|(_, method)| {
                method.name == "PrintMembers"
                    && !method.flags_access.is_public()
                    && !method.is_static()
                    && method.params.len() == 1
                    && method.params[0].fullname().as_deref() == Some(STRING_BUILDER)
                    && marks_compiler_generated(&method.custom_attributes)
            })
    }

    fn find_method_in_hierarchy<F>(&self, predicate: F) -> Option<MethodRc>
    where
        F: Fn(&MethodRc) -> bool,
    {
        let find = |ty: &CilType| {
            ty.methods
                .iter()
                .map(|(_, method)| method)
                .find(|method| predicate(*method))
                .cloned()
        };

        find(self).or_else(|| self.ancestors().find_map(|ancestor| find(&*ancestor)))
    }

    fn find_property_in_hierarchy<F>(&self, predicate: F) -> Option<PropertyRc>
    where
        F: Fn(&PropertyRc) -> bool,
    {
        let find = |ty: &CilType| {
            ty.properties
                .iter()
                .map(|(_, property)| property)
                .find(|property| predicate(*property))
                .cloned()
        };

        find(self).or_else(|| self.ancestors().find_map(|ancestor| find(&*ancestor)))
    }
}

fn marks_compiler_generated(attributes: &CustomAttributeValueList) -> bool {
    attributes.iter().any(|(_, attribute)| {
        attribute.attribute_type.fullname().as_deref() == Some(COMPILER_GENERATED_ATTRIBUTE)
    })
}
