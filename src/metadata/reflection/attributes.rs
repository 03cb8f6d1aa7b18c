//! Custom attribute lookups on types and members.
//!
//! An attribute matches an attribute type when its class is that type or derives from it.
//! Lookups through [`AttributeProvider`] only see attributes applied directly to the type or
//! member. [`has_attribute_in_hierarchy`] and [`matching_attributes`] also look at base types,
//! where only attributes marked as inherited count.

use crate::metadata::{
    customattributes::{CustomAttributeValue, CustomAttributeValueList, CustomAttributeValueRc},
    members::{Field, Method, Property},
    reflection::Member,
    typesystem::{CilType, CilTypeRc},
};

/// Anything that carries custom attributes
pub trait AttributeProvider {
    /// The attributes applied directly to this type or member
    fn custom_attributes(&self) -> &CustomAttributeValueList;

    /// Check whether an attribute of `attribute_type` is applied directly
    fn has_attribute(&self, attribute_type: &CilType) -> bool {
        self.has_attribute_matching(attribute_type, |_| true)
    }

    /// Check whether an attribute of `attribute_type` satisfying `predicate` is applied directly
    fn has_attribute_matching<F>(&self, attribute_type: &CilType, predicate: F) -> bool
    where
        F: Fn(&CustomAttributeValue) -> bool,
    {
        self.custom_attributes()
            .iter()
            .any(|(_, attribute)| attribute.is_instance_of(attribute_type) && predicate(attribute))
    }

    /// Collect the directly applied attributes of `attribute_type`
    fn attributes_of(&self, attribute_type: &CilType) -> Vec<CustomAttributeValueRc> {
        self.custom_attributes()
            .iter()
            .filter(|(_, attribute)| attribute.is_instance_of(attribute_type))
            .map(|(_, attribute)| attribute.clone())
            .collect()
    }
}

impl AttributeProvider for CilType {
    fn custom_attributes(&self) -> &CustomAttributeValueList {
        &self.custom_attributes
    }
}

impl AttributeProvider for Field {
    fn custom_attributes(&self) -> &CustomAttributeValueList {
        &self.custom_attributes
    }
}

impl AttributeProvider for Property {
    fn custom_attributes(&self) -> &CustomAttributeValueList {
        &self.custom_attributes
    }
}

impl AttributeProvider for Method {
    fn custom_attributes(&self) -> &CustomAttributeValueList {
        &self.custom_attributes
    }
}

impl AttributeProvider for Member {
    fn custom_attributes(&self) -> &CustomAttributeValueList {
        Member::custom_attributes(self)
    }
}

/// Check whether `target` or one of its base types carries an attribute of `attribute_type`.
/// Attributes on base types only count when they are inherited.
pub fn has_attribute_in_hierarchy(target: &CilTypeRc, attribute_type: &CilType) -> bool {
    has_attribute_in_hierarchy_matching(target, attribute_type, |_| true)
}

/// Like [`has_attribute_in_hierarchy`], restricted to attributes satisfying `predicate`
pub fn has_attribute_in_hierarchy_matching<F>(
    target: &CilTypeRc,
    attribute_type: &CilType,
    predicate: F,
) -> bool
where
    F: Fn(&CustomAttributeValue) -> bool,
{
    !matching_attributes(target, attribute_type, predicate).is_empty()
}

/// Collect the attributes of `attribute_type` satisfying `predicate` that apply to `target`:
/// all attributes applied to `target` itself, followed by the inherited ones of its base types.
pub fn matching_attributes<F>(
    target: &CilTypeRc,
    attribute_type: &CilType,
    predicate: F,
) -> Vec<CustomAttributeValueRc>
where
    F: Fn(&CustomAttributeValue) -> bool,
{
    let own = target.custom_attributes.iter().map(|(_, attribute)| attribute);
    let inherited = target.ancestors().flat_map(|ancestor| {
        ancestor
            .custom_attributes
            .iter()
            .map(|(_, attribute)| attribute.clone())
            .filter(|attribute| attribute.inherited)
            .collect::<Vec<_>>()
    });

    own.cloned()
        .chain(inherited)
        .filter(|attribute| attribute.is_instance_of(attribute_type) && predicate(attribute))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::customattributes::CustomAttributeArgument,
        test::{attribute_fixture, message_of},
    };

    #[test]
    fn test_has_attribute_direct_only() {
        let fixture = attribute_fixture();

        assert!(fixture.with_attribute.has_attribute(&fixture.inheritable));
        assert!(fixture.with_attribute.has_attribute(&fixture.attribute));
        assert!(!fixture.with_attribute.has_attribute(&fixture.obsolete));
        assert!(!fixture.derived.has_attribute(&fixture.inheritable));
    }

    #[test]
    fn test_has_attribute_with_predicate() {
        let fixture = attribute_fixture();

        assert!(fixture
            .parameterized
            .has_attribute_matching(&fixture.inheritable, |attribute| {
                message_of(attribute).contains("First")
            }));
        assert!(!fixture
            .parameterized
            .has_attribute_matching(&fixture.inheritable, |attribute| {
                message_of(attribute).contains("Third")
            }));
    }

    #[test]
    fn test_hierarchy_lookup_respects_inherited_flag() {
        let fixture = attribute_fixture();

        assert!(has_attribute_in_hierarchy(&fixture.derived, &fixture.inheritable));
        assert!(has_attribute_in_hierarchy_matching(
            &fixture.derived,
            &fixture.inheritable,
            |attribute| message_of(attribute) == "FirstAttribute"
        ));
        assert!(!has_attribute_in_hierarchy_matching(
            &fixture.derived,
            &fixture.inheritable,
            |attribute| message_of(attribute) == "Other Message"
        ));
        assert!(!has_attribute_in_hierarchy(
            &fixture.derived_from_non_inheritable,
            &fixture.non_inheritable
        ));
        assert!(!has_attribute_in_hierarchy(&fixture.unrelated, &fixture.inheritable));
    }

    #[test]
    fn test_matching_attributes_collects_own_and_inherited() {
        let fixture = attribute_fixture();

        let own = matching_attributes(&fixture.with_attribute, &fixture.inheritable, |_| true);
        assert_eq!(own.len(), 1);
        assert_eq!(message_of(&own[0]), "SomeMessage");

        let inherited = matching_attributes(&fixture.derived, &fixture.inheritable, |_| true);
        let messages: Vec<&str> = inherited.iter().map(|a| message_of(a)).collect();
        assert_eq!(messages, vec!["FirstAttribute", "SecondAttribute"]);

        let filtered = matching_attributes(&fixture.derived, &fixture.inheritable, |attribute| {
            message_of(attribute).contains("First")
        });
        assert_eq!(filtered.len(), 1);

        let none = matching_attributes(&fixture.derived, &fixture.inheritable, |attribute| {
            message_of(attribute).contains("WrongValue")
        });
        assert!(none.is_empty());
    }

    #[test]
    fn test_member_attributes() {
        let fixture = attribute_fixture();
        let property = fixture.with_attribute.properties.get(0).unwrap();

        assert!(property.has_attribute(&fixture.obsolete));
        assert!(property.has_attribute_matching(&fixture.obsolete, |attribute| {
            attribute.fixed_args.first()
                == Some(&CustomAttributeArgument::String("Use Other".to_string()))
        }));
        assert_eq!(property.attributes_of(&fixture.obsolete).len(), 1);

        let member = Member::Property(property.clone());
        assert!(member.has_attribute(&fixture.obsolete));
        assert!(!member.has_attribute(&fixture.inheritable));
    }
}
