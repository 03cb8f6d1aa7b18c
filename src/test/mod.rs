//! Shared type models for unit tests.
//!
//! Each fixture builds its types into a fresh registry, so tests never observe each other's
//! cache entries.

#![allow(dead_code)]

use std::sync::Arc;

use crate::metadata::{
    customattributes::{CustomAttributeArgument, CustomAttributeBuilder, CustomAttributeValue},
    members::{FieldBuilder, MemberAccessFlags, MethodBuilder, PropertyBuilder, PropertyRc},
    typesystem::{CilPrimitiveKind, CilTypeRc, TypeBuilder, TypeRegistry},
};

const SPECS_NAMESPACE: &str = "Contoso.Specs";

pub fn names(properties: &[PropertyRc]) -> Vec<String> {
    properties
        .iter()
        .map(|property| property.name.clone())
        .collect()
}

// First fixed argument of an attribute, all fixture attributes take a message
pub fn message_of(attribute: &CustomAttributeValue) -> &str {
    match attribute.fixed_args.first() {
        Some(CustomAttributeArgument::String(message)) => message.as_str(),
        _ => "",
    }
}

fn new_registry() -> Arc<TypeRegistry> {
    Arc::new(TypeRegistry::new().unwrap())
}

/// A class hierarchy covering shadowing, visibility, statics, explicit implementations and
/// default interface properties.
///
/// ```text
/// interface ISingle                { string ExplicitlyImplementedProperty { get; set; } }
/// interface IWithDefault : ISingle { string InterfaceProperty { get; set; }
///                                    string DefaultProperty => "Default"; }
/// class BaseClass                  { public string NewProperty { get; set; } }
/// class SuperClass : BaseClass, IWithDefault { ... }
/// ```
pub struct SuperClassFixture {
    pub registry: Arc<TypeRegistry>,
    pub string: CilTypeRc,
    pub int32: CilTypeRc,
    pub boolean: CilTypeRc,
    pub object: CilTypeRc,
    pub single_property_interface: CilTypeRc,
    pub default_property_interface: CilTypeRc,
    pub base_class: CilTypeRc,
    pub super_class: CilTypeRc,
    pub explicit_and_normal: CilTypeRc,
    pub with_indexer: CilTypeRc,
    pub with_methods: CilTypeRc,
}

pub fn superclass_fixture() -> SuperClassFixture {
    let registry = new_registry();
    let string = registry.get_primitive(CilPrimitiveKind::String).unwrap();
    let int32 = registry.get_primitive(CilPrimitiveKind::I4).unwrap();
    let boolean = registry.get_primitive(CilPrimitiveKind::Boolean).unwrap();
    let object = registry.object().unwrap();

    let single_property_interface = TypeBuilder::new(registry.clone())
        .interface(SPECS_NAMESPACE, "IInterfaceWithSingleProperty")
        .property(
            PropertyBuilder::new()
                .name("ExplicitlyImplementedProperty")
                .property_type(&string),
        )
        .build()
        .unwrap();

    let default_property_interface = TypeBuilder::new(registry.clone())
        .interface(SPECS_NAMESPACE, "IInterfaceWithDefaultProperty")
        .implements(&single_property_interface)
        .property(
            PropertyBuilder::new()
                .name("InterfaceProperty")
                .property_type(&string),
        )
        .property(
            PropertyBuilder::new()
                .name("DefaultProperty")
                .property_type(&string)
                .read_only()
                .with_body(),
        )
        .build()
        .unwrap();

    let base_class = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "BaseClass")
        .property(
            PropertyBuilder::new()
                .name("NewProperty")
                .property_type(&string)
                .public(),
        )
        .build()
        .unwrap();

    let super_class = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "SuperClass")
        .extends(&base_class)
        .implements(&default_property_interface)
        .property(
            PropertyBuilder::new()
                .name("NormalProperty")
                .property_type(&string)
                .public(),
        )
        .property(
            PropertyBuilder::new()
                .name("NewProperty")
                .property_type(&int32)
                .public(),
        )
        .property(
            PropertyBuilder::new()
                .name("StaticProperty")
                .property_type(&boolean)
                .public()
                .static_member(),
        )
        .property(
            PropertyBuilder::new()
                .name("InternalProperty")
                .property_type(&boolean)
                .internal(),
        )
        .property(
            PropertyBuilder::new()
                .name("InternalProtectedProperty")
                .property_type(&boolean)
                .protected_internal(),
        )
        .property(
            PropertyBuilder::new()
                .name("ExplicitlyImplementedProperty")
                .property_type(&string)
                .explicit_for(&single_property_interface),
        )
        .property(
            PropertyBuilder::new()
                .name("InterfaceProperty")
                .property_type(&string)
                .public(),
        )
        .field(FieldBuilder::new().name("NormalField").field_type(&string).public())
        .field(
            FieldBuilder::new()
                .name("InternalField")
                .field_type(&string)
                .internal(),
        )
        .field(
            FieldBuilder::new()
                .name("StaticField")
                .field_type(&boolean)
                .public()
                .static_member(),
        )
        .field(
            FieldBuilder::new()
                .name("ProtectedInternalField")
                .field_type(&string)
                .protected_internal(),
        )
        .build()
        .unwrap();

    let explicit_and_normal = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "ClassWithExplicitAndNormalProperty")
        .implements(&single_property_interface)
        .property(
            PropertyBuilder::new()
                .name("ExplicitlyImplementedProperty")
                .property_type(&string)
                .explicit_for(&single_property_interface),
        )
        .property(
            PropertyBuilder::new()
                .name("ExplicitlyImplementedProperty")
                .property_type(&int32)
                .public(),
        )
        .build()
        .unwrap();

    let with_indexer = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "ClassWithIndexer")
        .property(
            PropertyBuilder::new()
                .name("Foo")
                .property_type(&object)
                .public(),
        )
        .property(
            PropertyBuilder::new()
                .name("Item")
                .property_type(&string)
                .index(&int32)
                .read_only()
                .public(),
        )
        .property(
            PropertyBuilder::new()
                .name("Item")
                .property_type(&string)
                .index(&string)
                .index(&string)
                .read_only()
                .internal(),
        )
        .build()
        .unwrap();

    let with_methods = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "ClassWithMethods")
        .method(MethodBuilder::new().name("Method").public())
        .method(
            MethodBuilder::new()
                .name("MethodWithThreeParameters")
                .public()
                .param(&string)
                .param(&int32)
                .param(&boolean),
        )
        .method(MethodBuilder::new().name("InternalMethod").internal())
        .method(
            MethodBuilder::new()
                .name("StaticMethod")
                .public()
                .static_member(),
        )
        .method(
            MethodBuilder::new()
                .name("ProtectedInternalMethod")
                .access(MemberAccessFlags::FAM_OR_ASSEM),
        )
        .build()
        .unwrap();

    SuperClassFixture {
        registry,
        string,
        int32,
        boolean,
        object,
        single_property_interface,
        default_property_interface,
        base_class,
        super_class,
        explicit_and_normal,
        with_indexer,
        with_methods,
    }
}

/// `Contoso.Base { public string Name }`, `Contoso.ISpeak { string Say }` and
/// `Contoso.Derived : Base, ISpeak { string ISpeak.Say; public string Foo }`
pub struct SpeakFixture {
    pub registry: Arc<TypeRegistry>,
    pub base: CilTypeRc,
    pub speak: CilTypeRc,
    pub derived: CilTypeRc,
}

pub fn speak_fixture() -> SpeakFixture {
    let registry = new_registry();
    let string = registry.get_primitive(CilPrimitiveKind::String).unwrap();

    let base = TypeBuilder::new(registry.clone())
        .class("Contoso", "Base")
        .property(
            PropertyBuilder::new()
                .name("Name")
                .property_type(&string)
                .public(),
        )
        .build()
        .unwrap();

    let speak = TypeBuilder::new(registry.clone())
        .interface("Contoso", "ISpeak")
        .property(
            PropertyBuilder::new()
                .name("Say")
                .property_type(&string)
                .read_only(),
        )
        .build()
        .unwrap();

    let derived = TypeBuilder::new(registry.clone())
        .class("Contoso", "Derived")
        .extends(&base)
        .implements(&speak)
        .property(
            PropertyBuilder::new()
                .name("Foo")
                .property_type(&string)
                .public(),
        )
        .property(
            PropertyBuilder::new()
                .name("Say")
                .property_type(&string)
                .read_only()
                .explicit_for(&speak),
        )
        .build()
        .unwrap();

    SpeakFixture {
        registry,
        base,
        speak,
        derived,
    }
}

/// `Contoso.Money` with `explicit operator int(Money)` and `implicit operator Money(int)`
pub struct ConversionFixture {
    pub registry: Arc<TypeRegistry>,
    pub money: CilTypeRc,
    pub int32: CilTypeRc,
    pub string: CilTypeRc,
}

pub fn conversion_fixture() -> ConversionFixture {
    let registry = new_registry();
    let int32 = registry.get_primitive(CilPrimitiveKind::I4).unwrap();
    let string = registry.get_primitive(CilPrimitiveKind::String).unwrap();

    let money = TypeBuilder::new(registry.clone())
        .value_type("Contoso", "Money")
        .method(MethodBuilder::explicit_operator_to(&int32))
        .method(MethodBuilder::implicit_operator_from(&int32))
        .build()
        .unwrap();

    ConversionFixture {
        registry,
        money,
        int32,
        string,
    }
}

/// Attribute classes and types decorated with them
pub struct AttributeFixture {
    pub registry: Arc<TypeRegistry>,
    pub attribute: CilTypeRc,
    pub inheritable: CilTypeRc,
    pub non_inheritable: CilTypeRc,
    pub obsolete: CilTypeRc,
    pub with_attribute: CilTypeRc,
    pub parameterized: CilTypeRc,
    pub derived: CilTypeRc,
    pub with_non_inheritable: CilTypeRc,
    pub derived_from_non_inheritable: CilTypeRc,
    pub unrelated: CilTypeRc,
}

fn message(attribute_type: &CilTypeRc, message: &str) -> CustomAttributeBuilder {
    CustomAttributeBuilder::new()
        .attribute_type(attribute_type)
        .fixed_arg(CustomAttributeArgument::String(message.to_string()))
}

pub fn attribute_fixture() -> AttributeFixture {
    let registry = new_registry();
    let string = registry.get_primitive(CilPrimitiveKind::String).unwrap();

    let attribute = TypeBuilder::new(registry.clone())
        .class("System", "Attribute")
        .build()
        .unwrap();
    let attribute_class = |name: &str| {
        TypeBuilder::new(registry.clone())
            .class(SPECS_NAMESPACE, name)
            .extends(&attribute)
            .build()
            .unwrap()
    };
    let inheritable = attribute_class("InheritableAttribute");
    let non_inheritable = attribute_class("NonInheritableAttribute");
    let obsolete = attribute_class("ObsoleteAttribute");

    let with_attribute = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "ClassWithAttribute")
        .attribute(message(&inheritable, "SomeMessage"))
        .property(
            PropertyBuilder::new()
                .name("Legacy")
                .property_type(&string)
                .public()
                .attribute(message(&obsolete, "Use Other")),
        )
        .build()
        .unwrap();

    let parameterized = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "ClassWithInheritableAndParameterizedAttribute")
        .attribute(message(&inheritable, "FirstAttribute"))
        .attribute(message(&inheritable, "SecondAttribute"))
        .build()
        .unwrap();

    let derived = TypeBuilder::new(registry.clone())
        .class(
            SPECS_NAMESPACE,
            "ClassDerivedFromOneWithInheritableAndParameterizedAttribute",
        )
        .extends(&parameterized)
        .build()
        .unwrap();

    let with_non_inheritable = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "ClassWithNonInheritableAttribute")
        .attribute(message(&non_inheritable, "SomeMessage").not_inherited())
        .build()
        .unwrap();

    let derived_from_non_inheritable = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "ClassDerivedFromOneWithNonInheritableAttribute")
        .extends(&with_non_inheritable)
        .build()
        .unwrap();

    let unrelated = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "SomeOtherClass")
        .build()
        .unwrap();

    AttributeFixture {
        registry,
        attribute,
        inheritable,
        non_inheritable,
        obsolete,
        with_attribute,
        parameterized,
        derived,
        with_non_inheritable,
        derived_from_non_inheritable,
        unrelated,
    }
}

/// Compiler synthesized types next to hand-written look-alikes.
///
/// ```text
/// record SomeRecord(string SomeProperty);
/// record DerivedRecord(string SomeProperty) : SomeRecord(SomeProperty);
/// record struct SomeStructRecord(string SomeProperty);
/// new { SomeProperty = "SomeValue" }
/// ```
pub struct CompilerGeneratedFixture {
    pub registry: Arc<TypeRegistry>,
    pub compiler_generated: CilTypeRc,
    pub record_class: CilTypeRc,
    pub derived_record: CilTypeRc,
    pub record_struct: CilTypeRc,
    pub anonymous: CilTypeRc,
    pub plain_class: CilTypeRc,
    pub plain_struct: CilTypeRc,
    pub handwritten_record: CilTypeRc,
    pub handwritten_anonymous: CilTypeRc,
}

pub fn compiler_generated_fixture() -> CompilerGeneratedFixture {
    let registry = new_registry();
    let string = registry.get_primitive(CilPrimitiveKind::String).unwrap();
    let boolean = registry.get_primitive(CilPrimitiveKind::Boolean).unwrap();
    let object = registry.object().unwrap();

    let attribute = TypeBuilder::new(registry.clone())
        .class("System", "Attribute")
        .build()
        .unwrap();
    let compiler_generated = TypeBuilder::new(registry.clone())
        .class("System.Runtime.CompilerServices", "CompilerGeneratedAttribute")
        .extends(&attribute)
        .build()
        .unwrap();
    let string_builder = TypeBuilder::new(registry.clone())
        .class("System.Text", "StringBuilder")
        .build()
        .unwrap();

    let generated = || CustomAttributeBuilder::new().attribute_type(&compiler_generated);
    let some_property = || {
        PropertyBuilder::new()
            .name("SomeProperty")
            .property_type(&string)
            .public()
    };
    let equality_contract = |marked: bool| {
        let property = PropertyBuilder::new()
            .name("EqualityContract")
            .property_type(&object)
            .protected()
            .read_only()
            .virtual_member();
        if marked {
            property.attribute(generated())
        } else {
            property
        }
    };
    let clone_method = || {
        MethodBuilder::new()
            .name("<Clone>$")
            .public()
            .virtual_member()
            .returns_declaring_type()
    };

    let record_class = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "SomeRecord")
        .property(some_property())
        .property(equality_contract(true))
        .method(clone_method())
        .build()
        .unwrap();

    let derived_record = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "DerivedRecord")
        .extends(&record_class)
        .build()
        .unwrap();

    let record_struct = TypeBuilder::new(registry.clone())
        .value_type(SPECS_NAMESPACE, "SomeStructRecord")
        .property(some_property())
        .method(
            MethodBuilder::new()
                .name("PrintMembers")
                .private()
                .param(&string_builder)
                .returns(&boolean)
                .attribute(generated()),
        )
        .build()
        .unwrap();

    let anonymous = TypeBuilder::new(registry.clone())
        .class("", "<>f__AnonymousType0")
        .attribute(generated())
        .property(some_property())
        .build()
        .unwrap();

    let plain_class = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "SomeOtherClass")
        .property(some_property())
        .build()
        .unwrap();

    let plain_struct = TypeBuilder::new(registry.clone())
        .value_type(SPECS_NAMESPACE, "SomeStruct")
        .property(some_property())
        .build()
        .unwrap();

    let handwritten_record = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "LooksLikeARecord")
        .property(equality_contract(false))
        .method(clone_method())
        .build()
        .unwrap();

    let handwritten_anonymous = TypeBuilder::new(registry.clone())
        .class(SPECS_NAMESPACE, "MyAnonymousTypeHelper")
        .build()
        .unwrap();

    CompilerGeneratedFixture {
        registry,
        compiler_generated,
        record_class,
        derived_record,
        record_struct,
        anonymous,
        plain_class,
        plain_struct,
        handwritten_record,
        handwritten_anonymous,
    }
}
