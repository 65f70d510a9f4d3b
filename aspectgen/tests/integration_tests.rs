//! End-to-end tests: descriptors in, generated files and diagnostics out.

use aspectgen::analysis::{MemberPriority, MemberSelector};
use aspectgen::ir::{
    AutoEquals, AutoHashCode, ComparerMarker, ComparerRef, EqualsMarker, MarkerFamily,
    MemberAttributes, MemberSelection, NullSafety, ObjectMethod, TypeAttributes,
};
use aspectgen::resolver::{HashStrategy, Settings, StrategyResolver};
use aspectgen::{GeneratorConfig, MemberDescriptor, Synthesizer, TypeDescriptor, TypeShape};

fn auto_all() -> TypeAttributes {
    TypeAttributes {
        auto_equals: Some(AutoEquals::default()),
        auto_hash_code: Some(AutoHashCode::default()),
        ..Default::default()
    }
}

fn code_of(ty: &TypeDescriptor, generator: &str) -> String {
    Synthesizer::default()
        .synthesize(ty)
        .generated
        .into_iter()
        .find(|g| g.generator == generator)
        .map(|g| g.code)
        .expect("generator output")
}

#[test]
fn test_wrapper_list_uses_deep_combined_hash() {
    let list = TypeShape::collection(
        "System.Collections.Generic.List<int>",
        TypeShape::primitive("int"),
    );
    let ty = TypeDescriptor::new("Wrapper", Some("App"))
        .with_attributes(auto_all())
        .with_member(MemberDescriptor::property("Items", list));

    let settings = Settings::default();
    let selected = MemberSelector::new(
        MarkerFamily::HashCode,
        MemberSelection::Merged,
        MemberPriority::Field,
    )
    .select(&ty.members);
    let plan = StrategyResolver::new(&ty, &settings).hash(&selected[0]);
    assert_eq!(plan.strategy, HashStrategy::DeepCombined);

    let code = code_of(&ty, "GetHashCode");
    assert!(code.contains(
        "(Items == null ? 0 : AspectGen.Runtime.HashCodes.DeepCombinedHashCode(Items))"
    ));

    let code = code_of(&ty, "Equals");
    assert!(code.contains("AspectGen.Runtime.Sequences.DeepSequenceEqual(Items, other.Items)"));
}

#[test]
fn test_backing_field_counted_once() {
    let ty = TypeDescriptor::new("Person", Some("App"))
        .with_attributes(auto_all())
        .with_member(MemberDescriptor::field("_age", TypeShape::primitive("int")))
        .with_member(
            MemberDescriptor::property("Age", TypeShape::primitive("int")).with_getter("_age"),
        );

    let code = code_of(&ty, "Equals");
    assert!(code.contains("&& _age == other._age;"));
    assert!(!code.contains("other.Age"));

    let code = code_of(&ty, "GetHashCode");
    assert!(code.contains("\"App.Person\",\n        _age);"));
}

#[test]
fn test_runtime_namespace_is_configurable() {
    let ty = TypeDescriptor::new("Grid", Some("App"))
        .with_attributes(auto_all())
        .with_member(MemberDescriptor::field(
            "_cells",
            TypeShape::array(TypeShape::primitive("int"), 2),
        ));
    let config = GeneratorConfig::default().with_runtime_namespace("Acme.Support");
    let outcome = Synthesizer::new(config).synthesize(&ty);

    let equals = &outcome.generated[0].code;
    assert!(equals.contains("Acme.Support.Arrays.DeepArrayEqual(_cells, other._cells)"));
    let hash = &outcome.generated[1].code;
    assert!(hash.contains("Acme.Support.HashCodes.DeepCombinedHashCode(_cells)"));
}

#[test]
fn test_comparer_in_containing_type_is_shortened() {
    let ty = TypeDescriptor::new("Order", Some("App"))
        .with_attributes(auto_all())
        .with_member(
            MemberDescriptor::field("_code", TypeShape::primitive("string")).with_attributes(
                MemberAttributes {
                    equality_comparer: Some(ComparerMarker {
                        comparer: ComparerRef::new("App.Order.CodeComparer").accepting_nullable(),
                        null_safety: NullSafety::Auto,
                    }),
                    ..Default::default()
                },
            ),
        );

    let equals = code_of(&ty, "Equals");
    assert!(equals.contains("&& new CodeComparer().Equals(_code, other._code);"));
    let hash = code_of(&ty, "GetHashCode");
    assert!(hash.contains("new CodeComparer().GetHashCode(_code));"));
}

#[test]
fn test_explicit_members_without_type_marker() {
    let mut key = MemberDescriptor::field("_key", TypeShape::primitive("string"));
    key.attributes.equals = Some(EqualsMarker::default());
    let ty = TypeDescriptor::new("Entry", Some("App"))
        .with_member(key)
        .with_member(MemberDescriptor::field("_cache", TypeShape::primitive("int")));

    let outcome = Synthesizer::default().synthesize(&ty);
    assert_eq!(outcome.generated.len(), 1);
    let code = &outcome.generated[0].code;
    assert!(code.contains("&& _key == other._key;"));
    assert!(!code.contains("_cache"));
}

#[test]
fn test_base_chaining_in_both_methods() {
    let mut base = TypeDescriptor::new("Entity", Some("App")).with_attributes(TypeAttributes {
        auto_equals: Some(AutoEquals::default()),
        ..Default::default()
    });
    base.shape = base.shape.with_override(ObjectMethod::GetHashCode);

    let ty = TypeDescriptor::new("User", Some("App"))
        .with_base(base)
        .with_attributes(auto_all())
        .with_member(MemberDescriptor::field("_id", TypeShape::primitive("int")));

    let equals = code_of(&ty, "Equals");
    assert!(equals.contains("&& base.Equals(obj)\n"));
    let hash = code_of(&ty, "GetHashCode");
    assert!(hash.contains("\"App.User\",\n        base.GetHashCode(),\n        _id);"));
}

#[test]
fn test_diagnostics_for_structural_problems() {
    let nested = TypeDescriptor::new("Inner", Some("App"))
        .with_nested(true)
        .with_attributes(auto_all());
    let outcome = Synthesizer::default().synthesize(&nested);
    assert!(outcome.generated.is_empty());
    assert_eq!(
        outcome.diagnostics[0].to_string(),
        "Equals: nested type 'App.Inner' is not supported"
    );

    let sealed = TypeDescriptor::new("Plain", Some("App"))
        .with_partial(false)
        .with_attributes(auto_all());
    let outcome = Synthesizer::default().synthesize(&sealed);
    assert_eq!(outcome.diagnostics.len(), 2);
    assert_eq!(outcome.diagnostics[1].code(), "AG0002");
    assert_eq!(outcome.diagnostics[1].type_name(), "App.Plain");
}

#[test]
fn test_descriptor_from_json() {
    let json = r#"{
        "name": "Point",
        "full_name": "Geo.Point",
        "namespace": "Geo",
        "shape": { "display_name": "Geo.Point", "kind": "struct" },
        "members": [
            { "name": "X", "kind": "field", "type": { "display_name": "double", "kind": "struct" }, "accessibility": "public" },
            { "name": "Y", "kind": "field", "type": { "display_name": "double", "kind": "struct" }, "accessibility": "public" }
        ],
        "attributes": { "auto_equals": {} }
    }"#;
    let ty: TypeDescriptor = serde_json::from_str(json).unwrap();
    let code = code_of(&ty, "Equals");

    assert!(code.contains("public partial struct Point"));
    assert!(code.contains("return obj is Point other\n"));
    assert!(code.contains("&& X == other.X\n"));
}
