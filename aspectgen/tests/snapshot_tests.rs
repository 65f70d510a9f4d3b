//! Snapshot tests for generated files.
//!
//! These tests use insta inline snapshots to pin the exact text of
//! representative generated files.
//! Run `cargo insta review` to review and accept snapshot changes.

use aspectgen::ir::{
    Accessibility, AutoEquals, AutoHashCode, AutoToString, MemberAttributes, NotifyMarker,
    TypeAttributes,
};
use aspectgen::{GeneratorConfig, MemberDescriptor, Synthesizer, TypeDescriptor, TypeShape};

fn point() -> TypeDescriptor {
    let public_int = |name: &str| {
        MemberDescriptor::field(name, TypeShape::primitive("int"))
            .with_accessibility(Accessibility::Public)
    };
    TypeDescriptor::new("Point", Some("App"))
        .with_attributes(TypeAttributes {
            auto_equals: Some(AutoEquals::default()),
            auto_hash_code: Some(AutoHashCode::default()),
            auto_to_string: Some(AutoToString::default()),
        })
        .with_member(public_int("X"))
        .with_member(public_int("Y"))
}

fn file(ty: &TypeDescriptor, generator: &str) -> String {
    let outcome = Synthesizer::new(GeneratorConfig::default()).synthesize(ty);
    outcome
        .generated
        .into_iter()
        .find(|g| g.generator == generator)
        .map(|g| g.code)
        .unwrap_or_else(|| panic!("no {} output for {}", generator, ty.full_name))
}

// =============================================================================
// Object method overrides
// =============================================================================

#[test]
fn snapshot_point_equals() {
    insta::assert_snapshot!(file(&point(), "Equals"), @r#"
    // <auto-generated/>

    namespace App
    {
      public partial class Point
      {
        public override bool Equals(object obj)
        {
          return obj == this || obj is Point other
              && X == other.X
              && Y == other.Y;
        }
      }
    }
    "#);
}

#[test]
fn snapshot_point_get_hash_code() {
    insta::assert_snapshot!(file(&point(), "GetHashCode"), @r#"
    // <auto-generated/>

    namespace App
    {
      public partial class Point
      {
        public override int GetHashCode()
        {
          return System.HashCode.Combine(
            "App.Point",
            X,
            Y);
        }
      }
    }
    "#);
}

#[test]
fn snapshot_point_to_string() {
    insta::assert_snapshot!(file(&point(), "ToString"), @r#"
    // <auto-generated/>

    namespace App
    {
      public partial class Point
      {
        public override string ToString()
        {
          return $"(Point){{X: {X}, Y: {Y}}}";
        }
      }
    }
    "#);
}

// =============================================================================
// Notifying properties
// =============================================================================

#[test]
fn snapshot_notify_before_and_guarded_after() {
    let ty = TypeDescriptor::new("Person", Some("App")).with_member(
        MemberDescriptor::field("_name", TypeShape::primitive("string")).with_attributes(
            MemberAttributes {
                notify_changing: Some(NotifyMarker::default()),
                notify_changed: Some(NotifyMarker::checked()),
                ..Default::default()
            },
        ),
    );

    insta::assert_snapshot!(file(&ty, "PropertyEvent"), @r#"
    // <auto-generated/>
    using System.ComponentModel;

    namespace App
    {
      public partial class Person : INotifyPropertyChanging, INotifyPropertyChanged
      {
        public event PropertyChangingEventHandler PropertyChanging;

        public event PropertyChangedEventHandler PropertyChanged;

        public string Name
        {
          get => _name;
          set
          {
            RaisePropertyChanging("Name");
            var temp = _name;
            _name = value;
            if (temp != value)
            {
              RaisePropertyChanged("Name");
            }
          }
        }

        protected virtual void RaisePropertyChanging(string propertyName)
        {
          PropertyChanging?.Invoke(this, new PropertyChangingEventArgs(propertyName));
        }

        protected virtual void RaisePropertyChanged(string propertyName)
        {
          PropertyChanged?.Invoke(this, new PropertyChangedEventArgs(propertyName));
        }
      }
    }
    "#);
}

#[test]
fn snapshot_global_namespace_with_tabs() {
    let ty = TypeDescriptor::new("Money", None)
        .with_kind(aspectgen::ir::ShapeKind::Struct)
        .with_attributes(TypeAttributes {
            auto_hash_code: Some(AutoHashCode {
                cache_result: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        })
        .with_member(MemberDescriptor::field("_amount", TypeShape::primitive("decimal")));
    let config = GeneratorConfig::default().with_indent(aspectgen::IndentStyle::Tabs);
    let code = Synthesizer::new(config).synthesize(&ty).generated[0].code.clone();

    assert_eq!(
        code,
        "// <auto-generated/>\n\
         \n\
         public partial struct Money\n\
         {\n\
         \tprivate int? _storedHashCode;\n\
         \n\
         \tpublic override int GetHashCode()\n\
         \t{\n\
         \t\t_storedHashCode ??= System.HashCode.Combine(\n\
         \t\t\t\"Money\",\n\
         \t\t\t_amount);\n\
         \t\treturn _storedHashCode.Value;\n\
         \t}\n\
         }\n"
    );
}
