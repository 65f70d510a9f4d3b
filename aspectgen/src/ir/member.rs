//! Member descriptor definitions.

use serde::{Deserialize, Serialize};

use super::attributes::MemberAttributes;
use super::types::{Accessibility, TypeShape};

/// Accessor information of a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAccessors {
    /// Whether the property can be read
    #[serde(default = "default_true")]
    pub has_getter: bool,

    /// Whether the property can be written
    #[serde(default)]
    pub has_setter: bool,

    /// Accessibility of the getter, if it declares its own modifier
    #[serde(default = "not_applicable")]
    pub getter_accessibility: Accessibility,

    /// Getter source text (expression body or block), if available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getter: Option<String>,
}

fn default_true() -> bool {
    true
}

fn not_applicable() -> Accessibility {
    Accessibility::NotApplicable
}

impl Default for PropertyAccessors {
    fn default() -> Self {
        Self {
            has_getter: true,
            has_setter: false,
            getter_accessibility: Accessibility::NotApplicable,
            getter: None,
        }
    }
}

/// Kind of a data member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Property(PropertyAccessors),
}

/// Descriptor of a field or property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,

    pub kind: MemberKind,

    /// Declared type
    #[serde(rename = "type")]
    pub ty: TypeShape,

    #[serde(default = "private")]
    pub accessibility: Accessibility,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub attributes: MemberAttributes,
}

fn private() -> Accessibility {
    Accessibility::Private
}

impl MemberDescriptor {
    /// Create a private instance field.
    pub fn field(name: impl Into<String>, ty: TypeShape) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            ty,
            accessibility: Accessibility::Private,
            is_static: false,
            attributes: MemberAttributes::default(),
        }
    }

    /// Create a public auto-property with a getter.
    pub fn property(name: impl Into<String>, ty: TypeShape) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property(PropertyAccessors::default()),
            ty,
            accessibility: Accessibility::Public,
            is_static: false,
            attributes: MemberAttributes::default(),
        }
    }

    /// Set the getter body of a property; no-op on fields.
    pub fn with_getter(mut self, body: impl Into<String>) -> Self {
        if let MemberKind::Property(accessors) = &mut self.kind {
            accessors.getter = Some(body.into());
        }
        self
    }

    /// Remove the getter of a property; no-op on fields.
    pub fn write_only(mut self) -> Self {
        if let MemberKind::Property(accessors) = &mut self.kind {
            accessors.has_getter = false;
            accessors.has_setter = true;
        }
        self
    }

    /// Set the getter accessibility of a property; no-op on fields.
    pub fn with_getter_accessibility(mut self, accessibility: Accessibility) -> Self {
        if let MemberKind::Property(accessors) = &mut self.kind {
            accessors.getter_accessibility = accessibility;
        }
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_attributes(mut self, attributes: MemberAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field)
    }

    pub fn is_property(&self) -> bool {
        matches!(self.kind, MemberKind::Property(_))
    }

    /// Whether the member can be read: every field, properties with a getter.
    pub fn is_readable(&self) -> bool {
        match &self.kind {
            MemberKind::Field => true,
            MemberKind::Property(accessors) => accessors.has_getter,
        }
    }

    /// Getter source text of a property.
    pub fn getter_body(&self) -> Option<&str> {
        match &self.kind {
            MemberKind::Property(accessors) => accessors.getter.as_deref(),
            MemberKind::Field => None,
        }
    }

    /// Accessibility a reader of the member sees.
    ///
    /// For properties the getter's own modifier wins over the declared one.
    /// A field that generates a notifying property is read through that
    /// public property.
    pub fn read_accessibility(&self) -> Accessibility {
        let accessibility = match &self.kind {
            MemberKind::Property(accessors) => match accessors.getter_accessibility {
                Accessibility::NotApplicable => self.accessibility,
                getter => getter,
            },
            MemberKind::Field if self.attributes.generates_property() => Accessibility::Public,
            MemberKind::Field => self.accessibility,
        };
        accessibility.effective()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::attributes::NotifyMarker;

    #[test]
    fn test_read_accessibility() {
        let prop = MemberDescriptor::property("Name", TypeShape::primitive("string"))
            .with_getter_accessibility(Accessibility::Protected);
        assert_eq!(prop.read_accessibility(), Accessibility::Protected);

        let field = MemberDescriptor::field("_name", TypeShape::primitive("string"));
        assert_eq!(field.read_accessibility(), Accessibility::Private);

        let notifying = MemberDescriptor::field("_name", TypeShape::primitive("string"))
            .with_attributes(MemberAttributes {
                notify_changed: Some(NotifyMarker::default()),
                ..Default::default()
            });
        assert_eq!(notifying.read_accessibility(), Accessibility::Public);
    }

    #[test]
    fn test_member_json() {
        let json = r#"{
            "name": "Age",
            "kind": { "property": { "getter": "_age" } },
            "type": { "display_name": "int", "kind": "struct" },
            "accessibility": "public"
        }"#;
        let member: MemberDescriptor = serde_json::from_str(json).unwrap();
        assert!(member.is_property());
        assert!(member.is_readable());
        assert_eq!(member.getter_body(), Some("_age"));
        assert_eq!(member.read_accessibility(), Accessibility::Public);
    }

    #[test]
    fn test_write_only_property() {
        let prop = MemberDescriptor::property("Secret", TypeShape::primitive("string")).write_only();
        assert!(!prop.is_readable());
    }
}
