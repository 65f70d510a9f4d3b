//! Type descriptor definitions.
//!
//! [`TypeShape`] describes any type reference (a member's declared type, a
//! base type) and is what the shape queries operate on. [`TypeDescriptor`]
//! describes the annotated type itself. Ancestors and implemented interfaces
//! arrive pre-flattened, so no query ever walks a type graph.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::attributes::TypeAttributes;
use super::member::MemberDescriptor;

/// Declared accessibility of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
    ProtectedInternal,
    PrivateProtected,
    /// No accessibility declared (e.g. an accessor without its own modifier).
    NotApplicable,
}

impl Accessibility {
    /// C# modifier text.
    pub fn keyword(&self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::Private | Accessibility::NotApplicable => "private",
            Accessibility::ProtectedInternal => "protected internal",
            Accessibility::PrivateProtected => "private protected",
        }
    }

    /// Effective accessibility; an undeclared one counts as private.
    pub fn effective(self) -> Self {
        match self {
            Accessibility::NotApplicable => Accessibility::Private,
            other => other,
        }
    }
}

/// Structural kind of a type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Class,
    Struct,
    Record,
    RecordStruct,
    Enum,
    Interface,
    /// Array with the given number of dimensions.
    Array { rank: u32 },
    Pointer,
    NativeInteger,
    TypeParameter,
}

impl ShapeKind {
    /// Whether values of this kind are references unless stated otherwise.
    pub fn is_reference_by_default(&self) -> bool {
        matches!(
            self,
            ShapeKind::Class | ShapeKind::Record | ShapeKind::Interface | ShapeKind::Array { .. }
        )
    }

    /// Whether this kind is a record (class or struct).
    pub fn is_record(&self) -> bool {
        matches!(self, ShapeKind::Record | ShapeKind::RecordStruct)
    }
}

/// Object methods a type can redefine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectMethod {
    Equals,
    GetHashCode,
    ToString,
}

/// Shape of a type reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeShape {
    /// Display name, with a trailing `?` when nullable-annotated
    pub display_name: String,

    /// Structural kind
    #[serde(default)]
    pub kind: ShapeKind,

    /// Whether the type has reference semantics
    #[serde(default)]
    pub is_reference_type: bool,

    /// Whether the reference carries a nullable annotation
    #[serde(default)]
    pub nullable: bool,

    /// Display names of all ancestors and implemented interfaces
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub capabilities: BTreeSet<String>,

    /// Object methods redefined by this type or one of its ancestors
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub overrides: BTreeSet<ObjectMethod>,

    /// Element type for sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<Box<TypeShape>>,
}

impl TypeShape {
    /// Create a shape of the given kind; reference semantics follow the kind.
    pub fn new(display_name: impl Into<String>, kind: ShapeKind) -> Self {
        Self {
            display_name: display_name.into(),
            kind,
            is_reference_type: kind.is_reference_by_default(),
            nullable: false,
            capabilities: BTreeSet::new(),
            overrides: BTreeSet::new(),
            element_type: None,
        }
    }

    pub fn class(display_name: impl Into<String>) -> Self {
        Self::new(display_name, ShapeKind::Class)
    }

    pub fn structure(display_name: impl Into<String>) -> Self {
        Self::new(display_name, ShapeKind::Struct)
    }

    pub fn record(display_name: impl Into<String>) -> Self {
        Self::new(display_name, ShapeKind::Record)
    }

    pub fn enumeration(display_name: impl Into<String>) -> Self {
        Self::new(display_name, ShapeKind::Enum)
    }

    /// Create a built-in type from its keyword (`int`, `string`, `object`, ...).
    pub fn primitive(keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        match keyword.as_str() {
            "string" => Self::class(keyword)
                .with_capability("System.Collections.IEnumerable")
                .with_capability("System.Collections.Generic.IEnumerable<char>")
                .with_override(ObjectMethod::Equals)
                .with_override(ObjectMethod::GetHashCode)
                .with_override(ObjectMethod::ToString),
            "object" => Self::class(keyword),
            "nint" | "nuint" => Self::new(keyword, ShapeKind::NativeInteger)
                .with_override(ObjectMethod::Equals)
                .with_override(ObjectMethod::GetHashCode)
                .with_override(ObjectMethod::ToString),
            _ => Self::structure(keyword)
                .with_override(ObjectMethod::Equals)
                .with_override(ObjectMethod::GetHashCode)
                .with_override(ObjectMethod::ToString),
        }
    }

    /// Create an array of `element` with the given rank.
    pub fn array(element: TypeShape, rank: u32) -> Self {
        let rank = rank.max(1);
        let commas = ",".repeat(rank as usize - 1);
        let display_name = format!("{}[{}]", element.display_name, commas);

        let mut shape = Self::new(display_name, ShapeKind::Array { rank })
            .with_capability("System.Array")
            .with_capability("System.Collections.IEnumerable")
            .with_capability("System.Collections.IStructuralEquatable");
        if rank == 1 {
            shape = shape.with_capability(format!(
                "System.Collections.Generic.IEnumerable<{}>",
                element.display_name
            ));
        }
        shape.with_element(element)
    }

    /// Create a generic collection class over `element`.
    pub fn collection(display_name: impl Into<String>, element: TypeShape) -> Self {
        Self::class(display_name)
            .with_capability("System.Collections.IEnumerable")
            .with_capability(format!(
                "System.Collections.Generic.IEnumerable<{}>",
                element.display_name
            ))
            .with_element(element)
    }

    /// Add an ancestor or implemented interface.
    pub fn with_capability(mut self, name: impl Into<String>) -> Self {
        self.capabilities.insert(name.into());
        self
    }

    /// Mark an object method as redefined.
    pub fn with_override(mut self, method: ObjectMethod) -> Self {
        self.overrides.insert(method);
        self
    }

    /// Set the element type.
    pub fn with_element(mut self, element: TypeShape) -> Self {
        self.element_type = Some(Box::new(element));
        self
    }

    /// Force reference semantics on or off.
    pub fn with_reference_semantics(mut self, is_reference: bool) -> Self {
        self.is_reference_type = is_reference;
        self
    }

    /// Annotate the reference as nullable.
    #[allow(clippy::wrong_self_convention)]
    pub fn as_nullable(mut self) -> Self {
        if !self.nullable {
            self.nullable = true;
            self.display_name.push('?');
        }
        self
    }

    /// Display name without the trailing nullability marker.
    pub fn base_name(&self) -> &str {
        self.display_name
            .strip_suffix('?')
            .unwrap_or(&self.display_name)
    }
}

/// A parameter of a declared method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Display name of the parameter type
    #[serde(rename = "type")]
    pub type_name: String,

    /// Whether the parameter declares a default value
    #[serde(default)]
    pub has_default: bool,
}

impl Parameter {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            has_default: false,
        }
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// Signature of a method declared on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,

    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Descriptor of an annotated type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Simple name including type parameters (e.g. `Box<T>`)
    pub name: String,

    /// Fully qualified name (e.g. `Shapes.Box<T>`)
    pub full_name: String,

    /// Containing namespace; `None` for the global namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Declared accessibility
    #[serde(default)]
    pub accessibility: Accessibility,

    /// Shape of the type itself
    pub shape: TypeShape,

    /// Whether the type compiles under a nullable-aware context
    #[serde(default)]
    pub nullable_context: bool,

    /// Whether the declaration carries the `partial` modifier
    #[serde(default = "default_true")]
    pub is_partial: bool,

    /// Whether the type is declared inside another type
    #[serde(default)]
    pub is_nested: bool,

    /// Declaration head as written in source, if the host provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration: Option<String>,

    /// Immediate base type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<Box<TypeDescriptor>>,

    /// Declared fields and properties, in declaration order
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,

    /// Declared methods
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodSignature>,

    /// Declared event names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,

    /// Type-level configuration markers
    #[serde(default)]
    pub attributes: TypeAttributes,
}

impl TypeDescriptor {
    /// Create a class descriptor in the given namespace.
    pub fn new(name: impl Into<String>, namespace: Option<&str>) -> Self {
        let name = name.into();
        let full_name = match namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, name),
            _ => name.clone(),
        };
        Self {
            shape: TypeShape::class(full_name.clone()),
            name,
            full_name,
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            accessibility: Accessibility::Public,
            nullable_context: false,
            is_partial: true,
            is_nested: false,
            declaration: None,
            base: None,
            members: Vec::new(),
            methods: Vec::new(),
            events: Vec::new(),
            attributes: TypeAttributes::default(),
        }
    }

    /// Change the structural kind of the type, keeping its name.
    pub fn with_kind(mut self, kind: ShapeKind) -> Self {
        self.shape = TypeShape {
            kind,
            is_reference_type: kind.is_reference_by_default(),
            ..self.shape
        };
        self
    }

    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_base(mut self, base: TypeDescriptor) -> Self {
        self.shape.capabilities.insert(base.full_name.clone());
        self.shape
            .capabilities
            .extend(base.shape.capabilities.iter().cloned());
        self.base = Some(Box::new(base));
        self
    }

    pub fn with_method(mut self, method: MethodSignature) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_event(mut self, name: impl Into<String>) -> Self {
        self.events.push(name.into());
        self
    }

    pub fn with_attributes(mut self, attributes: TypeAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_nullable_context(mut self, enabled: bool) -> Self {
        self.nullable_context = enabled;
        self
    }

    pub fn with_partial(mut self, is_partial: bool) -> Self {
        self.is_partial = is_partial;
        self
    }

    pub fn with_nested(mut self, is_nested: bool) -> Self {
        self.is_nested = is_nested;
        self
    }

    /// Whether instances of this type are references.
    pub fn is_reference_type(&self) -> bool {
        self.shape.is_reference_type
    }

    /// Base chain, nearest ancestor first.
    pub fn ancestors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        std::iter::successors(self.base.as_deref(), |ty| ty.base.as_deref())
    }

    /// Names of every declared member, method and event.
    pub fn member_names(&self) -> BTreeSet<&str> {
        self.members
            .iter()
            .map(|m| m.name.as_str())
            .chain(self.methods.iter().map(|m| m.name.as_str()))
            .chain(self.events.iter().map(String::as_str))
            .collect()
    }

    /// Declared member by name.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Type keyword used in the declaration head.
    pub fn type_keyword(&self) -> &'static str {
        match self.shape.kind {
            ShapeKind::Struct => "struct",
            ShapeKind::Record => "record",
            ShapeKind::RecordStruct => "record struct",
            ShapeKind::Interface => "interface",
            _ => "class",
        }
    }

    /// Declaration head of the partial type, e.g. `public partial class Point`.
    pub fn declaration_text(&self) -> String {
        match &self.declaration {
            Some(declaration) => declaration.clone(),
            None => format!(
                "{} partial {} {}",
                self.accessibility.keyword(),
                self.type_keyword(),
                self.name
            ),
        }
    }
}
