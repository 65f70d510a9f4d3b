//! Structural predicates over type shapes.
//!
//! Every predicate matches display names exactly, except for the generic
//! enumerable check which matches the `IEnumerable<` prefix so that any
//! element type qualifies.

use crate::ir::{ObjectMethod, ShapeKind, TypeShape};

/// Non-generic enumerable interface.
pub const ENUMERABLE: &str = "System.Collections.IEnumerable";

/// Prefix of every constructed generic enumerable interface.
pub const GENERIC_ENUMERABLE_PREFIX: &str = "System.Collections.Generic.IEnumerable<";

/// Interface of types whose elements compare structurally out of the box.
pub const STRUCTURAL_EQUATABLE: &str = "System.Collections.IStructuralEquatable";

/// Built-in types recognized by keyword and by `System.*` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    Char,
    String,
    Object,
}

impl Primitive {
    /// Value primitives, compared with `==` by default.
    pub const VALUE_TYPES: [Primitive; 13] = [
        Primitive::Boolean,
        Primitive::SByte,
        Primitive::Byte,
        Primitive::Int16,
        Primitive::UInt16,
        Primitive::Int32,
        Primitive::UInt32,
        Primitive::Int64,
        Primitive::UInt64,
        Primitive::Single,
        Primitive::Double,
        Primitive::Decimal,
        Primitive::Char,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::Boolean => "bool",
            Primitive::SByte => "sbyte",
            Primitive::Byte => "byte",
            Primitive::Int16 => "short",
            Primitive::UInt16 => "ushort",
            Primitive::Int32 => "int",
            Primitive::UInt32 => "uint",
            Primitive::Int64 => "long",
            Primitive::UInt64 => "ulong",
            Primitive::Single => "float",
            Primitive::Double => "double",
            Primitive::Decimal => "decimal",
            Primitive::Char => "char",
            Primitive::String => "string",
            Primitive::Object => "object",
        }
    }

    pub fn system_name(&self) -> &'static str {
        match self {
            Primitive::Boolean => "System.Boolean",
            Primitive::SByte => "System.SByte",
            Primitive::Byte => "System.Byte",
            Primitive::Int16 => "System.Int16",
            Primitive::UInt16 => "System.UInt16",
            Primitive::Int32 => "System.Int32",
            Primitive::UInt32 => "System.UInt32",
            Primitive::Int64 => "System.Int64",
            Primitive::UInt64 => "System.UInt64",
            Primitive::Single => "System.Single",
            Primitive::Double => "System.Double",
            Primitive::Decimal => "System.Decimal",
            Primitive::Char => "System.Char",
            Primitive::String => "System.String",
            Primitive::Object => "System.Object",
        }
    }
}

fn strip_nullable(name: &str) -> &str {
    name.strip_suffix('?').unwrap_or(name)
}

/// Queries answered from a [`TypeShape`] alone.
pub trait TypeShapeQuery {
    /// Display name equals `name`, or `name?` when `allow_nullable`.
    fn is_type(&self, name: &str, allow_nullable: bool) -> bool;

    /// Whether the shape is the given built-in type.
    fn is_primitive_type(&self, primitive: Primitive, allow_nullable: bool) -> bool;

    /// Value primitives, native integers and pointers.
    fn is_primitive(&self, allow_nullable: bool) -> bool;

    fn is_enumerable(&self) -> bool;

    fn is_generic_enumerable(&self) -> bool;

    /// Records, enums, strings and primitives compare correctly with `==`.
    fn can_use_equality_operators_by_default(&self) -> bool;

    fn overrides(&self, method: ObjectMethod) -> bool;

    fn has_nullable_annotation(&self) -> bool;

    /// The type itself, an ancestor or an interface matches `name`.
    fn implements(&self, name: &str) -> bool;

    fn is_multi_dimensional_array(&self) -> bool;

    /// Ordered sequence whose elements compare by value without help.
    fn has_native_sequence_equality(&self) -> bool;

    fn is_string(&self, allow_nullable: bool) -> bool {
        self.is_primitive_type(Primitive::String, allow_nullable)
    }

    fn is_object(&self, allow_nullable: bool) -> bool {
        self.is_primitive_type(Primitive::Object, allow_nullable)
    }

    fn overrides_equals(&self) -> bool {
        self.overrides(ObjectMethod::Equals)
    }

    fn overrides_get_hash_code(&self) -> bool {
        self.overrides(ObjectMethod::GetHashCode)
    }

    fn overrides_to_string(&self) -> bool {
        self.overrides(ObjectMethod::ToString)
    }
}

impl TypeShapeQuery for TypeShape {
    fn is_type(&self, name: &str, allow_nullable: bool) -> bool {
        let display = self.display_name.as_str();
        display == name
            || allow_nullable && display.strip_suffix('?').is_some_and(|base| base == name)
    }

    fn is_primitive_type(&self, primitive: Primitive, allow_nullable: bool) -> bool {
        self.is_type(primitive.keyword(), allow_nullable)
            || self.is_type(primitive.system_name(), allow_nullable)
    }

    fn is_primitive(&self, allow_nullable: bool) -> bool {
        Primitive::VALUE_TYPES
            .iter()
            .any(|p| self.is_primitive_type(*p, allow_nullable))
            || matches!(self.kind, ShapeKind::NativeInteger | ShapeKind::Pointer)
                && (!self.has_nullable_annotation() || allow_nullable)
    }

    fn is_enumerable(&self) -> bool {
        self.base_name() == ENUMERABLE
            || self
                .capabilities
                .iter()
                .any(|c| strip_nullable(c) == ENUMERABLE)
    }

    fn is_generic_enumerable(&self) -> bool {
        self.display_name.starts_with(GENERIC_ENUMERABLE_PREFIX)
            || self
                .capabilities
                .iter()
                .any(|c| c.starts_with(GENERIC_ENUMERABLE_PREFIX))
    }

    fn can_use_equality_operators_by_default(&self) -> bool {
        self.kind.is_record()
            || self.kind == ShapeKind::Enum
            || self.is_string(true)
            || self.is_primitive(true)
    }

    fn overrides(&self, method: ObjectMethod) -> bool {
        self.overrides.contains(&method)
    }

    fn has_nullable_annotation(&self) -> bool {
        self.nullable
    }

    fn implements(&self, name: &str) -> bool {
        let name = strip_nullable(name);
        self.base_name() == name || self.capabilities.iter().any(|c| strip_nullable(c) == name)
    }

    fn is_multi_dimensional_array(&self) -> bool {
        matches!(self.kind, ShapeKind::Array { rank } if rank > 1)
    }

    fn has_native_sequence_equality(&self) -> bool {
        let single_dimension = matches!(self.kind, ShapeKind::Array { rank } if rank <= 1);
        let flat_elements = self
            .element_type
            .as_deref()
            .map_or(true, |e| !e.is_enumerable() || e.overrides_equals());

        single_dimension
            && self.is_generic_enumerable()
            && self.implements(STRUCTURAL_EQUATABLE)
            && flat_elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> TypeShape {
        TypeShape::primitive("int")
    }

    #[test]
    fn test_primitive_spellings() {
        assert!(int().is_primitive(false));
        assert!(TypeShape::structure("System.Int32").is_primitive(false));
        assert!(!int().as_nullable().is_primitive(false));
        assert!(int().as_nullable().is_primitive(true));
        assert!(!TypeShape::primitive("string").is_primitive(true));
        assert!(TypeShape::primitive("string").is_string(false));
        assert!(TypeShape::class("System.String").as_nullable().is_string(true));
    }

    #[test]
    fn test_native_integers_and_pointers() {
        assert!(TypeShape::primitive("nint").is_primitive(false));
        assert!(!TypeShape::primitive("nint").as_nullable().is_primitive(false));
        assert!(TypeShape::new("byte*", ShapeKind::Pointer).is_primitive(false));
    }

    #[test]
    fn test_enumerable_checks() {
        let list = TypeShape::collection("System.Collections.Generic.List<int>", int());
        assert!(list.is_enumerable());
        assert!(list.is_generic_enumerable());
        assert!(!list.has_native_sequence_equality());

        let bare = TypeShape::class("System.Collections.IEnumerable?");
        assert!(bare.is_enumerable());
        assert!(!bare.is_generic_enumerable());

        assert!(!int().is_enumerable());
    }

    #[test]
    fn test_native_sequence_equality() {
        assert!(TypeShape::array(int(), 1).has_native_sequence_equality());
        assert!(TypeShape::array(TypeShape::primitive("string"), 1).has_native_sequence_equality());
        assert!(!TypeShape::array(int(), 2).has_native_sequence_equality());

        let jagged = TypeShape::array(TypeShape::array(int(), 1), 1);
        assert!(!jagged.has_native_sequence_equality());
    }

    #[test]
    fn test_equality_operators_by_default() {
        assert!(int().can_use_equality_operators_by_default());
        assert!(int().as_nullable().can_use_equality_operators_by_default());
        assert!(TypeShape::primitive("string").can_use_equality_operators_by_default());
        assert!(TypeShape::record("App.Money").can_use_equality_operators_by_default());
        assert!(TypeShape::enumeration("App.Color").can_use_equality_operators_by_default());
        assert!(!TypeShape::class("App.Customer").can_use_equality_operators_by_default());
        assert!(!TypeShape::primitive("object").can_use_equality_operators_by_default());
    }

    #[test]
    fn test_implements_strips_nullability() {
        let shape = TypeShape::class("App.Model?")
            .with_capability("System.ComponentModel.INotifyPropertyChanged");
        assert!(shape.implements("App.Model"));
        assert!(shape.implements("System.ComponentModel.INotifyPropertyChanged?"));
        assert!(!shape.implements("System.ComponentModel.INotifyPropertyChanging"));
    }

    #[test]
    fn test_overrides() {
        let shape = TypeShape::class("App.Money").with_override(ObjectMethod::Equals);
        assert!(shape.overrides_equals());
        assert!(!shape.overrides_get_hash_code());
        assert!(!shape.overrides_to_string());
    }
}
