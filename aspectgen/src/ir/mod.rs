//! Descriptor IR.
//!
//! This module defines the host-agnostic data structures describing an
//! annotated type: its shape, its members and the configuration markers
//! attached to both. Descriptors are produced by the host compiler (or
//! loaded from JSON) and are read-only for the rest of the pipeline.

pub mod attributes;
pub mod member;
pub mod types;

pub use attributes::{
    AutoEquals, AutoHashCode, AutoToString, BaseCallPolicy, ComparerMarker, ComparerRef,
    EqualsMarker, HashCodeMarker, MarkerFamily, MemberAttributes, MemberSelection, NotifyMarker,
    NullSafety, ToStringMarker, TypeAttributes,
};
pub use member::{MemberDescriptor, MemberKind, PropertyAccessors};
pub use types::{
    Accessibility, MethodSignature, ObjectMethod, Parameter, ShapeKind, TypeDescriptor, TypeShape,
};
