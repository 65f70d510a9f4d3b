//! Structural analysis of descriptors.
//!
//! Everything here is a pure function of the descriptor: shape predicates,
//! getter recognition and member selection.

pub mod backing;
pub mod selector;
pub mod shape;

pub use backing::backing_field;
pub use selector::{MemberPriority, MemberSelector, SelectedMember};
pub use shape::{Primitive, TypeShapeQuery};
