//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity of their own: two instances holding the same
/// attributes are the same value. Validation happens at construction, so a held
/// value is always well-formed.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
