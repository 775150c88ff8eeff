//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values; two
/// with the same values are the same value. `Money { amount: 100 }` is a
/// value object, a claim case with an id is not.
///
/// To "modify" a value object, create a new one. This keeps values safe to
/// copy into events and share across threads.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
