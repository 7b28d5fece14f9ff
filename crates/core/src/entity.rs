//! Identity-bearing domain objects.

/// Something with a stable identity.
///
/// A catalog item keeps its id when its price or name is edited, and two rows
/// with identical attributes are still different products if their ids differ.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// `true` when both refer to the same entity, whatever their attributes.
    fn is_same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
