//! Identity for catalog records (courses, enrollments).

/// A record with a stable, strongly-typed identity.
///
/// Two values with the same id describe the same catalog record even if the
/// rest of their fields were read at different times.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> Self::Id;
}
