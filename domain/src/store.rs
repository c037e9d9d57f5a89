//! Reducer abstraction for client-side state slices.

/// A state slice that changes only through actions.
///
/// `reduce` must be pure: no I/O, no clocks beyond what the action carries.
pub trait Reducer {
    type Action;

    fn reduce(&mut self, action: Self::Action);
}
