//! Mutable month/quarter selection with its invariants.

pub mod error;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::SelectionError;
pub use state::{Selection, SelectionStateMachine};
