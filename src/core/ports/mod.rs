//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundary between the evaluation logic and the
//! machine being inspected. Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The engine depends only on these traits, never on concrete accessors.
//! Tests drive it with in-memory fixtures instead of a live system.

mod target;

pub use target::TargetAccessor;
