//! Capability-based access control for console operations.
//!
//! Core principle: **an operation declares the full capability set it
//! requires, and the user must hold all of it.**
//!
//! The evaluator is a pure predicate over immutable inputs. Denial is a
//! value, never an error — it runs on the render path, where an exception
//! would be disruptive and an unauthenticated session is an ordinary state.

mod capability;
mod gate;
mod session;

pub use capability::{Capability, CapabilitySet};
pub use gate::{Gate, evaluate};
pub use session::Session;
