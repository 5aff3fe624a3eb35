//! Task domain model.
//!
//! # Responsibility
//! - Define the date/time value, the three task variants, and the ordered
//!   task collection that the dispatcher operates on.
//!
//! # Invariants
//! - A task is never constructed in a partially-valid state.
//! - The task list is densely packed and zero-indexed; removal shifts later
//!   elements down with no gaps.

pub mod date_time;
pub mod task;
pub mod task_list;
