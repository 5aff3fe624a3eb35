//! Use-case layer: command dispatch over the task list.

pub mod tracker;
