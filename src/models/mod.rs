//! Data models for the student directory.
//!
//! These models match the JSON documents exchanged with the directory API.

mod department;
mod student;

pub use department::*;
pub use student::*;
