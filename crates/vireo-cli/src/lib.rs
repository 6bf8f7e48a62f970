//! Library half of the `vireo` CLI.
//!
//! The binary (`src/main.rs`) only parses arguments and prints; loading hierarchy models and
//! running override checks over them lives here so integration tests can drive it directly.

pub mod model;
mod report;

pub use crate::model::{Model, ModelClass, ModelError};
pub use crate::report::{check_model, CheckReport, CheckSummary, MemberKind, MemberRef, OverrideMatch};
