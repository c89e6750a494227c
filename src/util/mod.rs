//! Shared utility helpers.

pub mod error;

pub use error::{EndmemberError, EndmemberResult, Stage};
