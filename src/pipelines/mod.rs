//! Render pipeline construction.
//!
//! - `basic` builds the model pipeline and holds the shared pipeline helper
//! - `material` owns the flat colour uniform

pub mod basic;
pub mod material;
