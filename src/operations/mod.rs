//! Curve operations, grouped by concern. Each operation is a struct built
//! with `new` (plus optional builder-style overrides) and run with
//! `execute`.

pub mod blend;
pub mod convert;
pub mod modification;
pub mod offset;
pub mod query;
pub mod resample;
