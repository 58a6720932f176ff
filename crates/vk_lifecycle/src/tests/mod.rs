//! Crate-level test support and end-to-end lifecycle scenarios
