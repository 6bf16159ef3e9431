//! Read entities definitions.

pub mod car;
