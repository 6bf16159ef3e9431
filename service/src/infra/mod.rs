//! Infrastructure layer.

pub mod backend;

pub use self::backend::{memory, Backend, Memory};
#[cfg(feature = "http")]
pub use self::backend::{http, Http};
