//! [`Backend`]-related implementations.

#[cfg(feature = "http")]
pub mod http;
pub mod memory;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "http")]
pub use self::http::Http;
pub use self::memory::Memory;

/// Operation of the remote car service.
pub use common::Handler as Backend;

/// [`Backend`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "http")]
    /// [`Http`] error.
    Http(http::Error),

    /// [`Memory`] error.
    Memory(memory::Error),
}
