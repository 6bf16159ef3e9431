//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{search::SubmitError, BackendError};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            Eq,
            PartialEq,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }

        impl $crate::AsError for $name {
            fn try_as_error(&self) -> Option<$crate::Error> {
                Some((*self).into())
            }
        }
    };
}

/// Notification about a failure shown to the user.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] notifying about an unexpected failure, with
    /// no details exposed to the user.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            code: "GENERIC_ERROR",
            message: "An error occurred, please try again".to_owned(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type has no dedicated [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`], falling back to
    /// [`Error::generic()`].
    fn as_error(&self) -> Error {
        self.try_as_error().unwrap_or_else(Error::generic)
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }

    fn as_error(&self) -> Error {
        let mut error = self.as_ref().as_error();
        error.backtrace = Some(self.trace().clone());
        error
    }
}

impl AsError for BackendError {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for SubmitError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: match self {
                Self::NoLocation => "NO_PICKUP_LOCATION",
                Self::NoStart => "NO_START_DATE",
                Self::TooEarly => "START_DATE_TOO_EARLY",
            },
            message: self.to_string(),
            backtrace: None,
        })
    }
}
