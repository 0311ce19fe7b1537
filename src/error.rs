//! Errors that can appear when talking to libnetcdf

use std::fmt;

use netcdf_sys::{nc_strerror, nc_type, NC_NOERR};

/// Various error types that can occur in this crate
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Errors from the wrapped netcdf library
    Netcdf(nc_type),
    /// Misc errors
    Str(String),
    /// A name or path contained an interior nul byte
    NulByte,
    /// Does not know the type (probably library error...)
    TypeUnknown(nc_type),
    /// A dimension named when defining a variable does not exist
    NotFound(String),
    /// Supplied the wrong length of the buffer
    BufferLen(usize, usize),
}

impl std::error::Error for Error {}

impl Error {
    /// The libnetcdf status code, if this error came from the library
    pub fn code(&self) -> Option<nc_type> {
        match self {
            Self::Netcdf(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<nc_type> for Error {
    fn from(nc: nc_type) -> Self {
        Self::Netcdf(nc)
    }
}

impl From<std::ffi::NulError> for Error {
    fn from(_: std::ffi::NulError) -> Self {
        Self::NulByte
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::Str(e.to_string())
    }
}

/// Human readable message for a libnetcdf status code
///
/// Unknown codes are fine, `nc_strerror` answers "Unknown Error" for those
pub fn strerror(code: nc_type) -> String {
    let _l = super::lock();
    let cmsg = unsafe { std::ffi::CStr::from_ptr(nc_strerror(code)) };
    cmsg.to_string_lossy().into_owned()
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Netcdf(x) => write!(f, "{}", strerror(*x)),
            Self::Str(x) => write!(f, "{x}"),
            Self::NulByte => write!(f, "name contains an interior nul byte"),
            Self::TypeUnknown(t) => write!(f, "netcdf type {t} is not known"),
            Self::NotFound(x) => write!(f, "Could not find {x}"),
            Self::BufferLen(has, need) => write!(
                f,
                "buffer size mismatch, has size {has}, but needs size {need}"
            ),
        }
    }
}

/// Result type used in this crate
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn checked(err: nc_type) -> Result<()> {
    if err != NC_NOERR {
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcdf_sys::{NC_EBADID, NC_ENAMEINUSE};

    #[test]
    fn checked_passes_noerr() {
        assert_eq!(checked(NC_NOERR), Ok(()));
    }

    #[test]
    fn checked_wraps_codes() {
        let err = checked(NC_EBADID).unwrap_err();
        assert_eq!(err, Error::Netcdf(NC_EBADID));
        assert_eq!(err.code(), Some(NC_EBADID));
        assert_eq!(Error::NulByte.code(), None);
    }

    #[test]
    fn display_uses_library_message() {
        let err = Error::Netcdf(NC_ENAMEINUSE);
        assert_eq!(err.to_string(), strerror(NC_ENAMEINUSE));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn unknown_codes_still_have_a_message() {
        assert!(!strerror(-9999).is_empty());
    }
}
