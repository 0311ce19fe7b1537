//! Smoke test for Unidata's [libnetcdf](http://www.unidata.ucar.edu/software/netcdf/)
//!
//! This crate checks that the native `netCDF` library is installed and can be
//! linked and called. The classic check creates a file, defines a single
//! scalar integer variable, leaves define mode and closes the file again.
//! The `netCDF-4` check goes through `hdf5`: it writes a two dimensional
//! integer variable and a couple of text attributes.
//!
//! The binary `netcdf-smoke` runs one of these checks in the working
//! directory. The thin wrappers used to do so are exposed as well.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create `simple.nc` in the current directory
//! netcdf_smoke::smoke::run()?;
//!
//! // Look at what was written
//! let summary = netcdf_smoke::smoke::inspect("simple.nc")?;
//! assert_eq!(summary.variables[0].name, "data");
//! # Ok(()) }
//! ```
//!
//! Doing the same by hand:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use netcdf_smoke::types::BasicType;
//!
//! let mut file = netcdf_smoke::create("crabs.nc")?;
//! file.add_dimension("ncrabs", 10)?;
//! let mut var = file.add_variable("crab_coolness_level", &["ncrabs"], BasicType::Int)?;
//! var.add_attribute("units", "Kelvin")?;
//! file.enddef()?;
//!
//! let mut var = file.variable_mut("crab_coolness_level")?.expect("just defined");
//! var.put_values(&[42_i32; 10])?;
//! file.close()?;
//! # Ok(()) }
//! ```

#![warn(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

use netcdf_sys::nc_type;

pub mod attribute;
pub mod dimension;
pub mod error;
pub mod file;
pub mod putget;
pub mod smoke;
pub mod types;
pub mod variable;

pub use dimension::*;
pub use file::*;
pub use putget::NcPutGet;
pub use variable::*;

/// Version of `netCDF` reported by `netcdf-sys` at build time
pub const LINKED_VERSION: &str = env!("NETCDF_SMOKE_LINKED_VERSION");

/// Create a new `netCDF` file, overwriting any existing file
///
/// Uses the classic format
pub fn create<P>(name: P) -> error::Result<MutableFile>
where
    P: AsRef<std::path::Path>,
{
    RawFile::create_with(name.as_ref(), Options::default())
}

/// Create a `netCDF` file with the given options
pub fn create_with<P>(name: P, options: Options) -> error::Result<MutableFile>
where
    P: AsRef<std::path::Path>,
{
    RawFile::create_with(name.as_ref(), options)
}

/// Open a `netCDF` file in read mode
pub fn open<P>(name: P) -> error::Result<File>
where
    P: AsRef<std::path::Path>,
{
    RawFile::open_with(name.as_ref(), Options::default())
}

/// Version string of the libnetcdf loaded at runtime
pub fn library_version() -> String {
    let _l = lock();
    let cstr = unsafe { std::ffi::CStr::from_ptr(netcdf_sys::nc_inq_libvers()) };
    cstr.to_string_lossy().into_owned()
}

/// Hold the lock shared by every user of libnetcdf and libhdf5 in this process
///
/// Poisoning is ignored, the lock guards no Rust data
pub(crate) fn lock() -> std::sync::MutexGuard<'static, ()> {
    netcdf_sys::libnetcdf_lock
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// All functions should be wrapped in this locker. Disregarding this, expect
/// segfaults, especially on non-threadsafe hdf5 builds
pub(crate) fn with_lock<F: FnMut() -> nc_type>(mut f: F) -> nc_type {
    let _l = lock();
    f()
}

pub(crate) mod utils {
    use super::error;
    use netcdf_sys::{NC_EMAXNAME, NC_MAX_NAME};

    /// Use this function for short `netCDF` names to avoid the allocation
    /// for a `CString`
    pub(crate) fn short_name_to_bytes(name: &str) -> error::Result<[u8; NC_MAX_NAME as usize + 1]> {
        if name.len() > NC_MAX_NAME as _ {
            Err(NC_EMAXNAME.into())
        } else if name.bytes().any(|x| x == 0) {
            Err(error::Error::NulByte)
        } else {
            let mut bytes = [0_u8; NC_MAX_NAME as usize + 1];
            bytes[..name.len()].copy_from_slice(name.as_bytes());
            Ok(bytes)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn short_names() {
            let bytes = short_name_to_bytes("data").unwrap();
            assert_eq!(&bytes[..5], b"data\0");
        }

        #[test]
        fn long_names() {
            let name = "x".repeat(NC_MAX_NAME as usize + 1);
            assert_eq!(
                short_name_to_bytes(&name).unwrap_err(),
                error::Error::Netcdf(NC_EMAXNAME)
            );
            let name = "x".repeat(NC_MAX_NAME as usize);
            assert!(short_name_to_bytes(&name).is_ok());
        }

        #[test]
        fn interior_nul() {
            assert_eq!(
                short_name_to_bytes("da\0ta").unwrap_err(),
                error::Error::NulByte
            );
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn library_reports_a_version() {
        assert!(!super::library_version().is_empty());
    }

    #[test]
    fn linked_version_is_known() {
        assert_ne!(super::LINKED_VERSION, "unknown");
        let version = semver::Version::parse(super::LINKED_VERSION).unwrap();
        assert_eq!(version.major, 4);
    }
}
