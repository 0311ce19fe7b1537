//! Open and create netcdf files
#![allow(clippy::similar_names)]

use std::path;

use netcdf_sys::*;

use super::attribute;
use super::dimension::{self, Dimension};
use super::error;
use super::types::BasicType;
use super::variable::{self, Variable, VariableMut};
use super::with_lock;

#[derive(Debug)]
#[repr(transparent)]
pub(crate) struct RawFile {
    ncid: nc_type,
}

impl RawFile {
    fn close(self) -> error::Result<()> {
        let ncid = self.ncid;
        // The handle is gone after nc_close, whatever it returns
        std::mem::forget(self);
        error::checked(with_lock(|| unsafe { nc_close(ncid) }))
    }
}

impl Drop for RawFile {
    fn drop(&mut self) {
        // Can't really do much with an error here
        let ncid = self.ncid;
        if let Err(e) = error::checked(with_lock(|| unsafe { nc_close(ncid) })) {
            tracing::warn!(ncid, error = %e, "closing netcdf file on drop failed");
        }
    }
}

#[cfg(unix)]
fn get_ffi_from_path(path: &path::Path) -> error::Result<Vec<u8>> {
    use std::os::unix::ffi::OsStrExt;
    let bytes = path.as_os_str().as_bytes();
    if bytes.contains(&0) {
        return Err(error::Error::NulByte);
    }
    let mut bytes = bytes.to_vec();
    bytes.push(0);
    Ok(bytes)
}
#[cfg(not(unix))]
fn get_ffi_from_path(path: &path::Path) -> error::Result<Vec<u8>> {
    let path = path
        .to_str()
        .ok_or_else(|| error::Error::Str("path is not valid utf8".into()))?;
    Ok(std::ffi::CString::new(path)?.into_bytes_with_nul())
}

bitflags::bitflags! {
    /// Options for opening and creating files
    ///
    /// The empty set creates a classic format file and overwrites any
    /// existing file (`NC_CLOBBER`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Options: nc_type {
        /// Do not overwrite an existing file
        const NOCLOBBER = NC_NOCLOBBER;
        /// Use the `hdf5` storage format
        const NETCDF4 = NC_NETCDF4;
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::empty()
    }
}

impl RawFile {
    /// Open a `netCDF` file in read only mode.
    pub(crate) fn open_with(path: &path::Path, options: Options) -> error::Result<File> {
        let f = get_ffi_from_path(path)?;
        let mut ncid: nc_type = 0;
        unsafe {
            error::checked(with_lock(|| {
                nc_open(f.as_ptr().cast(), options.bits(), &mut ncid)
            }))?;
        }
        Ok(File(Self { ncid }))
    }

    /// Create a new `netCDF` file
    pub(crate) fn create_with(path: &path::Path, options: Options) -> error::Result<MutableFile> {
        let f = get_ffi_from_path(path)?;
        let mut ncid: nc_type = -1;
        unsafe {
            error::checked(with_lock(|| {
                nc_create(f.as_ptr().cast(), options.bits(), &mut ncid)
            }))?;
        }

        Ok(MutableFile(File(Self { ncid })))
    }
}

/// On-disk format of an open file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// The original `netCDF` format
    Classic,
    /// Classic format with 64 bit offsets
    Offset64,
    /// `CDF-5`, 64 bit data
    Data64,
    /// `hdf5` based format
    Netcdf4,
    /// `hdf5` based format restricted to the classic data model
    Netcdf4Classic,
}

#[derive(Debug)]
/// Read only accessible file
#[allow(clippy::module_name_repetitions)]
#[repr(transparent)]
pub struct File(RawFile);

impl File {
    fn ncid(&self) -> nc_type {
        self.0.ncid
    }

    /// path used to open/create the file
    pub fn path(&self) -> error::Result<path::PathBuf> {
        let name: Vec<u8> = {
            let mut pathlen = 0;
            unsafe {
                error::checked(with_lock(|| {
                    nc_inq_path(self.ncid(), &mut pathlen, std::ptr::null_mut())
                }))?;
            }
            let mut name = vec![0_u8; pathlen + 1];
            unsafe {
                error::checked(with_lock(|| {
                    nc_inq_path(self.ncid(), std::ptr::null_mut(), name.as_mut_ptr().cast())
                }))?;
            }
            name.truncate(pathlen);
            name
        };

        #[cfg(not(unix))]
        {
            Ok(path::PathBuf::from(std::str::from_utf8(&name)?))
        }
        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;
            let osstr = std::ffi::OsStr::from_bytes(&name);
            Ok(path::PathBuf::from(osstr))
        }
    }

    /// Format of the underlying file
    pub fn format(&self) -> error::Result<Format> {
        let mut format = 0;
        unsafe {
            error::checked(with_lock(|| nc_inq_format(self.ncid(), &mut format)))?;
        }
        Ok(match format {
            NC_FORMAT_CLASSIC => Format::Classic,
            NC_FORMAT_64BIT_OFFSET => Format::Offset64,
            NC_FORMAT_64BIT_DATA => Format::Data64,
            NC_FORMAT_NETCDF4 => Format::Netcdf4,
            NC_FORMAT_NETCDF4_CLASSIC => Format::Netcdf4Classic,
            x => return Err(error::Error::Str(format!("unknown netcdf format {x}"))),
        })
    }

    /// Get a variable from the file
    pub fn variable<'f>(&'f self, name: &str) -> error::Result<Option<Variable<'f>>> {
        Variable::find_from_name(self.ncid(), name)
    }

    /// Iterate over all variables in the file
    pub fn variables(&self) -> error::Result<impl Iterator<Item = error::Result<Variable<'_>>>> {
        variable::variables_at_ncid(self.ncid())
    }

    /// Get a dimension by name
    pub fn dimension<'f>(&'f self, name: &str) -> error::Result<Option<Dimension<'f>>> {
        dimension::dimension_from_name(self.ncid(), name)
    }

    /// Get a global text attribute
    pub fn attribute_text(&self, name: &str) -> error::Result<Option<String>> {
        attribute::get_text(self.ncid(), NC_GLOBAL, name)
    }

    /// Close the file
    ///
    /// Note: This is called automatically by `Drop`, but can be useful
    /// if flushing data or closing the file would result in an error.
    pub fn close(self) -> error::Result<()> {
        let Self(file) = self;
        file.close()
    }
}

/// Mutable access to file, still in define mode after creation
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
#[repr(transparent)]
pub struct MutableFile(File);

impl std::ops::Deref for MutableFile {
    type Target = File;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl MutableFile {
    /// Adds a dimension of fixed length
    pub fn add_dimension<'f>(&'f mut self, name: &str, len: usize) -> error::Result<Dimension<'f>> {
        dimension::add_dimension_at(self.ncid(), name, len)
    }

    /// Adds a variable of the given type over the named dimensions,
    /// no dimensions gives a scalar
    pub fn add_variable<'f>(
        &'f mut self,
        name: &str,
        dims: &[&str],
        xtype: BasicType,
    ) -> error::Result<VariableMut<'f>> {
        variable::add_variable_at(self.ncid(), name, dims, xtype)
    }

    /// Get a variable for writing
    pub fn variable_mut<'f>(&'f mut self, name: &str) -> error::Result<Option<VariableMut<'f>>> {
        Ok(Variable::find_from_name(self.ncid(), name)?
            .map(|var| VariableMut(var, std::marker::PhantomData)))
    }

    /// Attach a global text attribute
    pub fn add_attribute(&mut self, name: &str, value: &str) -> error::Result<()> {
        attribute::put_text(self.ncid(), NC_GLOBAL, name, value)
    }

    /// Leave define mode, metadata can no longer be added
    pub fn enddef(&mut self) -> error::Result<()> {
        error::checked(with_lock(|| unsafe { nc_enddef(self.ncid()) }))
    }

    /// Enter define mode again
    pub fn redef(&mut self) -> error::Result<()> {
        error::checked(with_lock(|| unsafe { nc_redef(self.ncid()) }))
    }

    /// Close the file
    pub fn close(self) -> error::Result<()> {
        let Self(file) = self;
        file.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_clobber() {
        assert_eq!(Options::default().bits(), NC_CLOBBER);
        assert!(!Options::default().contains(Options::NOCLOBBER));
        assert_eq!(
            (Options::NETCDF4 | Options::NOCLOBBER).bits(),
            NC_NETCDF4 | NC_NOCLOBBER
        );
    }

    #[cfg(unix)]
    #[test]
    fn ffi_paths_are_nul_terminated() {
        let bytes = get_ffi_from_path(path::Path::new("simple.nc")).unwrap();
        assert_eq!(bytes, b"simple.nc\0");
        assert_eq!(
            get_ffi_from_path(path::Path::new("sim\0ple.nc")).unwrap_err(),
            error::Error::NulByte
        );
    }
}
