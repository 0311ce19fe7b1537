//! Dimensions of a `netCDF` file

use std::marker::PhantomData;

use netcdf_sys::*;

use super::error;
use super::utils::short_name_to_bytes;
use super::with_lock;

/// A dimension, borrowed from the file it lives in
#[derive(Debug, Clone)]
pub struct Dimension<'f> {
    pub(crate) ncid: nc_type,
    pub(crate) dimid: nc_type,
    pub(crate) len: usize,
    pub(crate) _file: PhantomData<&'f nc_type>,
}

impl<'f> Dimension<'f> {
    /// Current length of the dimension
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the dimension has no elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the name of the dimension
    pub fn name(&self) -> error::Result<String> {
        let mut name = vec![0_u8; NC_MAX_NAME as usize + 1];
        unsafe {
            error::checked(with_lock(|| {
                nc_inq_dimname(self.ncid, self.dimid, name.as_mut_ptr().cast())
            }))?;
        }
        let zero_pos = name.iter().position(|&x| x == 0).unwrap_or(name.len());
        name.truncate(zero_pos);
        Ok(String::from_utf8_lossy(&name).into_owned())
    }

    pub(crate) fn from_dimid(ncid: nc_type, dimid: nc_type) -> error::Result<Self> {
        let mut len = 0;
        unsafe {
            error::checked(with_lock(|| nc_inq_dimlen(ncid, dimid, &mut len)))?;
        }
        Ok(Self {
            ncid,
            dimid,
            len,
            _file: PhantomData,
        })
    }
}

pub(crate) fn dimension_from_name<'f>(
    ncid: nc_type,
    name: &str,
) -> error::Result<Option<Dimension<'f>>> {
    let cname = short_name_to_bytes(name)?;
    let mut dimid = 0;
    let e = unsafe { with_lock(|| nc_inq_dimid(ncid, cname.as_ptr().cast(), &mut dimid)) };
    if e == NC_EBADDIM {
        return Ok(None);
    }
    error::checked(e)?;
    Dimension::from_dimid(ncid, dimid).map(Some)
}

pub(crate) fn add_dimension_at<'f>(
    ncid: nc_type,
    name: &str,
    len: usize,
) -> error::Result<Dimension<'f>> {
    let cname = short_name_to_bytes(name)?;
    let mut dimid = 0;
    unsafe {
        error::checked(with_lock(|| {
            nc_def_dim(ncid, cname.as_ptr().cast(), len, &mut dimid)
        }))?;
    }
    Ok(Dimension {
        ncid,
        dimid,
        len,
        _file: PhantomData,
    })
}
