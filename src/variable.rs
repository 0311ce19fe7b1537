//! Variables in a `netCDF` file

use std::marker::PhantomData;

use netcdf_sys::*;

use super::attribute;
use super::dimension::{self, Dimension};
use super::error;
use super::putget::NcPutGet;
use super::types::BasicType;
use super::utils::short_name_to_bytes;
use super::with_lock;

/// A variable of a `netCDF` file, borrowed from the file it lives in
#[derive(Debug, Clone)]
pub struct Variable<'f> {
    pub(crate) ncid: nc_type,
    pub(crate) varid: nc_type,
    pub(crate) vartype: nc_type,
    pub(crate) _file: PhantomData<&'f nc_type>,
}

/// Mutable access to a variable
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct VariableMut<'f>(pub(crate) Variable<'f>, pub(crate) PhantomData<&'f mut nc_type>);

impl<'f> std::ops::Deref for VariableMut<'f> {
    type Target = Variable<'f>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'f> Variable<'f> {
    pub(crate) fn find_from_name(ncid: nc_type, name: &str) -> error::Result<Option<Self>> {
        let cname = short_name_to_bytes(name)?;
        let mut varid = 0;
        let e = unsafe { with_lock(|| nc_inq_varid(ncid, cname.as_ptr().cast(), &mut varid)) };
        if e == NC_ENOTVAR {
            return Ok(None);
        }
        error::checked(e)?;
        Self::from_varid(ncid, varid).map(Some)
    }

    fn from_varid(ncid: nc_type, varid: nc_type) -> error::Result<Self> {
        let mut vartype = 0;
        unsafe {
            error::checked(with_lock(|| nc_inq_vartype(ncid, varid, &mut vartype)))?;
        }
        Ok(Self {
            ncid,
            varid,
            vartype,
            _file: PhantomData,
        })
    }

    /// Get the name of variable
    pub fn name(&self) -> error::Result<String> {
        let mut name = vec![0_u8; NC_MAX_NAME as usize + 1];
        unsafe {
            error::checked(with_lock(|| {
                nc_inq_varname(self.ncid, self.varid, name.as_mut_ptr().cast())
            }))?;
        }
        let zero_pos = name.iter().position(|&x| x == 0).unwrap_or(name.len());
        name.truncate(zero_pos);
        Ok(String::from_utf8_lossy(&name).into_owned())
    }

    /// Id of the variable within the file
    pub fn varid(&self) -> nc_type {
        self.varid
    }

    /// Type of the variable, `None` for types without a [`BasicType`]
    pub fn vartype(&self) -> Option<BasicType> {
        BasicType::try_from(self.vartype).ok()
    }

    /// Dimensions of the variable, slowest varying first
    pub fn dimensions(&self) -> error::Result<Vec<Dimension<'f>>> {
        let mut ndims = 0;
        unsafe {
            error::checked(with_lock(|| nc_inq_varndims(self.ncid, self.varid, &mut ndims)))?;
        }
        let mut dimids = vec![0; usize::try_from(ndims).unwrap_or_default()];
        unsafe {
            error::checked(with_lock(|| {
                nc_inq_vardimid(self.ncid, self.varid, dimids.as_mut_ptr())
            }))?;
        }
        dimids
            .into_iter()
            .map(|dimid| Dimension::from_dimid(self.ncid, dimid))
            .collect()
    }

    /// Whether the variable has no dimensions
    pub fn is_scalar(&self) -> error::Result<bool> {
        self.dimensions().map(|d| d.is_empty())
    }

    /// Number of elements, one for a scalar
    pub fn len(&self) -> error::Result<usize> {
        Ok(self.dimensions()?.iter().map(Dimension::len).product())
    }

    /// Read all values, converting to `T`
    pub fn values<T: NcPutGet>(&self) -> error::Result<Vec<T>> {
        let mut values = vec![T::default(); self.len()?];
        unsafe {
            T::get_var(self.ncid, self.varid, values.as_mut_ptr())?;
        }
        Ok(values)
    }

    /// Get a text attribute of this variable
    pub fn attribute_text(&self, name: &str) -> error::Result<Option<String>> {
        attribute::get_text(self.ncid, self.varid, name)
    }
}

impl<'f> VariableMut<'f> {
    /// Write all values of the variable at once
    ///
    /// The length of `values` must match the number of elements
    pub fn put_values<T: NcPutGet>(&mut self, values: &[T]) -> error::Result<()> {
        let need = self.len()?;
        if values.len() != need {
            return Err(error::Error::BufferLen(values.len(), need));
        }
        unsafe { T::put_var(self.ncid, self.varid, values.as_ptr()) }
    }

    /// Attach a text attribute to the variable
    pub fn add_attribute(&mut self, name: &str, value: &str) -> error::Result<()> {
        attribute::put_text(self.ncid, self.varid, name, value)
    }
}

pub(crate) fn variables_at_ncid<'f>(
    ncid: nc_type,
) -> error::Result<impl Iterator<Item = error::Result<Variable<'f>>>> {
    let mut nvars = 0;
    unsafe {
        error::checked(with_lock(|| nc_inq_nvars(ncid, &mut nvars)))?;
    }
    // Variable ids are assigned sequentially from zero
    Ok((0..nvars).map(move |varid| Variable::from_varid(ncid, varid)))
}

/// Define a variable of a basic type over the named dimensions
pub(crate) fn add_variable_at<'f>(
    ncid: nc_type,
    name: &str,
    dims: &[&str],
    xtype: BasicType,
) -> error::Result<VariableMut<'f>> {
    let cname = short_name_to_bytes(name)?;

    let dimids = dims
        .iter()
        .map(|&dim| {
            dimension::dimension_from_name(ncid, dim)?
                .map(|d| d.dimid)
                .ok_or_else(|| error::Error::NotFound(format!("dimension {dim}")))
        })
        .collect::<error::Result<Vec<_>>>()?;

    let mut varid = 0;
    unsafe {
        let ndims = nc_type::try_from(dimids.len()).map_err(|_| error::Error::Netcdf(NC_EMAXDIMS))?;
        error::checked(with_lock(|| {
            nc_def_var(
                ncid,
                cname.as_ptr().cast(),
                xtype.id(),
                ndims,
                dimids.as_ptr(),
                &mut varid,
            )
        }))?;
    }

    Ok(VariableMut(
        Variable {
            ncid,
            varid,
            vartype: xtype.id(),
            _file: PhantomData,
        },
        PhantomData,
    ))
}
