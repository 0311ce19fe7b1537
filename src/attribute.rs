//! Text attributes on variables and files
//!
//! Only `NC_CHAR` attributes are handled, which is what the checks write.

use netcdf_sys::*;

use super::error;
use super::utils::short_name_to_bytes;
use super::with_lock;

/// Attach a text attribute, `varid` is `NC_GLOBAL` for file attributes
pub(crate) fn put_text(
    ncid: nc_type,
    varid: nc_type,
    name: &str,
    value: &str,
) -> error::Result<()> {
    let cname = short_name_to_bytes(name)?;
    error::checked(with_lock(|| unsafe {
        nc_put_att_text(
            ncid,
            varid,
            cname.as_ptr().cast(),
            value.len(),
            value.as_ptr().cast(),
        )
    }))
}

/// Read a text attribute, `None` if there is no attribute with this name
pub(crate) fn get_text(ncid: nc_type, varid: nc_type, name: &str) -> error::Result<Option<String>> {
    let cname = short_name_to_bytes(name)?;

    let mut xtype = 0;
    let mut len = 0;
    let e = unsafe {
        with_lock(|| nc_inq_att(ncid, varid, cname.as_ptr().cast(), &mut xtype, &mut len))
    };
    if e == NC_ENOTATT {
        return Ok(None);
    }
    error::checked(e)?;
    if xtype != NC_CHAR {
        return Err(error::Error::TypeUnknown(xtype));
    }

    let mut buf = vec![0_u8; len];
    unsafe {
        error::checked(with_lock(|| {
            nc_get_att_text(ncid, varid, cname.as_ptr().cast(), buf.as_mut_ptr().cast())
        }))?;
    }
    Ok(Some(std::str::from_utf8(&buf)?.to_owned()))
}
