//! Moving whole variables in and out of a file

use netcdf_sys::*;

use super::error;
use super::with_lock;

mod sealed {
    pub trait Sealed {}
}

/// This trait allow an implicit cast when fetching
/// a netCDF variable
///
/// # Safety
/// This trait maps directly to netCDF semantics and needs
/// to upheld invariants therein.
/// This trait is sealed and can not be implemented for
/// types outside this crate
pub trait NcPutGet: sealed::Sealed + Copy + Default {
    /// Constant corresponding to a netcdf type
    const NCTYPE: nc_type;

    /// Read every value of a variable
    ///
    /// # Safety
    ///
    /// Requires `values` to hold at least as many elements as the variable
    unsafe fn get_var(ncid: nc_type, varid: nc_type, values: *mut Self) -> error::Result<()>;

    /// Write every value of a variable
    ///
    /// # Safety
    ///
    /// Requires `values` to hold at least as many elements as the variable
    unsafe fn put_var(ncid: nc_type, varid: nc_type, values: *const Self) -> error::Result<()>;
}

/// Implements `NcPutGet` for a numeric type, the types only differ by
/// the C functions called
macro_rules! impl_numeric {
    ($sized_type: ty, $nc_type: ident, $nc_get_var: ident, $nc_put_var: ident) => {
        impl sealed::Sealed for $sized_type {}
        impl NcPutGet for $sized_type {
            const NCTYPE: nc_type = $nc_type;

            unsafe fn get_var(
                ncid: nc_type,
                varid: nc_type,
                values: *mut Self,
            ) -> error::Result<()> {
                error::checked(with_lock(|| $nc_get_var(ncid, varid, values)))
            }

            unsafe fn put_var(
                ncid: nc_type,
                varid: nc_type,
                values: *const Self,
            ) -> error::Result<()> {
                error::checked(with_lock(|| $nc_put_var(ncid, varid, values)))
            }
        }
    };
}

impl_numeric!(i32, NC_INT, nc_get_var_int, nc_put_var_int);
impl_numeric!(f32, NC_FLOAT, nc_get_var_float, nc_put_var_float);
impl_numeric!(f64, NC_DOUBLE, nc_get_var_double, nc_put_var_double);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BasicType;

    #[test]
    fn nctypes_match_basic_types() {
        assert_eq!(i32::NCTYPE, BasicType::Int.id());
        assert_eq!(f32::NCTYPE, BasicType::Float.id());
        assert_eq!(f64::NCTYPE, BasicType::Double.id());
    }
}
