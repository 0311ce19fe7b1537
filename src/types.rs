//! Contains the enum describing variable types

use super::error;
use netcdf_sys::*;

/// Numeric types a variable can be defined with
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BasicType {
    /// Signed 4 byte integer
    Int,
    /// Single precision floating point number
    Float,
    /// Double precision floating point number
    Double,
}

impl BasicType {
    /// `nc_type` of the type
    pub fn id(self) -> nc_type {
        match self {
            Self::Int => NC_INT,
            Self::Float => NC_FLOAT,
            Self::Double => NC_DOUBLE,
        }
    }
}

impl TryFrom<nc_type> for BasicType {
    type Error = error::Error;

    fn try_from(id: nc_type) -> error::Result<Self> {
        Ok(match id {
            NC_INT => Self::Int,
            NC_FLOAT => Self::Float,
            NC_DOUBLE => Self::Double,
            x => return Err(error::Error::TypeUnknown(x)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_is_nc_int() {
        assert_eq!(BasicType::Int.id(), NC_INT);
        assert_eq!(BasicType::try_from(NC_INT).unwrap(), BasicType::Int);
        assert_eq!(BasicType::try_from(NC_DOUBLE).unwrap(), BasicType::Double);
    }

    #[test]
    fn other_types_are_unknown() {
        assert_eq!(
            BasicType::try_from(NC_COMPOUND).unwrap_err(),
            error::Error::TypeUnknown(NC_COMPOUND)
        );
        assert!(BasicType::try_from(NC_SHORT).is_err());
    }
}
