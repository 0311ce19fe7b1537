//! The smoke checks themselves
//!
//! The classic check is four library calls in a row: create the file, define
//! a scalar integer variable, end define mode and close. The `netCDF-4` check
//! writes through `hdf5`: two dimensions, a filled integer variable and text
//! attributes. The first failing call aborts a check and its error is
//! returned as is.

use std::path::{Path, PathBuf};

use super::error;
use super::file::{Format, Options};
use super::types::BasicType;

/// Name of the file written by the classic check
pub const FILE_NAME: &str = "simple.nc";
/// Name of the single variable defined in both files
pub const VARIABLE_NAME: &str = "data";
/// Printed by the binary when the classic check succeeded
pub const SUCCESS_MESSAGE: &str = "*** Successfully created a simple NetCDF file named simple.nc";

/// Name of the file written by the `netCDF-4` check
pub const NETCDF4_FILE_NAME: &str = "test.nc";
/// Printed by the binary when the `netCDF-4` check succeeded
pub const NETCDF4_SUCCESS_MESSAGE: &str =
    "*** Successfully created a simple NetCDF file named test.nc";
/// Dimensions of `data` in the `netCDF-4` file
pub const NETCDF4_DIMS: [(&str, usize); 2] = [("x", 10), ("y", 5)];
/// Global `title` attribute of the `netCDF-4` file
pub const NETCDF4_TITLE: &str = "My test file";
/// `units` attribute of `data` in the `netCDF-4` file
pub const NETCDF4_UNITS: &str = "unknown";

/// Which file the smoke test writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Check {
    /// Classic format, a scalar integer variable
    #[default]
    Classic,
    /// `hdf5` backed file with dimensions, data and attributes
    Netcdf4,
}

impl Check {
    /// File name written into the target directory
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Classic => FILE_NAME,
            Self::Netcdf4 => NETCDF4_FILE_NAME,
        }
    }

    /// Line printed on success
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Classic => SUCCESS_MESSAGE,
            Self::Netcdf4 => NETCDF4_SUCCESS_MESSAGE,
        }
    }

    /// Run the check, writing into `dir`
    pub fn run_in<P: AsRef<Path>>(self, dir: P) -> error::Result<PathBuf> {
        match self {
            Self::Classic => run_in(dir),
            Self::Netcdf4 => run_netcdf4_in(dir),
        }
    }
}

/// Run the classic check in the current working directory
pub fn run() -> error::Result<PathBuf> {
    run_in(".")
}

/// Run the classic check, writing [`FILE_NAME`] into `dir`
///
/// An existing file is overwritten. Returns the path of the new file.
#[tracing::instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn run_in<P: AsRef<Path>>(dir: P) -> error::Result<PathBuf> {
    let path = dir.as_ref().join(FILE_NAME);

    let mut file = super::create(&path).map_err(|e| failed("create", e))?;
    tracing::debug!(path = %path.display(), "created file");

    let varid = file
        .add_variable(VARIABLE_NAME, &[], BasicType::Int)
        .map_err(|e| failed("define variable", e))?
        .varid();
    tracing::debug!(name = VARIABLE_NAME, varid, "defined variable");

    file.enddef().map_err(|e| failed("end define mode", e))?;
    tracing::debug!("left define mode");

    file.close().map_err(|e| failed("close", e))?;
    tracing::debug!("closed file");

    Ok(path)
}

/// Run the `netCDF-4` check, writing [`NETCDF4_FILE_NAME`] into `dir`
///
/// `data(x, y)` is filled with `0..50` in row major order.
#[tracing::instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn run_netcdf4_in<P: AsRef<Path>>(dir: P) -> error::Result<PathBuf> {
    let path = dir.as_ref().join(NETCDF4_FILE_NAME);

    let mut file =
        super::create_with(&path, Options::NETCDF4).map_err(|e| failed("create", e))?;
    tracing::debug!(path = %path.display(), "created file");

    for (name, len) in NETCDF4_DIMS {
        file.add_dimension(name, len)
            .map_err(|e| failed("define dimension", e))?;
    }
    let dims = NETCDF4_DIMS.map(|(name, _)| name);
    let mut var = file
        .add_variable(VARIABLE_NAME, &dims, BasicType::Int)
        .map_err(|e| failed("define variable", e))?;
    var.add_attribute("units", NETCDF4_UNITS)
        .map_err(|e| failed("variable attribute", e))?;
    file.add_attribute("title", NETCDF4_TITLE)
        .map_err(|e| failed("global attribute", e))?;
    tracing::debug!("defined metadata");

    file.enddef().map_err(|e| failed("end define mode", e))?;

    let values = (0..).take(netcdf4_len()).collect::<Vec<i32>>();
    file.variable_mut(VARIABLE_NAME)
        .and_then(|var| var.ok_or_else(|| error::Error::NotFound(VARIABLE_NAME.into())))
        .and_then(|mut var| var.put_values(&values))
        .map_err(|e| failed("write data", e))?;
    tracing::debug!(len = values.len(), "wrote data");

    file.close().map_err(|e| failed("close", e))?;
    tracing::debug!("closed file");

    Ok(path)
}

fn netcdf4_len() -> usize {
    NETCDF4_DIMS.iter().map(|&(_, len)| len).product()
}

fn failed(step: &str, e: error::Error) -> error::Error {
    tracing::error!(step, code = ?e.code(), error = %e, "netcdf call failed");
    e
}

/// What a file contains, as seen by reopening it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// On-disk format
    pub format: Format,
    /// Global `title` attribute, if any
    pub title: Option<String>,
    /// All variables, in definition order
    pub variables: Vec<VariableSummary>,
}

/// Short description of a single variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSummary {
    /// Variable name
    pub name: String,
    /// Basic type, `None` for other types
    pub vartype: Option<BasicType>,
    /// Dimension names and lengths, empty for a scalar
    pub dimensions: Vec<(String, usize)>,
    /// `units` attribute, if any
    pub units: Option<String>,
}

impl Summary {
    /// Whether the file looks like the one written by [`run`]
    pub fn is_smoke_output(&self) -> bool {
        if let [var] = self.variables.as_slice() {
            var.name == VARIABLE_NAME
                && var.vartype == Some(BasicType::Int)
                && var.dimensions.is_empty()
        } else {
            false
        }
    }

    /// Whether the metadata matches the file written by [`run_netcdf4_in`]
    pub fn is_netcdf4_output(&self) -> bool {
        let dims = NETCDF4_DIMS.map(|(name, len)| (name.to_string(), len));
        if let [var] = self.variables.as_slice() {
            self.format == Format::Netcdf4
                && self.title.as_deref() == Some(NETCDF4_TITLE)
                && var.name == VARIABLE_NAME
                && var.vartype == Some(BasicType::Int)
                && var.dimensions == dims
                && var.units.as_deref() == Some(NETCDF4_UNITS)
        } else {
            false
        }
    }
}

/// Reopen `path` read only and describe its contents
pub fn inspect<P: AsRef<Path>>(path: P) -> error::Result<Summary> {
    let file = super::open(path)?;
    let format = file.format()?;
    let title = file.attribute_text("title")?;
    let variables = file
        .variables()?
        .map(|var| {
            let var = var?;
            let dimensions = var
                .dimensions()?
                .iter()
                .map(|d| Ok((d.name()?, d.len())))
                .collect::<error::Result<Vec<_>>>()?;
            Ok(VariableSummary {
                name: var.name()?,
                vartype: var.vartype(),
                dimensions,
                units: var.attribute_text("units")?,
            })
        })
        .collect::<error::Result<Vec<_>>>()?;
    file.close()?;
    Ok(Summary {
        format,
        title,
        variables,
    })
}
