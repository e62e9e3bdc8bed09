//! HDF5 file and dataset access through the native HDF5 library.
use std::convert::TryFrom;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use ndarray::{ArrayD, IxDyn, SliceInfo, SliceInfoElem};
use serde::Deserialize;

use crate::values::{Values, VarType};
use hslab::Slab;

pub mod attr;

pub use attr::{AttrValue, Attribute};

/// Access mode for HDF5 files.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// An open HDF5 file.
pub struct Hdf5File {
    file: hdf5::File,
    path: PathBuf,
    modified: SystemTime,
}

impl fmt::Debug for Hdf5File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hdf5File <{:?}>", self.path)
    }
}

impl Hdf5File {
    pub fn open<P: AsRef<Path>>(path: P, access: Access) -> anyhow::Result<Hdf5File> {
        let path = path.as_ref();

        let modified = std::fs::metadata(path)?.modified()?;

        let _silence = hdf5::silence_errors();
        let file = match access {
            Access::ReadOnly => hdf5::File::open(path)?,
            Access::ReadWrite => hdf5::File::open_rw(path)?,
        };

        debug!("opened {:?} ({:?})", path, access);

        Ok(Hdf5File {
            file,
            path: path.into(),
            modified,
        })
    }

    /// Names of the allocated datasets under the root group.
    pub fn datasets(&self) -> anyhow::Result<Vec<String>> {
        Ok(self
            .file
            .group("/")?
            .member_names()?
            .iter()
            .map(|m| self.file.dataset(m).map(|d| (m, d)))
            .filter_map(Result::ok)
            .filter(|(_, d)| d.is_chunked() || d.offset().is_some()) // skipping un-allocated datasets.
            .map(|(m, _)| m.clone())
            .collect())
    }

    pub fn global_attributes(&self) -> anyhow::Result<Vec<Attribute>> {
        attr::attributes(&self.file)
    }

    /// Open a dataset and bundle its handle with rank, shape and element type.
    pub fn dataset(&self, name: &str) -> anyhow::Result<DatasetSlab> {
        let ds = self.file.dataset(name)?;
        let vartype = hdf5_vartype(&ds.dtype()?)?;
        let shape = ds.shape();

        trace!("dataset {}: {} {:?}", name, vartype, shape);

        Ok(DatasetSlab {
            ds,
            name: name.to_string(),
            path: self.path.clone(),
            modified: self.modified,
            shape,
            vartype,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the file. The handle is also released when dropped.
    pub fn close(self) {
        trace!("closing {:?}", self.path);
    }
}

fn hdf5_vartype(dtype: &hdf5::Datatype) -> anyhow::Result<VarType> {
    use VarType::*;

    match dtype {
        _ if dtype.is::<u8>() => Ok(Byte),
        _ if dtype.is::<u16>() => Ok(UInt16),
        _ if dtype.is::<u32>() => Ok(UInt32),
        _ if dtype.is::<u64>() => Ok(UInt64),
        _ if dtype.is::<i8>() => Ok(Int8),
        _ if dtype.is::<i16>() => Ok(Int16),
        _ if dtype.is::<i32>() => Ok(Int32),
        _ if dtype.is::<i64>() => Ok(Int64),
        _ if dtype.is::<f32>() => Ok(Float32),
        _ if dtype.is::<f64>() => Ok(Float64),
        _ => Err(anyhow!("Unsupported data type: {:?}", dtype)),
    }
}

/// A dataset opened for hyperslab reads: the dataset handle bundled with its rank, shape and
/// element type.
pub struct DatasetSlab {
    ds: hdf5::Dataset,
    name: String,
    path: PathBuf,
    modified: SystemTime,
    shape: Vec<usize>,
    vartype: VarType,
}

impl fmt::Debug for DatasetSlab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatasetSlab <{} {} {:?}>", self.vartype, self.name, self.shape)
    }
}

impl DatasetSlab {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn vartype(&self) -> VarType {
        self.vartype
    }

    pub fn attributes(&self) -> anyhow::Result<Vec<Attribute>> {
        attr::attributes(&self.ds)
    }

    /// Read a hyperslab of the dataset in its native element type. Missing trailing dimensions
    /// are read in full, `None` reads the entire dataset.
    pub fn read(&self, slab: Option<&[Slab]>) -> anyhow::Result<Values> {
        let modified = std::fs::metadata(&self.path)?.modified()?;
        if modified != self.modified {
            warn!("{:?} has changed on disk", self.path);
            return Err(anyhow!("{:?} has changed on disk", self.path));
        }

        let slab = hslab::resolve(slab, &self.shape)?;

        debug!("reading: {} [{:?}]", self.name, slab);

        use VarType::*;
        Ok(match self.vartype {
            Float32 => Values::Float32(self.read_typed(&slab)?),
            Float64 => Values::Float64(self.read_typed(&slab)?),
            UInt16 => Values::UInt16(self.read_typed(&slab)?),
            UInt32 => Values::UInt32(self.read_typed(&slab)?),
            UInt64 => Values::UInt64(self.read_typed(&slab)?),
            Int8 => Values::Int8(self.read_typed(&slab)?),
            Int16 => Values::Int16(self.read_typed(&slab)?),
            Int32 => Values::Int32(self.read_typed(&slab)?),
            Int64 => Values::Int64(self.read_typed(&slab)?),
            Byte => Values::Byte(self.read_typed(&slab)?),
        })
    }

    fn read_typed<T: hdf5::H5Type>(&self, slab: &[Slab]) -> anyhow::Result<ArrayD<T>> {
        if self.shape.is_empty() {
            // scalar dataset, no dimensions to slice
            let v: ArrayD<T> = self.ds.read_dyn()?;
            Ok(v)
        } else {
            let v: ArrayD<T> = self.ds.read_slice(selection(slab)?)?;
            Ok(v)
        }
    }

    /// Close the dataset. The handle is also released when dropped.
    pub fn close(self) {
        trace!("closing dataset {}", self.name);
    }
}

/// Map a resolved hyperslab onto an `ndarray` slice, one inclusive strided range per dimension.
fn selection(slab: &[Slab]) -> anyhow::Result<SliceInfo<Vec<SliceInfoElem>, IxDyn, IxDyn>> {
    let slices = slab
        .iter()
        .map(|s| SliceInfoElem::Slice {
            start: s.start as isize,
            end: Some((s.end() + 1) as isize),
            step: s.stride as isize,
        })
        .collect::<Vec<_>>();

    SliceInfo::try_from(slices).map_err(|e| anyhow!("Invalid slice: {}", e))
}
