//! # hslab
//!
//! Hyperslab selections of multidimensional variables. A hyperslab is a
//! rectangular, possibly strided, subregion of a variable, described by a
//! start offset, a stride and an element count per dimension.
//!
//! ## Resources
//!
//! * [HDF5 hyperslab tutorial](https://support.hdfgroup.org/HDF5/Tutor/select.html)
//! * [OPeNDAP constraint expressions](https://www.opendap.org/support/design-documentation)
#[macro_use]
extern crate anyhow;

pub mod hyperslab;
pub mod selection;

pub use hyperslab::{parse_hyperslab, resolve, Slab};
pub use selection::{SelectedVariable, Selection};
