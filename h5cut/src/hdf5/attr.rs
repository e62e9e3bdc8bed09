//! Attributes of HDF5 files and datasets. Dimension bookkeeping attributes written by the
//! NetCDF-4 layer are recognized and ignored.
use std::fmt;

#[derive(Debug)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
}

#[derive(Debug)]
pub enum AttrValue {
    Str(String),
    Float(f32),
    Floats(Vec<f32>),
    Double(f64),
    Doubles(Vec<f64>),
    Short(i16),
    Shorts(Vec<i16>),
    Int(i32),
    Ints(Vec<i32>),
    Uchar(u8),
    Ignored(String),
    Unimplemented(String),
}

impl Attribute {
    /// Dimension metadata and attributes of unsupported types, skipped in output.
    pub fn is_ignored(&self) -> bool {
        matches!(
            self.value,
            AttrValue::Ignored(_) | AttrValue::Unimplemented(_)
        )
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AttrValue::*;

        fn join<T: fmt::Display>(v: &[T], fm: impl Fn(&T) -> String) -> String {
            v.iter().map(|x| fm(x)).collect::<Vec<String>>().join(", ")
        }

        match &self.value {
            Str(s) => write!(f, "String {} \"{}\";", self.name, s.escape_default()),
            Float(v) => write!(f, "Float32 {} {:+E};", self.name, v),
            Floats(v) => write!(f, "Float32 {} {};", self.name, join(v, |v| format!("{:+E}", v))),
            Double(v) => write!(f, "Float64 {} {:+E};", self.name, v),
            Doubles(v) => write!(f, "Float64 {} {};", self.name, join(v, |v| format!("{:+E}", v))),
            Short(v) => write!(f, "Int16 {} {};", self.name, v),
            Shorts(v) => write!(f, "Int16 {} {};", self.name, join(v, |v| format!("{}", v))),
            Int(v) => write!(f, "Int32 {} {};", self.name, v),
            Ints(v) => write!(f, "Int32 {} {};", self.name, join(v, |v| format!("{}", v))),
            Uchar(v) => write!(f, "Byte {} {};", self.name, v),
            Ignored(_) | Unimplemented(_) => Ok(()),
        }
    }
}

/// Read the attributes of a file or dataset.
pub fn attributes(loc: &hdf5::Location) -> anyhow::Result<Vec<Attribute>> {
    Ok(loc
        .attr_names()?
        .iter()
        .filter_map(|n| loc.attr(n).ok().map(|a| read_attr(n, a)))
        .collect())
}

fn read_attr(n: &str, a: hdf5::Attribute) -> Attribute {
    if n == "DIMENSION_LIST" || n == "REFERENCE_LIST" || n == "CLASS" || n == "NAME" {
        return Attribute {
            name: n.to_string(),
            value: AttrValue::Ignored("Dimension metadata".into()),
        };
    }

    Attribute {
        name: n.to_string(),
        value: attr_value(&a).unwrap_or_else(|e| AttrValue::Unimplemented(e.to_string())),
    }
}

fn attr_value(a: &hdf5::Attribute) -> anyhow::Result<AttrValue> {
    use hdf5::types::{FloatSize, IntSize, TypeDescriptor as h5t, VarLenAscii, VarLenUnicode};
    use AttrValue::*;

    let dtype = a.dtype()?.to_descriptor()?;

    Ok(if a.is_scalar() {
        match dtype {
            h5t::Integer(IntSize::U2) => Short(a.read_scalar()?),
            h5t::Integer(IntSize::U4) => Int(a.read_scalar()?),
            h5t::Unsigned(IntSize::U1) => Uchar(a.read_scalar()?),
            h5t::Float(FloatSize::U4) => Float(a.read_scalar()?),
            h5t::Float(FloatSize::U8) => Double(a.read_scalar()?),
            h5t::FixedAscii(_) => Str(fixedascii_to_string(&*a)?),
            h5t::VarLenAscii => Str(a.read_scalar::<VarLenAscii>()?.as_str().to_owned()),
            h5t::VarLenUnicode => Str(a.read_scalar::<VarLenUnicode>()?.as_str().to_owned()),
            dtype => Unimplemented(format!("(scalar) {:?}", dtype)),
        }
    } else {
        match dtype {
            h5t::Integer(IntSize::U2) => Shorts(a.read_raw()?),
            h5t::Integer(IntSize::U4) => Ints(a.read_raw()?),
            h5t::Float(FloatSize::U4) => Floats(a.read_raw()?),
            h5t::Float(FloatSize::U8) => Doubles(a.read_raw()?),
            dtype => Unimplemented(format!("(vector) {:?}", dtype)),
        }
    })
}

macro_rules! branch_array_impl {
    ($a:expr, $u:expr, $( $ns:expr ),*) => {
        match $u {
            $(
                $ns => Some(fixedascii_attr_value::<[u8; $ns]>($a)),
            )*
            _ => None
        }
    };
}

fn fixedascii_to_string(c: &hdf5::Container) -> anyhow::Result<String> {
    if let Ok(hdf5::types::TypeDescriptor::FixedAscii(n)) = c.dtype()?.to_descriptor() {
        // values from: hdf5_types.rs/array.rs
        branch_array_impl!(
            c, n, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21,
            22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 48, 64, 96, 128, 192, 256, 512, 1024
        )
        .ok_or_else(|| anyhow!("Unsupported FixedAscii length: {}", n))?
    } else {
        Err(anyhow!("not FixedAscii"))
    }
}

fn fixedascii_attr_value<T: hdf5::types::Array<Item = u8>>(
    c: &hdf5::Container,
) -> anyhow::Result<String> {
    Ok(c.read_scalar::<hdf5::types::FixedAscii<T>>()?
        .as_str()
        .to_owned())
}
