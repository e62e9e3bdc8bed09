use std::fmt;
use std::io;

use ndarray::{ArrayD, ArrayViewD};

/// Element type of a variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VarType {
    Float32,
    Float64,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Byte,
}

impl VarType {
    pub fn size(&self) -> usize {
        use VarType::*;

        match self {
            Byte | Int8 => 1,
            UInt16 | Int16 => 2,
            Float32 | UInt32 | Int32 => 4,
            Float64 | UInt64 | Int64 => 8,
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VarType::Float32 => "Float32",
            VarType::Float64 => "Float64",
            VarType::UInt16 => "UInt16",
            VarType::UInt32 => "UInt32",
            VarType::UInt64 => "UInt64",
            VarType::Int8 => "Int8",
            VarType::Int16 => "Int16",
            VarType::Int32 => "Int32",
            VarType::Int64 => "Int64",
            VarType::Byte => "Byte",
        })
    }
}

/// Values read from a variable, in the native element type of the variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Values {
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    UInt16(ArrayD<u16>),
    UInt32(ArrayD<u32>),
    UInt64(ArrayD<u64>),
    Int8(ArrayD<i8>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    Byte(ArrayD<u8>),
}

macro_rules! map_values {
    ($values:expr, $a:ident => $e:expr) => {
        match $values {
            Values::Float32($a) => $e,
            Values::Float64($a) => $e,
            Values::UInt16($a) => $e,
            Values::UInt32($a) => $e,
            Values::UInt64($a) => $e,
            Values::Int8($a) => $e,
            Values::Int16($a) => $e,
            Values::Int32($a) => $e,
            Values::Int64($a) => $e,
            Values::Byte($a) => $e,
        }
    };
}

impl Values {
    pub fn vartype(&self) -> VarType {
        match self {
            Values::Float32(_) => VarType::Float32,
            Values::Float64(_) => VarType::Float64,
            Values::UInt16(_) => VarType::UInt16,
            Values::UInt32(_) => VarType::UInt32,
            Values::UInt64(_) => VarType::UInt64,
            Values::Int8(_) => VarType::Int8,
            Values::Int16(_) => VarType::Int16,
            Values::Int32(_) => VarType::Int32,
            Values::Int64(_) => VarType::Int64,
            Values::Byte(_) => VarType::Byte,
        }
    }

    /// Shape of the selection the values were read from.
    pub fn shape(&self) -> &[usize] {
        map_values!(self, a => a.shape())
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        map_values!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write one element per line, in row-major order.
    pub fn write_flat<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        map_values!(self, a => {
            for v in a.iter() {
                writeln!(w, "{}", v)?;
            }
            Ok(())
        })
    }
}

/// Nested array formatting, innermost dimension last: `[[0, 1], [2, 3]]`.
fn write_nested<T: fmt::Display>(f: &mut fmt::Formatter<'_>, v: ArrayViewD<'_, T>) -> fmt::Result {
    match v.ndim() {
        0 => match v.iter().next() {
            Some(x) => write!(f, "{}", x),
            None => Ok(()),
        },
        1 => {
            write!(f, "[")?;
            for (i, x) in v.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", x)?;
            }
            write!(f, "]")
        }
        _ => {
            write!(f, "[")?;
            for (i, sub) in v.outer_iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_nested(f, sub)?;
            }
            write!(f, "]")
        }
    }
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        map_values!(self, a => write_nested(f, a.view()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr0, arr1, arr2};

    #[test]
    fn nested_scalar() {
        let v = Values::Float64(arr0(3.5).into_dyn());
        assert_eq!(v.to_string(), "3.5");
        assert_eq!(v.shape(), &[] as &[usize]);
    }

    #[test]
    fn nested_vector() {
        let v = Values::Int32(arr1(&[1, 2, 3]).into_dyn());
        assert_eq!(v.to_string(), "[1, 2, 3]");
    }

    #[test]
    fn nested_matrix() {
        let v = Values::Int32(arr2(&[[0, 1, 2], [3, 4, 5]]).into_dyn());
        assert_eq!(v.to_string(), "[[0, 1, 2], [3, 4, 5]]");
        assert_eq!(v.len(), 6);
        assert_eq!(v.vartype(), VarType::Int32);
    }

    #[test]
    fn flat() {
        let v = Values::Byte(arr2(&[[0, 1], [2, 3]]).into_dyn());
        let mut w = Vec::new();
        v.write_flat(&mut w).unwrap();
        assert_eq!(String::from_utf8(w).unwrap(), "0\n1\n2\n3\n");
    }

    #[test]
    fn vartype_sizes() {
        assert_eq!(VarType::Byte.size(), 1);
        assert_eq!(VarType::Int16.size(), 2);
        assert_eq!(VarType::Float32.size(), 4);
        assert_eq!(VarType::Float64.size(), 8);
        assert_eq!(VarType::Float64.to_string(), "Float64");
    }
}
