/// Hyperslabs
///
/// Slice expressions for ranges can consist of:
/// - single values:            [1]     -> [1]
/// - a range:                  [1:5]   -> [1, 2, 3, 4, 5]
/// - a range with strides:     [1:2:7] -> [1, 3, 5, 7]
///                             [1:2:8] -> [1, 3, 5, 7]
use itertools::Itertools;

/// A slice of a single dimension: start offset, stride and number of elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slab {
    pub start: usize,
    pub stride: usize,
    pub count: usize,
}

impl Slab {
    pub fn new(start: usize, stride: usize, count: usize) -> Slab {
        Slab {
            start,
            stride,
            count,
        }
    }

    /// A single index.
    pub fn index(i: usize) -> Slab {
        Slab::new(i, 1, 1)
    }

    /// The full extent of a dimension of length `len`.
    pub fn full(len: usize) -> Slab {
        Slab::new(0, 1, len)
    }

    /// Index of the last element included in the slab.
    pub fn end(&self) -> usize {
        self.start + self.stride * (self.count - 1)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Number of elements selected in each dimension.
pub fn counts(slab: &[Slab]) -> Vec<usize> {
    slab.iter().map(|s| s.count).collect()
}

/// Total number of elements selected by the hyperslab.
pub fn len(slab: &[Slab]) -> usize {
    slab.iter().map(|s| s.count).product()
}

fn parse_slice(s: &str) -> anyhow::Result<Slab> {
    let v = s
        .split(':')
        .map(|h| h.parse::<usize>())
        .collect::<Result<Vec<usize>, _>>()
        .map_err(|_| anyhow!("Failed to parse index"))?;

    match v.len() {
        1 => Ok(Slab::index(v[0])),
        2 if v[1] >= v[0] => Ok(Slab::new(v[0], 1, v[1] - v[0] + 1)),
        3 if v[1] > 0 && v[2] >= v[0] => Ok(Slab::new(v[0], v[1], (v[2] - v[0]) / v[1] + 1)),
        l if l <= 3 => Err(anyhow!("Invalid range: {}", s)),
        _ => Err(anyhow!("Too many values to unpack.")),
    }
}

pub fn parse_hyperslab(s: &str) -> anyhow::Result<Vec<Slab>> {
    if s.len() < 3 || !s.starts_with('[') || !s.ends_with(']') {
        return Err(anyhow!("Hyperslab missing brackets"));
    }

    s.split(']')
        .filter(|slab| !slab.is_empty())
        .map(|slab| {
            if slab.starts_with('[') {
                parse_slice(&slab[1..])
            } else {
                Err(anyhow!("Missing start bracket"))
            }
        })
        .collect()
}

/// Extends a hyperslab with the full extent of any missing dimensions and checks it against the
/// shape of the variable.
pub fn resolve(slab: Option<&[Slab]>, shape: &[usize]) -> anyhow::Result<Vec<Slab>> {
    use itertools::EitherOrBoth::*;

    slab.unwrap_or(&[])
        .iter()
        .zip_longest(shape.iter())
        .map(|e| match e {
            Left(_) => Err(anyhow!("More slices than dimensions")),
            Both(s, &dim) => {
                if s.start >= dim {
                    Err(anyhow!("Index out of range: {} >= {}", s.start, dim))
                } else if s.end() >= dim {
                    Err(anyhow!("Count greater than dimension shape"))
                } else {
                    Ok(s.clone())
                }
            }
            Right(&dim) => Ok(Slab::full(dim)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyperslab() {
        assert_eq!(parse_hyperslab("[0:30]").unwrap(), [Slab::new(0, 1, 31)]);
    }

    #[test]
    fn test_stride() {
        assert_eq!(parse_hyperslab("[0:2:30]").unwrap(), [Slab::new(0, 2, 16)]);
    }

    #[test]
    fn stride_off_boundary() {
        // the element at the end of the range is only included when it lies on the stride
        assert_eq!(parse_hyperslab("[1:2:7]").unwrap(), [Slab::new(1, 2, 4)]);
        assert_eq!(parse_hyperslab("[1:2:8]").unwrap(), [Slab::new(1, 2, 4)]);
    }

    #[test]
    fn too_many_values() {
        assert!(parse_hyperslab("[0:3:4:40]").is_err());
    }

    #[test]
    fn too_wrong_indx() {
        assert!(parse_hyperslab("[0:a:40]").is_err());
    }

    #[test]
    fn zero_stride() {
        assert!(parse_hyperslab("[0:0:40]").is_err());
    }

    #[test]
    fn reversed_range() {
        assert!(parse_hyperslab("[5:2]").is_err());
    }

    #[test]
    fn test_multidim() {
        assert_eq!(
            parse_hyperslab("[0][1]").unwrap(),
            [Slab::index(0), Slab::index(1)]
        );
    }

    #[test]
    fn test_multidim_slice() {
        assert_eq!(
            parse_hyperslab("[0:30][1][0:1200]").unwrap(),
            vec!(Slab::new(0, 1, 31), Slab::index(1), Slab::new(0, 1, 1201))
        );
    }

    #[test]
    fn slab_end() {
        assert_eq!(Slab::new(0, 3, 2).end(), 3);
        assert_eq!(Slab::index(4).end(), 4);
        assert_eq!(Slab::full(10).end(), 9);
    }

    #[test]
    fn resolve_full() {
        assert_eq!(
            resolve(None, &[4, 5, 6]).unwrap(),
            vec![Slab::full(4), Slab::full(5), Slab::full(6)]
        );
    }

    #[test]
    fn resolve_extends_missing_dimensions() {
        let slab = parse_hyperslab("[1]").unwrap();
        assert_eq!(
            resolve(Some(&slab), &[4, 5, 6]).unwrap(),
            vec![Slab::index(1), Slab::full(5), Slab::full(6)]
        );
    }

    #[test]
    fn resolve_too_many_dimensions() {
        let slab = parse_hyperslab("[0][0][0]").unwrap();
        assert!(resolve(Some(&slab), &[4, 5]).is_err());
    }

    #[test]
    fn resolve_out_of_range() {
        let slab = parse_hyperslab("[4]").unwrap();
        assert!(resolve(Some(&slab), &[4]).is_err());

        let slab = parse_hyperslab("[0:4]").unwrap();
        assert!(resolve(Some(&slab), &[4]).is_err());

        // stride reaches past the last element
        let slab = parse_hyperslab("[1:2:5]").unwrap();
        assert!(resolve(Some(&slab), &[5]).is_err());
    }

    #[test]
    fn resolve_scalar() {
        assert_eq!(resolve(None, &[]).unwrap(), vec![]);

        let slab = parse_hyperslab("[0]").unwrap();
        assert!(resolve(Some(&slab), &[]).is_err());
    }

    #[test]
    fn counts_and_len() {
        let slab = parse_hyperslab("[0:2][3][2][1]").unwrap();
        assert_eq!(counts(&slab), [3, 1, 1, 1]);
        assert_eq!(len(&slab), 3);
    }
}
