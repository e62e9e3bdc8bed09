///! Selections consist of a list of variables and optional hyperslabs limiting the extent of
///! each variable. Variable names may be `/`-separated paths into groups.
use std::ops::Deref;

use crate::hyperslab::{self, Slab};

#[derive(Debug)]
pub struct Selection {
    variables: Vec<SelectedVariable>,
}

#[derive(Debug)]
pub struct SelectedVariable {
    pub name: String,
    pub slab: Option<Vec<Slab>>,
}

impl Deref for Selection {
    type Target = Vec<SelectedVariable>;

    fn deref(&self) -> &Self::Target {
        &self.variables
    }
}

impl Selection {
    pub fn parse(query: &str) -> anyhow::Result<Selection> {
        query
            .split(',')
            .map(|var| {
                match var.find('[') {
                    Some(i) => {
                        hyperslab::parse_hyperslab(&var[i..]).map(|slab| (&var[..i], Some(slab)))
                    }
                    None => Ok((var, None)),
                }
                .and_then(|(var, slab)| {
                    if var.is_empty() {
                        Err(anyhow!("Empty variable name"))
                    } else {
                        Ok(SelectedVariable {
                            name: var.to_string(),
                            slab,
                        })
                    }
                })
            })
            .collect::<anyhow::Result<_>>()
            .map(|variables| Selection { variables })
    }

    pub fn empty() -> Selection {
        Selection {
            variables: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert_eq!(Selection::empty().len(), 0);
    }

    #[test]
    fn single_variable() {
        let c = Selection::parse("SST").unwrap();

        assert_eq!(c.len(), 1);
        assert_eq!(c[0].name, "SST");
        assert!(c[0].slab.is_none());
    }

    #[test]
    fn single_variable_slab() {
        let c = Selection::parse("SST[0:5]").unwrap();

        assert_eq!(c.len(), 1);
        assert_eq!(c[0].name, "SST");
        assert_eq!(*c[0].slab.as_ref().unwrap(), vec![Slab::new(0, 1, 6)]);
    }

    #[test]
    fn grouped_variable_slab_indexes() {
        let c = Selection::parse("registration/DisplacementField[5][4]").unwrap();

        assert_eq!(c.len(), 1);
        assert_eq!(c[0].name, "registration/DisplacementField");
        assert_eq!(
            *c[0].slab.as_ref().unwrap(),
            vec![Slab::index(5), Slab::index(4)]
        );
    }

    #[test]
    fn multi_variable_slab_indexes() {
        let c = Selection::parse("DisplacementField[0:2][3][2][1],SST,TIME[4:5]").unwrap();

        assert_eq!(c.len(), 3);

        assert_eq!(c[0].name, "DisplacementField");
        assert_eq!(
            *c[0].slab.as_ref().unwrap(),
            vec![
                Slab::new(0, 1, 3),
                Slab::index(3),
                Slab::index(2),
                Slab::index(1)
            ]
        );

        assert_eq!(c[1].name, "SST");
        assert!(c[1].slab.is_none());

        assert_eq!(c[2].name, "TIME");
        assert_eq!(*c[2].slab.as_ref().unwrap(), vec![Slab::new(4, 1, 2)]);
    }

    #[test]
    fn erroneous_queries() {
        assert!(Selection::parse("SST[a]").is_err());
        assert!(Selection::parse("SST[1").is_err());
        assert!(Selection::parse("SST[1:3:4:5]").is_err());
        assert!(Selection::parse("[0]").is_err());
    }
}
