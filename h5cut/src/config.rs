use std::env;
use std::path::PathBuf;

use getopts::Options;
use serde::Deserialize;

use crate::hdf5::Access;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub access: Access,
    pub format: Format,

    #[serde(skip)]
    pub list: bool,
    #[serde(skip)]
    pub attributes: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Nested,
    Flat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            access: Access::ReadOnly,
            format: Format::Nested,
            list: false,
            attributes: false,
        }
    }
}

/// Load the configuration file and apply command line arguments on top of it. Returns the
/// configuration and the free arguments: the HDF5 file followed by any selections.
pub fn load_config_with_args() -> anyhow::Result<(Config, Vec<String>)> {
    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt(
        "c",
        "config",
        "configuration file (default: ./h5cut.toml)",
        "FILE",
    );
    opts.optflag("l", "list", "list datasets and exit");
    opts.optflag("a", "attributes", "include attributes");
    opts.optopt(
        "f",
        "format",
        "output format: nested or flat (default: nested)",
        "FMT",
    );
    opts.optflag("w", "writable", "open the file read-write");
    opts.optflag("h", "help", "print this help");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => return Err(anyhow!("{}", f)),
    };

    if matches.opt_present("h") {
        let brief = format!("Usage: {} [options] FILE [selection..]", program);
        print!("{}", opts.usage(&brief));
        println!(
            r#"
A selection is a dataset name followed by an optional hyperslab with one
slice per dimension, e.g.:

    DisplacementField[0:2][3][2][1]

Slices are written [i] for a single index, [a:b] for the inclusive range
a..b and [a:s:b] for the range a..b with stride s. Dimensions left out are
read in full. Without any selection the datasets are listed."#
        );
        return Err(anyhow!("argument help"));
    }

    let mut config = if let Some(f) = matches.opt_get::<PathBuf>("config")? {
        info!("reading configuration from: {:?}", f);
        let config = std::fs::read_to_string(f)?;
        toml::from_str(&config)?
    } else if std::fs::metadata("./h5cut.toml").is_ok() {
        info!("reading configuration from default: ./h5cut.toml");
        let config = std::fs::read_to_string("./h5cut.toml")?;
        toml::from_str(&config)?
    } else {
        debug!("using default configuration");
        Config::default()
    };

    // Override configuration options with arguments
    if matches.opt_present("w") {
        config.access = Access::ReadWrite;
    }

    if let Some(f) = matches.opt_get::<String>("format")? {
        config.format = match f.as_str() {
            "nested" => Format::Nested,
            "flat" => Format::Flat,
            _ => return Err(anyhow!("unknown format: {}", f)),
        };
    }

    config.list = matches.opt_present("l");
    config.attributes = matches.opt_present("a");

    Ok((config, matches.free))
}
