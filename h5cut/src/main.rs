use std::io::Write;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

use colored::Colorize;
use env_logger::Env;

use h5cut::config::{self, Config, Format};
use h5cut::hdf5::Hdf5File;
use hslab::Selection;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("h5cut=info")).init();

    let (config, mut free) = config::load_config_with_args()?;
    debug!("h5cut v{}, configuration: {:?}", VERSION, config);

    if free.is_empty() {
        return Err(anyhow!("no input file (try --help)"));
    }

    let path = free.remove(0);
    let hf = Hdf5File::open(&path, config.access)?;
    info!("{:?}", hf);

    if config.list || free.is_empty() {
        list(&hf, &config)?;
    } else {
        for query in &free {
            read(&hf, &config, query)?;
        }
    }

    hf.close();

    Ok(())
}

fn list(hf: &Hdf5File, config: &Config) -> anyhow::Result<()> {
    if config.attributes {
        for a in hf.global_attributes()? {
            if !a.is_ignored() {
                println!("{}", a);
            }
        }
    }

    for name in hf.datasets()? {
        match hf.dataset(&name) {
            Ok(ds) => {
                println!("{} {} {:?}", ds.vartype(), name.bold(), ds.shape());

                if config.attributes {
                    for a in ds.attributes()? {
                        if !a.is_ignored() {
                            println!("    {}", a);
                        }
                    }
                }

                ds.close();
            }
            Err(e) => warn!("{}: {}", name, e),
        }
    }

    Ok(())
}

fn read(hf: &Hdf5File, config: &Config, query: &str) -> anyhow::Result<()> {
    let selection = Selection::parse(query)?;

    for var in selection.iter() {
        let ds = hf.dataset(&var.name)?;

        if config.attributes {
            for a in ds.attributes()? {
                if !a.is_ignored() {
                    println!("{}", a);
                }
            }
        }

        let values = ds.read(var.slab.as_deref())?;

        match config.format {
            Format::Nested => println!("{} = {}", var.name.bold(), values),
            Format::Flat => {
                println!("{}:", var.name.bold());

                let stdout = std::io::stdout();
                let mut stdout = stdout.lock();
                values.write_flat(&mut stdout)?;
                stdout.flush()?;
            }
        }

        ds.close();
    }

    Ok(())
}
