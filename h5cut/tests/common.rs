use std::path::PathBuf;

use hdf5::types::VarLenUnicode;
use ndarray::{arr0, arr1, ArrayD, IxDyn};

pub fn test_log() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("h5cut=debug,hslab=debug"),
    )
    .is_test(true)
    .try_init();
}

/// Deterministic element value of the displacement field fixture at `[i, j, k, l]`.
pub fn field_value(i: usize, j: usize, k: usize, l: usize) -> f64 {
    (i * 1000 + j * 100 + k * 10 + l) as f64
}

/// Write a fixture file with a 4-d displacement field, a 1-d integer dataset, a scalar, a
/// dataset of unsupported element type and a few attributes.
pub fn displacement_field(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("transform.h5");
    let file = hdf5::File::create(&path).unwrap();

    let field = ArrayD::from_shape_fn(IxDyn(&[4, 5, 6, 3]), |ix| {
        field_value(ix[0], ix[1], ix[2], ix[3])
    });
    let ds = file
        .new_dataset_builder()
        .with_data(&field)
        .create("DisplacementField")
        .unwrap();

    let attr = ds.new_attr::<f64>().create("spacing").unwrap();
    attr.write_scalar(&0.25).unwrap();

    let units: VarLenUnicode = "micrometer".parse().unwrap();
    let attr = ds.new_attr::<VarLenUnicode>().create("units").unwrap();
    attr.write_scalar(&units).unwrap();

    file.new_dataset_builder()
        .with_data(&arr1(&[0i32, 10, 20, 30, 40]))
        .create("Levels")
        .unwrap();

    file.new_dataset_builder()
        .with_data(&arr0(7.5))
        .create("Origin")
        .unwrap();

    file.new_dataset_builder()
        .with_data(&arr1(&[true, false, true]))
        .create("Flags")
        .unwrap();

    let attr = file.new_attr::<i32>().create("version").unwrap();
    attr.write_scalar(&2).unwrap();

    path
}
