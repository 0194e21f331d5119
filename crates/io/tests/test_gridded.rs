//! Integration tests for the regular-grid writer.

use approx::assert_relative_eq;
use chemgrid_io::{GriddedDataset, GriddedField, TimeAxis, write_gridded};
use netcdf::AttributeValue;
use tempfile::tempdir;

fn string_attr(value: AttributeValue) -> String {
    match value {
        AttributeValue::Str(s) => s,
        other => panic!("expected string attribute, got {other:?}"),
    }
}

#[test]
fn writes_axes_fields_and_attributes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/CONUSRegrid1_h1.nc");

    let time = TimeAxis::new(
        vec![0.0, 0.5],
        Some("days since 2013-08-01 00:00:00".into()),
        Some("noleap".into()),
    );
    let mut ds = GriddedDataset::new(time, vec![0.0, 1.0], vec![210.0, 211.0, 212.0])
        .with_description("near surface estimated using linear interpolation");
    let values: Vec<f64> = (0..12).map(|i| i as f64 * 0.5).collect();
    ds.insert(
        GriddedField::new("O3", values.clone())
            .with_units(Some("mol/mol"))
            .with_long_name(Some("O3 concentration")),
    )
    .unwrap();
    let mut with_gap = vec![1.0; 12];
    with_gap[4] = f64::NAN;
    ds.insert(GriddedField::new("CO", with_gap)).unwrap();

    write_gridded(&path, &ds).unwrap();

    let file = netcdf::open(&path).unwrap();
    assert_eq!(file.dimension("time").unwrap().len(), 2);
    assert_eq!(file.dimension("lat").unwrap().len(), 2);
    assert_eq!(file.dimension("lon").unwrap().len(), 3);

    let o3 = file.variable("O3").unwrap();
    let read = o3.get_values::<f64, _>(..).unwrap();
    for (a, b) in read.iter().zip(&values) {
        assert_relative_eq!(*a, *b);
    }
    assert_eq!(string_attr(o3.attribute_value("units").unwrap().unwrap()), "mol/mol");
    assert_eq!(
        string_attr(o3.attribute_value("long_name").unwrap().unwrap()),
        "O3 concentration"
    );

    let co = file.variable("CO").unwrap().get_values::<f64, _>(..).unwrap();
    assert!(co[4].is_nan());
    assert_eq!(co[5], 1.0);

    let time = file.variable("time").unwrap();
    assert_eq!(
        string_attr(time.attribute_value("calendar").unwrap().unwrap()),
        "noleap"
    );

    let description = file.attribute("description").unwrap().value().unwrap();
    assert_eq!(
        string_attr(description),
        "near surface estimated using linear interpolation"
    );
}
