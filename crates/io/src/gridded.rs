//! Regular latitude/longitude datasets and their NetCDF writer.

use std::path::Path;

use tracing::info;

use crate::error::IoError;
use crate::unstructured::TimeAxis;

/// One variable on the `(time, lat, lon)` grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GriddedField {
    name: String,
    units: Option<String>,
    long_name: Option<String>,
    values: Vec<f64>,
}

impl GriddedField {
    /// Creates a field from row-major `(time, lat, lon)` values.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            units: None,
            long_name: None,
            values,
        }
    }

    /// Sets the `units` attribute.
    pub fn with_units(mut self, units: Option<impl Into<String>>) -> Self {
        self.units = units.map(Into::into);
        self
    }

    /// Sets the `long_name` attribute.
    pub fn with_long_name(mut self, long_name: Option<impl Into<String>>) -> Self {
        self.long_name = long_name.map(Into::into);
        self
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `units` attribute.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// The `long_name` attribute.
    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    /// Row-major `(time, lat, lon)` values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// A set of fields sharing one time axis and one regular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GriddedDataset {
    time: TimeAxis,
    lats: Vec<f64>,
    lons: Vec<f64>,
    fields: Vec<GriddedField>,
    description: Option<String>,
}

impl GriddedDataset {
    /// Creates an empty dataset on the given axes.
    pub fn new(time: TimeAxis, lats: Vec<f64>, lons: Vec<f64>) -> Self {
        Self {
            time,
            lats,
            lons,
            fields: Vec::new(),
            description: None,
        }
    }

    /// Sets the global `description` attribute.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a field, replacing any existing field of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if the field does not hold
    /// exactly `n_time * n_lat * n_lon` values.
    pub fn insert(&mut self, field: GriddedField) -> Result<(), IoError> {
        let expected = self.time.len() * self.lats.len() * self.lons.len();
        if field.values.len() != expected {
            return Err(IoError::DimensionMismatch {
                name: field.name.clone(),
                expected,
                got: field.values.len(),
            });
        }
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        Ok(())
    }

    /// The time axis.
    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    /// Latitude axis.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude axis.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// All fields in insertion order.
    pub fn fields(&self) -> &[GriddedField] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&GriddedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The global `description` attribute.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Write `dataset` to a new NetCDF file at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`IoError::Fs`] if the parent directory cannot be created and
/// [`IoError::Netcdf`] if file creation or any write fails.
pub fn write_gridded(path: &Path, dataset: &GriddedDataset) -> Result<(), IoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| IoError::Fs {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut file = netcdf::create(path)?;

    file.add_dimension("time", dataset.time.len())?;
    file.add_dimension("lat", dataset.lats.len())?;
    file.add_dimension("lon", dataset.lons.len())?;

    {
        let mut var = file.add_variable::<f64>("time", &["time"])?;
        if let Some(units) = dataset.time.units() {
            var.put_attribute("units", units)?;
        }
        if let Some(calendar) = dataset.time.calendar() {
            var.put_attribute("calendar", calendar)?;
        }
        if !dataset.time.is_empty() {
            var.put_values(dataset.time.values(), ..)?;
        }
    }
    {
        let mut var = file.add_variable::<f64>("lat", &["lat"])?;
        var.put_attribute("units", "degrees_north")?;
        var.put_attribute("long_name", "latitude")?;
        var.put_values(&dataset.lats, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("lon", &["lon"])?;
        var.put_attribute("units", "degrees_east")?;
        var.put_attribute("long_name", "longitude")?;
        var.put_values(&dataset.lons, ..)?;
    }

    for field in &dataset.fields {
        let mut var = file.add_variable::<f64>(&field.name, &["time", "lat", "lon"])?;
        var.put_attribute("_FillValue", f64::NAN)?;
        if let Some(units) = field.units() {
            var.put_attribute("units", units)?;
        }
        if let Some(long_name) = field.long_name() {
            var.put_attribute("long_name", long_name)?;
        }
        if !field.values.is_empty() {
            var.put_values(&field.values, ..)?;
        }
    }

    if let Some(description) = dataset.description() {
        file.add_attribute("description", description)?;
    }

    info!(
        path = %path.display(),
        n_fields = dataset.fields.len(),
        n_time = dataset.time.len(),
        n_lat = dataset.lats.len(),
        n_lon = dataset.lons.len(),
        "wrote gridded dataset"
    );
    Ok(())
}
