//! Regular latitude/longitude target grids.

use serde::{Deserialize, Serialize};

use crate::error::RegridError;

/// A regular grid with inclusive, evenly spaced axes.
#[derive(Debug, Clone, PartialEq)]
pub struct LatLonGrid {
    lats: Vec<f64>,
    lons: Vec<f64>,
    resolution: f64,
}

fn axis(start: f64, end: f64, res: f64, name: &str) -> Result<Vec<f64>, RegridError> {
    if !start.is_finite() || !end.is_finite() || end < start {
        return Err(RegridError::InvalidGrid {
            reason: format!("{name} bounds must be finite with start <= end, got {start}..{end}"),
        });
    }
    let n = ((end - start) / res).round() as usize + 1;
    Ok((0..n).map(|i| start + i as f64 * res).collect())
}

impl LatLonGrid {
    /// Builds a grid from inclusive bounds.
    ///
    /// Each axis has `round((end - start) / resolution) + 1` points, the
    /// `i`-th at `start + i * resolution`. Longitudes use whatever
    /// convention the source data uses (0..360 for CAM output).
    ///
    /// # Errors
    ///
    /// Returns [`RegridError::InvalidGrid`] for a non-positive resolution or
    /// inverted bounds.
    pub fn new(
        lat_start: f64,
        lat_end: f64,
        lon_start: f64,
        lon_end: f64,
        resolution: f64,
    ) -> Result<Self, RegridError> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(RegridError::InvalidGrid {
                reason: format!("resolution must be finite and > 0, got {resolution}"),
            });
        }
        Ok(Self {
            lats: axis(lat_start, lat_end, resolution, "latitude")?,
            lons: axis(lon_start, lon_end, resolution, "longitude")?,
            resolution,
        })
    }

    /// Latitudes, south to north.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitudes, west to east.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Grid spacing in degrees.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Number of points, `n_lat * n_lon`.
    pub fn len(&self) -> usize {
        self.lats.len() * self.lons.len()
    }

    /// Whether the grid has no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grid points as `(lon, lat)`, row-major with latitude outermost.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.lats
            .iter()
            .flat_map(move |&lat| self.lons.iter().map(move |&lon| (lon, lat)))
    }
}

/// Named target grids over the contiguous United States.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridPreset {
    /// 1 degree, for ne30 output.
    #[default]
    #[serde(rename = "conus-1deg")]
    Conus1Deg,
    /// 0.125 degree, for ne0CONUSne30x8 output.
    #[serde(rename = "conus-0125deg")]
    Conus0125Deg,
}

impl GridPreset {
    /// Resolution in degrees.
    pub fn resolution(self) -> f64 {
        match self {
            Self::Conus1Deg => 1.0,
            Self::Conus0125Deg => 0.125,
        }
    }

    /// Prefix prepended to the input filename on output.
    pub fn output_prefix(self) -> &'static str {
        match self {
            Self::Conus1Deg => "CONUSRegrid1_",
            Self::Conus0125Deg => "CONUSRegrid0125_",
        }
    }

    /// Builds the grid: latitude 0..70, longitude 210..310.
    pub fn grid(self) -> LatLonGrid {
        let res = self.resolution();
        let lats = (0..=(70.0 / res).round() as usize)
            .map(|i| i as f64 * res)
            .collect();
        let lons = (0..=(100.0 / res).round() as usize)
            .map(|i| 210.0 + i as f64 * res)
            .collect();
        LatLonGrid {
            lats,
            lons,
            resolution: res,
        }
    }
}

impl LatLonGrid {
    /// The 1 degree CONUS grid (71 x 101).
    pub fn conus_1deg() -> Self {
        GridPreset::Conus1Deg.grid()
    }

    /// The 0.125 degree CONUS grid (561 x 801).
    pub fn conus_0125deg() -> Self {
        GridPreset::Conus0125Deg.grid()
    }
}
