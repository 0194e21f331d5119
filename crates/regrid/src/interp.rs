//! Scattered-point linear interpolation.
//!
//! Source columns are triangulated once (Delaunay, in lon/lat degrees) and
//! every target point takes the barycentric average of the three vertices
//! of the triangle containing it. Targets outside the convex hull of the
//! source points get NaN.

use spade::{DelaunayTriangulation, HasPosition, Point2, Triangulation};
use tracing::{debug, warn};

use crate::error::RegridError;
use crate::grid::LatLonGrid;

#[derive(Debug, Clone, Copy)]
struct Node {
    lon: f64,
    lat: f64,
    /// Index into the caller's value slice.
    index: usize,
}

impl HasPosition for Node {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        Point2::new(self.lon, self.lat)
    }
}

/// Piecewise-linear interpolator over a fixed set of scattered points.
pub struct ScatteredLinear {
    tri: DelaunayTriangulation<Node>,
    n_points: usize,
}

impl std::fmt::Debug for ScatteredLinear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScatteredLinear")
            .field("n_points", &self.n_points)
            .field("n_vertices", &self.tri.num_vertices())
            .field("n_triangles", &self.tri.num_inner_faces())
            .finish()
    }
}

impl ScatteredLinear {
    /// Triangulates the points `(lons[i], lats[i])`.
    ///
    /// Points with a non-finite coordinate are left out. When two points
    /// share a position the later one wins.
    ///
    /// # Errors
    ///
    /// Returns [`RegridError::LengthMismatch`] if the slices differ in length
    /// and [`RegridError::TooFewPoints`] if fewer than three points remain.
    pub fn new(lons: &[f64], lats: &[f64]) -> Result<Self, RegridError> {
        if lons.len() != lats.len() {
            return Err(RegridError::LengthMismatch {
                expected: lons.len(),
                got: lats.len(),
            });
        }

        let mut tri = DelaunayTriangulation::<Node>::new();
        let mut skipped = 0usize;
        for (index, (&lon, &lat)) in lons.iter().zip(lats).enumerate() {
            if !lon.is_finite() || !lat.is_finite() {
                skipped += 1;
                continue;
            }
            if tri.insert(Node { lon, lat, index }).is_err() {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!(skipped, "source points with unusable coordinates left out");
        }
        if tri.num_vertices() < 3 {
            return Err(RegridError::TooFewPoints {
                got: tri.num_vertices(),
            });
        }
        debug!(
            n_vertices = tri.num_vertices(),
            n_triangles = tri.num_inner_faces(),
            "built triangulation"
        );

        Ok(Self {
            tri,
            n_points: lons.len(),
        })
    }

    /// Number of source points, including any left out of the triangulation.
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Value at `(lon, lat)`, or NaN outside the convex hull.
    ///
    /// `values` is indexed like the coordinate slices given to
    /// [`new`](Self::new). No length check is done here.
    pub fn at(&self, values: &[f64], lon: f64, lat: f64) -> f64 {
        self.tri
            .barycentric()
            .interpolate(|v| values[v.data().index], Point2::new(lon, lat))
            .unwrap_or(f64::NAN)
    }

    /// Interpolates `values` onto every point of `grid`.
    ///
    /// Returns `n_lat * n_lon` values, row-major with latitude outermost.
    /// A NaN source value propagates to every target inside a triangle
    /// touching it.
    ///
    /// # Errors
    ///
    /// Returns [`RegridError::LengthMismatch`] if `values` does not have one
    /// entry per source point.
    pub fn interpolate(&self, values: &[f64], grid: &LatLonGrid) -> Result<Vec<f64>, RegridError> {
        if values.len() != self.n_points {
            return Err(RegridError::LengthMismatch {
                expected: self.n_points,
                got: values.len(),
            });
        }
        Ok(grid
            .points()
            .map(|(lon, lat)| self.at(values, lon, lat))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    /// Corners and centre of the unit square.
    fn square() -> (Vec<f64>, Vec<f64>) {
        (
            vec![0.0, 1.0, 0.0, 1.0, 0.5],
            vec![0.0, 0.0, 1.0, 1.0, 0.5],
        )
    }

    #[test]
    fn reproduces_planar_field() {
        let (lons, lats) = square();
        let f = |x: f64, y: f64| 2.0 * x - 3.0 * y + 1.0;
        let values: Vec<f64> = lons.iter().zip(&lats).map(|(&x, &y)| f(x, y)).collect();
        let interp = ScatteredLinear::new(&lons, &lats).unwrap();

        for (x, y) in [(0.25, 0.25), (0.9, 0.1), (0.5, 0.75), (0.0, 0.5), (1.0, 1.0)] {
            assert_relative_eq!(interp.at(&values, x, y), f(x, y), epsilon = 1e-12);
        }
    }

    #[test]
    fn exact_at_vertices() {
        let (lons, lats) = square();
        let values = vec![10.0, 20.0, 30.0, 40.0, 99.0];
        let interp = ScatteredLinear::new(&lons, &lats).unwrap();
        assert_relative_eq!(interp.at(&values, 0.5, 0.5), 99.0, epsilon = 1e-12);
        assert_relative_eq!(interp.at(&values, 1.0, 0.0), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn outside_hull_is_nan() {
        let (lons, lats) = square();
        let interp = ScatteredLinear::new(&lons, &lats).unwrap();
        let values = vec![1.0; 5];
        assert!(interp.at(&values, 1.5, 0.5).is_nan());
        assert!(interp.at(&values, -0.1, -0.1).is_nan());
    }

    #[test]
    fn nan_value_poisons_touching_triangles() {
        let (lons, lats) = square();
        let interp = ScatteredLinear::new(&lons, &lats).unwrap();
        // Centre is a vertex of every triangle.
        let values = vec![1.0, 1.0, 1.0, 1.0, f64::NAN];
        assert!(interp.at(&values, 0.2, 0.1).is_nan());
    }

    #[test]
    fn skips_nan_coordinates() {
        let lons = vec![0.0, 1.0, f64::NAN, 0.0];
        let lats = vec![0.0, 0.0, 5.0, 1.0];
        let interp = ScatteredLinear::new(&lons, &lats).unwrap();
        assert_eq!(interp.n_points(), 4);
        let values = vec![0.0, 1.0, 1.0e9, 0.0];
        assert_relative_eq!(interp.at(&values, 0.5, 0.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn too_few_points() {
        let err = ScatteredLinear::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap_err();
        assert!(matches!(err, RegridError::TooFewPoints { got: 2 }));
    }

    #[test]
    fn grid_output_length_and_order() {
        let (lons, lats) = square();
        let values: Vec<f64> = lons.iter().map(|x| x * 10.0).collect();
        let interp = ScatteredLinear::new(&lons, &lats).unwrap();
        let grid = LatLonGrid::new(0.0, 1.0, 0.0, 1.0, 0.5).unwrap();
        let out = interp.interpolate(&values, &grid).unwrap();
        assert_eq!(out.len(), 9);
        for (v, e) in out.iter().zip([0.0, 5.0, 10.0, 0.0, 5.0, 10.0, 0.0, 5.0, 10.0]) {
            assert_relative_eq!(*v, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_wrong_value_count() {
        let (lons, lats) = square();
        let interp = ScatteredLinear::new(&lons, &lats).unwrap();
        let grid = LatLonGrid::new(0.0, 1.0, 0.0, 1.0, 1.0).unwrap();
        assert!(matches!(
            interp.interpolate(&[1.0], &grid),
            Err(RegridError::LengthMismatch { expected: 5, got: 1 })
        ));
    }
}
