//! Dry-soil reflectance synthesis from the GSV basis.
//!
//! The Global Soil Vectors (GSV) basis spans the typical variation of dry
//! soil reflectance with three spectral direction-vectors. A dry spectrum is
//! parameterized by a brightness `B` and two spherical angles `lat`, `lon`
//! (degrees): the mixing weights are the Cartesian coordinates of the point
//! at radius `B` in that direction, so the whole family of dry soils maps to
//! a sphere in basis space.

use ndarray::{Array1, Array2};

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const TOL: f64 = 1e-12;

    #[test]
    fn weights_lie_on_sphere() {
        let [f1, f2, f3] = mixing_weights(0.5, 10.0, 100.0);
        assert!((f1 - 0.08682408883346517).abs() < TOL);
        assert!((f2 - 0.48492315519647705).abs() < TOL);
        assert!((f3 - -0.08550503583141716).abs() < TOL);
        let radius = (f1 * f1 + f2 * f2 + f3 * f3).sqrt();
        assert!((radius - 0.5).abs() < TOL);
    }

    #[test]
    fn polar_direction_selects_first_vector() {
        // lat = 90 puts all weight on the first basis vector.
        let gsv = array![[0.45, 0.10, 0.05]];
        let rdry = synthesize(1.0, 90.0, 0.0, &gsv);
        assert!((rdry[0] - 0.45).abs() < TOL);
    }

    #[test]
    fn linear_in_brightness() {
        let gsv = array![[0.40, 0.10, 0.05], [0.55, 0.12, 0.04]];
        let r1 = synthesize(0.3, 25.0, 45.0, &gsv);
        let r2 = synthesize(0.6, 25.0, 45.0, &gsv);
        for (a, b) in r1.iter().zip(r2.iter()) {
            assert!((2.0 * a - b).abs() < TOL);
        }
    }

    #[test]
    fn zero_brightness_is_zero() {
        let gsv = array![[0.40, 0.10, 0.05], [0.55, 0.12, 0.04]];
        for (lat, lon) in [(0.0, 0.0), (45.0, 120.0), (-30.0, 300.0)] {
            let rdry = synthesize(0.0, lat, lon, &gsv);
            assert!(rdry.iter().all(|&r| r.abs() < TOL));
        }
    }
}

/// Computes the three GSV mixing weights for a brightness and orientation.
///
/// The angles are given in degrees and converted before evaluation. The
/// returned weights satisfy `f1^2 + f2^2 + f3^2 = B^2`.
pub fn mixing_weights(b: f64, lat: f64, lon: f64) -> [f64; 3] {
    let lat = lat.to_radians();
    let lon = lon.to_radians();
    [
        b * lat.sin(),
        b * lat.cos() * lon.sin(),
        b * lat.cos() * lon.cos(),
    ]
}

/// Synthesizes a dry-soil reflectance spectrum from the GSV basis.
///
/// `gsv` holds one 3-component row per wavelength; the result is the
/// per-wavelength weighted sum of its columns. Always succeeds for finite
/// inputs and never mutates its arguments.
pub fn synthesize(b: f64, lat: f64, lon: f64, gsv: &Array2<f64>) -> Array1<f64> {
    let [f1, f2, f3] = mixing_weights(b, lat, lon);
    &gsv.column(0) * f1 + &gsv.column(1) * f2 + &gsv.column(2) * f3
}
