//! Soil moisture transform of a dry reflectance spectrum.
//!
//! This module converts a dry-soil reflectance spectrum into a wet-soil
//! spectrum by modelling the surface water as a thin film on a rough
//! dielectric interface. A surface element carries a discrete number of
//! effective water layers; that number is Poisson distributed with a mean set
//! by the volumetric moisture. For each layer count the reflectance follows
//! from a geometric-series closed form over the infinitely many internal
//! bounces inside the film, and the final spectrum is the Poisson-weighted
//! mixture of all layer counts.
//!
//! The moisture transform provides:
//! - The dry/wet boundary as a defined early exit, not an error
//! - Average-transmittance baselines from the [`crate::fresnel`] module
//! - Beer-Lambert attenuation through multiple water-film passes
//! - Poisson weighting over a fixed number of internal-reflection orders

use ndarray::Array1;

use crate::fresnel;

/// Internal-reflection orders retained in the Poisson-weighted sum (k = 0..=6).
///
/// Truncating at order 6 discards the residual Poisson tail mass
/// `1 - sum_{k=0}^{6} pmf(k; mu)`, which stays below 0.5% for `mu <= 2`
/// (moisture up to `5 + 2 SMC` percent). This is a deliberate
/// accuracy/performance tradeoff of the model, not a free parameter.
pub const WATER_FILM_ORDERS: usize = 7;

/// Volumetric moisture percentage at and below which soil is treated as dry.
pub const DRY_MOISTURE_POINT: f64 = 5.0;

/// Cone half-angle (degrees) for diffuse, hemispherical illumination.
pub const DIFFUSE_CONE_ANGLE: f64 = 90.0;

/// Cone half-angle (degrees) approximating direct illumination of the film.
pub const DIRECT_CONE_ANGLE: f64 = 40.0;

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const TOL: f64 = 1e-12;

    #[test]
    fn poisson_pmf_reference_values() {
        let expected = [
            0.5488116360940264,
            0.32928698165641584,
            0.09878609449692474,
            0.019757218899384945,
            0.0029635828349077425,
            0.00035562994018892904,
            3.55629940188929e-5,
        ];
        for (k, e) in expected.iter().enumerate() {
            assert!((poisson_pmf(k, 0.6) - e).abs() < TOL, "k: {}", k);
        }
    }

    #[test]
    fn poisson_mass_is_nearly_unity() {
        for mu in [0.1, 0.6, 1.0, 2.0] {
            let mass: f64 = (0..WATER_FILM_ORDERS).map(|k| poisson_pmf(k, mu)).sum();
            assert!(mass <= 1.0 + TOL);
            assert!(mass > 0.995, "mu: {}, mass: {}", mu, mass);
        }
    }

    #[test]
    fn dry_condition_returns_input() {
        let rdry = array![0.2, 0.3];
        let nw = array![1.33, 1.32];
        let kw = array![0.01, 0.02];
        for smp in [0.0, 2.5, 5.0] {
            let rwet = wetten(&rdry, &nw, &kw, smp, 25.0, 0.015);
            assert_eq!(rwet, rdry);
        }
    }

    #[test]
    fn single_wavelength_reference() {
        let rdry = array![0.2573205080756888];
        let nw = array![1.33];
        let kw = array![0.02];
        let rwet = wetten(&rdry, &nw, &kw, 30.0, 25.0, 0.015);
        assert!((rwet[0] - 0.19710294680444326).abs() < TOL, "rwet: {}", rwet[0]);
    }

    #[test]
    fn continuous_at_dry_point() {
        // As mu -> 0+ the zero-layer weight dominates and the wet spectrum
        // approaches the dry one, matching the early-exit branch.
        let rdry = array![0.25, 0.1];
        let nw = array![1.33, 1.31];
        let kw = array![0.02, 0.4];
        let rwet = wetten(&rdry, &nw, &kw, DRY_MOISTURE_POINT + 1e-7, 25.0, 0.015);
        for (w, d) in rwet.iter().zip(rdry.iter()) {
            assert!((w - d).abs() < 1e-7);
        }
    }
}

/// Poisson probability mass for `k` effective water layers at mean `mu`.
///
/// Only evaluated for `k < WATER_FILM_ORDERS`, so the factorial is a small
/// lookup table.
fn poisson_pmf(k: usize, mu: f64) -> f64 {
    const FACTORIAL: [f64; WATER_FILM_ORDERS] = [1.0, 1.0, 2.0, 6.0, 24.0, 120.0, 720.0];
    (-mu).exp() * mu.powi(k as i32) / FACTORIAL[k]
}

/// Applies the moisture transform to a dry reflectance spectrum.
///
/// **Context**: Wet soil darkens because light entering the surface water
/// film is partially trapped by internal reflection and attenuated by
/// absorption before it can escape. The strength of the effect depends on the
/// moisture `smp` relative to the soil moisture capacity `smc` and on the
/// effective film thickness `film`.
///
/// **How it Works**: The mean layer count is `mu = (smp - 5) / smc`; at or
/// below the dry point the input is returned unchanged. Otherwise the
/// internally-reflected fraction `rbac`, the internal reflection probability
/// `p` at the water/air boundary and the single-bounce film reflectance `rw`
/// are derived from average Fresnel transmittances, and for each order
/// `k = 1..7` the film reflectance follows from the geometric-series closed
/// form with `k`-pass Beer-Lambert attenuation. The result is the
/// Poisson-weighted mixture over all orders, with order 0 contributing the
/// plain dry spectrum.
///
/// All operations are elementwise over the wavelength dimension. Degenerate
/// denominators propagate NaN/Inf rather than panicking.
pub fn wetten(
    rdry: &Array1<f64>,
    nw: &Array1<f64>,
    kw: &Array1<f64>,
    smp: f64,
    smc: f64,
    film: f64,
) -> Array1<f64> {
    let mu = (smp - DRY_MOISTURE_POINT) / smc;
    if mu <= 0.0 {
        return rdry.clone();
    }

    let tav_2 = fresnel::tav(DIFFUSE_CONE_ANGLE, 2.0);
    let tav_n = nw.mapv(|n| fresnel::tav(DIFFUSE_CONE_ANGLE, 2.0 / n));

    // Fraction of light returned to the surface after one internal bounce.
    let rbac = 1.0 - (1.0 - rdry) * (rdry * &tav_n / tav_2 + 1.0 - rdry);

    let p = 1.0 - nw.mapv(|n| fresnel::tav(DIFFUSE_CONE_ANGLE, n) / (n * n));
    let rw = 1.0 - fresnel::tav_spectrum(DIRECT_CONE_ANGLE, nw);

    let mut rwet = rdry * poisson_pmf(0, mu);
    for k in 1..WATER_FILM_ORDERS {
        // Transmittance through k passes of the water film.
        let tw = kw.mapv(|kw| (-2.0 * kw * film * k as f64).exp());
        let denom = 1.0 - &p * &tw * &rbac;
        let rwet_k = (1.0 - &rw) * (1.0 - &p) * &tw * &rbac / denom + &rw;
        rwet = rwet + rwet_k * poisson_pmf(k, mu);
    }
    rwet
}
