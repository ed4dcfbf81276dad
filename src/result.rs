use ndarray::Array1;

/// Paired dry and wet reflectance spectra from one simulation.
///
/// Both arrays are aligned to the wavelength grid of the input library.
/// Values are reflectance fractions and are not clamped to `[0, 1]` by
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SoilSpectra {
    pub rdry: Array1<f64>,
    pub rwet: Array1<f64>,
}

impl SoilSpectra {
    /// Number of wavelength samples in each spectrum.
    pub fn len(&self) -> usize {
        self.rdry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rdry.is_empty()
    }
}
