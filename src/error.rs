use thiserror::Error;

/// Failure kinds of the reflectance model.
///
/// Shape problems are detected up front, before any spectral arithmetic runs;
/// numerically degenerate transmittance inputs are not errors and propagate
/// as NaN/Inf through the output arrays instead.
#[derive(Debug, Error, PartialEq)]
pub enum BsmError {
    /// The three reference spectra and the wavelength grid disagree in length.
    #[error(
        "spectral library shape mismatch: {wavelength} wavelengths, \
         {gsv} GSV rows, {nw} refractive-index samples, {kw} absorption samples"
    )]
    ShapeMismatch {
        wavelength: usize,
        gsv: usize,
        nw: usize,
        kw: usize,
    },

    /// The GSV basis does not have exactly three columns per wavelength row.
    #[error("GSV basis must have exactly 3 columns, got {0}")]
    BasisShape(usize),

    /// A parameter that the model requires to be non-negative is negative.
    #[error("parameter {name} must be non-negative, got {value}")]
    NegativeParameter { name: &'static str, value: f64 },
}
