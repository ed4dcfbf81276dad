//! BSM - Brightness-Shape-Moisture soil spectral reflectance model.
//!
//! Computes modeled dry and moisture-adjusted soil reflectance spectra from a
//! small set of physical and geometric parameters, given three reference
//! spectral tables: the GSV dry-soil basis, the refractive index of water and
//! the absorption coefficient of water. The model is deterministic, stateless
//! and side-effect free; the same inputs always reproduce the same spectra.
//!
//! The pipeline has two stages:
//! - [`drysoil`]: synthesis of a dry spectrum as a brightness/orientation
//!   weighted combination of the GSV basis vectors.
//! - [`wetness`]: conversion of the dry spectrum into a wet spectrum via a
//!   Poisson-weighted sum over internal-reflection orders in a surface water
//!   film, built on the average Fresnel transmittances of [`fresnel`].
//!
//! The numeric model consumes pre-loaded arrays only; table loading
//! ([`library`]), configuration ([`settings`]) and text export ([`output`])
//! live at the application boundary.

pub mod drysoil;
pub mod error;
pub mod fresnel;
pub mod library;
pub mod output;
pub mod params;
pub mod problem;
pub mod result;
pub mod settings;
pub mod sweep;
pub mod wetness;
