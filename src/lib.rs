#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Fundamental physical constants and the singularity floor.
pub mod constants;
/// Shared mathematical primitives (vectors, positions, dimensionality).
pub mod math;
/// Charge values, distribution descriptors, and their discretization.
pub mod charges;
/// Field and potential evaluation by superposition.
pub mod fields;
/// Regular observation grids.
pub mod grid;
/// Editable charge configurations over a cached grid.
pub mod scene;
/// Export of sampled fields to CSV and VTK.
pub mod io;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
