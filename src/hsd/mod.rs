//! High speed data (HSD) reduction pipeline.
//!
//! Turns one burst file's raw samples into one averaged row per oscillation
//! cycle. Stage order is fixed: center the stroke, build the time axis,
//! classify movement direction (dropping rows with no valid direction),
//! segment into cycles, keep only the wear track's central region, then
//! average per cycle and derive the coefficient of friction.
//!
//! Segmentation runs BEFORE the central-region filter: cycle boundaries
//! need the complete direction trace to stay continuous across the track.

pub mod aggregate;
pub mod cycles;
pub mod direction;
pub mod filter;
pub mod pipeline;
pub mod signal;

pub use cycles::CycleCounter;
pub use pipeline::process_burst;
