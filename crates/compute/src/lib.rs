//! Drift detection between redundant sensors.
//!
//! Stages, in pipeline order:
//!
//! - [`filter`]: drop non-numeric series
//! - [`align`]: common time grid with time-weighted interpolation
//! - [`detect`]: CUSUM over standardized pairwise differences
//! - [`intervals`]: anomalous row runs to labeled intervals
//!
//! [`pipeline::SensorDriftAnalysis`] runs them end to end.

pub mod align;
pub mod applicability;
pub mod detect;
pub mod filter;
pub mod intervals;
pub mod pipeline;

pub use align::{align, AlignedMatrix, Alignment};
pub use applicability::{evaluate as evaluate_applicability, ApplicabilityReport, Unmet};
pub use detect::{Detection, OutlierDetector};
pub use pipeline::metrics::PipelineMetrics;
pub use pipeline::SensorDriftAnalysis;
