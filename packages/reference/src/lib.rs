#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static reference data for the flood workspace.
//!
//! Three tables are defined as TOML files under `data/` and embedded at
//! compile time:
//!
//! - `districts.toml`: display coordinates per district, used by the
//!   [`LocationResolver`].
//! - `states.toml`: which districts belong to each state, exposed through
//!   the [`StateDirectory`].
//! - `samples.toml`: one curated scenario per state, served by the
//!   [`SampleLibrary`].
//!
//! All lookups are total: a miss is an expected outcome with a defined
//! fallback, never an error.

pub mod coords;
pub mod districts;
pub mod samples;

pub use coords::{COUNTRY_CENTROID, LocationResolver};
pub use districts::StateDirectory;
pub use samples::{DEFAULT_SAMPLE_STATE, SampleLibrary};

use serde::Deserialize;

/// A WGS84 latitude/longitude pair.
///
/// Deserializes from a two-element `[latitude, longitude]` array.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}
