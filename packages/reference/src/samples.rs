//! Curated per-state demonstration scenarios.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use flood_workspace_scenario_models::Sample;
use serde::Deserialize;

/// State whose sample is loaded when the workspace starts or when a
/// sample is requested without naming a state.
pub const DEFAULT_SAMPLE_STATE: &str = "Maharashtra";

static EMBEDDED: LazyLock<SampleLibrary> = LazyLock::new(|| {
    SampleLibrary::from_toml(include_str!("../data/samples.toml"))
        .unwrap_or_else(|e| panic!("Failed to parse embedded sample library: {e}"))
});

#[derive(Deserialize)]
struct SamplesFile {
    samples: BTreeMap<String, Sample>,
}

/// Read-only map from state name to its curated [`Sample`].
///
/// A state without a sample is normal; [`Self::get`] returns `None`.
#[derive(Debug, Clone)]
pub struct SampleLibrary {
    samples: BTreeMap<String, Sample>,
}

impl SampleLibrary {
    /// Returns the library backed by the embedded `samples.toml`.
    ///
    /// # Panics
    ///
    /// Panics on first use if the embedded table is malformed.
    #[must_use]
    pub fn embedded() -> &'static Self {
        &EMBEDDED
    }

    /// Parses a library from a TOML document with one `[samples."<state>"]`
    /// table per state.
    ///
    /// # Errors
    ///
    /// Returns [`toml::de::Error`] if the document does not match that
    /// shape or names an unknown indicator.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        let file: SamplesFile = toml::de::from_str(source)?;
        Ok(Self {
            samples: file.samples,
        })
    }

    /// Returns the sample for `state`, if one is curated.
    #[must_use]
    pub fn get(&self, state: &str) -> Option<&Sample> {
        self.samples.get(state)
    }

    /// States that have a sample, sorted.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }
}
