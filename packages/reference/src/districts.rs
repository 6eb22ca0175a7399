//! State to district membership.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

static EMBEDDED: LazyLock<StateDirectory> = LazyLock::new(|| {
    StateDirectory::from_toml(include_str!("../data/states.toml"))
        .unwrap_or_else(|e| panic!("Failed to parse embedded state directory: {e}"))
});

#[derive(Deserialize)]
struct StatesFile {
    states: BTreeMap<String, Vec<String>>,
}

/// The districts offered for each state, in curated display order.
#[derive(Debug, Clone)]
pub struct StateDirectory {
    states: BTreeMap<String, Vec<String>>,
}

impl StateDirectory {
    /// Returns the directory backed by the embedded `states.toml`.
    ///
    /// # Panics
    ///
    /// Panics on first use if the embedded table is malformed.
    #[must_use]
    pub fn embedded() -> &'static Self {
        &EMBEDDED
    }

    /// Parses a directory from a TOML document with a `[states]` table
    /// mapping state names to district lists.
    ///
    /// # Errors
    ///
    /// Returns [`toml::de::Error`] if the document does not match that shape.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        let file: StatesFile = toml::de::from_str(source)?;
        Ok(Self {
            states: file.states,
        })
    }

    /// All state names, sorted.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Districts for `state`, or an empty slice if the state is unknown.
    #[must_use]
    pub fn districts(&self, state: &str) -> &[String] {
        self.states.get(state).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `district` is one of `state`'s listed districts.
    #[must_use]
    pub fn contains(&self, state: &str, district: &str) -> bool {
        self.districts(state)
            .iter()
            .any(|d| d.eq_ignore_ascii_case(district.trim()))
    }
}
