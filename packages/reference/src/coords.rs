//! District name to map coordinate lookup.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::Coordinates;

/// Geographic centroid of India, used when a district is not in the table.
pub const COUNTRY_CENTROID: Coordinates = Coordinates::new(20.5937, 78.9629);

static EMBEDDED: LazyLock<LocationResolver> = LazyLock::new(|| {
    LocationResolver::from_toml(include_str!("../data/districts.toml"))
        .unwrap_or_else(|e| panic!("Failed to parse embedded district coordinates: {e}"))
});

#[derive(Deserialize)]
struct DistrictsFile {
    districts: BTreeMap<String, Coordinates>,
}

/// Resolves free-form district names to display coordinates.
///
/// Keys are stored lower-case. Queries are trimmed and lower-cased before
/// an exact lookup; anything that still misses resolves to
/// [`COUNTRY_CENTROID`].
#[derive(Debug, Clone)]
pub struct LocationResolver {
    table: BTreeMap<String, Coordinates>,
}

impl LocationResolver {
    /// Returns the resolver backed by the embedded `districts.toml`.
    ///
    /// # Panics
    ///
    /// Panics on first use if the embedded table is malformed (this is a
    /// compile-time guarantee since the table is embedded).
    #[must_use]
    pub fn embedded() -> &'static Self {
        &EMBEDDED
    }

    /// Parses a resolver from a TOML document with a `[districts]` table
    /// mapping names to `[latitude, longitude]`.
    ///
    /// # Errors
    ///
    /// Returns [`toml::de::Error`] if the document does not match that shape.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        let file: DistrictsFile = toml::de::from_str(source)?;
        let table = file
            .districts
            .into_iter()
            .map(|(name, coords)| (normalize(&name), coords))
            .collect();
        Ok(Self { table })
    }

    /// Looks up a district, returning `None` on a miss.
    #[must_use]
    pub fn lookup(&self, district: &str) -> Option<Coordinates> {
        self.table.get(&normalize(district)).copied()
    }

    /// Resolves a district to coordinates, falling back to
    /// [`COUNTRY_CENTROID`] for unknown names (including the empty string).
    #[must_use]
    pub fn resolve(&self, district: &str) -> Coordinates {
        self.lookup(district).unwrap_or_else(|| {
            log::trace!("No coordinates for district '{district}', using country centroid");
            COUNTRY_CENTROID
        })
    }

    /// Number of districts in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn normalize(district: &str) -> String {
    district.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_regardless_of_case_and_padding() {
        let resolver = LocationResolver::embedded();
        let padded = resolver.resolve("  PUNE  ");
        let plain = resolver.resolve("pune");
        assert_eq!(padded, plain);
        assert_eq!(plain, Coordinates::new(18.5204, 73.8567));
    }

    #[test]
    fn unknown_district_resolves_to_country_centroid() {
        let resolver = LocationResolver::embedded();
        assert_eq!(resolver.resolve("Nowhereville"), COUNTRY_CENTROID);
        assert_eq!(resolver.resolve(""), COUNTRY_CENTROID);
        assert_eq!(resolver.resolve("   "), COUNTRY_CENTROID);
        assert!(resolver.lookup("Nowhereville").is_none());
    }

    #[test]
    fn resolves_multi_word_districts() {
        let resolver = LocationResolver::embedded();
        assert_eq!(
            resolver.resolve("New Delhi"),
            Coordinates::new(28.6139, 77.2090)
        );
    }

    #[test]
    fn every_state_district_has_coordinates() {
        let resolver = LocationResolver::embedded();
        let directory = crate::StateDirectory::embedded();
        for state in directory.states() {
            for district in directory.districts(state) {
                assert!(
                    resolver.lookup(district).is_some(),
                    "missing coordinates for {district}, {state}"
                );
            }
        }
    }

    #[test]
    fn custom_table_keys_are_normalized() {
        let resolver = LocationResolver::from_toml(
            r#"
            [districts]
            " Kochi " = [9.9312, 76.2673]
            "#,
        )
        .unwrap();
        assert_eq!(resolver.len(), 1);
        assert_eq!(resolver.resolve("KOCHI"), Coordinates::new(9.9312, 76.2673));
    }

    #[test]
    fn rejects_malformed_table() {
        assert!(LocationResolver::from_toml("[districts]\npune = [1.0]").is_err());
    }
}
