//! Offline reverse geocoding over a bundled gazetteer.
//!
//! Stands in for a platform-provided geocoder: a fixed set of address
//! points queried nearest-first, answering with at most one candidate.

use super::{GeocodeError, Provider};
use crate::config::{GAZETTEER_MAX_DISTANCE_M, HOME_CITY};

/// One structured address point the gazetteer can answer with.
#[derive(Debug, Clone)]
pub struct GazetteerEntry {
    /// Street name, e.g. "ул. Ленина".
    pub street: Option<String>,
    /// House number on the street.
    pub house_number: Option<String>,
    /// Locality (city or settlement) the point lies in.
    pub locality: Option<String>,
    /// Single-line formatted address, used when no structured fields are
    /// present.
    pub formatted: String,
    /// Latitude of the address point.
    pub latitude: f64,
    /// Longitude of the address point.
    pub longitude: f64,
}

/// In-process reverse geocoder answering from a fixed set of address
/// points.
pub struct LocalGazetteer {
    entries: Vec<GazetteerEntry>,
    max_distance_m: f64,
}

impl LocalGazetteer {
    /// Creates a gazetteer over `entries` with the default distance cutoff.
    pub fn new(entries: Vec<GazetteerEntry>) -> Self {
        Self::with_max_distance(entries, GAZETTEER_MAX_DISTANCE_M)
    }

    /// Creates a gazetteer with an explicit distance cutoff in meters.
    pub fn with_max_distance(entries: Vec<GazetteerEntry>, max_distance_m: f64) -> Self {
        LocalGazetteer {
            entries,
            max_distance_m,
        }
    }

    /// Seeds the gazetteer with the built-in catalog's own address points.
    pub fn from_builtin_catalog() -> Self {
        let entries = crate::catalog::BUILTIN_PLACES
            .iter()
            .filter(|p| p.has_coordinates())
            .map(|p| {
                let (street, house_number) = split_address(&p.address);
                GazetteerEntry {
                    street,
                    house_number,
                    locality: Some(HOME_CITY.to_string()),
                    formatted: p.address.clone(),
                    latitude: p.latitude,
                    longitude: p.longitude,
                }
            })
            .collect();
        Self::new(entries)
    }

    /// Reverse-geocodes to at most one candidate within range.
    pub fn lookup(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError> {
        let nearest = self
            .entries
            .iter()
            .map(|e| (haversine_m(latitude, longitude, e.latitude, e.longitude), e))
            .filter(|(distance, _)| *distance <= self.max_distance_m)
            .min_by(|a, b| a.0.total_cmp(&b.0));

        let Some((_, entry)) = nearest else {
            return Err(no_result("no address points within range".to_string()));
        };

        let assembled = assemble_address(entry);
        if assembled.is_empty() {
            return Err(no_result(
                "candidate had no usable address fields".to_string(),
            ));
        }
        Ok(assembled)
    }
}

fn no_result(reason: String) -> GeocodeError {
    GeocodeError::ProviderNoResult {
        provider: Provider::Local,
        reason,
    }
}

/// Joins street, house number, and locality for display. The house number
/// rides with the street and the home city is suppressed unless it is the
/// only token available; entries with no structured fields fall back to
/// the formatted line.
fn assemble_address(entry: &GazetteerEntry) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(street) = &entry.street {
        match &entry.house_number {
            Some(house) => parts.push(format!("{street}, {house}")),
            None => parts.push(street.clone()),
        }
    }

    if let Some(locality) = &entry.locality {
        if locality != HOME_CITY || parts.is_empty() {
            parts.push(locality.clone());
        }
    }

    if parts.is_empty() {
        entry.formatted.clone()
    } else {
        parts.join(", ")
    }
}

/// Splits a single-line "street, house" address into components.
/// Addresses without a trailing house number come back as street only.
fn split_address(address: &str) -> (Option<String>, Option<String>) {
    let address = address.trim();
    if address.is_empty() {
        return (None, None);
    }
    match address.rsplit_once(',') {
        Some((street, house))
            if house
                .trim()
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit()) =>
        {
            (
                Some(street.trim().to_string()),
                Some(house.trim().to_string()),
            )
        }
        _ => (Some(address.to_string()), None),
    }
}

/// Great-circle distance between two coordinates, in meters.
fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_M: f64 = 6_371_000.0;

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        street: Option<&str>,
        house: Option<&str>,
        locality: Option<&str>,
        formatted: &str,
    ) -> GazetteerEntry {
        GazetteerEntry {
            street: street.map(String::from),
            house_number: house.map(String::from),
            locality: locality.map(String::from),
            formatted: formatted.to_string(),
            latitude: 51.73,
            longitude: 36.19,
        }
    }

    #[test]
    fn house_number_rides_with_the_street() {
        let assembled = assemble_address(&entry(
            Some("ул. Ленина"),
            Some("5"),
            Some("Курск"),
            "",
        ));
        assert_eq!(assembled, "ул. Ленина, 5");
    }

    #[test]
    fn street_without_house_number_stands_alone() {
        let assembled = assemble_address(&entry(
            Some("улица Радищева"),
            None,
            Some("Курск"),
            "",
        ));
        assert_eq!(assembled, "улица Радищева");
    }

    #[test]
    fn foreign_locality_is_kept() {
        let assembled = assemble_address(&entry(
            Some("ул. Мира"),
            Some("12"),
            Some("Железногорск"),
            "",
        ));
        assert_eq!(assembled, "ул. Мира, 12, Железногорск");
    }

    #[test]
    fn home_city_survives_when_it_is_the_only_token() {
        let assembled = assemble_address(&entry(None, None, Some("Курск"), ""));
        assert_eq!(assembled, "Курск");
    }

    #[test]
    fn formatted_line_is_the_last_resort() {
        let assembled = assemble_address(&entry(None, None, None, "Курск, ул. Сонина, 1"));
        assert_eq!(assembled, "Курск, ул. Сонина, 1");
    }

    #[test]
    fn split_address_peels_a_trailing_house_number() {
        assert_eq!(
            split_address("ул. Сонина, 1"),
            (Some("ул. Сонина".to_string()), Some("1".to_string()))
        );
        assert_eq!(
            split_address("улица Радищева"),
            (Some("улица Радищева".to_string()), None)
        );
        // A comma not followed by a number is part of the street text.
        assert_eq!(
            split_address("Курская область, муниципальное образование Поныри"),
            (
                Some("Курская область, муниципальное образование Поныри".to_string()),
                None
            )
        );
    }

    #[test]
    fn lookup_returns_the_nearest_entry_within_range() {
        let near = GazetteerEntry {
            latitude: 51.7300,
            longitude: 36.1900,
            ..entry(Some("ул. Ближняя"), Some("1"), None, "")
        };
        let far = GazetteerEntry {
            latitude: 51.7340,
            longitude: 36.1900,
            ..entry(Some("ул. Дальняя"), Some("2"), None, "")
        };
        let gazetteer = LocalGazetteer::new(vec![far, near]);

        let address = gazetteer.lookup(51.7301, 36.1901).unwrap();
        assert_eq!(address, "ул. Ближняя, 1");
    }

    #[test]
    fn lookup_misses_outside_the_cutoff() {
        let gazetteer = LocalGazetteer::new(vec![entry(Some("ул. Ленина"), Some("5"), None, "")]);
        // Roughly 50 km away from the only entry.
        let err = gazetteer.lookup(51.3, 36.9).unwrap_err();
        assert!(matches!(
            err,
            GeocodeError::ProviderNoResult {
                provider: Provider::Local,
                ..
            }
        ));
    }

    #[test]
    fn haversine_is_sane_at_city_scale() {
        // Two points about 1.1 km apart in the city center.
        let d = haversine_m(51.7373, 36.1873, 51.7473, 36.1873);
        assert!((d - 1112.0).abs() < 20.0, "got {d}");
    }
}
