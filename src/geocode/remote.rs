//! Client for the hosted geocoding service.

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{GeocodeError, Provider};
use crate::config::{COUNTRY_PREFIX, GEOCODER_LANG, REGION_QUALIFIER};

/// Remote reverse-geocoding provider.
///
/// Issues a single GET per lookup against the service's `1.x` endpoint and
/// extracts a formatted address from the nested JSON body. Every fault,
/// from connection errors to an empty result set, comes back as
/// [`GeocodeError::ProviderNoResult`] so the resolver can continue down
/// the chain.
pub struct RemoteGeocoder {
    client: Client,
    base_url: Url,
}

impl RemoteGeocoder {
    /// Creates a geocoder against `base_url` (scheme and host only; the
    /// request path is fixed).
    pub fn new(client: Client, base_url: &str) -> Result<Self, url::ParseError> {
        Ok(RemoteGeocoder {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Looks up the formatted address for a coordinate pair.
    pub async fn lookup(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError> {
        let url = self.request_url(latitude, longitude);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| no_result(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(no_result(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let body: GeocoderResponse = response
            .json()
            .await
            .map_err(|e| no_result(format!("malformed response: {e}")))?;

        let address = extract_address(&body);
        if address.is_empty() {
            return Err(no_result("response contained no address".to_string()));
        }
        Ok(address)
    }

    fn request_url(&self, latitude: f64, longitude: f64) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("/1.x/");
        // The service expects longitude before latitude.
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("geocode", &format!("{longitude},{latitude}"))
            .append_pair("results", "1")
            .append_pair("lang", GEOCODER_LANG);
        url
    }
}

fn no_result(reason: String) -> GeocodeError {
    GeocodeError::ProviderNoResult {
        provider: Provider::Remote,
        reason,
    }
}

#[derive(Debug, Deserialize)]
struct GeocoderResponse {
    response: GeoObjectCollectionHolder,
}

#[derive(Debug, Deserialize)]
struct GeoObjectCollectionHolder {
    #[serde(rename = "GeoObjectCollection")]
    collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize, Default)]
struct GeoObjectCollection {
    #[serde(rename = "featureMember", default)]
    members: Vec<FeatureMember>,
}

#[derive(Debug, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    object: GeoObject,
}

#[derive(Debug, Deserialize, Default)]
struct GeoObject {
    #[serde(rename = "metaDataProperty")]
    meta: Option<MetaDataProperty>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct MetaDataProperty {
    #[serde(rename = "GeocoderMetaData")]
    geocoder: Option<GeocoderMetaData>,
}

#[derive(Debug, Deserialize)]
struct GeocoderMetaData {
    #[serde(default)]
    text: String,
}

/// Pulls the best address out of the first feature member: the formatted
/// text when present, otherwise a "description, name" concatenation.
fn extract_address(body: &GeocoderResponse) -> String {
    let Some(member) = body.response.collection.members.first() else {
        return String::new();
    };
    let object = &member.object;

    let formatted = object
        .meta
        .as_ref()
        .and_then(|m| m.geocoder.as_ref())
        .map(|g| g.text.as_str())
        .unwrap_or("");
    if !formatted.is_empty() {
        return tidy_address(formatted);
    }

    match (object.name.is_empty(), object.description.is_empty()) {
        (false, false) => format!("{}, {}", object.description, object.name),
        (false, true) => object.name.clone(),
        (true, false) => object.description.clone(),
        (true, true) => String::new(),
    }
}

/// Strips the country prefix and the regional qualifier for readability.
fn tidy_address(formatted: &str) -> String {
    let trimmed = formatted.strip_prefix(COUNTRY_PREFIX).unwrap_or(formatted);
    trimmed.replace(REGION_QUALIFIER, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_from(json: serde_json::Value) -> GeocoderResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn request_url_puts_longitude_first() {
        let geocoder =
            RemoteGeocoder::new(Client::new(), "https://geocode.example.com").unwrap();
        let url = geocoder.request_url(51.724124, 36.191233);
        assert_eq!(url.path(), "/1.x/");
        let query = url.query().unwrap();
        assert!(query.contains("geocode=36.191233%2C51.724124") || query.contains("geocode=36.191233,51.724124"));
        assert!(query.contains("format=json"));
        assert!(query.contains("results=1"));
        assert!(query.contains("lang=ru_RU"));
    }

    #[test]
    fn formatted_text_loses_country_and_region_prefixes() {
        assert_eq!(
            tidy_address("Россия, Курская область, ул. Ленина, 5"),
            "ул. Ленина, 5"
        );
        assert_eq!(tidy_address("Россия, Москва, Тверская, 1"), "Москва, Тверская, 1");
        assert_eq!(tidy_address("ул. Садовая, 3"), "ул. Садовая, 3");
    }

    #[test]
    fn formatted_text_is_preferred_over_name() {
        let body = body_from(serde_json::json!({
            "response": {"GeoObjectCollection": {"featureMember": [{"GeoObject": {
                "metaDataProperty": {"GeocoderMetaData": {"text": "Россия, Курская область, ул. Ленина, 5"}},
                "name": "ул. Ленина, 5",
                "description": "Курск"
            }}]}}
        }));
        assert_eq!(extract_address(&body), "ул. Ленина, 5");
    }

    #[test]
    fn missing_formatted_text_falls_back_to_description_and_name() {
        let body = body_from(serde_json::json!({
            "response": {"GeoObjectCollection": {"featureMember": [{"GeoObject": {
                "name": "ул. Ленина, 5",
                "description": "Курск"
            }}]}}
        }));
        assert_eq!(extract_address(&body), "Курск, ул. Ленина, 5");
    }

    #[test]
    fn name_alone_is_used_when_description_is_absent() {
        let body = body_from(serde_json::json!({
            "response": {"GeoObjectCollection": {"featureMember": [{"GeoObject": {
                "name": "ул. Ленина, 5"
            }}]}}
        }));
        assert_eq!(extract_address(&body), "ул. Ленина, 5");
    }

    #[test]
    fn empty_feature_members_yield_no_address() {
        let body = body_from(serde_json::json!({
            "response": {"GeoObjectCollection": {"featureMember": []}}
        }));
        assert_eq!(extract_address(&body), "");
    }
}
