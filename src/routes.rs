//! Handoff links to the external map application.

use crate::place::Place;

/// Scheme URI opened when the external map application is installed.
const APP_URI_BASE: &str = "yandexmaps://maps.yandex.ru/";
/// Web fallback when it is not.
const WEB_URL_BASE: &str = "https://yandex.ru/maps/";

/// Driving-directions links for one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLinks {
    /// Deep link for the installed map application.
    pub app_uri: String,
    /// Equivalent web URL, used when the application is absent.
    pub web_url: String,
}

/// Builds the route request pair for `place`: destination-only (`~lat,lon`)
/// with automatic transport selection.
pub fn route_links(place: &Place) -> RouteLinks {
    let rtext = format!("~{},{}", place.latitude, place.longitude);
    RouteLinks {
        app_uri: format!("{APP_URI_BASE}?rtext={rtext}&rtt=auto"),
        web_url: format!("{WEB_URL_BASE}?rtext={rtext}&rtt=auto"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BUILTIN_PLACES;

    #[test]
    fn links_embed_destination_and_transport_mode() {
        let fortress = &BUILTIN_PLACES[0];
        let links = route_links(fortress);
        assert_eq!(
            links.app_uri,
            "yandexmaps://maps.yandex.ru/?rtext=~51.724124,36.191233&rtt=auto"
        );
        assert_eq!(
            links.web_url,
            "https://yandex.ru/maps/?rtext=~51.724124,36.191233&rtt=auto"
        );
    }
}
