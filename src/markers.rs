//! Map marker lifecycle management.
//!
//! [`MarkerManager`] keeps a one-to-one mapping between place identifiers
//! and live overlay handles on a [`MapSurface`], rebuilding it in full on
//! every refresh. Category icons are rasterized once and cached per tag.
//! Each marker owns a clone of its place, so a tap resolves to exactly the
//! place the marker was created for regardless of how many rebuilds have
//! happened since.

use std::collections::HashMap;

use log::debug;

use crate::config::MARKER_ICON_SIZE;
use crate::place::Place;

/// Handle to one rendered overlay on the surface.
pub type OverlayId = u64;

/// A coordinate pair on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// A rasterized marker icon.
///
/// Releasing drops the pixel buffer; releasing twice is a no-op.
#[derive(Debug)]
pub struct RasterIcon {
    width: u32,
    height: u32,
    pixels: Option<Vec<u8>>,
}

impl RasterIcon {
    /// Rasterizes the icon for a category tag: a solid disc tinted
    /// deterministically from the tag bytes.
    pub fn render(tag: &str, size: u32) -> Self {
        let mut hash: u32 = 2166136261;
        for byte in tag.bytes() {
            hash = (hash ^ u32::from(byte)).wrapping_mul(16777619);
        }
        let [red, green, blue, _] = hash.to_be_bytes();

        let radius = f64::from(size) / 2.0;
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = f64::from(x) + 0.5 - radius;
                let dy = f64::from(y) + 0.5 - radius;
                let alpha = if dx * dx + dy * dy <= radius * radius {
                    0xff
                } else {
                    0
                };
                pixels.extend_from_slice(&[red, green, blue, alpha]);
            }
        }

        RasterIcon {
            width: size,
            height: size,
            pixels: Some(pixels),
        }
    }

    /// Icon width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Icon height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The RGBA pixel buffer, absent after release.
    pub fn pixels(&self) -> Option<&[u8]> {
        self.pixels.as_deref()
    }

    /// Frees the pixel buffer. Safe to call more than once.
    pub fn release(&mut self) {
        self.pixels = None;
    }

    /// True once the pixel buffer has been freed.
    pub fn is_released(&self) -> bool {
        self.pixels.is_none()
    }
}

/// The rendering collaborator markers are placed on.
///
/// Implemented by the map SDK binding in the application; tests and the
/// CLI use recording implementations.
pub trait MapSurface {
    /// Places an overlay at `at` using `icon`, returning its handle.
    fn add_placemark(&mut self, at: GeoPoint, icon: &RasterIcon) -> OverlayId;
    /// Removes every overlay previously placed.
    fn clear(&mut self);
}

#[derive(Debug)]
struct Marker {
    overlay: OverlayId,
    place: Place,
}

/// Keeps the surface's overlays consistent with the place catalog.
pub struct MarkerManager<S: MapSurface> {
    surface: S,
    markers: HashMap<i64, Marker>,
    icons: HashMap<String, RasterIcon>,
    placing: bool,
}

impl<S: MapSurface> MarkerManager<S> {
    /// Creates a manager over `surface` with no markers placed.
    pub fn new(surface: S) -> Self {
        MarkerManager {
            surface,
            markers: HashMap::new(),
            icons: HashMap::new(),
            placing: false,
        }
    }

    /// Rebuilds all markers from `places`.
    ///
    /// This is a full rebuild, not an incremental diff: every existing
    /// overlay is dropped, then one marker is placed per place with
    /// non-zero coordinates. Acceptable at catalog sizes in the tens.
    pub fn refresh(&mut self, places: &[Place]) {
        self.surface.clear();
        self.markers.clear();

        for place in places.iter().filter(|p| p.has_coordinates()) {
            let icon = self
                .icons
                .entry(place.category.clone())
                .or_insert_with(|| RasterIcon::render(&place.category, MARKER_ICON_SIZE));
            let overlay = self.surface.add_placemark(
                GeoPoint {
                    latitude: place.latitude,
                    longitude: place.longitude,
                },
                icon,
            );
            self.markers.insert(
                place.id,
                Marker {
                    overlay,
                    place: place.clone(),
                },
            );
        }
        debug!("Placed {} markers", self.markers.len());
    }

    /// Resolves a tap on `overlay` to its place.
    ///
    /// Returns `None` for unknown overlays and while placement mode is
    /// active; the markers stay installed either way.
    pub fn tap(&self, overlay: OverlayId) -> Option<&Place> {
        if self.placing {
            return None;
        }
        self.markers
            .values()
            .find(|m| m.overlay == overlay)
            .map(|m| &m.place)
    }

    /// Enables or disables placement mode, which suppresses tap handling
    /// while the user drags the map to choose a new point.
    pub fn set_placing(&mut self, placing: bool) {
        self.placing = placing;
    }

    /// True while placement mode is active.
    pub fn is_placing(&self) -> bool {
        self.placing
    }

    /// The overlay handle currently representing `place_id`, if any.
    pub fn overlay_for(&self, place_id: i64) -> Option<OverlayId> {
        self.markers.get(&place_id).map(|m| m.overlay)
    }

    /// Number of markers currently placed.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Number of rasterized icons currently cached.
    pub fn icon_cache_size(&self) -> usize {
        self.icons.len()
    }

    /// Drops every overlay handle and releases every cached raster.
    /// Calling this more than once is harmless.
    pub fn release(&mut self) {
        self.surface.clear();
        self.markers.clear();
        for icon in self.icons.values_mut() {
            icon.release();
        }
        self.icons.clear();
    }
}

impl<S: MapSurface> Drop for MarkerManager<S> {
    fn drop(&mut self) {
        self.release();
    }
}
