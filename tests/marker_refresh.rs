//! Integration tests for marker lifecycle management.

mod helpers;

use std::collections::HashMap;

use helpers::sample_place_at;

use city_guide::{Category, GeoPoint, MapSurface, MarkerManager, OverlayId, Place, RasterIcon};

/// Records placemarks instead of drawing them. Overlay handles increase
/// monotonically across refreshes, so stale handles never collide with
/// live ones.
#[derive(Default)]
struct RecordingSurface {
    next_id: OverlayId,
    live: HashMap<OverlayId, GeoPoint>,
}

impl MapSurface for RecordingSurface {
    fn add_placemark(&mut self, at: GeoPoint, icon: &RasterIcon) -> OverlayId {
        assert!(!icon.is_released(), "placed a released icon");
        self.next_id += 1;
        self.live.insert(self.next_id, at);
        self.next_id
    }

    fn clear(&mut self) {
        self.live.clear();
    }
}

fn categorized(mut place: Place, category: Category) -> Place {
    place.category = category.tag().to_string();
    place
}

#[test]
fn refresh_skips_places_without_coordinates() {
    let places = vec![
        sample_place_at(1, "С координатами", 51.73, 36.19),
        sample_place_at(2, "Без координат", 0.0, 0.0),
        sample_place_at(3, "Тоже с координатами", 51.74, 36.18),
    ];

    let mut manager = MarkerManager::new(RecordingSurface::default());
    manager.refresh(&places);

    assert_eq!(manager.marker_count(), 2);
    assert!(manager.overlay_for(1).is_some());
    assert!(manager.overlay_for(2).is_none());
    assert!(manager.overlay_for(3).is_some());
}

#[test]
fn second_refresh_leaves_no_stale_markers() {
    let first = vec![
        sample_place_at(1, "Один", 51.73, 36.19),
        sample_place_at(2, "Два", 51.74, 36.18),
        sample_place_at(3, "Три", 51.75, 36.17),
    ];
    // Overlapping set, reordered, with one newcomer and one dropout.
    let second = vec![
        sample_place_at(3, "Три", 51.75, 36.17),
        sample_place_at(4, "Четыре", 51.76, 36.16),
        sample_place_at(2, "Два", 51.74, 36.18),
    ];

    let mut manager = MarkerManager::new(RecordingSurface::default());
    manager.refresh(&first);
    let stale_overlay = manager.overlay_for(1).unwrap();

    manager.refresh(&second);

    assert_eq!(manager.marker_count(), 3);
    for place in &second {
        let overlay = manager.overlay_for(place.id).unwrap();
        let tapped = manager.tap(overlay).unwrap();
        assert_eq!(tapped.id, place.id);
        assert_eq!(tapped.name, place.name);
    }
    // The dropped place is gone, and its old handle resolves to nothing.
    assert!(manager.overlay_for(1).is_none());
    assert_eq!(manager.tap(stale_overlay), None);
}

#[test]
fn placement_mode_suppresses_tap_handling() {
    let places = vec![sample_place_at(1, "Одно место", 51.73, 36.19)];
    let mut manager = MarkerManager::new(RecordingSurface::default());
    manager.refresh(&places);
    let overlay = manager.overlay_for(1).unwrap();

    manager.set_placing(true);
    assert!(manager.is_placing());
    assert_eq!(manager.tap(overlay), None);

    // The marker itself stayed installed; leaving the mode restores taps.
    manager.set_placing(false);
    assert_eq!(manager.tap(overlay).unwrap().id, 1);
}

#[test]
fn icon_cache_is_keyed_by_category() {
    let places = vec![
        categorized(sample_place_at(1, "Храм", 51.73, 36.19), Category::Churches),
        categorized(sample_place_at(2, "Ещё храм", 51.74, 36.18), Category::Churches),
        categorized(sample_place_at(3, "Парк", 51.75, 36.17), Category::Parks),
    ];

    let mut manager = MarkerManager::new(RecordingSurface::default());
    manager.refresh(&places);
    assert_eq!(manager.icon_cache_size(), 2);

    // A rebuild reuses the cached rasters instead of re-rendering.
    manager.refresh(&places);
    assert_eq!(manager.icon_cache_size(), 2);
    assert_eq!(manager.marker_count(), 3);
}

#[test]
fn release_twice_is_a_no_op() {
    let places = vec![sample_place_at(1, "Одно место", 51.73, 36.19)];
    let mut manager = MarkerManager::new(RecordingSurface::default());
    manager.refresh(&places);
    let overlay = manager.overlay_for(1).unwrap();

    manager.release();
    assert_eq!(manager.marker_count(), 0);
    assert_eq!(manager.icon_cache_size(), 0);
    assert_eq!(manager.tap(overlay), None);

    // Releasing released state must not fault; drop releases a third time.
    manager.release();
}
