//! Shared test helpers for building sample places.
//!
//! This module is pulled into the other test files via `mod helpers;` to
//! reduce duplication.

#![allow(dead_code)] // Each integration test crate uses a subset.

use city_guide::{Category, Place};

/// A user place at the city center.
pub fn sample_place(id: i64, name: &str) -> Place {
    sample_place_at(id, name, 51.7373, 36.1873)
}

/// A user place at explicit coordinates.
pub fn sample_place_at(id: i64, name: &str, latitude: f64, longitude: f64) -> Place {
    Place {
        id,
        name: name.to_string(),
        description: "Тестовое описание".to_string(),
        full_description: "Полное тестовое описание".to_string(),
        category: Category::UserSubmitted.tag().to_string(),
        address: "ул. Тестовая, 1".to_string(),
        phone: String::new(),
        website: String::new(),
        working_hours: String::new(),
        image_url: String::new(),
        latitude,
        longitude,
        rating: 4.0,
    }
}
