//! Place and category data model.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// A single point of interest in the city catalog.
///
/// Built-in places ship with the application and are immutable at runtime;
/// user-submitted places carry the same shape and are persisted locally.
/// A latitude/longitude pair of `(0.0, 0.0)` means the place has no usable
/// map coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Identifier, unique across the built-in and user-submitted sets.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Short one-line description.
    pub description: String,
    /// Full description shown on the detail view.
    pub full_description: String,
    /// Category tag; one of the [`Category`] tags.
    pub category: String,
    /// Street address.
    pub address: String,
    /// Contact phone, possibly empty.
    #[serde(default)]
    pub phone: String,
    /// Website URL, possibly empty.
    #[serde(default)]
    pub website: String,
    /// Working hours, possibly empty.
    #[serde(default)]
    pub working_hours: String,
    /// Image reference, possibly empty.
    #[serde(default)]
    pub image_url: String,
    /// Latitude of the place.
    #[serde(default)]
    pub latitude: f64,
    /// Longitude of the place.
    #[serde(default)]
    pub longitude: f64,
    /// Rating from 0.0 to 5.0.
    #[serde(default)]
    pub rating: f32,
}

impl Place {
    /// True when the place carries usable map coordinates.
    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }

    /// Plain-text summary for the share action.
    pub fn share_text(&self) -> String {
        format!("{}\n{}\n{}", self.name, self.description, self.address)
    }
}

/// Fixed category taxonomy, in display order.
///
/// Place records reference categories by tag string. The enum exists so the
/// taxonomy can be iterated in a stable order and so each entry carries its
/// presentational glyph and blurb. [`Category::UserSubmitted`] is the
/// distinguished tag assigned to places created at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Category {
    /// Monuments and museums.
    Historical,
    /// Parks and public gardens.
    Parks,
    /// Restaurants and cafes.
    Restaurants,
    /// Shopping malls.
    Malls,
    /// Theaters and cinemas.
    Theaters,
    /// Hotels.
    Hotels,
    /// Churches and cathedrals.
    Churches,
    /// Universities and schools.
    Education,
    /// Places added by the user at runtime.
    UserSubmitted,
}

impl Category {
    /// The tag string stored in [`Place::category`].
    pub fn tag(self) -> &'static str {
        match self {
            Category::Historical => "Исторические места",
            Category::Parks => "Парки и скверы",
            Category::Restaurants => "Рестораны и кафе",
            Category::Malls => "Торговые центры",
            Category::Theaters => "Театры и кино",
            Category::Hotels => "Отели",
            Category::Churches => "Храмы",
            Category::Education => "Образование",
            Category::UserSubmitted => "Пользовательские места",
        }
    }

    /// Icon glyph shown next to the category.
    pub fn glyph(self) -> &'static str {
        match self {
            Category::Historical => "🏛️",
            Category::Parks => "🌳",
            Category::Restaurants => "🍽️",
            Category::Malls => "🛍️",
            Category::Theaters => "🎭",
            Category::Hotels => "🏨",
            Category::Churches => "⛪",
            Category::Education => "🎓",
            Category::UserSubmitted => "📌",
        }
    }

    /// One-line description of the category.
    pub fn blurb(self) -> &'static str {
        match self {
            Category::Historical => "Памятники и музеи города",
            Category::Parks => "Места для отдыха и прогулок",
            Category::Restaurants => "Лучшие места для питания",
            Category::Malls => "Шоппинг и развлечения",
            Category::Theaters => "Культурные заведения",
            Category::Hotels => "Размещение в городе",
            Category::Churches => "Религиозные места",
            Category::Education => "ВУЗы и школы",
            Category::UserSubmitted => "Места, добавленные пользователем",
        }
    }

    /// Resolves a tag string back to its category, if it is a known tag.
    pub fn from_tag(tag: &str) -> Option<Category> {
        Category::iter().find(|c| c.tag() == tag)
    }
}
