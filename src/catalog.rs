//! The place catalog: built-in entries plus persisted user places behind a
//! single repository interface.
//!
//! Callers never merge the two sources by hand; every read goes through
//! [`PlaceCatalog`], which re-reads the store each call. No caching is done
//! across calls, which is fine at catalog sizes in the tens.

use std::collections::HashSet;
use std::sync::LazyLock;

use rand::Rng;

use crate::place::{Category, Place};
use crate::store::{FavoritesStore, PlaceStore, StoreError};

#[allow(clippy::too_many_arguments)]
fn builtin(
    id: i64,
    name: &str,
    description: &str,
    full_description: &str,
    category: Category,
    address: &str,
    phone: &str,
    website: &str,
    working_hours: &str,
    latitude: f64,
    longitude: f64,
    rating: f32,
) -> Place {
    Place {
        id,
        name: name.to_string(),
        description: description.to_string(),
        full_description: full_description.to_string(),
        category: category.tag().to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
        website: website.to_string(),
        working_hours: working_hours.to_string(),
        image_url: String::new(),
        latitude,
        longitude,
        rating,
    }
}

/// Built-in catalog shipped with the application, immutable at runtime.
pub static BUILTIN_PLACES: LazyLock<Vec<Place>> = LazyLock::new(|| {
    vec![
        builtin(
            1,
            "Курская крепость",
            "Историческое место основания города",
            "Курская крепость была основана в 1032 году. Здесь находился деревянный кремль, \
             который защищал город от набегов кочевников. Сегодня на месте крепости находится \
             мемориальный комплекс.",
            Category::Historical,
            "ул. Сонина, 1",
            "+7 (4712) 70-22-33",
            "http://kursk-museum.ru",
            "9:00-18:00",
            51.724124,
            36.191233,
            4.5,
        ),
        builtin(
            2,
            "Знаменский собор",
            "Главный православный храм города",
            "Знаменский кафедральный собор - один из красивейших храмов Курска. Построен в XVII \
             веке в честь чудотворной иконы Божией Матери \"Знамение\" Курской-Коренной.",
            Category::Churches,
            "ул. Луначарского, 4",
            "+7 (4712) 70-24-44",
            "https://курская-епархия.рф/",
            "7:00-19:00",
            51.727619,
            36.192287,
            4.8,
        ),
        builtin(
            3,
            "Мемориальный комплекс \"Курская дуга\"",
            "Памятник героям Курской битвы",
            "Грандиозный мемориальный комплекс посвящён одному из крупнейших сражений Великой \
             Отечественной войны. Включает музей, Триумфальную арку и Вечный огонь.",
            Category::Historical,
            "Курская область, муниципальное образование Поныри",
            "+7 (4712) 35-35-75",
            "https://gokursk.ru/",
            "10:00-18:00",
            52.297568,
            36.309885,
            4.9,
        ),
        builtin(
            4,
            "Парк Героев Гражданской войны",
            "Главный парк города для семейного отдыха",
            "Большой парк с деревьями, аллеями для прогулок, детскими площадками и памятником. \
             Идеальное место для отдыха всей семьей.",
            Category::Parks,
            "улица Радищева",
            "+7 (4712) 35-28-91",
            "",
            "6:00-23:00",
            51.745214,
            36.188631,
            4.3,
        ),
        builtin(
            5,
            "Театр драмы имени А.С. Пушкина",
            "Старейший театр Курска",
            "Курский государственный драматический театр имени А.С. Пушкина основан в 1792 году. \
             Один из старейших провинциальных театров России.",
            Category::Theaters,
            "ул. Ленина, 26",
            "+7 (4712) 51-42-44",
            "http://kurskdrama.ru",
            "Касса: 10:00-19:00",
            51.738991,
            36.191853,
            4.6,
        ),
        builtin(
            6,
            "ТРЦ \"Пушкинский\"",
            "Крупнейший торговый центр города",
            "Современный торгово-развлекательный центр с магазинами, кинотеатром, фуд-кортом и \
             развлечениями для всей семьи.",
            Category::Malls,
            "ул. Ленина, 30",
            "+7 (4712) 777-777",
            "http://pushkinsky-kursk.ru",
            "10:00-22:00",
            51.737894,
            36.192326,
            4.4,
        ),
        builtin(
            7,
            "Ресторан \"Старый город\"",
            "Лучший ресторан русской кухни",
            "Уютный ресторан с традиционной русской кухней и домашней атмосферой. \
             Специализируется на блюдах курской кухни.",
            Category::Restaurants,
            "ул. Ленина, 45",
            "+7 (4712) 55-66-77",
            "",
            "12:00-24:00",
            51.727800,
            36.188900,
            4.7,
        ),
        builtin(
            8,
            "Отель \"Курск\"",
            "Комфортабельная гостиница в центре",
            "Современный отель в самом центре города с комфортабельными номерами и отличным \
             сервисом.",
            Category::Hotels,
            "ул. Ленина, 24",
            "+7 (4712) 70-70-70",
            "http://hotel-kursk.ru",
            "24/7",
            51.736665,
            36.191790,
            4.2,
        ),
    ]
});

/// Repository over the built-in and user-submitted place sets.
#[derive(Debug)]
pub struct PlaceCatalog {
    store: PlaceStore,
}

impl PlaceCatalog {
    /// Creates a catalog over `store`.
    pub fn new(store: PlaceStore) -> Self {
        PlaceCatalog { store }
    }

    /// All places: built-in first, then user places in storage order.
    pub async fn all(&self) -> Vec<Place> {
        let mut places = BUILTIN_PLACES.clone();
        places.extend(self.store.load_all().await);
        places
    }

    /// Places whose category tag equals `tag` exactly.
    pub async fn by_category(&self, tag: &str) -> Vec<Place> {
        self.all()
            .await
            .into_iter()
            .filter(|p| p.category == tag)
            .collect()
    }

    /// The first place with identifier `id`, if any.
    pub async fn by_id(&self, id: i64) -> Option<Place> {
        self.all().await.into_iter().find(|p| p.id == id)
    }

    /// True iff a user-submitted place with identifier `id` exists.
    pub async fn is_user_place(&self, id: i64) -> bool {
        self.store.load_all().await.iter().any(|p| p.id == id)
    }

    /// Places the user marked as favorite, in catalog order.
    pub async fn favorites(&self, favorites: &FavoritesStore) -> Vec<Place> {
        let ids = favorites.ids().await;
        self.all()
            .await
            .into_iter()
            .filter(|p| ids.contains(&p.id))
            .collect()
    }

    /// Persists `place` as a new user place under a freshly generated
    /// identifier, returning the stored record.
    ///
    /// The incoming identifier is ignored; an empty category falls back to
    /// the user-submitted tag.
    pub async fn add_user_place(&self, mut place: Place) -> Result<Place, StoreError> {
        let existing: HashSet<i64> = self.all().await.iter().map(|p| p.id).collect();
        place.id = generate_place_id(&existing);
        if place.category.is_empty() {
            place.category = Category::UserSubmitted.tag().to_string();
        }
        self.store.save(&place).await?;
        Ok(place)
    }

    /// Deletes the user place with identifier `id`. Returns true only when
    /// an entry was actually removed. Built-in places cannot be deleted.
    pub async fn remove_user_place(&self, id: i64) -> Result<bool, StoreError> {
        self.store.delete(id).await
    }
}

/// Draws a random positive identifier not present in `existing`.
fn generate_place_id(existing: &HashSet<i64>) -> i64 {
    let mut rng = rand::rng();
    loop {
        let id = rng.random_range(1..i64::MAX);
        if !existing.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_unique_ids_and_known_categories() {
        let mut seen = HashSet::new();
        for place in BUILTIN_PLACES.iter() {
            assert!(seen.insert(place.id), "duplicate id {}", place.id);
            assert!(
                Category::from_tag(&place.category).is_some(),
                "unknown category {:?}",
                place.category
            );
        }
        assert_eq!(BUILTIN_PLACES.len(), 8);
    }

    #[test]
    fn builtin_places_all_have_coordinates() {
        assert!(BUILTIN_PLACES.iter().all(|p| p.has_coordinates()));
    }

    #[test]
    fn generated_ids_avoid_the_existing_set() {
        let existing: HashSet<i64> = (1..=1000).collect();
        for _ in 0..100 {
            let id = generate_place_id(&existing);
            assert!(id > 0);
            assert!(!existing.contains(&id));
        }
    }
}
