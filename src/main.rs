//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `city_guide` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use strum::IntoEnumIterator;

use city_guide::initialization::{init_client, init_logger};
use city_guide::{
    route_links, search, AddressResolver, Category, Command, FavoriteAction, FavoritesStore,
    GeoPoint, LocalGazetteer, MapSurface, MarkerManager, Opt, OverlayId, Place, PlaceCatalog,
    PlaceStore, RasterIcon, RemoteGeocoder, TcpProbe,
};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();
    init_logger(opt.log_level.clone().into()).context("Failed to initialize logger")?;

    if let Err(e) = run(opt).await {
        eprintln!("{} {:#}", "city_guide error:".red(), e);
        process::exit(1);
    }
    Ok(())
}

async fn run(opt: Opt) -> Result<()> {
    let Opt {
        data_dir,
        geocoder_url,
        user_agent,
        command,
        ..
    } = opt;

    let catalog = PlaceCatalog::new(PlaceStore::open(&data_dir));
    let favorites = FavoritesStore::open(&data_dir);

    match command {
        Command::Categories => {
            for category in Category::iter() {
                println!(
                    "{} {}: {}",
                    category.glyph(),
                    category.tag().bold(),
                    category.blurb()
                );
            }
        }

        Command::List { category } => {
            let places = match &category {
                Some(tag) => catalog.by_category(tag).await,
                None => catalog.all().await,
            };
            if places.is_empty() {
                println!("No places found.");
            }
            for place in &places {
                print_place_line(place);
            }
        }

        Command::Search { query } => {
            let corpus = catalog.all().await;
            let results = search(&query, &corpus);
            println!("Found {} result(s) for {:?}", results.len(), query);
            for place in &results {
                print_place_line(place);
            }
        }

        Command::Show { id } => match catalog.by_id(id).await {
            Some(place) => {
                let starred = favorites.contains(id).await;
                let user_place = catalog.is_user_place(id).await;
                print_place_details(&place, starred, user_place);
            }
            None => bail!("no place with id {id}"),
        },

        Command::Add {
            lat,
            lon,
            name,
            description,
            full_description,
            category,
            address,
            phone,
            website,
            working_hours,
            rating,
        } => {
            if let Some(tag) = &category {
                if Category::from_tag(tag).is_none() {
                    bail!("unknown category {tag:?}; run `city_guide categories` for the list");
                }
            }

            let address = match address {
                Some(address) => address,
                None => {
                    let resolver = build_resolver(&geocoder_url, &user_agent)?;
                    match resolver.resolve(lat, lon).await {
                        Ok(resolved) => {
                            println!(
                                "{} {} (via {})",
                                "Resolved address:".green(),
                                resolved.address,
                                resolved.provider
                            );
                            resolved.address
                        }
                        Err(e) => bail!("{e}; rerun with --address to enter it manually"),
                    }
                }
            };

            let draft = Place {
                id: 0,
                name,
                description: description.clone(),
                full_description: full_description.unwrap_or(description),
                category: category.unwrap_or_default(),
                address,
                phone,
                website,
                working_hours,
                image_url: String::new(),
                latitude: lat,
                longitude: lon,
                rating,
            };
            let stored = catalog
                .add_user_place(draft)
                .await
                .context("Failed to save the place")?;
            println!("{} {} (id {})", "Added".green(), stored.name.bold(), stored.id);
        }

        Command::Delete { id } => {
            if catalog
                .remove_user_place(id)
                .await
                .context("Failed to delete the place")?
            {
                println!("{} place {id}", "Deleted".green());
            } else {
                bail!("no user place with id {id}");
            }
        }

        Command::Resolve { lat, lon } => {
            let resolver = build_resolver(&geocoder_url, &user_agent)?;
            match resolver.resolve(lat, lon).await {
                Ok(resolved) => {
                    println!("{} (via {})", resolved.address.green(), resolved.provider)
                }
                Err(e) => bail!("{e}; enter the address manually"),
            }
        }

        Command::Favorite { action } => match action {
            FavoriteAction::Add { id } => {
                if catalog.by_id(id).await.is_none() {
                    bail!("no place with id {id}");
                }
                favorites.add(id).await.context("Failed to save favorites")?;
                println!("{} place {id} to favorites", "Added".green());
            }
            FavoriteAction::Remove { id } => {
                if favorites
                    .remove(id)
                    .await
                    .context("Failed to save favorites")?
                {
                    println!("{} place {id} from favorites", "Removed".green());
                } else {
                    println!("Place {id} was not in favorites.");
                }
            }
            FavoriteAction::List => {
                let places = catalog.favorites(&favorites).await;
                if places.is_empty() {
                    println!("No favorite places yet.");
                }
                for place in &places {
                    print_place_line(place);
                }
            }
        },

        Command::Route { id } => {
            let place = catalog
                .by_id(id)
                .await
                .with_context(|| format!("no place with id {id}"))?;
            if !place.has_coordinates() {
                bail!("place {id} has no coordinates");
            }
            let links = route_links(&place);
            println!("App: {}", links.app_uri);
            println!("Web: {}", links.web_url);
        }

        Command::Map => {
            let places = catalog.all().await;
            let mut manager = MarkerManager::new(ListSurface::default());
            manager.refresh(&places);
            let (center_lat, center_lon) = city_guide::config::CITY_CENTER;
            println!("Viewport center: {center_lat}, {center_lon}");
            println!(
                "{} markers placed ({} icons cached)",
                manager.marker_count(),
                manager.icon_cache_size()
            );
            for place in places.iter().filter(|p| p.has_coordinates()) {
                if let Some(overlay) = manager.overlay_for(place.id) {
                    println!(
                        "#{overlay}: {} @ {:.6}, {:.6}",
                        place.name, place.latitude, place.longitude
                    );
                }
            }
        }
    }

    Ok(())
}

fn build_resolver(geocoder_url: &str, user_agent: &str) -> Result<AddressResolver> {
    let client = init_client(user_agent).context("Failed to initialize HTTP client")?;
    let remote = RemoteGeocoder::new(client, geocoder_url).context("Invalid geocoder URL")?;
    Ok(AddressResolver::new(
        remote,
        LocalGazetteer::from_builtin_catalog(),
        Box::new(TcpProbe::new()),
    ))
}

fn print_place_line(place: &Place) {
    let glyph = Category::from_tag(&place.category)
        .map(|c| c.glyph())
        .unwrap_or("📍");
    println!(
        "{glyph} [{}] {} {}",
        place.id,
        place.name.bold(),
        place.address.dimmed()
    );
}

fn print_place_details(place: &Place, favorite: bool, user_place: bool) {
    println!("{}", place.name.bold());
    println!("  {}", place.full_description);
    println!("  📍 {}", place.address);
    if !place.phone.is_empty() {
        println!("  📞 {}", place.phone);
    }
    if !place.working_hours.is_empty() {
        println!("  🕒 {}", place.working_hours);
    }
    if !place.website.is_empty() {
        println!("  🌐 {}", place.website);
    }
    if place.rating > 0.0 {
        println!("  ⭐ {:.1}/5.0", place.rating);
    }
    if place.has_coordinates() {
        println!("  @ {:.6}, {:.6}", place.latitude, place.longitude);
    }
    let mut badges = Vec::new();
    if favorite {
        badges.push("favorite");
    }
    if user_place {
        badges.push("user place");
    }
    if !badges.is_empty() {
        println!("  ({})", badges.join(", "));
    }
}

/// Hands out sequential overlay handles without drawing anything; the
/// `map` summary reads everything it needs back from the manager.
#[derive(Default)]
struct ListSurface {
    next_id: OverlayId,
}

impl MapSurface for ListSurface {
    fn add_placemark(&mut self, _at: GeoPoint, _icon: &RasterIcon) -> OverlayId {
        self.next_id += 1;
        self.next_id
    }

    fn clear(&mut self) {}
}
