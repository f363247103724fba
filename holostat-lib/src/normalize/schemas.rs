//! Column layouts for the six catalogs.

use super::field_def::{DerivedDef, FieldDef, FieldKind, RecordValues, Schema, SentinelPolicy, derived, field};
use super::FieldValue;
use crate::facts::Catalog;
use chrono::Datelike;

const SPECIES_CLASSIFICATIONS: &[(&str, &str)] = &[("mammals", "mammal"), ("reptilian", "reptile"), ("amphibians", "amphibian")];

/// Words left out of the opening crawl vocabulary.
const CRAWL_STOP_WORDS: &[&str] = &["the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by"];

/// Punctuation trimmed from both ends of each crawl word.
const CRAWL_PUNCTUATION: &[char] = &['.', ',', '!', '?', '(', ')', '[', ']', '{', '}', '"', ':', ';'];

/// Lowercased crawl words with surrounding punctuation removed and stop words dropped.
fn crawl_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| word.to_lowercase().trim_matches(CRAWL_PUNCTUATION).to_string())
        .filter(|word| !word.is_empty() && !CRAWL_STOP_WORDS.contains(&word.as_str()))
        .collect()
}

fn count_value(count: usize) -> FieldValue {
    FieldValue::Int(i64::try_from(count).unwrap_or(i64::MAX))
}

#[expect(clippy::cast_precision_loss, reason = "capacities are far below 2^53")]
fn total_capacity(values: &RecordValues<'_>) -> Option<f64> {
    let total = values.int("total_capacity")?;
    (total > 0).then_some(total as f64)
}

fn total_capacity_value(values: &RecordValues<'_>) -> FieldValue {
    let crew = values.int("crew").unwrap_or(0);
    let passengers = values.int("passengers").unwrap_or(0);
    FieldValue::Int(crew.saturating_add(passengers))
}

fn cost_per_capacity(values: &RecordValues<'_>) -> FieldValue {
    match (values.float("cost_in_credits"), total_capacity(values)) {
        (Some(cost), Some(total)) => FieldValue::Float(cost / total),
        _ => FieldValue::Null,
    }
}

fn cargo_to_person_ratio(values: &RecordValues<'_>) -> FieldValue {
    let ratio = total_capacity(values).map_or(0.0, |total| values.float("cargo_capacity").unwrap_or(0.0) / total);
    FieldValue::Float(ratio)
}

fn custom_score(values: &RecordValues<'_>) -> FieldValue {
    let fill = |name: &str| values.float(name).unwrap_or(0.0);
    FieldValue::Float(0.4 * fill("MGLT") + 0.3 * fill("hyperdrive_rating") + 0.2 * fill("total_capacity") + 0.1 * fill("cargo_capacity"))
}

const FILM_FIELDS: &[FieldDef] = &[
    field!("title", "Title of the film", FieldKind::Text),
    field!("episode_id", "Episode number", FieldKind::Integer),
    field!("opening_crawl", "Opening crawl text", FieldKind::Text),
    field!("director", "Director", FieldKind::Text),
    field!("producer", "Producers", FieldKind::Tokens),
    field!("release_date", "Original release date", FieldKind::Date),
    field!("characters", "People appearing in the film", FieldKind::Links),
    field!("planets", "Planets appearing in the film", FieldKind::Links),
    field!("starships", "Starships appearing in the film", FieldKind::Links),
    field!("vehicles", "Vehicles appearing in the film", FieldKind::Links),
    field!("species", "Species appearing in the film", FieldKind::Links),
    field!("url", "Identifier of the record", FieldKind::Link),
];

const FILM_DERIVED: &[DerivedDef] = &[
    derived!("release_year", "Year of release", FieldKind::Integer, |v| {
        v.date("release_date").map_or(FieldValue::Null, |d| FieldValue::Int(i64::from(d.year())))
    }),
    derived!("character_count", "Number of characters", FieldKind::Integer, |v| count_value(v.count("characters"))),
    derived!("planet_count", "Number of planets", FieldKind::Integer, |v| count_value(v.count("planets"))),
    derived!("starship_count", "Number of starships", FieldKind::Integer, |v| count_value(v.count("starships"))),
    derived!("vehicle_count", "Number of vehicles", FieldKind::Integer, |v| count_value(v.count("vehicles"))),
    derived!("species_count", "Number of species", FieldKind::Integer, |v| count_value(v.count("species"))),
    derived!("crawl_word_count", "Words in the opening crawl", FieldKind::Integer, |v| {
        v.text("opening_crawl")
            .map_or(FieldValue::Null, |text| count_value(text.split_whitespace().count()))
    }),
    derived!("crawl_words", "Opening crawl vocabulary without stop words", FieldKind::Tokens, |v| {
        v.text("opening_crawl").map_or(FieldValue::Null, |text| FieldValue::Tokens(crawl_words(text)))
    }),
];

const PEOPLE_FIELDS: &[FieldDef] = &[
    field!("name", "Name of the person", FieldKind::Text),
    field!("height", "Height in centimeters", FieldKind::Float),
    field!("mass", "Mass in kilograms", FieldKind::Float),
    field!("hair_color", "Hair colors", FieldKind::Tokens),
    field!("skin_color", "Skin colors", FieldKind::Tokens),
    field!("eye_color", "Eye colors", FieldKind::Tokens),
    field!("birth_year", "Birth year relative to the Battle of Yavin", FieldKind::Text, Null),
    field!("gender", "Gender", FieldKind::Category(&[])),
    field!("homeworld", "Home planet", FieldKind::Link, Null),
    field!("films", "Films the person appears in", FieldKind::Links),
    field!("species", "Species of the person", FieldKind::Links),
    field!("vehicles", "Vehicles piloted", FieldKind::Links),
    field!("starships", "Starships piloted", FieldKind::Links),
    field!("url", "Identifier of the record", FieldKind::Link),
];

const PEOPLE_DERIVED: &[DerivedDef] = &[
    derived!("film_count", "Number of films", FieldKind::Integer, |v| count_value(v.count("films"))),
    derived!("vehicle_count", "Number of vehicles piloted", FieldKind::Integer, |v| count_value(v.count("vehicles"))),
    derived!("starship_count", "Number of starships piloted", FieldKind::Integer, |v| count_value(v.count("starships"))),
    derived!(
        "popularity_index",
        "Twice the film count plus vehicles and starships piloted",
        FieldKind::Integer,
        |v| {
            let films = v.int("film_count").unwrap_or(0);
            let vehicles = v.int("vehicle_count").unwrap_or(0);
            let starships = v.int("starship_count").unwrap_or(0);
            FieldValue::Int(films.saturating_mul(2).saturating_add(vehicles).saturating_add(starships))
        }
    ),
];

const PLANET_FIELDS: &[FieldDef] = &[
    field!("name", "Name of the planet", FieldKind::Text),
    field!("rotation_period", "Hours per day", FieldKind::Float),
    field!("orbital_period", "Days per year", FieldKind::Float),
    field!("diameter", "Diameter in kilometers", FieldKind::Float),
    field!("climate", "Climates", FieldKind::Tokens),
    field!("gravity", "Gravity relative to standard", FieldKind::Text),
    field!("terrain", "Terrains", FieldKind::Tokens),
    field!("surface_water", "Percentage of the surface covered by water", FieldKind::Float),
    field!("population", "Population", FieldKind::Integer),
    field!("residents", "People living on the planet", FieldKind::Links),
    field!("films", "Films the planet appears in", FieldKind::Links),
    field!("url", "Identifier of the record", FieldKind::Link),
];

const SPECIES_FIELDS: &[FieldDef] = &[
    field!("name", "Name of the species", FieldKind::Text),
    field!("classification", "Biological classification", FieldKind::Category(SPECIES_CLASSIFICATIONS)),
    field!("designation", "Designation", FieldKind::Category(&[])),
    field!("average_height", "Average height in centimeters", FieldKind::Float),
    field!("skin_colors", "Skin colors", FieldKind::Tokens),
    field!("hair_colors", "Hair colors", FieldKind::Tokens),
    field!("eye_colors", "Eye colors", FieldKind::Tokens),
    field!("average_lifespan", "Average lifespan in years", FieldKind::Float),
    field!("homeworld", "Home planet", FieldKind::Link, Null),
    field!("language", "Language", FieldKind::Text, Null),
    field!("people", "Members of the species", FieldKind::Links),
    field!("films", "Films the species appears in", FieldKind::Links),
    field!("url", "Identifier of the record", FieldKind::Link),
];

const VEHICLE_FIELDS: &[FieldDef] = &[
    field!("name", "Name of the vehicle", FieldKind::Text),
    field!("model", "Model", FieldKind::Text),
    field!("manufacturer", "Manufacturer", FieldKind::Text),
    field!("cost_in_credits", "Cost in galactic credits", FieldKind::Float),
    field!("length", "Length in meters", FieldKind::Float),
    field!("max_atmosphering_speed", "Maximum speed in atmosphere", FieldKind::Float),
    field!("crew", "Crew needed to operate", FieldKind::Integer),
    field!("passengers", "Passenger capacity", FieldKind::Integer),
    field!("cargo_capacity", "Cargo capacity in kilograms", FieldKind::Float),
    field!("consumables", "Time the vehicle can go without resupply", FieldKind::Text),
    field!("vehicle_class", "Class of vehicle", FieldKind::Category(&[])),
    field!("pilots", "People who piloted the vehicle", FieldKind::Links),
    field!("films", "Films the vehicle appears in", FieldKind::Links),
    field!("url", "Identifier of the record", FieldKind::Link),
];

const STARSHIP_FIELDS: &[FieldDef] = &[
    field!("name", "Name of the starship", FieldKind::Text),
    field!("model", "Model", FieldKind::Text),
    field!("manufacturer", "Manufacturer", FieldKind::Text),
    field!("cost_in_credits", "Cost in galactic credits", FieldKind::Float),
    field!("length", "Length in meters", FieldKind::Float),
    field!("max_atmosphering_speed", "Maximum speed in atmosphere", FieldKind::Float),
    field!("crew", "Crew needed to operate", FieldKind::Integer),
    field!("passengers", "Passenger capacity", FieldKind::Integer),
    field!("cargo_capacity", "Cargo capacity in kilograms", FieldKind::Float),
    field!("consumables", "Time the starship can go without resupply", FieldKind::Text),
    field!("hyperdrive_rating", "Hyperdrive class", FieldKind::Float),
    field!("MGLT", "Megalights per hour", FieldKind::Integer),
    field!("starship_class", "Class of starship", FieldKind::Category(&[])),
    field!("pilots", "People who piloted the starship", FieldKind::Links),
    field!("films", "Films the starship appears in", FieldKind::Links),
    field!("url", "Identifier of the record", FieldKind::Link),
];

const CRAFT_DERIVED: &[DerivedDef] = &[
    derived!("total_capacity", "Crew plus passengers, missing values counted as zero", FieldKind::Integer, total_capacity_value),
    derived!("cost_per_capacity", "Cost divided by total capacity", FieldKind::Float, cost_per_capacity),
    derived!("cargo_to_person_ratio", "Cargo capacity divided by total capacity", FieldKind::Float, cargo_to_person_ratio),
];

const STARSHIP_DERIVED: &[DerivedDef] = &[
    derived!("total_capacity", "Crew plus passengers, missing values counted as zero", FieldKind::Integer, total_capacity_value),
    derived!("cost_per_capacity", "Cost divided by total capacity", FieldKind::Float, cost_per_capacity),
    derived!("cargo_to_person_ratio", "Cargo capacity divided by total capacity", FieldKind::Float, cargo_to_person_ratio),
    derived!(
        "custom_score",
        "Weighted blend of MGLT, hyperdrive rating, total capacity and cargo capacity",
        FieldKind::Float,
        custom_score
    ),
];

pub static FILMS: Schema = Schema {
    catalog: Catalog::Films,
    fields: FILM_FIELDS,
    derived: FILM_DERIVED,
};

pub static PEOPLE: Schema = Schema {
    catalog: Catalog::People,
    fields: PEOPLE_FIELDS,
    derived: PEOPLE_DERIVED,
};

pub static PLANETS: Schema = Schema {
    catalog: Catalog::Planets,
    fields: PLANET_FIELDS,
    derived: &[],
};

pub static SPECIES: Schema = Schema {
    catalog: Catalog::Species,
    fields: SPECIES_FIELDS,
    derived: &[],
};

pub static VEHICLES: Schema = Schema {
    catalog: Catalog::Vehicles,
    fields: VEHICLE_FIELDS,
    derived: CRAFT_DERIVED,
};

pub static STARSHIPS: Schema = Schema {
    catalog: Catalog::Starships,
    fields: STARSHIP_FIELDS,
    derived: STARSHIP_DERIVED,
};

impl Catalog {
    /// The table layout for this catalog.
    #[must_use]
    pub fn schema(self) -> &'static Schema {
        match self {
            Self::Films => &FILMS,
            Self::People => &PEOPLE,
            Self::Planets => &PLANETS,
            Self::Species => &SPECIES,
            Self::Vehicles => &VEHICLES,
            Self::Starships => &STARSHIPS,
        }
    }
}
