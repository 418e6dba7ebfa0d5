//! Mock travel-data tools.
//!
//! Flight, hotel, and activity search generate plausible options from a
//! seeded RNG instead of live APIs. The seed is a hash of the query fields,
//! so identical queries always render identical reports. Tool dispatch is a
//! closed set of named operations ([`ToolRequest`]) — no runtime reflection.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

const AIRLINES: [&str; 5] = ["Delta", "United", "Air France", "British Airways", "Lufthansa"];

const HOTEL_NAMES: [&str; 6] = [
    "Grand Palace Hotel",
    "Boutique Suites",
    "Royal Inn",
    "Elegant Residence",
    "Harborview Lodge",
    "Old Town Guesthouse",
];

/// Destinations billed at the long-haul European base fare.
const EUROPE_HINTS: [&str; 10] = [
    "europe", "paris", "rome", "italy", "france", "london", "barcelona", "amsterdam", "athens",
    "florence",
];

/// The closed set of mock tool operations.
#[derive(Debug, Clone)]
pub enum ToolRequest {
    Flights(FlightQuery),
    Hotels(HotelQuery),
    Activities(ActivityQuery),
}

/// Run one tool request and render its report.
pub fn dispatch(request: &ToolRequest) -> Result<String> {
    match request {
        ToolRequest::Flights(query) => Ok(render_flights(query, &search_flights(query))),
        ToolRequest::Hotels(query) => {
            let options = search_hotels(query)?;
            Ok(render_hotels(query, &options))
        }
        ToolRequest::Activities(query) => {
            Ok(render_activities(query, &search_activities(query)))
        }
    }
}

// ============ Flights ============

#[derive(Debug, Clone, Hash)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub travelers: u32,
    pub cabin_class: CabinClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    pub fn fare_multiplier(self) -> f64 {
        match self {
            CabinClass::Economy => 1.0,
            CabinClass::PremiumEconomy => 1.6,
            CabinClass::Business => 3.5,
            CabinClass::First => 6.0,
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CabinClass::Economy => "economy",
            CabinClass::PremiumEconomy => "premium economy",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightOption {
    pub airline: &'static str,
    pub flight_number: u32,
    pub price_per_person: f64,
    pub duration_hours: u32,
    pub duration_minutes: u32,
    pub stops: u32,
}

pub fn search_flights(query: &FlightQuery) -> Vec<FlightOption> {
    let mut rng = seeded_rng(query);

    let base_fare = if is_european(&query.destination) {
        500.0
    } else {
        300.0
    };
    let base_fare = base_fare * query.cabin_class.fare_multiplier();

    (0..3)
        .map(|_| FlightOption {
            airline: AIRLINES[rng.gen_range(0..AIRLINES.len())],
            flight_number: rng.gen_range(100..1000),
            price_per_person: round2(base_fare * rng.gen_range(0.8..1.3)),
            duration_hours: rng.gen_range(6..16),
            duration_minutes: rng.gen_range(0..56),
            stops: rng.gen_range(0..3),
        })
        .collect()
}

fn render_flights(query: &FlightQuery, options: &[FlightOption]) -> String {
    let mut out = format!(
        "Flight options from {} to {} on {}:\n",
        query.origin, query.destination, query.departure_date
    );
    for option in options {
        out.push_str(&format!(
            "- {} Flight #{}: ${:.2}/person, {}h {}m, {} layover(s)\n",
            option.airline,
            option.flight_number,
            option.price_per_person,
            option.duration_hours,
            option.duration_minutes,
            option.stops
        ));
    }
    out.push_str(&format!(
        "\nFor {} traveler(s) in {} class\n",
        query.travelers, query.cabin_class
    ));
    out
}

// ============ Hotels ============

#[derive(Debug, Clone)]
pub struct HotelQuery {
    pub destination: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub min_rating: f32,
}

impl Hash for HotelQuery {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.destination.hash(state);
        self.check_in.hash(state);
        self.check_out.hash(state);
        self.guests.hash(state);
        self.min_rating.to_bits().hash(state);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelOption {
    pub name: &'static str,
    pub rating: f32,
    pub price_per_night: f64,
}

pub fn search_hotels(query: &HotelQuery) -> Result<Vec<HotelOption>> {
    if query.check_out <= query.check_in {
        bail!(
            "check-out ({}) must be after check-in ({})",
            query.check_out,
            query.check_in
        );
    }

    let mut rng = seeded_rng(query);
    let floor = query.min_rating.max(3.5).min(5.0);

    Ok((0..4)
        .map(|_| HotelOption {
            name: HOTEL_NAMES[rng.gen_range(0..HOTEL_NAMES.len())],
            rating: round1(rng.gen_range(floor..=5.0)),
            price_per_night: round2(rng.gen_range(80.0..250.0)),
        })
        .collect())
}

pub fn nights(query: &HotelQuery) -> i64 {
    (query.check_out - query.check_in).num_days()
}

fn render_hotels(query: &HotelQuery, options: &[HotelOption]) -> String {
    let stay_nights = nights(query);
    let mut out = format!(
        "Hotels in {} ({} to {}, {} guest(s)):\n",
        query.destination, query.check_in, query.check_out, query.guests
    );
    for option in options {
        let total = option.price_per_night * stay_nights as f64;
        out.push_str(&format!(
            "- {}: {:.1}* (${:.2}/night, ${:.2} total for {} nights)\n",
            option.name, option.rating, option.price_per_night, total, stay_nights
        ));
    }
    out
}

// ============ Activities ============

#[derive(Debug, Clone, Hash)]
pub struct ActivityQuery {
    pub destination: String,
    pub interests: String,
    pub duration_hours: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityOption {
    pub name: &'static str,
    pub rating: f32,
    pub price_per_person: f64,
}

const ACTIVITY_CATALOG: [(&str, &[&str]); 6] = [
    (
        "art",
        &["Museum Skip-the-Line Tour", "Art Gallery Walk", "Street Art Tour"],
    ),
    (
        "food",
        &["Food Walking Tour", "Cooking Class", "Wine Tasting", "Gourmet Dinner"],
    ),
    (
        "history",
        &["Historical Walking Tour", "Ancient Sites Tour", "Museum Guided Tour"],
    ),
    (
        "culture",
        &["Cultural Walking Tour", "Local Market Tour", "Traditional Performance"],
    ),
    (
        "adventure",
        &["Bike Excursion", "Kayak Trip", "Hiking Day Tour"],
    ),
    (
        "nature",
        &["Botanical Garden Visit", "Coastal Walk", "National Park Day Trip"],
    ),
];

const FALLBACK_ACTIVITIES: [&str; 2] = ["City Highlights Tour", "Guided Walking Tour"];

pub fn search_activities(query: &ActivityQuery) -> Vec<ActivityOption> {
    let mut rng = seeded_rng(query);

    let interests: Vec<String> = query
        .interests
        .split(',')
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .collect();

    let mut options = Vec::new();
    for interest in interests.iter().take(3) {
        if let Some((_, names)) = ACTIVITY_CATALOG.iter().find(|(key, _)| key == interest) {
            options.push(ActivityOption {
                name: names[rng.gen_range(0..names.len())],
                rating: round1(rng.gen_range(4.2..=5.0)),
                price_per_person: round2(rng.gen_range(45.0..150.0)),
            });
        }
    }

    if options.is_empty() {
        for name in FALLBACK_ACTIVITIES {
            options.push(ActivityOption {
                name,
                rating: round1(rng.gen_range(4.2..=5.0)),
                price_per_person: round2(rng.gen_range(45.0..150.0)),
            });
        }
    }

    options
}

fn render_activities(query: &ActivityQuery, options: &[ActivityOption]) -> String {
    let mut out = format!(
        "Activities in {} for interests ({}):\n",
        query.destination, query.interests
    );
    for option in options {
        out.push_str(&format!(
            "- {}: {:.1}*, ${:.2}/person, ~{}hrs\n",
            option.name, option.rating, option.price_per_person, query.duration_hours
        ));
    }
    out
}

// ============ Helpers ============

fn is_european(destination: &str) -> bool {
    let lower = destination.to_lowercase();
    EUROPE_HINTS.iter().any(|hint| lower.contains(hint))
}

fn seeded_rng<T: Hash>(value: &T) -> StdRng {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    StdRng::seed_from_u64(hasher.finish())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight_query(cabin: CabinClass) -> FlightQuery {
        FlightQuery {
            origin: "New York".to_string(),
            destination: "Paris".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            travelers: 2,
            cabin_class: cabin,
        }
    }

    fn hotel_query() -> HotelQuery {
        HotelQuery {
            destination: "Paris".to_string(),
            check_in: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 6, 18).unwrap(),
            guests: 2,
            min_rating: 4.0,
        }
    }

    #[test]
    fn identical_flight_queries_are_deterministic() {
        let query = flight_query(CabinClass::Economy);
        assert_eq!(search_flights(&query), search_flights(&query));
    }

    #[test]
    fn business_fares_exceed_economy() {
        let economy = search_flights(&flight_query(CabinClass::Economy));
        let business = search_flights(&flight_query(CabinClass::Business));
        let max_economy = economy
            .iter()
            .map(|o| o.price_per_person)
            .fold(f64::MIN, f64::max);
        for option in &business {
            assert!(option.price_per_person > max_economy);
        }
    }

    #[test]
    fn hotel_ratings_respect_minimum() {
        let options = search_hotels(&hotel_query()).unwrap();
        assert_eq!(options.len(), 4);
        for option in &options {
            assert!(option.rating >= 4.0);
            assert!(option.rating <= 5.0);
        }
    }

    #[test]
    fn hotel_stay_length_in_nights() {
        assert_eq!(nights(&hotel_query()), 3);
    }

    #[test]
    fn rejects_inverted_stay_dates() {
        let mut query = hotel_query();
        query.check_out = query.check_in;
        assert!(search_hotels(&query).is_err());
    }

    #[test]
    fn known_interests_hit_their_catalog() {
        let query = ActivityQuery {
            destination: "Rome".to_string(),
            interests: "food, history".to_string(),
            duration_hours: 4,
        };
        let options = search_activities(&query);
        assert_eq!(options.len(), 2);
        let food: &[&str] = ACTIVITY_CATALOG.iter().find(|(k, _)| *k == "food").unwrap().1;
        assert!(food.contains(&options[0].name));
    }

    #[test]
    fn unknown_interests_fall_back_to_general_tours() {
        let query = ActivityQuery {
            destination: "Rome".to_string(),
            interests: "spelunking".to_string(),
            duration_hours: 4,
        };
        let options = search_activities(&query);
        assert_eq!(options.len(), FALLBACK_ACTIVITIES.len());
        assert_eq!(options[0].name, "City Highlights Tour");
    }

    #[test]
    fn dispatch_renders_deterministic_reports() {
        let request = ToolRequest::Flights(flight_query(CabinClass::Economy));
        let a = dispatch(&request).unwrap();
        let b = dispatch(&request).unwrap();
        assert_eq!(a, b);
        assert!(a.contains("Flight options from New York to Paris"));
        assert!(a.contains("economy class"));
    }

    #[test]
    fn hotel_report_includes_stay_totals() {
        let query = hotel_query();
        let report = dispatch(&ToolRequest::Hotels(query.clone())).unwrap();
        assert!(report.contains("Hotels in Paris"));
        assert!(report.contains("total for 3 nights"));
    }
}
