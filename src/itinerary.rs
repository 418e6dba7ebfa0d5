//! Itinerary assembly.
//!
//! Composes the mock tool reports and the retrieved travel tips into one
//! markdown document and writes it to disk. Deterministic string assembly —
//! no LLM calls and no agent scheduling happen here; a downstream planner
//! is free to feed the same building blocks into its own prompts instead.

use chrono::NaiveDate;
use std::io;
use std::path::Path;

use crate::tools::{ActivityQuery, CabinClass, FlightQuery, HotelQuery};

/// Everything the `plan` command needs to assemble an itinerary.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub origin: String,
    pub destination: String,
    pub depart: NaiveDate,
    pub return_date: NaiveDate,
    pub travelers: u32,
    pub cabin_class: CabinClass,
    pub interests: String,
    pub min_hotel_rating: f32,
}

impl PlanRequest {
    pub fn flight_query(&self) -> FlightQuery {
        FlightQuery {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure_date: self.depart,
            travelers: self.travelers,
            cabin_class: self.cabin_class,
        }
    }

    pub fn hotel_query(&self) -> HotelQuery {
        HotelQuery {
            destination: self.destination.clone(),
            check_in: self.depart,
            check_out: self.return_date,
            guests: self.travelers,
            min_rating: self.min_hotel_rating,
        }
    }

    pub fn activity_query(&self) -> ActivityQuery {
        ActivityQuery {
            destination: self.destination.clone(),
            interests: self.interests.clone(),
            duration_hours: 4,
        }
    }
}

/// Assemble the final markdown itinerary from rendered building blocks.
pub fn compose(
    request: &PlanRequest,
    flights: &str,
    hotels: &str,
    activities: &str,
    travel_tips: &str,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Travel Itinerary: {} → {}\n\n",
        request.origin, request.destination
    ));
    out.push_str(&format!(
        "**Dates:** {} to {}  \n**Travelers:** {}  \n**Cabin:** {}\n\n",
        request.depart, request.return_date, request.travelers, request.cabin_class
    ));

    out.push_str("## Flights\n\n");
    out.push_str(flights.trim_end());
    out.push_str("\n\n## Accommodation\n\n");
    out.push_str(hotels.trim_end());
    out.push_str("\n\n## Activities\n\n");
    out.push_str(activities.trim_end());
    out.push_str("\n\n## Travel Tips\n\n");
    out.push_str(travel_tips.trim_end());
    out.push('\n');
    out
}

/// Write the itinerary to `path`, creating parent directories as needed.
pub fn write_itinerary(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}
