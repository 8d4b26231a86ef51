//! Generated itineraries for the TripPlanner.

use log::info;

use super::TripPlanner;
use crate::{
    error::Result,
    generation::prompts,
    ingest,
    models::GeneratedItinerary,
    params::GenerateItinerary,
};

impl TripPlanner {
    /// Generates an itinerary covering the trip's stops and stores it on the
    /// trip.
    ///
    /// The destination is the trip's distinct stop cities in visiting order,
    /// or the trip name when it has no stops yet. Text that does not parse
    /// is kept verbatim as [`GeneratedItinerary::RawFallback`].
    ///
    /// # Errors
    ///
    /// `TravelError::Generation` when the generator itself fails; nothing is
    /// stored in that case.
    pub async fn generate_itinerary(
        &self,
        trip_id: u64,
        user_id: u64,
        params: &GenerateItinerary,
    ) -> Result<GeneratedItinerary> {
        params.validate()?;

        let (trip, cities) = self
            .with_db(move |db| {
                let trip = db.owned_trip(trip_id, user_id)?;
                let cities = db.trip_destinations(trip_id)?;
                Ok((trip, cities))
            })
            .await?;

        let destination = if cities.is_empty() {
            trip.name.clone()
        } else {
            cities.join(", ")
        };
        info!(
            "Generating a {}-day itinerary for trip {trip_id} ({destination}) with {}",
            trip.total_days,
            self.generator.name()
        );

        let request = prompts::itinerary(
            &destination,
            trip.total_days,
            params.budget_min,
            params.budget_max,
            &params.preferences,
        );
        let text = self.generator.generate(&request).await?;
        let itinerary = ingest::ingest_itinerary(&text);

        let stored = itinerary.clone();
        self.with_db(move |db| db.set_itinerary(trip_id, &stored))
            .await?;
        Ok(itinerary)
    }
}
