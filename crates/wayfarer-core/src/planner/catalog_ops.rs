//! Catalogue operations for the TripPlanner: cities, activities and the
//! generator-backed suggestions that fill gaps in the catalogue.

use log::{info, warn};

use super::TripPlanner;
use crate::{
    error::{Result, TravelError},
    generation::{prompts, ActivitySuggestion, CityInfo, SuggestionList},
    ingest,
    models::{
        Activity, ActivityFilter, ActivityRefresh, CategoryStats, City, CityFilter, NewActivity,
        Page,
    },
    params::{
        require_text, BrowseActivities, PopularCities, RefreshActivities, SearchActivities,
        SearchCities, SuggestActivities, DEFAULT_INTERESTS,
    },
};

/// Per-activity budget assumed when none is given.
const DEFAULT_ACTIVITY_BUDGET: f64 = 2000.0;

const DEFAULT_POPULAR_LIMIT: u32 = 10;

fn default_interests() -> Vec<String> {
    DEFAULT_INTERESTS.iter().map(|s| (*s).to_string()).collect()
}

impl TripPlanner {
    /// Searches cities by name or country, most popular first.
    pub async fn search_cities(&self, params: &SearchCities) -> Result<Vec<City>> {
        let filter = CityFilter::from(params);
        self.with_db(move |db| db.search_cities(&filter)).await
    }

    pub async fn popular_cities(&self, params: &PopularCities) -> Result<Vec<City>> {
        let filter = CityFilter {
            limit: params.limit.unwrap_or(DEFAULT_POPULAR_LIMIT),
            ..CityFilter::default()
        };
        self.with_db(move |db| db.search_cities(&filter)).await
    }

    pub async fn get_city(&self, city_id: u64) -> Result<City> {
        self.with_db(move |db| db.get_city(city_id)).await
    }

    /// Generated traveller summary of a catalogue city.
    pub async fn city_info(&self, city_id: u64) -> Result<CityInfo> {
        let city = self.get_city(city_id).await?;
        info!("Requesting city summary for {} from {}", city.name, self.generator.name());

        let request = prompts::city_info(&city.name, Some(&city.country));
        let text = self.generator.generate(&request).await?;
        ingest::parse_structured(&text)
    }

    /// One city's activities, cheapest first. An empty result triggers a
    /// backfill from the generator.
    pub async fn browse_activities(
        &self,
        city_id: u64,
        params: &BrowseActivities,
    ) -> Result<Page<Activity>> {
        let filter = params.to_filter(city_id)?;
        let city = self.get_city(city_id).await?;
        self.find_with_backfill(filter, Some(city)).await
    }

    /// Searches the whole catalogue. When the search is scoped to a city and
    /// nothing matches, the city is backfilled from the generator.
    pub async fn search_activities(&self, params: &SearchActivities) -> Result<Page<Activity>> {
        let filter = ActivityFilter::try_from(params)?;
        let city = match filter.city_id {
            Some(city_id) => Some(self.get_city(city_id).await?),
            None => None,
        };
        self.find_with_backfill(filter, city).await
    }

    async fn find_with_backfill(
        &self,
        filter: ActivityFilter,
        city: Option<City>,
    ) -> Result<Page<Activity>> {
        let query = filter.clone();
        let page = self.with_db(move |db| db.find_activities(&query)).await?;
        let Some(city) = city else {
            return Ok(page);
        };
        if page.pagination.total > 0 {
            return Ok(page);
        }

        let budget = filter.max_cost.unwrap_or(DEFAULT_ACTIVITY_BUDGET);
        match self
            .store_suggestions(&city, &default_interests(), budget)
            .await
        {
            Ok(0) => Ok(page),
            Ok(added) => {
                info!("Backfilled {added} activities for {}", city.name);
                self.with_db(move |db| db.find_activities(&filter)).await
            }
            Err(e) => {
                warn!("Could not backfill activities for {}: {e}", city.name);
                Ok(page)
            }
        }
    }

    /// Asks for suggestions and inserts those whose name is new for the
    /// city. Returns the number inserted.
    async fn store_suggestions(&self, city: &City, interests: &[String], budget: f64) -> Result<u32> {
        let suggestions = self
            .request_suggestions(&city.name, interests, Some(budget))
            .await?;
        let activities: Vec<NewActivity> = suggestions
            .iter()
            .filter_map(ActivitySuggestion::to_new_activity)
            .collect();
        if activities.is_empty() {
            return Ok(0);
        }

        let city_id = city.id;
        self.with_db(move |db| db.insert_activities(city_id, &activities)).await
    }

    async fn request_suggestions(
        &self,
        city_name: &str,
        interests: &[String],
        budget: Option<f64>,
    ) -> Result<Vec<ActivitySuggestion>> {
        info!(
            "Requesting activity suggestions for {city_name} from {}",
            self.generator.name()
        );
        let request = prompts::activity_suggestions(city_name, interests, budget);
        let text = self.generator.generate(&request).await?;
        let list: SuggestionList = ingest::parse_structured(&text)?;
        Ok(list.activities)
    }

    /// Count and average cost for every category, including empty ones.
    pub async fn activity_categories(&self) -> Result<Vec<CategoryStats>> {
        self.with_db(|db| db.category_stats()).await
    }

    /// Adds newly suggested activities to a city's catalogue. Unlike the
    /// automatic backfill, generation failures are reported.
    pub async fn refresh_activities(
        &self,
        city_id: u64,
        params: &RefreshActivities,
    ) -> Result<ActivityRefresh> {
        let city = self.get_city(city_id).await?;
        let interests = params
            .interests
            .clone()
            .filter(|i| !i.is_empty())
            .unwrap_or_else(default_interests);
        let budget = params.max_budget.unwrap_or(DEFAULT_ACTIVITY_BUDGET);
        if !budget.is_finite() || budget < 0.0 {
            return Err(
                TravelError::invalid_input("max_budget").with_reason("must be a non-negative number")
            );
        }

        let added = self.store_suggestions(&city, &interests, budget).await?;
        let activities = self
            .with_db(move |db| db.list_city_activities(city_id))
            .await?;
        info!("Refreshed activities for {}: {added} new", city.name);

        Ok(ActivityRefresh { added, activities })
    }

    /// Suggestions for any named city, catalogued or not. Nothing is stored.
    pub async fn suggest_activities(
        &self,
        params: &SuggestActivities,
    ) -> Result<Vec<ActivitySuggestion>> {
        let city_name = require_text("city_name", params.city_name.as_deref())?;
        self.request_suggestions(&city_name, &params.interests, params.budget_per_activity).await
    }
}
