//! Budget queries. The activities bucket and the total are derived on every
//! read and write; see [`crate::budget`].

use rusqlite::{params, Connection, Row};

use super::utils::{ensure_trip_owner, id_at};
use crate::{
    budget::{self, CostLine},
    error::{DatabaseResultExt, LookupResultExt, Result},
    models::{Budget, BudgetChanges, CostBreakdown},
};

const ENSURE_BUDGET_SQL: &str = "INSERT OR IGNORE INTO budgets (trip_id) VALUES (?1)";
const SELECT_BUDGET_SQL: &str = "SELECT id, trip_id, transport_cost, accommodation_cost, food_cost, activities_cost, misc_cost, currency FROM budgets WHERE trip_id = ?1";
const COST_LINES_SQL: &str =
    "SELECT override_cost, activity_cost FROM trip_cost_lines WHERE trip_id = ?1";
const STORE_DERIVED_SQL: &str =
    "UPDATE budgets SET activities_cost = ?1, total_budget = ?2 WHERE trip_id = ?3";
const UPDATE_BUDGET_SQL: &str = "UPDATE budgets SET transport_cost = COALESCE(?1, transport_cost), accommodation_cost = COALESCE(?2, accommodation_cost), food_cost = COALESCE(?3, food_cost), misc_cost = COALESCE(?4, misc_cost), currency = COALESCE(?5, currency) WHERE trip_id = ?6";

fn build_budget_from_row(row: &Row) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: id_at(row, 0)?,
        trip_id: id_at(row, 1)?,
        total_budget: 0.0,
        breakdown: CostBreakdown {
            transport: row.get(2)?,
            accommodation: row.get(3)?,
            food: row.get(4)?,
            activities: row.get(5)?,
            misc: row.get(6)?,
        },
        currency: row.get(7)?,
    })
}

fn cost_lines(conn: &Connection, trip_id: u64) -> Result<Vec<CostLine>> {
    let mut stmt = conn
        .prepare(COST_LINES_SQL)
        .db_context("Failed to prepare cost query")?;
    let lines = stmt
        .query_map(params![trip_id as i64], |row| {
            Ok(CostLine {
                override_cost: row.get(0)?,
                activity_cost: row.get(1)?,
            })
        })
        .db_context("Failed to query cost lines")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read cost line")?;
    Ok(lines)
}

/// Loads the budget (creating an empty one if the trip has none), recomputes
/// the derived figures and stores them.
fn load_recomputed(conn: &Connection, trip_id: u64) -> Result<Budget> {
    conn.execute(ENSURE_BUDGET_SQL, params![trip_id as i64])
        .db_context("Failed to create trip budget")?;
    let mut budget = conn
        .query_row(SELECT_BUDGET_SQL, params![trip_id as i64], build_budget_from_row)
        .or_not_found("Budget", trip_id, "Failed to query budget")?;

    let lines = cost_lines(conn, trip_id)?;
    budget::recompute(&mut budget, &lines);

    conn.execute(
        STORE_DERIVED_SQL,
        params![
            budget.breakdown.activities,
            budget.total_budget,
            trip_id as i64
        ],
    )
    .db_context("Failed to store budget totals")?;
    Ok(budget)
}

impl super::Database {
    /// Effective price inputs of every itinerary item under a trip.
    pub fn cost_lines(&self, trip_id: u64) -> Result<Vec<CostLine>> {
        cost_lines(&self.connection, trip_id)
    }

    /// The trip's budget with freshly derived activities and total.
    pub fn refresh_budget(&self, trip_id: u64) -> Result<Budget> {
        load_recomputed(&self.connection, trip_id)
    }

    /// Owner-checked budget read.
    pub fn get_budget(&self, trip_id: u64, user_id: u64) -> Result<Budget> {
        ensure_trip_owner(&self.connection, trip_id, user_id)?;
        self.refresh_budget(trip_id)
    }

    /// Updates the user-entered buckets and currency. The activities bucket
    /// cannot be set directly.
    pub fn update_budget(
        &mut self,
        trip_id: u64,
        user_id: u64,
        changes: &BudgetChanges,
    ) -> Result<Budget> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        ensure_trip_owner(&tx, trip_id, user_id)?;
        tx.execute(ENSURE_BUDGET_SQL, params![trip_id as i64])
            .db_context("Failed to create trip budget")?;
        tx.execute(
            UPDATE_BUDGET_SQL,
            params![
                changes.transport,
                changes.accommodation,
                changes.food,
                changes.misc,
                changes.currency.as_deref(),
                trip_id as i64
            ],
        )
        .db_context("Failed to update budget")?;
        let budget = load_recomputed(&tx, trip_id)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(budget)
    }
}
