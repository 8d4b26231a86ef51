//! Account operations for the TripPlanner.

use log::info;
use tokio::task;

use super::TripPlanner;
use crate::{
    error::{Result, TravelError},
    models::{ProfileChanges, User},
    params::{Login, RegisterUser, UpdateProfile},
};

impl TripPlanner {
    /// Creates an account. The password is hashed with bcrypt off the async
    /// runtime.
    pub async fn register(&self, params: &RegisterUser) -> Result<User> {
        let (email, password, name) = params.validate()?;
        let cost = self.hash_cost;

        let password_hash = task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(TravelError::join)??;

        let user = self
            .with_db(move |db| db.create_user(&email, &password_hash, &name))
            .await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Checks credentials. Unknown emails and wrong passwords fail the same
    /// way.
    pub async fn login(&self, params: &Login) -> Result<User> {
        let (email, password) = params.validate()?;

        let Some((user, password_hash)) = self
            .with_db(move |db| db.find_credentials(&email))
            .await?
        else {
            return Err(TravelError::InvalidCredentials);
        };

        let matches = task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
            .await
            .map_err(TravelError::join)??;
        if !matches {
            return Err(TravelError::InvalidCredentials);
        }
        Ok(user)
    }

    pub async fn get_user(&self, user_id: u64) -> Result<User> {
        self.with_db(move |db| db.get_user(user_id)).await
    }

    /// Applies a partial profile update.
    pub async fn update_profile(&self, user_id: u64, params: &UpdateProfile) -> Result<User> {
        let changes = ProfileChanges::try_from(params)?;
        self.with_db(move |db| db.update_profile(user_id, &changes)).await
    }

    /// Deletes the account and everything it owns.
    pub async fn delete_account(&self, user_id: u64) -> Result<()> {
        self.with_db(move |db| db.delete_user(user_id)).await?;
        info!("Deleted user {user_id}");
        Ok(())
    }
}
