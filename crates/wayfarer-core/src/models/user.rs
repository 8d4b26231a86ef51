//! User account model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A registered traveller. The password hash never leaves the database
/// layer, so it is not part of this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub photo_url: Option<String>,
    /// ISO language code, `en` unless the user changed it
    pub language_preference: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
