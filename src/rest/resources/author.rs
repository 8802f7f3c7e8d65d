//! Author resource.
//!
//! ```rust,ignore
//! use bookstore_client::rest::{PageParams, RestResource};
//! use bookstore_client::Author;
//!
//! let authors = Author::query(&client, Some(PageParams::new(1, 20))).await?;
//!
//! let author = Author {
//!     name: Some("Ursula".to_string()),
//!     surname: Some("Le Guin".to_string()),
//!     ..Default::default()
//! };
//! let stored = author.save(&client).await?;
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rest::{PageParams, ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

/// A book author.
///
/// The backend already exchanges `birthDate` as a plain `YYYY-MM-DD` date,
/// so no payload transform is needed.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// The unique identifier. Absent for unsaved records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Given name.
    #[serde(default)]
    pub name: Option<String>,

    /// Family name.
    #[serde(default)]
    pub surname: Option<String>,

    /// Free-form biography.
    #[serde(default)]
    pub description: Option<String>,

    /// Date of birth.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl RestResource for Author {
    type Id = i64;
    type QueryParams = PageParams;

    const NAME: &'static str = "Author";
    const PLURAL: &'static str = "authors";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Query, &[], "authors"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Get,
            &["id"],
            "authors/{id}",
        ),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Save, &[], "authors"),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "authors/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "authors/{id}",
        ),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}
