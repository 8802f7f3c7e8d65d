//! Book resource.
//!
//! `publicationDate` is normalized in both directions: records received from
//! the backend may carry a full timestamp and are reduced to a calendar date,
//! and records sent to it always carry `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dates;
use crate::rest::{PageParams, ResourceError, ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

const PUBLICATION_DATE: &str = "publicationDate";

/// A book in the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// The unique identifier. Absent for unsaved records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Title.
    #[serde(default)]
    pub title: Option<String>,

    /// Blurb.
    #[serde(default)]
    pub description: Option<String>,

    /// Publication date, local calendar date.
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,

    /// List price.
    #[serde(default)]
    pub price: Option<f64>,
}

impl RestResource for Book {
    type Id = i64;
    type QueryParams = PageParams;

    const NAME: &'static str = "Book";
    const PLURAL: &'static str = "books";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Query, &[], "books"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["id"], "books/{id}"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Save, &[], "books"),
        ResourcePath::new(HttpMethod::Put, ResourceOperation::Update, &["id"], "books/{id}"),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "books/{id}",
        ),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }

    fn transform_response(mut record: Value) -> Result<Value, ResourceError> {
        dates::localize_field(&mut record, PUBLICATION_DATE).map_err(|source| {
            ResourceError::Transform {
                resource: Self::NAME,
                source,
            }
        })?;
        Ok(record)
    }

    fn transform_request(mut record: Value) -> Result<Value, ResourceError> {
        dates::serverize_field(&mut record, PUBLICATION_DATE).map_err(|source| {
            ResourceError::Transform {
                resource: Self::NAME,
                source,
            }
        })?;
        Ok(record)
    }
}
