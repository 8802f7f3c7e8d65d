//! The [`RestResource`] trait: typed CRUD access to one entity type.
//!
//! A resource declares its name, collection path and path table; the trait
//! supplies `query()`, `get()`, `save()`, `update()`, `delete()` and
//! `persist()` on top of [`RestClient`].
//!
//! Each operation is sent with the HTTP method its [`ResourcePath`] declares.
//! A record-bearing response must carry a JSON object; an empty body is an
//! error, never a blank record.
//!
//! Payloads pass through two hooks. [`RestResource::transform_response`]
//! rewrites each record received from the backend before it is decoded, and
//! [`RestResource::transform_request`] rewrites the encoded record before it
//! is sent. Both default to the identity.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore_client::rest::{RestResource, ResourcePath, ResourceOperation, PageParams};
//! use bookstore_client::HttpMethod;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! pub struct Publisher {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     pub id: Option<i64>,
//!     pub name: Option<String>,
//! }
//!
//! impl RestResource for Publisher {
//!     type Id = i64;
//!     type QueryParams = PageParams;
//!
//!     const NAME: &'static str = "Publisher";
//!     const PLURAL: &'static str = "publishers";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::Query, &[], "publishers"),
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["id"], "publishers/{id}"),
//!     ];
//!
//!     fn get_id(&self) -> Option<Self::Id> {
//!         self.id
//!     }
//! }
//!
//! let page = Publisher::query(&client, Some(PageParams::new(1, 20))).await?;
//! let one = Publisher::get(&client, 3).await?;
//! ```

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::str::FromStr;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{HttpMethod, HttpResponse, RestClient};
use crate::rest::{
    build_path, get_path, ResourceError, ResourceOperation, ResourcePath, ResourceResponse,
};

/// Page selection for list queries, sent as `?page=P&per_page=N`.
///
/// Pages are 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// The 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of records per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl PageParams {
    /// Creates parameters selecting `page` with `per_page` records.
    #[must_use]
    pub const fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }
}

/// A REST resource that can be listed, fetched, created, updated and deleted.
///
/// `Default` must produce the blank "new record" template: every field
/// `None`, including the identity.
#[allow(async_fn_in_trait)]
pub trait RestResource:
    Serialize + DeserializeOwned + Clone + Default + Debug + Send + Sync + Sized
{
    /// The type of the resource's identifier.
    type Id: Display + Debug + Clone + PartialEq + FromStr + Send + Sync;

    /// Parameters for `query()`. Use `()` if none are needed.
    type QueryParams: Serialize + Default + Send + Sync;

    /// The singular name of the resource (e.g., "Author").
    const NAME: &'static str;

    /// The collection name used in URL paths (e.g., "authors").
    const PLURAL: &'static str;

    /// The path table for this resource.
    const PATHS: &'static [ResourcePath];

    /// Returns the resource's ID, or `None` for an unsaved record.
    fn get_id(&self) -> Option<Self::Id>;

    /// Rewrites a record received from the backend before it is decoded.
    ///
    /// # Errors
    ///
    /// Implementations return [`ResourceError::Transform`] for payloads they
    /// cannot normalize.
    fn transform_response(record: Value) -> Result<Value, ResourceError> {
        Ok(record)
    }

    /// Rewrites an encoded record before it is sent to the backend.
    ///
    /// # Errors
    ///
    /// Implementations return [`ResourceError::Transform`] for payloads they
    /// cannot normalize.
    fn transform_request(record: Value) -> Result<Value, ResourceError> {
        Ok(record)
    }

    /// Lists records, one page at a time.
    ///
    /// The response derefs to `Vec<Self>` and carries the parsed `Link`
    /// header in [`ResourceResponse::links`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if no query path exists,
    /// or the mapped transport error.
    async fn query(
        client: &RestClient,
        params: Option<Self::QueryParams>,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        let (method, path) = resolve_path::<Self>(ResourceOperation::Query, None)?;

        let query = params
            .map(|p| serialize_to_query::<Self, _>(&p))
            .transpose()?
            .filter(|q| !q.is_empty());

        let mut response = client
            .request(method, &path, None, query)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, None))?;

        response.body = match std::mem::take(&mut response.body) {
            Value::Array(records) => Value::Array(
                records
                    .into_iter()
                    .map(Self::transform_response)
                    .collect::<Result<Vec<_>, ResourceError>>()?,
            ),
            other => other,
        };

        ResourceResponse::from_http_response(response, Self::NAME)
    }

    /// Fetches one record by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the backend answers 404.
    async fn get(client: &RestClient, id: Self::Id) -> Result<ResourceResponse<Self>, ResourceError> {
        let id_str = id.to_string();
        let (method, path) = resolve_path::<Self>(ResourceOperation::Get, Some(&id_str))?;

        let response = client
            .request(method, &path, None, None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, Some(&id_str)))?;

        decode_record::<Self>(response)
    }

    /// Creates the record (POST by default) and returns the stored version.
    ///
    /// An absent identity is not sent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ValidationFailed`] if the backend rejects the record.
    async fn save(&self, client: &RestClient) -> Result<Self, ResourceError> {
        let (method, path) = resolve_path::<Self>(ResourceOperation::Save, None)?;
        let body = encode_record(self)?;

        let response = client
            .request(method, &path, Some(body), None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, None))?;

        decode_record::<Self>(response).map(ResourceResponse::into_inner)
    }

    /// Replaces the stored record (PUT by default) and returns the stored
    /// version.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the record has no identity,
    /// [`ResourceError::NotFound`] or [`ResourceError::ValidationFailed`] as
    /// reported by the backend.
    async fn update(&self, client: &RestClient) -> Result<Self, ResourceError> {
        let id = self.get_id().ok_or(ResourceError::MissingId {
            resource: Self::NAME,
            operation: ResourceOperation::Update.as_str(),
        })?;
        let id_str = id.to_string();
        let (method, path) = resolve_path::<Self>(ResourceOperation::Update, Some(&id_str))?;
        let body = encode_record(self)?;

        let response = client
            .request(method, &path, Some(body), None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, Some(&id_str)))?;

        decode_record::<Self>(response).map(ResourceResponse::into_inner)
    }

    /// Deletes the record with the given ID. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the backend answers 404.
    async fn delete(client: &RestClient, id: Self::Id) -> Result<(), ResourceError> {
        let id_str = id.to_string();
        let (method, path) = resolve_path::<Self>(ResourceOperation::Delete, Some(&id_str))?;

        client
            .request(method, &path, None, None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, Some(&id_str)))?;

        Ok(())
    }

    /// Updates the record if it has an identity, creates it otherwise.
    ///
    /// # Errors
    ///
    /// Propagates the error of [`RestResource::update`] or [`RestResource::save`].
    async fn persist(&self, client: &RestClient) -> Result<Self, ResourceError> {
        if self.get_id().is_some() {
            self.update(client).await
        } else {
            self.save(client).await
        }
    }
}

/// Selects the path for `operation` and returns its method and filled template.
fn resolve_path<R: RestResource>(
    operation: ResourceOperation,
    id: Option<&str>,
) -> Result<(HttpMethod, String), ResourceError> {
    let mut ids: HashMap<&str, &str> = HashMap::new();
    if let Some(id) = id {
        ids.insert("id", id);
    }

    let available_ids: Vec<&str> = ids.keys().copied().collect();
    let path = get_path(R::PATHS, operation, &available_ids).ok_or(
        ResourceError::PathResolutionFailed {
            resource: R::NAME,
            operation: operation.as_str(),
        },
    )?;

    Ok((path.http_method, build_path(path.template, &ids)))
}

fn encode_record<R: RestResource>(record: &R) -> Result<Value, ResourceError> {
    let value = serde_json::to_value(record).map_err(|e| ResourceError::Serialization {
        resource: R::NAME,
        message: e.to_string(),
    })?;
    R::transform_request(value)
}

fn decode_record<R: RestResource>(
    mut response: HttpResponse,
) -> Result<ResourceResponse<R>, ResourceError> {
    let body = std::mem::take(&mut response.body);
    let found = match &body {
        Value::Object(_) => None,
        Value::Null => Some("an empty body"),
        Value::Array(_) => Some("an array"),
        Value::String(_) => Some("a string"),
        Value::Number(_) => Some("a number"),
        Value::Bool(_) => Some("a boolean"),
    };
    if let Some(found) = found {
        return Err(ResourceError::Deserialization {
            resource: R::NAME,
            message: format!("expected a record object, got {found}"),
        });
    }

    response.body = R::transform_response(body)?;
    ResourceResponse::from_http_response(response, R::NAME)
}

/// Serializes a params struct to a query parameter map.
///
/// Nulls are skipped and arrays become comma-separated lists.
fn serialize_to_query<R: RestResource, T: Serialize>(
    params: &T,
) -> Result<HashMap<String, String>, ResourceError> {
    let value = serde_json::to_value(params).map_err(|e| ResourceError::Serialization {
        resource: R::NAME,
        message: format!("query parameters: {e}"),
    })?;

    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}
