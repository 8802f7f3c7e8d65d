//! # Bookstore Client
//!
//! A typed client for the bookstore REST API, with list and detail
//! controllers for the `Author` and `Book` entities.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`BookstoreConfig`] and [`BookstoreConfigBuilder`]
//! - An async HTTP transport that parses `Link` pagination headers ([`PageLinks`])
//! - The [`RestResource`](rest::RestResource) trait: `query`, `get`, `save`,
//!   `update` and `delete` with request/response transform hooks
//! - [`Author`] and [`Book`] resources; `Book` normalizes `publicationDate`
//! - [`ListController`](controller::ListController) and
//!   [`DetailController`](controller::DetailController), which discard
//!   out-of-order responses and report failures as `Result`s
//! - [`Lookup`](controller::Lookup) for the related records an edit form
//!   offers as choices
//!
//! ## Quick Start
//!
//! ```rust
//! use bookstore_client::{BookstoreConfig, BaseUrl};
//!
//! let config = BookstoreConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:8080").unwrap())
//!     .page_size(20)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_path(), "/api");
//! ```
//!
//! ## Working With Resources
//!
//! ```rust,ignore
//! use bookstore_client::rest::{PageParams, RestResource};
//! use bookstore_client::{Author, RestClient};
//!
//! let client = RestClient::new(&config)?;
//!
//! let page = Author::query(&client, Some(PageParams::new(1, 20))).await?;
//! println!("{} authors, next page: {:?}", page.len(), page.links().page_number("next"));
//!
//! let author = Author { name: Some("Italo".into()), ..Default::default() };
//! let stored = author.persist(&client).await?;  // POST, no id yet
//! ```
//!
//! ## Controllers
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bookstore_client::controller::{ListController, NoopView};
//! use bookstore_client::Book;
//!
//! let books: ListController<Book, _> = ListController::new(Arc::new(client), NoopView);
//! books.load_page(2).await?;
//!
//! books.delete(7).await?;          // fetch, then ask for confirmation
//! books.confirm_delete(7).await?;  // delete, reload, clear selection
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and controller state are instance-owned
//! - **Fail-fast validation**: configuration newtypes validate on construction
//! - **Thread-safe**: clients and controllers are `Send + Sync`
//! - **No silent failures**: every failed call is returned to the caller

pub mod clients;
pub mod config;
pub mod controller;
pub mod dates;
pub mod error;
pub mod rest;

pub use config::{BaseUrl, BookstoreConfig, BookstoreConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MalformedBodyError, PageLinks, RestClient,
    RestError,
};

// Re-export resources
pub use rest::resources::{Author, Book};
pub use rest::{PageParams, ResourceError, ResourceResponse, RestResource};

pub use controller::{ControllerError, DetailController, ListController, Lookup};
