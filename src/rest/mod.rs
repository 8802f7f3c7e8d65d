//! Typed resource access for the bookstore REST API.
//!
//! - **[`RestResource`]**: CRUD operations and payload transform hooks
//! - **[`ResourceResponse<T>`]**: decoded data plus pagination links, via `Deref`
//! - **[`ResourcePath`] / [`ResourceOperation`]**: per-operation path tables
//! - **[`ResourceError`]**: semantic errors (not found, validation failed, ...)
//! - **[`PageParams`]**: `page` / `per_page` list parameters
//! - **[`resources`]**: the [`Author`](resources::Author) and [`Book`](resources::Book) entities
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore_client::rest::{PageParams, RestResource};
//! use bookstore_client::{Book, RestClient};
//!
//! let page = Book::query(&client, Some(PageParams::new(1, 20))).await?;
//! for book in page.iter() {
//!     println!("{:?}", book.title);
//! }
//!
//! let mut book = Book::get(&client, 12).await?.into_inner();
//! book.price = Some(9.5);
//! let stored = book.persist(&client).await?;  // PUT, since the id is set
//!
//! Book::delete(&client, 12).await?;
//! ```

mod errors;
mod path;
mod resource;
mod response;

pub mod resources;

pub use errors::ResourceError;
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::{PageParams, RestResource};
pub use response::ResourceResponse;
