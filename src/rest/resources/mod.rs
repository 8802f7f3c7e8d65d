//! Bookstore entities.
//!
//! Both entities are listed with [`PageParams`](crate::rest::PageParams) and
//! share the same path layout: `{plural}` for list and create,
//! `{plural}/{id}` for fetch, replace and delete.

mod author;
mod book;

pub use author::Author;
pub use book::Book;
