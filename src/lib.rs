pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod processor;
pub mod session;

pub use catalog::{CatalogClient, CatalogState, CatalogView};
pub use error::CatalogError;
