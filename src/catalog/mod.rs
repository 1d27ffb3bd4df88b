pub mod client;
pub mod detail;
pub mod view;

pub use client::{CatalogClient, CatalogState};
pub use detail::{ProductCard, ProductDetail, SpecRow, format_rupees};
pub use view::{CatalogView, LeadFormProps, LeadRequest, LoadTicket, ViewMode};
