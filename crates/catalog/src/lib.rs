//! Catalog domain module.
//!
//! This crate contains the pure logic of the catalog view: the product
//! model with tolerant decoding, the stock classifier, the query/filter
//! pipeline, and the pagination engine. No IO, no HTTP, no storage.

pub mod page;
pub mod product;
pub mod query;
pub mod stock;

pub use page::{PAGE_WINDOW, Page, page_window, paginate};
pub use product::{AlertConfig, Product, ProductDraft, ProductId, ProductIndex, ProductPatch};
pub use query::{Filters, QueryCriteria, StockFilter, apply};
pub use stock::{AVERAGE_CEILING, DEFAULT_MIN_QUANTITY, StockStatus, classify};
