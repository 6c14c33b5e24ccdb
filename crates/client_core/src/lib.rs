//! Client side of the storefront: catalog queries over HTTP, the
//! pagination-aware listing controller, and the cart.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod event_loop;
pub mod listing;
pub mod route;
pub mod types;

pub use cart::{Cart, CartTotals};
pub use catalog::{CatalogQueries, StorefrontClient};
pub use error::{StorefrontError, StorefrontResult};
pub use event_loop::{ListingCommand, ListingEvent, ListingEventLoop};
pub use listing::{FoldOutcome, IssuedQuery, ListingController, ListingState};
pub use route::RouteParams;
pub use types::{ListingQuery, ListingRequest, PageRequest, QuerySeq};
