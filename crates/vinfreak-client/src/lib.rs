pub mod card;
pub mod client;
pub mod error;
pub mod listing;
pub mod normalize;
pub mod query;
pub mod source;

pub use card::VehicleCard;
pub use client::{fetch_all_pages, CarsClient, MAX_PAGES};
pub use error::ClientError;
pub use listing::{Completion, ListingController, LoadKind, LoadState, LoadTicket};
pub use normalize::normalize_page;
pub use query::{build_query, QueryParams};
pub use source::PageSource;
