//! Wire layer for the membership console REST API: list query parameters,
//! paginated response types and the async HTTP client.

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{ListQuery, Query, QueryCommon, SortDirection};
