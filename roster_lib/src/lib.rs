//! Library layer for the membership console list pages: table state,
//! pagination controls, debounced search, last-request-wins fetching,
//! in-memory tables and a retrying API client.

pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod local;
pub mod pages;
pub mod table;
pub mod tracker;
pub mod validation;
pub mod view;

pub use roster_api;
pub use roster_api::types;
pub use roster_api::{ListQuery, Query, SortDirection};

pub use client::{RecordSource, ResourceSource, RetryingClient};
pub use config::{Config, RetryConfig};
pub use debounce::Debouncer;
pub use error::RosterError;
pub use local::{Column, Columns, FieldValue, LocalTable};
pub use pages::{PageItem, PageNumbers};
pub use table::TableState;
pub use tracker::{RequestTicket, RequestTracker};
pub use view::{FetchOutcome, ListView};
