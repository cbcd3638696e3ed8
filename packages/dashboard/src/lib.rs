// ABOUTME: Client-side taxonomy manager for the Atelier admin dashboard
// ABOUTME: HTTP client, local cache, and the selection/editing state machine

pub mod cache;
pub mod client;
pub mod controller;
pub mod state;

pub use cache::TaxonomyCache;
pub use client::{ClientError, ClientResult, HttpTaxonomyClient, TaxonomyApi, DEFAULT_TIMEOUT};
pub use controller::{ControllerError, ControllerResult, TaxonomyController};
pub use state::{EntityForm, Level, ListMode, ListState, DEFAULT_TAG_TYPE_COLOR};
