pub mod app;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod render;
pub mod state;
pub mod transport;
pub mod ui;
pub mod validate;

pub use app::router;
pub use config::{UpstreamConfig, resolve_port, resolve_upstream};
pub use errors::{AppError, FetchError};
pub use fetcher::StatsFetcher;
pub use state::AppState;
pub use transport::{ReqwestTransport, Transport};
