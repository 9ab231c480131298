pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod upload;

pub use config::AppConfig;
pub use error::ApiError;
pub use metrics::{Metrics, MetricsSnapshot};
pub use routes::{AppState, router};
pub use upload::UploadConfig;
