pub mod error;
pub mod fetch;
pub mod handlers;
pub mod pipeline;
pub mod rate_limit;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use fetch::{HttpPageSpeedFetcher, HttpWebsiteFetcher, PageSpeedFetcher, WebsiteFetcher};
pub use pipeline::AuditPipeline;
pub use rate_limit::{client_key, FixedWindowLimiter, RateLimiter};
pub use routes::create_router;
pub use server::Server;
pub use state::AppState;
