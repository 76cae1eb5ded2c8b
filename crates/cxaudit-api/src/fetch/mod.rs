pub mod pagespeed;
pub mod website;

pub use pagespeed::{HttpPageSpeedFetcher, PageSpeedFetcher};
pub use website::{HttpWebsiteFetcher, WebsiteFetcher};
