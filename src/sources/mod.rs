pub mod dates;
pub mod html;
pub mod http;
pub mod issue_index;
pub mod listing_page;
pub mod registry;
pub mod topic_feed;
pub mod traits;

pub use http::HttpFetcher;
pub use registry::{FeedRegistry, RegisteredFeed};
pub use traits::EntrySource;
