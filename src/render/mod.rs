pub mod rss;

pub use rss::render_feed;
