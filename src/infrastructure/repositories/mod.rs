pub mod http_ics_feed_repository;
pub mod ics_feed_repository;

pub use http_ics_feed_repository::HttpIcsFeedRepository;
pub use ics_feed_repository::IcsFeedRepository;
