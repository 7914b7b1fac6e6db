pub mod color;
pub mod error;
pub mod model;
pub mod parser;
pub mod service;

pub use color::{generate_color, HslaColor, DEFAULT_COLOR_SLOTS};
pub use error::{AggregationError, FeedError, FetchError, ParseError};
pub use model::{AggregationResult, CalendarEvent, EventRecord, EventTime, FeedSource};
pub use parser::{parse_feed, ParsedFeed};
pub use service::{CalendarService, CalendarServiceApi, DEFAULT_CACHE_TTL};
