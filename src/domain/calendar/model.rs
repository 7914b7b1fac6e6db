use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A start or end value as it appeared in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EventTime {
    /// Bare `DATE` value, no time of day
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    /// Local wall-clock time with no resolvable zone
    Floating(NaiveDateTime),
}

impl EventTime {
    pub fn is_date(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }
}

/// One configured feed that was loaded during an aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub id: String,
    pub url: String,
    pub name: String,
    pub color: String,
}

impl FeedSource {
    /// Identifier for the feed at the given zero-based configured position.
    pub fn id_for(index: usize) -> String {
        format!("feed-{}", index + 1)
    }

    /// Name used when the feed does not declare one.
    pub fn fallback_name(index: usize) -> String {
        format!("Feed {}", index + 1)
    }
}

/// Metadata exposed per feed in the events response
#[derive(Debug, Clone, Serialize)]
pub struct FeedMeta<'a> {
    pub name: &'a str,
    pub color: &'a str,
}

/// Event record as extracted from a single VEVENT, before it is tagged with its feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub title: Option<String>,
    pub start: EventTime,
    pub end: Option<EventTime>,
    pub all_day: bool,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub start: EventTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,
    pub all_day: bool,
    pub source: String,
    pub source_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CalendarEvent {
    pub fn from_record(record: EventRecord, feed: &FeedSource) -> Self {
        Self {
            title: record.title,
            start: record.start,
            end: record.end,
            all_day: record.all_day,
            source: feed.id.clone(),
            source_name: feed.name.clone(),
            description: record.description,
            location: record.location,
        }
    }
}

/// Merged output of one aggregation pass.
///
/// Serializes as `{ "events": [...], "feeds": { "<id>": { "name", "color" } } }`
/// with feeds kept in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    pub events: Vec<CalendarEvent>,
    #[serde(serialize_with = "serialize_feeds")]
    pub feeds: Vec<FeedSource>,
}

impl AggregationResult {
    pub fn push_feed(&mut self, feed: FeedSource, records: Vec<EventRecord>) {
        self.events.extend(
            records
                .into_iter()
                .map(|record| CalendarEvent::from_record(record, &feed)),
        );
        self.feeds.push(feed);
    }

    pub fn feed(&self, id: &str) -> Option<&FeedSource> {
        self.feeds.iter().find(|feed| feed.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

fn serialize_feeds<S>(feeds: &[FeedSource], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(feeds.len()))?;
    for feed in feeds {
        map.serialize_entry(
            &feed.id,
            &FeedMeta {
                name: &feed.name,
                color: &feed.color,
            },
        )?;
    }
    map.end()
}
