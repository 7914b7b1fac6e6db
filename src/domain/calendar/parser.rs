use super::error::ParseError;
use super::model::{EventRecord, EventTime};
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::parser::{read_calendar, unfold};
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, EventLike as _,
};
use once_cell::sync::Lazy;
use regex::Regex;

static CALENDAR_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^X-WR-CALNAME:(.*)$").expect("calendar name pattern is valid")
});

static CALENDAR_BEGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^BEGIN:VCALENDAR\s*$").expect("calendar begin pattern is valid")
});

static BARE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{8}$").expect("bare date pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeed {
    /// Value of `X-WR-CALNAME`, if the feed declares a non-blank one
    pub name: Option<String>,
    pub events: Vec<EventRecord>,
}

/// Parse raw ICS text into the calendar name and its VEVENT records.
pub fn parse_feed(text: &str) -> Result<ParsedFeed, ParseError> {
    if !CALENDAR_BEGIN.is_match(text) {
        return Err(ParseError::NotACalendar);
    }

    let unfolded = unfold(text);
    let calendar: Calendar = read_calendar(&unfolded)
        .map_err(ParseError::Malformed)?
        .into();

    let events = calendar
        .components
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(event),
            _ => None,
        })
        .filter_map(to_record)
        .collect();

    Ok(ParsedFeed {
        name: calendar_name(text),
        events,
    })
}

/// Find the `X-WR-CALNAME` directive. Blank values count as absent.
pub fn calendar_name(text: &str) -> Option<String> {
    CALENDAR_NAME
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

fn to_record(event: &icalendar::Event) -> Option<EventRecord> {
    let Some(start) = event.get_start().or_else(|| bare_date(event, "DTSTART")) else {
        tracing::debug!(
            uid = event.get_uid().unwrap_or_default(),
            "Skipping VEVENT without a usable DTSTART"
        );
        return None;
    };
    let start = to_event_time(start);

    Some(EventRecord {
        title: event.get_summary().map(str::to_string),
        all_day: start.is_date(),
        start,
        end: event
            .get_end()
            .or_else(|| bare_date(event, "DTEND"))
            .map(to_event_time),
        description: event.get_description().map(str::to_string),
        location: event.property_value("LOCATION").map(str::to_string),
    })
}

/// `DTSTART:20240301` without `VALUE=DATE` is still a whole-day value
fn bare_date(event: &icalendar::Event, property: &str) -> Option<DatePerhapsTime> {
    let value = event.property_value(property)?.trim();
    if !BARE_DATE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y%m%d")
        .ok()
        .map(DatePerhapsTime::Date)
}

/// Zoned values are converted to UTC when the TZID is a known IANA zone,
/// otherwise they are kept as floating local time.
fn to_event_time(value: DatePerhapsTime) -> EventTime {
    match value {
        DatePerhapsTime::Date(date) => EventTime::Date(date),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(date_time)) => {
            EventTime::DateTime(date_time)
        }
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => EventTime::Floating(naive),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => tzid
            .parse::<Tz>()
            .ok()
            .and_then(|tz| tz.from_local_datetime(&date_time).earliest())
            .map(|zoned| EventTime::DateTime(zoned.with_timezone(&Utc)))
            .unwrap_or(EventTime::Floating(date_time)),
    }
}
