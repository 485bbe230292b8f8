//! Implements CalendarPort against the Google Calendar REST API (v3).
//!
//! "Today" and "yesterday" are rolling 24-hour windows ending or starting at now (UTC).

use super::{send, send_json, GoogleSession};
use crate::domain::{CalendarEvent, DomainError, NewEvent};
use crate::ports::CalendarPort;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Deserialize;
use tracing::{debug, info};

const CALENDAR_API_URL: &str = "https://www.googleapis.com/calendar/v3/calendars";
const MAX_LISTED_EVENTS: u32 = 10;

pub struct GoogleCalendarAdapter {
    session: GoogleSession,
    calendar_id: String,
}

impl GoogleCalendarAdapter {
    pub fn new(session: GoogleSession, calendar_id: impl Into<String>) -> Self {
        Self {
            session,
            calendar_id: calendar_id.into(),
        }
    }

    fn events_url(&self) -> String {
        format!("{}/{}/events", CALENDAR_API_URL, self.calendar_id)
    }

    async fn list_between(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, DomainError> {
        let list: EventList = send_json(
            self.session.get(&self.events_url()).query(&[
                ("timeMin", rfc3339(time_min)),
                ("timeMax", rfc3339(time_max)),
                ("maxResults", MAX_LISTED_EVENTS.to_string()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ]),
            DomainError::Calendar,
        )
        .await?;
        debug!(count = list.items.len(), "calendar list returned");
        Ok(list.items.into_iter().map(ApiEvent::into_event).collect())
    }
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<ApiEvent>,
}

#[derive(Deserialize)]
struct ApiEvent {
    #[serde(default)]
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    start: EventTime,
    #[serde(default)]
    end: EventTime,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    attendees: Vec<Attendee>,
}

/// Timed events carry `dateTime`; all-day events carry `date`.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    #[serde(default)]
    date_time: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Deserialize)]
struct Attendee {
    #[serde(default)]
    email: String,
}

impl EventTime {
    fn display(self) -> String {
        self.date_time.or(self.date).unwrap_or_default()
    }
}

impl ApiEvent {
    fn into_event(self) -> CalendarEvent {
        CalendarEvent {
            id: self.id,
            summary: self.summary.unwrap_or_else(|| "(no title)".to_string()),
            start: self.start.display(),
            end: self.end.display(),
            location: self.location.filter(|l| !l.is_empty()),
            description: self.description.filter(|d| !d.is_empty()),
            attendees: self.attendees.into_iter().map(|a| a.email).collect(),
        }
    }
}

fn insert_body(event: &NewEvent) -> serde_json::Value {
    let mut body = serde_json::json!({
        "summary": event.summary,
        "description": event.description,
        "location": event.location,
        "start": {"dateTime": rfc3339(event.start), "timeZone": "UTC"},
        "end": {"dateTime": rfc3339(event.end), "timeZone": "UTC"},
    });
    if !event.attendees.is_empty() {
        body["attendees"] = event
            .attendees
            .iter()
            .map(|email| serde_json::json!({ "email": email }))
            .collect();
    }
    body
}

#[async_trait::async_trait]
impl CalendarPort for GoogleCalendarAdapter {
    async fn list_today(&self) -> Result<Vec<CalendarEvent>, DomainError> {
        let now = Utc::now();
        self.list_between(now, now + Duration::days(1)).await
    }

    async fn list_yesterday(&self) -> Result<Vec<CalendarEvent>, DomainError> {
        let now = Utc::now();
        self.list_between(now - Duration::days(1), now).await
    }

    async fn create(&self, event: &NewEvent) -> Result<CalendarEvent, DomainError> {
        let created: ApiEvent = send_json(
            self.session
                .post(&self.events_url())
                .query(&[("sendUpdates", "all")])
                .json(&insert_body(event)),
            DomainError::Calendar,
        )
        .await?;
        info!(event_id = %created.id, "calendar event inserted");
        Ok(created.into_event())
    }

    async fn delete(&self, event_id: &str) -> Result<bool, DomainError> {
        let url = format!("{}/{}", self.events_url(), event_id);
        send(
            self.session.delete(&url).query(&[("sendUpdates", "all")]),
            DomainError::Calendar,
        )
        .await?;
        info!(event_id = %event_id, "calendar event deleted");
        Ok(true)
    }
}
