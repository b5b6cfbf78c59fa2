//! Stationboard departure rows.

use chrono::{DateTime, FixedOffset, Utc};

/// A single row on a stationboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    /// Line number (e.g. "4", "S12"). Often absent for long-distance trains.
    pub number: Option<String>,
    /// Category code (e.g. "T", "B", "IC", "S").
    pub category: Option<String>,
    /// Final destination of the vehicle.
    pub destination: Option<String>,
    /// Scheduled departure from the board station.
    pub departure_time: Option<DateTime<FixedOffset>>,
    /// Departure platform or stand.
    pub platform: Option<String>,
    /// Reported delay in minutes.
    pub delay_minutes: Option<i64>,
    /// Operating company.
    pub operator: Option<String>,
}

impl Departure {
    /// Label for the line badge: the number, else the category.
    pub fn line_label(&self) -> &str {
        self.number
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.category.as_deref())
            .unwrap_or("")
    }

    /// Destination for display.
    pub fn destination_or_unknown(&self) -> &str {
        self.destination
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("Unknown")
    }

    /// Whole minutes until departure, never negative.
    ///
    /// Returns `None` when the provider sent no departure time.
    pub fn minutes_until(&self, now: DateTime<Utc>) -> Option<i64> {
        let departure = self.departure_time?;
        let millis = departure
            .with_timezone(&Utc)
            .signed_duration_since(now)
            .num_milliseconds();
        let minutes = (millis as f64 / 60_000.0).round() as i64;
        Some(minutes.max(0))
    }

    /// Vehicle kind derived from the category.
    pub fn transport_kind(&self) -> TransportKind {
        TransportKind::classify(self.category.as_deref())
    }
}

/// Broad vehicle kind used for colouring board rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    Tram,
    Bus,
    Train,
    Other,
}

impl TransportKind {
    /// Classify a provider category string.
    ///
    /// Matching is case-insensitive substring matching, checked in the
    /// order tram, bus, train. The train rule includes a bare `s`, so it
    /// catches most remaining rail categories.
    pub fn classify(category: Option<&str>) -> Self {
        let Some(category) = category.filter(|c| !c.is_empty()) else {
            return TransportKind::Other;
        };
        let cat = category.to_lowercase();

        if cat.contains("tram") || cat.contains("str") {
            return TransportKind::Tram;
        }
        if cat.contains("bus") || cat.contains("nfb") {
            return TransportKind::Bus;
        }
        if ["train", "zug", "ic", "ir", "re", "s"]
            .iter()
            .any(|needle| cat.contains(needle))
        {
            return TransportKind::Train;
        }

        TransportKind::Other
    }

    /// CSS class name used by the templates.
    pub fn css_class(&self) -> &'static str {
        match self {
            TransportKind::Tram => "tram",
            TransportKind::Bus => "bus",
            TransportKind::Train => "train",
            TransportKind::Other => "default",
        }
    }
}

/// How close a departure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Leaving within 2 minutes.
    Urgent,
    /// Leaving within 5 minutes.
    Soon,
    Normal,
}

impl Urgency {
    /// Urgency for a minutes-until value.
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes <= 2 {
            Urgency::Urgent
        } else if minutes <= 5 {
            Urgency::Soon
        } else {
            Urgency::Normal
        }
    }

    /// CSS class name used by the templates (empty for normal rows).
    pub fn css_class(&self) -> &'static str {
        match self {
            Urgency::Urgent => "urgent",
            Urgency::Soon => "soon",
            Urgency::Normal => "",
        }
    }
}
