//! Note header contents for an entry.

use chrono::{DateTime, Utc};
use serde_yaml::Value;

use crate::schema::JournalEntry;
use crate::settings::ImportSettings;
use crate::tags::{apply_tag_case, TagCase};
use crate::vault::FrontMatter;

const HEADER_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Header options derived from [`ImportSettings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontMatterOptions {
    pub separate_coordinate_fields: bool,
    pub tag_case: TagCase,
}

impl From<&ImportSettings> for FrontMatterOptions {
    fn from(settings: &ImportSettings) -> Self {
        Self {
            separate_coordinate_fields: settings.separate_coordinate_fields,
            tag_case: settings.tag_case,
        }
    }
}

/// Write the entry's metadata into `fm`.
///
/// Keys not managed here are left alone. Flags are only present when set,
/// so a flag cleared since the last run is removed.
pub fn apply_entry_front_matter(
    fm: &mut FrontMatter,
    entry: &JournalEntry,
    options: &FrontMatterOptions,
) {
    fm.set("creationDate", header_date(&entry.creation_date));
    fm.set("modifiedDate", header_date(&entry.modified_date));
    fm.set("uuid", entry.uuid.as_str());

    set_flag(fm, "isAllDay", entry.is_all_day);
    set_flag(fm, "pinned", entry.is_pinned);
    set_flag(fm, "starred", entry.starred);

    let tags = apply_tag_case(&entry.tags, options.tag_case);
    if !tags.is_empty() {
        fm.set(
            "tags",
            Value::Sequence(tags.into_iter().map(Value::from).collect()),
        );
    }

    if let Some(activity) = entry.activity.as_deref().filter(|a| !a.is_empty()) {
        fm.set("activity", activity);
    }

    if let Some(location) = &entry.location {
        let description = location
            .place_description()
            .unwrap_or_else(|| format!("{}, {}", location.latitude, location.longitude));
        fm.set("location", description);

        if options.separate_coordinate_fields {
            fm.remove("coordinates");
            fm.set("latitude", location.latitude);
            fm.set("longitude", location.longitude);
        } else {
            fm.remove("latitude");
            fm.remove("longitude");
            fm.set(
                "coordinates",
                format!("{},{}", location.latitude, location.longitude),
            );
        }
    }
}

fn header_date(date: &DateTime<Utc>) -> String {
    date.format(HEADER_DATE_FORMAT).to_string()
}

fn set_flag(fm: &mut FrontMatter, key: &str, value: bool) {
    if value {
        fm.set(key, true);
    } else {
        fm.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate_entry;
    use serde_json::json;

    fn entry() -> JournalEntry {
        validate_entry(&json!({
            "uuid": "abc123",
            "creationDate": "2024-04-19T21:55:53Z",
            "modifiedDate": "2024-04-20T08:05:00Z",
            "isPinned": true,
            "tags": ["Travel", "Road Trip"],
            "userActivity": {"activityName": "Walking"},
            "location": {
                "placeName": "Central Park",
                "localityName": "New York",
                "country": "United States",
                "latitude": 40.78,
                "longitude": -73.96
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_writes_entry_metadata() {
        let mut fm = FrontMatter::new();
        apply_entry_front_matter(&mut fm, &entry(), &FrontMatterOptions::default());

        assert_eq!(fm.get("creationDate").and_then(Value::as_str), Some("2024-04-19T21:55"));
        assert_eq!(fm.get("modifiedDate").and_then(Value::as_str), Some("2024-04-20T08:05"));
        assert_eq!(fm.get("uuid").and_then(Value::as_str), Some("abc123"));
        assert_eq!(fm.get("pinned").and_then(Value::as_bool), Some(true));
        assert!(!fm.contains_key("starred"));
        assert!(!fm.contains_key("isAllDay"));
        assert_eq!(fm.get("activity").and_then(Value::as_str), Some("Walking"));
        assert_eq!(
            fm.get("location").and_then(Value::as_str),
            Some("Central Park, New York, United States")
        );
        assert_eq!(fm.get("coordinates").and_then(Value::as_str), Some("40.78,-73.96"));
    }

    #[test]
    fn test_tags_are_cased() {
        let mut fm = FrontMatter::new();
        let options = FrontMatterOptions {
            tag_case: TagCase::Kebab,
            ..FrontMatterOptions::default()
        };
        apply_entry_front_matter(&mut fm, &entry(), &options);

        let tags: Vec<&str> = fm
            .get("tags")
            .and_then(Value::as_sequence)
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(tags, vec!["travel", "road-trip"]);
    }

    #[test]
    fn test_separate_coordinates() {
        let mut fm = FrontMatter::new();
        fm.set("coordinates", "stale");
        let options = FrontMatterOptions {
            separate_coordinate_fields: true,
            ..FrontMatterOptions::default()
        };
        apply_entry_front_matter(&mut fm, &entry(), &options);

        assert!(!fm.contains_key("coordinates"));
        assert_eq!(fm.get("latitude").and_then(Value::as_f64), Some(40.78));
        assert_eq!(fm.get("longitude").and_then(Value::as_f64), Some(-73.96));
    }

    #[test]
    fn test_location_without_names_uses_coordinates() {
        let e = validate_entry(&json!({
            "uuid": "x",
            "creationDate": "2024-04-19T21:55:53Z",
            "modifiedDate": "2024-04-19T21:55:53Z",
            "location": {"latitude": 1.5, "longitude": 2.0}
        }))
        .unwrap();
        let mut fm = FrontMatter::new();
        apply_entry_front_matter(&mut fm, &e, &FrontMatterOptions::default());

        assert_eq!(fm.get("location").and_then(Value::as_str), Some("1.5, 2"));
    }

    #[test]
    fn test_preserves_unrelated_keys_and_clears_flags() {
        let mut fm = FrontMatter::new();
        fm.set("mood", "good");
        fm.set("starred", true);
        apply_entry_front_matter(&mut fm, &entry(), &FrontMatterOptions::default());

        assert_eq!(fm.get("mood").and_then(Value::as_str), Some("good"));
        assert!(!fm.contains_key("starred"));
        assert_eq!(fm.keys()[0], "mood");
    }
}
