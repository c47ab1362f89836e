//! Journal entry schema and validation.
//!
//! Source exports are heterogeneous: fields come and go between app versions
//! and a single malformed record must not sink a whole import. Records are
//! therefore validated field by field from raw JSON into a typed
//! [`JournalEntry`], and every problem found is reported as a
//! [`ValidationIssue`] rather than stopping at the first one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// A validated journal entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    /// Global identifier, unique across the export
    pub uuid: String,

    /// When the entry was created
    pub creation_date: DateTime<Utc>,

    /// When the entry was last modified
    pub modified_date: DateTime<Utc>,

    /// Markdown body (empty when the export omits it)
    pub text: String,

    pub is_all_day: bool,
    pub is_pinned: bool,
    pub starred: bool,

    pub tags: Vec<String>,

    pub location: Option<Location>,

    /// `userActivity.activityName`
    pub activity: Option<String>,

    pub photos: Vec<Attachment>,
    pub videos: Vec<Attachment>,
    pub audios: Vec<Attachment>,
    pub pdf_attachments: Vec<Attachment>,
}

/// Structured location attached to an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub place_name: Option<String>,
    pub locality_name: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// "place, locality, country" when all three names are known.
    pub fn place_description(&self) -> Option<String> {
        match (&self.place_name, &self.locality_name, &self.country) {
            (Some(place), Some(locality), Some(country))
                if !place.is_empty() && !locality.is_empty() && !country.is_empty() =>
            {
                Some(format!("{}, {}, {}", place, locality, country))
            }
            _ => None,
        }
    }
}

/// A media attachment owned by one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Identifier scoped to the owning entry
    pub identifier: String,

    /// Content hash; the exported media file is named after it
    pub md5: String,

    /// `type` for photos/videos/pdfs, `format` for audio
    pub file_type: Option<String>,
}

/// Attachment collections, in lookup precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Photo,
    Video,
    Pdf,
    Audio,
}

impl AttachmentKind {
    pub const PRECEDENCE: [AttachmentKind; 4] = [
        AttachmentKind::Photo,
        AttachmentKind::Video,
        AttachmentKind::Pdf,
        AttachmentKind::Audio,
    ];

    /// Field name of the collection in the export.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Photo => "photos",
            Self::Video => "videos",
            Self::Pdf => "pdfAttachments",
            Self::Audio => "audios",
        }
    }

    /// Field holding the file type within one attachment.
    fn type_field(&self) -> &'static str {
        match self {
            Self::Audio => "format",
            _ => "type",
        }
    }
}

impl JournalEntry {
    pub fn attachments(&self, kind: AttachmentKind) -> &[Attachment] {
        match kind {
            AttachmentKind::Photo => &self.photos,
            AttachmentKind::Video => &self.videos,
            AttachmentKind::Pdf => &self.pdf_attachments,
            AttachmentKind::Audio => &self.audios,
        }
    }
}

/// One element of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: Vec<PathSegment>,
    pub expected: String,
    pub received: String,
    pub message: String,
}

impl ValidationIssue {
    /// Dotted rendering of the path, e.g. `photos[0].md5`.
    pub fn path_display(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(index) => out.push_str(&format!("[{}]", index)),
            }
        }
        if out.is_empty() {
            out.push_str("<root>");
        }
        out
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path_display(), self.message)
    }
}

/// A source record that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidEntry {
    /// `uuid`, when it could be read as a string
    pub entry_id: Option<String>,

    /// Raw `creationDate`, when it could be read as a string
    pub creation_date: Option<String>,

    /// Export file the record came from
    pub source_file: Option<String>,

    pub issues: Vec<ValidationIssue>,
}

impl InvalidEntry {
    /// All issues joined into one line.
    pub fn reason(&self) -> String {
        self.issues
            .iter()
            .map(|issue| issue.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validate one raw export record.
pub fn validate_entry(raw: &Value) -> Result<JournalEntry, InvalidEntry> {
    let mut checker = Checker::default();

    let obj = match raw.as_object() {
        Some(obj) => obj,
        None => {
            checker.issue(&[], "object", raw, "Expected object");
            return Err(InvalidEntry {
                entry_id: None,
                creation_date: None,
                source_file: None,
                issues: checker.issues,
            });
        }
    };

    let modified_date = checker.required_datetime(obj, "modifiedDate");
    let creation_date = checker.required_datetime(obj, "creationDate");
    let is_all_day = checker.optional_bool(obj, "isAllDay");
    let is_pinned = checker.optional_bool(obj, "isPinned");
    let starred = checker.optional_bool(obj, "starred");
    let tags = checker.optional_string_list(obj, "tags");
    let text = checker.optional_string(&[key("text")], obj.get("text"));
    let activity = checker.activity(obj);
    let location = checker.location(obj);
    let uuid = checker.identifier(obj);
    let photos = checker.attachments(obj, AttachmentKind::Photo);
    let videos = checker.attachments(obj, AttachmentKind::Video);
    let audios = checker.attachments(obj, AttachmentKind::Audio);
    let pdf_attachments = checker.attachments(obj, AttachmentKind::Pdf);

    if let (true, Some(uuid), Some(creation_date), Some(modified_date)) = (
        checker.issues.is_empty(),
        uuid,
        creation_date,
        modified_date,
    ) {
        return Ok(JournalEntry {
            uuid,
            creation_date,
            modified_date,
            text: text.unwrap_or_default(),
            is_all_day: is_all_day.unwrap_or(false),
            is_pinned: is_pinned.unwrap_or(false),
            starred: starred.unwrap_or(false),
            tags: tags.unwrap_or_default(),
            location,
            activity,
            photos,
            videos,
            audios,
            pdf_attachments,
        });
    }

    Err(InvalidEntry {
        entry_id: obj.get("uuid").and_then(Value::as_str).map(str::to_string),
        creation_date: obj
            .get("creationDate")
            .and_then(Value::as_str)
            .map(str::to_string),
        source_file: None,
        issues: checker.issues,
    })
}

fn key(name: &str) -> PathSegment {
    PathSegment::Key(name.to_string())
}

/// JSON type name as reported in issues.
fn kind_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

#[derive(Default)]
struct Checker {
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn issue(&mut self, path: &[PathSegment], expected: &str, value: &Value, message: &str) {
        self.issue_at(path, expected, Some(value), message);
    }

    fn issue_at(
        &mut self,
        path: &[PathSegment],
        expected: &str,
        value: Option<&Value>,
        message: &str,
    ) {
        self.issues.push(ValidationIssue {
            path: path.to_vec(),
            expected: expected.to_string(),
            received: kind_of(value).to_string(),
            message: message.to_string(),
        });
    }

    fn type_mismatch(&mut self, path: &[PathSegment], expected: &str, value: Option<&Value>) {
        let message = if value.is_none() {
            "Required".to_string()
        } else {
            format!("Expected {}, received {}", expected, kind_of(value))
        };
        self.issue_at(path, expected, value, &message);
    }

    fn required_string(&mut self, obj: &Map<String, Value>, name: &str) -> Option<String> {
        let value = obj.get(name);
        match value {
            Some(Value::String(s)) => Some(s.clone()),
            _ => {
                self.type_mismatch(&[key(name)], "string", value);
                None
            }
        }
    }

    fn identifier(&mut self, obj: &Map<String, Value>) -> Option<String> {
        let uuid = self.required_string(obj, "uuid")?;
        if uuid.trim().is_empty() {
            self.issue_at(
                &[key("uuid")],
                "non-empty string",
                obj.get("uuid"),
                "Identifier must not be empty",
            );
            return None;
        }
        Some(uuid)
    }

    fn required_datetime(&mut self, obj: &Map<String, Value>, name: &str) -> Option<DateTime<Utc>> {
        let value = obj.get(name);
        let raw = match value {
            Some(Value::String(s)) => s,
            _ => {
                self.type_mismatch(&[key(name)], "string", value);
                return None;
            }
        };
        match DateTime::parse_from_rfc3339(raw) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc)),
            Err(_) => {
                self.issue_at(&[key(name)], "datetime", value, "Invalid datetime");
                None
            }
        }
    }

    fn optional_string(&mut self, path: &[PathSegment], value: Option<&Value>) -> Option<String> {
        match value {
            Some(Value::String(s)) => Some(s.clone()),
            v if is_absent(v) => None,
            v => {
                self.type_mismatch(path, "string", v);
                None
            }
        }
    }

    fn optional_bool(&mut self, obj: &Map<String, Value>, name: &str) -> Option<bool> {
        match obj.get(name) {
            Some(Value::Bool(b)) => Some(*b),
            v if is_absent(v) => None,
            v => {
                self.type_mismatch(&[key(name)], "boolean", v);
                None
            }
        }
    }

    fn optional_string_list(&mut self, obj: &Map<String, Value>, name: &str) -> Option<Vec<String>> {
        let items = match obj.get(name) {
            Some(Value::Array(items)) => items,
            v if is_absent(v) => return None,
            v => {
                self.type_mismatch(&[key(name)], "array", v);
                return None;
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                other => self.type_mismatch(
                    &[key(name), PathSegment::Index(index)],
                    "string",
                    Some(other),
                ),
            }
        }
        Some(out)
    }

    fn optional_object<'v>(
        &mut self,
        path: &[PathSegment],
        value: Option<&'v Value>,
    ) -> Option<&'v Map<String, Value>> {
        match value {
            Some(Value::Object(map)) => Some(map),
            v if is_absent(v) => None,
            v => {
                self.type_mismatch(path, "object", v);
                None
            }
        }
    }

    fn required_number(&mut self, path: &[PathSegment], value: Option<&Value>) -> Option<f64> {
        match value.and_then(Value::as_f64) {
            Some(n) => Some(n),
            None => {
                self.type_mismatch(path, "number", value);
                None
            }
        }
    }

    fn activity(&mut self, obj: &Map<String, Value>) -> Option<String> {
        let path = [key("userActivity")];
        let activity = self.optional_object(&path, obj.get("userActivity"))?;
        self.optional_string(
            &[key("userActivity"), key("activityName")],
            activity.get("activityName"),
        )
    }

    fn location(&mut self, obj: &Map<String, Value>) -> Option<Location> {
        let base = key("location");
        let location = self.optional_object(&[base.clone()], obj.get("location"))?;

        let field = |name: &str| [base.clone(), key(name)];
        let place_name = self.optional_string(&field("placeName"), location.get("placeName"));
        let locality_name =
            self.optional_string(&field("localityName"), location.get("localityName"));
        let country = self.optional_string(&field("country"), location.get("country"));
        let latitude = self.required_number(&field("latitude"), location.get("latitude"));
        let longitude = self.required_number(&field("longitude"), location.get("longitude"));

        Some(Location {
            place_name,
            locality_name,
            country,
            latitude: latitude?,
            longitude: longitude?,
        })
    }

    fn attachments(&mut self, obj: &Map<String, Value>, kind: AttachmentKind) -> Vec<Attachment> {
        let name = kind.field();
        let items = match obj.get(name) {
            Some(Value::Array(items)) => items,
            v if is_absent(v) => return Vec::new(),
            v => {
                self.type_mismatch(&[key(name)], "array", v);
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let base = [key(name), PathSegment::Index(index)];
            let Some(attachment) = item.as_object() else {
                self.type_mismatch(&base, "object", Some(item));
                continue;
            };
            let field = |field: &str| {
                let mut path = base.to_vec();
                path.push(key(field));
                path
            };

            let identifier = match attachment.get("identifier") {
                Some(Value::String(s)) => Some(s.clone()),
                v => {
                    self.type_mismatch(&field("identifier"), "string", v);
                    None
                }
            };
            let md5 = match attachment.get("md5") {
                Some(Value::String(s)) => Some(s.clone()),
                v => {
                    self.type_mismatch(&field("md5"), "string", v);
                    None
                }
            };
            let type_field = kind.type_field();
            let file_type = self.optional_string(&field(type_field), attachment.get(type_field));

            if let (Some(identifier), Some(md5)) = (identifier, md5) {
                out.push(Attachment {
                    identifier,
                    md5,
                    file_type,
                });
            }
        }
        out
    }
}
