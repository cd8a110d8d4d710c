//! Parsing of vision model replies.
//!
//! The upstream models are asked for JSON but the output shape is not
//! strictly contracted: sometimes an object, sometimes a single-element
//! list, sometimes garbage. All of that tolerance is resolved here, at the
//! query boundary, so call sites only ever see one canonical record.

use serde::Deserialize;
use serde_json::Value;

/// Right-hand screen region overlapping row icons (reply, star, checkbox).
/// Taps landing here during email-row selection are redirected left.
pub const ICON_ZONE_MIN_X: i64 = 600;

/// Safe center-left x used when a tap target falls in the icon zone.
pub const SAFE_TAP_X: i64 = 300;

/// A pixel coordinate in the captured screenshot's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Whether the point falls within an image of the given dimensions.
    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.x < width as i64 && self.y >= 0 && self.y < height as i64
    }

    /// Remap a coordinate out of the icon zone to a safe left-hand x.
    pub fn clamp_icon_zone(self) -> Self {
        if self.x > ICON_ZONE_MIN_X {
            Self {
                x: SAFE_TAP_X,
                y: self.y,
            }
        } else {
            self
        }
    }
}

/// One canonical vision query result.
///
/// All fields are optional on the wire; unknown keys are ignored. The
/// `Default` value doubles as the "no action" record returned for an empty
/// list reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VisionReply {
    pub found: bool,
    pub point: Option<Vec<i64>>,
    /// The email-selection prompt asks for `location` instead of `point`.
    pub location: Option<Vec<i64>>,
    pub action: Option<String>,
    pub confidence: Option<String>,
    pub label: Option<String>,
    pub email_subject: Option<String>,
    pub link_text: Option<String>,
    pub button_text: Option<String>,
    pub app: Option<String>,
    pub screen_type: Option<String>,
    pub folder_name: Option<String>,
    pub thinking: Option<String>,
}

impl VisionReply {
    /// The reply's coordinate, from `point` or `location`.
    pub fn point(&self) -> Option<Point> {
        let coords = self.point.as_ref().or(self.location.as_ref())?;
        if coords.len() < 2 {
            return None;
        }
        Some(Point::new(coords[0], coords[1]))
    }

    /// The coordinate, validated against the captured image's bounds.
    pub fn target_point(&self, width: u32, height: u32) -> Option<Point> {
        let pt = self.point()?;
        if pt.in_bounds(width, height) {
            Some(pt)
        } else {
            tracing::warn!("Model point ({}, {}) outside {}x{} image", pt.x, pt.y, width, height);
            None
        }
    }
}

/// Shape of a raw JSON reply before resolution.
enum ReplyShape {
    Object(Value),
    List(Vec<Value>),
}

/// Parse a raw model reply into one canonical record.
///
/// - object -> the record itself
/// - non-empty array -> its first element
/// - empty array -> the default "no action" record
/// - invalid JSON or any other shape -> `None`, never an error
pub fn parse_reply(raw: &str) -> Option<VisionReply> {
    let shape = match serde_json::from_str::<Value>(raw.trim()) {
        Ok(Value::Object(map)) => ReplyShape::Object(Value::Object(map)),
        Ok(Value::Array(items)) => ReplyShape::List(items),
        Ok(_) | Err(_) => {
            tracing::warn!("Unparseable model reply: {}", truncate(raw, 120));
            return None;
        }
    };

    let value = match shape {
        ReplyShape::Object(value) => value,
        ReplyShape::List(items) => match items.into_iter().next() {
            Some(first) => first,
            None => return Some(VisionReply::default()),
        },
    };

    match serde_json::from_value::<VisionReply>(value) {
        Ok(reply) => {
            if let Some(thinking) = &reply.thinking {
                tracing::info!("🧠 AI: {}", thinking);
            }
            Some(reply)
        }
        Err(e) => {
            tracing::warn!("Reply record did not deserialize: {}", e);
            None
        }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_reply() {
        let reply = parse_reply(r#"{"found": true, "point": [40, 120], "confidence": "high"}"#)
            .expect("object reply parses");
        assert!(reply.found);
        assert_eq!(reply.point(), Some(Point::new(40, 120)));
        assert_eq!(reply.confidence.as_deref(), Some("high"));
    }

    #[test]
    fn test_parse_list_reply_takes_first() {
        let reply = parse_reply(r#"[{"found": true, "point": [10, 20]}, {"found": false}]"#)
            .expect("list reply parses");
        assert!(reply.found);
        assert_eq!(reply.point(), Some(Point::new(10, 20)));
    }

    #[test]
    fn test_parse_empty_list_is_no_action() {
        let reply = parse_reply("[]").expect("empty list resolves to default");
        assert!(!reply.found);
        assert!(reply.point().is_none());
    }

    #[test]
    fn test_parse_invalid_json_is_none() {
        assert!(parse_reply("not json at all").is_none());
        assert!(parse_reply(r#""just a string""#).is_none());
        assert!(parse_reply("42").is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let reply = parse_reply(r#"{"found": true, "point": [5, 5], "surprise": {"deep": 1}}"#)
            .expect("unknown keys tolerated");
        assert!(reply.found);
    }

    #[test]
    fn test_location_key_is_accepted() {
        let reply = parse_reply(r#"{"action": "long_press", "location": [360, 480]}"#)
            .expect("location reply parses");
        assert_eq!(reply.point(), Some(Point::new(360, 480)));
        assert_eq!(reply.action.as_deref(), Some("long_press"));
    }

    #[test]
    fn test_target_point_bounds() {
        let reply = parse_reply(r#"{"found": true, "point": [719, 1599]}"#).unwrap();
        assert!(reply.target_point(720, 1600).is_some());
        assert!(reply.target_point(600, 1600).is_none());

        let out = parse_reply(r#"{"found": true, "point": [-1, 50]}"#).unwrap();
        assert!(out.target_point(720, 1600).is_none());
    }

    #[test]
    fn test_short_point_is_rejected() {
        let reply = parse_reply(r#"{"found": true, "point": [300]}"#).unwrap();
        assert!(reply.point().is_none());
    }

    #[test]
    fn test_icon_zone_clamp() {
        assert_eq!(Point::new(650, 400).clamp_icon_zone(), Point::new(300, 400));
        assert_eq!(Point::new(420, 400).clamp_icon_zone(), Point::new(420, 400));
        // Boundary value stays put
        assert_eq!(Point::new(600, 90).clamp_icon_zone(), Point::new(600, 90));
    }
}
