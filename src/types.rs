use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Keys of a description record that are not part of its spec list.
pub const RESERVED_KEYS: [&str; 3] = ["id", "title", "description"];

/// Image/thumbnail record for one catalog entry.
///
/// Missing or non-text fields decode as empty strings; the grid decides whether
/// the record is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub image_url: String,
    #[serde(default, deserialize_with = "text")]
    pub thumbnail_url: String,
    #[serde(default, deserialize_with = "text")]
    pub alt: String,
    #[serde(default, deserialize_with = "gallery", skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
}

/// Textual record for one catalog entry, joined to a [`MediaItem`] by `id`.
///
/// Every key besides the reserved ones lands in `fields`, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Description {
    /// Category-specific key/value pairs as display strings.
    pub fn spec_entries(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.fields
            .iter()
            .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.as_str(), value_text(v)))
    }
}

/// Payload of the `links` resource. Legacy key names are accepted too; when a
/// document carries both, the current name wins unless it is blank.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawLinks")]
pub struct Links {
    pub external_link: Option<String>,
    pub external_svg: Option<String>,
}

#[derive(Deserialize)]
struct RawLinks {
    #[serde(default, rename = "externalLink")]
    external_link: Option<String>,
    #[serde(default, rename = "skiptSkool")]
    legacy_link: Option<String>,
    #[serde(default, rename = "externalSvg")]
    external_svg: Option<String>,
    #[serde(default, rename = "svgImage")]
    legacy_svg: Option<String>,
}

impl From<RawLinks> for Links {
    fn from(raw: RawLinks) -> Self {
        let pick = |current: Option<String>, legacy: Option<String>| {
            current.filter(|s| !s.trim().is_empty()).or(legacy)
        };
        Self {
            external_link: pick(raw.external_link, raw.legacy_link),
            external_svg: pick(raw.external_svg, raw.legacy_svg),
        }
    }
}

/// Renders a JSON scalar the way it reads in a product sheet.
pub fn value_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(value_text(&v))
}

fn gallery<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|i| match i {
                    Value::String(s) if !s.is_empty() => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn media_item_tolerates_missing_and_odd_fields() {
        let m: MediaItem = serde_json::from_value(json!({
            "id": 7,
            "thumbnailUrl": "thumbs/a.png",
            "gallery": "not-a-list"
        }))
        .unwrap();
        assert_eq!(m.id, "7");
        assert_eq!(m.thumbnail_url, "thumbs/a.png");
        assert_eq!(m.alt, "");
        assert_eq!(m.gallery, None);
    }

    #[test]
    fn gallery_keeps_only_string_urls() {
        let m: MediaItem = serde_json::from_value(json!({
            "id": "a", "gallery": ["/x.png", 3, null, "", "/y.png"]
        }))
        .unwrap();
        assert_eq!(m.gallery, Some(vec!["/x.png".to_string(), "/y.png".to_string()]));
    }

    #[test]
    fn description_splits_reserved_and_spec_fields_in_order() {
        let d: Description = serde_json::from_value(json!({
            "id": "k1",
            "year": 1999,
            "title": "Carry",
            "engine": "660cc",
            "description": "Small truck",
            "fourwd": true,
            "note": null
        }))
        .unwrap();
        assert_eq!(d.title, "Carry");
        assert_eq!(d.description, "Small truck");
        let specs: Vec<_> = d.spec_entries().collect();
        assert_eq!(
            specs,
            vec![
                ("year", "1999".to_string()),
                ("engine", "660cc".to_string()),
                ("fourwd", "true".to_string()),
                ("note", String::new()),
            ]
        );
    }

    #[test]
    fn links_accepts_both_key_styles() {
        let a: Links = serde_json::from_value(json!({"externalLink": "https://a.test/"})).unwrap();
        assert_eq!(a.external_link.as_deref(), Some("https://a.test/"));
        let b: Links = serde_json::from_value(json!({"skiptSkool": "https://b.test/", "svgImage": "/b.svg"})).unwrap();
        assert_eq!(b.external_link.as_deref(), Some("https://b.test/"));
        assert_eq!(b.external_svg.as_deref(), Some("/b.svg"));
        let empty: Links = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, Links::default());
    }

    #[test]
    fn links_prefers_current_key_when_both_are_present() {
        let both: Links = serde_json::from_value(json!({
            "externalLink": "https://a.test/",
            "skiptSkool": "https://b.test/",
            "externalSvg": " ",
            "svgImage": "/x.svg"
        }))
        .unwrap();
        assert_eq!(both.external_link.as_deref(), Some("https://a.test/"));
        assert_eq!(both.external_svg.as_deref(), Some("/x.svg"));
    }
}
