//! Wire Models
//!
//! Item records as the REST API returns them, and the draft the form edits.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::UnknownField;

/// Where new drafts get their placeholder image from
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/450/520";

/// Placeholder image URL for a new draft, `seed` is any random fraction
pub fn placeholder_image_url(seed: f64) -> String {
    format!("{}?random={}", PLACEHOLDER_IMAGE_BASE, seed)
}

/// Server-generated item identifier (number or string, opaque to the client)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

struct ItemIdVisitor;

impl<'de> Visitor<'de> for ItemIdVisitor {
    type Value = ItemId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ItemId, E> {
        Ok(ItemId::Number(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ItemId, E> {
        Ok(match i64::try_from(v) {
            Ok(n) => ItemId::Number(n),
            Err(_) => ItemId::Text(v.to_string()),
        })
    }

    // Non-integral ids are only ever used as text in URLs
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ItemId, E> {
        Ok(ItemId::Text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemId, E> {
        Ok(ItemId::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ItemId, E> {
        Ok(ItemId::Text(v))
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ItemIdVisitor)
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Item data structure (matches the REST API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, deserialize_with = "coordinate")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "coordinate")]
    pub lon: Option<f64>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub description: String,
}

/// Decode a list response record by record
///
/// A record that is not an item (null, missing or unusable `id`) is skipped
/// with a warning instead of failing the whole list.
pub fn items_from_values(values: Vec<Value>) -> Vec<Item> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Item>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("Skipping item record {}: {}", index, e);
                None
            }
        })
        .collect()
}

/// Servers hand coordinates back either as numbers or as numeric strings
fn coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Writable draft fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    UserId,
    Lon,
    Lat,
    Image,
    Keywords,
    Description,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::UserId,
        FormField::Lon,
        FormField::Lat,
        FormField::Image,
        FormField::Keywords,
        FormField::Description,
    ];

    /// Wire and input `name` of the field
    pub fn name(self) -> &'static str {
        match self {
            Self::UserId => "user_id",
            Self::Lat => "lat",
            Self::Lon => "lon",
            Self::Image => "image",
            Self::Keywords => "keywords",
            Self::Description => "description",
        }
    }
}

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Unsaved item, kept exactly as typed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub user_id: String,
    pub lat: String,
    pub lon: String,
    pub image: String,
    pub keywords: String,
    pub description: String,
}

impl FormState {
    /// Empty draft with the given placeholder image
    pub fn new(image: String) -> Self {
        Self { image, ..Default::default() }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::UserId => &self.user_id,
            FormField::Lat => &self.lat,
            FormField::Lon => &self.lon,
            FormField::Image => &self.image,
            FormField::Keywords => &self.keywords,
            FormField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::UserId => &mut self.user_id,
            FormField::Lat => &mut self.lat,
            FormField::Lon => &mut self.lon,
            FormField::Image => &mut self.image,
            FormField::Keywords => &mut self.keywords,
            FormField::Description => &mut self.description,
        };
        *slot = value;
    }
}

/// Number when it parses, null when empty, the raw text otherwise
fn coordinate_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::from(n);
    }
    match trimmed.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(raw.to_string()),
    }
}

impl Serialize for FormState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FormState", 6)?;
        s.serialize_field("user_id", &self.user_id)?;
        s.serialize_field("lat", &coordinate_value(&self.lat))?;
        s.serialize_field("lon", &coordinate_value(&self.lon))?;
        s.serialize_field("image", &self.image)?;
        s.serialize_field("keywords", &self.keywords)?;
        s.serialize_field("description", &self.description)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_accepts_numeric_and_string_ids() {
        let a: Item = serde_json::from_value(json!({"id": 1, "user_id": "alice"})).unwrap();
        let b: Item = serde_json::from_value(json!({"id": "abc-1"})).unwrap();

        assert_eq!(a.id, ItemId::Number(1));
        assert_eq!(a.user_id, "alice");
        assert_eq!(b.id, ItemId::Text("abc-1".into()));
        assert_eq!(b.id.to_string(), "abc-1");
    }

    #[test]
    fn test_item_id_from_float_and_large_integer() {
        let a: Item = serde_json::from_value(json!({"id": 1.5})).unwrap();
        let b: Item = serde_json::from_value(json!({"id": u64::MAX})).unwrap();

        assert_eq!(a.id, ItemId::Text("1.5".into()));
        assert_eq!(b.id, ItemId::Text(u64::MAX.to_string()));
        assert!(serde_json::from_value::<Item>(json!({"id": true})).is_err());
        assert!(serde_json::from_value::<Item>(json!({"id": null})).is_err());
    }

    #[test]
    fn test_items_from_values_skips_bad_records() {
        let items = items_from_values(vec![
            json!({"id": 1, "user_id": "alice"}),
            Value::Null,
            json!({"user_id": "no id"}),
            json!({"id": {"nested": 1}}),
            json!({"id": "b2", "lat": "3.5"}),
        ]);

        let ids: Vec<_> = items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec![ItemId::Number(1), ItemId::Text("b2".into())]);
        assert_eq!(items[1].lat, Some(3.5));
    }

    #[test]
    fn test_item_coordinates_from_strings() {
        let item: Item = serde_json::from_value(json!({
            "id": 7, "lat": "10.5", "lon": 20, "image": "x"
        }))
        .unwrap();
        assert_eq!(item.lat, Some(10.5));
        assert_eq!(item.lon, Some(20.0));

        let empty: Item = serde_json::from_value(json!({"id": 8, "lat": "", "lon": null})).unwrap();
        assert_eq!(empty.lat, None);
        assert_eq!(empty.lon, None);
    }

    #[test]
    fn test_form_field_names() {
        for field in FormField::ALL {
            assert_eq!(field.name().parse::<FormField>(), Ok(field));
        }
        assert_eq!("id".parse::<FormField>(), Err(UnknownField("id".into())));
    }

    #[test]
    fn test_draft_serializes_coordinates_as_numbers() {
        let mut draft = FormState::new("https://img".into());
        draft.set(FormField::UserId, "alice".into());
        draft.set(FormField::Lat, "10".into());
        draft.set(FormField::Lon, "20.25".into());

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({
                "user_id": "alice",
                "lat": 10,
                "lon": 20.25,
                "image": "https://img",
                "keywords": "",
                "description": ""
            })
        );
    }

    #[test]
    fn test_draft_empty_coordinates_are_null() {
        let value = serde_json::to_value(FormState::new(String::new())).unwrap();
        assert_eq!(value["lat"], Value::Null);
        assert_eq!(value["lon"], Value::Null);
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_placeholder_url() {
        assert_eq!(
            placeholder_image_url(0.25),
            "https://picsum.photos/450/520?random=0.25"
        );
    }
}
