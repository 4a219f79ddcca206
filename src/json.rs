//! serde bindings. A [`RawBytes`] field inside a serde-derived struct captures
//! the JSON text of that field as is, to be decoded later with
//! [`RawBytes::deserialize_json`].

use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::RawBytes;

impl RawBytes {
    /// Serializes `value` to JSON and holds the result.
    ///
    /// ## Example
    ///
    /// ```
    /// # use rawbuf::RawBytes;
    /// let raw = RawBytes::from_json(&vec![1, 2]).unwrap();
    /// assert_eq!(raw.as_bytes(), b"[1,2]");
    /// ```
    pub fn from_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        serde_json::to_vec(value).map(RawBytes::from)
    }

    /// Decodes the held JSON into the concrete type `T`.
    ///
    /// ## Example
    ///
    /// ```
    /// # use rawbuf::RawBytes;
    /// let raw = RawBytes::from(r#"{"a":1}"#);
    /// let map: std::collections::BTreeMap<String, u32> = raw.deserialize_json().unwrap();
    /// assert_eq!(map["a"], 1);
    /// ```
    pub fn deserialize_json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(self.as_bytes())
    }
}

impl Serialize for RawBytes {
    /// Emits the held bytes verbatim as a JSON value. Empty bytes become `null`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_unit();
        }
        let text = std::str::from_utf8(self.as_bytes()).map_err(S::Error::custom)?;
        let raw = RawValue::from_string(text.to_owned()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

/// Only works when driven by a `serde_json` deserializer reading the original
/// text, e.g. `serde_json::from_str` or `from_slice`. Inside
/// `#[serde(untagged)]` enums and `#[serde(flatten)]` fields serde buffers the
/// input as generic content first, the raw text is lost and deserialization
/// fails. A JSON `null` is captured as the bytes `null`, except for
/// `Option<RawBytes>` fields, which become `None`.
impl<'de> Deserialize<'de> for RawBytes {
    /// Captures the JSON text of the value without interpreting it.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(RawBytes::from(raw.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TextDecode, TextEncode};

    #[derive(Debug, Serialize, Deserialize)]
    struct Invoke {
        method: String,
        #[serde(default)]
        args: Option<RawBytes>,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn deserialize_captures_raw_text() {
        let invoke: Invoke =
            serde_json::from_str(r#"{"method":"point.set","args":{"x": 1, "y":2}}"#).unwrap();
        assert_eq!(invoke.method, "point.set");

        let args = invoke.args.unwrap();
        // whitespace inside the value is kept
        assert_eq!(args.as_bytes(), br#"{"x": 1, "y":2}"#);
        let point: Point = args.deserialize_json().unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn deserialize_works_for_any_json_value() {
        for text in [r#""str""#, "12.5", "[1,[2]]", "true", "null"] {
            let raw: RawBytes = serde_json::from_str(text).unwrap();
            assert_eq!(raw.as_bytes(), text.as_bytes());
        }

        // missing field
        let invoke: Invoke = serde_json::from_str(r#"{"method":"ping"}"#).unwrap();
        assert!(invoke.args.is_none());
    }

    #[test]
    fn serialize_emits_raw_text() {
        let invoke = Invoke {
            method: "point.set".to_string(),
            args: Some(RawBytes::from(r#"{"x":1,"y":2}"#)),
        };
        assert_eq!(
            serde_json::to_string(&invoke).unwrap(),
            r#"{"method":"point.set","args":{"x":1,"y":2}}"#
        );
    }

    #[test]
    fn serialize_empty_is_null() {
        assert_eq!(serde_json::to_string(&RawBytes::new()).unwrap(), "null");
    }

    #[test]
    fn serialize_handles_errors() {
        assert!(serde_json::to_string(&RawBytes::from("{not json")).is_err());
        assert!(serde_json::to_string(&RawBytes::from(vec![0xFF])).is_err());
    }

    #[test]
    fn serde_and_text_codec_agree() {
        let text = br#"{"nested":{"list":[1,2,3]}}"#;

        let via_serde: RawBytes = serde_json::from_slice(text).unwrap();
        let mut via_codec = RawBytes::new();
        via_codec.decode_text(text).unwrap();

        assert_eq!(via_serde, via_codec);
        assert_eq!(
            serde_json::to_vec(&via_serde).unwrap(),
            via_codec.encode_text().unwrap().as_ref()
        );
    }

    #[allow(dead_code)]
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    enum Request {
        Call { args: RawBytes },
    }

    #[test]
    fn deserialize_fails_in_buffered_containers() {
        let result = serde_json::from_str::<Request>(r#"{"args":{"x":1}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_null_keeps_text() {
        let raw: RawBytes = serde_json::from_str("null").unwrap();
        assert_eq!(raw.as_bytes(), b"null");
    }

    #[test]
    fn from_json_works() {
        let raw = RawBytes::from_json(&serde_json::json!({"k": "v"})).unwrap();
        assert_eq!(raw.as_bytes(), br#"{"k":"v"}"#);
        let back: serde_json::Value = raw.deserialize_json().unwrap();
        assert_eq!(back["k"], "v");
    }
}
