//! Stored form of a cached result: `{"value": <result>}`.
//!
//! Wrapping the value keeps a cached unit or `None` (`{"value":null}`)
//! distinguishable from a missing entry.
use serde::de::{DeserializeOwned, Error as _};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize)]
struct EntryRef<'a, T> {
    value: &'a T,
}

pub(crate) fn encode<T>(value: &T) -> serde_json::Result<String>
where
    T: Serialize,
{
    serde_json::to_string(&EntryRef { value })
}

pub(crate) fn decode<T>(raw: &str) -> serde_json::Result<T>
where
    T: DeserializeOwned,
{
    // `value` must be present even when `T` would accept a missing field.
    let mut entry = serde_json::from_str::<Map<String, Value>>(raw)?;
    let value = entry.remove("value").ok_or_else(|| serde_json::Error::missing_field("value"))?;
    serde_json::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_is_present() {
        let raw = encode(&()).expect("failed to encode");
        assert_eq!(raw, r#"{"value":null}"#);
        decode::<()>(&raw).expect("failed to decode");
        assert_eq!(decode::<Option<i32>>(&raw).expect("failed to decode"), None);
    }

    #[test]
    fn values() {
        assert_eq!(encode(&5).expect("failed to encode"), r#"{"value":5}"#);
        assert_eq!(decode::<i32>(r#"{"value":5}"#).expect("failed to decode"), 5);
        assert_eq!(
            decode::<Vec<String>>(r#"{"value":["a","b"]}"#).expect("failed to decode"),
            vec![String::from("a"), String::from("b")]
        );
    }

    #[test]
    fn malformed() {
        assert!(decode::<i32>("5").is_err());
        assert!(decode::<i32>(r#"{"value":"five"}"#).is_err());
        assert!(decode::<i32>(r#"{"other":5}"#).is_err());
        assert!(decode::<Option<i32>>(r#"{"other":5}"#).is_err());
        assert!(decode::<()>("{}").is_err());
    }
}
