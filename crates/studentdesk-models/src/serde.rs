//! Deserializers for values that browsers submit as strings.
//!
//! HTML number inputs post their value as a JSON string (`"age": "20"`), so
//! numeric fields accept either a JSON number or a string holding one.

use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    String(String),
}

impl<T> NumberOrString<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn into_number<E: serde::de::Error>(self) -> Result<T, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s
                .trim()
                .parse::<T>()
                .map_err(|e| E::custom(format!("invalid number `{}`: {}", s, e))),
        }
    }
}

pub fn deserialize_number_from_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    NumberOrString::<T>::deserialize(deserializer)?.into_number()
}

pub fn deserialize_optional_number_from_string<'de, D, T>(
    deserializer: D,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match Option::<NumberOrString<T>>::deserialize(deserializer)? {
        Some(value) => value.into_number().map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Required {
        #[serde(deserialize_with = "deserialize_number_from_string")]
        age: i32,
    }

    #[derive(Deserialize)]
    struct Optional {
        #[serde(default, deserialize_with = "deserialize_optional_number_from_string")]
        age: Option<i32>,
    }

    #[test]
    fn test_accepts_number_and_numeric_string() {
        let a: Required = serde_json::from_str(r#"{"age": 20}"#).unwrap();
        let b: Required = serde_json::from_str(r#"{"age": " 21 "}"#).unwrap();
        assert_eq!(a.age, 20);
        assert_eq!(b.age, 21);
    }

    #[test]
    fn test_rejects_non_numeric_string() {
        assert!(serde_json::from_str::<Required>(r#"{"age": "twenty"}"#).is_err());
    }

    #[test]
    fn test_optional_absent_and_null() {
        let absent: Optional = serde_json::from_str("{}").unwrap();
        let null: Optional = serde_json::from_str(r#"{"age": null}"#).unwrap();
        let string: Optional = serde_json::from_str(r#"{"age": "7"}"#).unwrap();
        assert_eq!(absent.age, None);
        assert_eq!(null.age, None);
        assert_eq!(string.age, Some(7));
    }
}
