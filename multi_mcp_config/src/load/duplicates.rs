//! Streaming scan for repeated keys that `serde_json::Value` would collapse.
//!
//! `serde_json` keeps the last occurrence of a repeated object key. This pass
//! re-reads the already validated text and reports the first repeated
//! section key at the top level or repeated server name inside the section.

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

/// First repeated key found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Duplicate {
    /// The section key itself appears more than once.
    Section,
    /// A server name appears more than once inside the section.
    Server(String),
}

/// Scans `text` for repeated keys.
///
/// `text` must already be known to be a JSON object; any parser error is
/// returned unchanged.
pub(super) fn find_duplicate(
    text: &str,
    section_key: &str,
) -> Result<Option<Duplicate>, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    DocumentScan { section_key }.deserialize(&mut deserializer)
}

struct DocumentScan<'a> {
    section_key: &'a str,
}

impl<'de> DeserializeSeed<'de> for DocumentScan<'_> {
    type Value = Option<Duplicate>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for DocumentScan<'_> {
    type Value = Option<Duplicate>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a configuration object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut has_section = false;
        let mut found = None;
        while let Some(key) = map.next_key::<String>()? {
            if key != self.section_key {
                map.next_value::<IgnoredAny>()?;
            } else if has_section {
                map.next_value::<IgnoredAny>()?;
                found.get_or_insert(Duplicate::Section);
            } else {
                has_section = true;
                if let Some(name) = map.next_value_seed(ServerScan)? {
                    found.get_or_insert(Duplicate::Server(name));
                }
            }
        }
        Ok(found)
    }
}

struct ServerScan;

impl<'de> DeserializeSeed<'de> for ServerScan {
    type Value = Option<String>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

/// Scalars and arrays hold no server names; shape errors belong to
/// validation, not to this scan.
impl<'de> Visitor<'de> for ServerScan {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_i64<E>(self, _value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_u64<E>(self, _value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_f64<E>(self, _value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_str<E>(self, _value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut names = HashSet::new();
        let mut repeated = None;
        while let Some(name) = map.next_key::<String>()? {
            map.next_value::<IgnoredAny>()?;
            if !names.contains(&name) {
                names.insert(name);
            } else if repeated.is_none() {
                repeated = Some(name);
            }
        }
        Ok(repeated)
    }
}
