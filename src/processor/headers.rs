//! Header and trailer sets as presented to a stage.

use std::collections::HashMap;
use bytes::Bytes;

/// Header set keyed by lower-cased name, holding the raw value bytes.
///
/// Values are kept as bytes because the host forwards them without
/// guaranteeing they are valid UTF-8 or valid HTTP header values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllHeaders {
    raw: HashMap<String, Bytes>,
}

impl AllHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<Bytes>) {
        self.raw.insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Raw value of a header, if present. Lookup is case-insensitive.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.raw
            .get(name.to_ascii_lowercase().as_str())
            .map(|v| &v[..])
    }

    /// Value of a header when it is valid UTF-8.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| std::str::from_utf8(v).ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AllHeaders
where
    K: AsRef<str>,
    V: Into<Bytes>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = AllHeaders::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}
