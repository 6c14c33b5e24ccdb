//! Navigation snapshots delivered to the listing controller.

use std::collections::BTreeMap;

pub const PARAM_ID: &str = "id";
pub const PARAM_NAME: &str = "name";
pub const PARAM_KEYWORD: &str = "keyword";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    values: BTreeMap<String, String>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new().with(PARAM_ID, id).with(PARAM_NAME, name)
    }

    pub fn search(keyword: impl Into<String>) -> Self {
        Self::new().with(PARAM_KEYWORD, keyword)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
