use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;

pub fn first_page() -> i64 {
    1
}

// `?page=abc` falls back to the first page instead of rejecting the request
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().parse::<i64>().unwrap_or_else(|_| first_page()))
}

// clients send either the whole category object or just its id, and ids
// sometimes arrive as strings
#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum CategoryRef {
    Object {
        #[serde(deserialize_with = "deserialize_number_from_string")]
        id: i64,
    },
    Id(#[serde(deserialize_with = "deserialize_number_from_string")] i64),
}

impl CategoryRef {
    pub fn id(&self) -> i64 {
        match self {
            CategoryRef::Object { id } | CategoryRef::Id(id) => *id,
        }
    }
}
