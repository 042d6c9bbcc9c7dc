use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::segment::title_case;

/// A personal name found in text.
///
/// Components are in nominative case where the name lexicon could tell, and
/// title-cased. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PersonRecord {
    pub first: Option<String>,
    pub middle: Option<String>,
    pub last: Option<String>,
}

impl PersonRecord {
    /// First and last name are both known.
    pub fn is_full(&self) -> bool {
        self.first.is_some() && self.last.is_some()
    }

    fn parts(&self) -> impl Iterator<Item = &str> {
        [&self.last, &self.first, &self.middle].into_iter().filter_map(|p| p.as_deref())
    }
}

/// "Last First Middle", absent components omitted.
impl fmt::Display for PersonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.parts().collect();
        f.write_str(&parts.join(" "))
    }
}

/// A registry entry: someone the announcement channel knows how to reach.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KnownPerson {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Contact handle, e.g. `@ivanov`.
    #[serde(default, rename = "telegram")]
    pub handle: Option<String>,
    /// Identifier of the private chat messages are forwarded to.
    #[serde(default, rename = "chat_id", deserialize_with = "string_or_number")]
    pub delivery_id: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(n) => n.to_string(),
    }))
}

fn component_matches(wanted: &Option<String>, stored: &Option<String>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => stored.as_deref().is_some_and(|stored| title_case(stored) == *wanted),
    }
}

impl KnownPerson {
    /// Every component present in `record` equals this entry's field.
    pub fn matches(&self, record: &PersonRecord) -> bool {
        component_matches(&record.first, &self.first_name)
            && component_matches(&record.middle, &self.middle_name)
            && component_matches(&record.last, &self.last_name)
    }
}

/// First registry entry matching `record`, in registry order.
///
/// Absent record components match anything, so a bare first name resolves to
/// the first person with that name even when several share it.
///
/// # Example
/// ```
/// use vestnik::{KnownPerson, PersonRecord, resolve};
///
/// let registry = vec![KnownPerson {
///     first_name: Some("Иван".into()),
///     last_name: Some("Иванов".into()),
///     handle: Some("@ivanov".into()),
///     ..Default::default()
/// }];
/// let record = PersonRecord { first: Some("Иван".into()), last: Some("Иванов".into()), middle: None };
/// assert_eq!(resolve(&record, &registry).and_then(|p| p.handle.as_deref()), Some("@ivanov"));
/// ```
pub fn resolve<'r>(record: &PersonRecord, registry: &'r [KnownPerson]) -> Option<&'r KnownPerson> {
    registry.iter().find(|entry| entry.matches(record))
}

/// A person found in text together with the registry entry it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPerson<'r> {
    pub record: PersonRecord,
    pub known: Option<&'r KnownPerson>,
}

impl<'r> ResolvedPerson<'r> {
    pub fn new(record: PersonRecord, registry: &'r [KnownPerson]) -> Self {
        let known = resolve(&record, registry);
        ResolvedPerson { record, known }
    }

    pub fn display_name(&self) -> String {
        self.record.to_string()
    }

    pub fn contact_handle(&self) -> Option<&'r str> {
        self.known.and_then(|k| k.handle.as_deref()).filter(|h| !h.is_empty())
    }

    pub fn delivery_id(&self) -> Option<&'r str> {
        self.known.and_then(|k| k.delivery_id.as_deref()).filter(|id| !id.is_empty())
    }

    /// Known by name and has somewhere to forward a message to.
    pub fn is_reachable(&self) -> bool {
        self.delivery_id().is_some()
    }
}
