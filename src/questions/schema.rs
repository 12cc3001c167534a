use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Select,
}

/// One entry of the question library.
///
/// `options` maps integer codes to display labels and is only meaningful
/// for `select` questions. The saved answer of a select question is the
/// code, not the label.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Question {
    pub role: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub field: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_options"
    )]
    pub options: Option<BTreeMap<i64, String>>,
}

impl Question {
    /// Options in ascending code order. Empty for text questions.
    pub fn choices(&self) -> Vec<(i64, &str)> {
        self.options
            .as_ref()
            .map(|opts| opts.iter().map(|(code, label)| (*code, label.as_str())).collect())
            .unwrap_or_default()
    }

    /// Header line shown above the answer input
    pub fn heading(&self) -> String {
        format!("{} Q: {}", self.role, self.prompt)
    }
}

/// Option keys are integer codes written as strings. Two keys that parse to
/// the same code (e.g. "1" and "01") are rejected.
fn deserialize_options<'de, D>(deserializer: D) -> Result<Option<BTreeMap<i64, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OptionCodes>::deserialize(deserializer)?.map(|codes| codes.0))
}

struct OptionCodes(BTreeMap<i64, String>);

impl<'de> Deserialize<'de> for OptionCodes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OptionCodesVisitor)
    }
}

struct OptionCodesVisitor;

impl<'de> Visitor<'de> for OptionCodesVisitor {
    type Value = OptionCodes;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from integer option codes to labels")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut options = BTreeMap::new();
        while let Some((key, label)) = map.next_entry::<String, String>()? {
            let code: i64 = key
                .trim()
                .parse()
                .map_err(|_| de::Error::custom(format!("option code '{}' is not an integer", key)))?;
            if options.insert(code, label).is_some() {
                return Err(de::Error::custom(format!(
                    "duplicate option code {} (key '{}')",
                    code, key
                )));
            }
        }
        Ok(OptionCodes(options))
    }
}
