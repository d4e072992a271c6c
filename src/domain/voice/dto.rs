use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Masculine,
    Feminine,
    GenderNeutral,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Masculine, Gender::Feminine, Gender::GenderNeutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Masculine => "masculine",
            Gender::Feminine => "feminine",
            Gender::GenderNeutral => "gender_neutral",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|gender| gender.as_str() == name)
    }
}

/// Fields the provider can expand in listing responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpandField {
    IsStarred,
}

impl ExpandField {
    pub const ALL: [ExpandField; 1] = [ExpandField::IsStarred];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpandField::IsStarred => "is_starred",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

/// Validated query for GET /cartesia/voices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceListQuery {
    pub limit: Option<i64>,
    pub starting_after: Option<String>,
    pub ending_before: Option<String>,
    pub is_owner: Option<bool>,
    pub is_starred: Option<bool>,
    pub gender: Option<Gender>,
    pub expand: Vec<ExpandField>,
}

/// Voice metadata exactly as the provider returned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Voice(pub Value);

impl Voice {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }
}

/// Response for GET /cartesia/voices, relayed untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceListResponse(pub Value);

impl VoiceListResponse {
    pub fn voices(&self) -> &[Value] {
        self.0
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_more(&self) -> bool {
        self.0
            .get("has_more")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn next_page(&self) -> Option<&str> {
        self.0.get("next_page").and_then(Value::as_str)
    }
}
