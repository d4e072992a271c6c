use serde::{Deserialize, Serialize};

/// Language codes accepted by the Cartesia synthesis endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "nl")]
    Dutch,
    #[serde(rename = "pl")]
    Polish,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "sv")]
    Swedish,
    #[serde(rename = "tr")]
    Turkish,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 15] = [
        LanguageCode::English,
        LanguageCode::French,
        LanguageCode::German,
        LanguageCode::Spanish,
        LanguageCode::Portuguese,
        LanguageCode::Chinese,
        LanguageCode::Japanese,
        LanguageCode::Hindi,
        LanguageCode::Italian,
        LanguageCode::Korean,
        LanguageCode::Dutch,
        LanguageCode::Polish,
        LanguageCode::Russian,
        LanguageCode::Swedish,
        LanguageCode::Turkish,
    ];

    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::French => "fr",
            LanguageCode::German => "de",
            LanguageCode::Spanish => "es",
            LanguageCode::Portuguese => "pt",
            LanguageCode::Chinese => "zh",
            LanguageCode::Japanese => "ja",
            LanguageCode::Hindi => "hi",
            LanguageCode::Italian => "it",
            LanguageCode::Korean => "ko",
            LanguageCode::Dutch => "nl",
            LanguageCode::Polish => "pl",
            LanguageCode::Russian => "ru",
            LanguageCode::Swedish => "sv",
            LanguageCode::Turkish => "tr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.as_str() == code)
    }

    /// Comma separated list of every accepted code
    pub fn supported_codes() -> String {
        Self::ALL
            .iter()
            .map(|lang| lang.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
