use super::dto::{ExpandField, Gender, VoiceListQuery};
use super::error::VoiceServiceError;

pub const MAX_LIMIT: i64 = 100;

impl VoiceListQuery {
    /// Build a query from raw query-string pairs. Unrecognized keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, VoiceServiceError> {
        let mut query = VoiceListQuery::default();

        for (key, value) in pairs {
            match key.as_str() {
                "limit" if !value.is_empty() => {
                    let limit = value.trim().parse::<i64>().map_err(|_| {
                        VoiceServiceError::Invalid("Limit must be a valid integer".to_string())
                    })?;
                    query.limit = Some(limit);
                }
                "starting_after" if !value.is_empty() => {
                    query.starting_after = Some(value.clone());
                }
                "ending_before" if !value.is_empty() => {
                    query.ending_before = Some(value.clone());
                }
                "is_owner" => query.is_owner = Some(value == "true"),
                "is_starred" => query.is_starred = Some(value == "true"),
                "gender" if !value.is_empty() => {
                    let gender = Gender::from_name(value).ok_or_else(|| {
                        VoiceServiceError::Invalid(format!(
                            "Invalid gender: {}. Must be one of: {}",
                            value,
                            Gender::ALL.map(|g| g.as_str()).join(", ")
                        ))
                    })?;
                    query.gender = Some(gender);
                }
                "expand[]" => {
                    let field = ExpandField::from_name(value).ok_or_else(|| {
                        VoiceServiceError::Invalid(format!(
                            "Invalid expand field: {}. Must be one of: {}",
                            value,
                            ExpandField::ALL.map(|f| f.as_str()).join(", ")
                        ))
                    })?;
                    query.expand.push(field);
                }
                _ => {}
            }
        }

        Ok(query)
    }

    pub fn validate(&self) -> Result<(), VoiceServiceError> {
        if let Some(limit) = self.limit {
            if !(1..=MAX_LIMIT).contains(&limit) {
                return Err(VoiceServiceError::Invalid(format!(
                    "Limit must be an integer between 1 and {}",
                    MAX_LIMIT
                )));
            }
        }
        Ok(())
    }

    /// Query-string parameters forwarded to the provider
    pub fn to_upstream_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(cursor) = &self.starting_after {
            params.push(("starting_after", cursor.clone()));
        }
        if let Some(cursor) = &self.ending_before {
            params.push(("ending_before", cursor.clone()));
        }
        if let Some(is_owner) = self.is_owner {
            params.push(("is_owner", is_owner.to_string()));
        }
        if let Some(is_starred) = self.is_starred {
            params.push(("is_starred", is_starred.to_string()));
        }
        if let Some(gender) = self.gender {
            params.push(("gender", gender.as_str().to_string()));
        }
        for field in &self.expand {
            params.push(("expand[]", field.as_str().to_string()));
        }

        params
    }
}
