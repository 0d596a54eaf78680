//! The structured resume record consumed by the compositor.
//!
//! The record arrives as JSON from the inference collaborator. All key
//! synonyms the collaborator has been observed to emit are resolved
//! here, once, through serde aliases; nothing downstream probes
//! alternate keys. Unknown fields are ignored, any field may be null,
//! and list fields default to empty.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordError {
    /// The collaborator reported failure instead of a record; no
    /// composition is attempted.
    #[error("inference failed: {message}")]
    Inference { message: String },
    #[error("malformed record JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResumeRecord {
    pub basic_info: BasicInfo,
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub work_experience: Vec<WorkEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub project_experience: Vec<ProjectEntry>,
    #[serde(alias = "skills", deserialize_with = "null_as_default")]
    pub technical_skills: Skills,
}

impl ResumeRecord {
    /// Parse the inference collaborator's JSON payload.
    ///
    /// A top-level `"error"` key signals inference failure and
    /// short-circuits before any record fields are read.
    pub fn from_json(payload: &str) -> Result<ResumeRecord, RecordError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        if let Some(error) = value.get("error") {
            let message = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(RecordError::Inference { message });
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BasicInfo {
    pub name: Option<String>,
    pub supplier: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(alias = "id_card_number")]
    pub id_number: Option<String>,
    pub birth_date: Option<String>,
    pub phone: Option<String>,
    pub first_work_date: Option<String>,
    pub first_it_work_date: Option<String>,
    pub highest_education: Option<String>,
    pub contract_level: Option<String>,
}

/// Qualification tier, resolved once at ingestion from the free-text
/// degree label. `Unrecognized` entries are excluded from structural
/// placement deterministically rather than probed again downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DegreeTier {
    Bachelor,
    Master,
    Doctorate,
    #[default]
    Unrecognized,
}

impl DegreeTier {
    pub fn from_label(label: &str) -> DegreeTier {
        let trimmed = label.trim();
        if trimmed.contains("本科") || trimmed.contains("学士") {
            return DegreeTier::Bachelor;
        }
        if trimmed.contains("硕士") {
            return DegreeTier::Master;
        }
        if trimmed.contains("博士") {
            return DegreeTier::Doctorate;
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "bachelor" | "bachelor's" | "undergraduate" => DegreeTier::Bachelor,
            "master" | "master's" | "graduate" => DegreeTier::Master,
            "doctorate" | "doctoral" | "doctor" | "phd" | "ph.d." => DegreeTier::Doctorate,
            _ => DegreeTier::Unrecognized,
        }
    }
}

impl<'de> Deserialize<'de> for DegreeTier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label
            .as_deref()
            .map(DegreeTier::from_label)
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(rename = "degree_tier", alias = "degree_type")]
    pub tier: DegreeTier,
    pub enrollment_date: Option<String>,
    pub university: Option<String>,
    pub graduation_date: Option<String>,
    pub major: Option<String>,
    pub diploma_number: Option<String>,
    #[serde(alias = "diploma_verification_code")]
    pub diploma_code: Option<String>,
    pub degree_number: Option<String>,
    #[serde(alias = "degree_verification_code")]
    pub degree_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkEntry {
    pub start_date: Option<String>,
    /// `None` means the position is ongoing; the end-date cell is
    /// still flagged so a reviewer confirms it.
    pub end_date: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    #[serde(alias = "is_psbc_independent_dev", deserialize_with = "flexible_bool")]
    pub is_flagged_program: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectEntry {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(alias = "project_name")]
    pub name: Option<String>,
    pub description: Option<String>,
    pub role: Option<String>,
    #[serde(alias = "is_psbc_independent_dev", deserialize_with = "flexible_bool")]
    pub is_flagged_program: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Skills {
    #[serde(alias = "programming_languages", deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept JSON booleans plus the textual yes/no forms the inference
/// collaborator occasionally emits.
fn flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Bool(b)) => Some(b),
        Some(Raw::Text(s)) => match s.trim() {
            "是" => Some(true),
            "否" => Some(false),
            other => match other.to_ascii_lowercase().as_str() {
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                _ => None,
            },
        },
    })
}
