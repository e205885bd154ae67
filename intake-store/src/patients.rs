use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use tracing::warn;

use crate::json_file::load_or_empty;

/// Patient entry as stored in the directory file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub medical_id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub allergies: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub last_visit: String,
    #[serde(default)]
    pub notes: String,
}

/// Read-only caller context handed to the voice agent. Omits the phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientContext {
    pub medical_id: String,
    pub name: String,
    pub dob: String,
    pub allergies: Vec<String>,
    pub conditions: Vec<String>,
    pub last_visit: String,
    pub notes: String,
}

impl From<PatientRecord> for PatientContext {
    fn from(record: PatientRecord) -> Self {
        Self {
            medical_id: record.medical_id,
            name: record.name,
            dob: record.dob,
            allergies: record.allergies,
            conditions: record.conditions,
            last_visit: record.last_visit,
            notes: record.notes,
        }
    }
}

#[async_trait]
pub trait PatientDirectory: Send + Sync {
    async fn lookup_by_phone(&self, phone: &str) -> Option<PatientContext>;

    async fn lookup_by_id(&self, medical_id: &str) -> Option<PatientContext>;
}

/// Directory backed by a JSON file, re-read on every lookup so edits to the
/// file are picked up without a restart
pub struct JsonPatientDirectory {
    path: PathBuf,
}

impl JsonPatientDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn find<F>(&self, predicate: F) -> Option<PatientContext>
    where
        F: Fn(&PatientRecord) -> bool + Send,
    {
        let entries: Vec<Value> = load_or_empty(&self.path).await;
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<PatientRecord>(entry) {
                Ok(record) => Some(record),
                Err(error) => {
                    warn!(
                        path = %self.path.display(),
                        index,
                        error = %error,
                        "Skipping malformed patient entry"
                    );
                    None
                }
            })
            .find(|p| predicate(p))
            .map(PatientContext::from)
    }
}

#[async_trait]
impl PatientDirectory for JsonPatientDirectory {
    async fn lookup_by_phone(&self, phone: &str) -> Option<PatientContext> {
        if phone.is_empty() {
            return None;
        }
        self.find(|p| p.phone == phone).await
    }

    async fn lookup_by_id(&self, medical_id: &str) -> Option<PatientContext> {
        if medical_id.is_empty() {
            return None;
        }
        self.find(|p| p.medical_id == medical_id).await
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringOrList>::deserialize(deserializer)? {
        Some(StringOrList::Many(items)) => items,
        Some(StringOrList::One(item)) if !item.is_empty() => vec![item],
        _ => Vec::new(),
    })
}
