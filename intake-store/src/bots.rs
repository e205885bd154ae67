use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::json_file::{load_or_empty, persist_atomic};

const UID_PREFIX: &str = "bot";

/// Voice bot definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    pub uid: String,
    pub name: String,
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_status")]
    pub status: String,
}

/// Create request; the registry assigns the uid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBot {
    pub name: String,
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_status")]
    pub status: String,
}

/// Partial update; only present fields are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotUpdate {
    pub name: Option<String>,
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub voice: Option<String>,
    pub status: Option<String>,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_voice() -> String {
    "alloy".to_string()
}

fn default_status() -> String {
    "active".to_string()
}

impl Bot {
    fn apply(&mut self, update: BotUpdate) {
        let BotUpdate {
            name,
            prompt,
            model,
            voice,
            status,
        } = update;
        for (target, value) in [
            (&mut self.name, name),
            (&mut self.prompt, prompt),
            (&mut self.model, model),
            (&mut self.voice, voice),
            (&mut self.status, status),
        ] {
            if let Some(value) = value {
                *target = value;
            }
        }
    }
}

/// Next `botNNN` uid, one past the highest numeric suffix in use
fn next_uid(bots: &[Bot]) -> String {
    let highest = bots
        .iter()
        .filter_map(|bot| bot.uid.strip_prefix(UID_PREFIX)?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{UID_PREFIX}{:03}", highest.saturating_add(1))
}

/// Local bot definitions kept as a JSON array in a single file
pub struct BotRegistry {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl BotRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Vec<Bot> {
        load_or_empty(&self.path).await
    }

    pub async fn get(&self, uid: &str) -> StoreResult<Bot> {
        self.list()
            .await
            .into_iter()
            .find(|bot| bot.uid == uid)
            .ok_or_else(|| StoreError::not_found("Bot", uid))
    }

    pub async fn create(&self, new_bot: NewBot) -> StoreResult<Bot> {
        let _guard = self.write_lock.lock().await;
        let mut bots: Vec<Bot> = load_or_empty(&self.path).await;

        let bot = Bot {
            uid: next_uid(&bots),
            name: new_bot.name,
            prompt: new_bot.prompt,
            model: new_bot.model,
            voice: new_bot.voice,
            status: new_bot.status,
        };
        bots.push(bot.clone());
        persist_atomic(&self.path, &bots).await?;

        info!(uid = %bot.uid, "Bot created");
        Ok(bot)
    }

    pub async fn update(&self, uid: &str, update: BotUpdate) -> StoreResult<Bot> {
        let _guard = self.write_lock.lock().await;
        let mut bots: Vec<Bot> = load_or_empty(&self.path).await;

        let bot = bots
            .iter_mut()
            .find(|bot| bot.uid == uid)
            .ok_or_else(|| StoreError::not_found("Bot", uid))?;
        bot.apply(update);
        let updated = bot.clone();

        persist_atomic(&self.path, &bots).await?;
        Ok(updated)
    }

    pub async fn delete(&self, uid: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut bots: Vec<Bot> = load_or_empty(&self.path).await;

        let position = bots
            .iter()
            .position(|bot| bot.uid == uid)
            .ok_or_else(|| StoreError::not_found("Bot", uid))?;
        bots.remove(position);

        persist_atomic(&self.path, &bots).await?;
        info!(uid = %uid, "Bot deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_bot(name: &str) -> NewBot {
        serde_json::from_value(serde_json::json!({ "name": name, "prompt": "Be kind" })).unwrap()
    }

    fn registry() -> (tempfile::TempDir, BotRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let registry = BotRegistry::new(dir.path().join("bots.json"));
        (dir, registry)
    }

    #[tokio::test]
    async fn test_create_applies_defaults_and_sequential_uids() {
        let (_dir, registry) = registry();
        let first = registry.create(new_bot("Intake")).await.unwrap();
        let second = registry.create(new_bot("Follow-up")).await.unwrap();

        assert_eq!(first.uid, "bot001");
        assert_eq!(second.uid, "bot002");
        assert_eq!(first.model, "gpt-4o-mini");
        assert_eq!(first.voice, "alloy");
        assert_eq!(first.status, "active");
        assert_eq!(registry.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_uid_not_reused_after_delete() {
        let (_dir, registry) = registry();
        registry.create(new_bot("a")).await.unwrap();
        registry.create(new_bot("b")).await.unwrap();
        registry.delete("bot001").await.unwrap();

        let third = registry.create(new_bot("c")).await.unwrap();
        assert_eq!(third.uid, "bot003");
    }

    #[tokio::test]
    async fn test_partial_update() {
        let (_dir, registry) = registry();
        let bot = registry.create(new_bot("a")).await.unwrap();

        let updated = registry
            .update(
                &bot.uid,
                BotUpdate {
                    status: Some("paused".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, "paused");
        assert_eq!(updated.name, "a");
        assert_eq!(registry.get(&bot.uid).await.unwrap().status, "paused");
    }

    #[tokio::test]
    async fn test_unknown_uid_is_not_found() {
        let (_dir, registry) = registry();
        assert!(matches!(
            registry.get("bot404").await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(registry.update("bot404", BotUpdate::default()).await.is_err());
        assert!(registry.delete("bot404").await.is_err());
    }
}
