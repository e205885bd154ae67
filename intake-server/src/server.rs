use anyhow::{Context, Result};
use clinical_nlp::{ClinicalNlp, TranscriptTransforms};
use intake_store::{BotRegistry, CallStore, JsonFileCallStore, JsonPatientDirectory, PatientDirectory};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::config::IntakeConfig;
use crate::pipeline::PostCallPipeline;
use crate::vendor::VendorClient;

/// Shared server state handed to every handler
#[derive(Clone)]
pub struct IntakeServer {
    pub config: Arc<IntakeConfig>,
    pub pipeline: Arc<PostCallPipeline>,
    pub calls: Arc<dyn CallStore>,
    pub patients: Arc<dyn PatientDirectory>,
    pub bots: Arc<BotRegistry>,
    pub vendor: Arc<VendorClient>,
    pub started_at: Instant,
}

impl IntakeServer {
    /// Open the file-backed stores under `storage.data_dir` and build the
    /// post-call pipeline.
    pub async fn from_config(config: IntakeConfig) -> Result<Self> {
        let transforms: Arc<dyn TranscriptTransforms> = Arc::new(
            ClinicalNlp::new(&config.nlp).context("Failed to build transcript transforms")?,
        );

        let calls_path = config.storage.calls_path();
        let calls: Arc<dyn CallStore> = Arc::new(
            JsonFileCallStore::open(&calls_path)
                .await
                .with_context(|| format!("Failed to open call store at {}", calls_path.display()))?,
        );
        let patients: Arc<dyn PatientDirectory> =
            Arc::new(JsonPatientDirectory::new(config.storage.patients_path()));
        let bots = Arc::new(BotRegistry::new(config.storage.bots_path()));
        let vendor = Arc::new(VendorClient::new(&config.vendor).context("Failed to build vendor client")?);

        info!(
            data_dir = %config.storage.data_dir.display(),
            vendor_configured = vendor.is_configured(),
            "Intake server state initialized"
        );

        Ok(Self::with_components(config, transforms, calls, patients, bots, vendor))
    }

    /// Assemble the state from explicit components
    pub fn with_components(
        config: IntakeConfig,
        transforms: Arc<dyn TranscriptTransforms>,
        calls: Arc<dyn CallStore>,
        patients: Arc<dyn PatientDirectory>,
        bots: Arc<BotRegistry>,
        vendor: Arc<VendorClient>,
    ) -> Self {
        let pipeline = Arc::new(PostCallPipeline::new(transforms, Arc::clone(&calls)));
        Self {
            config: Arc::new(config),
            pipeline,
            calls,
            patients,
            bots,
            vendor,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
