use std::sync::Arc;

use anyhow::Context;

use dumroo_ai::{CompletionService, GeminiClient, ModelConfig, QueryDispatcher};
use dumroo_auth::RoleCatalog;
use dumroo_core::Dataset;

use crate::config::AppConfig;

pub type Dispatcher = QueryDispatcher<Arc<dyn CompletionService>>;

/// Everything handlers share: the loaded dataset, the role catalog derived from
/// it, and the dispatcher in front of the completion service.
pub struct AppServices {
    dataset: Dataset,
    catalog: RoleCatalog,
    dispatcher: Dispatcher,
}

impl AppServices {
    pub fn new(
        dataset: Dataset,
        completion: Arc<dyn CompletionService>,
        model: ModelConfig,
    ) -> Self {
        let catalog = RoleCatalog::from_dataset(dataset.records());
        Self {
            dataset,
            catalog,
            dispatcher: QueryDispatcher::new(completion, model),
        }
    }

    /// Load the dataset and build the Gemini client from configuration.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let dataset = Dataset::load(&config.data_path).with_context(|| {
            format!("failed to load student data from {}", config.data_path.display())
        })?;

        let client = GeminiClient::new(config.api_key.clone(), config.model.clone());

        tracing::info!(
            records = dataset.len(),
            model = %config.model.model,
            reference_date = %config.model.reference_date,
            "services ready"
        );

        Ok(Self::new(dataset, Arc::new(client), config.model.clone()))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
