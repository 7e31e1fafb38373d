use crate::config::AppConfig;
use crate::improver::{GeminiClient, PromptImprover};
use crate::store::{FileStore, LocalStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: LocalStore,
    pub improver: Arc<dyn PromptImprover>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = LocalStore::new(Arc::new(FileStore::new(&config.data_dir)));

        let improver =
            Arc::new(GeminiClient::new(config.gemini.clone())) as Arc<dyn PromptImprover>;

        Ok(Self {
            store,
            improver,
            config,
        })
    }

    pub fn from_parts(
        store: LocalStore,
        improver: Arc<dyn PromptImprover>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            improver,
            config,
        }
    }

    pub fn fake() -> Self {
        use crate::improver::{ImproveError, ImprovedPrompt, ImproveRequest, Scores};
        use crate::store::MemoryStore;
        use async_trait::async_trait;

        #[derive(Clone)]
        struct FakeImprover;
        #[async_trait]
        impl PromptImprover for FakeImprover {
            async fn improve(
                &self,
                request: &ImproveRequest,
            ) -> Result<ImprovedPrompt, ImproveError> {
                Ok(ImprovedPrompt {
                    improved_prompt: format!("Improved: {}", request.original_prompt),
                    scores: Scores {
                        clarity: 8.0,
                        detail: 7.0,
                        creativity: 6.0,
                    },
                    explanation: "Stub improvement.".into(),
                })
            }
        }

        let store = LocalStore::new(Arc::new(MemoryStore::new()));

        let config = Arc::new(AppConfig {
            data_dir: "./data".into(),
            gemini: crate::config::GeminiConfig {
                api_key: "test-key".into(),
                model: "test-model".into(),
                base_url: "http://127.0.0.1:1".into(),
            },
        });

        let improver = Arc::new(FakeImprover) as Arc<dyn PromptImprover>;
        Self {
            store,
            improver,
            config,
        }
    }
}
