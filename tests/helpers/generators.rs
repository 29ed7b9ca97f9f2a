// ABOUTME: Scripted content generators for route tests
// ABOUTME: Return fixed text or fixed errors and record the prompts they were asked for

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use manna_core::errors::{AppError, AppResult, ErrorCode};
use manna_server::config::ServerConfig;
use manna_server::llm::{ContentGenerator, PromptContext, PromptKind};
use manna_server::resources::ServerResources;
use manna_server::server::build_router;

/// Generator that always answers with the same text
pub struct ScriptedGenerator {
    response: String,
    calls: Mutex<Vec<(PromptKind, PromptContext)>>,
}

impl ScriptedGenerator {
    pub fn new(response: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            response: response.into(),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Prompts received so far
    pub fn calls(&self) -> Vec<(PromptKind, PromptContext)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, kind: PromptKind, context: &PromptContext) -> AppResult<String> {
        self.calls.lock().unwrap().push((kind, context.clone()));
        Ok(self.response.clone())
    }
}

/// Generator that always fails with the given code
pub struct FailingGenerator {
    code: ErrorCode,
}

impl FailingGenerator {
    pub fn new(code: ErrorCode) -> Arc<Self> {
        Arc::new(Self { code })
    }
}

#[async_trait]
impl ContentGenerator for FailingGenerator {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn generate(&self, _kind: PromptKind, _context: &PromptContext) -> AppResult<String> {
        Err(AppError::new(self.code, "upstream model unavailable"))
    }
}

/// Full application router around the given generator
pub fn app_with(generator: Arc<dyn ContentGenerator>) -> axum::Router {
    build_router(
        Arc::new(ServerResources::new(generator)),
        &ServerConfig::default(),
    )
}
