use std::collections::HashMap;

use crate::llm::provider::{Anthropic, OpenAiCompatible, Provider};

/// Provider lookup by case-insensitive name.
pub struct ProviderRegistry {
    providers: HashMap<String, Box<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn empty() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Adds or replaces a provider under its own name.
    pub fn register(&mut self, provider: impl Provider + 'static) {
        self.providers
            .insert(provider.name().to_ascii_lowercase(), Box::new(provider));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Provider> {
        self.providers
            .get(&name.to_ascii_lowercase())
            .map(|p| &**p)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(OpenAiCompatible::nvidia());
        registry.register(OpenAiCompatible::openrouter());
        registry.register(Anthropic);
        registry.register(OpenAiCompatible::openai());
        registry
    }
}
