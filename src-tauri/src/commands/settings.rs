use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use tauri::State;

/// Connection settings for the retrieval backend. Held in memory only;
/// defaults come from the environment at startup.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
}

impl BackendConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("RAG_BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            api_key: std::env::var("RAG_API_KEY").unwrap_or_default(),
        }
    }
}

pub struct BackendSettings {
    config: Mutex<BackendConfig>,
}

impl BackendSettings {
    pub fn from_env() -> Self {
        Self {
            config: Mutex::new(BackendConfig::from_env()),
        }
    }

    pub fn current(&self) -> BackendConfig {
        self.config.lock().unwrap().clone()
    }
}

#[tauri::command]
pub fn get_settings(settings: State<'_, BackendSettings>) -> Result<HashMap<String, String>, String> {
    let config = settings.current();
    let mut map = HashMap::new();
    map.insert("backend_url".to_string(), config.base_url);
    if !config.api_key.is_empty() {
        map.insert("api_key".to_string(), mask_key(&config.api_key));
    }
    Ok(map)
}

#[tauri::command]
pub fn set_setting(
    settings: State<'_, BackendSettings>,
    key: String,
    value: String,
) -> Result<(), String> {
    let mut config = settings.config.lock().unwrap();
    match key.as_str() {
        "backend_url" => config.base_url = value,
        "api_key" => config.api_key = value,
        _ => return Err(format!("Unknown setting key: {}", key)),
    }
    Ok(())
}

/// Mask API keys for display, keeping only the first and last 4 chars.
fn mask_key(value: &str) -> String {
    if value.len() > 8 && value.is_ascii() {
        format!("{}...{}", &value[..4], &value[value.len() - 4..])
    } else {
        "****".to_string()
    }
}
