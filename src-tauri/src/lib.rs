mod citations;
mod commands;
mod history;
mod rag;

use commands::settings::BackendSettings;
use history::SessionHistory;
use tracing_subscriber::EnvFilter;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let session_id = uuid::Uuid::new_v4();
    tracing::info!(%session_id, "doc-chat starting");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(SessionHistory::new())
        .manage(BackendSettings::from_env())
        .invoke_handler(tauri::generate_handler![
            commands::chat::submit_prompt,
            commands::chat::get_history,
            commands::settings::get_settings,
            commands::settings::set_setting,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
