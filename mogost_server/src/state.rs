use mogost_common::ServerConfig;
use mogost_core::{CsvViewer, TextDiffConfig, TextDiffEngine};
use std::time::Duration;

/// Shared, read-only state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub text_engine: TextDiffEngine,
    pub csv_viewer: CsvViewer,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let text_engine = TextDiffEngine::with_config(TextDiffConfig {
            html_timeout: (config.html_timeout_ms > 0)
                .then(|| Duration::from_millis(config.html_timeout_ms)),
        });
        let csv_viewer = CsvViewer::new().with_preview_rows(config.csv_preview_rows);
        Self {
            config,
            text_engine,
            csv_viewer,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_timeout_from_config() {
        let state = AppState::default();
        assert_eq!(
            state.text_engine.config().html_timeout,
            Some(Duration::from_secs(1))
        );

        let config = ServerConfig {
            html_timeout_ms: 250,
            ..ServerConfig::default()
        };
        let state = AppState::new(config);
        assert_eq!(
            state.text_engine.config().html_timeout,
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn zero_html_timeout_disables_deadline() {
        let config = ServerConfig {
            html_timeout_ms: 0,
            ..ServerConfig::default()
        };
        let state = AppState::new(config);
        assert!(state.text_engine.config().html_timeout.is_none());
    }
}
