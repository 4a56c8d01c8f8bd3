//! Configuração do provaflow carregada a partir de `provaflow.toml`.
//!
//! A struct [`ProvaflowConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `PROVAFLOW_API_URL` tem precedência sobre o arquivo.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Configuração de nível superior carregada de `provaflow.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvaflowConfig {
    /// URL base da API do backend de extração.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Intervalo entre consultas de status de job, em milissegundos.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

// Valor padrão para a URL do backend em desenvolvimento local.
fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

// Valor padrão para o intervalo de polling: 2 segundos.
fn default_poll_interval_ms() -> u64 {
    crate::poller::INTERVALO_PADRAO.as_millis() as u64
}

impl Default for ProvaflowConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl ProvaflowConfig {
    /// Carrega a configuração do caminho informado, ou de `provaflow.toml`
    /// no diretório atual. Usa valores padrão se o arquivo não existir.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or(Path::new("provaflow.toml"));
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<ProvaflowConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo para a URL.
        if let Ok(url) = std::env::var("PROVAFLOW_API_URL")
            && !url.is_empty()
        {
            config.api_base_url = url;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = ProvaflowConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.poll_interval_ms, 2000);
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            api_base_url = "https://api.provaflow.com.br"
        "#;
        let config: ProvaflowConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_base_url, "https://api.provaflow.com.br");
        assert_eq!(config.poll_interval_ms, 2000);
    }

    #[test]
    fn load_reads_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provaflow.toml");
        std::fs::write(&path, "poll_interval_ms = 500\n").unwrap();

        let config = ProvaflowConfig::load(Some(&path)).unwrap();
        assert_eq!(config.poll_interval_ms, 500);
    }

    #[test]
    fn load_falls_back_to_defaults_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nao_existe.toml");
        let config = ProvaflowConfig::load(Some(&path)).unwrap();
        assert_eq!(config.poll_interval_ms, 2000);
    }
}
