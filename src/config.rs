use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    pub dimension: usize,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub llm_endpoint: String,
    pub llm_key: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    /// Persona instruction prefixed to fallback-generation prompts.
    #[serde(default)]
    pub persona: Option<String>,
    /// Advisory word limit passed to the generator prompt. Not enforced on
    /// the generator's output.
    #[serde(default = "default_answer_word_limit")]
    pub answer_word_limit: usize,
}

fn default_llm_model() -> String {
    "supachai/llama-3-typhoon-v1.5".to_string()
}

fn default_answer_word_limit() -> usize {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    pub embeddings: EmbeddingsConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(crate::FaqRagError::Io)?;

        let config: AppConfig =
            toml::from_str(&content).map_err(crate::FaqRagError::TomlParsing)?;

        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            println!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(crate::FaqRagError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Get store database URL
    pub fn store_url(&self) -> &str {
        &self.store.url
    }

    /// Get max connections for database pool
    pub fn max_connections(&self) -> u32 {
        self.store.max_connections
    }

    /// Get min connections for database pool
    pub fn min_connections(&self) -> u32 {
        self.store.min_connections
    }

    /// Get connection timeout in seconds
    pub fn connection_timeout(&self) -> u64 {
        self.store.connection_timeout
    }

    /// Get embedding dimension
    pub fn embedding_dimension(&self) -> usize {
        self.embeddings.dimension
    }

    /// Get embedding model name
    pub fn embedding_model(&self) -> &str {
        &self.embeddings.model
    }

    /// Get LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.llm_endpoint
    }

    /// Get LLM API key ("ollama" selects the Ollama provider)
    pub fn llm_key(&self) -> &str {
        &self.llm.llm_key
    }

    /// Get LLM model name
    pub fn llm_model(&self) -> &str {
        &self.llm.llm_model
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const EXAMPLE: &str = r#"
[store]
url = "postgresql://localhost/faqrag"
max_connections = 10
min_connections = 1
connection_timeout = 30

[logging]
level = "info"
backtrace = false

[embeddings]
dimension = 512
model = "distiluse-base-multilingual-cased-v2"

[llm]
llm_endpoint = "http://localhost:11434"
llm_key = "ollama"
persona = "ผู้ตอบเป็นชาวสวนกล้วยผู้ชาย"
"#;

    #[test]
    fn test_parse_example_config() {
        let config: AppConfig = toml::from_str(EXAMPLE).unwrap();
        assert_eq!(config.store_url(), "postgresql://localhost/faqrag");
        assert_eq!(config.embedding_dimension(), 512);
        assert_eq!(config.llm_key(), "ollama");
        assert_eq!(config.llm.llm_model, "supachai/llama-3-typhoon-v1.5");
        assert_eq!(config.llm.answer_word_limit, 20);
        assert_eq!(config.llm.persona.as_deref(), Some("ผู้ตอบเป็นชาวสวนกล้วยผู้ชาย"));
    }

    #[test]
    fn test_server_defaults() {
        let config: AppConfig = toml::from_str(EXAMPLE).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert!(!config.server.enable_cors);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXAMPLE.as_bytes()).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_file_missing() {
        let result = AppConfig::from_file("/nonexistent/config.toml");
        assert!(matches!(result, Err(crate::FaqRagError::Io(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not valid toml [[[").unwrap();

        let result = AppConfig::from_file(file.path());
        assert!(matches!(result, Err(crate::FaqRagError::TomlParsing(_))));
    }
}
