use crate::core::cookbook::Cookbook;
use crate::core::resolver::{ResolverSettings, DEFAULT_MAX_DEPTH};
use crate::domain::model::EntryDefinition;
use crate::utils::error::{CookbookError, Result};
use crate::utils::validation::{validate_bind_address, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const MAX_DEPTH_LIMIT: usize = 65_536;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CookbookConfig {
    pub resolver: Option<ResolverConfig>,
    pub server: Option<ServerConfig>,
    #[serde(default)]
    pub entries: Vec<EntryDefinition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub json_logs: Option<bool>,
}

impl CookbookConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CookbookError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CookbookError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BIND_ADDR})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CookbookError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn max_depth(&self) -> usize {
        self.resolver
            .as_ref()
            .and_then(|r| r.max_depth)
            .unwrap_or(DEFAULT_MAX_DEPTH)
    }

    /// 命令列的 --max-depth 優先於檔案設定，需在 validate 之前套用
    pub fn apply_max_depth_override(&mut self, max_depth: Option<usize>) {
        if let Some(depth) = max_depth {
            self.resolver.get_or_insert_with(Default::default).max_depth = Some(depth);
        }
    }

    pub fn bind(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(DEFAULT_BIND)
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        validate_bind_address("server.bind", self.bind())
    }

    pub fn json_logs(&self) -> bool {
        self.server
            .as_ref()
            .and_then(|s| s.json_logs)
            .unwrap_or(false)
    }

    /// Builds a cookbook seeded with every `[[entries]]` table, in file order.
    pub fn build_cookbook(&self, max_depth_override: Option<usize>) -> Result<Cookbook> {
        let settings = ResolverSettings {
            max_depth: max_depth_override.unwrap_or_else(|| self.max_depth()),
        };
        validate_range("resolver.max_depth", settings.max_depth, 1, MAX_DEPTH_LIMIT)?;

        let cookbook = Cookbook::new(settings);
        let added = cookbook.add_entries(&self.entries)?;
        tracing::info!("📚 Loaded {} cookbook entries", added);
        Ok(cookbook)
    }
}

impl Validate for CookbookConfig {
    fn validate(&self) -> Result<()> {
        validate_range("resolver.max_depth", self.max_depth(), 1, MAX_DEPTH_LIMIT)?;
        if self.server.as_ref().and_then(|s| s.bind.as_ref()).is_some() {
            self.bind_address()?;
        }
        Ok(())
    }
}
