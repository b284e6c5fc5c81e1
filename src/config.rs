//! 应用配置
//!
//! 按优先级从低到高合并：内置默认值 → 工作目录下可选的 `config.toml` → `.env` → 环境变量。
//! 环境变量不带前缀，键名转为小写（`PORT` → `port`，`DATABASE_URL` → `database_url`）。

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 绑定地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 数据库连接串，按 scheme 选择存储驱动
    pub database_url: Option<String>,
    /// 未设置 `database_url` 时使用的备用连接串
    pub mongo_uri: Option<String>,
    /// 连接串中未指定数据库时使用的 MongoDB 数据库名
    pub database_name: String,
    /// 默认日志级别，`RUST_LOG` 存在时以其为准
    pub log_level: String,
    /// 日志文件目录，未设置时只输出到控制台
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// 从 `config.toml`、`.env` 和进程环境加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let env = with_dotenv(Path::new(".env"), std::env::vars().collect());
        Self::load_with_env(Some(env))
    }

    /// 加载配置；`env` 为 `Some` 时用给定的键值代替进程环境变量
    pub fn load_with_env(env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("database_name", "products_api")?
            .set_default("log_level", "info")?
            .add_source(::config::File::with_name("config").required(false))
            .add_source(::config::Environment::default().source(env))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Validation("port must be greater than 0".to_string()));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::Validation("host must not be empty".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "invalid log level: {}, expected one of {:?}",
                self.log_level, valid_levels
            )));
        }

        Ok(())
    }

    /// 实际使用的数据库连接串
    pub fn connection_string(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .or(self.mongo_uri.as_deref())
            .filter(|url| !url.trim().is_empty())
    }
}

/// 把 `.env` 文件中的变量并入 `env`，已存在的键保持不变
///
/// 文件不存在时原样返回 `env`。
pub fn with_dotenv(path: &Path, mut env: HashMap<String, String>) -> HashMap<String, String> {
    let Ok(entries) = dotenvy::from_path_iter(path) else {
        return env;
    };

    for entry in entries {
        match entry {
            Ok((key, value)) => {
                env.entry(key).or_insert(value);
            }
            Err(e) => warn!("Skipping invalid line in {}: {}", path.display(), e),
        }
    }
    env
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_with_env(env(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.database_name, "products_api");
        assert_eq!(config.log_level, "info");
        assert!(config.connection_string().is_none());
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::load_with_env(env(&[
            ("PORT", "8081"),
            ("DATABASE_URL", "memory://"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.connection_string(), Some("memory://"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_mongo_uri_fallback() {
        let config =
            AppConfig::load_with_env(env(&[("MONGO_URI", "mongodb://localhost:27017/shop")]))
                .unwrap();
        assert_eq!(
            config.connection_string(),
            Some("mongodb://localhost:27017/shop")
        );
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result = AppConfig::load_with_env(env(&[("LOG_LEVEL", "verbose")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_dotenv_fills_missing_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "MONGO_URI=mongodb://localhost:27017/shop\nPORT=4000\n",
        )
        .unwrap();

        let process_env = HashMap::from([("PORT".to_string(), "5000".to_string())]);
        let merged = with_dotenv(&path, process_env);
        let config = AppConfig::load_with_env(Some(merged)).unwrap();

        assert_eq!(
            config.connection_string(),
            Some("mongodb://localhost:27017/shop")
        );
        // 进程环境变量优先于 .env
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_missing_dotenv_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let process_env = HashMap::from([("PORT".to_string(), "5000".to_string())]);
        let merged = with_dotenv(&dir.path().join(".env"), process_env.clone());
        assert_eq!(merged, process_env);
    }

    #[test]
    fn test_zero_port_rejected() {
        let result = AppConfig::load_with_env(env(&[("PORT", "0")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
