//! 训练服务的连接配置
//!
//! 配置可以来自默认值、JSON 文件和环境变量，后者优先：
//! - `LAYER_CANVAS_ENDPOINT`：服务地址
//! - `LAYER_CANVAS_TIMEOUT_SECS`：请求超时（秒）

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use super::error::ServiceError;

pub const ENV_ENDPOINT: &str = "LAYER_CANVAS_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "LAYER_CANVAS_TIMEOUT_SECS";

/// 训练服务配置（JSON 中缺省的字段取默认值）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// 服务地址，如`http://localhost:8000`
    pub endpoint: String,
    /// 推理请求路径
    pub run_path: String,
    /// 训练请求路径
    pub train_path: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            // `/run_model`只接受完整的图请求，推理请求另走`/run`
            run_path: "/run".to_string(),
            train_path: "/run_model".to_string(),
            timeout_secs: 30,
        }
    }
}

impl TrainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_run_path(mut self, path: &str) -> Self {
        self.run_path = path.to_string();
        self
    }

    pub fn with_train_path(mut self, path: &str) -> Self {
        self.train_path = path.to_string();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// 从 JSON 文本加载
    pub fn from_json(json: &str) -> Result<Self, ServiceError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ServiceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ServiceError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// 用环境变量覆盖对应字段
    pub fn with_env_overrides(self) -> Result<Self, ServiceError> {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    /// 用任意来源覆盖对应字段（`lookup`按环境变量名取值）
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ServiceError> {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                ServiceError::Config(format!("{ENV_TIMEOUT_SECS}须为正整数，实际为“{raw}”"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.endpoint.trim().is_empty() {
            return Err(ServiceError::Config("服务地址不能为空".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ServiceError::Config("超时时间须大于0".to_string()));
        }
        Ok(())
    }

    /// 拼接完整的请求地址
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), path)
    }
}
