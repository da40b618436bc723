//! 与外部训练服务的通信
//!
//! `Transport`只负责把 JSON 文本 POST 出去并取回原始响应，
//! `TrainerClient`负责组装请求、解析响应；测试中可替换为内存实现。

use log::{info, warn};
use std::time::Duration;

use super::config::TrainerConfig;
use super::error::ServiceError;
use super::payload::{TrainingRequest, TrainingResult, from_training_response, to_run_request};
use crate::tensor::Tensor;

/// 原始 HTTP 响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 请求发送方式
pub trait Transport: Send + Sync {
    /// 向`path`发送 JSON 请求体。非 2xx 状态码也作为`RawResponse`返回，
    /// 只有连接失败、超时等才返回错误
    fn post_json(&self, path: &str, body: &str) -> Result<RawResponse, ServiceError>;
}

/// 基于`ureq`的 HTTP 实现
pub struct UreqTransport {
    agent: ureq::Agent,
    config: TrainerConfig,
}

impl UreqTransport {
    pub fn new(config: TrainerConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self { agent, config }
    }
}

impl Transport for UreqTransport {
    fn post_json(&self, path: &str, body: &str) -> Result<RawResponse, ServiceError> {
        let url = self.config.url(path);
        let response = match self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_string(body)
        {
            Ok(response) => response,
            // 服务端报错时响应体里通常有`error`/`detail`，照常读取
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(e)) => {
                return Err(ServiceError::Network(format!("无法访问 {url}: {e}")));
            }
        };

        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| ServiceError::Network(format!("读取响应失败: {e}")))?;
        Ok(RawResponse { status, body })
    }
}

/// 训练服务客户端
#[derive(Debug)]
pub struct TrainerClient<T: Transport> {
    transport: T,
    config: TrainerConfig,
}

impl TrainerClient<UreqTransport> {
    /// 使用 HTTP 传输
    pub fn from_config(config: TrainerConfig) -> Self {
        Self::new(UreqTransport::new(config.clone()), config)
    }
}

impl<T: Transport> TrainerClient<T> {
    pub fn new(transport: T, config: TrainerConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 推理：以当前服务端模型计算`input`的输出
    pub fn run(&self, input: &Tensor) -> Result<TrainingResult, ServiceError> {
        let body = serde_json::to_string(&to_run_request(input))
            .map_err(|e| ServiceError::Serialize(e.to_string()))?;
        self.exchange(&self.config.run_path, &body)
    }

    /// 训练
    pub fn train(&self, request: &TrainingRequest) -> Result<TrainingResult, ServiceError> {
        let body =
            serde_json::to_string(request).map_err(|e| ServiceError::Serialize(e.to_string()))?;
        info!(
            "提交训练请求：{}个节点，{}个样本",
            request.nodes.len(),
            request.training.len()
        );
        self.exchange(&self.config.train_path, &body)
    }

    fn exchange(&self, path: &str, body: &str) -> Result<TrainingResult, ServiceError> {
        let response = self.transport.post_json(path, body)?;
        let mut result = from_training_response(&response.body)?;
        if !response.is_success() && result.error.is_none() {
            result.error = Some(format!("训练服务返回状态码{}", response.status));
        }
        if let Some(error) = &result.error {
            warn!("训练服务返回错误（状态码{}）: {}", response.status, error);
        }
        Ok(result)
    }
}
