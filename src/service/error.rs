use thiserror::Error;

use crate::data::DataError;

/// 训练服务相关错误类型
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 响应不是合法的 JSON 对象，`raw`保留原文以便排查
    #[error("训练服务响应无法解析（{reason}）：{raw}")]
    InvalidResponse { raw: String, reason: String },

    #[error("网络请求失败: {0}")]
    Network(String),

    #[error("超参数不合法: {0}")]
    InvalidHyperParams(String),

    #[error("请求序列化失败: {0}")]
    Serialize(String),

    #[error("训练数据错误: {0}")]
    Data(#[from] DataError),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}
