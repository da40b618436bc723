//! 训练服务模块
//!
//! 把图快照与训练样本序列化为外部训练服务的请求，发送并解析其响应。
//!
//! # 主要组件
//!
//! - [`to_training_request`]/[`to_run_request`]: 生成请求
//! - [`from_training_response`]: 解析响应
//! - [`TrainerClient`]: 同步发送请求（传输方式由[`Transport`]决定）
//! - [`TrainingDispatcher`]: 后台发送，新请求取代旧请求
//! - [`TrainerConfig`]: 服务地址等配置
//!
//! # 使用示例
//!
//! ```
//! use layer_canvas::nn::{LayerGraph, LayerKind};
//! use layer_canvas::service::{HyperParams, to_training_request};
//!
//! let mut graph = LayerGraph::new();
//! let fc = graph.add_node(LayerKind::Linear);
//! let relu = graph.add_node(LayerKind::Relu);
//! graph.connect(fc.id(), relu.id()).unwrap();
//!
//! let request = to_training_request(&graph.snapshot(), &[], &HyperParams::default()).unwrap();
//! assert_eq!(request.nodes.len(), 2);
//! assert_eq!(request.edges.len(), 1);
//! ```

mod client;
pub mod config;
mod dispatch;
pub mod error;
mod payload;

#[cfg(test)]
mod tests;

pub use client::{RawResponse, TrainerClient, Transport, UreqTransport};
pub use config::TrainerConfig;
pub use dispatch::{Outcome, PendingRequest, TrainingDispatcher};
pub use error::ServiceError;
pub use payload::{
    EdgePair, HyperParams, LayerSpec, RunRequest, TrainingRequest, TrainingResult,
    all_param_names, from_training_response, to_run_request, to_training_request,
};
