/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : Graph 模块的错误类型
 */

use thiserror::Error;

use crate::nn::layer::LayerKind;
use crate::nn::node::{EdgeId, NodeId};
use crate::nn::validator::Rejection;

/// 图操作错误类型。都不是致命错误：出错的命令不生效，图保持上一次的合法状态。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("节点{0}不存在")]
    NodeNotFound(NodeId),
    #[error("边{0}不存在")]
    EdgeNotFound(EdgeId),
    #[error("无法连接 {source_kind} → {target_kind}：{reason}")]
    ConnectionRejected {
        source_kind: LayerKind,
        target_kind: LayerKind,
        reason: Rejection,
    },
}
