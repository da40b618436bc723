/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 连接校验：判断一条候选边的两端是否形状兼容
 *
 * 判定顺序（命中即返回）：
 * 1. 任一端节点不存在 → 拒绝
 * 2. 目标是 embedding → 拒绝（embedding 只能作为序列起点）
 * 3. 源输出维度与目标输入维度都已知且不相等 → 拒绝
 * 4. linear → conv1d：两端都已知且相等才接受（通道匹配不能含糊）
 * 5. 目标是 linear/layernorm：任一端未知即接受，否则相等才接受
 * 6. 目标是 relu/dropout：不改变形状，总是接受
 * 7. 其余情况接受
 *
 * 每条边只与其直接相邻的节点比较，不做整条链的传递检查。
 * 校验是纯函数：不修改图，相同输入总得到相同结论。
 */

use thiserror::Error;

use crate::nn::layer::LayerKind;
use crate::nn::node::Node;
use crate::nn::shape::{Dim, input_dim, output_dim};

/// 拒绝连接的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("连接的节点不存在")]
    MissingNode,
    #[error("embedding 层不能作为连接目标")]
    EmbeddingTarget,
    #[error("源节点输出维度为{source_dim}，目标节点期望输入维度为{target_dim}")]
    DimensionMismatch {
        source_dim: usize,
        target_dim: usize,
    },
    #[error("linear 接入 conv1d 时 outFeatures 与 inChannels 都必须已设置且相等")]
    ChannelsUndetermined,
}

/// 检查从`source`到`target`的连接，返回拒绝原因
pub fn check_connection(source: Option<&Node>, target: Option<&Node>) -> Result<(), Rejection> {
    let (source, target) = match (source, target) {
        (Some(source), Some(target)) => (source, target),
        _ => return Err(Rejection::MissingNode),
    };

    if target.kind() == LayerKind::Embedding {
        return Err(Rejection::EmbeddingTarget);
    }

    let source_dim = output_dim(source);
    let target_dim = input_dim(target);
    if let (Some(s), Some(t)) = (source_dim, target_dim) {
        if s != t {
            return Err(Rejection::DimensionMismatch {
                source_dim: s,
                target_dim: t,
            });
        }
    }

    match target.kind() {
        LayerKind::Conv1d if source.kind() == LayerKind::Linear => {
            require_known_equal(source_dim, target_dim)
        }
        // 未知维度宽松处理；已知且不等的情况在上面已经拒绝
        LayerKind::Linear | LayerKind::LayerNorm => Ok(()),
        LayerKind::Relu | LayerKind::Dropout => Ok(()),
        LayerKind::Embedding => Err(Rejection::EmbeddingTarget),
        LayerKind::Conv1d
        | LayerKind::Conv2d
        | LayerKind::Conv3d
        | LayerKind::ConvTranspose1d
        | LayerKind::ConvTranspose2d
        | LayerKind::AvgPool1d
        | LayerKind::AvgPool2d
        | LayerKind::AvgPool3d
        | LayerKind::MaxPool1d
        | LayerKind::MaxPool2d
        | LayerKind::MaxPool3d
        | LayerKind::AdaptiveAvgPool1d
        | LayerKind::AdaptiveAvgPool2d => Ok(()),
    }
}

fn require_known_equal(source_dim: Dim, target_dim: Dim) -> Result<(), Rejection> {
    match (source_dim, target_dim) {
        (Some(s), Some(t)) if s == t => Ok(()),
        (Some(s), Some(t)) => Err(Rejection::DimensionMismatch {
            source_dim: s,
            target_dim: t,
        }),
        _ => Err(Rejection::ChannelsUndetermined),
    }
}

/// 能否连接（`check_connection`的布尔版本）
pub fn can_connect(source: Option<&Node>, target: Option<&Node>) -> bool {
    check_connection(source, target).is_ok()
}
