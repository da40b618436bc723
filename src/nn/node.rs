/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 图中的节点（层实例）与边（数据流连接）
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::nn::layer::{LayerKind, LayerParams, ParamValue, TraitForLayer};

/// 进程内唯一的节点 ID 计数器（多个图共享，保证不同编辑会话的 ID 也不重复）
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// 节点 ID（不透明字符串）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// 生成新的节点 ID，形如`linear_3`（先递增再返回，所以第一个编号是 1）
    pub(crate) fn generate(kind: LayerKind) -> Self {
        let serial = NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed) + 1;
        NodeId(format!("{kind}_{serial}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

/// 边 ID：由有序的（源, 目标）对唯一确定
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn between(source: &NodeId, target: &NodeId) -> Self {
        EdgeId(format!("{source}->{target}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        EdgeId(id.to_string())
    }
}

/// 节点在画布上的位置（仅用于显示，不参与任何校验）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    /// 新节点出现的位置
    fn default() -> Self {
        Self::new(200.0, 200.0)
    }
}

/// 节点：一个带具体参数的层实例
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) params: LayerParams,
    pub(crate) position: Position,
}

impl Node {
    /// 以默认参数创建某种层的节点
    pub(crate) fn new(kind: LayerKind) -> Self {
        Self {
            id: NodeId::generate(kind),
            params: kind.default_params(),
            position: Position::default(),
        }
    }

    /// 以指定 ID 和参数构造节点（供显示层回放已有画布、测试使用）
    pub fn with_params(id: NodeId, params: LayerParams) -> Self {
        Self {
            id,
            params,
            position: Position::default(),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> LayerKind {
        self.params.kind()
    }

    pub fn params(&self) -> &LayerParams {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<ParamValue> {
        self.params.get_param(name)
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "节点[id={}, type={}]", self.id, self.kind())
    }
}

/// 边：从`source`流向`target`的连接
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub(crate) id: EdgeId,
    pub(crate) source: NodeId,
    pub(crate) target: NodeId,
}

impl Edge {
    pub(crate) fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::between(&source, &target),
            source,
            target,
        }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    /// 是否与某节点相连（作为源或目标）
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }
}
