/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : LayerGraph：图存储（唯一的事实来源）及其编辑命令
 *
 * 单写者：所有命令按顺序同步执行，每条生效的命令都在写时复制的快照上完成，
 * 之后调用方重新读取`snapshot()`即可。
 */

use log::{debug, info, warn};
use std::sync::Arc;

use super::error::GraphError;
use super::snapshot::GraphSnapshot;
use crate::errors::ParamError;
use crate::nn::layer::{LayerKind, TraitForLayer};
use crate::nn::node::{Edge, EdgeId, Node, NodeId, Position};
use crate::nn::shape::{Dim, input_dim, output_dim};
use crate::nn::validator::{can_connect, check_connection};

/// 修改参数的结果
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOutcome {
    /// 已生效；若修改的是输出维度参数，附带各直接后继的维度提示
    Applied { hints: Vec<DimHint> },
    /// 取值不合法（或该层没有此参数），本次修改被丢弃，参数保持原值
    Rejected { reason: ParamError },
}

impl PatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PatchOutcome::Applied { .. })
    }
}

/// 输出维度变化后，对某个直接后继的维度提示（只读信息，不会改动后继的参数）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimHint {
    /// 后继节点
    pub target: NodeId,
    pub target_kind: LayerKind,
    /// 上游节点新的输出维度
    pub incoming: Dim,
    /// 后继节点当前声明的输入维度
    pub declared: Dim,
    /// 这条边按当前参数是否仍能通过校验
    pub compatible: bool,
}

/// 层图存储
#[derive(Debug, Clone)]
pub struct LayerGraph {
    name: String,
    snapshot: Arc<GraphSnapshot>,
}

impl Default for LayerGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerGraph {
    // ========== 创建 ==========

    pub fn new() -> Self {
        Self::with_name("default_graph")
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            snapshot: Arc::new(GraphSnapshot::default()),
        }
    }

    // ========== 基础访问器 ==========

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 当前快照（只是增加引用计数）
    pub fn snapshot(&self) -> Arc<GraphSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.snapshot.node(id)
    }

    pub fn nodes(&self) -> &[Node] {
        self.snapshot.nodes()
    }

    pub fn edges(&self) -> &[Edge] {
        self.snapshot.edges()
    }

    pub fn nodes_count(&self) -> usize {
        self.snapshot.nodes_count()
    }

    pub fn edges_count(&self) -> usize {
        self.snapshot.edges_count()
    }

    pub fn successors(&self, id: &NodeId) -> Result<Vec<&Node>, GraphError> {
        let _ = self.get_node(id)?;
        Ok(self.snapshot.successors(id))
    }

    pub fn predecessors(&self, id: &NodeId) -> Result<Vec<&Node>, GraphError> {
        let _ = self.get_node(id)?;
        Ok(self.snapshot.predecessors(id))
    }

    fn get_node(&self, id: &NodeId) -> Result<&Node, GraphError> {
        self.snapshot
            .node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    /// 在快照的可写副本上执行修改（若快照仍被他人持有则先复制）
    fn commit<R>(&mut self, edit: impl FnOnce(&mut GraphSnapshot) -> R) -> R {
        let next = Arc::make_mut(&mut self.snapshot);
        let result = edit(next);
        next.revision += 1;
        result
    }

    // ========== 节点命令 ==========

    /// 添加一个使用默认参数的节点
    pub fn add_node(&mut self, kind: LayerKind) -> Node {
        let node = Node::new(kind);
        debug!("图{}添加{}", self.name, node);
        self.commit(|g| g.nodes.push(node.clone()));
        node
    }

    /// 删除节点，并一并删除与之相连的所有边
    pub fn remove_node(&mut self, id: &NodeId) -> Result<Node, GraphError> {
        let _ = self.get_node(id)?;
        let removed = self.commit(|g| {
            g.edges.retain(|edge| !edge.touches(id));
            let index = g.nodes.iter().position(|node| &node.id == id);
            index.map(|index| g.nodes.remove(index))
        });
        let removed = removed.ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        debug!("图{}删除{}", self.name, removed);
        Ok(removed)
    }

    /// 移动节点（仅影响显示）
    pub fn move_node(&mut self, id: &NodeId, position: Position) -> Result<(), GraphError> {
        let _ = self.get_node(id)?;
        self.commit(|g| {
            if let Some(node) = g.node_mut(id) {
                node.position = position;
            }
        });
        Ok(())
    }

    /// 修改节点的一个参数。
    ///
    /// 取值不满足参数约束时静默丢弃（返回`PatchOutcome::Rejected`，不报错，图不变）；
    /// 只有节点不存在才返回错误。
    pub fn patch_param(
        &mut self,
        id: &NodeId,
        name: &str,
        value: f64,
    ) -> Result<PatchOutcome, GraphError> {
        let node = self.get_node(id)?;
        let mut params = node.params.clone();
        if let Err(reason) = params.set_param(name, value) {
            debug!("忽略对{}的参数修改: {}", node, reason);
            return Ok(PatchOutcome::Rejected { reason });
        }

        let affects_output = node.kind().output_dim_key() == Some(name);
        self.commit(|g| {
            if let Some(node) = g.node_mut(id) {
                node.params = params;
            }
        });

        let hints = if affects_output {
            self.dim_hints(id)
        } else {
            Vec::new()
        };
        Ok(PatchOutcome::Applied { hints })
    }

    /// 以文本形式修改参数（输入框原样传入的内容），无法解析为数字时同样静默丢弃
    pub fn patch_param_text(
        &mut self,
        id: &NodeId,
        name: &str,
        raw: &str,
    ) -> Result<PatchOutcome, GraphError> {
        match raw.trim().parse::<f64>() {
            Ok(value) => self.patch_param(id, name, value),
            Err(_) => {
                let _ = self.get_node(id)?;
                debug!("忽略节点{}参数{}的非数字输入“{}”", id, name, raw);
                Ok(PatchOutcome::Rejected {
                    reason: ParamError::NotNumeric {
                        name: name.to_string(),
                        raw: raw.to_string(),
                    },
                })
            }
        }
    }

    /// 计算某节点各直接后继的维度提示
    pub fn dim_hints(&self, id: &NodeId) -> Vec<DimHint> {
        let Some(source) = self.snapshot.node(id) else {
            return Vec::new();
        };
        let incoming = output_dim(source);
        self.snapshot
            .successors(id)
            .into_iter()
            .map(|target| DimHint {
                target: target.id.clone(),
                target_kind: target.kind(),
                incoming,
                declared: input_dim(target),
                compatible: can_connect(Some(source), Some(target)),
            })
            .collect()
    }

    // ========== 边命令 ==========

    /// 连接两个节点。
    ///
    /// 重复连接同一对节点是幂等的：直接返回已有边的 ID。
    /// 校验不通过时返回`GraphError::ConnectionRejected`，图不变。
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Result<EdgeId, GraphError> {
        let source_node = self.get_node(source)?;
        let target_node = self.get_node(target)?;

        if let Some(edge) = self.snapshot.edge_between(source, target) {
            return Ok(edge.id.clone());
        }

        if let Err(reason) = check_connection(Some(source_node), Some(target_node)) {
            let error = GraphError::ConnectionRejected {
                source_kind: source_node.kind(),
                target_kind: target_node.kind(),
                reason,
            };
            warn!("{error}");
            return Err(error);
        }

        let edge = Edge::new(source.clone(), target.clone());
        let id = edge.id.clone();
        info!("已连接 {} → {}", source_node, target_node);
        self.commit(|g| g.edges.push(edge));
        Ok(id)
    }

    /// 删除一条边
    pub fn disconnect(&mut self, id: &EdgeId) -> Result<Edge, GraphError> {
        if self.snapshot.edge(id).is_none() {
            return Err(GraphError::EdgeNotFound(id.clone()));
        }
        let removed = self.commit(|g| {
            let index = g.edges.iter().position(|edge| &edge.id == id);
            index.map(|index| g.edges.remove(index))
        });
        removed.ok_or_else(|| GraphError::EdgeNotFound(id.clone()))
    }
}
