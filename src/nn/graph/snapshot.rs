/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 图快照：某一时刻图的不可变视图
 *
 * 每条命令都会产生一个新快照（写时复制），显示层和训练请求持有的旧快照不受后续编辑影响。
 */

use crate::nn::node::{Edge, EdgeId, Node, NodeId};

/// 图的不可变快照：节点与边都按加入顺序排列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSnapshot {
    pub(in crate::nn::graph) nodes: Vec<Node>,
    pub(in crate::nn::graph) edges: Vec<Edge>,
    /// 每生效一条命令加 1
    pub(in crate::nn::graph) revision: u64,
}

impl GraphSnapshot {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| &edge.id == id)
    }

    /// 按（源, 目标）查找边
    pub fn edge_between(&self, source: &NodeId, target: &NodeId) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|edge| &edge.source == source && &edge.target == target)
    }

    /// 直接后继节点
    pub fn successors(&self, id: &NodeId) -> Vec<&Node> {
        self.edges
            .iter()
            .filter(|edge| &edge.source == id)
            .filter_map(|edge| self.node(&edge.target))
            .collect()
    }

    /// 直接前驱节点
    pub fn predecessors(&self, id: &NodeId) -> Vec<&Node> {
        self.edges
            .iter()
            .filter(|edge| &edge.target == id)
            .filter_map(|edge| self.node(&edge.source))
            .collect()
    }

    /// 与某节点相连的所有边
    pub fn incident_edges(&self, id: &NodeId) -> Vec<&Edge> {
        self.edges.iter().filter(|edge| edge.touches(id)).collect()
    }

    pub(in crate::nn::graph) fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| &node.id == id)
    }
}
