/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 编辑命令：显示层发出的每个操作都是一条命令，由`LayerGraph::apply`逐条执行
 */

use super::error::GraphError;
use super::store::{LayerGraph, PatchOutcome};
use crate::nn::layer::LayerKind;
use crate::nn::node::{Edge, EdgeId, Node, NodeId, Position};

/// 图编辑命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddNode {
        kind: LayerKind,
    },
    RemoveNode {
        id: NodeId,
    },
    PatchParam {
        id: NodeId,
        name: String,
        value: f64,
    },
    /// 输入框里的原始文本，解析失败视为非法取值
    PatchParamText {
        id: NodeId,
        name: String,
        raw: String,
    },
    MoveNode {
        id: NodeId,
        position: Position,
    },
    Connect {
        source: NodeId,
        target: NodeId,
    },
    Disconnect {
        id: EdgeId,
    },
}

/// 命令执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    NodeAdded(Node),
    NodeRemoved(Node),
    ParamPatched(PatchOutcome),
    NodeMoved,
    Connected(EdgeId),
    Disconnected(Edge),
    Failed(GraphError),
}

impl CommandOutcome {
    /// 命令是否使图发生了变化（或按幂等语义成功）
    pub fn is_success(&self) -> bool {
        match self {
            CommandOutcome::ParamPatched(outcome) => outcome.is_applied(),
            CommandOutcome::Failed(_) => false,
            _ => true,
        }
    }

    /// 需要提示给用户的信息（连接被拒等），成功的命令没有
    pub fn message(&self) -> Option<String> {
        match self {
            CommandOutcome::Failed(error) => Some(error.to_string()),
            CommandOutcome::ParamPatched(PatchOutcome::Rejected { reason }) => {
                Some(reason.to_string())
            }
            _ => None,
        }
    }
}

impl LayerGraph {
    /// 执行一条命令。失败的命令不改变图
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        let result = match command {
            Command::AddNode { kind } => Ok(CommandOutcome::NodeAdded(self.add_node(kind))),
            Command::RemoveNode { id } => self.remove_node(&id).map(CommandOutcome::NodeRemoved),
            Command::PatchParam { id, name, value } => self
                .patch_param(&id, &name, value)
                .map(CommandOutcome::ParamPatched),
            Command::PatchParamText { id, name, raw } => self
                .patch_param_text(&id, &name, &raw)
                .map(CommandOutcome::ParamPatched),
            Command::MoveNode { id, position } => self
                .move_node(&id, position)
                .map(|()| CommandOutcome::NodeMoved),
            Command::Connect { source, target } => {
                self.connect(&source, &target).map(CommandOutcome::Connected)
            }
            Command::Disconnect { id } => self.disconnect(&id).map(CommandOutcome::Disconnected),
        };
        result.unwrap_or_else(CommandOutcome::Failed)
    }
}
