/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : Graph 模块：层图的存储与编辑
 *
 * 公开 API：
 * - `LayerGraph`: 图存储，所有编辑命令的入口
 * - `GraphSnapshot`: 某一时刻图的不可变视图
 * - `Command`/`CommandOutcome`: 显示层使用的命令式接口
 * - `GraphError`: 错误类型
 */

mod command;
mod error;
mod snapshot;
mod store;

pub use command::{Command, CommandOutcome};
pub use error::GraphError;
pub use snapshot::GraphSnapshot;
pub use store::{DimHint, LayerGraph, PatchOutcome};
