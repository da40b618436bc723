//! 训练样本解析错误类型定义

use std::fmt;
use thiserror::Error;

/// 样本所属的一侧（输入或输出）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSide {
    Input,
    Output,
}

impl fmt::Display for SampleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleSide::Input => write!(f, "输入"),
            SampleSide::Output => write!(f, "输出"),
        }
    }
}

/// 样本解析相关错误。
///
/// 任何一个样本出错都会使整批样本作废，错误中带有出错样本的序号（从 1 开始）。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataError {
    /// 文本无法解析为数值张量
    #[error("{}", malformed_message(.index, .reason))]
    MalformedSample {
        index: Option<usize>,
        reason: String,
    },

    /// 形状与第一个样本不一致
    #[error("第{index}个样本形状不匹配: 期望 {expected:?}, 实际 {got:?}")]
    ShapeMismatch {
        index: usize,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// 样本条数与声明的数量不符
    #[error("{side}样本数量不匹配: 期望 {expected}, 实际 {got}")]
    CountMismatch {
        side: SampleSide,
        expected: usize,
        got: usize,
    },

    /// 一个样本都没有
    #[error("样本批次为空")]
    EmptyBatch,
}

fn malformed_message(index: &Option<usize>, reason: &str) -> String {
    match index {
        Some(index) => format!("第{index}个样本格式错误: {reason}"),
        None => format!("样本格式错误: {reason}"),
    }
}

impl DataError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        DataError::MalformedSample {
            index: None,
            reason: reason.into(),
        }
    }

    /// 给格式错误补上样本序号（其它错误原样返回）
    pub(crate) fn at_index(self, position: usize) -> Self {
        match self {
            DataError::MalformedSample { index: None, reason } => DataError::MalformedSample {
                index: Some(position),
                reason,
            },
            other => other,
        }
    }
}
