use thiserror::Error;
mod ops;
pub use self::ops::*;

/// 层参数校验错误。
///
/// 图存储在修改参数时遇到此类错误会静默丢弃本次修改（保留上一次的合法值），
/// 不会向上抛出。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("{kind}层没有名为{name}的参数")]
    UnknownParam { kind: String, name: String },
    // 数字比较用
    #[error("参数{name}须{operator}{threshold}，实际为{value}")]
    ValueMustSatisfyComparison {
        name: String,
        operator: ComparisonOperator,
        threshold: f64,
        value: f64,
    },
    #[error("参数{name}须为整数，实际为{value}")]
    MustBeInteger { name: String, value: f64 },
    #[error("参数{name}须为有限数值")]
    NotFinite { name: String },
    #[error("参数{name}的输入“{raw}”不是数字")]
    NotNumeric { name: String, raw: String },
}

/// 张量构造错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("嵌套数组中存在非数值元素")]
    NotNumeric,
    #[error("嵌套数组各层长度不一致，无法构成张量")]
    InconsitentShape,
    #[error("数据长度{len}与形状{shape:?}不匹配")]
    IncompatibleShape { len: usize, shape: Vec<usize> },
}
