/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 层参数的取值类型与取值约束
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{ComparisonOperator, ParamError};

/// 参数值：整数或浮点数
///
/// 序列化时不带标签，整数写成`16`，浮点写成`0.5`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(usize),
    Float(f32),
}

impl ParamValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            ParamValue::Int(n) => n as f64,
            ParamValue::Float(f) => f as f64,
        }
    }

    /// 只有整数参数才能作为维度使用
    pub fn as_usize(&self) -> Option<usize> {
        match *self {
            ParamValue::Int(n) => Some(n),
            ParamValue::Float(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// 参数的取值约束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamConstraint {
    /// 正整数（>0）
    PositiveInt,
    /// 非负整数（≥0），如 padding
    NonNegativeInt,
    /// [0, 1] 内的浮点数，如 dropout 概率
    Probability,
}

impl ParamConstraint {
    /// 校验并转换原始数值，不满足约束时返回`ParamError`
    pub fn check(&self, name: &str, value: f64) -> Result<ParamValue, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NotFinite {
                name: name.to_string(),
            });
        }
        match self {
            ParamConstraint::PositiveInt => {
                require(name, value, ComparisonOperator::GreaterThan, 0.0)?;
                as_integer(name, value)
            }
            ParamConstraint::NonNegativeInt => {
                require(name, value, ComparisonOperator::GreaterOrEqual, 0.0)?;
                as_integer(name, value)
            }
            ParamConstraint::Probability => {
                require(name, value, ComparisonOperator::GreaterOrEqual, 0.0)?;
                require(name, value, ComparisonOperator::LessOrEqual, 1.0)?;
                Ok(ParamValue::Float(value as f32))
            }
        }
    }
}

fn require(
    name: &str,
    value: f64,
    operator: ComparisonOperator,
    threshold: f64,
) -> Result<(), ParamError> {
    if operator.holds(value, threshold) {
        Ok(())
    } else {
        Err(ParamError::ValueMustSatisfyComparison {
            name: name.to_string(),
            operator,
            threshold,
            value,
        })
    }
}

fn as_integer(name: &str, value: f64) -> Result<ParamValue, ParamError> {
    if value.fract() != 0.0 || value > usize::MAX as f64 {
        return Err(ParamError::MustBeInteger {
            name: name.to_string(),
            value,
        });
    }
    Ok(ParamValue::Int(value as usize))
}

/// 参数表中的一项：参数名（即序列化时的字段名）及其约束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub constraint: ParamConstraint,
}

/// 各层参数记录中字段的标量类型（`usize`或`f32`）
pub trait ParamScalar: Copy {
    fn from_value(value: ParamValue) -> Option<Self>;
    fn into_value(self) -> ParamValue;
}

impl ParamScalar for usize {
    fn from_value(value: ParamValue) -> Option<Self> {
        value.as_usize()
    }

    fn into_value(self) -> ParamValue {
        ParamValue::Int(self)
    }
}

impl ParamScalar for f32 {
    fn from_value(value: ParamValue) -> Option<Self> {
        Some(value.as_f64() as f32)
    }

    fn into_value(self) -> ParamValue {
        ParamValue::Float(self)
    }
}
