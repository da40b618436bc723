use ndarray::{Array, ArrayViewD, IxDyn};
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::errors::TensorError;

#[cfg(test)]
mod tests;

/// 定义张量字面量的结构体：训练样本的输入/输出、推理请求的输入都以它表示。
/// 注：此处的张量只承载数据和形状，不参与任何计算（计算交给外部训练服务）。
///
/// 序列化为 `{"data": <嵌套数组>, "shape": [...]}`，
/// 如形状为`[2, 3]`的张量，`data`为`[[a, b, c], [d, e, f]]`。
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量。除`shape`为`[]`（标量）外，`data`的长度必须和`shape`中所有元素的乘积相等。
    pub fn new(data: &[f32], shape: &[usize]) -> Result<Tensor, TensorError> {
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).map_err(|_| {
            TensorError::IncompatibleShape {
                len: data.len(),
                shape: shape.to_vec(),
            }
        })?;
        Ok(Tensor { data })
    }

    /// 由嵌套的 JSON 数组构造张量（训练服务的输出就是这种格式）。
    /// 纯数字视为标量；各层长度必须一致。
    /// 形状只按首元素推测，在逐层校验之前不能据此预分配空间。
    pub fn from_nested(value: &Value) -> Result<Tensor, TensorError> {
        let mut shape = Vec::new();
        let mut cursor = value;
        while let Value::Array(items) = cursor {
            shape.push(items.len());
            match items.first() {
                Some(first) => cursor = first,
                None => break,
            }
        }

        let mut data = Vec::new();
        collect_nested(value, &shape, &mut data)?;
        Tensor::new(&data, &shape)
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// 张量的阶数，即`shape()`的元素个数
    pub fn dimension(&self) -> usize {
        self.data.ndim()
    }

    /// 元素总数
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 按行优先顺序返回所有元素
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }

    /// 按行优先顺序获取第`index`个元素
    pub fn get_flat(&self, index: usize) -> Option<f32> {
        self.data.iter().nth(index).copied()
    }
}

fn collect_nested(value: &Value, shape: &[usize], out: &mut Vec<f32>) -> Result<(), TensorError> {
    match (value, shape.split_first()) {
        (Value::Array(items), Some((&len, rest))) => {
            if items.len() != len {
                return Err(TensorError::InconsitentShape);
            }
            for item in items {
                collect_nested(item, rest, out)?;
            }
            Ok(())
        }
        (Value::Number(number), None) => {
            let number = number.as_f64().ok_or(TensorError::NotNumeric)?;
            out.push(number as f32);
            Ok(())
        }
        (Value::Array(_), None) => Err(TensorError::InconsitentShape),
        (Value::Number(_), Some(_)) => Err(TensorError::InconsitentShape),
        _ => Err(TensorError::NotNumeric),
    }
}

/// 把张量视图按嵌套数组写出
struct Nested<'a>(ArrayViewD<'a, f32>);

impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.ndim() {
            0 => serializer.serialize_f32(self.0.iter().next().copied().unwrap_or_default()),
            1 => {
                let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
                for value in self.0.iter() {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            _ => {
                let rows = self.0.outer_iter();
                let mut seq = serializer.serialize_seq(Some(rows.len()))?;
                for row in rows {
                    seq.serialize_element(&Nested(row))?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Tensor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Tensor", 2)?;
        state.serialize_field("data", &Nested(self.data.view()))?;
        state.serialize_field("shape", self.shape())?;
        state.end()
    }
}
