//! 训练样本解析
//!
//! 把用户输入的数值文本（如 `"1 2 3; 4 5 6"`）解析为张量字面量，
//! 并校验同一批样本的形状是否一致。

use log::debug;
use serde::Serialize;

use super::error::{DataError, SampleSide};
use crate::tensor::Tensor;

/// 行分隔符
pub const ROW_SEPARATOR: char = ';';

/// 一对训练样本：输入张量与期望输出张量
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSample {
    pub input: Tensor,
    pub output: Tensor,
}

impl TrainingSample {
    pub fn new(input: Tensor, output: Tensor) -> Self {
        Self { input, output }
    }
}

/// 把一段数值文本解析为张量。
///
/// - 以`;`分行，每行以空白或`,`分隔各个数值（连续的分隔符视为一个）；
/// - 只有一行时得到形状为`[宽度]`的向量，多行时得到形状为`[行数, 宽度]`的矩阵；
/// - 空文本、空行、非数值（包括`NaN`和无穷大）以及各行宽度不一致都会报错。
///
/// # 示例
/// ```
/// use layer_canvas::data::parse_sample;
///
/// let tensor = parse_sample("1 2 3; 4,5,6").unwrap();
/// assert_eq!(tensor.shape(), &[2, 3]);
/// ```
pub fn parse_sample(text: &str) -> Result<Tensor, DataError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DataError::malformed("文本为空"));
    }

    let mut rows: Vec<Vec<f32>> = Vec::new();
    for (row_index, row) in text.split(ROW_SEPARATOR).enumerate() {
        let fields = parse_row(row)?;
        if fields.is_empty() {
            return Err(DataError::malformed(format!("第{}行为空", row_index + 1)));
        }
        if let Some(first) = rows.first() {
            if first.len() != fields.len() {
                return Err(DataError::malformed(format!(
                    "第{}行有{}个数值，与第1行的{}个不一致",
                    row_index + 1,
                    fields.len(),
                    first.len()
                )));
            }
        }
        rows.push(fields);
    }

    let width = rows.first().map_or(0, Vec::len);
    let shape = if rows.len() == 1 {
        vec![width]
    } else {
        vec![rows.len(), width]
    };
    let data: Vec<f32> = rows.into_iter().flatten().collect();
    Tensor::new(&data, &shape).map_err(|e| DataError::malformed(e.to_string()))
}

fn parse_row(row: &str) -> Result<Vec<f32>, DataError> {
    row.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|field| !field.is_empty())
        .map(parse_field)
        .collect()
}

fn parse_field(field: &str) -> Result<f32, DataError> {
    match field.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DataError::malformed(format!("“{field}”不是有效数值"))),
    }
}

/// 解析并校验一批样本：以第一个样本的形状为基准，逐个比对后续样本。
///
/// 遇到第一个不一致的样本即返回`DataError::ShapeMismatch`（序号从 1 开始），
/// 只有全部样本一致时才返回解析结果。
pub fn validate_all_samples<S: AsRef<str>>(samples: &[S]) -> Result<Vec<Tensor>, DataError> {
    let (first, rest) = samples.split_first().ok_or(DataError::EmptyBatch)?;
    let baseline = parse_sample(first.as_ref()).map_err(|e| e.at_index(1))?;
    let expected = baseline.shape().to_vec();

    let mut tensors = Vec::with_capacity(samples.len());
    tensors.push(baseline);
    for (offset, sample) in rest.iter().enumerate() {
        let index = offset + 2;
        let tensor = parse_sample(sample.as_ref()).map_err(|e| e.at_index(index))?;
        if tensor.shape() != expected.as_slice() {
            return Err(DataError::ShapeMismatch {
                index,
                expected,
                got: tensor.shape().to_vec(),
            });
        }
        tensors.push(tensor);
    }

    debug!("{}个样本形状一致: {:?}", tensors.len(), expected);
    Ok(tensors)
}

/// 由输入、输出两段多行文本构造训练批次（每行一个样本）。
///
/// `expected_count`为用户声明的样本数，提供时两侧行数都必须与之相等；
/// 未提供时输出行数须与输入行数相等。
pub fn build_training_batch(
    inputs_text: &str,
    outputs_text: &str,
    expected_count: Option<usize>,
) -> Result<Vec<TrainingSample>, DataError> {
    let input_lines: Vec<&str> = inputs_text.trim().lines().collect();
    let output_lines: Vec<&str> = outputs_text.trim().lines().collect();

    let expected = expected_count.unwrap_or(input_lines.len());
    if input_lines.len() != expected {
        return Err(DataError::CountMismatch {
            side: SampleSide::Input,
            expected,
            got: input_lines.len(),
        });
    }
    if output_lines.len() != expected {
        return Err(DataError::CountMismatch {
            side: SampleSide::Output,
            expected,
            got: output_lines.len(),
        });
    }

    let inputs = validate_all_samples(&input_lines)?;
    let outputs = validate_all_samples(&output_lines)?;
    Ok(inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| TrainingSample::new(input, output))
        .collect())
}
