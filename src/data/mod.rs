//! 训练数据模块
//!
//! 把用户输入的数值文本解析为张量字面量，并组装成训练批次。
//!
//! # 主要组件
//!
//! - [`parse_sample`]: 单个样本文本 → 张量
//! - [`validate_all_samples`]: 一批样本的解析与形状一致性校验
//! - [`build_training_batch`]: 输入/输出两段文本 → 训练样本对
//! - [`DataError`]: 样本解析错误类型
//!
//! # 使用示例
//!
//! ```
//! use layer_canvas::data::build_training_batch;
//!
//! let batch = build_training_batch("1 2 3\n4 5 6", "1\n0", Some(2)).unwrap();
//! assert_eq!(batch.len(), 2);
//! assert_eq!(batch[0].input.shape(), &[3]);
//! ```

pub mod error;
mod sample;


// Re-exports
pub use error::{DataError, SampleSide};
pub use sample::{
    ROW_SEPARATOR, TrainingSample, build_training_batch, parse_sample, validate_all_samples,
};
