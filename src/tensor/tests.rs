use serde_json::{Value, json};

use super::Tensor;
use crate::assert_err;
use crate::errors::TensorError;

#[test]
fn test_new_tensor_shape() {
    let vector = Tensor::new(&[1.0, 2.0, 3.0], &[3]).unwrap();
    assert_eq!(vector.shape(), &[3]);
    assert_eq!(vector.dimension(), 1);

    let matrix = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    assert_eq!(matrix.shape(), &[2, 3]);
    assert_eq!(matrix.size(), 6);
    assert_eq!(matrix.get_flat(4), Some(5.0));

    assert_err!(
        Tensor::new(&[1.0, 2.0, 3.0], &[2, 2]),
        TensorError::IncompatibleShape { len: 3, .. }
    );
}

#[test]
fn test_serialize_as_nested_literal() {
    let vector = Tensor::new(&[1.0, 2.5], &[2]).unwrap();
    assert_eq!(
        serde_json::to_value(&vector).unwrap(),
        json!({"data": [1.0, 2.5], "shape": [2]})
    );

    let matrix = Tensor::new(&[1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    assert_eq!(
        serde_json::to_value(&matrix).unwrap(),
        json!({"data": [[1.0, 2.0], [3.0, 4.0]], "shape": [2, 2]})
    );
}

#[test]
fn test_from_nested() {
    let tensor = Tensor::from_nested(&json!([[0.5, 1.0, 1.5], [2.0, 2.5, 3.0]])).unwrap();
    assert_eq!(tensor.shape(), &[2, 3]);
    assert_eq!(tensor.to_vec(), vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);

    let scalar = Tensor::from_nested(&json!(0.25)).unwrap();
    assert_eq!(scalar.dimension(), 0);
    assert_eq!(scalar.get_flat(0), Some(0.25));

    assert_err!(
        Tensor::from_nested(&json!([[1.0, 2.0], [3.0]])),
        TensorError::InconsitentShape
    );
    assert_err!(
        Tensor::from_nested(&json!([1.0, "x"])),
        TensorError::NotNumeric
    );
}

#[test]
fn test_from_nested_deep_ragged_array() {
    // 每层只有首元素继续嵌套，按首元素推测的形状为 20 个 10 相乘
    let mut value = Value::Array(vec![json!(0.0); 10]);
    for _ in 0..19 {
        let mut items = vec![json!(0.0); 10];
        items[0] = value;
        value = Value::Array(items);
    }
    assert_err!(Tensor::from_nested(&value), TensorError::InconsitentShape);
}
