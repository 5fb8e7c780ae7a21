//! Array evaluation of parsed expressions.
//!
//! Referenced variables are broadcast against the largest referenced array:
//! a rank-1 variable whose length matches the reference's second-to-last
//! dimension is treated as a vertical profile and tiled across the trailing
//! axis; scalars broadcast everywhere; anything else must already match the
//! reference shape.
use std::f64::consts::PI;

use indexmap::IndexMap;
use ndarray::{ArrayD, IxDyn, Zip};

use crate::error::{Error, Result};
use crate::expr::parser::{parse, BinaryOp, Expr, UnaryOp};

const FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "exp", "log", "log10",
    "sqrt", "abs", "floor", "ceil",
];

/// Evaluate `expression` over the named input arrays.
pub fn evaluate(expression: &str, inputs: &IndexMap<String, ArrayD<f64>>) -> Result<ArrayD<f64>> {
    let ast = parse(expression)?;

    let mut referenced: Vec<&str> = Vec::new();
    for ident in ast.identifiers() {
        if inputs.contains_key(ident) {
            referenced.push(ident);
        } else if ident != "pi" {
            return Err(Error::Expression(format!(
                "expression `{expression}` references unknown variable `{ident}`"
            )));
        }
    }

    // The largest referenced array supplies the result shape.
    let reference_shape: Vec<usize> = referenced
        .iter()
        .map(|name| &inputs[*name])
        .max_by_key(|a| a.len())
        .map(|a| a.shape().to_vec())
        .unwrap_or_default();

    let mut env: IndexMap<&str, ArrayD<f64>> = IndexMap::new();
    for name in &referenced {
        let arr = &inputs[*name];
        env.insert(name, broadcast_to_reference(name, arr, &reference_shape)?);
    }

    match eval(&ast, &env)? {
        Value::Array(a) => Ok(a),
        Value::Scalar(v) => Ok(ArrayD::from_elem(IxDyn(&reference_shape), v)),
    }
}

fn broadcast_to_reference(
    name: &str,
    arr: &ArrayD<f64>,
    reference: &[usize],
) -> Result<ArrayD<f64>> {
    if arr.shape() == reference {
        return Ok(arr.clone());
    }
    if arr.len() == 1 {
        let v = *arr.iter().next().unwrap_or(&f64::NAN);
        return Ok(ArrayD::from_elem(IxDyn(reference), v));
    }
    // Vertical profile: a 1-D array aligned on the second-to-last axis of
    // the reference, tiled across the trailing axis.
    if arr.ndim() == 1 && reference.len() >= 2 && arr.len() == reference[reference.len() - 2] {
        let column = arr
            .clone()
            .into_shape(IxDyn(&[arr.len(), 1]))
            .map_err(|e| Error::Expression(e.to_string()))?;
        let tiled = column
            .broadcast(IxDyn(reference))
            .ok_or_else(|| {
                Error::Expression(format!(
                    "cannot broadcast `{name}` {:?} to {:?}",
                    arr.shape(),
                    reference
                ))
            })?
            .to_owned();
        return Ok(tiled);
    }
    Err(Error::Expression(format!(
        "variable `{name}` with shape {:?} does not match reference shape {:?}",
        arr.shape(),
        reference
    )))
}

enum Value {
    Scalar(f64),
    Array(ArrayD<f64>),
}

fn eval(expr: &Expr, env: &IndexMap<&str, ArrayD<f64>>) -> Result<Value> {
    match expr {
        Expr::Number(v) => Ok(Value::Scalar(*v)),
        Expr::Ident(name) => {
            if let Some(arr) = env.get(name.as_str()) {
                Ok(Value::Array(arr.clone()))
            } else if name == "pi" {
                Ok(Value::Scalar(PI))
            } else {
                Err(Error::Expression(format!("unknown identifier `{name}`")))
            }
        }
        Expr::Unary(op, inner) => {
            let inner = eval(inner, env)?;
            let f = match op {
                UnaryOp::Neg => |v: f64| -v,
                UnaryOp::Not => |v: f64| {
                    if v == 0.0 {
                        1.0
                    } else {
                        0.0
                    }
                },
            };
            Ok(map_value(inner, f))
        }
        Expr::Binary(op, lhs, rhs) => {
            let lhs = eval(lhs, env)?;
            let rhs = eval(rhs, env)?;
            apply_binary(*op, lhs, rhs)
        }
        Expr::Call(name, args) => {
            if !FUNCTIONS.contains(&name.as_str()) {
                return Err(Error::Expression(format!("unknown function `{name}`")));
            }
            if args.len() != 1 {
                return Err(Error::Expression(format!(
                    "function `{name}` takes one argument, got {}",
                    args.len()
                )));
            }
            let arg = eval(&args[0], env)?;
            let f = function_impl(name);
            Ok(map_value(arg, f))
        }
    }
}

fn function_impl(name: &str) -> fn(f64) -> f64 {
    match name {
        "sin" => f64::sin,
        "cos" => f64::cos,
        "tan" => f64::tan,
        "asin" => f64::asin,
        "acos" => f64::acos,
        "atan" => f64::atan,
        "sinh" => f64::sinh,
        "cosh" => f64::cosh,
        "tanh" => f64::tanh,
        "exp" => f64::exp,
        "log" => f64::ln,
        "log10" => f64::log10,
        "sqrt" => f64::sqrt,
        "abs" => f64::abs,
        "floor" => f64::floor,
        "ceil" => f64::ceil,
        _ => unreachable!("function names are checked before dispatch"),
    }
}

fn map_value(value: Value, f: fn(f64) -> f64) -> Value {
    match value {
        Value::Scalar(v) => Value::Scalar(f(v)),
        Value::Array(a) => Value::Array(a.mapv(f)),
    }
}

fn binary_impl(op: BinaryOp) -> fn(f64, f64) -> f64 {
    match op {
        BinaryOp::Add => |a, b| a + b,
        BinaryOp::Sub => |a, b| a - b,
        BinaryOp::Mul => |a, b| a * b,
        BinaryOp::Div => |a, b| a / b,
        BinaryOp::Pow => f64::powf,
        BinaryOp::Lt => |a, b| (a < b) as u8 as f64,
        BinaryOp::Le => |a, b| (a <= b) as u8 as f64,
        BinaryOp::Gt => |a, b| (a > b) as u8 as f64,
        BinaryOp::Ge => |a, b| (a >= b) as u8 as f64,
        BinaryOp::Eq => |a, b| (a == b) as u8 as f64,
        BinaryOp::Ne => |a, b| (a != b) as u8 as f64,
        BinaryOp::And => |a, b| (a != 0.0 && b != 0.0) as u8 as f64,
        BinaryOp::Or => |a, b| (a != 0.0 || b != 0.0) as u8 as f64,
    }
}

fn apply_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    let f = binary_impl(op);
    let value = match (lhs, rhs) {
        (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(f(a, b)),
        (Value::Array(a), Value::Scalar(b)) => Value::Array(a.mapv(|v| f(v, b))),
        (Value::Scalar(a), Value::Array(b)) => Value::Array(b.mapv(|v| f(a, v))),
        (Value::Array(a), Value::Array(b)) => {
            if a.shape() != b.shape() {
                return Err(Error::Expression(format!(
                    "shape mismatch in expression: {:?} vs {:?}",
                    a.shape(),
                    b.shape()
                )));
            }
            Value::Array(Zip::from(&a).and(&b).map_collect(|&x, &y| f(x, y)))
        }
    };
    Ok(value)
}
