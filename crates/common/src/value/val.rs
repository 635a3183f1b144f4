// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{collections::HashMap, fmt::Display};

use async_graphql_value::ConstValue;
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// A number as it arrived on the wire. The representation is preserved so a
/// value that round-tripped through a generic serialization step (where every
/// integer may come back as a float) still compares equal to its original.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub enum ValNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl ValNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            ValNumber::I64(n) => *n as f64,
            ValNumber::U64(n) => *n as f64,
            ValNumber::F64(n) => *n,
        }
    }

    /// The integer form, if this number is an integer. Floats do not qualify,
    /// even when their fractional part is zero; callers that want to accept
    /// them must coerce explicitly.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ValNumber::I64(n) => Some(*n),
            ValNumber::U64(n) => i64::try_from(*n).ok(),
            ValNumber::F64(_) => None,
        }
    }
}

/// Equality across representations: `1i64`, `1u64` and `1.0f64` are all equal.
impl PartialEq for ValNumber {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ValNumber::I64(left), ValNumber::I64(right)) => left == right,
            (ValNumber::U64(left), ValNumber::U64(right)) => left == right,
            (ValNumber::I64(left), ValNumber::U64(right))
            | (ValNumber::U64(right), ValNumber::I64(left)) => {
                *left >= 0 && *left as u64 == *right
            }
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl Display for ValNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValNumber::I64(n) => write!(f, "{n}"),
            ValNumber::U64(n) => write!(f, "{n}"),
            ValNumber::F64(n) => write!(f, "{n}"),
        }
    }
}

impl TryFrom<ValNumber> for serde_json::Number {
    type Error = ();

    fn try_from(value: ValNumber) -> Result<Self, Self::Error> {
        match value {
            ValNumber::I64(n) => Ok(serde_json::Number::from(n)),
            ValNumber::U64(n) => Ok(serde_json::Number::from(n)),
            ValNumber::F64(n) => serde_json::Number::from_f64(n).ok_or(()),
        }
    }
}

impl TryFrom<serde_json::Number> for ValNumber {
    type Error = ();

    fn try_from(value: serde_json::Number) -> Result<Self, Self::Error> {
        if let Some(n) = value.as_i64() {
            Ok(ValNumber::I64(n))
        } else if let Some(n) = value.as_u64() {
            Ok(ValNumber::U64(n))
        } else if let Some(n) = value.as_f64() {
            Ok(ValNumber::F64(n))
        } else {
            Err(())
        }
    }
}

impl From<i64> for ValNumber {
    fn from(value: i64) -> Self {
        ValNumber::I64(value)
    }
}

impl From<u64> for ValNumber {
    fn from(value: u64) -> Self {
        ValNumber::U64(value)
    }
}

impl From<f64> for ValNumber {
    fn from(value: f64) -> Self {
        ValNumber::F64(value)
    }
}

/// Represent a value that can be used in:
/// - arguments
/// - return values
/// - parent objects inspected by directives
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Val {
    Bool(bool),
    Number(ValNumber),
    String(String),
    List(Vec<Val>),
    Object(HashMap<String, Val>),
    Enum(String),
    Null,
}

impl Val {
    pub fn get(&self, key: &str) -> Option<&Val> {
        match self {
            Val::Object(o) => o.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Val::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Val::Bool(b) => write!(f, "{b}"),
            Val::Number(n) => write!(f, "{n}"),
            Val::String(s) => write!(f, "\"{s}\""),
            Val::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Val::Object(o) => {
                write!(f, "{{")?;
                for (i, (k, v)) in o.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Val::Enum(e) => write!(f, "{e}"),
            Val::Null => write!(f, "null"),
        }
    }
}

impl TryInto<serde_json::Value> for Val {
    type Error = serde_json::Error;

    fn try_into(self) -> Result<serde_json::Value, Self::Error> {
        match self {
            Val::Null => Ok(serde_json::Value::Null),
            Val::Bool(b) => Ok(serde_json::Value::Bool(b)),
            Val::Number(n) => {
                Ok(serde_json::Value::Number(n.try_into().map_err(|_| {
                    serde_json::Error::custom("Invalid number")
                })?))
            }
            Val::String(s) => Ok(serde_json::Value::String(s)),
            Val::List(l) => Ok(serde_json::Value::Array(
                l.into_iter()
                    .map(|v| v.try_into())
                    .collect::<Result<_, _>>()?,
            )),
            Val::Object(o) => Ok(serde_json::Value::Object(
                o.into_iter()
                    .map(|(k, v)| Ok((k, v.try_into()?)))
                    .collect::<Result<_, _>>()?,
            )),
            Val::Enum(e) => Ok(serde_json::Value::String(e)),
        }
    }
}

impl TryFrom<ConstValue> for Val {
    type Error = serde_json::Error;

    fn try_from(value: ConstValue) -> Result<Self, Self::Error> {
        match value {
            ConstValue::Null => Ok(Val::Null),
            ConstValue::Boolean(b) => Ok(Val::Bool(b)),
            ConstValue::Number(n) => {
                Ok(Val::Number(n.try_into().map_err(|_| {
                    serde_json::Error::custom("Invalid number")
                })?))
            }
            ConstValue::String(s) => Ok(Val::String(s)),
            ConstValue::List(l) => Ok(Val::List(
                l.into_iter()
                    .map(|v| v.try_into())
                    .collect::<Result<_, _>>()?,
            )),
            ConstValue::Object(o) => Ok(Val::Object(
                o.into_iter()
                    .map(|(k, v)| Ok((k.to_string(), v.try_into()?)))
                    .collect::<Result<_, _>>()?,
            )),
            ConstValue::Enum(e) => Ok(Val::Enum(e.to_string())),
            ConstValue::Binary(_) => Err(serde_json::Error::custom("Binary is not supported")),
        }
    }
}

impl From<serde_json::Value> for Val {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Val::Null,
            serde_json::Value::Bool(b) => Val::Bool(b),
            serde_json::Value::Number(n) => match n.try_into() {
                Ok(n) => Val::Number(n),
                Err(()) => Val::Null,
            },
            serde_json::Value::String(s) => Val::String(s),
            serde_json::Value::Array(l) => Val::List(l.into_iter().map(|v| v.into()).collect()),
            serde_json::Value::Object(o) => Val::Object(
                o.into_iter()
                    .map(|(k, v)| (k, v.into()))
                    .collect::<HashMap<_, _>>(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_eq_across_representations() {
        let one_u64 = ValNumber::from(1u64);
        let one_i64 = ValNumber::from(1i64);
        let one_f64 = ValNumber::from(1.0);

        let ones = vec![one_u64, one_i64, one_f64];

        for left in &ones {
            for right in &ones {
                assert_eq!(left, right);
            }
        }
    }

    #[test]
    fn number_neq() {
        assert_ne!(ValNumber::from(1i64), ValNumber::from(2i64));
        assert_ne!(ValNumber::from(1i64), ValNumber::from(1.5));
        assert_ne!(ValNumber::from(-1i64), ValNumber::from(u64::MAX));
    }

    #[test]
    fn float_is_not_an_integer() {
        assert_eq!(ValNumber::from(10.0).as_i64(), None);
        assert_eq!(ValNumber::from(10i64).as_i64(), Some(10));
        assert_eq!(ValNumber::from(u64::MAX).as_i64(), None);
    }

    #[test]
    fn json_round_trip() {
        let value = serde_json::json!({"id": 7, "title": "Galactic", "tags": ["a", "b"], "fee": 1.5, "live": true, "venue": null});
        let val: Val = value.clone().into();

        assert_eq!(val.get("id"), Some(&Val::Number(ValNumber::I64(7))));
        let back: serde_json::Value = val.try_into().unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn const_value_conversion() {
        let cv = ConstValue::from_json(serde_json::json!({"name": "tuva"})).unwrap();
        let val: Val = cv.try_into().unwrap();
        assert_eq!(val.get("name").and_then(Val::as_str), Some("tuva"));
    }
}
