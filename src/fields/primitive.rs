use serde_json::{Number, Value};

/// A value that maps onto a single JSON scalar without coercion.
///
/// `from_wire` returns `None` when the JSON value has a different type, which
/// the generic value parsers treat like an absent field.
pub trait WirePrimitive: Sized {
    /// Read the value from its JSON form.
    fn from_wire(value: &Value) -> Option<Self>;

    /// Write the value as JSON.
    fn to_wire(&self) -> Value;
}

impl WirePrimitive for bool {
    fn from_wire(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn to_wire(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_wire_integer {
    ($($ty:ty => $getter:ident),* $(,)?) => {
        $(
            impl WirePrimitive for $ty {
                fn from_wire(value: &Value) -> Option<Self> {
                    value.$getter().and_then(|raw| <$ty>::try_from(raw).ok())
                }

                fn to_wire(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_wire_integer!(
    u8 => as_u64,
    u16 => as_u64,
    u32 => as_u64,
    u64 => as_u64,
    i32 => as_i64,
    i64 => as_i64,
);

impl WirePrimitive for f64 {
    fn from_wire(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    fn to_wire(&self) -> Value {
        Number::from_f64(*self).map_or(Value::Null, Value::Number)
    }
}

impl WirePrimitive for String {
    fn from_wire(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }

    fn to_wire(&self) -> Value {
        Value::String(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::WirePrimitive;
    use serde_json::{json, Value};

    #[test]
    fn integers_reject_other_types() {
        assert_eq!(u8::from_wire(&json!(12)), Some(12));
        assert_eq!(u8::from_wire(&json!(256)), None);
        assert_eq!(u8::from_wire(&json!("12")), None);
        assert_eq!(i64::from_wire(&json!(-5)), Some(-5));
    }

    #[test]
    fn floats() {
        assert_eq!(f64::from_wire(&json!(1)), Some(1.0));
        assert_eq!(f64::NAN.to_wire(), Value::Null);
        assert_eq!(1.5f64.to_wire(), json!(1.5));
    }

    #[test]
    fn strings_and_bools() {
        assert_eq!(String::from_wire(&json!("a")), Some("a".to_owned()));
        assert_eq!(bool::from_wire(&json!(1)), None);
        assert_eq!(true.to_wire(), json!(true));
    }
}
