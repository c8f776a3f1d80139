use std::any::Any;
use std::sync::Arc;

use super::ArgValue;

/// Extracts a typed field from a converted argument.
///
/// On mismatch the original value is handed back so the caller can report it.
pub trait FromArg: Sized {
    fn from_arg(val: ArgValue) -> Result<Self, ArgValue>;
}

impl FromArg for ArgValue {
    fn from_arg(val: ArgValue) -> Result<Self, ArgValue> {
        Ok(val)
    }
}

impl FromArg for bool {
    fn from_arg(val: ArgValue) -> Result<Self, ArgValue> {
        match val {
            ArgValue::Bool(b) => Ok(b),
            // A flag counter bound to a plain bool.
            ArgValue::Int(n) => Ok(n > 0),
            ArgValue::UInt(n) => Ok(n > 0),
            val => Err(val),
        }
    }
}

impl FromArg for char {
    fn from_arg(val: ArgValue) -> Result<Self, ArgValue> {
        match val {
            ArgValue::Char(c) => Ok(c),
            val => Err(val),
        }
    }
}

impl FromArg for String {
    fn from_arg(val: ArgValue) -> Result<Self, ArgValue> {
        match val {
            ArgValue::Str(s) | ArgValue::Enum(s) => Ok(s),
            val => Err(val),
        }
    }
}

impl FromArg for f64 {
    fn from_arg(val: ArgValue) -> Result<Self, ArgValue> {
        match val {
            ArgValue::Float(x) => Ok(x),
            val => Err(val),
        }
    }
}

impl FromArg for f32 {
    fn from_arg(val: ArgValue) -> Result<Self, ArgValue> {
        match val {
            ArgValue::Float(x) => Ok(x as f32),
            val => Err(val),
        }
    }
}

impl<T: FromArg> FromArg for Option<T> {
    fn from_arg(val: ArgValue) -> Result<Self, ArgValue> {
        match val {
            ArgValue::Null => Ok(None),
            val => T::from_arg(val).map(Some),
        }
    }
}

impl<T: FromArg> FromArg for Vec<T> {
    fn from_arg(val: ArgValue) -> Result<Self, ArgValue> {
        match val {
            ArgValue::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                let mut items = items.into_iter();
                while let Some(item) = items.next() {
                    match T::from_arg(item) {
                        Ok(item) => out.push(item),
                        Err(_) => return Err(ArgValue::List(items.collect())),
                    }
                }
                Ok(out)
            }
            val => Err(val),
        }
    }
}

macro_rules! int_arg {
    ($($int: ty),*) => {
        $(
            impl $crate::FromArg for $int {
                fn from_arg(val: ArgValue) -> Result<Self, ArgValue> {
                    match val {
                        ArgValue::Int(n) => <$int>::try_from(n).map_err(|_| val),
                        ArgValue::UInt(n) => <$int>::try_from(n).map_err(|_| val),
                        val => Err(val),
                    }
                }
            }
        )*
    }
}

int_arg!(usize, u8, u16, u32, u64, isize, i8, i16, i32, i64);

/// Wrapper for fields converted by a custom kind, see [`Kind::parsed`](crate::Kind::parsed).
#[derive(Clone, Debug, PartialEq)]
pub struct Custom<T>(pub T);

impl<T: Any + Clone + Send + Sync> FromArg for Custom<T> {
    fn from_arg(val: ArgValue) -> Result<Self, ArgValue> {
        match val {
            ArgValue::Custom(any) => match Arc::clone(&any).downcast::<T>() {
                Ok(t) => Ok(Custom((*t).clone())),
                Err(_) => Err(ArgValue::Custom(any)),
            },
            val => Err(val),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ints_checked() {
        assert_eq!(u8::from_arg(ArgValue::Int(255)).unwrap(), 255);
        assert!(u8::from_arg(ArgValue::Int(256)).is_err());
        assert!(u32::from_arg(ArgValue::Int(-1)).is_err());
        assert_eq!(i32::from_arg(ArgValue::UInt(7)).unwrap(), 7);
    }
    #[test]
    fn optional() {
        assert_eq!(Option::<String>::from_arg(ArgValue::Null).unwrap(), None);
        assert_eq!(
            Option::<String>::from_arg("a".into()).unwrap(),
            Some("a".to_string())
        );
    }
    #[test]
    fn custom() {
        let val = ArgValue::custom(5u8);
        assert_eq!(Custom::<u8>::from_arg(val.clone()).unwrap(), Custom(5));
        assert!(Custom::<String>::from_arg(val).is_err());
    }
    #[test]
    fn lists() {
        assert_eq!(
            Vec::<i32>::from_arg(vec![1, 2, 3].into()).unwrap(),
            vec![1, 2, 3]
        );
        assert!(Vec::<i32>::from_arg(vec!["x"].into()).is_err());
    }
}
