use std::any::Any;
use std::sync::Arc;

/// A converted argument, before it is handed to a setter or constructor.
#[derive(Clone)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    /// The declared name of an enum variant.
    Enum(String),
    List(Vec<ArgValue>),
    Custom(Arc<dyn Any + Send + Sync>),
}

impl ArgValue {
    pub fn custom<T: Any + Send + Sync>(val: T) -> Self {
        ArgValue::Custom(Arc::new(val))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }

    /// Number of items if this is a list.
    pub fn len(&self) -> Option<usize> {
        match self {
            ArgValue::List(items) => Some(items.len()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ArgValue::Null => "null",
            ArgValue::Bool(_) => "bool",
            ArgValue::Int(_) => "signed integer",
            ArgValue::UInt(_) => "unsigned integer",
            ArgValue::Float(_) => "float",
            ArgValue::Char(_) => "char",
            ArgValue::Str(_) => "string",
            ArgValue::Enum(_) => "enum",
            ArgValue::List(_) => "list",
            ArgValue::Custom(_) => "custom",
        }
    }
}

impl std::fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgValue::Null => f.write_str("Null"),
            ArgValue::Bool(b) => write!(f, "Bool({})", b),
            ArgValue::Int(i) => write!(f, "Int({})", i),
            ArgValue::UInt(u) => write!(f, "UInt({})", u),
            ArgValue::Float(x) => write!(f, "Float({})", x),
            ArgValue::Char(c) => write!(f, "Char({:?})", c),
            ArgValue::Str(s) => write!(f, "Str({:?})", s),
            ArgValue::Enum(s) => write!(f, "Enum({})", s),
            ArgValue::List(items) => f.debug_list().entries(items).finish(),
            ArgValue::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for ArgValue {
    fn eq(&self, other: &Self) -> bool {
        use ArgValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (UInt(a), UInt(b)) => a == b,
            (Int(a), UInt(b)) | (UInt(b), Int(a)) => u64::try_from(*a).map_or(false, |a| a == *b),
            (Float(a), Float(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (Str(a), Str(b)) | (Enum(a), Enum(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Custom(a), Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for ArgValue {
    fn from(val: bool) -> Self {
        ArgValue::Bool(val)
    }
}
impl From<char> for ArgValue {
    fn from(val: char) -> Self {
        ArgValue::Char(val)
    }
}
impl From<&str> for ArgValue {
    fn from(val: &str) -> Self {
        ArgValue::Str(val.to_string())
    }
}
impl From<String> for ArgValue {
    fn from(val: String) -> Self {
        ArgValue::Str(val)
    }
}
impl From<f32> for ArgValue {
    fn from(val: f32) -> Self {
        ArgValue::Float(val.into())
    }
}
impl From<f64> for ArgValue {
    fn from(val: f64) -> Self {
        ArgValue::Float(val)
    }
}
impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(val: Vec<T>) -> Self {
        ArgValue::List(val.into_iter().map(Into::into).collect())
    }
}
impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(val: Option<T>) -> Self {
        val.map_or(ArgValue::Null, Into::into)
    }
}

macro_rules! int_value {
    ($variant: ident, $wide: ty, $($int: ty),*) => {
        $(
            impl From<$int> for ArgValue {
                fn from(val: $int) -> Self {
                    ArgValue::$variant(val as $wide)
                }
            }
        )*
    }
}

int_value!(Int, i64, i8, i16, i32, i64, isize);
int_value!(UInt, u64, u8, u16, u32, u64, usize);
