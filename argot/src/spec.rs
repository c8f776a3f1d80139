use std::any::Any;
use std::collections::HashSet;
use std::error::Error as StdError;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use super::{ArgRef, ArgValue, ConfigError};

/// How many raw values a specification binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetShape {
    Switch,
    Scalar,
    Sequence,
}

type ParseFn = dyn Fn(&str) -> Result<ArgValue, Box<dyn StdError + Send + Sync>> + Send + Sync;

/// A conversion backed by a user function, for types the converter doesn't know about.
#[derive(Clone)]
pub struct CustomKind {
    name: &'static str,
    parse: Arc<ParseFn>,
}

impl CustomKind {
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn parse(&self, text: &str) -> Result<ArgValue, Box<dyn StdError + Send + Sync>> {
        (self.parse)(text)
    }
}

impl std::fmt::Debug for CustomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Custom({})", self.name)
    }
}

/// The type a raw string is converted into.
#[derive(Clone, Debug)]
pub enum Kind {
    Bool,
    Char,
    String,
    I8,
    I16,
    I32,
    I64,
    ISize,
    U8,
    U16,
    U32,
    U64,
    USize,
    F32,
    F64,
    /// Legal variant names.
    Enum(Vec<String>),
    Optional(Box<Kind>),
    Sequence(Box<Kind>),
    Custom(CustomKind),
}

impl Kind {
    pub fn optional(inner: Kind) -> Self {
        Kind::Optional(Box::new(inner))
    }
    pub fn sequence(inner: Kind) -> Self {
        Kind::Sequence(Box::new(inner))
    }
    pub fn enumeration<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Kind::Enum(names.into_iter().map(Into::into).collect())
    }

    /// Converts through `FromStr`; values come back as [`ArgValue::Custom`].
    pub fn parsed<T>() -> Self
    where
        T: FromStr + Any + Send + Sync,
        <T as FromStr>::Err: StdError + Send + Sync + 'static,
    {
        Self::custom(std::any::type_name::<T>(), |s| {
            T::from_str(s)
                .map(ArgValue::custom)
                .map_err(|e| Box::new(e) as Box<dyn StdError + Send + Sync>)
        })
    }

    pub fn custom<F>(name: &'static str, parse: F) -> Self
    where
        F: Fn(&str) -> Result<ArgValue, Box<dyn StdError + Send + Sync>> + Send + Sync + 'static,
    {
        Kind::Custom(CustomKind {
            name,
            parse: Arc::new(parse),
        })
    }

    pub fn target_shape(&self) -> TargetShape {
        match self {
            Kind::Bool => TargetShape::Switch,
            Kind::Sequence(_) => TargetShape::Sequence,
            _ => TargetShape::Scalar,
        }
    }

    pub fn is_integer(&self) -> bool {
        self.int_range().is_some()
    }
    pub fn is_unsigned(&self) -> bool {
        matches!(self, Kind::U8 | Kind::U16 | Kind::U32 | Kind::U64 | Kind::USize)
    }

    pub(crate) fn int_range(&self) -> Option<(i128, i128)> {
        let range = match self {
            Kind::I8 => (i8::MIN as i128, i8::MAX as i128),
            Kind::I16 => (i16::MIN as i128, i16::MAX as i128),
            Kind::I32 => (i32::MIN as i128, i32::MAX as i128),
            Kind::I64 => (i64::MIN as i128, i64::MAX as i128),
            Kind::ISize => (isize::MIN as i128, isize::MAX as i128),
            Kind::U8 => (0, u8::MAX as i128),
            Kind::U16 => (0, u16::MAX as i128),
            Kind::U32 => (0, u32::MAX as i128),
            Kind::U64 => (0, u64::MAX as i128),
            Kind::USize => (0, usize::MAX as i128),
            _ => return None,
        };
        Some(range)
    }

    pub fn enum_names(&self) -> &[String] {
        match self {
            Kind::Enum(names) => names,
            Kind::Optional(inner) | Kind::Sequence(inner) => inner.enum_names(),
            _ => &[],
        }
    }

    /// Element kind of a sequence.
    pub fn element(&self) -> Option<&Kind> {
        match self {
            Kind::Sequence(inner) => Some(inner),
            _ => None,
        }
    }

    /// The value a field of this kind holds when nothing was supplied.
    pub fn zero(&self) -> ArgValue {
        match self {
            Kind::Bool => ArgValue::Bool(false),
            Kind::Char => ArgValue::Char('\0'),
            Kind::String => ArgValue::Str(String::new()),
            Kind::F32 | Kind::F64 => ArgValue::Float(0.0),
            Kind::Enum(names) => names
                .first()
                .map_or(ArgValue::Null, |n| ArgValue::Enum(n.clone())),
            Kind::Sequence(_) => ArgValue::List(Vec::new()),
            Kind::Optional(_) | Kind::Custom(_) => ArgValue::Null,
            int if int.is_unsigned() => ArgValue::UInt(0),
            _ => ArgValue::Int(0),
        }
    }

    /// Checks that `val` fits this kind, normalizing it where there's an obvious mapping.
    pub(crate) fn coerce(&self, val: ArgValue) -> Option<ArgValue> {
        match (self, val) {
            (Kind::Optional(_), ArgValue::Null) => Some(ArgValue::Null),
            (Kind::Optional(inner), val) => inner.coerce(val),
            (Kind::Sequence(inner), ArgValue::List(items)) => items
                .into_iter()
                .map(|item| inner.coerce(item))
                .collect::<Option<Vec<_>>>()
                .map(ArgValue::List),
            (Kind::Bool, val @ ArgValue::Bool(_)) => Some(val),
            (Kind::Char, val @ ArgValue::Char(_)) => Some(val),
            (Kind::String, val @ ArgValue::Str(_)) => Some(val),
            (Kind::F32 | Kind::F64, val @ ArgValue::Float(_)) => Some(val),
            (Kind::F32 | Kind::F64, ArgValue::Int(n)) => Some(ArgValue::Float(n as f64)),
            (Kind::F32 | Kind::F64, ArgValue::UInt(n)) => Some(ArgValue::Float(n as f64)),
            (Kind::Enum(names), ArgValue::Enum(name) | ArgValue::Str(name)) => {
                names.contains(&name).then(|| ArgValue::Enum(name))
            }
            (Kind::Custom(custom), ArgValue::Str(text)) => custom.parse(&text).ok(),
            (Kind::Custom(_), val @ ArgValue::Custom(_)) => Some(val),
            (int, ArgValue::Int(n)) => {
                let (lo, hi) = int.int_range()?;
                let n = n as i128;
                (lo..=hi).contains(&n).then(|| int.int_value(n))
            }
            (int, ArgValue::UInt(n)) => {
                let (lo, hi) = int.int_range()?;
                let n = n as i128;
                (lo..=hi).contains(&n).then(|| int.int_value(n))
            }
            _ => None,
        }
    }

    // Caller checks the range first.
    pub(crate) fn int_value(&self, n: i128) -> ArgValue {
        if self.is_unsigned() {
            ArgValue::UInt(n as u64)
        } else {
            ArgValue::Int(n as i64)
        }
    }
}

/// Attributes shared by options and positional values.
#[derive(Clone, Debug)]
pub struct Common {
    pub key: String,
    pub required: bool,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub default: Option<ArgValue>,
    pub help: String,
    pub meta_value: String,
    pub kind: Kind,
    pub hidden: bool,
}

impl Common {
    fn new(key: String, kind: Kind) -> Self {
        Self {
            key,
            required: false,
            min: None,
            max: None,
            default: None,
            help: String::new(),
            meta_value: String::new(),
            kind,
            hidden: false,
        }
    }
}

macro_rules! common_builders {
    ($spec: ty) => {
        impl $spec {
            pub fn required(mut self) -> Self {
                self.common.required = true;
                self
            }
            pub fn min(mut self, min: usize) -> Self {
                self.common.min = Some(min);
                self
            }
            pub fn max(mut self, max: usize) -> Self {
                self.common.max = Some(max);
                self
            }
            pub fn default_value(mut self, val: impl Into<ArgValue>) -> Self {
                self.common.default = Some(val.into());
                self
            }
            pub fn help(mut self, help: impl Into<String>) -> Self {
                self.common.help = help.into();
                self
            }
            pub fn meta_value(mut self, meta: impl Into<String>) -> Self {
                self.common.meta_value = meta.into();
                self
            }
            pub fn hidden(mut self) -> Self {
                self.common.hidden = true;
                self
            }
        }
    };
}

#[derive(Clone, Debug)]
pub struct OptionSpec {
    pub common: Common,
    pub short: Option<char>,
    pub long: Vec<String>,
    pub separator: Option<char>,
    /// Mutually exclusive set.
    pub set_name: Option<String>,
    /// At least one option of a group must be supplied.
    pub group: Option<String>,
    pub flag_counter: bool,
}

impl OptionSpec {
    pub fn new(key: impl Into<String>, kind: Kind) -> Self {
        Self {
            common: Common::new(key.into(), kind),
            short: None,
            long: Vec::new(),
            separator: None,
            set_name: None,
            group: None,
            flag_counter: false,
        }
    }
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long.push(long.into());
        self
    }
    /// `'\0'` means no separator.
    pub fn separator(mut self, sep: char) -> Self {
        self.separator = Some(sep).filter(|&c| c != '\0');
        self
    }
    pub fn set(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = Some(set_name.into());
        self
    }
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
    pub fn flag_counter(mut self) -> Self {
        self.flag_counter = true;
        self
    }

    pub fn target_shape(&self) -> TargetShape {
        if self.flag_counter && self.common.kind.is_integer() {
            TargetShape::Switch
        } else {
            self.common.kind.target_shape()
        }
    }

    pub fn matches(&self, name: &str, case_sensitive: bool) -> bool {
        let eq = |a: &str| names_equal(a, name, case_sensitive);
        let mut buf = [0; 4];
        self.short.map_or(false, |s| eq(s.encode_utf8(&mut buf))) || self.long.iter().any(|l| eq(l))
    }

    pub fn arg_ref(&self) -> ArgRef {
        ArgRef::Named {
            short: self.short,
            long: self.long.first().cloned(),
        }
    }
}
common_builders!(OptionSpec);

#[derive(Clone, Debug)]
pub struct ValueSpec {
    pub common: Common,
    pub index: usize,
    pub meta_name: String,
}

impl ValueSpec {
    pub fn new(key: impl Into<String>, index: usize, kind: Kind) -> Self {
        Self {
            common: Common::new(key.into(), kind),
            index,
            meta_name: String::new(),
        }
    }
    pub fn meta_name(mut self, meta: impl Into<String>) -> Self {
        self.meta_name = meta.into();
        self
    }

    /// A positional `bool` takes a literal rather than acting as a switch.
    pub fn target_shape(&self) -> TargetShape {
        match self.common.kind.target_shape() {
            TargetShape::Switch => TargetShape::Scalar,
            shape => shape,
        }
    }

    pub fn arg_ref(&self) -> ArgRef {
        ArgRef::Positional {
            index: self.index,
            meta: self.meta_name.clone(),
        }
    }
}
common_builders!(ValueSpec);

/// A declared option or positional value.
#[derive(Clone, Debug)]
pub enum Specification {
    Option(OptionSpec),
    Value(ValueSpec),
}

impl From<OptionSpec> for Specification {
    fn from(spec: OptionSpec) -> Self {
        Specification::Option(spec)
    }
}
impl From<ValueSpec> for Specification {
    fn from(spec: ValueSpec) -> Self {
        Specification::Value(spec)
    }
}

impl Specification {
    pub fn common(&self) -> &Common {
        match self {
            Specification::Option(o) => &o.common,
            Specification::Value(v) => &v.common,
        }
    }
    fn common_mut(&mut self) -> &mut Common {
        match self {
            Specification::Option(o) => &mut o.common,
            Specification::Value(v) => &mut v.common,
        }
    }
    pub fn key(&self) -> &str {
        &self.common().key
    }
    pub fn kind(&self) -> &Kind {
        &self.common().kind
    }
    pub fn target_shape(&self) -> TargetShape {
        match self {
            Specification::Option(o) => o.target_shape(),
            Specification::Value(v) => v.target_shape(),
        }
    }
    pub fn as_option(&self) -> Option<&OptionSpec> {
        match self {
            Specification::Option(o) => Some(o),
            Specification::Value(_) => None,
        }
    }
    pub fn as_value(&self) -> Option<&ValueSpec> {
        match self {
            Specification::Value(v) => Some(v),
            Specification::Option(_) => None,
        }
    }
    pub fn is_option(&self) -> bool {
        self.as_option().is_some()
    }
    pub fn arg_ref(&self) -> ArgRef {
        match self {
            Specification::Option(o) => o.arg_ref(),
            Specification::Value(v) => v.arg_ref(),
        }
    }
}

pub(crate) fn names_equal(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

fn long_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // No whitespace or `=`, and no leading dash.
    PATTERN.get_or_init(|| Regex::new(r"^[^\s=-][^\s=]+$").expect("valid pattern"))
}

/// Checks a target shape's specifications and normalizes them in place.
///
/// Options without any name get the lowercased key as their long name.
pub(crate) fn guard(schema: &str, specs: &mut [Specification]) -> Result<(), ConfigError> {
    let mut keys = HashSet::new();
    for spec in specs.iter_mut() {
        if !keys.insert(spec.key().to_lowercase()) {
            return Err(ConfigError::DuplicateKey(schema.to_string(), spec.key().to_string()));
        }
        let mut inferred = false;
        if let Specification::Option(o) = &mut *spec {
            if o.short.is_none() && o.long.is_empty() {
                o.long.push(o.common.key.to_lowercase());
                inferred = true;
            }
        }
        guard_one(spec, inferred)?;
        let common = spec.common_mut();
        if let Some(default) = common.default.take() {
            match common.kind.coerce(default.clone()) {
                Some(val) => common.default = Some(val),
                None => {
                    return Err(ConfigError::InvalidDefault {
                        key: common.key.clone(),
                        value: default,
                    })
                }
            }
        }
    }
    check_names(specs, true)?;
    check_indexes(specs)
}

fn valid_short(c: char) -> bool {
    !(c.is_whitespace() || c == '-' || c == '=' || c.is_ascii_digit())
}

/// `inferred` is set when the only long name was derived from the key.
fn guard_one(spec: &Specification, inferred: bool) -> Result<(), ConfigError> {
    let key = || spec.key().to_string();
    let common = spec.common();
    let shape = spec.target_shape();

    if let Kind::Sequence(inner) | Kind::Optional(inner) = &common.kind {
        if let Kind::Sequence(_) | Kind::Optional(_) = **inner {
            return Err(ConfigError::UnsupportedKind(key()));
        }
    }
    if shape != TargetShape::Sequence && (common.min.is_some() || common.max.is_some()) {
        return Err(ConfigError::ScalarWithRange(key()));
    }
    if let (Some(min), Some(max)) = (common.min, common.max) {
        if min > max {
            return Err(ConfigError::InvalidRange(key()));
        }
    }
    if shape == TargetShape::Sequence && common.max == Some(0) {
        return Err(ConfigError::ZeroRange(key()));
    }

    if let Specification::Option(o) = spec {
        if o.flag_counter && !common.kind.is_integer() {
            return Err(ConfigError::FlagCounterNotInteger(key()));
        }
        if o.separator.is_some() && shape != TargetShape::Sequence {
            return Err(ConfigError::SeparatorOnNonSequence(key()));
        }
        if let Some(short) = o.short {
            if !valid_short(short) {
                return Err(ConfigError::InvalidName(short.to_string()));
            }
        }
        for long in &o.long {
            let valid = if long.chars().count() == 1 {
                // A one-letter key is fine; a declared one-letter long name isn't.
                if !inferred {
                    return Err(ConfigError::OneCharLongName(long.clone()));
                }
                long.chars().all(valid_short)
            } else {
                long_name_pattern().is_match(long)
            };
            if !valid {
                return Err(ConfigError::InvalidName(long.clone()));
            }
        }
    }
    Ok(())
}

/// Every short and long name must resolve to exactly one option.
pub(crate) fn check_names(specs: &[Specification], case_sensitive: bool) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    let fold = |s: String| if case_sensitive { s } else { s.to_lowercase() };
    for o in specs.iter().filter_map(Specification::as_option) {
        let names = o.short.map(String::from).into_iter().chain(o.long.iter().cloned());
        for name in names {
            if !seen.insert(fold(name.clone())) {
                return Err(ConfigError::DuplicateName(name));
            }
        }
    }
    Ok(())
}

fn check_indexes(specs: &[Specification]) -> Result<(), ConfigError> {
    let mut indexes: Vec<usize> = specs
        .iter()
        .filter_map(Specification::as_value)
        .map(|v| v.index)
        .collect();
    indexes.sort_unstable();
    for (expected, &index) in indexes.iter().enumerate() {
        if index < expected {
            return Err(ConfigError::DuplicateIndex(index));
        }
        if index > expected {
            return Err(ConfigError::IndexGap(expected));
        }
    }
    Ok(())
}
