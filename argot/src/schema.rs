//! Static binding tables between specifications and target types.

use std::borrow::Cow;
use std::fmt::Display;

use super::spec::{self, OptionSpec, Specification, ValueSpec};
use super::{overrides, ArgValue, ConfigError, Error, FromArg};

enum SetError {
    Config(ConfigError),
    Rejected(String),
}

type Setter<T> = Box<dyn Fn(&mut T, ArgValue) -> Result<(), SetError>>;
type Constructor<T> = Box<dyn Fn(&mut Arguments) -> Result<T, ConfigError>>;

enum Binding<T> {
    /// Built with a factory, then assigned one setter per specification.
    Mutable {
        factory: Box<dyn Fn() -> T>,
        setters: Vec<Setter<T>>,
    },
    /// Built in one call from every resolved value.
    Immutable { ctor: Constructor<T> },
}

/// The specifications of one target type and how to build it from them.
pub struct Schema<T> {
    name: String,
    specs: Vec<Specification>,
    binding: Binding<T>,
}

fn extract<V: FromArg>(name: &str, val: ArgValue) -> Result<V, ConfigError> {
    let found = val.type_name();
    V::from_arg(val).map_err(|_| ConfigError::ArgumentType {
        name: name.to_string(),
        expected: std::any::type_name::<V>(),
        found,
    })
}

impl<T: 'static> Schema<T> {
    /// A target assigned field by field after `factory` creates it.
    pub fn mutable(name: impl Into<String>, factory: impl Fn() -> T + 'static) -> MutableBuilder<T> {
        MutableBuilder {
            name: name.into(),
            factory: Box::new(factory),
            specs: Vec::new(),
            setters: Vec::new(),
        }
    }

    /// A target built in one call.
    ///
    /// `params` must name every specification key (ignoring case) exactly once;
    /// `ctor` reads them back with [`Arguments::take`].
    pub fn immutable<S: AsRef<str>>(
        name: impl Into<String>,
        params: &[S],
        ctor: impl Fn(&mut Arguments) -> Result<T, ConfigError> + 'static,
    ) -> ImmutableBuilder<T> {
        ImmutableBuilder {
            name: name.into(),
            params: params.iter().map(|p| p.as_ref().to_string()).collect(),
            ctor: Box::new(ctor),
            specs: Vec::new(),
        }
    }
}

impl<T> Schema<T> {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn specs(&self) -> &[Specification] {
        &self.specs
    }
    pub fn is_mutable(&self) -> bool {
        matches!(self.binding, Binding::Mutable { .. })
    }

    /// The specifications with any thread-local overrides applied.
    pub(crate) fn effective_specs(&self) -> Result<Cow<'_, [Specification]>, ConfigError> {
        Ok(match overrides::apply(&self.name, &self.specs)? {
            Some(specs) => Cow::Owned(specs),
            None => Cow::Borrowed(&self.specs),
        })
    }

    /// A best-effort instance for failed results.
    pub(crate) fn make_default(&self, specs: &[Specification]) -> Option<T> {
        match &self.binding {
            Binding::Mutable { factory, .. } => Some(factory()),
            Binding::Immutable { ctor } => {
                let values = specs
                    .iter()
                    .map(|s| s.common().default.clone().unwrap_or_else(|| s.kind().zero()))
                    .collect();
                let mut args = Arguments::new(specs, values);
                match ctor(&mut args) {
                    Ok(val) => Some(val),
                    Err(e) => {
                        tracing::debug!(schema = self.name.as_str(), error = %e, "no default instance");
                        None
                    }
                }
            }
        }
    }

    /// Builds the target from resolved values, one per specification slot.
    ///
    /// A mutable target is only assigned the slots that hold a value; an immutable one
    /// receives the kind's zero value for the rest. Setter failures are collected.
    pub(crate) fn construct(
        &self,
        specs: &[Specification],
        values: Vec<Option<ArgValue>>,
    ) -> Result<(T, Vec<Error>), ConfigError> {
        match &self.binding {
            Binding::Mutable { factory, setters } => {
                let mut target = factory();
                let mut errors = Vec::new();
                for ((spec, setter), val) in specs.iter().zip(setters).zip(values) {
                    let Some(val) = val else { continue };
                    match setter(&mut target, val) {
                        Ok(()) => {}
                        Err(SetError::Rejected(msg)) => {
                            errors.push(Error::SetValueException(spec.arg_ref(), msg))
                        }
                        Err(SetError::Config(e)) => return Err(e),
                    }
                }
                Ok((target, errors))
            }
            Binding::Immutable { ctor } => {
                let values = specs
                    .iter()
                    .zip(values)
                    .map(|(s, v)| v.unwrap_or_else(|| s.kind().zero()))
                    .collect();
                let mut args = Arguments::new(specs, values);
                Ok((ctor(&mut args)?, Vec::new()))
            }
        }
    }
}

pub struct MutableBuilder<T> {
    name: String,
    factory: Box<dyn Fn() -> T>,
    specs: Vec<Specification>,
    setters: Vec<Setter<T>>,
}

impl<T: 'static> MutableBuilder<T> {
    fn bind<V, E>(
        mut self,
        spec: Specification,
        set: impl Fn(&mut T, V) -> Result<(), E> + 'static,
    ) -> Self
    where
        V: FromArg,
        E: Display,
    {
        let key = spec.key().to_string();
        self.specs.push(spec);
        self.setters.push(Box::new(move |target: &mut T, val: ArgValue| {
            let val = extract(&key, val).map_err(SetError::Config)?;
            set(target, val).map_err(|e| SetError::Rejected(e.to_string()))
        }));
        self
    }

    pub fn option<V: FromArg>(self, spec: OptionSpec, set: impl Fn(&mut T, V) + 'static) -> Self {
        self.bind(spec.into(), move |t, v| {
            set(t, v);
            Ok::<_, std::convert::Infallible>(())
        })
    }
    /// Like [`option`](Self::option), but the setter may reject the value.
    pub fn try_option<V: FromArg, E: Display>(
        self,
        spec: OptionSpec,
        set: impl Fn(&mut T, V) -> Result<(), E> + 'static,
    ) -> Self {
        self.bind(spec.into(), set)
    }
    pub fn value<V: FromArg>(self, spec: ValueSpec, set: impl Fn(&mut T, V) + 'static) -> Self {
        self.bind(spec.into(), move |t, v| {
            set(t, v);
            Ok::<_, std::convert::Infallible>(())
        })
    }
    pub fn try_value<V: FromArg, E: Display>(
        self,
        spec: ValueSpec,
        set: impl Fn(&mut T, V) -> Result<(), E> + 'static,
    ) -> Self {
        self.bind(spec.into(), set)
    }

    pub fn build(self) -> Result<Schema<T>, ConfigError> {
        let mut specs = self.specs;
        spec::guard(&self.name, &mut specs)?;
        tracing::trace!(schema = self.name.as_str(), specs = specs.len(), "built mutable schema");
        Ok(Schema {
            name: self.name,
            specs,
            binding: Binding::Mutable {
                factory: self.factory,
                setters: self.setters,
            },
        })
    }
}

pub struct ImmutableBuilder<T> {
    name: String,
    params: Vec<String>,
    ctor: Constructor<T>,
    specs: Vec<Specification>,
}

impl<T: 'static> ImmutableBuilder<T> {
    pub fn option(mut self, spec: OptionSpec) -> Self {
        self.specs.push(spec.into());
        self
    }
    pub fn value(mut self, spec: ValueSpec) -> Self {
        self.specs.push(spec.into());
        self
    }

    pub fn build(self) -> Result<Schema<T>, ConfigError> {
        let mut specs = self.specs;
        spec::guard(&self.name, &mut specs)?;

        let mut params: Vec<String> = self.params.iter().map(|p| p.to_lowercase()).collect();
        let mut keys: Vec<String> = specs.iter().map(|s| s.key().to_lowercase()).collect();
        params.sort();
        keys.sort();
        if params != keys {
            return Err(ConfigError::ConstructorMismatch {
                schema: self.name,
                expected: specs.iter().map(Specification::key).collect::<Vec<_>>().join(", "),
            });
        }
        tracing::trace!(schema = self.name.as_str(), specs = specs.len(), "built immutable schema");
        Ok(Schema {
            name: self.name,
            specs,
            binding: Binding::Immutable { ctor: self.ctor },
        })
    }
}

/// Resolved values handed to an immutable constructor, looked up by parameter name.
pub struct Arguments {
    entries: Vec<(String, Option<ArgValue>)>,
}

impl Arguments {
    fn new(specs: &[Specification], values: Vec<ArgValue>) -> Self {
        Self {
            entries: specs
                .iter()
                .map(|s| s.key().to_string())
                .zip(values.into_iter().map(Some))
                .collect(),
        }
    }

    /// Removes and extracts the value of parameter `name` (matched ignoring case).
    pub fn take<V: FromArg>(&mut self, name: &str) -> Result<V, ConfigError> {
        let (key, slot) = self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownArgument(name.to_string()))?;
        let val = slot
            .take()
            .ok_or_else(|| ConfigError::UnknownArgument(key.clone()))?;
        extract(key, val)
    }
}
