//! Builds one target from an argument list.

use super::lookup::NameResolver;
use super::mapper::{map_options, map_values};
use super::partition::partition;
use super::preprocess::{self, preprocess};
use super::schema::Schema;
use super::settings::ParserSettings;
use super::spec::{self, TargetShape};
use super::tokenizer::Tokenizer;
use super::{rules, split_errors, to_parse_result, ArgValue, ConfigError, Error, ParseResult};

/// `Err` only for mistakes in `schema`; bad input is reported in the [`ParseResult`].
pub fn build<T>(
    schema: &Schema<T>,
    args: &[String],
    settings: &ParserSettings,
) -> Result<ParseResult<T>, ConfigError> {
    let specs = schema.effective_specs()?;
    if !settings.case_sensitive {
        spec::check_names(&specs, false)?;
    }

    if !args.is_empty() {
        let errors = preprocess(args, &preprocess::standard(settings), settings.case_sensitive);
        if !errors.is_empty() {
            return Ok(ParseResult::NotParsed {
                instance: schema.make_default(&specs),
                errors,
                warnings: Vec::new(),
            });
        }
    }

    let names = NameResolver::new(&specs, settings.case_sensitive);
    let (tokens, mut errors) = Tokenizer::new(&names, settings).run(args);
    let parts = partition(&tokens, |name| names.describe(name));
    errors.extend(
        parts
            .missing
            .iter()
            .filter_map(|token| names.spec_for(token.text()))
            .map(|o| Error::MissingValueOption(o.arg_ref())),
    );

    let ignore_case = settings.case_insensitive_enum_values;
    let (mut props, option_errors) = map_options(&specs, &parts, &settings.culture, ignore_case);
    let (value_props, value_errors) = map_values(&specs, &parts.values, &settings.culture, ignore_case);
    props.extend(value_props);
    errors.extend(option_errors);
    errors.extend(value_errors);

    // Explicit value, then the declared default, then an empty list for sequences.
    let mut values: Vec<Option<ArgValue>> = vec![None; specs.len()];
    for prop in &props {
        let common = prop.spec.common();
        values[prop.slot] = prop
            .value
            .clone()
            .or_else(|| common.default.clone())
            .or_else(|| {
                (prop.spec.target_shape() == TargetShape::Sequence).then(|| ArgValue::List(Vec::new()))
            });
    }

    errors.extend(rules::validate(&props, settings.allow_multi_instance));
    // `--help` with auto-help off isn't worth reporting.
    errors.retain(|e| !matches!(e, Error::UnknownOption(name) if name.eq_ignore_ascii_case("help")));

    // An immutable constructor can't take a partial set of values.
    if !schema.is_mutable() && errors.iter().any(|e| !settings.non_fatal.contains(&e.kind())) {
        tracing::debug!(schema = schema.name(), errors = errors.len(), "skipping constructor");
        let (warnings, errors) = split_errors(errors, &settings.non_fatal);
        return Ok(ParseResult::NotParsed {
            instance: schema.make_default(&specs),
            errors,
            warnings,
        });
    }
    let (instance, set_errors) = schema.construct(&specs, values)?;
    errors.extend(set_errors);

    tracing::debug!(
        schema = schema.name(),
        args = args.len(),
        tokens = tokens.len(),
        errors = errors.len(),
        "built instance"
    );
    Ok(to_parse_result(
        instance,
        || schema.make_default(&specs),
        errors,
        &settings.non_fatal,
    ))
}
