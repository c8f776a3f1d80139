use argot::{overrides, ArgRef, ConfigError, Custom, Error, Failure, Kind, OptionSpec, Parser, Schema};

use super::*;

#[test]
fn simple() {
    assert_eq!(
        process!(immutable_options(), "9876543210" "--stringvalue=strvalue" "-i1" "2" "3").unwrap(),
        ImmutableOptions {
            string_value: "strvalue".into(),
            int_sequence: vec![1, 2, 3],
            bool_value: false,
            long_value: 9876543210,
        }
    );
}
#[test]
fn zero_values() {
    assert_eq!(
        process!(immutable_options(),).unwrap(),
        ImmutableOptions {
            string_value: String::new(),
            int_sequence: Vec::new(),
            bool_value: false,
            long_value: 0,
        }
    );
}
#[test]
fn failed_parse_keeps_default_instance() {
    match parse!(immutable_options(), "-i" "1") {
        argot::ParseResult::NotParsed { instance, errors, .. } => {
            assert_eq!(instance.map(|i| i.long_value), Some(0));
            assert_eq!(errors.len(), 1);
        }
        res => panic!("expected failure, got {:?}", res),
    }
}
#[test]
#[should_panic(expected = "Constructor of `Broken` must take exactly these parameters (in any order): StringValue, IntSequence")]
fn constructor_mismatch() {
    Schema::immutable("Broken", &["stringValue1", "intSequence2"], |args| {
        Ok((args.take::<String>("stringValue1")?, args.take::<Vec<i32>>("intSequence2")?))
    })
    .option(OptionSpec::new("StringValue", Kind::String))
    .option(OptionSpec::new("IntSequence", Kind::sequence(Kind::I32)))
    .build()
    .unwrap();
}
#[test]
fn extraction_mismatch_is_fatal() {
    let schema = Schema::immutable("Wrong", &["count"], |args| args.take::<String>("count"))
        .option(OptionSpec::new("count", Kind::I32).short('c'))
        .build()
        .unwrap();
    let err = Parser::default().parse(&schema, ["-c", "5"]).unwrap_err();
    assert!(matches!(err, ConfigError::ArgumentType { found: "signed integer", .. }), "{}", err);
}
#[test]
fn overrides_apply_per_thread() {
    overrides::set(
        "ImmutableOptions",
        vec![OptionSpec::new("BoolValue", Kind::Bool).short('x').required().into()],
    );
    let res = parse!(immutable_options(),);
    overrides::reset();
    assert_eq!(res.errors().len(), 1);
    assert!(process!(immutable_options(),).is_ok());
}
#[test]
fn unbound_custom_reports_input_errors() {
    let schema = Schema::immutable("Remote", &["endpoint"], |args| {
        args.take::<Custom<Endpoint>>("endpoint").map(|c| c.0)
    })
    .option(OptionSpec::new("endpoint", Kind::parsed::<Endpoint>()).short('e').required())
    .build()
    .unwrap();
    let endpoint = ArgRef::Named {
        short: Some('e'),
        long: None,
    };

    match parse!(schema,) {
        argot::ParseResult::NotParsed { instance, errors, .. } => {
            assert!(instance.is_none());
            assert_eq!(errors, vec![Error::MissingRequiredOption(endpoint.clone())]);
        }
        res => panic!("expected failure, got {:?}", res),
    }
    let res = parse!(schema, "-e" "nowhere");
    assert_eq!(
        res.errors(),
        &[
            Error::BadFormatConversion(endpoint.clone(), Failure::Format),
            Error::MissingRequiredOption(endpoint),
        ]
    );

    let res = parse!(schema, "-e" "localhost:22");
    assert_eq!(res.value().map(|e| e.port), Some(22));
}
