use argot::{ArgRef, Error, ErrorKind, Parser, ParserSettings};

use super::*;

#[test]
fn simple() {
    assert_eq!(
        process!(simple_options(), "--stringvalue" "strvalue" "-i" "1" "2" "3" "-x" "10").unwrap(),
        SimpleOptions {
            string_value: "strvalue".into(),
            int_sequence: vec![1, 2, 3],
            bool_value: true,
            long_value: 10,
            ..Default::default()
        }
    );
}
#[test]
fn inline_and_assigned() {
    assert_eq!(
        process!(simple_options(), "-sabc" "--stringvalue=x=y" "-i1,2,3,4").unwrap(),
        SimpleOptions {
            string_value: "x=y".into(),
            short_and_long: "abc".into(),
            int_sequence: vec![1, 2, 3, 4],
            ..Default::default()
        }
    );
}
#[test]
fn last_value_wins() {
    let opts = process!(simple_options(), "-s" "A" "--shortandlong" "B" "-i" "1,2,3").unwrap();
    assert_eq!(opts.short_and_long, "B");
}
#[test]
fn repeated_sequences_accumulate() {
    let opts = process!(simple_options(), "-i" "1" "-i" "2,3").unwrap();
    assert_eq!(opts.int_sequence, vec![1, 2, 3]);
}
#[test]
fn negative_positional() {
    let opts = process!(simple_options(), "-i" "1,2,3" "-42").unwrap();
    assert_eq!(opts.long_value, -42);
}
#[test]
fn dash_dash_forces_values() {
    let opts = process!(simple_options(), "-i" "1,2,3" "--" "-7").unwrap();
    assert_eq!(opts.long_value, -7);
}
#[test]
#[should_panic(expected = "Wrong number of values for `-i`")]
fn sequence_too_short() {
    process!(simple_options(), "-i" "1" "2").unwrap();
}
#[test]
#[should_panic(expected = "Unknown option `z`")]
fn unknown_short() {
    process!(simple_options(), "-xz").unwrap();
}
#[test]
#[should_panic(expected = "Error parsing value of `value #0`: invalid format")]
fn bad_positional() {
    process!(simple_options(), "ten").unwrap();
}
#[test]
#[should_panic(expected = "Expected a value after option `--stringvalue`")]
fn missing_value() {
    process!(simple_options(), "--stringvalue").unwrap();
}
#[test]
fn empty_arguments() {
    assert_eq!(process!(simple_options(),).unwrap(), SimpleOptions::default());
}
#[test]
fn help() {
    let res = parse!(simple_options(), "--help" "-x");
    assert!(res.is_help_request());
    assert_eq!(res.errors(), &[Error::HelpRequested]);
}
#[test]
fn version() {
    assert!(parse!(simple_options(), "--version").is_version_request());
}

#[test]
fn case_insensitive_names() {
    let parser = Parser::new(ParserSettings {
        case_sensitive: false,
        ..ParserSettings::default()
    });
    let opts = process!(parser; simple_options(), "--STRINGVALUE" "v" "-X").unwrap();
    assert_eq!(opts.string_value, "v");
    assert!(opts.bool_value);
}
#[test]
fn ignore_unknown() {
    let parser = Parser::new(ParserSettings {
        ignore_unknown_arguments: true,
        ..ParserSettings::default()
    });
    let opts = process!(parser; simple_options(), "--what" "-x").unwrap();
    assert!(opts.bool_value);
}
#[test]
fn posix_stops_at_first_positional() {
    let parser = Parser::new(ParserSettings {
        posixly_correct: true,
        ..ParserSettings::default()
    });
    let res = parse!(parser; simple_options(), "5" "-x");
    // `-x` becomes a second positional and is dropped.
    let opts = res.into_result().unwrap();
    assert_eq!(opts.long_value, 5);
    assert!(!opts.bool_value);
}
#[test]
fn setter_rejects() {
    let res = parse!(picky_options(), "-e" "bad");
    assert_eq!(
        res.errors(),
        &[Error::SetValueException(
            ArgRef::Named {
                short: Some('e'),
                long: None
            },
            "Invalid value, only accept 'good' value".into()
        )]
    );
    assert_eq!(process!(picky_options(), "-e" "good").unwrap(), Picky { value: "good".into() });
}
#[test]
fn setter_rejection_as_warning() {
    let parser = Parser::new(ParserSettings {
        non_fatal: vec![ErrorKind::SetValueException],
        ..ParserSettings::default()
    });
    let res = parse!(parser; picky_options(), "-e" "bad");
    assert!(res.is_parsed());
    assert_eq!(res.warnings().len(), 1);
    assert_eq!(res.value(), Some(&Picky::default()));
}
#[test]
fn custom_types() {
    let net = process!(network_options(), "-e" "localhost:8080" "-r" "3").unwrap();
    assert_eq!(
        net.endpoint,
        Some(Endpoint {
            host: "localhost".into(),
            port: 8080
        })
    );
    assert_eq!(net.retries, Some(3));
    assert_eq!(net.color, "Green");
}
#[test]
#[should_panic(expected = "Error parsing value of `-e`: invalid format")]
fn custom_type_rejects() {
    process!(network_options(), "-e" "nowhere").unwrap();
}
#[test]
fn enum_values() {
    assert_eq!(process!(network_options(), "-c" "Blue").unwrap().color, "Blue");
    let res = parse!(network_options(), "-c" "blue");
    assert_eq!(res.errors()[0].kind(), ErrorKind::BadFormatConversion);
    let res = parse!(network_options(), "-c" "2");
    assert_eq!(res.errors()[0].kind(), ErrorKind::BadFormatConversion);

    let parser = Parser::new(ParserSettings {
        case_insensitive_enum_values: true,
        ..ParserSettings::default()
    });
    assert_eq!(process!(parser; network_options(), "-c" "blue").unwrap().color, "Blue");
}
#[test]
#[should_panic(expected = "Error parsing value of `-r`: value out of range")]
fn overflow() {
    process!(network_options(), "-r" "256").unwrap();
}
