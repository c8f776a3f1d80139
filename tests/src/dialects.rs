use argot::{ArgRef, Error, Parser, ParserSettings};

use super::*;

fn strict() -> Parser {
    Parser::new(ParserSettings::strict())
}

#[test]
fn assigned_and_separated() {
    assert_eq!(
        process!(strict(); simple_options(), "--stringvalue=abc" "-i" "1,2,3" "5").unwrap(),
        SimpleOptions {
            string_value: "abc".into(),
            int_sequence: vec![1, 2, 3],
            long_value: 5,
            ..Default::default()
        }
    );
}
#[test]
fn clusters() {
    let opts = process!(strict(); simple_options(), "-xs" "abc").unwrap();
    assert!(opts.bool_value);
    assert_eq!(opts.short_and_long, "abc");
    let opts = process!(strict(); simple_options(), "-sabc").unwrap();
    assert_eq!(opts.short_and_long, "abc");
}
#[test]
fn badly_formed_assignments() {
    let res = parse!(strict(); simple_options(), "--stringvalue=");
    assert_eq!(res.errors(), &[Error::BadFormatToken("--stringvalue=".into())]);
    let res = parse!(strict(); simple_options(), "--=x");
    assert_eq!(res.errors(), &[Error::BadFormatToken("--=x".into())]);
}
#[test]
fn repeated_scalar() {
    let res = parse!(strict(); simple_options(), "-s" "a" "-s" "b");
    assert_eq!(
        res.errors(),
        &[Error::RepeatedOption(ArgRef::Named {
            short: Some('s'),
            long: Some("shortandlong".into())
        })]
    );
}
#[test]
#[should_panic(expected = "Option `--shortandlong` was supplied more than once")]
fn repeated_scalar_message() {
    process!(strict(); simple_options(), "--shortandlong" "a" "-s" "b").unwrap();
}
#[test]
fn repeated_sequence_is_fine() {
    let opts = process!(strict(); simple_options(), "-i" "1" "-i" "2,3").unwrap();
    assert_eq!(opts.int_sequence, vec![1, 2, 3]);
}
#[test]
fn bare_dash_dash_is_dropped() {
    let opts = process!(strict(); simple_options(), "--" "5").unwrap();
    assert_eq!(opts.long_value, 5);
}
#[test]
fn dash_dash_when_enabled() {
    let parser = Parser::new(ParserSettings {
        enable_dash_dash: true,
        ..ParserSettings::strict()
    });
    let opts = process!(parser; simple_options(), "-x" "--" "-7").unwrap();
    assert!(opts.bool_value);
    assert_eq!(opts.long_value, -7);
}
#[test]
#[should_panic(expected = "Unknown option `what`")]
fn unknown_long() {
    process!(strict(); simple_options(), "--what").unwrap();
}
#[test]
fn ignore_unknown_assignment() {
    let parser = Parser::new(ParserSettings {
        ignore_unknown_arguments: true,
        ..ParserSettings::strict()
    });
    let opts = process!(parser; simple_options(), "--what=3" "-x").unwrap();
    assert!(opts.bool_value);
    assert_eq!(opts.long_value, 0);
}
