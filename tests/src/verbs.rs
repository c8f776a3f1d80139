use argot::{Error, ErrorKind, ParseResult, Parser, ParserSettings};

use super::*;

fn run(args: Vec<String>) -> ParseResult<Git> {
    Parser::default().parse_verbs(&git_verbs(), args).unwrap()
}

#[test]
fn add() {
    assert_eq!(
        run(args!("add" "-p" "file.txt")).into_result().unwrap(),
        Git::Add {
            patch: true,
            force: false,
            file_name: "file.txt".into()
        }
    );
}
#[test]
fn commit_by_alias() {
    assert_eq!(
        run(args!("ci" "--amend")).into_result().unwrap(),
        Git::Commit {
            patch: false,
            amend: true
        }
    );
}
#[test]
fn clone_with_many_urls() {
    assert_eq!(
        run(args!("clone" "--no-hardlinks" "-q" "https://a.example/x" "https://b.example/y"))
            .into_result()
            .unwrap(),
        Git::Clone {
            no_hard_links: true,
            quiet: true,
            urls: vec!["https://a.example/x".into(), "https://b.example/y".into()],
        }
    );
}
#[test]
fn exclusive_modes() {
    let res = run(args!("add" "-p" "-f" "file.txt"));
    assert!(!res.is_parsed());
    let kinds: Vec<_> = res.errors().iter().map(Error::kind).collect();
    assert_eq!(
        kinds,
        [ErrorKind::MutuallyExclusiveSetViolation, ErrorKind::MutuallyExclusiveSetViolation]
    );
}
#[test]
fn verb_options_stay_with_their_verb() {
    let res = run(args!("commit" "--force"));
    assert_eq!(res.errors(), &[Error::UnknownOption("force".into())]);
}
#[test]
fn help_for_verb() {
    let res = run(args!("help" "add"));
    assert_eq!(res.errors(), &[Error::HelpVerbRequested { verb: Some("add".into()) }]);
    assert!(res.is_help_request());
    assert_eq!(res.value(), None);

    let res = run(args!("help" "nope"));
    assert_eq!(res.errors(), &[Error::HelpVerbNotFound("nope".into())]);
    let res = run(args!("help" ""));
    assert_eq!(res.errors(), &[Error::HelpVerbRequested { verb: None }]);
}
#[test]
fn version() {
    assert!(run(args!("--version")).is_version_request());
}
#[test]
#[should_panic(expected = "Unknown verb `push`")]
fn bad_verb() {
    run(args!("push" "origin")).into_result().unwrap();
}
#[test]
#[should_panic(expected = "No verb selected")]
fn no_verb() {
    run(args!()).into_result().unwrap();
}
#[test]
fn case_insensitive_verbs() {
    let parser = Parser::new(ParserSettings {
        case_sensitive: false,
        ..ParserSettings::default()
    });
    let res = parser.parse_verbs(&git_verbs(), args!("COMMIT" "--AMEND")).unwrap();
    assert_eq!(
        res.into_result().unwrap(),
        Git::Commit {
            patch: false,
            amend: true
        }
    );
}
