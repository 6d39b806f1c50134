#[path = "../../examples/greeter/commands.rs"]
mod greeter;
mod help;

use cmdkit::{CommandGroupDescriptor, Kind, ResolutionError, Value};
use expect_test::{expect, Expect};

fn greeter() -> CommandGroupDescriptor {
    CommandGroupDescriptor::of::<greeter::Greeter>().unwrap()
}

fn check(root: &CommandGroupDescriptor, args: &str, expect: Expect) {
    let args = args.split_ascii_whitespace().collect::<Vec<_>>();
    match root.resolve(&args) {
        Ok(invocation) => {
            expect.assert_debug_eq(&invocation);
        }
        Err(err) => {
            expect.assert_eq(&err.to_string());
        }
    }
}

#[test]
fn positional_integer() {
    let root = greeter();
    check(
        &root,
        "count 5",
        expect![[r#"
            Invocation {
                action: "count",
                path: [],
                positional: [
                    Int(
                        5,
                    ),
                ],
                options: {
                    "verbose": Bool(
                        false,
                    ),
                },
            }
        "#]],
    );
    check(
        &root,
        "count",
        expect!["Missing required parameter: `to`. Use `help` for more information"],
    );
    check(&root, "count abc", expect!["Can't parse `to`, expected integer: `abc`"]);
    check(&root, "exit -1", expect![[r#"
        Invocation {
            action: "exit",
            path: [],
            positional: [
                Int(
                    -1,
                ),
            ],
            options: {
                "verbose": Bool(
                    false,
                ),
            },
        }
    "#]]);
    check(&root, "exit 4294967296", expect!["Can't parse `code`, expected integer: `4294967296`"]);
    check(
        &root,
        "count -99999999999999999999",
        expect!["Can't parse `to`, expected integer: `-99999999999999999999`"],
    );

    let err = root.resolve(&["count", "-99999999999999999999"]).unwrap_err();
    assert_eq!(
        err,
        ResolutionError::TypeCoercionFailure {
            token: "-99999999999999999999".to_string(),
            name: "to".to_string(),
            expected: Kind::Integer,
        }
    );
}

#[test]
fn coercion_failure_names_token_and_parameter() {
    let root = greeter();
    let err = root.resolve(&["count", "abc"]).unwrap_err();
    assert_eq!(
        err,
        ResolutionError::TypeCoercionFailure {
            token: "abc".to_string(),
            name: "to".to_string(),
            expected: Kind::Integer,
        }
    );
}

#[test]
fn options_anywhere() {
    let root = greeter();
    let expect = || {
        expect![[r#"
            Invocation {
                action: "hello",
                path: [],
                positional: [
                    Str(
                        "Jonathan",
                    ),
                ],
                options: {
                    "from": Str(
                        "Thor",
                    ),
                    "repeat": Int(
                        1,
                    ),
                    "verbose": Bool(
                        false,
                    ),
                    "yell": Bool(
                        false,
                    ),
                },
            }
        "#]]
    };
    check(&root, "hello --from=Thor Jonathan", expect());
    check(&root, "hello Jonathan --from=Thor", expect());
    check(&root, "hello Jonathan --from Thor", expect());
    check(&root, "hello -f Thor Jonathan", expect());
    check(&root, "HELLO Jonathan --FROM Thor", expect());
}

#[test]
fn flags() {
    let root = greeter();
    for args in [&["hello", "Jonathan", "--yell"][..], &["hello", "-y", "Jonathan"]] {
        let inv = root.resolve(args).unwrap();
        assert_eq!(inv.options["yell"], Value::Bool(true));
        assert_eq!(inv.positional, [Value::Str("Jonathan".to_string())]);
    }
    let inv = root.resolve(&["hello", "Jonathan"]).unwrap();
    assert_eq!(inv.options["yell"], Value::Bool(false));

    let inv = root.resolve(&["hello", "Jonathan", "--yell=false", "-v"]).unwrap();
    assert_eq!(inv.options["yell"], Value::Bool(false));
    assert_eq!(inv.options["verbose"], Value::Bool(true));

    check(&root, "hello Jonathan --yell=loud", expect!["Can't parse `yell`, expected boolean: `loud`"]);
}

#[test]
fn absent_option_without_default_is_unset() {
    let root = greeter();
    let inv = root.resolve(&["hello", "Jonathan"]).unwrap();
    assert!(!inv.options.contains_key("from"));
    assert_eq!(inv.options["repeat"], Value::Int(1));

    let inv = root.resolve(&["hello", "Jonathan", "-r", "3", "--from="]).unwrap();
    assert_eq!(inv.options["repeat"], Value::Int(3));
    assert_eq!(inv.options["from"], Value::Str(String::new()));
}

#[test]
fn option_errors() {
    let root = greeter();
    check(
        &root,
        "hello Jonathan --werbose",
        expect!["Unknown option: `--werbose`. Use `help` for more information"],
    );
    check(&root, "hello Jonathan --from", expect!["Expected a value for `--from`"]);
    check(&root, "hello Jonathan --repeat=lol", expect!["Can't parse `repeat`, expected integer: `lol`"]);
    check(
        &root,
        "hello Jonathan -f Thor --from Loki",
        expect!["Option specified more than once: `from`"],
    );
    check(&root, "hello Jonathan -y --yell", expect!["Option specified more than once: `yell`"]);
    check(
        &root,
        "hello Jonathan Thor",
        expect!["Unexpected argument: `Thor`. Use `help` for more information"],
    );
    // Class options of the root do not reach subgroups.
    check(
        &root,
        "messages list -v",
        expect!["Unknown option: `-v`. Use `help` for more information"],
    );

    let err = root.resolve(&["hello", "x", "-f", "a", "--from", "b"]).unwrap_err();
    assert_eq!(
        err,
        ResolutionError::AmbiguousMatch {
            option: "from".to_string(),
            tokens: vec!["-f".to_string(), "--from".to_string()],
        }
    );
}

#[test]
fn double_dash() {
    let root = greeter();
    let inv = root.resolve(&["hello", "--", "--yell"]).unwrap();
    assert_eq!(inv.positional, [Value::Str("--yell".to_string())]);
    assert_eq!(inv.options["yell"], Value::Bool(false));
}

#[test]
fn subcommands() {
    let root = greeter();
    check(
        &root,
        "messages list",
        expect![[r#"
            Invocation {
                action: "list",
                path: [
                    "messages",
                ],
                positional: [],
                options: {
                    "numbered": Bool(
                        false,
                    ),
                },
            }
        "#]],
    );
    check(
        &root,
        "Messages SHOW 7",
        expect![[r#"
            Invocation {
                action: "show",
                path: [
                    "messages",
                ],
                positional: [
                    Int(
                        7,
                    ),
                ],
                options: {},
            }
        "#]],
    );
    check(&root, "list", expect!["Unknown command: `list`. Use `help` for more information"]);
    check(&root, "messages", expect!["A command is required. Use `help` for more information"]);
    check(&root, "", expect!["A command is required. Use `help` for more information"]);
    check(
        &root,
        "--verbose count 1",
        expect!["Unknown command: `--verbose`. Use `help` for more information"],
    );

    let err = root.resolve(&["list"]).unwrap_err();
    assert_eq!(err.available(), ["count", "delay", "exit", "goodbye", "hello", "messages"]);
    let err = root.resolve(&["messages", "nope"]).unwrap_err();
    assert_eq!(err.available(), ["list", "show"]);
}

#[test]
fn positional_count_matches_parameters() {
    let root = greeter();
    let lines = [
        &["count", "1"][..],
        &["delay", "10"],
        &["exit", "0"],
        &["goodbye"],
        &["hello", "x"],
        &["messages", "list"],
        &["messages", "show", "1"],
    ];
    for args in lines {
        let inv = root.resolve(args).unwrap();
        assert_eq!(inv.positional.len(), inv.action.parameters().len());
    }
}

#[test]
fn concurrent_resolutions() {
    let root = greeter();
    std::thread::scope(|s| {
        for i in 0..4i64 {
            let root = &root;
            s.spawn(move || {
                let n = i.to_string();
                let inv = root.resolve(&["count", n.as_str()]).unwrap();
                assert_eq!(inv.positional, [Value::Int(i)]);
            });
        }
    });
}
