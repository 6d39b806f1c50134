use cmdkit::{App, Request, Value};
use expect_test::{expect, Expect};

use crate::greeter::Greeter;

fn check(args: &[&str], expect: Expect) {
    let app = App::new::<Greeter>("greeter").unwrap();
    match app.request(args).unwrap() {
        Request::Help(text) => expect.assert_eq(&text),
        Request::Invoke(it) => panic!("expected help, got {it:?}"),
    }
}

#[test]
fn root_help() {
    let expect = || {
        expect![[r#"
            greeter

            OPTIONS:
                -v, --verbose
                  prints debugging information

            COMMANDS:
                count TO
                  count up to TO

                delay TIME
                  delays in milliseconds

                exit CODE
                  stops the process with the specified exit code

                goodbye
                  say goodbye to the world

                hello NAME
                  say hello to NAME

            SUBCOMMANDS:
                greeter messages
        "#]]
    };
    check(&["help"], expect());
    check(&["--help"], expect());
    check(&["-h"], expect());
    check(&["help", "nope"], expect());
}

#[test]
fn action_help() {
    let expect = || {
        expect![[r#"
            greeter hello NAME
              say hello to NAME

              `greeter hello` will print out a message to a person of your
              choosing.

              You can optionally specify a second parameter, which will print
              out a from message as well.

              $ greeter hello Jonathan --from=Thor

              From: Thor

              Hello Jonathan

            ARGS:
                <name>
                  string

            OPTIONS:
                -v, --verbose
                  prints debugging information

                -f, --from <string>
                  who the message is from

                -r, --repeat <integer>
                  repeats the message

                -y, --yell
                  yells the message
        "#]]
    };
    check(&["help", "hello"], expect());
    check(&["hello", "--help"], expect());
    check(&["hello", "Jonathan", "-y", "-h"], expect());
}

#[test]
fn subcommand_help() {
    let expect = || {
        expect![[r#"
            greeter messages

            COMMANDS:
                list
                  lists all messages

                show ID
                  prints the message with the given id
        "#]]
    };
    check(&["help", "messages"], expect());
    check(&["messages", "help"], expect());
    check(&["messages", "--help"], expect());
    check(
        &["messages", "show", "-h"],
        expect![[r#"
            greeter messages show ID
              prints the message with the given id

            ARGS:
                <id>
                  integer
        "#]],
    );
    check(
        &["messages", "help", "list"],
        expect![[r#"
            greeter messages list
              lists all messages

            OPTIONS:
                -n, --numbered
                  prefix each message with its id
        "#]],
    );
}

#[test]
fn help_flag_as_option_value() {
    let app = App::new::<Greeter>("greeter").unwrap();
    match app.request(&["hello", "x", "--from", "-h"]).unwrap() {
        Request::Invoke(it) => assert_eq!(it.options["from"], Value::Str("-h".to_string())),
        Request::Help(text) => panic!("expected an invocation, got help:\n{text}"),
    }
}
