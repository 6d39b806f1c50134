//! The greeter command set.

use std::time::Duration;

use cmdkit::{Action, Commands, Context, Group, Opt, Param};

pub struct Greeter;

impl Commands for Greeter {
    fn declare() -> Group {
        Group::new()
            .option(Opt::flag("verbose").alias("v").description("prints debugging information"))
            .action(
                Action::new("count")
                    .example("count TO")
                    .description("count up to TO")
                    .param(Param::new::<i64>("to"))
                    .run(count),
            )
            .action(
                Action::new("delay")
                    .example("delay TIME")
                    .description("delays in milliseconds")
                    .param(Param::new::<i64>("time"))
                    .run_async(delay),
            )
            .action(
                Action::new("exit")
                    .example("exit CODE")
                    .description("stops the process with the specified exit code")
                    .param(Param::new::<i32>("code"))
                    .run_exit_code(|cx| cx.arg::<i32>("code").unwrap_or_default()),
            )
            .action(
                Action::new("goodbye")
                    .example("goodbye")
                    .description("say goodbye to the world")
                    .run(goodbye),
            )
            .action(
                Action::new("hello")
                    .example("hello NAME")
                    .description("say hello to NAME")
                    .long_description(
                        "
                        `greeter hello` will print out a message to a person of your
                        choosing.

                        You can optionally specify a second parameter, which will print
                        out a from message as well.

                        $ greeter hello Jonathan --from=Thor

                        From: Thor

                        Hello Jonathan
                        ",
                    )
                    .param(Param::new::<String>("name"))
                    .option(Opt::value::<String>("from").alias("f").description("who the message is from"))
                    .option(
                        Opt::value_with_default("repeat", || 1i64)
                            .alias("r")
                            .description("repeats the message"),
                    )
                    .option(Opt::flag("yell").alias("y").description("yells the message"))
                    .run(hello),
            )
            .subcommand::<Messages>("messages")
    }
}

pub struct Messages;

const INBOX: [&str; 3] = ["Hi there", "Lunch at noon?", "Build is green"];

impl Commands for Messages {
    fn declare() -> Group {
        Group::new()
            .action(
                Action::new("list")
                    .description("lists all messages")
                    .option(Opt::flag("numbered").alias("n").description("prefix each message with its id"))
                    .run(|cx| print!("{}", listing(cx))),
            )
            .action(
                Action::new("show")
                    .example("show ID")
                    .description("prints the message with the given id")
                    .param(Param::new::<i64>("id"))
                    .run_exit_code(show),
            )
    }
}

fn count(cx: &Context) {
    for i in 1..=cx.arg::<i64>("to").unwrap_or_default() {
        println!("{i}");
    }
}

async fn delay(cx: Context) {
    let time = cx.arg::<i64>("time").unwrap_or_default();
    let verbose = cx.flag("verbose");

    if verbose {
        println!("> delaying {time}ms");
    }
    tokio::time::sleep(Duration::from_millis(u64::try_from(time).unwrap_or(0))).await;
    if verbose {
        println!("> done delaying {time}ms");
    }
}

fn goodbye(cx: &Context) {
    let verbose = cx.flag("verbose");

    if verbose {
        println!("> saying goodbye");
    }
    println!("Goodbye World");
    if verbose {
        println!("> done saying goodbye");
    }
}

fn hello(cx: &Context) {
    let verbose = cx.flag("verbose");
    if verbose {
        println!("> saying hello");
    }
    print!("{}", greeting(cx));
    if verbose {
        println!("> done saying hello");
    }
}

/// What `hello` prints.
pub fn greeting(cx: &Context) -> String {
    let mut message = String::new();
    if let Some(from) = cx.option::<String>("from") {
        message.push_str(&format!("From: {from}\n"));
    }
    message.push_str(&format!("Hello {}\n", cx.arg::<String>("name").unwrap_or_default()));
    if cx.flag("yell") {
        message = message.to_uppercase();
    }
    let repeats = usize::try_from(cx.option::<i64>("repeat").unwrap_or(1)).unwrap_or(0);
    message.repeat(repeats)
}

/// What `messages list` prints.
pub fn listing(cx: &Context) -> String {
    let mut buf = String::new();
    for (id, message) in INBOX.iter().enumerate() {
        if cx.flag("numbered") {
            buf.push_str(&format!("{id}: {message}\n"));
        } else {
            buf.push_str(&format!("{message}\n"));
        }
    }
    buf
}

fn show(cx: &Context) -> i32 {
    let id = cx.arg::<i64>("id").unwrap_or_default();
    match usize::try_from(id).ok().and_then(|it| INBOX.get(it)) {
        Some(message) => {
            println!("{message}");
            0
        }
        None => {
            eprintln!("no message with id {id}");
            1
        }
    }
}
