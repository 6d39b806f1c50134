//! Plain-text usage built from descriptors.

use std::fmt::Write;

use crate::{
    action::ActionDescriptor, group::CommandGroupDescriptor, option::OptionDescriptor,
    param::ParameterDescriptor,
};

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

/// Help for whatever `path` names below `root`: the deepest subcommand group
/// reached, or an action in it. Unknown trailing tokens are ignored.
pub fn render_path(program: &str, root: &CommandGroupDescriptor, path: &[&str]) -> String {
    let mut prefix = program.to_string();
    let mut group = root;
    for token in path {
        if let Some(action) = group.action(token) {
            return render_action(&prefix, action);
        }
        match group.subgroup_entry(token) {
            Some((name, sub)) => {
                push_word(&mut prefix, name);
                group = sub;
            }
            None => break,
        }
    }
    render_group(&prefix, group)
}

/// `prefix` is the program name followed by the subcommand path.
pub fn render_group(prefix: &str, group: &CommandGroupDescriptor) -> String {
    let mut buf = String::new();
    w!(buf, "{prefix}\n");

    let options = group.class_options().collect::<Vec<_>>();
    if !options.is_empty() {
        blank_line(&mut buf);
        w!(buf, "OPTIONS:\n");
        options_rec(&mut buf, &options);
    }

    let mut actions = group.actions().peekable();
    if actions.peek().is_some() {
        blank_line(&mut buf);
        w!(buf, "COMMANDS:\n");
        let mut blank = "";
        for action in actions {
            w!(buf, "{blank}");
            blank = "\n";
            w!(buf, "    {}\n", action.example().unwrap_or(action.name()));
            if let Some(doc) = action.description() {
                write_lines_indented(&mut buf, doc, 6);
            }
        }
    }

    let mut subgroups = group.subgroups().peekable();
    if subgroups.peek().is_some() {
        blank_line(&mut buf);
        w!(buf, "SUBCOMMANDS:\n");
        for (name, _) in subgroups {
            w!(buf, "    {prefix} {name}\n");
        }
    }
    buf
}

pub fn render_action(prefix: &str, action: &ActionDescriptor) -> String {
    let mut buf = String::new();
    match action.example() {
        Some(example) => w!(buf, "{prefix} {example}\n"),
        None => {
            w!(buf, "{prefix} {}", action.name());
            for param in action.parameters() {
                w!(buf, " {}", param_usage(param));
            }
            w!(buf, "\n");
        }
    }
    if let Some(doc) = action.description() {
        write_lines_indented(&mut buf, doc, 2);
    }
    if let Some(doc) = action.long_description() {
        blank_line(&mut buf);
        write_lines_indented(&mut buf, &dedent(doc), 2);
    }

    if !action.parameters().is_empty() {
        blank_line(&mut buf);
        w!(buf, "ARGS:\n");
        let mut blank = "";
        for param in action.parameters() {
            w!(buf, "{blank}");
            blank = "\n";
            w!(buf, "    {}\n", param_usage(param));
            write_lines_indented(&mut buf, &param.ty().display_name(), 6);
        }
    }

    let options = action.options().collect::<Vec<_>>();
    if !options.is_empty() {
        blank_line(&mut buf);
        w!(buf, "OPTIONS:\n");
        options_rec(&mut buf, &options);
    }
    buf
}

fn options_rec(buf: &mut String, options: &[&OptionDescriptor]) {
    let mut blank = "";
    for opt in options {
        w!(buf, "{blank}");
        blank = "\n";

        let short = opt.alias().map(|it| format!("-{it}, ")).unwrap_or_default();
        let value = if opt.is_flag() { String::new() } else { format!(" <{}>", opt.ty().display_name()) };
        w!(buf, "    {short}--{}{value}\n", opt.name());
        if let Some(doc) = opt.description() {
            write_lines_indented(buf, doc, 6);
        }
    }
}

fn param_usage(param: &ParameterDescriptor) -> String {
    let (l, r) = if param.has_default() { ("[", "]") } else { ("<", ">") };
    format!("{l}{}{r}", param.name())
}

fn push_word(buf: &mut String, word: &str) {
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(word);
}

fn write_lines_indented(buf: &mut String, multiline_str: &str, indent: usize) {
    for line in multiline_str.split('\n').map(str::trim_end) {
        if line.is_empty() {
            w!(buf, "\n")
        } else {
            w!(buf, "{blank:indent$}{line}\n", blank = "");
        }
    }
}

/// Strips the indentation shared by all non-blank lines and the blank lines
/// around the text.
fn dedent(text: &str) -> String {
    let lines = text.lines().map(str::trim_end).collect::<Vec<_>>();
    let start = lines.iter().position(|it| !it.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|it| !it.is_empty()).map_or(start, |it| it + 1);
    let lines = &lines[start..end];
    let indent = lines
        .iter()
        .filter(|it| !it.is_empty())
        .map(|it| it.len() - it.trim_start().len())
        .min()
        .unwrap_or(0);
    lines.iter().map(|it| strip_indent(it, indent)).collect::<Vec<_>>().join("\n")
}

/// Drops leading whitespace worth at most `indent` bytes, stopping before a
/// character that would not fit.
fn strip_indent(line: &str, indent: usize) -> &str {
    let mut rest = line;
    while let Some(c) = rest.chars().next() {
        if !c.is_whitespace() || line.len() - rest.len() + c.len_utf8() > indent {
            break;
        }
        rest = &rest[c.len_utf8()..];
    }
    rest
}

fn blank_line(buf: &mut String) {
    w!(buf, "\n");
}
