use crate::error::ResolutionError;

/// Cursor over the raw argument tokens.
pub(crate) struct Tokens {
    after_double_dash: bool,
    rargs: Vec<String>,
}

impl Tokens {
    pub(crate) fn new<S: AsRef<str>>(args: &[S]) -> Self {
        let rargs = args.iter().rev().map(|it| it.as_ref().to_string()).collect();
        Self { after_double_dash: false, rargs }
    }

    pub(crate) fn peek(&self) -> Option<&str> {
        self.rargs.last().map(String::as_str)
    }

    pub(crate) fn next(&mut self) -> Option<String> {
        self.rargs.pop()
    }

    /// `Ok` for an option marker, `Err` for a positional token.
    ///
    /// Everything after `--` is positional, and so is a lone `-`.
    pub(crate) fn pop_flag(&mut self) -> Option<Result<String, String>> {
        if self.after_double_dash {
            return self.next().map(Err);
        }
        let arg = self.next()?;
        if arg == "--" {
            self.after_double_dash = true;
            return self.next().map(Err);
        }
        if arg.starts_with('-') && arg != "-" {
            Some(Ok(arg))
        } else {
            Some(Err(arg))
        }
    }

    /// The token following `flag`, taken verbatim.
    pub(crate) fn next_value(&mut self, flag: &str) -> Result<String, ResolutionError> {
        self.next().ok_or_else(|| ResolutionError::MissingValue { option: flag.to_string() })
    }
}

/// Splits `--name=value` / `-alias` into the lookup key and the attached value.
pub(crate) fn split_flag(flag: &str) -> (&str, Option<&str>) {
    let body = flag.strip_prefix("--").or_else(|| flag.strip_prefix('-')).unwrap_or(flag);
    match body.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (body, None),
    }
}
