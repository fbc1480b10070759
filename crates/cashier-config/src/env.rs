use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Failure while expanding placeholders in the raw config text
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    /// Referenced variable is unset and no default was given
    #[error("environment variable not found: `{0}` (line {1})")]
    MissingVar(String, usize),

    /// Placeholder used a scope other than `env.`
    #[error("only variables scoped with 'env.' are supported: `{0}` (line {1})")]
    UnsupportedScope(String, usize),
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `{{ env.VAR }}` or `{{ env.VAR | default("fallback") }}`
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in a raw TOML document
///
/// Secrets such as `test_secret` are normally injected this way. Comment
/// lines are copied verbatim so documented-but-unused placeholders do not
/// require the variable to be set.
pub(crate) fn expand_env(input: &str) -> Result<String, ExpandError> {
    let mut expanded = Vec::new();

    for (index, line) in input.lines().enumerate() {
        if line.trim_start().starts_with('#') {
            expanded.push(line.to_owned());
            continue;
        }

        expanded.push(expand_line(line, index + 1)?);
    }

    let mut output = expanded.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line: &str, line_no: usize) -> Result<String, ExpandError> {
    let mut output = String::with_capacity(line.len());
    let mut last_end = 0;

    for captures in placeholder().captures_iter(line) {
        let (start, end) = match captures.get(0) {
            Some(whole) => (whole.start(), whole.end()),
            None => continue,
        };

        output.push_str(&line[last_end..start]);
        output.push_str(&resolve(&captures, line_no)?);
        last_end = end;
    }

    output.push_str(&line[last_end..]);
    Ok(output)
}

fn resolve(captures: &Captures<'_>, line_no: usize) -> Result<String, ExpandError> {
    let key = captures.get(1).map_or("", |m| m.as_str());
    let default = captures.get(2).map(|m| m.as_str());

    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        return Err(ExpandError::UnsupportedScope(key.to_owned(), line_no));
    };

    match (std::env::var(var_name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(ExpandError::MissingVar(var_name.to_owned(), line_no)),
    }
}
