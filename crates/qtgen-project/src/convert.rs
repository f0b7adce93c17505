/// qmake variable holding preprocessor defines.
pub const DEFINES_KEY: &str = "DEFINES";
/// qmake variable holding include search paths.
pub const INCLUDEPATH_KEY: &str = "INCLUDEPATH";

/// Split a `;` separated list into its non-empty tokens, in order.
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(';')
        .filter(|token| !token.trim().is_empty())
        .map(|token| token.to_string())
        .collect()
}

/// Render tokens as qmake append statements, one `KEY += "token"` per line.
pub fn keyed_lines<I, S>(tokens: I, key: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| format!("{key} += \"{}\"", token.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert a raw `;` separated list straight into qmake lines.
///
/// Empty tokens (including the one produced by a trailing `;`) are dropped.
pub fn to_keyed_lines(raw: &str, key: &str) -> String {
    keyed_lines(split_tokens(raw), key)
}
