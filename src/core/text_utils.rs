//! Quoting and escaping helpers shared by the transformer and the emitter.

/// Characters that must be backslash-escaped inside a Lark regular expression.
pub const REGEX_METACHARACTERS: &str = "/[](){}?*+|^$.";

/// Check if a character is special in a Lark regular expression.
#[inline]
pub fn is_regex_metacharacter(c: char) -> bool {
    REGEX_METACHARACTERS.contains(c)
}

/// Strip the surrounding quotes of an Xtext keyword literal.
///
/// Both `'...'` and `"..."` are accepted. Escape sequences inside the
/// literal are left untouched. Text that is not quoted is returned as is.
///
/// # Example
/// ```
/// use xtext2lark::core::text_utils::unquote;
///
/// assert_eq!(unquote("'abstract'"), "abstract");
/// assert_eq!(unquote(r#""x""#), "x");
/// assert_eq!(unquote("bare"), "bare");
/// ```
pub fn unquote(literal: &str) -> &str {
    let mut chars = literal.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('\'' | '"')), Some(close)) if open == close && literal.len() >= 2 => {
            &literal[1..literal.len() - 1]
        }
        _ => literal,
    }
}

/// The single character a boundary literal denotes, if it denotes exactly one.
///
/// Used for `'a'..'z'` ranges and `'a' . 'b'` wildcards.
pub fn single_character(literal: &str) -> Option<char> {
    let mut chars = unquote(literal).chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Re-quote a literal using the Lark double-quote convention.
///
/// Embedded double quotes are escaped, escaped single quotes are unescaped,
/// every other escape sequence is kept verbatim.
///
/// # Example
/// ```
/// use xtext2lark::core::text_utils::to_double_quoted;
///
/// assert_eq!(to_double_quoted(r"'don\'t worry'"), r#""don't worry""#);
/// assert_eq!(to_double_quoted(r#"'say "hi"'"#), r#""say \"hi\"""#);
/// ```
pub fn to_double_quoted(literal: &str) -> String {
    let inner = unquote(literal);
    let mut out = String::with_capacity(inner.len() + 2);
    out.push('"');

    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') => out.push('\''),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push_str("\\\\"),
            },
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }

    out.push('"');
    out
}

/// Escape every regex metacharacter in `text` with a backslash.
///
/// Works character by character; backslashes already present in the text
/// are passed through so that Xtext escapes like `\n` keep their meaning.
pub fn escape_regex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_regex_metacharacter(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
