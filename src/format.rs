//! Positional placeholder substitution for message patterns.
//!
//! Patterns carry placeholders of the form `{0}`, `{1}`, … which are filled
//! from a caller-supplied argument list. `{{` and `}}` escape literal braces.
//!
//! With an empty argument list the pattern is returned verbatim without any
//! scanning, so a malformed pattern that takes no arguments is never flagged.
//! With arguments present, any malformed placeholder or missing argument is a
//! typed error; the resolver recovers it by logging and falling back to the
//! raw pattern.

use std::fmt::Display;
use thiserror::Error;

/// A substitution failure. Never surfaced to resolution callers; the
/// resolver degrades to the unformatted pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Unclosed brace or a placeholder whose body is not a decimal index.
    #[error("malformed placeholder at byte {position}")]
    Malformed { position: usize },

    /// Placeholder index with no corresponding argument.
    #[error("placeholder {{{index}}} has no argument ({supplied} supplied)")]
    MissingArgument { index: usize, supplied: usize },
}

/// Substitute positional arguments into a pattern.
///
/// Placeholders are consumed left to right; an argument may be referenced any
/// number of times (or not at all). Empty `args` short-circuits to the
/// pattern itself.
pub fn format_pattern(pattern: &str, args: &[&dyn Display]) -> Result<String, FormatError> {
    if args.is_empty() {
        return Ok(pattern.to_string());
    }

    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let index = parse_index(&mut chars, pos)?;
                let arg = args
                    .get(index)
                    .ok_or(FormatError::MissingArgument {
                        index,
                        supplied: args.len(),
                    })?;
                out.push_str(&arg.to_string());
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    out.push('}');
                } else {
                    // A bare closing brace outside any placeholder.
                    return Err(FormatError::Malformed { position: pos });
                }
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Consume the digits and closing brace of a placeholder that started at
/// `open` (whose `{` has already been consumed).
fn parse_index(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    open: usize,
) -> Result<usize, FormatError> {
    let mut digits = String::new();
    for (_, c) in chars.by_ref() {
        match c {
            '}' => {
                return digits
                    .parse::<usize>()
                    .map_err(|_| FormatError::Malformed { position: open });
            }
            d if d.is_ascii_digit() => digits.push(d),
            _ => return Err(FormatError::Malformed { position: open }),
        }
    }
    // Ran out of input before the closing brace.
    Err(FormatError::Malformed { position: open })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(pattern: &str, args: &[&dyn Display]) -> Result<String, FormatError> {
        format_pattern(pattern, args)
    }

    // ==================== Substitution Tests ====================

    #[test]
    fn test_single_placeholder() {
        assert_eq!(fmt("Howdy, {0}!", &[&"Alex"]).unwrap(), "Howdy, Alex!");
    }

    #[test]
    fn test_multiple_placeholders_in_order() {
        assert_eq!(fmt("{0} -> {1}", &[&"a", &"b"]).unwrap(), "a -> b");
    }

    #[test]
    fn test_placeholder_reuse_and_reorder() {
        assert_eq!(fmt("{1}{0}{1}", &[&"x", &"y"]).unwrap(), "yxy");
    }

    #[test]
    fn test_non_string_arguments() {
        assert_eq!(fmt("{0} of {1}", &[&3, &7.5]).unwrap(), "3 of 7.5");
    }

    #[test]
    fn test_unused_arguments_are_fine() {
        assert_eq!(fmt("plain", &[&"zzz"]).unwrap(), "plain");
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(fmt("{{0}} is {0}", &[&"one"]).unwrap(), "{0} is one");
        assert_eq!(fmt("a}}b", &[&0]).unwrap(), "a}b");
    }

    // ==================== Passthrough Tests ====================

    #[test]
    fn test_empty_args_returns_pattern_unchanged() {
        assert_eq!(fmt("Hello, {0}!", &[]).unwrap(), "Hello, {0}!");
    }

    #[test]
    fn test_empty_args_never_flags_malformed_patterns() {
        assert_eq!(fmt("bad={0", &[]).unwrap(), "bad={0");
        assert_eq!(fmt("{oops}", &[]).unwrap(), "{oops}");
        assert_eq!(fmt("}", &[]).unwrap(), "}");
    }

    // ==================== Failure Tests ====================

    #[test]
    fn test_unclosed_placeholder_is_malformed() {
        assert_eq!(
            fmt("{0", &[&"x"]).unwrap_err(),
            FormatError::Malformed { position: 0 }
        );
    }

    #[test]
    fn test_non_numeric_placeholder_is_malformed() {
        assert!(matches!(
            fmt("{name}", &[&"x"]).unwrap_err(),
            FormatError::Malformed { .. }
        ));
    }

    #[test]
    fn test_empty_placeholder_is_malformed() {
        assert!(matches!(
            fmt("{}", &[&"x"]).unwrap_err(),
            FormatError::Malformed { .. }
        ));
    }

    #[test]
    fn test_stray_closing_brace_is_malformed() {
        assert!(matches!(
            fmt("oops}", &[&"x"]).unwrap_err(),
            FormatError::Malformed { .. }
        ));
    }

    #[test]
    fn test_missing_argument() {
        assert_eq!(
            fmt("{0} and {3}", &[&"only"]).unwrap_err(),
            FormatError::MissingArgument {
                index: 3,
                supplied: 1
            }
        );
    }
}
