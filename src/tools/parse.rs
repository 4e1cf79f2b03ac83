//! Diagnostic-count extraction from analyzer output.
//!
//! Both parsers work on whitespace-separated, ASCII-lowercased tokens and
//! return the first matching summary line. A miss is not an error: the
//! counts stay at zero and `summary_found` is left false.

/// Error and warning counts extracted from one analyzer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagnosticCounts {
    /// Number of reported errors.
    pub errors: u32,
    /// Number of reported warnings.
    pub warnings: u32,
    /// Whether any summary pattern matched.
    pub summary_found: bool,
}

/// Parse clang-style `"<N> errors generated"` / `"<N> warnings generated"`
/// lines from stderr. Singular forms and any letter case are accepted.
pub fn parse_compiler_summary(stderr: &str) -> DiagnosticCounts {
    let lower = stderr.to_ascii_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();

    let errors = generated_count(&tokens, "error");
    let warnings = generated_count(&tokens, "warning");

    DiagnosticCounts {
        errors: errors.unwrap_or(0),
        warnings: warnings.unwrap_or(0),
        summary_found: errors.is_some() || warnings.is_some(),
    }
}

/// Parse the Frama-C kernel summary
/// `"Frama-C kernel: <N> errors <M> warnings"` from stdout.
pub fn parse_kernel_summary(stdout: &str) -> DiagnosticCounts {
    let lower = stdout.to_ascii_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();

    let found = tokens.windows(6).find_map(|w| {
        if !w[0].ends_with("frama-c") || w[1] != "kernel:" {
            return None;
        }
        if !is_noun(w[3], "error") || !w[5].starts_with("warning") {
            return None;
        }
        Some((parse_digits(w[2])?, parse_digits(w[4])?))
    });

    match found {
        Some((errors, warnings)) => DiagnosticCounts {
            errors,
            warnings,
            summary_found: true,
        },
        None => DiagnosticCounts::default(),
    }
}

/// Find `<digits> <noun>[s] generated` and return the count.
fn generated_count(tokens: &[&str], noun: &str) -> Option<u32> {
    tokens.windows(3).find_map(|w| {
        if is_noun(w[1], noun) && w[2].starts_with("generated") {
            trailing_number(w[0])
        } else {
            None
        }
    })
}

fn is_noun(token: &str, noun: &str) -> bool {
    token
        .strip_prefix(noun)
        .is_some_and(|rest| rest.is_empty() || rest == "s")
}

/// Parse the run of ASCII digits at the end of a token (`"(3"` gives 3).
fn trailing_number(token: &str) -> Option<u32> {
    let digits = token.bytes().rev().take_while(u8::is_ascii_digit).count();
    parse_digits(&token[token.len() - digits..])
}

/// Parse an all-digit token, saturating at `u32::MAX` so a huge count
/// still reads as "has diagnostics".
fn parse_digits(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(token.parse().unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_generated() {
        let counts = parse_compiler_summary("3 errors generated.\n");
        assert_eq!(counts.errors, 3);
        assert_eq!(counts.warnings, 0);
        assert!(counts.summary_found);
    }

    #[test]
    fn test_errors_and_warnings_generated() {
        let stderr = "\
foo.c:4:3: warning: Potential leak of memory pointed to by 'p' [unix.Malloc]
foo.c:9:5: error: use of undeclared identifier 'q'
2 warnings and 1 error generated.
";
        // Only the noun directly before "generated" is counted in the combined form.
        let counts = parse_compiler_summary(stderr);
        assert_eq!(counts.errors, 1);
        assert_eq!(counts.warnings, 0);
        assert!(counts.summary_found);

        let counts = parse_compiler_summary("1 warning generated.\n");
        assert_eq!(counts.warnings, 1);
    }

    #[test]
    fn test_case_insensitive_singular() {
        let counts = parse_compiler_summary("1 ERROR Generated\n12 Warnings GENERATED");
        assert_eq!(counts.errors, 1);
        assert_eq!(counts.warnings, 12);
    }

    #[test]
    fn test_no_summary_is_zero() {
        let counts = parse_compiler_summary("clang: error: no such file or directory: 'x.c'\n");
        assert_eq!(counts, DiagnosticCounts::default());
        assert!(!counts.summary_found);

        assert_eq!(parse_compiler_summary(""), DiagnosticCounts::default());
    }

    #[test]
    fn test_rejects_other_nouns() {
        let counts = parse_compiler_summary("4 errorsx generated");
        assert!(!counts.summary_found);
    }

    #[test]
    fn test_trailing_digits_of_token() {
        assert_eq!(trailing_number("(3"), Some(3));
        assert_eq!(trailing_number("42"), Some(42));
        assert_eq!(trailing_number("abc"), None);
        assert_eq!(parse_compiler_summary("x7 warnings generated").warnings, 7);
    }

    #[test]
    fn test_overflowing_count_saturates() {
        let counts = parse_compiler_summary("99999999999 warnings generated.\n");
        assert_eq!(counts.warnings, u32::MAX);
        assert!(counts.summary_found);

        let counts = parse_kernel_summary("Frama-C kernel: 0 errors 4294967296 warnings");
        assert_eq!(counts.warnings, u32::MAX);
    }

    #[test]
    fn test_kernel_summary() {
        let stdout = "\
[kernel] Parsing test.c (with preprocessing)
[eva] Analyzing a complete application starting at main
[kernel] Frama-C kernel: 0 errors 2 warnings
";
        let counts = parse_kernel_summary(stdout);
        assert_eq!(counts.errors, 0);
        assert_eq!(counts.warnings, 2);
        assert!(counts.summary_found);
    }

    #[test]
    fn test_kernel_summary_singular_and_case() {
        let counts = parse_kernel_summary("FRAMA-C Kernel: 1 error 1 warning");
        assert_eq!(counts.errors, 1);
        assert_eq!(counts.warnings, 1);
    }

    #[test]
    fn test_kernel_summary_missing() {
        let counts = parse_kernel_summary("[eva] done\n");
        assert_eq!(counts, DiagnosticCounts::default());
        // clang's pattern must not be picked up from stdout either
        assert!(!parse_kernel_summary("3 errors generated").summary_found);
    }
}
