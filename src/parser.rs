use std::fs;
use std::path::Path;

use log::trace;

use crate::error::{Result, TldError};
use crate::types::RuleRecord;

/// Comment marker used by public suffix lists
const COMMENT_PREFIX: &str = "//";

/// Exception rule marker
const EXCEPTION_PREFIX: char = '!';

/// Parse public suffix rules from text, one rule per line.
///
/// Empty lines, `//` comments and lines that cannot be ASCII-encoded are
/// skipped without error.
pub fn parse_rules(text: &str) -> Vec<RuleRecord> {
    text.lines().filter_map(parse_rule_line).collect()
}

/// Parse public suffix rules from a file.
pub fn parse_rules_from_file(path: impl AsRef<Path>) -> Result<Vec<RuleRecord>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        TldError::ParseError(format!(
            "Failed to read rules file '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(parse_rules(&text))
}

/// Parse a single rule line.
///
/// Returns `None` for blank lines, comments and malformed rules.
pub fn parse_rule_line(line: &str) -> Option<RuleRecord> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
        return None;
    }

    // Only the text up to the first whitespace is the rule
    let token = line.split_whitespace().next()?;

    let (is_exception, body) = match token.strip_prefix(EXCEPTION_PREFIX) {
        Some(rest) => (true, rest),
        None => (false, token),
    };

    let mut labels = Vec::new();
    for label in body.split('.') {
        match encode_label(label) {
            Some(encoded) => labels.push(encoded),
            None => {
                trace!("Skipping malformed rule: {}", line);
                return None;
            }
        }
    }
    labels.reverse();

    let joined = labels.iter().rev().cloned().collect::<Vec<_>>().join(".");
    let source = if is_exception {
        format!("{}{}", EXCEPTION_PREFIX, joined)
    } else {
        joined
    };

    Some(RuleRecord {
        is_exception,
        source,
        labels,
    })
}

/// Lower-case and punycode-encode one rule label.
fn encode_label(label: &str) -> Option<String> {
    if label.is_empty() {
        return None;
    }
    if label.is_ascii() {
        return Some(label.to_ascii_lowercase());
    }
    match idna::domain_to_ascii(label) {
        Ok(encoded) if !encoded.is_empty() && !encoded.contains('.') => Some(encoded),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(rule: &RuleRecord) -> Vec<&str> {
        rule.labels.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_parse_simple_rule() {
        let rule = parse_rule_line("co.uk").unwrap();
        assert!(!rule.is_exception);
        assert_eq!(rule.source, "co.uk");
        assert_eq!(labels(&rule), vec!["uk", "co"]);
    }

    #[test]
    fn test_parse_exception() {
        let rule = parse_rule_line("!www.ck").unwrap();
        assert!(rule.is_exception);
        assert_eq!(rule.source, "!www.ck");
        assert_eq!(labels(&rule), vec!["ck", "www"]);
    }

    #[test]
    fn test_parse_wildcard() {
        let rule = parse_rule_line("*.kawasaki.jp").unwrap();
        assert!(!rule.is_exception);
        assert!(rule.is_wildcard());
        assert_eq!(labels(&rule), vec!["jp", "kawasaki", "*"]);
    }

    #[test]
    fn test_skip_empty_and_comments() {
        assert!(parse_rule_line("").is_none());
        assert!(parse_rule_line("   \t ").is_none());
        assert!(parse_rule_line("// ===BEGIN ICANN DOMAINS===").is_none());
        assert!(parse_rule_line("  // indented comment").is_none());
    }

    #[test]
    fn test_parse_up_to_first_whitespace() {
        let rule = parse_rule_line("co.uk .evil").unwrap();
        assert_eq!(labels(&rule), vec!["uk", "co"]);

        let rule = parse_rule_line("com\tsome annotation").unwrap();
        assert_eq!(labels(&rule), vec!["com"]);
    }

    #[test]
    fn test_parse_lowercases_ascii() {
        let rule = parse_rule_line("CO.UK").unwrap();
        assert_eq!(rule.source, "co.uk");
        assert_eq!(labels(&rule), vec!["uk", "co"]);
    }

    #[test]
    fn test_parse_punycode_encodes_unicode_labels() {
        let rule = parse_rule_line("台灣").unwrap();
        assert_eq!(labels(&rule), vec!["xn--kpry57d"]);
        assert_eq!(rule.source, "xn--kpry57d");
    }

    #[test]
    fn test_parse_skips_empty_labels() {
        assert!(parse_rule_line("co..uk").is_none());
        assert!(parse_rule_line(".com").is_none());
        assert!(parse_rule_line("!").is_none());
    }

    #[test]
    fn test_parse_multiple_rules() {
        let text = r#"
// ck : https://en.wikipedia.org/wiki/.ck
*.ck
!www.ck

// uk
uk
co.uk
"#;
        let rules = parse_rules(text);
        assert_eq!(rules.len(), 4);
        assert_eq!(rules.iter().filter(|r| r.is_exception).count(), 1);
        assert_eq!(rules[3].source, "co.uk");
    }

    #[test]
    fn test_parse_file() {
        use std::io::Write;
        let dir = std::env::temp_dir().join("tld_engine_parser_test");
        let _ = fs::create_dir_all(&dir);
        let file_path = dir.join("rules.dat");
        let mut f = fs::File::create(&file_path).unwrap();
        writeln!(f, "// comment").unwrap();
        writeln!(f, "com").unwrap();
        writeln!(f, "!city.kawasaki.jp").unwrap();
        drop(f);

        let rules = parse_rules_from_file(&file_path).unwrap();
        assert_eq!(rules.len(), 2);
        assert!(rules[1].is_exception);

        let _ = fs::remove_file(&file_path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_parse_file_not_found() {
        let result = parse_rules_from_file("/nonexistent/path/rules.dat");
        assert!(matches!(result, Err(TldError::ParseError(_))));
    }
}
