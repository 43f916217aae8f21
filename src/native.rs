//! Reading the rollover constant back out of a native allocator header.
//!
//! Headers produced by the build script define `SCALENE_SAMPLEHEAP_NEWLINE`.
//! Hand-maintained allocator sources usually spell it as an enum or constexpr
//! member, `NEWLINE = 98821` or `NEWLINE = 98820 + 1`; both are accepted.
//! Comments are ignored. Anything else on the right-hand side, or more than
//! one declaration, is an error rather than a guess.

use crate::config::SyncedThreshold;
use crate::constants::{NATIVE_HEADER, NATIVE_NEWLINE_MACRO};
use crate::utils::error::{ConfigError, Result};
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const MEMBER_NAME: &str = "NEWLINE";

fn comment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("comment pattern is a valid regex")
    })
}

fn define_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*#[ \t]*define[ \t]+SCALENE_SAMPLEHEAP_NEWLINE\b([^\n]*)$")
            .expect("define pattern is a valid regex")
    })
}

// The value runs up to the next `;`, `,` or `}`; `==` is a comparison, not a
// declaration.
fn member_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\bNEWLINE\s*(==?)([^;,}]*)").expect("member pattern is a valid regex")
    })
}

fn expression_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([0-9]+)(?:\s*\+\s*([0-9]+))?\s*$")
            .expect("expression pattern is a valid regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeHeader {
    newline: u64,
}

impl NativeHeader {
    pub fn parse(source: &str) -> Result<Self> {
        let code = strip_comments(source);

        let defines: Vec<&str> = define_pattern()
            .captures_iter(&code)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();
        if !defines.is_empty() {
            let expression = single(NATIVE_NEWLINE_MACRO, defines)?;
            let newline = evaluate(NATIVE_NEWLINE_MACRO, expression)?;
            return Ok(Self { newline });
        }

        let members: Vec<&str> = member_pattern()
            .captures_iter(&code)
            .filter(|caps| &caps[1] == "=")
            .filter_map(|caps| caps.get(2).map(|m| m.as_str()))
            .collect();
        if !members.is_empty() {
            let expression = single(MEMBER_NAME, members)?;
            let newline = evaluate(MEMBER_NAME, expression)?;
            return Ok(Self { newline });
        }

        Err(ConfigError::NativeConstantMissing {
            name: NATIVE_NEWLINE_MACRO.to_string(),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::debug!("reading native header {}", path.as_ref().display());
        let content = fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    /// The header this crate was built with.
    pub fn generated() -> Result<Self> {
        Self::parse(NATIVE_HEADER)
    }

    pub fn newline(&self) -> u64 {
        self.newline
    }

    pub fn verify(&self, threshold: &SyncedThreshold) -> Result<()> {
        threshold.verify_rollover(self.newline)
    }
}

// Comments become a single space so tokens on either side stay apart.
fn strip_comments(source: &str) -> Cow<'_, str> {
    comment_pattern().replace_all(source, " ")
}

fn single<'a>(name: &str, candidates: Vec<&'a str>) -> Result<&'a str> {
    match candidates.as_slice() {
        [only] => Ok(*only),
        _ => {
            tracing::warn!("{} is declared {} times", name, candidates.len());
            Err(ConfigError::NativeConstantAmbiguous {
                name: name.to_string(),
                count: candidates.len(),
            })
        }
    }
}

fn evaluate(name: &str, expression: &str) -> Result<u64> {
    let invalid = |reason: String| ConfigError::InvalidConfigValueError {
        field: name.to_string(),
        value: expression.trim().to_string(),
        reason,
    };

    let caps = expression_pattern()
        .captures(expression)
        .ok_or_else(|| invalid("Expected a count or a sum of two counts".to_string()))?;
    let base: u64 = caps[1]
        .parse()
        .map_err(|e| invalid(format!("Not a valid count: {}", e)))?;
    let offset: u64 = match caps.get(2) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|e| invalid(format!("Not a valid count: {}", e)))?,
        None => 0,
    };
    base.checked_add(offset).ok_or_else(|| invalid("Value overflows u64".to_string()))
}

/// Writes the generated header to `path`, creating parent directories.
pub fn write_native_header<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, NATIVE_HEADER)?;
    tracing::info!("wrote native header to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(source: &str) -> u64 {
        NativeHeader::parse(source).unwrap().newline()
    }

    #[test]
    fn test_parse_define() {
        assert_eq!(parsed("#pragma once\n#define SCALENE_SAMPLEHEAP_NEWLINE 98821\n"), 98821);
        assert_eq!(parsed("  #  define SCALENE_SAMPLEHEAP_NEWLINE 98821\r\n"), 98821);
    }

    #[test]
    fn test_parse_enum_member() {
        assert_eq!(parsed("class SampleHeap {\n  enum { NEWLINE = 98820 + 1 };\n};\n"), 98821);
        assert_eq!(parsed("static constexpr uint64_t NEWLINE = 98821;"), 98821);
        assert_eq!(parsed("enum { NEWLINE = 98821, OTHER = 3 };"), 98821);
    }

    #[test]
    fn test_define_wins_over_member() {
        let source = "#define SCALENE_SAMPLEHEAP_NEWLINE 100\nenum { NEWLINE = 200 };\n";
        assert_eq!(parsed(source), 100);
    }

    #[test]
    fn test_unsupported_expression_is_rejected() {
        for source in [
            "enum { NEWLINE = 98821 * 2 };",
            "enum { NEWLINE = 98820 + 1 + 1 };",
            "enum { NEWLINE = 0x18205 };",
            "#define SCALENE_SAMPLEHEAP_NEWLINE 98821 * 2",
            "#define SCALENE_SAMPLEHEAP_NEWLINE",
        ] {
            match NativeHeader::parse(source) {
                Err(ConfigError::InvalidConfigValueError { .. }) => {}
                other => panic!("{:?} should be rejected, got {:?}", source, other),
            }
        }
    }

    #[test]
    fn test_comments_are_ignored() {
        assert_eq!(parsed("// old: NEWLINE = 98821\nenum { NEWLINE = 5 };"), 5);
        assert_eq!(parsed("/* NEWLINE = 98821; */ enum { NEWLINE = 7 };"), 7);
        assert_eq!(
            parsed("#define SCALENE_SAMPLEHEAP_NEWLINE 98821 // keep in sync\n"),
            98821
        );
        assert!(matches!(
            NativeHeader::parse("// #define SCALENE_SAMPLEHEAP_NEWLINE 98821\n"),
            Err(ConfigError::NativeConstantMissing { .. })
        ));
    }

    #[test]
    fn test_multiple_declarations_are_ambiguous() {
        let source = "enum { NEWLINE = 98821 };\nstatic constexpr int NEWLINE = 98821;";
        assert!(matches!(
            NativeHeader::parse(source),
            Err(ConfigError::NativeConstantAmbiguous { count: 2, .. })
        ));

        let source = "#define SCALENE_SAMPLEHEAP_NEWLINE 1\n#define SCALENE_SAMPLEHEAP_NEWLINE 2\n";
        assert!(matches!(
            NativeHeader::parse(source),
            Err(ConfigError::NativeConstantAmbiguous { count: 2, .. })
        ));
    }

    #[test]
    fn test_comparison_is_not_a_declaration() {
        let source = "enum { NEWLINE = 98821 };\nif (NEWLINE == count) { reset(); }";
        assert_eq!(parsed(source), 98821);
    }

    #[test]
    fn test_missing_constant() {
        let err = NativeHeader::parse("x = SampleHeap<>::NEWLINE - 1;").unwrap_err();
        assert!(matches!(err, ConfigError::NativeConstantMissing { .. }));
    }

    #[test]
    fn test_overflowing_sum() {
        assert!(matches!(
            NativeHeader::parse("NEWLINE = 18446744073709551615 + 1"),
            Err(ConfigError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_verify_detects_drift() {
        let threshold = SyncedThreshold::new(98820);
        let header = NativeHeader::parse("enum { NEWLINE = 98822 };").unwrap();
        assert!(matches!(
            header.verify(&threshold),
            Err(ConfigError::NativeDriftError {
                expected: 98821,
                found: 98822
            })
        ));
        assert!(NativeHeader::parse("enum { NEWLINE = 98821 * 2 };").is_err());
    }
}
