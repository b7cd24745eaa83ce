//! Regex-based extraction over groovy bodies
//!
//! This is pattern matching, not parsing. Only literal call arguments are seen:
//! a call whose argument is a variable, a concatenation or an interpolated
//! GString (`findTestObject(prefix + '/btn')`) is missed, as is a keyword
//! declaration separated from its `@Keyword` annotation by a comment.

use crate::model::{Keyword, ScriptCalls};
use regex::Regex;

/// Compiled patterns shared by the keyword, script and test-suite parsers
pub struct ScriptScanner {
    package_pattern: Regex,
    import_pattern: Regex,
    keyword_pattern: Regex,
    test_object_pattern: Regex,
    test_case_pattern: Regex,
    custom_keyword_pattern: Regex,
}

impl ScriptScanner {
    pub fn new() -> Self {
        // Match: package com.example.keywords
        let package_pattern = Regex::new(r"^package\s+(\S+)").expect("package pattern");

        // Match: import com.kms.katalon.core.model.FailureHandling as FailureHandling
        let import_pattern =
            Regex::new(r"^import\s+(.+?)(?:\s+as\s+\w+)?$").expect("import pattern");

        // Match: @Keyword [more annotations] [modifiers/return type] name(
        let keyword_pattern = Regex::new(
            r"@Keyword\b(?:\s*\([^)]*\))?\s+(?:@\w+(?:\s*\([^)]*\))?\s+)*(?:[\w.\[\]<>?,]+\s+)*?(\w+)\s*\(",
        )
        .expect("keyword pattern");

        // Match: findTestObject('Page_Login/btn_Submit') or findTestObject("...", [...])
        let test_object_pattern = Regex::new(r#"findTestObject\(\s*["']([^"']+)["']\s*[,)]"#)
            .expect("test object pattern");

        // Match: findTestCase('Test Cases/Login')
        let test_case_pattern = Regex::new(r#"findTestCase\(\s*["']([^"']+)["']\s*[,)]"#)
            .expect("test case pattern");

        // Match: CustomKeywords.'com.example.Helper.login'
        let custom_keyword_pattern = Regex::new(r#"CustomKeywords\.(?:'([^']+)'|"([^"]+)")"#)
            .expect("custom keyword pattern");

        Self {
            package_pattern,
            import_pattern,
            keyword_pattern,
            test_object_pattern,
            test_case_pattern,
            custom_keyword_pattern,
        }
    }

    /// Package from the first `package` line, or an empty string
    pub fn package(&self, content: &str) -> String {
        content
            .lines()
            .find_map(|line| {
                self.package_pattern
                    .captures(line.trim())
                    .map(|caps| caps[1].trim_end_matches(';').to_string())
            })
            .unwrap_or_default()
    }

    /// Import paths in file order, without any `as` alias
    pub fn imports(&self, content: &str) -> Vec<String> {
        content
            .lines()
            .filter_map(|line| {
                self.import_pattern
                    .captures(line.trim())
                    .map(|caps| caps[1].to_string())
            })
            .collect()
    }

    /// `@Keyword` annotated method declarations
    pub fn keywords(&self, content: &str) -> Vec<Keyword> {
        self.keyword_pattern
            .captures_iter(content)
            .filter_map(|caps| {
                let open = caps.get(0)?.end();
                Some(Keyword {
                    name: caps[1].to_string(),
                    parameters: parameter_names(parameter_list(content, open)?),
                })
            })
            .collect()
    }

    pub fn test_object_calls(&self, content: &str) -> Vec<String> {
        first_group(&self.test_object_pattern, content)
    }

    pub fn test_case_calls(&self, content: &str) -> Vec<String> {
        first_group(&self.test_case_pattern, content)
    }

    pub fn custom_keyword_calls(&self, content: &str) -> Vec<String> {
        self.custom_keyword_pattern
            .captures_iter(content)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Every reference kind at once
    pub fn calls(&self, content: &str) -> ScriptCalls {
        ScriptCalls {
            imports: self.imports(content),
            test_object_calls: self.test_object_calls(content),
            test_case_calls: self.test_case_calls(content),
            custom_keyword_calls: self.custom_keyword_calls(content),
        }
    }
}

impl Default for ScriptScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn first_group(pattern: &Regex, content: &str) -> Vec<String> {
    pattern
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Tracks whether a character scan is inside a quoted string literal
#[derive(Default)]
struct StringLiterals {
    quote: Option<char>,
    escaped: bool,
}

impl StringLiterals {
    /// Feed the next character; `true` when it belongs to a literal
    fn skip(&mut self, c: char) -> bool {
        match self.quote {
            Some(q) => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == q {
                    self.quote = None;
                }
                true
            }
            None if c == '\'' || c == '"' => {
                self.quote = Some(c);
                true
            }
            None => false,
        }
    }
}

/// Text between the `(` ending at `open` and its matching `)`.
///
/// Parentheses inside quoted strings are ignored. `None` when the list is
/// never closed.
fn parameter_list(content: &str, open: usize) -> Option<&str> {
    let rest = &content[open..];
    let mut depth = 0usize;
    let mut strings = StringLiterals::default();

    for (i, c) in rest.char_indices() {
        if strings.skip(c) {
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(&rest[..i]),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Names from a parameter list, dropping types and default values.
///
/// `String user, Map<String, Object> opts = [:]` yields `["user", "opts"]`.
fn parameter_names(params: &str) -> Vec<String> {
    split_top_level(params)
        .into_iter()
        .filter_map(|param| {
            let declaration = param.split('=').next().unwrap_or("").trim();
            let name = declaration
                .split_whitespace()
                .last()?
                .trim_matches(|c: char| !(c.is_alphanumeric() || c == '_'));
            match name.chars().next() {
                Some(c) if c.is_alphabetic() || c == '_' => Some(name.to_string()),
                _ => None,
            }
        })
        .collect()
}

/// Split on commas that are not nested inside brackets or quoted strings
fn split_top_level(params: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut strings = StringLiterals::default();

    for (i, c) in params.char_indices() {
        if strings.skip(c) {
            continue;
        }
        match c {
            '<' | '[' | '(' => depth += 1,
            '>' | ']' | ')' => depth -= 1,
            ',' if depth <= 0 => {
                parts.push(&params[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&params[start..]);
    parts
}

/// `true` when `marker` appears as a whole annotation name, so `@TearDown`
/// is not found inside `@TearDownTestCase`
pub fn has_annotation(content: &str, marker: &str) -> bool {
    content.match_indices(marker).any(|(i, _)| {
        content[i + marker.len()..]
            .chars()
            .next()
            .map(|c| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(true)
    })
}
