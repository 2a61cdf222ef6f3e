//! Handlebars-style templates used by regex managers.
//!
//! The update automation tool computes some outputs of a regex manager
//! (`datasourceTemplate`, `versioningTemplate`, ...) from the named capture
//! groups of its patterns. This module provides two things:
//!
//! - [`template_references`] finds which capture groups a template reads, so
//!   the validator can reject templates that read groups the patterns never
//!   produce.
//! - [`TemplateRenderer`] renders a template against captured values, which
//!   the extraction preview uses to show what the tool would compute.
//!
//! # Examples
//!
//! ```rust
//! use renovate_config::templates::{template_references, TemplateRenderer};
//! use std::collections::BTreeMap;
//!
//! let template = "{{#if versioning}}{{versioning}}{{else}}semver{{/if}}";
//! let references = template_references(template).unwrap();
//! assert!(references.contains("versioning"));
//!
//! let renderer = TemplateRenderer::new();
//! let rendered = renderer.render(template, &BTreeMap::<String, String>::new()).unwrap();
//! assert_eq!(rendered, "semver");
//! ```

use handlebars::{handlebars_helper, Handlebars};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
#[path = "templates_tests.rs"]
mod tests;

/// The template does not parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Template syntax error: {message}")]
pub struct TemplateSyntaxError {
    pub message: String,
}

/// Rendering a template failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Template rendering failed: {message}")]
pub struct TemplateRenderError {
    pub message: String,
}

/// Checks that the template parses.
pub fn check_template_syntax(template: &str) -> Result<(), TemplateSyntaxError> {
    let mut registry = Handlebars::new();
    registry
        .register_template_string("template", template)
        .map_err(|e| TemplateSyntaxError {
            message: e.to_string(),
        })
}

/// Returns the root names of all variables a template reads.
///
/// Helper names, literals, `this`, `@`-data variables and hash keys are not
/// variables. For a path such as `dep.name` only the root (`dep`) is
/// returned, since capture groups are flat. The contents of raw blocks
/// (`{{{{raw}}}}...{{{{/raw}}}}`) are literal text.
///
/// # Errors
///
/// Returns `TemplateSyntaxError` if the template does not parse.
pub fn template_references(template: &str) -> Result<BTreeSet<String>, TemplateSyntaxError> {
    check_template_syntax(template)?;

    let mut references = BTreeSet::new();
    for captures in tag_regex().captures_iter(&strip_raw_blocks(template)) {
        let inner = captures.get(1).map_or("", |m| m.as_str()).trim();
        collect_tag_references(inner, &mut references);
    }

    debug!(
        message = "Collected template references",
        template = template,
        references = ?references
    );
    Ok(references)
}

/// Removes raw blocks, including their open and close tags.
fn strip_raw_blocks(template: &str) -> String {
    let mut stripped = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{{{") {
        let after_open = &rest[start + 4..];
        let Some(open_end) = after_open.find("}}}}") else {
            break;
        };

        stripped.push_str(&rest[..start]);
        let name = after_open[..open_end]
            .split_whitespace()
            .next()
            .unwrap_or_default();
        let closing = ["{{{{/", name, "}}}}"].concat();
        let body = &after_open[open_end + 4..];
        rest = match body.find(&closing) {
            Some(end) => &body[end + closing.len()..],
            None => "",
        };
    }

    stripped.push_str(rest);
    stripped
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r"(?s)\{\{\{?~?(.*?)~?\}?\}\}").expect("tag pattern is a valid regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Literal,
    Open,
    Close,
}

fn collect_tag_references(inner: &str, references: &mut BTreeSet<String>) {
    if inner.is_empty() || inner.starts_with('!') || inner.starts_with('/') || inner.starts_with('>')
    {
        return;
    }

    if let Some(rest) = inner.strip_prefix('#').or_else(|| inner.strip_prefix('^')) {
        let rest = rest.trim_start();
        if rest.starts_with('>') || rest.starts_with('*') {
            return;
        }
        collect_expression_references(&tokenize(rest), references);
        return;
    }

    if inner == "else" {
        return;
    }
    if let Some(rest) = inner.strip_prefix("else ") {
        collect_expression_references(&tokenize(rest.trim_start()), references);
        return;
    }

    collect_expression_references(&tokenize(inner), references);
}

/// A lone word is a variable; otherwise the first word names a helper and
/// the remaining tokens are its parameters.
fn collect_expression_references(tokens: &[Token], references: &mut BTreeSet<String>) {
    match tokens {
        [] => {}
        [Token::Word(word)] => add_reference(word, references),
        [Token::Word(_helper), params @ ..] => collect_param_references(params, references),
        params => collect_param_references(params, references),
    }
}

fn collect_param_references(tokens: &[Token], references: &mut BTreeSet<String>) {
    let mut after_open = false;
    for token in tokens {
        match token {
            Token::Open => after_open = true,
            // Subexpression helper name.
            Token::Word(_) if after_open => after_open = false,
            // Block parameters (`as |item|`) declare names, they do not read them.
            Token::Word(word) if word == "as" => break,
            Token::Word(word) => {
                let value = match word.split_once('=') {
                    Some((_key, value)) => value,
                    None => word.as_str(),
                };
                add_reference(value, references);
            }
            Token::Literal | Token::Close => after_open = false,
        }
    }
}

fn add_reference(word: &str, references: &mut BTreeSet<String>) {
    let mut path = word;
    loop {
        if let Some(rest) = path.strip_prefix("../") {
            path = rest;
        } else if let Some(rest) = path.strip_prefix("./") {
            path = rest;
        } else if let Some(rest) = path.strip_prefix("this.") {
            path = rest;
        } else if let Some(rest) = path.strip_prefix("this/") {
            path = rest;
        } else {
            break;
        }
    }

    if path.is_empty() || path == "this" || path.starts_with('@') || is_literal(path) {
        return;
    }

    let root = path
        .split(['.', '/', '['])
        .next()
        .unwrap_or_default();
    if !root.is_empty() {
        references.insert(root.to_string());
    }
}

fn is_literal(word: &str) -> bool {
    matches!(word, "true" | "false" | "null" | "undefined") || word.parse::<f64>().is_ok()
}

fn tokenize(expression: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '(' {
            chars.next();
            tokens.push(Token::Open);
        } else if c == ')' {
            chars.next();
            tokens.push(Token::Close);
        } else if c == '"' || c == '\'' {
            chars.next();
            for next in chars.by_ref() {
                if next == c {
                    break;
                }
            }
            tokens.push(Token::Literal);
        } else {
            let mut word = String::new();
            while let Some(&next) = chars.peek() {
                if next.is_whitespace() || next == '(' || next == ')' {
                    break;
                }
                if (next == '"' || next == '\'') && word.ends_with('=') {
                    break;
                }
                word.push(next);
                chars.next();
            }
            tokens.push(Token::Word(word));
        }
    }

    tokens
}

handlebars_helper!(lowercase: |value: str| value.to_lowercase());
handlebars_helper!(equals: |left: Json, right: Json| left == right);
handlebars_helper!(contains_string: |value: str, needle: str| value.contains(needle));
handlebars_helper!(replace: |find: str, replacement: str, value: str| {
    match Regex::new(find) {
        Ok(re) => re.replace_all(value, replacement).into_owned(),
        Err(_) => value.to_string(),
    }
});

/// Renders regex manager templates against captured values.
///
/// Output is not HTML-escaped, undefined variables render as empty strings
/// and are falsy in `{{#if}}`, and the `lowercase`, `equals`,
/// `containsString` and `replace` helpers are available.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("lowercase", Box::new(lowercase));
        handlebars.register_helper("equals", Box::new(equals));
        handlebars.register_helper("containsString", Box::new(contains_string));
        handlebars.register_helper("replace", Box::new(replace));
        Self { handlebars }
    }

    /// Renders `template` with `data` as the root context.
    ///
    /// # Errors
    ///
    /// Returns `TemplateRenderError` if the template does not parse or a
    /// helper fails.
    pub fn render<T: Serialize>(
        &self,
        template: &str,
        data: &T,
    ) -> Result<String, TemplateRenderError> {
        self.handlebars
            .render_template(template, data)
            .map_err(|e| TemplateRenderError {
                message: e.to_string(),
            })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
