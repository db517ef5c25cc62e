//! Declared dependencies of a single source file.
//!
//! The dependency engine never parses sources itself. It asks a
//! [`LanguageOracle`] for the names a file declares and resolves those names
//! separately. [`AttributeScanner`] is a form-splitting implementation that
//! only understands the module attributes that create build-order edges:
//!
//! ```text
//! -include("defs.hrl").
//! -include_lib("app/include/records.hrl").
//! -compile({parse_transform, lager_transform}).
//! -behaviour(gen_server).
//! ```

use std::path::PathBuf;

use ordo_core::artifact::Artifact;
use ordo_util::errors::{OrdoError, OrdoResult};

/// Names a source file declares, before resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// Include paths exactly as written.
    pub includes: Vec<String>,
    /// Compile-time transform module names.
    pub transforms: Vec<String>,
    /// Implemented interface (behaviour) module names.
    pub interfaces: Vec<String>,
}

impl Declarations {
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.transforms.is_empty() && self.interfaces.is_empty()
    }
}

/// Source of declared dependency names.
pub trait LanguageOracle {
    fn declarations(&self, artifact: &Artifact) -> OrdoResult<Declarations>;
}

/// Reads module attributes from source text.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeScanner;

impl LanguageOracle for AttributeScanner {
    fn declarations(&self, artifact: &Artifact) -> OrdoResult<Declarations> {
        let bytes = std::fs::read(&artifact.path).map_err(|e| OrdoError::Oracle {
            path: PathBuf::from(&artifact.path),
            message: e.to_string(),
        })?;
        // Attribute syntax is ASCII; Latin-1 sources only lose their comments.
        Ok(scan(&String::from_utf8_lossy(&bytes)))
    }
}

/// Extract declarations from source text.
///
/// Comments are stripped, then the text is split into forms at each `.`
/// followed by whitespace or the end of input. Forms may span lines and a
/// line may hold several forms. An unterminated trailing form is ignored.
pub fn scan(source: &str) -> Declarations {
    let mut decls = Declarations::default();
    let code = source.lines().map(strip_comment).collect::<Vec<_>>().join("\n");
    for form in split_forms(&code) {
        let form = form.trim();
        if form.starts_with('-') {
            parse_attribute(form, &mut decls);
        }
    }
    decls
}

/// Terminated forms of `code`, each ending with its `.`.
fn split_forms(code: &str) -> Vec<&str> {
    let mut forms = Vec::new();
    let mut start = 0;
    let mut lexer = Lexer::default();
    let mut chars = code.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !lexer.is_code(c) || c != '.' {
            continue;
        }
        let ends_form = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
        if ends_form {
            forms.push(&code[start..=i]);
            start = i + 1;
        }
    }
    forms
}

/// Tracks whether a character is inside a string, a quoted atom or a
/// `$c` character literal.
#[derive(Default)]
struct Lexer {
    in_string: bool,
    in_atom: bool,
    escaped: bool,
}

impl Lexer {
    /// Feed `c`; true when it is plain code outside any literal.
    fn is_code(&mut self, c: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        match c {
            '\\' if self.in_string || self.in_atom => {
                self.escaped = true;
                false
            }
            '$' if !self.in_string && !self.in_atom => {
                self.escaped = true;
                false
            }
            '"' if !self.in_atom => {
                self.in_string = !self.in_string;
                false
            }
            '\'' if !self.in_string => {
                self.in_atom = !self.in_atom;
                false
            }
            _ => !self.in_string && !self.in_atom,
        }
    }
}

fn parse_attribute(form: &str, decls: &mut Declarations) {
    let Some(body) = form.strip_prefix('-') else {
        return;
    };
    let Some(open) = body.find('(') else {
        return;
    };
    let Some(close) = body.rfind(')') else {
        return;
    };
    if close < open {
        return;
    }
    let name = body[..open].trim();
    let args = body[open + 1..close].trim();

    match name {
        "include" | "include_lib" => {
            if let Some(path) = unquote(args, '"') {
                decls.includes.push(path.to_string());
            }
        }
        "behaviour" | "behavior" => {
            if let Some(atom) = read_atom(args) {
                decls.interfaces.push(atom);
            }
        }
        "compile" => {
            let mut rest = args;
            while let Some(pos) = rest.find("parse_transform") {
                rest = &rest[pos + "parse_transform".len()..];
                let after = rest.trim_start();
                if let Some(after_comma) = after.strip_prefix(',') {
                    if let Some(atom) = read_atom(after_comma.trim_start()) {
                        decls.transforms.push(atom);
                    }
                }
            }
        }
        _ => {}
    }
}

/// Read a bare or single-quoted atom from the start of `text`.
fn read_atom(text: &str) -> Option<String> {
    let text = text.trim_start();
    if let Some(quoted) = text.strip_prefix('\'') {
        let end = quoted.find('\'')?;
        return Some(quoted[..end].to_string());
    }
    let atom: String = text
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '@')
        .collect();
    if atom.is_empty() {
        None
    } else {
        Some(atom)
    }
}

fn unquote(text: &str, quote: char) -> Option<&str> {
    text.strip_prefix(quote)?.strip_suffix(quote)
}

/// Drop a trailing `%` comment, ignoring `%` inside string or atom quotes.
fn strip_comment(line: &str) -> &str {
    let mut lexer = Lexer::default();
    for (i, c) in line.char_indices() {
        if lexer.is_code(c) && c == '%' {
            return &line[..i];
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_comment_keeps_percent_in_strings() {
        assert_eq!(strip_comment("-include(\"a%b.hrl\"). % note"), "-include(\"a%b.hrl\"). ");
        assert_eq!(strip_comment("%% header"), "");
    }

    #[test]
    fn strip_comment_skips_character_literals() {
        assert_eq!(strip_comment("X = $%, % real"), "X = $%, ");
    }

    #[test]
    fn split_forms_on_one_line() {
        let code = "-include(\"a.hrl\"). -include(\"b.hrl\").\nf() -> 1.5.";
        assert_eq!(
            split_forms(code),
            vec!["-include(\"a.hrl\").", " -include(\"b.hrl\").", "\nf() -> 1.5."]
        );
    }

    #[test]
    fn read_atom_handles_quotes() {
        assert_eq!(read_atom("'my transform'}"), Some("my transform".to_string()));
        assert_eq!(read_atom("lager_transform})"), Some("lager_transform".to_string()));
        assert_eq!(read_atom("{x}"), None);
    }
}
