//! Reader for the text variant of the AngelCode bitmap-font format.
//
//  Line grammar (informal):
//
//      line   ::= TAG attr*
//      attr   ::= KEY '=' value
//      value  ::= '"' [^"]* '"' | [^ \t]+
//
//  The tag selects the line kind (`info`, `common`, `page`, `chars`,
//  `char`, `kernings`, `kerning`). Only `info`, `page` and `char` carry
//  data the converter needs; the others are skipped.

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use log::{debug, warn};

use crate::error::{ConvertError, Result, read_input};
use crate::model::font::{FontDescriptor, Glyph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word, normally the line tag.
    Word(String),
    /// `key=value`, with surrounding quotes removed from the value.
    Attr(String, String),
}

#[derive(Clone)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            chars: line.chars().peekable(),
        }
    }

    fn consume_while<F: Fn(char) -> bool>(&mut self, pred: F, buf: &mut String) {
        while let Some(&c) = self.chars.peek() {
            if pred(c) {
                buf.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn read_quoted(&mut self) -> std::result::Result<String, String> {
        let mut txt = String::new();
        for c in self.chars.by_ref() {
            if c == '"' {
                return Ok(txt);
            }
            txt.push(c);
        }
        Err("no closing \" found".into())
    }
}

impl Iterator for Lexer<'_> {
    type Item = std::result::Result<Token, String>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
        self.chars.peek()?;

        let mut key = String::new();
        self.consume_while(|c| !c.is_whitespace() && c != '=', &mut key);

        if self.chars.peek() != Some(&'=') {
            return Some(Ok(Token::Word(key)));
        }
        self.chars.next();

        let value = if self.chars.peek() == Some(&'"') {
            self.chars.next();
            match self.read_quoted() {
                Ok(v) => v,
                Err(e) => return Some(Err(format!("attribute `{key}`: {e}"))),
            }
        } else {
            let mut v = String::new();
            self.consume_while(|c| !c.is_whitespace(), &mut v);
            v
        };

        Some(Ok(Token::Attr(key, value)))
    }
}

/// Attributes of one line, in source order.
struct Line {
    number: usize,
    attrs: Vec<(String, String)>,
}

impl Line {
    fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn require(&self, key: &str, source: &Path) -> Result<&str> {
        self.get(key).ok_or_else(|| {
            ConvertError::malformed(
                source,
                format!("line {}: missing attribute `{key}`", self.number),
            )
        })
    }

    fn int(&self, key: &str, source: &Path) -> Result<i64> {
        let raw = self.require(key, source)?;
        raw.parse().map_err(|_| {
            ConvertError::malformed(
                source,
                format!("line {}: `{key}={raw}` is not an integer", self.number),
            )
        })
    }
}

pub fn read_font(path: &Path) -> Result<FontDescriptor> {
    let text = read_input(path)?;
    parse_font(&text, path)
}

/// Parse a whole `.fnt` file. `source` is only used in error messages.
pub fn parse_font(text: &str, source: &Path) -> Result<FontDescriptor> {
    let mut face: Option<String> = None;
    let mut page_file: Option<String> = None;
    let mut glyphs = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let number = idx + 1;
        let tokens: Vec<Token> = Lexer::new(raw_line)
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| ConvertError::malformed(source, format!("line {number}: {e}")))?;

        let mut tokens = tokens.into_iter();
        let tag = match tokens.next() {
            Some(Token::Word(tag)) => tag,
            Some(Token::Attr(key, _)) => {
                return Err(ConvertError::malformed(
                    source,
                    format!("line {number}: expected a line tag, found `{key}=`"),
                ));
            }
            None => continue,
        };

        let line = Line {
            number,
            attrs: tokens
                .filter_map(|t| match t {
                    Token::Attr(k, v) => Some((k, v)),
                    Token::Word(_) => None,
                })
                .collect(),
        };

        match tag.as_str() {
            "info" => face = Some(line.require("face", source)?.to_string()),
            "page" => {
                let file = line.require("file", source)?;
                if page_file.is_some() {
                    warn!("{}: only the first page is converted, skipping `{file}`", source.display());
                } else {
                    page_file = Some(file.to_string());
                }
            }
            "char" => {
                let id = line.int("id", source)?;
                let id = u32::try_from(id)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        ConvertError::malformed(
                            source,
                            format!("line {number}: `id={id}` is not a valid character"),
                        )
                    })?;
                glyphs.push(Glyph {
                    id,
                    x: line.int("x", source)?,
                    y: line.int("y", source)?,
                    width: line.int("width", source)?,
                    height: line.int("height", source)?,
                });
            }
            "common" | "chars" | "kernings" | "kerning" => {}
            other => debug!("{}: line {number}: ignoring `{other}`", source.display()),
        }
    }

    let face = face.ok_or_else(|| ConvertError::malformed(source, "no `info` line"))?;
    let page_file = page_file.ok_or_else(|| ConvertError::malformed(source, "no `page` line"))?;

    Ok(FontDescriptor {
        face,
        page_file,
        glyphs,
    })
}
