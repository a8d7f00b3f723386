//! Linguist TS document model and reader
//!
//! A TS catalog is an XML document: a `<TS language="..">` root holding
//! `<context>` groups, each with a `<name>` and a sequence of `<message>`
//! elements carrying `<source>` and `<translation>` children. Numerus
//! messages (`numerus="yes"`) hold an ordered list of `<numerusform>`
//! translations instead of a single string.
//!
//! The reader accepts the subset of XML that Linguist emits for these files:
//! prolog, DOCTYPE, comments, quoted attributes, character data with entity
//! escapes, and numeric character references. Anything outside that subset
//! fails with [`I18nError::Parse`] carrying the offending line.

use crate::error::{I18nError, I18nResult};

/// Workflow state of a message entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStatus {
    /// Translated and active
    Finished,
    /// Extracted but not (fully) translated yet
    Unfinished,
    /// Retained for reference only; excluded from active lookups
    Obsolete,
}

/// Translation payload of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// A single translated string
    Singular(String),
    /// Ordered numerus forms, one per plural category
    Plural(Vec<String>),
}

/// One `<message>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsMessage {
    /// The untranslated string, used as the lookup key within its context
    pub source: String,
    /// Optional disambiguation comment for identical source strings
    pub comment: Option<String>,
    /// Workflow state of the entry
    pub status: TranslationStatus,
    /// The translated text
    pub translation: Translation,
}

/// A `<context>` group of messages belonging to one UI surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsContext {
    /// Context name, e.g. a dialog or panel class
    pub name: String,
    /// Messages declared in this context
    pub messages: Vec<TsMessage>,
}

/// A complete TS catalog document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsDocument {
    /// Target language code as declared by the document, e.g. `fr_FR`
    pub language: String,
    /// Context groups in document order
    pub contexts: Vec<TsContext>,
}

impl TsDocument {
    /// Parse a TS document from its XML text
    pub fn parse(input: &str) -> I18nResult<Self> {
        let mut reader = Reader::new(input);
        reader.skip_prolog()?;

        let root = reader.read_open_tag()?;
        if root.name != "TS" {
            return Err(reader.error(format!("expected <TS> root element, found <{}>", root.name)));
        }
        if root.self_closing {
            return Err(reader.error("empty <TS> element"));
        }
        let language = root
            .attr("language")
            .ok_or_else(|| reader.error("<TS> element is missing the language attribute"))?
            .to_string();

        let mut contexts = Vec::new();
        loop {
            reader.skip_whitespace();
            if reader.eof() {
                return Err(reader.error("unterminated <TS> element"));
            }
            if reader.starts_with("</") {
                let close = reader.read_close_tag()?;
                if close != "TS" {
                    return Err(reader.error(format!("expected </TS>, found </{close}>")));
                }
                break;
            }
            if reader.starts_with("<!--") {
                reader.skip_until("-->")?;
                continue;
            }
            let tag = reader.read_open_tag()?;
            match tag.name.as_str() {
                "context" if !tag.self_closing => contexts.push(parse_context(&mut reader)?),
                // lupdate may also emit <defaultcodec/> or <dependencies>
                _ if tag.self_closing => {}
                other => reader.skip_element(other)?,
            }
        }

        reader.skip_whitespace();
        if !reader.eof() {
            return Err(reader.error("unexpected content after </TS>"));
        }

        Ok(Self { language, contexts })
    }
}

fn parse_context(reader: &mut Reader) -> I18nResult<TsContext> {
    let mut name = None;
    let mut messages = Vec::new();

    loop {
        reader.skip_whitespace();
        if reader.eof() {
            return Err(reader.error("unterminated <context> element"));
        }
        if reader.starts_with("</") {
            let close = reader.read_close_tag()?;
            if close != "context" {
                return Err(reader.error(format!("expected </context>, found </{close}>")));
            }
            break;
        }
        let tag = reader.read_open_tag()?;
        match tag.name.as_str() {
            "name" if !tag.self_closing => name = Some(reader.read_text_element("name")?),
            "message" if !tag.self_closing => messages.push(parse_message(reader, &tag)?),
            _ if tag.self_closing => {}
            other => reader.skip_element(other)?,
        }
    }

    let name = name.ok_or_else(|| reader.error("<context> is missing a <name>"))?;
    Ok(TsContext { name, messages })
}

fn parse_message(reader: &mut Reader, open: &OpenTag) -> I18nResult<TsMessage> {
    let numerus = open.attr("numerus").is_some_and(|v| v == "yes");
    let mut source = None;
    let mut comment = None;
    let mut status = TranslationStatus::Finished;
    let mut translation = None;

    loop {
        reader.skip_whitespace();
        if reader.eof() {
            return Err(reader.error("unterminated <message> element"));
        }
        if reader.starts_with("</") {
            let close = reader.read_close_tag()?;
            if close != "message" {
                return Err(reader.error(format!("expected </message>, found </{close}>")));
            }
            break;
        }
        let tag = reader.read_open_tag()?;
        match tag.name.as_str() {
            "source" if !tag.self_closing => source = Some(reader.read_text_element("source")?),
            "comment" if !tag.self_closing => comment = Some(reader.read_text_element("comment")?),
            "translation" => {
                status = match tag.attr("type") {
                    None => TranslationStatus::Finished,
                    Some("unfinished") => TranslationStatus::Unfinished,
                    Some("obsolete") => TranslationStatus::Obsolete,
                    Some(other) => {
                        return Err(reader.error(format!("unknown translation type '{other}'")))
                    }
                };
                translation = Some(if tag.self_closing {
                    if numerus {
                        Translation::Plural(Vec::new())
                    } else {
                        Translation::Singular(String::new())
                    }
                } else {
                    parse_translation_body(reader, numerus)?
                });
            }
            // <location filename=".." line=".."/> and friends
            _ if tag.self_closing => {}
            other => reader.skip_element(other)?,
        }
    }

    let source = source.ok_or_else(|| reader.error("<message> is missing a <source>"))?;
    let translation = match translation {
        Some(translation) => translation,
        None => {
            status = TranslationStatus::Unfinished;
            if numerus {
                Translation::Plural(Vec::new())
            } else {
                Translation::Singular(String::new())
            }
        }
    };

    Ok(TsMessage {
        source,
        comment,
        status,
        translation,
    })
}

fn parse_translation_body(reader: &mut Reader, numerus: bool) -> I18nResult<Translation> {
    if !numerus {
        return Ok(Translation::Singular(
            reader.read_text_element("translation")?,
        ));
    }

    let mut forms = Vec::new();
    loop {
        reader.skip_whitespace();
        if reader.eof() {
            return Err(reader.error("unterminated <translation> element"));
        }
        if reader.starts_with("</") {
            let close = reader.read_close_tag()?;
            if close != "translation" {
                return Err(reader.error(format!("expected </translation>, found </{close}>")));
            }
            break;
        }
        let tag = reader.read_open_tag()?;
        if tag.name != "numerusform" {
            return Err(reader.error(format!(
                "expected <numerusform> inside a numerus <translation>, found <{}>",
                tag.name
            )));
        }
        forms.push(if tag.self_closing {
            String::new()
        } else {
            reader.read_text_element("numerusform")?
        });
    }
    Ok(Translation::Plural(forms))
}

/// A parsed element start tag
struct OpenTag {
    name: String,
    attrs: Vec<(String, String)>,
    self_closing: bool,
}

impl OpenTag {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Line-tracking cursor over the document text
struct Reader<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        if c == '\n' {
            self.line += 1;
        }
        self.pos += c.len_utf8();
        Some(c)
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    fn advance(&mut self, len: usize) {
        let taken = &self.input[self.pos..self.pos + len];
        self.line += taken.bytes().filter(|&b| b == b'\n').count();
        self.pos += len;
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.advance(prefix.len());
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn skip_until(&mut self, terminator: &str) -> I18nResult<()> {
        match self.rest().find(terminator) {
            Some(offset) => {
                self.advance(offset + terminator.len());
                Ok(())
            }
            None => Err(self.error(format!("unterminated construct, expected '{terminator}'"))),
        }
    }

    fn error(&self, message: impl Into<String>) -> I18nError {
        I18nError::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    /// Skip the XML declaration, DOCTYPE and any leading comments
    fn skip_prolog(&mut self) -> I18nResult<()> {
        loop {
            self.skip_whitespace();
            if self.starts_with("<?") {
                self.skip_until("?>")?;
            } else if self.starts_with("<!--") {
                self.skip_until("-->")?;
            } else if self.starts_with("<!") {
                self.skip_until(">")?;
            } else {
                return Ok(());
            }
        }
    }

    fn read_name(&mut self) -> I18nResult<String> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        {
            self.bump();
        }
        if self.pos == start {
            return Err(self.error("expected a name"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn read_open_tag(&mut self) -> I18nResult<OpenTag> {
        if !self.eat("<") {
            return Err(self.error("expected start of element"));
        }
        let name = self.read_name()?;
        let mut attrs = Vec::new();
        loop {
            self.skip_whitespace();
            if self.eat("/>") {
                return Ok(OpenTag {
                    name,
                    attrs,
                    self_closing: true,
                });
            }
            if self.eat(">") {
                return Ok(OpenTag {
                    name,
                    attrs,
                    self_closing: false,
                });
            }
            if self.eof() {
                return Err(self.error(format!("unterminated <{name}> tag")));
            }
            let attr = self.read_name()?;
            self.skip_whitespace();
            if !self.eat("=") {
                return Err(self.error(format!("attribute '{attr}' is missing '='")));
            }
            self.skip_whitespace();
            let quote = match self.bump() {
                Some(q @ ('"' | '\'')) => q,
                _ => return Err(self.error(format!("attribute '{attr}' value must be quoted"))),
            };
            let start = self.pos;
            while matches!(self.peek(), Some(c) if c != quote) {
                self.bump();
            }
            if self.eof() {
                return Err(self.error(format!("unterminated value for attribute '{attr}'")));
            }
            let raw = &self.input[start..self.pos];
            self.bump();
            let value = unescape(raw).map_err(|message| self.error(message))?;
            attrs.push((attr, value));
        }
    }

    fn read_close_tag(&mut self) -> I18nResult<String> {
        if !self.eat("</") {
            return Err(self.error("expected closing tag"));
        }
        let name = self.read_name()?;
        self.skip_whitespace();
        if !self.eat(">") {
            return Err(self.error(format!("malformed closing tag </{name}>")));
        }
        Ok(name)
    }

    /// Read character data up to the next element boundary
    fn read_text(&mut self) -> I18nResult<String> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c != '<') {
            self.bump();
        }
        let raw = &self.input[start..self.pos];
        unescape(raw).map_err(|message| self.error(message))
    }

    /// Read the text content of a leaf element whose open tag was consumed,
    /// then consume the matching close tag
    fn read_text_element(&mut self, name: &str) -> I18nResult<String> {
        let text = self.read_text()?;
        let close = self.read_close_tag()?;
        if close != name {
            return Err(self.error(format!("expected </{name}>, found </{close}>")));
        }
        Ok(text)
    }

    /// Consume an element subtree whose open tag was already read
    fn skip_element(&mut self, name: &str) -> I18nResult<()> {
        let mut depth = 1usize;
        while depth > 0 {
            while matches!(self.peek(), Some(c) if c != '<') {
                self.bump();
            }
            if self.eof() {
                return Err(self.error(format!("unterminated <{name}> element")));
            }
            if self.starts_with("</") {
                self.read_close_tag()?;
                depth -= 1;
            } else if self.starts_with("<!--") {
                self.skip_until("-->")?;
            } else {
                let tag = self.read_open_tag()?;
                if !tag.self_closing {
                    depth += 1;
                }
            }
        }
        Ok(())
    }
}

/// Resolve entity and character references in raw character data
fn unescape(text: &str) -> Result<String, String> {
    if !text.contains('&') {
        return Ok(text.to_string());
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let end = rest
            .find(';')
            .ok_or_else(|| "unterminated entity reference".to_string())?;
        let entity = &rest[1..end];
        match entity {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ => {
                let code_point = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = entity.strip_prefix('#') {
                    dec.parse().ok()
                } else {
                    None
                };
                match code_point.and_then(char::from_u32) {
                    Some(c) => out.push(c),
                    None => return Err(format!("unknown entity '&{entity};'")),
                }
            }
        }
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
