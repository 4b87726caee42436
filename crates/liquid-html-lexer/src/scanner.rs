use crate::token::{
    is_raw_element, is_raw_tag, AttributeValue, Delimiter, Invalid, RawAttribute, Span, TagHead,
    TagName, Token, TokenKind, ValuePiece,
};
use crate::whitespace;

/// What kind of construct begins at a given offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Construct {
    Drop,
    Tag,
    Comment,
    Doctype,
    EndTag,
    StartTag,
}

/// Liquid HTML source scanner.
///
/// Splits source text into lexical units: text runs, drops, tags, HTML tag
/// heads, comments and raw elements. The scanner is an [`Iterator`] and can be
/// restarted at any token boundary with [`Scanner::starting_at`]; it keeps no
/// state besides the current offset.
///
/// Scanning never fails. Input that cannot be split into units is reported
/// as a final [`TokenKind::Invalid`] token and the iterator ends.
///
/// Raw mode: once `<script>`, `<style>`, `<!--` or a raw Liquid block such as
/// `{% raw %}` is seen, only the matching terminator is searched for, so any
/// markup inside is kept verbatim.
pub struct Scanner<'s> {
    source: &'s str,
    pos: usize,
    finished: bool,
}

impl<'s> Scanner<'s> {
    /// Create a new scanner for the given source.
    pub fn new(source: &'s str) -> Self {
        Self::starting_at(source, 0)
    }

    /// Create a scanner that resumes at `offset`, normally the end of a
    /// previously returned token.
    pub fn starting_at(source: &'s str, offset: usize) -> Self {
        let mut pos = offset.min(source.len());
        while !source.is_char_boundary(pos) {
            pos -= 1;
        }
        Self {
            source,
            pos,
            finished: false,
        }
    }

    /// Scan the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Scanner::new(source).collect()
    }

    /// Byte offset of the next token.
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn scan_token(&mut self) -> Token {
        let start = self.pos;
        match self.construct_at(start) {
            Some(Construct::Drop) => self.scan_drop(start),
            Some(Construct::Tag) => self.scan_liquid_tag(start),
            Some(Construct::Comment) => self.scan_comment(start),
            Some(Construct::Doctype) => self.scan_doctype(start),
            Some(Construct::EndTag) => self.scan_end_tag(start),
            Some(Construct::StartTag) => self.scan_start_tag(start),
            None => self.scan_text(start),
        }
    }

    fn construct_at(&self, i: usize) -> Option<Construct> {
        let rest = &self.source[i..];
        if rest.starts_with("{{") {
            Some(Construct::Drop)
        } else if rest.starts_with("{%") {
            Some(Construct::Tag)
        } else if rest.starts_with("<!--") {
            Some(Construct::Comment)
        } else if starts_with_ignore_case(rest, "<!doctype") {
            Some(Construct::Doctype)
        } else if rest.starts_with("</") && self.tag_name_at(i + 2) {
            Some(Construct::EndTag)
        } else if rest.starts_with('<') && self.tag_name_at(i + 1) {
            Some(Construct::StartTag)
        } else {
            None
        }
    }

    fn tag_name_at(&self, i: usize) -> bool {
        let rest = &self.source[i..];
        rest.starts_with("{{") || rest.starts_with(|c: char| c.is_ascii_alphabetic())
    }

    // --- Scanners ---

    /// Scan text up to the next construct. A `<` that does not open a tag is text.
    fn scan_text(&mut self, start: usize) -> Token {
        let bytes = self.source.as_bytes();
        let mut i = start + 1;
        while i < bytes.len() {
            if matches!(bytes[i], b'{' | b'<') && self.construct_at(i).is_some() {
                break;
            }
            i += 1;
        }
        self.pos = i;
        Token::new(TokenKind::Text, Span::new(start, i))
    }

    fn scan_drop(&mut self, start: usize) -> Token {
        match self.delimited_end(start, Delimiter::Drop) {
            Some(end) => {
                self.pos = end;
                Token::new(TokenKind::Drop, Span::new(start, end))
            }
            None => self.invalid(start, Invalid::Unterminated(Delimiter::Drop)),
        }
    }

    fn scan_liquid_tag(&mut self, start: usize) -> Token {
        let Some(end) = self.delimited_end(start, Delimiter::Tag) else {
            return self.invalid(start, Invalid::Unterminated(Delimiter::Tag));
        };
        let open = Span::new(start, end);
        let (name, _) = whitespace::split_tag(whitespace::extract(self.source, open).text);
        if is_raw_tag(name) {
            return self.scan_raw_tag(open, name);
        }
        self.pos = end;
        Token::new(TokenKind::Tag, open)
    }

    /// Scan the verbatim body of `{% raw %}`-style blocks up to `{% end<name> %}`.
    fn scan_raw_tag(&mut self, open: Span, name: &str) -> Token {
        let mut search = open.end;
        while let Some(tag_start) = self.find_from(search, "{%") {
            let Some(tag_end) = self.delimited_end(tag_start, Delimiter::Tag) else {
                break;
            };
            let close = Span::new(tag_start, tag_end);
            let (close_name, _) =
                whitespace::split_tag(whitespace::extract(self.source, close).text);
            if close_name.strip_prefix("end") == Some(name) {
                self.pos = tag_end;
                let body = Span::new(open.end, tag_start);
                return Token::new(
                    TokenKind::RawTag { open, body, close },
                    Span::new(open.start, tag_end),
                );
            }
            search = tag_end;
        }
        self.invalid(open.start, Invalid::UnclosedRaw(name.to_string()))
    }

    fn scan_comment(&mut self, start: usize) -> Token {
        let body_start = start + "<!--".len();
        match self.find_from(body_start, "-->") {
            Some(body_end) => {
                self.pos = body_end + "-->".len();
                Token::new(
                    TokenKind::Comment {
                        body: Span::new(body_start, body_end),
                    },
                    Span::new(start, self.pos),
                )
            }
            None => self.invalid(start, Invalid::Unterminated(Delimiter::Comment)),
        }
    }

    fn scan_doctype(&mut self, start: usize) -> Token {
        let value_start = start + "<!doctype".len();
        let Some(gt) = self.find_from(value_start, ">") else {
            return self.invalid(start, Invalid::TagHead("unterminated doctype"));
        };
        let raw = &self.source[value_start..gt];
        let leading = raw.len() - raw.trim_start().len();
        let trailing = raw.len() - raw.trim_end().len();
        let value = if leading == raw.len() {
            Span::new(gt, gt)
        } else {
            Span::new(value_start + leading, gt - trailing)
        };
        self.pos = gt + 1;
        Token::new(TokenKind::Doctype { value }, Span::new(start, self.pos))
    }

    fn scan_end_tag(&mut self, start: usize) -> Token {
        let name = match self.scan_tag_name(start + "</".len()) {
            Ok(name) => name,
            Err(invalid) => return self.invalid(start, invalid),
        };
        let i = self.skip_whitespace(name.span().end);
        if self.byte(i) != Some(b'>') {
            return self.invalid(start, Invalid::TagHead("expected `>` to close the end tag"));
        }
        self.pos = i + 1;
        Token::new(TokenKind::EndTag(name), Span::new(start, self.pos))
    }

    fn scan_start_tag(&mut self, start: usize) -> Token {
        let head = match self.scan_tag_head(start) {
            Ok(head) => head,
            Err(invalid) => return self.invalid(start, invalid),
        };
        if let TagName::Static(name) = head.name {
            let name = name.slice(self.source);
            if !head.self_closing && is_raw_element(name) {
                return self.scan_raw_element(head, name);
            }
        }
        self.pos = head.span.end;
        let span = head.span;
        Token::new(TokenKind::StartTag(head), span)
    }

    /// Scan the verbatim body of a raw element up to its `</name>`.
    fn scan_raw_element(&mut self, head: TagHead, name: &str) -> Token {
        let body_start = head.span.end;
        let mut search = body_start;
        while let Some(lt) = self.find_from(search, "</") {
            let name_end = lt + "</".len() + name.len();
            let matches_name = self
                .source
                .get(lt + "</".len()..name_end)
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
                && self.source[name_end..]
                    .starts_with(|c: char| c == '>' || c.is_ascii_whitespace());
            if matches_name {
                if let Some(gt) = self.find_from(name_end, ">") {
                    let close = Span::new(lt, gt + 1);
                    let span = Span::new(head.span.start, close.end);
                    self.pos = close.end;
                    return Token::new(
                        TokenKind::RawElement {
                            head,
                            body: Span::new(body_start, lt),
                            close,
                        },
                        span,
                    );
                }
            }
            search = lt + "</".len();
        }
        self.invalid(head.span.start, Invalid::UnclosedRaw(name.to_ascii_lowercase()))
    }

    // --- Tag heads ---

    fn scan_tag_head(&self, start: usize) -> Result<TagHead, Invalid> {
        let name = self.scan_tag_name(start + 1)?;
        let mut attributes = Vec::new();
        let mut i = name.span().end;

        loop {
            i = self.skip_whitespace(i);
            let rest = &self.source[i..];
            if rest.is_empty() {
                return Err(Invalid::TagHead("unterminated tag"));
            }
            if rest.starts_with('>') || rest.starts_with("/>") {
                let self_closing = rest.starts_with('/');
                let end = if self_closing { i + 2 } else { i + 1 };
                return Ok(TagHead {
                    span: Span::new(start, end),
                    name,
                    attributes,
                    self_closing,
                });
            }
            if rest.starts_with("{{") || rest.starts_with("{%") {
                return Err(Invalid::TagHead(
                    "Liquid markup cannot be used as an attribute name",
                ));
            }
            if !rest.starts_with(is_attr_name_char) {
                return Err(Invalid::TagHead("unexpected character in tag"));
            }

            let attribute = self.scan_attribute(i)?;
            i = attribute.span.end;
            attributes.push(attribute);
        }
    }

    fn scan_tag_name(&self, i: usize) -> Result<TagName, Invalid> {
        if self.source[i..].starts_with("{{") {
            let end = self
                .delimited_end(i, Delimiter::Drop)
                .ok_or(Invalid::Unterminated(Delimiter::Drop))?;
            return Ok(TagName::Dynamic(Span::new(i, end)));
        }
        let end = self.take_while(i, is_tag_name_char);
        if end == i {
            return Err(Invalid::TagHead("expected a tag name"));
        }
        Ok(TagName::Static(Span::new(i, end)))
    }

    fn scan_attribute(&self, start: usize) -> Result<RawAttribute, Invalid> {
        let name = Span::new(start, self.take_while(start, is_attr_name_char));
        let after_name = self.skip_whitespace(name.end);
        if self.byte(after_name) != Some(b'=') {
            return Ok(RawAttribute {
                span: name,
                name,
                value: None,
            });
        }

        let value = self.scan_attribute_value(self.skip_whitespace(after_name + 1))?;
        Ok(RawAttribute {
            span: Span::new(start, value.span.end),
            name,
            value: Some(value),
        })
    }

    fn scan_attribute_value(&self, start: usize) -> Result<AttributeValue, Invalid> {
        match self.byte(start) {
            Some(quote @ (b'"' | b'\'')) => {
                let quote = char::from(quote);
                let (pieces, end) = self.scan_value_pieces(start + 1, |c| c == quote)?;
                if self.byte(end) != Some(quote as u8) {
                    return Err(Invalid::TagHead("unterminated attribute value"));
                }
                Ok(AttributeValue {
                    span: Span::new(start, end + 1),
                    quote: Some(quote),
                    pieces,
                })
            }
            _ => {
                let (pieces, end) =
                    self.scan_value_pieces(start, |c| !is_unquoted_value_char(c))?;
                if end == start {
                    return Err(Invalid::TagHead("expected an attribute value"));
                }
                Ok(AttributeValue {
                    span: Span::new(start, end),
                    quote: None,
                    pieces,
                })
            }
        }
    }

    /// Split an attribute value into text and drop pieces, up to `stop`.
    ///
    /// `{% … %}` inside a value is skipped as a whole and stays part of the
    /// surrounding text piece.
    fn scan_value_pieces(
        &self,
        start: usize,
        stop: impl Fn(char) -> bool,
    ) -> Result<(Vec<ValuePiece>, usize), Invalid> {
        let mut pieces = Vec::new();
        let mut text_start = start;
        let mut i = start;

        while let Some(c) = self.source[i..].chars().next() {
            let rest = &self.source[i..];
            if rest.starts_with("{{") {
                if i > text_start {
                    pieces.push(ValuePiece::Text(Span::new(text_start, i)));
                }
                let end = self
                    .delimited_end(i, Delimiter::Drop)
                    .ok_or(Invalid::Unterminated(Delimiter::Drop))?;
                pieces.push(ValuePiece::Drop(Span::new(i, end)));
                i = end;
                text_start = end;
                continue;
            }
            if rest.starts_with("{%") {
                i = self
                    .delimited_end(i, Delimiter::Tag)
                    .ok_or(Invalid::Unterminated(Delimiter::Tag))?;
                continue;
            }
            if stop(c) {
                break;
            }
            i += c.len_utf8();
        }

        if i > text_start {
            pieces.push(ValuePiece::Text(Span::new(text_start, i)));
        }
        Ok((pieces, i))
    }

    // --- Helpers ---

    /// End offset (exclusive) of the construct opened by `delimiter` at `start`.
    fn delimited_end(&self, start: usize, delimiter: Delimiter) -> Option<usize> {
        self.find_from(start + delimiter.open().len(), delimiter.close())
            .map(|i| i + delimiter.close().len())
    }

    fn find_from(&self, from: usize, pattern: &str) -> Option<usize> {
        self.source[from..].find(pattern).map(|i| i + from)
    }

    fn take_while(&self, start: usize, predicate: impl Fn(char) -> bool) -> usize {
        self.source[start..]
            .char_indices()
            .find(|(_, c)| !predicate(*c))
            .map_or(self.source.len(), |(i, _)| start + i)
    }

    fn skip_whitespace(&self, start: usize) -> usize {
        self.take_while(start, char::is_whitespace)
    }

    fn byte(&self, i: usize) -> Option<u8> {
        self.source.as_bytes().get(i).copied()
    }

    fn invalid(&mut self, start: usize, invalid: Invalid) -> Token {
        self.finished = true;
        self.pos = self.source.len();
        Token::new(TokenKind::Invalid(invalid), Span::new(start, self.source.len()))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished || self.pos >= self.source.len() {
            return None;
        }
        Some(self.scan_token())
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':') || !c.is_ascii()
}

fn is_attr_name_char(c: char) -> bool {
    !matches!(c, '"' | '\'' | '>' | '/' | '=') && !c.is_whitespace()
}

fn is_unquoted_value_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '"' | '\'' | '=' | '<' | '>' | '`')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: scan and return token kinds (ignoring spans).
    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::tokenize(source)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    /// Helper: scan and return the source slice of every token.
    fn slices(source: &str) -> Vec<&str> {
        Scanner::tokenize(source)
            .iter()
            .map(|t| t.span.slice(source))
            .collect()
    }

    fn start_tag(source: &str) -> TagHead {
        match Scanner::tokenize(source).remove(0).kind {
            TokenKind::StartTag(head) => head,
            other => panic!("Expected StartTag, got {other:?}"),
        }
    }

    // =========================================================================
    // Text and Liquid delimiters
    // =========================================================================

    #[test]
    fn test_empty_source() {
        assert!(kinds("").is_empty());
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(kinds("Hello world!"), vec![TokenKind::Text]);
    }

    #[test]
    fn test_lone_angle_bracket_is_text() {
        assert_eq!(kinds("a < b and c <= d"), vec![TokenKind::Text]);
    }

    #[test]
    fn test_drop_and_tags() {
        let source = "Hi {{ name }}{% if a %}!{% endif %}";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Text,
                TokenKind::Drop,
                TokenKind::Tag,
                TokenKind::Text,
                TokenKind::Tag,
            ]
        );
        assert_eq!(
            slices(source),
            vec!["Hi ", "{{ name }}", "{% if a %}", "!", "{% endif %}"]
        );
    }

    #[test]
    fn test_single_brace_is_text() {
        assert_eq!(kinds("a { b } c"), vec![TokenKind::Text]);
    }

    #[test]
    fn test_unterminated_drop() {
        assert_eq!(
            kinds("ok {{ name"),
            vec![
                TokenKind::Text,
                TokenKind::Invalid(Invalid::Unterminated(Delimiter::Drop)),
            ]
        );
    }

    #[test]
    fn test_unterminated_tag_ends_iteration() {
        let tokens = Scanner::tokenize("{% if a <p>");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].span, Span::new(0, 11));
    }

    // =========================================================================
    // HTML tags
    // =========================================================================

    #[test]
    fn test_start_and_end_tag() {
        let source = "<div>x</div>";
        assert_eq!(slices(source), vec!["<div>", "x", "</div>"]);
        assert_eq!(
            kinds(source)[2],
            TokenKind::EndTag(TagName::Static(Span::new(8, 11)))
        );
    }

    #[test]
    fn test_attributes() {
        let source = r#"<img src="https://1234" loading='lazy' disabled checked="">"#;
        let head = start_tag(source);
        let names: Vec<_> = head
            .attributes
            .iter()
            .map(|a| a.name.slice(source))
            .collect();
        assert_eq!(names, vec!["src", "loading", "disabled", "checked"]);

        let src = head.attributes[0].value.as_ref().unwrap();
        assert_eq!(src.quote, Some('"'));
        assert_eq!(src.pieces, vec![ValuePiece::Text(Span::new(10, 22))]);

        let loading = head.attributes[1].value.as_ref().unwrap();
        assert_eq!(loading.quote, Some('\''));

        assert!(head.attributes[2].value.is_none());

        let checked = head.attributes[3].value.as_ref().unwrap();
        assert!(checked.pieces.is_empty());
        assert_eq!(checked.span.slice(source), "\"\"");
    }

    #[test]
    fn test_attribute_value_with_drops() {
        let source = r#"<a href="/products/{{ product.handle }}?v={{ id }}">"#;
        let head = start_tag(source);
        let value = head.attributes[0].value.as_ref().unwrap();
        let pieces: Vec<_> = value
            .pieces
            .iter()
            .map(|piece| match piece {
                ValuePiece::Text(span) => format!("text:{}", span.slice(source)),
                ValuePiece::Drop(span) => format!("drop:{}", span.slice(source)),
            })
            .collect();
        assert_eq!(
            pieces,
            vec![
                "text:/products/",
                "drop:{{ product.handle }}",
                "text:?v=",
                "drop:{{ id }}",
            ]
        );
    }

    #[test]
    fn test_liquid_tag_inside_attribute_value_stays_text() {
        let source = r#"<div class="a {% if b == "c" %}d{% endif %}">"#;
        let head = start_tag(source);
        let value = head.attributes[0].value.as_ref().unwrap();
        assert_eq!(value.pieces.len(), 1);
        assert_eq!(
            value.span.slice(source),
            r#""a {% if b == "c" %}d{% endif %}""#
        );
    }

    #[test]
    fn test_unquoted_attribute_value() {
        let source = "<input type=text value={{ v }}>";
        let head = start_tag(source);
        let value = head.attributes[0].value.as_ref().unwrap();
        assert_eq!(value.quote, None);
        assert_eq!(value.span.slice(source), "text");
        let value = head.attributes[1].value.as_ref().unwrap();
        assert_eq!(value.pieces, vec![ValuePiece::Drop(Span::new(23, 30))]);
    }

    #[test]
    fn test_dynamic_tag_name() {
        let source = "<{{ node_type }} id=x></{{- node_type }}>";
        let head = start_tag(source);
        assert_eq!(head.name, TagName::Dynamic(Span::new(1, 16)));
        assert_eq!(
            kinds(source)[1],
            TokenKind::EndTag(TagName::Dynamic(Span::new(24, 40)))
        );
    }

    #[test]
    fn test_self_closing_tag() {
        let head = start_tag("<my-icon name='cart' />");
        assert!(head.self_closing);
        assert_eq!(head.span, Span::new(0, 23));
    }

    #[test]
    fn test_unterminated_tag_head() {
        assert_eq!(
            kinds("<div class=\"a\""),
            vec![TokenKind::Invalid(Invalid::TagHead("unterminated tag"))]
        );
    }

    #[test]
    fn test_liquid_in_attribute_name_position() {
        assert!(matches!(
            kinds("<input {{ checked }}>")[0],
            TokenKind::Invalid(Invalid::TagHead(_))
        ));
    }

    // =========================================================================
    // Comments, doctype and raw elements
    // =========================================================================

    #[test]
    fn test_comment_is_raw() {
        let source = "<!--\n  hello {{ product.name }}\n-->";
        match &kinds(source)[0] {
            TokenKind::Comment { body } => {
                assert_eq!(body.slice(source), "\n  hello {{ product.name }}\n")
            }
            other => panic!("Expected Comment, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_comment() {
        assert_eq!(
            kinds("<!-- never closed"),
            vec![TokenKind::Invalid(Invalid::Unterminated(Delimiter::Comment))]
        );
    }

    #[test]
    fn test_doctype() {
        let source = "<!DOCTYPE html>\n<html>";
        match &kinds(source)[0] {
            TokenKind::Doctype { value } => assert_eq!(value.slice(source), "html"),
            other => panic!("Expected Doctype, got {other:?}"),
        }
    }

    #[test]
    fn test_script_is_raw() {
        let source = "<script>\n  const a = {{ product | json }};\n</script>";
        let tokens = Scanner::tokenize(source);
        assert_eq!(tokens.len(), 1);
        match &tokens[0].kind {
            TokenKind::RawElement { body, close, .. } => {
                assert_eq!(body.slice(source), "\n  const a = {{ product | json }};\n");
                assert_eq!(close.slice(source), "</script>");
            }
            other => panic!("Expected RawElement, got {other:?}"),
        }
    }

    #[test]
    fn test_raw_element_ignores_other_end_tags() {
        let source = "<style>a::after { content: '</div>' }</STYLE >";
        match &kinds(source)[0] {
            TokenKind::RawElement { body, .. } => {
                assert_eq!(body.slice(source), "a::after { content: '</div>' }")
            }
            other => panic!("Expected RawElement, got {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_script() {
        assert_eq!(
            kinds("<script>let a = 1;"),
            vec![TokenKind::Invalid(Invalid::UnclosedRaw("script".into()))]
        );
    }

    #[test]
    fn test_raw_liquid_tag() {
        let source = "{% raw %}{{ not parsed }}{% if %}{%- endraw -%}after";
        let tokens = Scanner::tokenize(source);
        match &tokens[0].kind {
            TokenKind::RawTag { body, close, .. } => {
                assert_eq!(body.slice(source), "{{ not parsed }}{% if %}");
                assert_eq!(close.slice(source), "{%- endraw -%}");
            }
            other => panic!("Expected RawTag, got {other:?}"),
        }
        assert_eq!(tokens[1].span.slice(source), "after");
    }

    #[test]
    fn test_unclosed_liquid_comment() {
        assert_eq!(
            kinds("{% comment %} forever"),
            vec![TokenKind::Invalid(Invalid::UnclosedRaw("comment".into()))]
        );
    }

    // =========================================================================
    // Restarting
    // =========================================================================

    #[test]
    fn test_restart_at_token_boundary() {
        let source = "<p>{{ a }}</p>";
        let all = Scanner::tokenize(source);
        let resumed: Vec<_> = Scanner::starting_at(source, all[1].span.start).collect();
        assert_eq!(resumed, all[1..].to_vec());
    }

    #[test]
    fn test_offset_tracks_progress() {
        let mut scanner = Scanner::new("ab{{ c }}");
        assert_eq!(scanner.offset(), 0);
        scanner.next();
        assert_eq!(scanner.offset(), 2);
        scanner.next();
        assert_eq!(scanner.offset(), 9);
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_multibyte_text() {
        let source = "héllo <b>wörld</b>";
        assert_eq!(slices(source), vec!["héllo ", "<b>", "wörld", "</b>"]);
    }
}
