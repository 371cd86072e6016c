//! `AI_Output` call scraping.
//!
//! Extraction runs in two phases. The first finds every occurrence of the call
//! name; the second runs a small cursor over the text that follows and accepts
//! exactly one shape:
//!
//! ```text
//! AI_Output ( speaker , listener , "line" ) ; [//] tag
//! ```
//!
//! Anything that does not fit is skipped without error. This is a scraper over
//! loosely structured script source, not a parser.

use std::ops::Range;

use crate::constants::extract::{CALL_NAME, COMMENT_MARKER};
use crate::data::DialogueRecord;

/// One recognized call, borrowing from the scanned text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallMatch<'a> {
    /// First argument.
    pub speaker: &'a str,
    /// Second argument. Not carried into `DialogueRecord`.
    pub listener: &'a str,
    /// Quoted argument without quotes, untrimmed.
    pub line: &'a str,
    /// Rest of the line after the terminator and optional `//`.
    pub tag: &'a str,
    /// Byte range of the whole match.
    pub span: Range<usize>,
}

impl CallMatch<'_> {
    /// Convert to a record: trimmed line, verbatim tag, empty reserved fields.
    pub fn to_record(&self) -> DialogueRecord {
        DialogueRecord::new(self.tag, self.line.trim(), self.speaker)
    }
}

/// Iterator over non-overlapping `AI_Output` calls in text order.
pub struct CallMatches<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for CallMatches<'a> {
    type Item = CallMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            let start = self.pos + self.text[self.pos..].find(CALL_NAME)?;
            match match_call(self.text, start) {
                Some(found) => {
                    self.pos = found.span.end;
                    return Some(found);
                }
                None => self.pos = start + CALL_NAME.len(),
            }
        }
        None
    }
}

/// Iterate over every well-formed call in `text`.
pub fn call_matches(text: &str) -> CallMatches<'_> {
    CallMatches { text, pos: 0 }
}

/// Extract one record per well-formed call, in text order.
pub fn extract_records(text: &str) -> Vec<DialogueRecord> {
    call_matches(text).map(|found| found.to_record()).collect()
}

/// Try to match a full call whose name starts at byte `start`.
fn match_call(text: &str, start: usize) -> Option<CallMatch<'_>> {
    let mut cursor = Cursor::new(text, start);
    cursor.eat(CALL_NAME)?;
    cursor.skip_whitespace();
    cursor.eat("(")?;
    cursor.skip_whitespace();
    let speaker = cursor.word()?;
    cursor.skip_whitespace();
    cursor.eat(",")?;
    cursor.skip_whitespace();
    let listener = cursor.word()?;
    cursor.skip_whitespace();
    cursor.eat(",")?;
    cursor.skip_whitespace();
    cursor.eat("\"")?;
    let line = cursor.quoted_until_terminator()?;
    cursor.skip_inline_whitespace();
    let _ = cursor.eat(COMMENT_MARKER);
    cursor.skip_inline_whitespace();
    let tag = cursor.rest_of_line();
    Some(CallMatch {
        speaker,
        listener,
        line,
        tag,
        span: start..cursor.pos,
    })
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn eat(&mut self, token: &str) -> Option<()> {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            Some(())
        } else {
            None
        }
    }

    fn skip_while(&mut self, keep: impl Fn(char) -> bool) {
        let rest = self.rest();
        let skipped = rest
            .char_indices()
            .find(|(_, ch)| !keep(*ch))
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        self.pos += skipped;
    }

    fn skip_whitespace(&mut self) {
        self.skip_while(char::is_whitespace);
    }

    fn skip_inline_whitespace(&mut self) {
        self.skip_while(|ch| ch.is_whitespace() && ch != '\n');
    }

    /// One or more word characters.
    fn word(&mut self) -> Option<&'a str> {
        let text = self.text;
        let start = self.pos;
        self.skip_while(is_word_char);
        (self.pos > start).then(|| &text[start..self.pos])
    }

    /// Shortest quoted body on the current line followed by `) ;`.
    ///
    /// The cursor must sit just after the opening quote. On success it is left
    /// after the `;`.
    fn quoted_until_terminator(&mut self) -> Option<&'a str> {
        let body_start = self.pos;
        let rest = self.rest();
        let line_end = rest.find('\n').unwrap_or(rest.len());
        for (offset, _) in rest[..line_end].match_indices('"') {
            let mut probe = Cursor::new(self.text, body_start + offset + 1);
            probe.skip_whitespace();
            if probe.eat(")").is_none() {
                continue;
            }
            probe.skip_whitespace();
            if probe.eat(";").is_none() {
                continue;
            }
            self.pos = probe.pos;
            return Some(&self.text[body_start..body_start + offset]);
        }
        None
    }

    /// Text up to the end of the line, without a trailing carriage return.
    fn rest_of_line(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest.find('\n').unwrap_or(rest.len());
        self.pos += len;
        rest[..len].strip_suffix('\r').unwrap_or(&rest[..len])
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_single_call_with_comment_tag() {
        let records = extract_records(r#"AI_Output(SELF,OTHER,"Hello there");//greet01"#);
        assert_eq!(records, vec![DialogueRecord::new("greet01", "Hello there", "SELF")]);
    }

    #[test]
    fn skips_malformed_call_between_good_ones() {
        let text = concat!(
            "AI_Output (self, other, \"First\"); //DIA_A_01\n",
            "AI_Output (self, other, \"Broken\"; //DIA_A_02\n",
            "AI_Output (other, self, \"Second\"); //DIA_A_03\n",
        );
        let records = extract_records(text);
        assert_eq!(
            records,
            vec![
                DialogueRecord::new("DIA_A_01", "First", "self"),
                DialogueRecord::new("DIA_A_03", "Second", "other"),
            ]
        );
    }

    #[test]
    fn no_calls_yields_no_records() {
        assert!(extract_records("").is_empty());
        let script = "func void DIA_Diego_Exit_Info() { AI_StopProcessInfos(self); };";
        assert!(extract_records(script).is_empty());
    }

    #[test]
    fn line_is_trimmed_and_tag_kept_verbatim() {
        let records =
            extract_records("AI_Output(self,hero,\"  padded line  \");   //  tag with spaces ");
        assert_eq!(records[0].line, "padded line");
        assert_eq!(records[0].output_name, "tag with spaces ");
    }

    #[test]
    fn missing_comment_gives_empty_tag() {
        let text = "AI_Output(self,other,\"No tag\");\nAI_Output(self,other,\"Next\");//n\n";
        let records = extract_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].output_name, "");
        assert_eq!(records[1].output_name, "n");
    }

    #[test]
    fn tag_without_comment_marker_is_rest_of_line() {
        let records = extract_records("AI_Output(self,other,\"Hi\"); trailing");
        assert_eq!(records[0].output_name, "trailing");
    }

    #[test]
    fn crlf_line_endings_do_not_leak_into_tag() {
        let records = extract_records("AI_Output(self,other,\"Hi\"); //tag01\r\nfoo");
        assert_eq!(records[0].output_name, "tag01");
    }

    #[test]
    fn whitespace_between_tokens_may_span_lines() {
        let text = "AI_Output (\n\tself ,\n\tother ,\n\t\"Spread out\"\n) ;//spread";
        let records = extract_records(text);
        assert_eq!(records, vec![DialogueRecord::new("spread", "Spread out", "self")]);
    }

    #[test]
    fn quoted_line_may_not_cross_a_newline() {
        let text = "AI_Output(self,other,\"unterminated\n\"); //x";
        assert!(extract_records(text).is_empty());
    }

    #[test]
    fn quoted_line_ends_at_first_quote_followed_by_terminator() {
        let records = extract_records(r#"AI_Output(self,other,"say "yes" now");//q"#);
        assert_eq!(records[0].line, "say \"yes\" now");
    }

    #[test]
    fn listener_is_captured_on_match_but_not_on_record() {
        let text = "x AI_Output(self, other, \"Hi\"); //t";
        let found: Vec<_> = call_matches(text).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].listener, "other");
        assert_eq!(found[0].span.start, 2);
        assert_eq!(found[0].span.end, text.len());
    }

    #[test]
    fn identifiers_must_be_word_tokens() {
        assert!(extract_records("AI_Output(self.x,other,\"Hi\");//t").is_empty());
        assert!(extract_records("AI_Output(,other,\"Hi\");//t").is_empty());
        assert!(extract_records("AI_Output(self,other,Hi);//t").is_empty());
    }

    #[test]
    fn call_name_embedded_in_longer_identifier_still_matches() {
        let records = extract_records("B_AI_Output(self,other,\"Hi\");//t");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        let records = extract_records("AI_Output(self,other,\"Grüß dich, Fremder!\");//gr");
        assert_eq!(records[0].line, "Grüß dich, Fremder!");
    }
}
