//! Canonical TS serializer
//!
//! Writes a [`TsDocument`] back out as Linguist-style XML: 4-space
//! indentation, one element per line, entity-escaped character data. The
//! output is stable, so serialize → parse → serialize is byte-identical,
//! and text content survives the round trip unchanged.

use crate::ts::{Translation, TranslationStatus, TsDocument, TsMessage};

/// Serialize a document to TS XML
pub fn serialize(doc: &TsDocument) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");
    out.push_str(&format!(
        "<TS version=\"2.0\" language=\"{}\">\n",
        escape(&doc.language)
    ));
    for context in &doc.contexts {
        out.push_str("<context>\n");
        out.push_str(&format!("    <name>{}</name>\n", escape(&context.name)));
        for message in &context.messages {
            write_message(&mut out, message);
        }
        out.push_str("</context>\n");
    }
    out.push_str("</TS>\n");
    out
}

fn write_message(out: &mut String, message: &TsMessage) {
    match &message.translation {
        Translation::Plural(_) => out.push_str("    <message numerus=\"yes\">\n"),
        Translation::Singular(_) => out.push_str("    <message>\n"),
    }
    out.push_str(&format!(
        "        <source>{}</source>\n",
        escape(&message.source)
    ));
    if let Some(comment) = &message.comment {
        out.push_str(&format!(
            "        <comment>{}</comment>\n",
            escape(comment)
        ));
    }
    let type_attr = match message.status {
        TranslationStatus::Finished => "",
        TranslationStatus::Unfinished => " type=\"unfinished\"",
        TranslationStatus::Obsolete => " type=\"obsolete\"",
    };
    match &message.translation {
        Translation::Singular(text) => out.push_str(&format!(
            "        <translation{}>{}</translation>\n",
            type_attr,
            escape(text)
        )),
        Translation::Plural(forms) => {
            out.push_str(&format!("        <translation{type_attr}>\n"));
            for form in forms {
                out.push_str(&format!(
                    "            <numerusform>{}</numerusform>\n",
                    escape(form)
                ));
            }
            out.push_str("        </translation>\n");
        }
    }
    out.push_str("    </message>\n");
}

/// Escape character data for XML output
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ts::TsContext;

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(
            escape(r#"<a href="%1">l'aide & more</a>"#),
            "&lt;a href=&quot;%1&quot;&gt;l&apos;aide &amp; more&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn serializes_singular_and_numerus_messages() {
        let doc = TsDocument {
            language: "fr_FR".to_string(),
            contexts: vec![TsContext {
                name: "Window".to_string(),
                messages: vec![
                    TsMessage {
                        source: "&Quit".to_string(),
                        comment: None,
                        status: TranslationStatus::Finished,
                        translation: Translation::Singular("&Quitter".to_string()),
                    },
                    TsMessage {
                        source: "%n message(s)".to_string(),
                        comment: None,
                        status: TranslationStatus::Obsolete,
                        translation: Translation::Plural(vec![
                            "%n message".to_string(),
                            "%n messages".to_string(),
                        ]),
                    },
                ],
            }],
        };
        let xml = serialize(&doc);
        assert!(xml.contains("<source>&amp;Quit</source>"));
        assert!(xml.contains("<translation>&amp;Quitter</translation>"));
        assert!(xml.contains("<message numerus=\"yes\">"));
        assert!(xml.contains("<translation type=\"obsolete\">"));
        assert!(xml.contains("<numerusform>%n messages</numerusform>"));
    }

    #[test]
    fn serialization_round_trips() {
        let doc = TsDocument {
            language: "fr_FR".to_string(),
            contexts: vec![TsContext {
                name: "setup".to_string(),
                messages: vec![TsMessage {
                    source: r#"Refer to the <a href="%1">%2 FAQ</a>."#.to_string(),
                    comment: Some("hyperlink".to_string()),
                    status: TranslationStatus::Finished,
                    translation: Translation::Singular(
                        r#"Consultez la <a href="%1">FAQ %2</a>."#.to_string(),
                    ),
                }],
            }],
        };
        let xml = serialize(&doc);
        let reparsed = TsDocument::parse(&xml).unwrap();
        assert_eq!(reparsed, doc);
        assert_eq!(serialize(&reparsed), xml);
    }
}
