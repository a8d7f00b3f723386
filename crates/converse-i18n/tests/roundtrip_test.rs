//! Round-trip tests: load, re-serialize, reload

use converse_i18n::{serialize, Translation, TsDocument};

// Canonical form: exactly what the writer emits
const CANONICAL: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.0" language="fr_FR">
<context>
    <name>AccountAddPanel</name>
    <message>
        <source>You already have an account for &apos;%1&apos;.</source>
        <translation>Vous avez déjà un compte pour &apos;%1&apos;.</translation>
    </message>
</context>
<context>
    <name>Window</name>
    <message>
        <source>&amp;Quit</source>
        <translation>&amp;Quitter</translation>
    </message>
    <message numerus="yes">
        <source>%n message(s)</source>
        <translation type="obsolete">
            <numerusform>%n message</numerusform>
            <numerusform>%n messages</numerusform>
        </translation>
    </message>
</context>
<context>
    <name>setup</name>
    <message>
        <source>If you need help, please refer to the &lt;a href=&quot;%1&quot;&gt;%2 FAQ&lt;/a&gt;.</source>
        <translation>Si vous avez besoin d&apos;aide, merci de consulter la &lt;a href=&quot;%1&quot;&gt;FAQ %2&lt;/a&gt;.</translation>
    </message>
</context>
</TS>
"#;

#[test]
fn canonical_document_round_trips_byte_for_byte() {
    let doc = TsDocument::parse(CANONICAL).unwrap();
    assert_eq!(serialize(&doc), CANONICAL);
}

#[test]
fn serializer_output_is_stable() {
    let doc = TsDocument::parse(CANONICAL).unwrap();
    let once = serialize(&doc);
    let twice = serialize(&TsDocument::parse(&once).unwrap());
    assert_eq!(once, twice);
}

#[test]
fn reload_preserves_document_structure() {
    let doc = TsDocument::parse(CANONICAL).unwrap();
    let reloaded = TsDocument::parse(&serialize(&doc)).unwrap();
    assert_eq!(reloaded, doc);
}

#[test]
fn markup_text_survives_the_round_trip() {
    let doc = TsDocument::parse(CANONICAL).unwrap();
    let reloaded = TsDocument::parse(&serialize(&doc)).unwrap();

    let setup = reloaded
        .contexts
        .iter()
        .find(|context| context.name == "setup")
        .unwrap();
    assert_eq!(
        setup.messages[0].translation,
        Translation::Singular(
            r#"Si vous avez besoin d'aide, merci de consulter la <a href="%1">FAQ %2</a>."#
                .to_string()
        )
    );
}

#[test]
fn noncanonical_whitespace_is_normalized() {
    // Same entries, different inter-element whitespace
    let input = r#"<?xml version="1.0" encoding="utf-8"?><!DOCTYPE TS>
<TS version="2.0" language="fr_FR">
  <context><name>Window</name>
      <message><source>&amp;Quit</source><translation>&amp;Quitter</translation></message>
  </context>
</TS>"#;

    let doc = TsDocument::parse(input).unwrap();
    let canonical = serialize(&doc);
    assert_eq!(TsDocument::parse(&canonical).unwrap(), doc);
    assert!(canonical.contains("    <message>\n"));
}
