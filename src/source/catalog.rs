use std::collections::BTreeSet;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{local_name, malformed, unescape, Source};
use crate::error::NoticeError;
use crate::models::LicenseRecord;

/// Reads the license catalog.
///
/// ```xml
/// <license>
///   <groupId>org.eclipse.jetty</groupId>   <!-- zero or more -->
///   <artifactId>jetty-util</artifactId>    <!-- optional, needs exactly one groupId -->
///   <name>Apache 2.0</name>
///   <synonyms>
///     <synonym>ASL 2.0</synonym>           <!-- any element name -->
///   </synonyms>
///   <content><![CDATA[ ... ]]></content>
/// </license>
/// ```
///
/// `<content>` is kept verbatim, every other field is trimmed.
pub struct CatalogSource;

impl CatalogSource {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Default)]
struct RecordBuilder {
    artifact_id: Option<String>,
    group_ids: Vec<String>,
    name: Option<String>,
    aliases: BTreeSet<String>,
    content: Option<String>,
}

impl RecordBuilder {
    fn set_field(&mut self, parent: Option<&str>, field: &str, text: &str) {
        match (parent, field) {
            (None, "groupId") => push_trimmed(&mut self.group_ids, text),
            (None, "artifactId") if self.artifact_id.is_none() => {
                self.artifact_id = non_empty(text);
            }
            (None, "name") if self.name.is_none() => self.name = non_empty(text),
            (None, "content") if self.content.is_none() => self.content = Some(text.to_string()),
            (Some("synonyms"), _) => {
                if let Some(alias) = non_empty(text) {
                    self.aliases.insert(alias);
                }
            }
            _ => {}
        }
    }

    fn build(self, index: usize, origin: &Path) -> Result<LicenseRecord, NoticeError> {
        let name = self
            .name
            .ok_or_else(|| malformed(origin, format!("license #{} has no <name>", index + 1)))?;

        Ok(LicenseRecord {
            artifact_id: self.artifact_id,
            group_ids: self.group_ids,
            name,
            aliases: self.aliases,
            content: self.content.unwrap_or_default(),
        })
    }
}

fn push_trimmed(values: &mut Vec<String>, text: &str) {
    if let Some(v) = non_empty(text) {
        values.push(v);
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl Source for CatalogSource {
    type Item = LicenseRecord;

    const KIND: &'static str = "license catalog";

    fn parse(&self, xml: &str, origin: &Path) -> Result<Vec<LicenseRecord>, NoticeError> {
        // License bodies are whitespace sensitive: no trimming at the reader level.
        let mut reader = Reader::from_str(xml);

        let mut records = Vec::new();
        let mut buf = Vec::new();

        let mut current: Option<RecordBuilder> = None;
        // Elements opened inside the current <license>, outermost first, each with
        // the text gathered so far. A closing child appends its text to its parent.
        let mut stack: Vec<(String, String)> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = local_name(e.name());
                    if current.is_some() {
                        stack.push((name, String::new()));
                    } else if name == "license" {
                        current = Some(RecordBuilder::default());
                        stack.clear();
                    }
                }
                Ok(Event::End(_)) if current.is_some() => match stack.pop() {
                    Some((field, text)) => {
                        if let Some(builder) = current.as_mut() {
                            let parent = stack.last().map(|(p, _)| p.as_str());
                            builder.set_field(parent, &field, &text);
                        }
                        if let Some((_, parent_text)) = stack.last_mut() {
                            parent_text.push_str(&text);
                        }
                    }
                    None => {
                        if let Some(builder) = current.take() {
                            let record = builder.build(records.len(), origin)?;
                            records.push(record);
                        }
                    }
                },
                Ok(Event::Text(ref e)) => {
                    if let Some((_, text)) = stack.last_mut() {
                        text.push_str(&unescape(e, origin)?);
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some((_, text)) = stack.last_mut() {
                        text.push_str(&String::from_utf8_lossy(e));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(malformed(
                        origin,
                        format!("at byte {}: {}", reader.buffer_position(), e),
                    ))
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = r#"<?xml version="1.0"?>
<licenses>
  <license>
    <name>Apache 2.0</name>
    <synonyms>
      <synonym>The Apache Software License, Version 2.0</synonym>
      <synonym>ASL 2.0</synonym>
    </synonyms>
    <content>Apache License
Version 2.0</content>
  </license>
  <license>
    <groupId>org.eclipse.jetty</groupId>
    <groupId>org.eclipse.jetty.orbit</groupId>
    <name>Eclipse Public License 1.0</name>
    <content><![CDATA[Eclipse <Public> License]]></content>
  </license>
  <license>
    <groupId>acme</groupId>
    <artifactId>widget</artifactId>
    <name>BSD</name>
    <content>BSD text</content>
  </license>
</licenses>"#;

    #[test]
    fn test_parse_catalog() {
        let records = CatalogSource::new().parse(CATALOG, Path::new("licenses.xml")).unwrap();
        assert_eq!(records.len(), 3);

        let apache = &records[0];
        assert!(apache.is_unscoped());
        assert_eq!(apache.name, "Apache 2.0");
        assert!(apache.aliases.contains("ASL 2.0"));
        assert!(apache
            .aliases
            .contains("The Apache Software License, Version 2.0"));
        assert_eq!(apache.content, "Apache License\nVersion 2.0");

        let epl = &records[1];
        assert_eq!(epl.group_ids, vec!["org.eclipse.jetty", "org.eclipse.jetty.orbit"]);
        assert_eq!(epl.artifact_id, None);
        assert_eq!(epl.content, "Eclipse <Public> License");

        let bsd = &records[2];
        assert_eq!(bsd.artifact_id.as_deref(), Some("widget"));
        assert_eq!(bsd.group_ids, vec!["acme"]);
        assert!(bsd.has_valid_scope());
    }

    #[test]
    fn test_content_kept_verbatim() {
        let xml = "<licenses><license><name> MIT </name><content>\n  indented\n</content></license></licenses>";
        let records = CatalogSource::new().parse(xml, Path::new("x")).unwrap();
        assert_eq!(records[0].name, "MIT");
        assert_eq!(records[0].content, "\n  indented\n");
    }

    #[test]
    fn test_content_keeps_text_around_child_elements() {
        let xml = "<licenses><license><name>ACME</name><content>Copyright <b>ACME</b> all rights</content></license></licenses>";
        let records = CatalogSource::new().parse(xml, Path::new("x")).unwrap();
        assert_eq!(records[0].content, "Copyright ACME all rights");
    }

    #[test]
    fn test_invalid_fqdn_scope_is_kept() {
        let xml = "<licenses><license><groupId>a</groupId><groupId>b</groupId><artifactId>w</artifactId><name>BSD</name></license></licenses>";
        let records = CatalogSource::new().parse(xml, Path::new("x")).unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].has_valid_scope());
    }

    #[test]
    fn test_license_without_name_is_malformed() {
        let xml = "<licenses><license><content>text</content></license></licenses>";
        let err = CatalogSource::new().parse(xml, Path::new("x")).unwrap_err();
        assert!(err.to_string().contains("license #1 has no <name>"));
    }

    #[test]
    fn test_unclosed_document_is_malformed() {
        let xml = "<licenses><license><name>MIT</name></licence></licenses>";
        let err = CatalogSource::new().parse(xml, Path::new("x")).unwrap_err();
        assert!(matches!(err, NoticeError::MalformedInput { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", CATALOG).unwrap();
        let records = CatalogSource::new().load(f.path()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_missing_file() {
        let err = CatalogSource::new()
            .load(Path::new("/nonexistent/licenses.xml"))
            .unwrap_err();
        assert!(err.to_string().contains("license catalog not found"));
    }
}
