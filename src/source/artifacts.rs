use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

use super::{local_name, malformed, unescape, Source};
use crate::error::NoticeError;
use crate::models::ArtifactCoordinate;

/// Reads the artifact inventory.
///
/// Every `<artifact>` element, at any depth, contributes one artifact:
///
/// ```xml
/// <artifact>
///   <artifactId>Commons Lang (org.apache.commons:commons-lang3)</artifactId>
///   <license>Apache 2.0</license>
/// </artifact>
/// ```
pub struct ArtifactSource;

impl ArtifactSource {
    pub fn new() -> Self {
        Self
    }
}

impl Source for ArtifactSource {
    type Item = ArtifactCoordinate;

    const KIND: &'static str = "artifact list";

    fn parse(&self, xml: &str, origin: &Path) -> Result<Vec<ArtifactCoordinate>, NoticeError> {
        let label_re = label_regex().map_err(|e| malformed(origin, e))?;

        // Labels are trimmed once complete; text split by comments or CDATA is joined first.
        let mut reader = Reader::from_str(xml);

        let mut artifacts = Vec::new();
        let mut buf = Vec::new();

        let mut in_artifact = false;
        let mut field: Option<String> = None;
        let mut field_text = String::new();
        let mut label: Option<String> = None;
        let mut license: Option<String> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = local_name(e.name());
                    if name == "artifact" {
                        in_artifact = true;
                        label = None;
                        license = None;
                    } else if in_artifact
                        && field.is_none()
                        && (name == "artifactId" || name == "license")
                    {
                        field_text.clear();
                        field = Some(name);
                    }
                }
                Ok(Event::End(ref e)) if in_artifact => {
                    let name = local_name(e.name());
                    if field.as_deref() == Some(name.as_str()) {
                        field = None;
                        let text = std::mem::take(&mut field_text);
                        // Only the first occurrence of each field counts.
                        match name.as_str() {
                            "artifactId" if label.is_none() => label = Some(text),
                            "license" if license.is_none() => license = Some(text),
                            _ => {}
                        }
                    } else if name == "artifact" {
                        in_artifact = false;
                        let label = label.take().unwrap_or_default();
                        let license = license.take().unwrap_or_default();
                        artifacts.push(parse_label(&label_re, &label, &license, origin)?);
                    }
                }
                Ok(Event::Text(ref e)) if field.is_some() => {
                    field_text.push_str(&unescape(e, origin)?);
                }
                Ok(Event::CData(ref e)) if field.is_some() => {
                    field_text.push_str(&String::from_utf8_lossy(e));
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

        Ok(artifacts)
    }
}

/// `Title (group:artifact)`. Everything after the last `(` up to the next `)`
/// holds the coordinates, split at the first `:`.
fn label_regex() -> Result<Regex, regex::Error> {
    Regex::new(r"^(?s)(?P<title>.*)\((?P<tail>[^(]*)$")
}

fn parse_label(
    re: &Regex,
    label: &str,
    license: &str,
    origin: &Path,
) -> Result<ArtifactCoordinate, NoticeError> {
    let no_coordinates = || {
        malformed(
            origin,
            format!("artifact label '{}' has no (group:artifact) coordinates", label),
        )
    };

    let caps = re.captures(label).ok_or_else(no_coordinates)?;
    let tail = &caps["tail"];
    let fqdn = tail.split_once(')').map_or(tail, |(fqdn, _)| fqdn);
    let (group_id, artifact_id) = fqdn.split_once(':').ok_or_else(no_coordinates)?;

    Ok(ArtifactCoordinate::new(
        caps["title"].trim(),
        group_id.trim(),
        artifact_id.trim(),
        license.trim(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_artifacts() {
        let xml = r#"<?xml version="1.0"?>
<report>
  <artifacts>
    <artifact>
      <artifactId>Commons Lang (org.apache.commons:commons-lang3)</artifactId>
      <license>Apache 2.0</license>
    </artifact>
    <artifact>
      <artifactId>JUnit (junit:junit)</artifactId>
      <license>Eclipse Public License 1.0</license>
    </artifact>
  </artifacts>
</report>"#;

        let artifacts = ArtifactSource::new().parse(xml, Path::new("test.xml")).unwrap();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(
            artifacts[0],
            ArtifactCoordinate::new("Commons Lang", "org.apache.commons", "commons-lang3", "Apache 2.0")
        );
        assert_eq!(artifacts[1].fqdn(), "junit:junit");
        assert_eq!(artifacts[1].declared_license, "Eclipse Public License 1.0");
    }

    #[test]
    fn test_label_uses_last_parenthesis() {
        let re = label_regex().unwrap();
        let a = parse_label(&re, "Foo (legacy) Bar (com.example:foo-bar)", "MIT", Path::new("x")).unwrap();
        assert_eq!(a.title, "Foo (legacy) Bar");
        assert_eq!(a.group_id, "com.example");
        assert_eq!(a.artifact_id, "foo-bar");
    }

    #[test]
    fn test_coordinates_come_from_the_last_parenthesis_only() {
        let re = label_regex().unwrap();
        let err = parse_label(&re, "Widget (acme:widget) (shaded)", "MIT", Path::new("x")).unwrap_err();
        assert!(err.to_string().contains("Widget (acme:widget) (shaded)"));

        let a = parse_label(&re, "Widget (acme:widget:jar)", "MIT", Path::new("x")).unwrap();
        assert_eq!(a.group_id, "acme");
        assert_eq!(a.artifact_id, "widget:jar");
    }

    #[test]
    fn test_cdata_label() {
        let xml = "<artifacts><artifact><artifactId><![CDATA[Widget (acme:widget)]]></artifactId><license><![CDATA[MIT]]></license></artifact></artifacts>";
        let artifacts = ArtifactSource::new().parse(xml, Path::new("x")).unwrap();
        assert_eq!(artifacts[0], ArtifactCoordinate::new("Widget", "acme", "widget", "MIT"));
    }

    #[test]
    fn test_label_split_by_comment() {
        let xml = "<artifacts><artifact><artifactId>Widget <!-- c --> (acme:widget)</artifactId><license>Apache <!-- c -->2.0</license></artifact></artifacts>";
        let artifacts = ArtifactSource::new().parse(xml, Path::new("x")).unwrap();
        assert_eq!(artifacts[0].title, "Widget");
        assert_eq!(artifacts[0].fqdn(), "acme:widget");
        assert_eq!(artifacts[0].declared_license, "Apache 2.0");
    }

    #[test]
    fn test_label_without_coordinates_is_malformed() {
        let xml = "<artifacts><artifact><artifactId>No coordinates</artifactId><license>MIT</license></artifact></artifacts>";
        let err = ArtifactSource::new().parse(xml, Path::new("bad.xml")).unwrap_err();
        assert!(matches!(err, NoticeError::MalformedInput { .. }));
        assert!(err.to_string().contains("No coordinates"));
    }

    #[test]
    fn test_escaped_text() {
        let xml = "<artifacts><artifact><artifactId>A &amp; B (g:a)</artifactId><license>GPL &amp; CE</license></artifact></artifacts>";
        let artifacts = ArtifactSource::new().parse(xml, Path::new("x")).unwrap();
        assert_eq!(artifacts[0].title, "A & B");
        assert_eq!(artifacts[0].declared_license, "GPL & CE");
    }

    #[test]
    fn test_load_from_file() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            "<artifacts><artifact><artifactId>Widget (acme:widget)</artifactId><license>MIT</license></artifact></artifacts>"
        )
        .unwrap();
        let artifacts = ArtifactSource::new().load(f.path()).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].fqdn(), "acme:widget");
    }

    #[test]
    fn test_missing_file() {
        let err = ArtifactSource::new()
            .load(Path::new("/nonexistent/artifacts.xml"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NoticeError>(),
            Some(NoticeError::MissingInput { kind: "artifact list", .. })
        ));
    }
}
