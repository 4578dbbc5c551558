use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Build a review document from section contents
pub fn review_xml(observations: &[&str], comments: &[(&str, &str)], suggestions: &[&str]) -> String {
    let mut xml = String::from("<CodeReview>\n  <GeneralObservations>\n");
    for observation in observations {
        xml.push_str(&format!("    <Observation>{observation}</Observation>\n"));
    }
    xml.push_str("  </GeneralObservations>\n  <SpecificComments>\n");
    for (location, feedback) in comments {
        xml.push_str(&format!(
            "    <Comment>\n      <Location>{location}</Location>\n      <Feedback>{feedback}</Feedback>\n    </Comment>\n"
        ));
    }
    xml.push_str("  </SpecificComments>\n  <ImprovementSuggestions>\n");
    for suggestion in suggestions {
        xml.push_str(&format!("    <Suggestion>{suggestion}</Suggestion>\n"));
    }
    xml.push_str("  </ImprovementSuggestions>\n</CodeReview>\n");
    xml
}

/// Temporary workspace with a source file to review
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn write_source(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("report")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Count non-overlapping occurrences of `needle` in `haystack`
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// The `<ul>` body following the section heading `title`
pub fn section_items<'a>(html: &'a str, title: &str) -> &'a str {
    let heading = format!("<h2>{title}</h2><ul>");
    let start = html.find(&heading).expect("section heading missing") + heading.len();
    let end = start + html[start..].find("</ul>").expect("section list not closed");
    &html[start..end]
}
