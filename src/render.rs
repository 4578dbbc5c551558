//! HTML report rendering
//!
//! The report is the template shell followed by one `<h2>`/`<ul>` block per
//! review section and a fixed closing fragment.

use crate::error::Result;
use crate::review::ReviewDocument;

/// HTML shell shipped with the program
pub const BUNDLED_TEMPLATE: &str = include_str!("../templates/code_review_template.html");

/// Closes the elements the template opens
pub const CLOSING_FRAGMENT: &str = "</div></body></html>";

/// How review text is embedded into the HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPolicy {
    /// Escape `& < > " '` so review text cannot inject markup
    #[default]
    Escape,
    /// Insert review text unchanged
    Verbatim,
}

/// Prefix every report starts with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTemplate {
    shell: String,
}

impl ReportTemplate {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn bundled() -> Self {
        Self::new(BUNDLED_TEMPLATE)
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }
}

impl Default for ReportTemplate {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Turns a [`ReviewDocument`] into a complete HTML document
pub struct ReportRenderer<'a> {
    template: &'a ReportTemplate,
    policy: TextPolicy,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(template: &'a ReportTemplate) -> Self {
        Self {
            template,
            policy: TextPolicy::default(),
        }
    }

    pub fn with_policy(template: &'a ReportTemplate, policy: TextPolicy) -> Self {
        Self { template, policy }
    }

    pub fn render(&self, review: &ReviewDocument) -> String {
        let mut html = String::from(self.template.shell());

        html.push_str("<h2>General Observations</h2><ul>");
        for observation in &review.observations {
            html.push_str(&format!("<li>{}</li>", self.text(observation)));
        }
        html.push_str("</ul>");

        html.push_str("<h2>Specific Comments</h2><ul>");
        for comment in &review.comments {
            html.push_str(&format!(
                "<li><strong>{}:</strong> {}</li>",
                self.text(&comment.location),
                self.text(&comment.feedback)
            ));
        }
        html.push_str("</ul>");

        html.push_str("<h2>Improvement Suggestions</h2><ul>");
        for suggestion in &review.suggestions {
            html.push_str(&format!("<li>{}</li>", self.text(suggestion)));
        }
        html.push_str("</ul>");

        html.push_str(CLOSING_FRAGMENT);
        html
    }

    fn text(&self, value: &str) -> String {
        match self.policy {
            TextPolicy::Escape => escape_html(value),
            TextPolicy::Verbatim => value.to_string(),
        }
    }
}

/// Parse the model's reply and render it with the default text policy.
pub fn render_report(xml: &str, template: &ReportTemplate) -> Result<String> {
    let review = ReviewDocument::parse(xml)?;
    Ok(ReportRenderer::new(template).render(&review))
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
