//! Review document model
//!
//! The model's reply is parsed with libxml2, checked against [`REVIEW_SCHEMA`]
//! and only then turned into a [`ReviewDocument`]. A reply that is not XML at
//! all fails with [`ReviewError::MalformedXml`]; XML of the wrong shape fails
//! with [`ReviewError::UnexpectedShape`]. Replies with a `<!DOCTYPE>` are
//! refused as malformed, so no entity declared by the model is ever loaded.

use tracing::debug;

use crate::error::{Result, ReviewError};
use crate::libxml2::{LibXml2Wrapper, ValidationResult, XmlElement};

/// Shape every review must have. Section order inside `CodeReview` and the
/// order of `Location`/`Feedback` inside a comment are free; free-text leaves
/// may carry inline markup. Attributes are accepted anywhere and ignored.
pub const REVIEW_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
    <xs:complexType name="FreeText" mixed="true">
        <xs:sequence>
            <xs:any minOccurs="0" maxOccurs="unbounded" processContents="skip"/>
        </xs:sequence>
        <xs:anyAttribute processContents="skip"/>
    </xs:complexType>

    <xs:element name="CodeReview">
        <xs:complexType>
            <xs:all>
                <xs:element name="GeneralObservations">
                    <xs:complexType>
                        <xs:sequence>
                            <xs:element name="Observation" type="FreeText" minOccurs="0" maxOccurs="unbounded"/>
                        </xs:sequence>
                        <xs:anyAttribute processContents="skip"/>
                    </xs:complexType>
                </xs:element>
                <xs:element name="SpecificComments">
                    <xs:complexType>
                        <xs:sequence>
                            <xs:element name="Comment" minOccurs="0" maxOccurs="unbounded">
                                <xs:complexType>
                                    <xs:all>
                                        <xs:element name="Location" type="FreeText"/>
                                        <xs:element name="Feedback" type="FreeText"/>
                                    </xs:all>
                                    <xs:anyAttribute processContents="skip"/>
                                </xs:complexType>
                            </xs:element>
                        </xs:sequence>
                        <xs:anyAttribute processContents="skip"/>
                    </xs:complexType>
                </xs:element>
                <xs:element name="ImprovementSuggestions">
                    <xs:complexType>
                        <xs:sequence>
                            <xs:element name="Suggestion" type="FreeText" minOccurs="0" maxOccurs="unbounded"/>
                        </xs:sequence>
                        <xs:anyAttribute processContents="skip"/>
                    </xs:complexType>
                </xs:element>
            </xs:all>
            <xs:anyAttribute processContents="skip"/>
        </xs:complexType>
    </xs:element>
</xs:schema>"#;

/// A comment tied to a place in the reviewed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewComment {
    pub location: String,
    pub feedback: String,
}

/// Structured code review
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDocument {
    pub observations: Vec<String>,
    pub comments: Vec<ReviewComment>,
    pub suggestions: Vec<String>,
}

/// Number of entries per section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewCounts {
    pub observations: usize,
    pub comments: usize,
    pub suggestions: usize,
}

impl ReviewDocument {
    /// Parse and shape-check the model's reply.
    pub fn parse(xml: &str) -> Result<Self> {
        let wrapper = LibXml2Wrapper::new();
        let document = wrapper.parse_document_from_memory(xml.trim().as_bytes())?;
        if document.has_doctype() {
            return Err(ReviewError::MalformedXml {
                details: "DOCTYPE declarations are not accepted".to_string(),
            });
        }
        let schema = wrapper.parse_schema_from_memory(REVIEW_SCHEMA.as_bytes())?;

        match wrapper.validate_document(&schema, &document)? {
            ValidationResult::Valid => {}
            ValidationResult::Invalid { errors, .. } => {
                return Err(ReviewError::UnexpectedShape {
                    details: errors.join("; "),
                });
            }
            ValidationResult::InternalError { code } => {
                return Err(ReviewError::LibXml2Internal {
                    details: format!("validation returned code {code}"),
                });
            }
        }

        let root = document.root().ok_or_else(|| ReviewError::UnexpectedShape {
            details: "document has no root element".to_string(),
        })?;

        let observations = leaf_texts(&section(&root, "GeneralObservations")?)?;
        let suggestions = leaf_texts(&section(&root, "ImprovementSuggestions")?)?;
        let comments = section(&root, "SpecificComments")?
            .children()
            .map(|comment| -> Result<ReviewComment> {
                Ok(ReviewComment {
                    location: trimmed_text(&required_child(&comment, "Location")?)?,
                    feedback: trimmed_text(&required_child(&comment, "Feedback")?)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let review = Self {
            observations,
            comments,
            suggestions,
        };
        debug!(counts = ?review.counts(), "Parsed review document");
        Ok(review)
    }

    pub fn counts(&self) -> ReviewCounts {
        ReviewCounts {
            observations: self.observations.len(),
            comments: self.comments.len(),
            suggestions: self.suggestions.len(),
        }
    }
}

fn section<'doc>(root: &XmlElement<'doc>, name: &str) -> Result<XmlElement<'doc>> {
    root.child(name).ok_or_else(|| ReviewError::UnexpectedShape {
        details: format!("missing section {name}"),
    })
}

fn required_child<'doc>(parent: &XmlElement<'doc>, name: &str) -> Result<XmlElement<'doc>> {
    parent
        .child(name)
        .ok_or_else(|| ReviewError::UnexpectedShape {
            details: format!("{} without {name}", parent.name()),
        })
}

fn leaf_texts(section: &XmlElement<'_>) -> Result<Vec<String>> {
    section.children().map(|leaf| trimmed_text(&leaf)).collect()
}

fn trimmed_text(element: &XmlElement<'_>) -> Result<String> {
    Ok(element.text()?.trim().to_string())
}
