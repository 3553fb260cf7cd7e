use regex::Regex;

use crate::error::ReconError;

/// One recognized ad-group naming template: a literal phrase followed by a
/// space and a four-digit year.
#[derive(Debug, Clone)]
pub struct LabelTemplate {
    pub phrase: String,
    pattern: Regex,
}

impl LabelTemplate {
    pub fn new(phrase: &str) -> Result<Self, ReconError> {
        let source = format!(r"{} \d{{4}}", regex::escape(phrase));
        let pattern = Regex::new(&source).map_err(|e| ReconError::InvalidTemplate {
            phrase: phrase.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            phrase: phrase.to_string(),
            pattern,
        })
    }

    /// Case-sensitive substring test.
    pub fn is_match(&self, label: &str) -> bool {
        self.pattern.is_match(label)
    }
}

/// Ordered list of templates. First match wins.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: Vec<LabelTemplate>,
}

impl TemplateSet {
    pub fn from_phrases<S: AsRef<str>>(phrases: &[S]) -> Result<Self, ReconError> {
        let templates = phrases
            .iter()
            .map(|p| LabelTemplate::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { templates })
    }

    pub fn templates(&self) -> &[LabelTemplate] {
        &self.templates
    }

    /// The template a label qualifies under, if any.
    pub fn matching_template(&self, label: &str) -> Option<&LabelTemplate> {
        if label.is_empty() {
            return None;
        }
        self.templates.iter().find(|t| t.is_match(label))
    }

    /// Returns the label itself when it matches a template. The template is
    /// only a qualification test and never replaces the label text.
    pub fn match_label<'a>(&self, label: &'a str) -> Option<&'a str> {
        self.matching_template(label).map(|_| label)
    }
}
