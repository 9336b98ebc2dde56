use crate::rules::Rule;

/// An ordered rule pipeline, applied as a left fold over the input.
///
/// The default pipeline runs every rule in [`Rule::ALL`] order. Individual
/// rules can be switched off with [`Sanitizer::without`]; the remaining
/// rules keep their relative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitizer {
    rules: Vec<Rule>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self { rules: Rule::ALL.to_vec() }
    }
}

impl Sanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops `rule` from the pipeline.
    pub fn without(mut self, rule: Rule) -> Self {
        self.rules.retain(|r| *r != rule);
        self
    }

    /// The active rules, in the order they run.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_enabled(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    /// Rewrites a raw completion into a plain-text reply.
    pub fn sanitize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        self.rules
            .iter()
            .fold(raw.to_owned(), |text, rule| rule.apply(&text).into_owned())
    }
}

/// Runs the default pipeline. Absent input stays absent.
pub fn sanitize(raw: Option<&str>) -> Option<String> {
    raw.map(|text| Sanitizer::default().sanitize(text))
}
