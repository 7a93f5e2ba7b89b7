//! Marker-phrase classification of toolbox response bodies.
//!
//! The toolbox page is an uncontrolled third party: its HTML is matched as
//! an opaque text blob against literal phrases. All of those phrases live
//! in one table here so a markup change is a data edit, not a logic edit.

/// Classification signal extracted from a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The page offers the domain for Workspace sign-up
    Available,

    /// The page indicates the domain already uses Workspace
    InUse,

    /// Neither marker set matched; callers treat this as not available
    Unclear,
}

/// Phrases the toolbox page shows when a domain can sign up.
pub(crate) fn default_available_markers() -> Vec<String> {
    vec!["is available for sign-up".to_string()]
}

/// Phrases the toolbox page shows when a domain is already on Workspace.
///
/// The contact-email prompt is the account recovery flow: the page only
/// asks for it when there is an existing Workspace account to recover.
pub(crate) fn default_in_use_markers() -> Vec<String> {
    vec![
        "We need your contact email".to_string(),
        "This domain is already in use".to_string(),
    ]
}

/// Classifies response bodies by substring presence.
///
/// Matching is case-sensitive: the markers are literal phrases from the
/// third party's markup, not natural-language heuristics.
#[derive(Debug, Clone)]
pub struct SignalClassifier {
    available_markers: Vec<String>,
    in_use_markers: Vec<String>,
}

impl SignalClassifier {
    /// Create a classifier with the default toolbox marker phrases.
    pub fn new() -> Self {
        Self {
            available_markers: default_available_markers(),
            in_use_markers: default_in_use_markers(),
        }
    }

    /// Create a classifier with custom marker lists.
    pub fn with_markers(available: Vec<String>, in_use: Vec<String>) -> Self {
        Self {
            available_markers: available,
            in_use_markers: in_use,
        }
    }

    /// Classify a response body.
    ///
    /// Available markers are checked before in-use markers; a body that
    /// matches neither list is [`Signal::Unclear`]. Classification is a
    /// pure function of the body text.
    pub fn classify(&self, body: &str) -> Signal {
        if self
            .available_markers
            .iter()
            .any(|marker| body.contains(marker.as_str()))
        {
            return Signal::Available;
        }

        if self
            .in_use_markers
            .iter()
            .any(|marker| body.contains(marker.as_str()))
        {
            return Signal::InUse;
        }

        Signal::Unclear
    }
}

impl Default for SignalClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_marker() {
        let classifier = SignalClassifier::new();
        let body = "<html><body>example.com is available for sign-up today</body></html>";
        assert_eq!(classifier.classify(body), Signal::Available);
    }

    #[test]
    fn test_in_use_markers() {
        let classifier = SignalClassifier::new();

        let recovery = "<p>We need your contact email to continue recovery.</p>";
        assert_eq!(classifier.classify(recovery), Signal::InUse);

        let in_use = "<p>This domain is already in use.</p>";
        assert_eq!(classifier.classify(in_use), Signal::InUse);
    }

    #[test]
    fn test_neither_marker_is_unclear() {
        let classifier = SignalClassifier::new();
        let body = "<html><body>Something unexpected happened.</body></html>";
        assert_eq!(classifier.classify(body), Signal::Unclear);
    }

    #[test]
    fn test_available_wins_over_in_use() {
        // If the page somehow contains both, availability is checked first
        let classifier = SignalClassifier::new();
        let body = "is available for sign-up ... This domain is already in use";
        assert_eq!(classifier.classify(body), Signal::Available);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let classifier = SignalClassifier::new();
        let body = "IS AVAILABLE FOR SIGN-UP";
        assert_eq!(classifier.classify(body), Signal::Unclear);
    }

    #[test]
    fn test_custom_markers() {
        let classifier = SignalClassifier::with_markers(
            vec!["totally free".to_string()],
            vec!["occupied".to_string()],
        );

        assert_eq!(classifier.classify("totally free"), Signal::Available);
        assert_eq!(classifier.classify("occupied"), Signal::InUse);
        assert_eq!(
            classifier.classify("is available for sign-up"),
            Signal::Unclear
        );
    }

    #[test]
    fn test_classification_is_idempotent() {
        let classifier = SignalClassifier::new();
        let body = "We need your contact email";
        assert_eq!(classifier.classify(body), classifier.classify(body));
    }
}
