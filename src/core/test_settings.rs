//! Test-level settings: response collection and sharing

use serde::{Deserialize, Serialize};

/// Default number of responses after which a test closes
pub const DEFAULT_TARGET_RESPONSES: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSettings {
    /// The test closes automatically once this many responses arrived
    pub target_responses: u32,
    pub allow_anonymous_responses: bool,
    pub require_email: bool,
    #[serde(default)]
    pub share_options: ShareOptions,
}

impl Default for TestSettings {
    fn default() -> Self {
        Self {
            target_responses: DEFAULT_TARGET_RESPONSES,
            allow_anonymous_responses: true,
            require_email: false,
            share_options: ShareOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareOptions {
    #[serde(default)]
    pub public_link: bool,
    #[serde(default)]
    pub embed_code: bool,
    /// Only accept respondents whose email is on this domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrict_domain: Option<String>,
}

/// One field-level edit of the test settings panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum TestSettingsChange {
    TargetResponses(u32),
    AllowAnonymousResponses(bool),
    RequireEmail(bool),
    PublicLink(bool),
    EmbedCode(bool),
    /// Empty string clears the restriction
    RestrictDomain(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestSettingsError {
    #[error("Target responses must be at least 1")]
    ZeroTargetResponses,
}

impl TestSettings {
    /// Settings with `change` applied; every other field is kept
    pub fn apply(&self, change: TestSettingsChange) -> Result<TestSettings, TestSettingsError> {
        let mut next = self.clone();
        match change {
            TestSettingsChange::TargetResponses(0) => {
                return Err(TestSettingsError::ZeroTargetResponses)
            }
            TestSettingsChange::TargetResponses(n) => next.target_responses = n,
            TestSettingsChange::AllowAnonymousResponses(v) => next.allow_anonymous_responses = v,
            TestSettingsChange::RequireEmail(v) => next.require_email = v,
            TestSettingsChange::PublicLink(v) => next.share_options.public_link = v,
            TestSettingsChange::EmbedCode(v) => next.share_options.embed_code = v,
            TestSettingsChange::RestrictDomain(domain) => {
                let domain = domain.trim();
                next.share_options.restrict_domain =
                    (!domain.is_empty()).then(|| domain.to_string());
            }
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_changes_single_field() {
        let settings = TestSettings::default();
        let next = settings.apply(TestSettingsChange::RequireEmail(true)).unwrap();
        assert!(next.require_email);
        assert_eq!(next.target_responses, settings.target_responses);
        assert_eq!(next.share_options, settings.share_options);
    }

    #[test]
    fn test_zero_target_responses_rejected() {
        let settings = TestSettings::default();
        assert_eq!(
            settings.apply(TestSettingsChange::TargetResponses(0)),
            Err(TestSettingsError::ZeroTargetResponses)
        );
    }

    #[test]
    fn test_restrict_domain_blank_clears() {
        let settings = TestSettings::default()
            .apply(TestSettingsChange::RestrictDomain(" example.com ".into()))
            .unwrap();
        assert_eq!(settings.share_options.restrict_domain.as_deref(), Some("example.com"));

        let cleared = settings.apply(TestSettingsChange::RestrictDomain(String::new())).unwrap();
        assert_eq!(cleared.share_options.restrict_domain, None);
    }

    #[test]
    fn test_change_wire_format() {
        let change: TestSettingsChange =
            serde_json::from_value(json!({ "field": "targetResponses", "value": 250 })).unwrap();
        assert_eq!(change, TestSettingsChange::TargetResponses(250));
    }
}
