//! Form payloads for the account routes.

use serde::Deserialize;

/// Settings form: each submit carries exactly one of the two fields,
/// matching the two separate forms on the settings page.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}
