use serde::Deserialize;

/// CAPTCHA settings from `GET /settings/turnstile`. When disabled, auth
/// mutations omit the `cfToken` field.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnstileSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub site_key: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnstileVerifyResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSettings {
    #[serde(default)]
    pub open: bool,
}

/// Homepage notice content; markdown, rendered by the embedder.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageContent {
    #[serde(default)]
    pub content: String,
}

/// Footer block. Optional content; absence yields an empty footer, the one
/// silent fallback in the error policy.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterContent {
    #[serde(default)]
    pub content: String,
}
