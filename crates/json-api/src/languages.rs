//! Language Selection Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use qrmenu_app::locales::Locale;

/// One entry of the language picker.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LanguageResponse {
    /// Value to send as `lang`
    pub code: String,

    /// Native language name
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LanguagesResponse {
    /// Locale used when `lang` is missing or unknown
    pub default: String,

    pub languages: Vec<LanguageResponse>,
}

/// Language Selection Handler
///
/// Lists the locales the menu can be shown in.
#[endpoint(tags("menu"), summary = "List Languages")]
pub(crate) async fn handler() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        default: Locale::DEFAULT.code().to_string(),
        languages: Locale::ALL
            .into_iter()
            .map(|locale| LanguageResponse {
                code: locale.code().to_string(),
                label: locale.label().to_string(),
            })
            .collect(),
    })
}
