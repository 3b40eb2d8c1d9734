//! Request and response bodies

use serde::{Deserialize, Serialize};

/// Body of `POST /ask`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskRequest {
    pub question: Option<String>,
    #[serde(default)]
    pub system_message: Option<String>,
}

/// Form fields of `POST /web-ask`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebAskForm {
    pub question: Option<String>,
    pub csrf_token: Option<String>,
}

/// Body returned by `POST /web-ask`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResponse {
    pub response: String,
}
