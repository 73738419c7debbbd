//! DTOs for pre-signed upload URLs.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::UploadTicket;

/// `type/subtype` as sent in a `Content-Type` header, without parameters.
static MIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*/[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*$")
        .expect("valid MIME regex")
});

/// Query for `GET /uploads/presigned-url`.
#[derive(Debug, Deserialize, Validate)]
pub struct PresignedUrlQuery {
    #[validate(length(min = 1, max = 255))]
    pub filename: String,

    #[validate(regex(path = *MIME_RE, message = "Invalid content type"))]
    pub filetype: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrlResponse {
    pub upload_url: String,
    pub public_url: String,
    pub key: String,
}

impl From<UploadTicket> for PresignedUrlResponse {
    fn from(ticket: UploadTicket) -> Self {
        Self {
            upload_url: ticket.upload_url,
            public_url: ticket.public_url,
            key: ticket.key,
        }
    }
}
