//! Share-intent links for the social platforms the site exposes.

use serde::Serialize;

/// Outbound intent URLs built from the current page URL and title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub x: String,
    pub telegram: String,
    pub linkedin: String,
}

pub fn share_links(page_url: &str, page_title: &str) -> ShareLinks {
    let url = urlencoding::encode(page_url);
    let title = urlencoding::encode(page_title);
    ShareLinks {
        x: format!("https://x.com/intent/tweet?text={title}&url={url}"),
        telegram: format!("https://t.me/share/url?url={url}&text={title}"),
        linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={url}"),
    }
}
