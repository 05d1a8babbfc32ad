//! Sharing a finished game on social networks.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareTarget {
    Facebook,
    Twitter,
}

impl ShareTarget {
    pub fn label(self) -> &'static str {
        match self {
            ShareTarget::Facebook => "Share on Facebook",
            ShareTarget::Twitter => "Share on X",
        }
    }

    /// Both arguments must already be URI-component encoded.
    pub fn url(self, page: &str, text: &str) -> String {
        match self {
            ShareTarget::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={page}&quote={text}"),
            ShareTarget::Twitter => format!("https://twitter.com/intent/tweet?text={text}&url={page}"),
        }
    }
}

pub fn share_text(secs: u64, score: i64) -> String {
    format!("I just finished the puzzle in {secs} seconds with a score of {score}!")
}

fn encode(raw: &str) -> String {
    js_sys::encode_uri_component(raw).as_string().unwrap_or_else(|| raw.to_string())
}

/// Open the share dialog for the current page in a new tab.
pub fn open_share(target: ShareTarget, secs: u64, score: i64) {
    let Some(win) = web_sys::window() else { return };
    let page = win.location().href().unwrap_or_default();
    let url = target.url(&encode(&page), &encode(&share_text(secs, score)));
    if let Err(e) = win.open_with_url_and_target(&url, "_blank") {
        log::warn!("share via {target:?} failed: {}", crate::util::describe_js(&e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_carries_time_and_score() {
        assert_eq!(share_text(42, 130), "I just finished the puzzle in 42 seconds with a score of 130!");
    }

    #[test]
    fn urls_put_page_and_text_in_the_right_params() {
        let fb = ShareTarget::Facebook.url("PAGE", "TEXT");
        assert_eq!(fb, "https://www.facebook.com/sharer/sharer.php?u=PAGE&quote=TEXT");
        let tw = ShareTarget::Twitter.url("PAGE", "TEXT");
        assert_eq!(tw, "https://twitter.com/intent/tweet?text=TEXT&url=PAGE");
    }
}
