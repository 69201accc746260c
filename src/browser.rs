use std::io;

use tracing::warn;

use crate::{types::MediaRef, utils, warning};

/// Opens URLs for the user. Failures are reported, never fatal.
pub trait Browser {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// The user's default browser.
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        webbrowser::open(url)
    }
}

/// Opens the letterboxd.com page matching `media`, if it has one.
pub fn open_letterboxd<B: Browser + ?Sized>(browser: &B, media: &MediaRef) {
    match utils::letterboxd_url(media) {
        Some(url) => {
            if let Err(e) = browser.open(&url) {
                warn!(%url, error = %e, "failed to open browser");
                warning!("Failed to open browser. Please navigate to {} manually", url);
            }
        }
        None => warning!("Cannot determine Letterboxd URL for entry"),
    }
}
