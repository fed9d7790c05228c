//! Rotating hero banner with session-scoped non-repetition.

use rand::Rng;
use std::path::{Path, PathBuf};

/// Next banner index in `1..=count`, re-rolling while the draw equals the
/// previously shown index so the same banner never appears twice in a row.
pub fn next_banner<R: Rng + ?Sized>(rng: &mut R, count: u32, last: Option<u32>) -> u32 {
    if count <= 1 {
        return 1;
    }
    loop {
        let n = rng.gen_range(1..=count);
        if Some(n) != last {
            return n;
        }
    }
}

/// Banner asset name, zero-padded the way the site's images are shipped
/// (`hero_03.jpg`).
pub fn banner_name(index: u32) -> String {
    format!("hero_{:02}.jpg", index)
}

/// sessionStorage analogue: a single file holding the last-shown banner
/// index. A missing or unreadable file simply means no constraint.
pub struct SessionState {
    path: PathBuf,
}

impl SessionState {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn last_banner(&self) -> Option<u32> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }

    pub fn set_last_banner(&self, index: u32) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, index.to_string())
    }
}

/// Draw a banner for this page view and persist it for the next one.
/// Persistence is best-effort: a write failure loses the constraint for the
/// next view, nothing more.
pub fn rotate_banner<R: Rng + ?Sized>(state: &SessionState, rng: &mut R, count: u32) -> u32 {
    let n = next_banner(rng, count, state.last_banner());
    let _ = state.set_last_banner(n);
    n
}
