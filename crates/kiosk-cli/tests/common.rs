#![allow(dead_code)]
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

const FIXTURE: &str = r#"[
  {
    "title": "Hero Feature",
    "category": "Meta",
    "short_desc": "pinned",
    "description": "The newest analysis, rendered up top.",
    "date": "Nov 2025",
    "url": "posts/hero-feature.html"
  },
  {
    "title": "NTLM Deep Dive",
    "category": "Protocols",
    "short_desc": "challenge/response internals",
    "description": "Abusing relay primitives end to end.",
    "date": "Oct 2025",
    "url": "posts/ntlm-deep-dive.html"
  },
  {
    "title": "SMTP Relay Hygiene",
    "category": "Blue Team",
    "short_desc": "mail plumbing",
    "description": "Closing open relays for good.",
    "date": "Sep 2025",
    "url": "posts/smtp-relay-hygiene.html"
  },
  {
    "title": "Operação Silêncio",
    "category": "Red Team",
    "short_desc": "evasão",
    "description": "Uma análise de evasão em ambientes monitorados.",
    "date": "Ago 2025",
    "url": "posts/operacao-silencio.html"
  }
]"#;

pub struct TestEnv {
    _dir: TempDir,
    pub posts: PathBuf,
    pub cfg: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = dir.path().join("config");
        std::fs::create_dir_all(&cfg).expect("cfg dir");
        let posts = dir.path().join("posts.json");
        std::fs::write(&posts, FIXTURE).expect("posts fixture");
        Self {
            _dir: dir,
            posts,
            cfg,
        }
    }

    pub fn bin(&self) -> Command {
        let mut cmd = Command::cargo_bin("kiosk-cli").unwrap();
        cmd.env("XDG_CONFIG_HOME", &self.cfg);
        cmd.arg("--posts").arg(&self.posts);
        cmd
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
