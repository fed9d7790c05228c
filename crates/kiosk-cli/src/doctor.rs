use kiosk_core::{JsonFileSource, Source};
use std::path::Path;

/// Environment self-check: catalog file, then clipboard tooling.
pub fn run(posts_path: &Path) {
    match JsonFileSource::new(posts_path).load() {
        Ok(posts) => println!(
            "catalog: ok ({} posts at {})",
            posts.len(),
            posts_path.display()
        ),
        Err(e) => println!("catalog: unavailable ({e})"),
    }
    clipboard_tools();
}

#[cfg(target_os = "linux")]
fn clipboard_tools() {
    use std::process::{Command, Stdio};
    let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
    println!(
        "session: {}",
        if wayland { "wayland" } else { "unknown/x11" }
    );
    let present = |prog: &str, arg: &str| {
        Command::new(prog)
            .arg(arg)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .and_then(|mut c| c.wait())
            .map(|s| s.success())
            .unwrap_or(false)
    };
    let wl = present("wl-copy", "--version");
    println!("wl-clipboard: {}", if wl { "present" } else { "missing" });
    if wayland && !wl {
        println!("hint: install wl-clipboard so 'c' (copy link) works under Wayland");
    }
    let xclip = present("xclip", "-version");
    let xsel = present("xsel", "--version");
    println!(
        "xclip: {} | xsel: {}",
        if xclip { "present" } else { "missing" },
        if xsel { "present" } else { "missing" }
    );
}

#[cfg(not(target_os = "linux"))]
fn clipboard_tools() {
    match arboard::Clipboard::new() {
        Ok(_) => println!("clipboard: ok"),
        Err(e) => println!("clipboard: unavailable ({e})"),
    }
}
