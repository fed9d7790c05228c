use anyhow::Result;

#[cfg(target_os = "linux")]
fn try_prog(prog: &str, args: &[&str], input: &str) -> Result<bool> {
    use std::process::{Command, Stdio};
    let mut child = match Command::new(prog)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(c) => c,
        Err(_) => return Ok(false),
    };
    if let Some(mut stdin) = child.stdin.take() {
        use std::io::Write as _;
        let _ = stdin.write_all(input.as_bytes());
    }
    let status = child.wait()?;
    Ok(status.success())
}

/// Copy a page URL (or any text) to the system clipboard. wl-copy is
/// preferred inside Wayland sessions since arboard's data-control path is
/// not available everywhere; the X11 utilities are the last resort.
pub fn copy_text(text: &str) -> Result<()> {
    #[cfg(target_os = "linux")]
    {
        if std::env::var_os("WAYLAND_DISPLAY").is_some() && try_prog("wl-copy", &[], text)? {
            return Ok(());
        }
    }
    let set = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string()));
    if let Err(e) = set {
        #[cfg(target_os = "linux")]
        {
            if try_prog("xclip", &["-selection", "clipboard"], text)?
                || try_prog("xsel", &["-b"], text)?
            {
                return Ok(());
            }
        }
        return Err(e.into());
    }
    Ok(())
}
