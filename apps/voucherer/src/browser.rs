//! Opens the server URL in the system browser.

use std::io;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// Builds the platform launcher command for `url`.
fn launcher(url: &str) -> Command {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        // The empty argument is the window title consumed by `start`.
        command.args(["/C", "start", ""]);
        command
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };

    command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

fn launch(url: &str) -> io::Result<()> {
    let status = launcher(url).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "browser launcher exited with {status}"
        )))
    }
}

/// Launches the browser in the background. Failures are only logged.
pub fn open_in_browser(url: String) {
    tokio::task::spawn_blocking(move || match launch(&url) {
        Ok(()) => debug!(url = %url, "Opened browser"),
        Err(err) => warn!(url = %url, %err, "Could not open browser"),
    });
}
