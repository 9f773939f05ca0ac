use std::fmt;

use tokio::process::Command;

/// Failure to get a result out of the osascript bridge.
#[derive(Debug)]
pub enum BridgeError {
    /// The osascript process could not be spawned at all.
    Launch(std::io::Error),
    /// The script ran and reported an error (non-zero exit).
    Script(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Launch(e) => write!(f, "failed to launch osascript: {}", e),
            BridgeError::Script(stderr) => write!(f, "osascript failed: {}", stderr.trim()),
        }
    }
}

impl std::error::Error for BridgeError {}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Launch(err)
    }
}

/// Runs one AppleScript through `osascript -e` and returns its trimmed
/// stdout. The bridge is strictly sequential; callers never issue
/// overlapping invocations because the Music application's internal index
/// is not safe against them.
pub async fn run_osascript(script: &str) -> Result<String, BridgeError> {
    let output = Command::new("osascript")
        .arg("-e")
        .arg(script)
        .output()
        .await?;

    if !output.status.success() {
        return Err(BridgeError::Script(
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
