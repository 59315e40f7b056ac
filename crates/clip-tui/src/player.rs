//! mpv hand-off — the playback surface.
//!
//! The controller only ever attaches a source or clears it, so the whole
//! driver is spawn/kill of an mpv child.  A spawn failure is swallowed:
//! the resolved URL is still considered attached and the status slot is
//! not touched (autoplay refusal in the original surface behaves the same
//! way).

use std::process::Stdio;

use clip_proto::config::PlayerConfig;
use tokio::process::{Child, Command};
use tracing::{debug, info};

pub struct Player {
    binary: String,
    extra_args: Vec<String>,
    child: Option<Child>,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            binary: config.mpv_binary.clone(),
            extra_args: config.extra_args.clone(),
            child: None,
        }
    }

    /// Attach `url` and start playback, replacing whatever was playing.
    pub fn play(&mut self, url: &str) {
        self.stop();

        let mut cmd = Command::new(&self.binary);
        cmd.arg("--really-quiet")
            .args(&self.extra_args)
            .arg("--")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match cmd.spawn() {
            Ok(child) => {
                info!(url, "mpv started");
                self.child = Some(child);
            }
            Err(e) => {
                // Deliberately not surfaced as an error.
                debug!("mpv failed to start: {}", e);
            }
        }
    }

    /// Clear the playback surface.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.start_kill();
        }
    }

    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_swallowed() {
        let config = PlayerConfig {
            mpv_binary: "definitely-not-a-real-player-9f3a".to_string(),
            extra_args: Vec::new(),
        };
        let mut player = Player::new(&config);
        player.play("https://example.net/clip.mp4");
        assert!(!player.is_running());
        // stop() on nothing is a no-op
        player.stop();
    }
}
