use std::io::Write;

use tokio::sync::watch;
use tokio::task::JoinHandle;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_INTERVAL_MS: u64 = 150;

/// Spinner on stderr while a completion call is in flight. stdout is
/// reserved for the JSON report, so all animation goes to stderr.
pub struct AnimatedLogger {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl AnimatedLogger {
    pub fn start(message: impl Into<String>) -> Self {
        let message = message.into();
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_millis(FRAME_INTERVAL_MS));
            let mut frame = 0usize;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        eprint!("\r{} {} ", FRAMES[frame], message);
                        let _ = std::io::stderr().flush();
                        frame = (frame + 1) % FRAMES.len();
                    }
                    _ = stop_rx.changed() => break,
                }
            }
        });

        Self { stop_tx, handle }
    }

    pub async fn finish(self, final_message: &str) {
        self.stop(&format!("✅ {}", final_message)).await;
    }

    pub async fn fail(self, final_message: &str) {
        self.stop(&format!("❌ {}", final_message)).await;
    }

    async fn stop(self, line: &str) {
        let _ = self.stop_tx.send(true);
        let _ = self.handle.await;
        eprint!("\r\x1b[K{}\n", line);
        let _ = std::io::stderr().flush();
    }
}
