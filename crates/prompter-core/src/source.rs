//! Where the prompter text comes from
//!
//! Text can be given inline, read from a file, or piped through stdin. A file
//! source can also be watched: a background task polls it and sends the new
//! contents whenever they change.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Origin of the prompter text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Text passed directly (command line or config file)
    Inline(String),
    /// Text file on disk
    File(PathBuf),
    /// Everything piped into stdin
    Stdin,
}

impl TextSource {
    /// Pick a source from command-line style arguments; `-` as a path means stdin
    pub fn from_args(text: Option<String>, file: Option<PathBuf>, fallback: &str) -> Self {
        match (text, file) {
            (Some(text), _) => TextSource::Inline(text),
            (None, Some(path)) if path.as_os_str() == "-" => TextSource::Stdin,
            (None, Some(path)) => TextSource::File(path),
            (None, None) => TextSource::Inline(fallback.to_string()),
        }
    }

    /// Read the text once
    pub fn load(&self) -> Result<String> {
        match self {
            TextSource::Inline(text) => Ok(text.clone()),
            TextSource::File(path) => read_text_file(path),
            TextSource::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|e| Error::TextSource(format!("stdin: {}", e)))?;
                Ok(normalize(text))
            }
        }
    }

    /// File path, when the source can be watched
    pub fn watch_path(&self) -> Option<&Path> {
        match self {
            TextSource::File(path) => Some(path),
            _ => None,
        }
    }
}

/// Read a UTF-8 text file, normalizing line endings
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    decode(path, bytes)
}

fn decode(path: &Path, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map(normalize)
        .map_err(|_| Error::TextSource(format!("{} is not valid UTF-8", path.display())))
}

/// CRLF to LF, trailing whitespace at the end of the text dropped
fn normalize(text: String) -> String {
    let text = if text.contains('\r') {
        text.replace("\r\n", "\n")
    } else {
        text
    };
    text.trim_end().to_string()
}

/// Poll `path` every `interval` and send its contents each time they change.
///
/// The current contents count as already delivered. Read errors are logged and
/// polling continues; the task ends when the receiver is dropped.
pub fn spawn_file_watcher(
    path: PathBuf,
    interval: Duration,
    initial: String,
    tx: mpsc::UnboundedSender<String>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(path = %path.display(), "watching text file");
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut last_seen: Option<(Option<SystemTime>, u64)> = None;
        let mut last_text = initial;

        loop {
            ticker.tick().await;
            if tx.is_closed() {
                debug!("text receiver dropped, stopping watcher");
                break;
            }

            let stamp = match tokio::fs::metadata(&path).await {
                Ok(meta) => (meta.modified().ok(), meta.len()),
                Err(e) => {
                    warn!(path = %path.display(), "cannot stat text file: {}", e);
                    continue;
                }
            };
            if stamp.0.is_some() && last_seen == Some(stamp) {
                continue;
            }
            last_seen = Some(stamp);

            let text = match tokio::fs::read(&path).await {
                Ok(bytes) => match decode(&path, bytes) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("{}", e);
                        continue;
                    }
                },
                Err(e) => {
                    warn!(path = %path.display(), "cannot read text file: {}", e);
                    continue;
                }
            };

            if text != last_text {
                debug!(path = %path.display(), "text file changed");
                last_text = text.clone();
                if tx.send(text).is_err() {
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("notch-prompter-src-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_from_args_priority() {
        assert_eq!(
            TextSource::from_args(Some("hi".into()), Some("a.txt".into()), "cfg"),
            TextSource::Inline("hi".into())
        );
        assert_eq!(
            TextSource::from_args(None, Some("-".into()), "cfg"),
            TextSource::Stdin
        );
        assert_eq!(
            TextSource::from_args(None, Some("a.txt".into()), "cfg"),
            TextSource::File("a.txt".into())
        );
        assert_eq!(
            TextSource::from_args(None, None, "cfg"),
            TextSource::Inline("cfg".into())
        );
    }

    #[test]
    fn test_load_file_normalizes_line_endings() {
        let path = temp_file("crlf.txt", "one\r\ntwo\r\n\r\n");
        let text = TextSource::File(path.clone()).load().unwrap();
        assert_eq!(text, "one\ntwo");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_utf8_is_text_source_error() {
        let path = temp_file("binary.txt", "");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = read_text_file(&path).unwrap_err();
        assert!(matches!(err, Error::TextSource(_)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_text_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_watcher_sends_changed_text() {
        let path = temp_file("watched.txt", "first");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_file_watcher(
            path.clone(),
            Duration::from_millis(20),
            "first".to_string(),
            tx,
        );

        // let the watcher record the initial state, then rewrite the file
        tokio::time::sleep(Duration::from_millis(60)).await;
        std::fs::write(&path, "second\n").unwrap();

        let text = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("watcher did not report the change")
            .unwrap();
        assert_eq!(text, "second");

        drop(rx);
        handle.abort();
        std::fs::remove_file(path).ok();
    }
}
