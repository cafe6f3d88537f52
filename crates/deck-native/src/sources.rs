//! Producers that run off the render thread: the landmark replay source and
//! the filesystem asset loader. Both talk to the session only through its inbox.

use anyhow::Context;
use deck_core::{
    AssetError, AssetRequest, HandLandmarks, ImageHandle, InboxMessage, InboxSender, Landmark,
    HAND_LANDMARK_COUNT,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

// ---------------- Landmark replay ----------------

/// Plays back a recorded hand-tracking capture as if it were a live camera.
///
/// One sample per line: `-` for "no hand", otherwise 63 whitespace-separated
/// floats (x y z for each of the 21 landmarks). Blank lines and `#` comments
/// are skipped. The capture loops until the session goes away.
pub struct ReplaySource {
    pub path: PathBuf,
    pub frame: Duration,
}

impl ReplaySource {
    pub fn start(self, inbox: InboxSender) {
        let fail_inbox = inbox.clone();
        let spawned = thread::Builder::new()
            .name("landmark-replay".into())
            .spawn(move || self.run(inbox));
        if let Err(e) = spawned {
            fail_inbox.send(InboxMessage::CameraFailed(format!(
                "could not start replay thread: {e}"
            )));
        }
    }

    fn run(self, inbox: InboxSender) {
        let samples = match load_capture(&self.path) {
            Ok(s) if !s.is_empty() => s,
            Ok(_) => {
                inbox.send(InboxMessage::CameraFailed(format!(
                    "{} has no samples",
                    self.path.display()
                )));
                return;
            }
            Err(e) => {
                inbox.send(InboxMessage::CameraFailed(format!("{e:#}")));
                return;
            }
        };
        log::info!(
            "[input] replaying {} landmark samples from {}",
            samples.len(),
            self.path.display()
        );
        if !inbox.send(InboxMessage::CameraStarted) {
            return;
        }
        loop {
            for sample in &samples {
                if !inbox.landmarks(sample.clone()) {
                    return;
                }
                thread::sleep(self.frame);
            }
        }
    }
}

pub fn load_capture(path: &Path) -> anyhow::Result<Vec<Option<HandLandmarks>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading capture {}", path.display()))?;
    parse_capture(&text)
}

pub fn parse_capture(text: &str) -> anyhow::Result<Vec<Option<HandLandmarks>>> {
    let mut samples = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == "-" {
            samples.push(None);
            continue;
        }
        let values = line
            .split_whitespace()
            .map(str::parse::<f32>)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("line {}: bad number", n + 1))?;
        anyhow::ensure!(
            values.len() == HAND_LANDMARK_COUNT * 3,
            "line {}: expected {} values, found {}",
            n + 1,
            HAND_LANDMARK_COUNT * 3,
            values.len()
        );
        let points: Vec<Landmark> = values
            .chunks_exact(3)
            .map(|c| Landmark::new(c[0], c[1], c[2]))
            .collect();
        let hand =
            HandLandmarks::from_slice(&points).with_context(|| format!("line {}", n + 1))?;
        samples.push(Some(hand));
    }
    Ok(samples)
}

// ---------------- Asset loading ----------------

/// Resolves image references against a local directory on a worker thread.
///
/// Only the last path segment of a reference is used, so remote URLs map onto
/// a flat directory of downloaded files.
pub struct FsAssetLoader {
    tx: Sender<AssetRequest>,
    inbox: InboxSender,
}

impl FsAssetLoader {
    pub fn spawn(root: PathBuf, inbox: InboxSender) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel::<AssetRequest>();
        let worker_inbox = inbox.clone();
        thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || {
                for request in rx {
                    let result = load_asset(&root, &request.reference);
                    let delivered = worker_inbox.send(InboxMessage::AssetLoaded {
                        target: request.target,
                        result,
                    });
                    if !delivered {
                        return;
                    }
                }
            })
            .context("spawning asset loader")?;
        Ok(Self { tx, inbox })
    }

    /// Queue a load. If the worker has stopped, the request is answered with
    /// an error straight away so the session still draws its fallback.
    pub fn request(&self, request: AssetRequest) {
        log::debug!("[assets] requesting {}", request.reference);
        if let Err(mpsc::SendError(request)) = self.tx.send(request) {
            log::warn!("[assets] loader stopped, {} not requested", request.reference);
            self.inbox.send(InboxMessage::AssetLoaded {
                target: request.target,
                result: Err(AssetError::Io {
                    reference: request.reference,
                    message: "asset loader stopped".into(),
                }),
            });
        }
    }
}

fn load_asset(root: &Path, reference: &str) -> Result<ImageHandle, AssetError> {
    let name = reference.rsplit('/').next().unwrap_or(reference);
    match std::fs::read(root.join(name)) {
        Ok(bytes) if bytes.is_empty() => Err(AssetError::Empty(reference.to_string())),
        Ok(bytes) => Ok(ImageHandle {
            reference: reference.to_string(),
            byte_len: bytes.len(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(AssetError::NotFound(reference.to_string()))
        }
        Err(e) => Err(AssetError::Io {
            reference: reference.to_string(),
            message: e.to_string(),
        }),
    }
}
