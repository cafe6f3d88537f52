//! Single-consumer inbox for everything that arrives asynchronously.
//!
//! Producers (landmark thread, asset loader, window events) hold an
//! [`InboxSender`]; the session drains the queue once per tick in arrival
//! order, so the latest value wins for every latched field.

use crate::assets::{AssetTarget, ImageHandle};
use crate::error::AssetError;
use crate::gesture::{HandLandmarks, PointerEvent};
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Clone, Debug)]
pub enum InboxMessage {
    CameraStarted,
    CameraFailed(String),
    /// One tracked sample; `None` means no hand in view.
    Landmarks(Option<HandLandmarks>),
    Pointer(PointerEvent),
    AssetLoaded {
        target: AssetTarget,
        result: Result<ImageHandle, AssetError>,
    },
}

/// Cloneable producer handle.
///
/// Sends return `false` once the session is gone so producer threads can stop.
#[derive(Clone)]
pub struct InboxSender {
    tx: Sender<InboxMessage>,
}

impl InboxSender {
    pub fn send(&self, message: InboxMessage) -> bool {
        self.tx.send(message).is_ok()
    }

    pub fn pointer(&self, event: PointerEvent) -> bool {
        self.send(InboxMessage::Pointer(event))
    }

    pub fn landmarks(&self, hand: Option<HandLandmarks>) -> bool {
        self.send(InboxMessage::Landmarks(hand))
    }
}

pub struct Inbox {
    tx: Sender<InboxMessage>,
    rx: Receiver<InboxMessage>,
}

impl Inbox {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> InboxSender {
        InboxSender {
            tx: self.tx.clone(),
        }
    }

    /// Everything queued so far, oldest first.
    pub fn drain(&self) -> impl Iterator<Item = InboxMessage> + '_ {
        self.rx.try_iter()
    }
}

impl Default for Inbox {
    fn default() -> Self {
        Self::new()
    }
}
