use std::sync::mpsc::{Sender, SyncSender, TrySendError};

use tracing::debug;

use crate::{face::InterestSender, packet::Interest};

// Lets the agent hand Interests to a transport running on another thread.
// Sends are fire-and-forget: a receiver that went away or a full queue
//  just means the Interest is lost.

impl InterestSender for Sender<Interest> {
    fn send(&mut self, interest: Interest) {
        if let Err(err) = Sender::send(self, interest) {
            debug!(name = %err.0.name, "transport is gone, dropping interest");
        }
    }
}

impl InterestSender for SyncSender<Interest> {
    fn send(&mut self, interest: Interest) {
        match self.try_send(interest) {
            Ok(()) => {}
            Err(TrySendError::Full(interest)) => {
                debug!(name = %interest.name, "transport queue is full, dropping interest")
            }
            Err(TrySendError::Disconnected(interest)) => {
                debug!(name = %interest.name, "transport is gone, dropping interest")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crate::name::Name;

    use super::*;

    #[test]
    fn test_channel_sender() {
        let (mut tx, rx) = mpsc::channel::<Interest>();
        InterestSender::send(&mut tx, Interest::new(Name::parse("/p/1"), 1));
        assert_eq!(rx.try_recv().unwrap().name.to_string(), "/p/1");

        drop(rx);
        // Must not panic
        InterestSender::send(&mut tx, Interest::new(Name::parse("/p/2"), 2));
    }

    #[test]
    fn test_bounded_channel_drops_when_full() {
        let (mut tx, rx) = mpsc::sync_channel::<Interest>(1);
        InterestSender::send(&mut tx, Interest::new(Name::parse("/p/1"), 1));
        InterestSender::send(&mut tx, Interest::new(Name::parse("/p/2"), 2));
        assert_eq!(rx.try_recv().unwrap().nonce, 1);
        assert!(rx.try_recv().is_err());
    }
}
