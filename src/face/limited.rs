use tracing::debug;

use crate::{
    clock::Clock,
    face::{AdmissionGate, FaceToken, InterestSender},
    packet::Interest,
};

/// An outgoing face that only passes Interests on while it is up and its
/// admission gate has room. Refused Interests are dropped, not queued.
pub struct LimitedFace<S, C>
where
    S: InterestSender,
    C: Clock,
{
    token: FaceToken,
    sender: S,
    clock: C,
    gate: AdmissionGate,
    up: bool,
    refused: u64,
}

impl<S, C> LimitedFace<S, C>
where
    S: InterestSender,
    C: Clock,
{
    pub fn new(token: FaceToken, sender: S, clock: C, gate: AdmissionGate) -> Self {
        Self {
            token,
            sender,
            clock,
            gate,
            up: true,
            refused: 0,
        }
    }

    pub fn token(&self) -> FaceToken {
        self.token
    }

    pub fn set_up(&mut self, up: bool) {
        self.up = up;
    }

    pub fn is_up(&self) -> bool {
        self.up
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut AdmissionGate {
        &mut self.gate
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// How many Interests were dropped because the face was down or full.
    pub fn refused(&self) -> u64 {
        self.refused
    }
}

impl<S, C> InterestSender for LimitedFace<S, C>
where
    S: InterestSender,
    C: Clock,
{
    fn send(&mut self, interest: Interest) {
        if !self.up {
            self.refused += 1;
            debug!(face = self.token.0, name = %interest.name, "face is down, dropping interest");
            return;
        }

        self.gate.leak(self.clock.now());
        if !self.gate.try_admit() {
            self.refused += 1;
            debug!(face = self.token.0, name = %interest.name, "interest limit reached, dropping interest");
            return;
        }

        self.sender.send(interest)
    }
}
