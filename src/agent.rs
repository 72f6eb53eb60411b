use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, trace};

use crate::{
    clock::{Clock, Timestamp},
    config::AgentConfig,
    face::{FaceToken, InterestSender},
    name::Name,
    nonce::NonceSource,
    packet::{Interest, InterestTemplate},
    tables::{RoutePreference, RouteTable},
};

// The handoff agent sits in front of a mobile producer and serves one prefix.
// Interests for that prefix are named <prefix>/<sequence number>.
//
// Until the handoff instant (start time + configured delay) the producer is
//  considered unreachable. With the open cache enabled, the sequence numbers
//  requested in that window are remembered. Once the handoff has happened and
//  a locator is known, every matching Interest is relayed towards the locator,
//  and the first one to arrive also triggers a replay of everything remembered.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentState {
    Idle,
    Running(BufferState),
    Stopped,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BufferState {
    #[default]
    NotBuffering,
    // Never empty: the set is created with its first entry and dropped when drained
    Buffering(BTreeSet<u32>),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InterestOutcome {
    Dropped(DropReason),
    /// Held back until the handoff completes.
    Buffered { sequence: u32 },
    /// Relayed towards the locator, after `replayed` held-back Interests.
    Forwarded { replayed: usize },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// The agent has not been started, or has been stopped.
    Inactive,
    /// The name is not `<prefix>/<something>`.
    PrefixMismatch,
    /// Before the handoff (or without a locator) and the open cache is off.
    NotServed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("agent has already been started")]
    AlreadyStarted,
    #[error("agent is not running")]
    NotRunning,
}

pub struct HandoffAgent<C, S, N>
where
    C: Clock,
    S: InterestSender,
    N: NonceSource,
{
    config: AgentConfig,
    face: FaceToken,
    clock: C,
    sender: S,
    nonces: N,
    state: AgentState,
    handoff_instant: Option<Timestamp>,
}

impl<C, S, N> HandoffAgent<C, S, N>
where
    C: Clock,
    S: InterestSender,
    N: NonceSource,
{
    pub fn new(config: AgentConfig, face: FaceToken, clock: C, sender: S, nonces: N) -> Self {
        Self {
            config,
            face,
            clock,
            sender,
            nonces,
            state: AgentState::Idle,
            handoff_instant: None,
        }
    }

    /// Registers the prefix as preferably reachable through this agent's face
    /// and fixes the handoff instant.
    pub fn start<R: RouteTable>(&mut self, routes: &mut R) -> Result<(), LifecycleError> {
        if self.state != AgentState::Idle {
            return Err(LifecycleError::AlreadyStarted);
        }

        routes.add_or_update_route(&self.config.prefix, self.face, RoutePreference::Green);

        let handoff_instant = self.clock.now().adding(self.config.handoff_delay_ms);
        self.handoff_instant = Some(handoff_instant);
        self.state = AgentState::Running(BufferState::NotBuffering);

        info!(
            prefix = %self.config.prefix,
            locator = %self.config.locator,
            handoff_at_ms = handoff_instant.ms_since_1970,
            "handoff agent started"
        );
        Ok(())
    }

    /// Stops processing. Anything still held back is discarded.
    pub fn stop(&mut self) -> Result<(), LifecycleError> {
        let AgentState::Running(buffer) = &self.state else {
            return Err(LifecycleError::NotRunning);
        };
        if let BufferState::Buffering(pending) = buffer {
            debug!(discarded = pending.len(), "stopping with held-back interests");
        }

        self.state = AgentState::Stopped;
        info!(prefix = %self.config.prefix, "handoff agent stopped");
        Ok(())
    }

    pub fn on_interest(&mut self, interest: &Interest) -> InterestOutcome {
        let AgentState::Running(buffer) = &mut self.state else {
            trace!(name = %interest.name, "agent not running, dropping interest");
            return InterestOutcome::Dropped(DropReason::Inactive);
        };

        // This agent serves exactly one prefix, with one trailing sequence number
        if interest.name.is_empty() || interest.name.prefix(1) != self.config.prefix {
            trace!(name = %interest.name, "interest outside of served prefix");
            return InterestOutcome::Dropped(DropReason::PrefixMismatch);
        }

        let now = self.clock.now();
        let handoff_done = self.handoff_instant.is_some_and(|at| now >= at);

        if self.config.has_locator() && handoff_done {
            let nonce = self.nonces.next_nonce();
            let template = InterestTemplate::relaying(
                interest,
                &self.config.locator,
                self.config.relay,
                nonce,
            );

            let mut replayed = 0;
            if let BufferState::Buffering(pending) = core::mem::take(buffer) {
                for sequence in pending {
                    let name = self.config.prefix.appending(sequence.to_string());
                    debug!(%name, locator = %template.locator, "replaying held-back interest");
                    self.sender.send(template.instantiate(name));
                    replayed += 1;
                }
            }

            debug!(name = %interest.name, locator = %template.locator, nonce, "relaying interest");
            self.sender.send(template.instantiate(interest.name.clone()));

            return InterestOutcome::Forwarded { replayed };
        }

        if !self.config.open_cache {
            trace!(name = %interest.name, "handoff pending and open cache is off, dropping");
            return InterestOutcome::Dropped(DropReason::NotServed);
        }

        let sequence = parse_sequence(&interest.name);
        match buffer {
            BufferState::Buffering(pending) => {
                pending.insert(sequence);
            }
            BufferState::NotBuffering => {
                *buffer = BufferState::Buffering(BTreeSet::from([sequence]));
            }
        }
        debug!(name = %interest.name, sequence, "holding interest until handoff");

        InterestOutcome::Buffered { sequence }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn face(&self) -> FaceToken {
        self.face
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AgentState::Running(_))
    }

    pub fn is_open_cache(&self) -> bool {
        self.config.open_cache
    }

    pub fn is_buffering(&self) -> bool {
        matches!(self.state, AgentState::Running(BufferState::Buffering(_)))
    }

    /// Sequence numbers held back for replay, in ascending order.
    pub fn pending(&self) -> impl Iterator<Item = u32> + '_ {
        let pending = match &self.state {
            AgentState::Running(BufferState::Buffering(pending)) => Some(pending),
            _ => None,
        };
        pending.into_iter().flatten().copied()
    }

    /// When the handoff completes. Known once the agent has started.
    pub fn handoff_instant(&self) -> Option<Timestamp> {
        self.handoff_instant
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn sender_mut(&mut self) -> &mut S {
        &mut self.sender
    }
}

// Producers name their Interests <prefix>/<sequence number>. Anything else
//  reaching an open-cache agent means the naming schemes disagree upstream.
fn parse_sequence(name: &Name) -> u32 {
    let component = name.last_component();
    match component.parse() {
        Ok(sequence) => sequence,
        Err(err) => panic!(
            "interest {} does not end in a sequence number ({:?}: {})",
            name, component, err
        ),
    }
}
