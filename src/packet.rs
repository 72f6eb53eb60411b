use crate::name::Name;

/// The fields of an Interest that the handoff agent reads or writes.
///
/// This is a descriptor rather than a wire format: encoding anything but the
/// name is left to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interest {
    pub name: Name,
    pub nonce: u32,
    pub lifetime_ms: Option<u64>,
    pub child_selector: bool,
    pub exclude: Option<Name>,
    pub min_suffix_components: Option<u32>,
    pub max_suffix_components: Option<u32>,
    // Where a relocated producer can currently be reached
    pub locator: Option<Name>,
    // Set when an agent, not the original consumer, sent this Interest
    pub relayed: bool,
}

impl Interest {
    pub fn new(name: Name, nonce: u32) -> Self {
        Self {
            name,
            nonce,
            lifetime_ms: None,
            child_selector: false,
            exclude: None,
            min_suffix_components: None,
            max_suffix_components: None,
            locator: None,
            relayed: false,
        }
    }
}

/// Everything an outgoing relayed Interest carries except its name.
///
/// Built once per inbound Interest and stamped out for the live Interest and
/// for every replayed sequence number, which therefore all share one nonce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterestTemplate {
    pub nonce: u32,
    pub lifetime_ms: Option<u64>,
    pub child_selector: bool,
    pub exclude: Option<Name>,
    pub min_suffix_components: Option<u32>,
    pub max_suffix_components: Option<u32>,
    pub locator: Name,
    pub relayed: bool,
}

impl InterestTemplate {
    pub fn relaying(inbound: &Interest, locator: &Name, relayed: bool, nonce: u32) -> Self {
        // An empty exclusion filter carries no information, so it is not copied
        let exclude = inbound
            .exclude
            .as_ref()
            .filter(|exclude| !exclude.is_empty())
            .cloned();

        Self {
            nonce,
            lifetime_ms: inbound.lifetime_ms,
            child_selector: inbound.child_selector,
            exclude,
            min_suffix_components: inbound.min_suffix_components,
            max_suffix_components: inbound.max_suffix_components,
            locator: locator.clone(),
            relayed,
        }
    }

    pub fn instantiate(&self, name: Name) -> Interest {
        Interest {
            name,
            nonce: self.nonce,
            lifetime_ms: self.lifetime_ms,
            child_selector: self.child_selector,
            exclude: self.exclude.clone(),
            min_suffix_components: self.min_suffix_components,
            max_suffix_components: self.max_suffix_components,
            locator: Some(self.locator.clone()),
            relayed: self.relayed,
        }
    }
}
