use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    face::FaceToken,
    name::Name,
    tables::{RoutePreference, RouteTable},
};

// The reference FIB keeps one entry per registered prefix and answers
//  lookups by longest prefix match:
// 1. Walk from the full name towards the root, dropping one component at a time.
// 2. The first prefix that has any routes wins, shorter prefixes are not consulted.
// 3. Next hops within the entry are ordered by preference, then by face.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pub face: FaceToken,
    pub preference: RoutePreference,
}

#[derive(Clone, Debug, Default)]
pub struct ReferenceRoutes {
    entries: BTreeMap<Name, Vec<RouteEntry>>,
}

impl ReferenceRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Routes registered for exactly this prefix.
    pub fn entry(&self, prefix: &Name) -> Option<&[RouteEntry]> {
        self.entries.get(prefix).map(Vec::as_slice)
    }

    /// Next hops for a name, from the longest registered prefix that covers it.
    pub fn routes_for(&self, name: &Name) -> &[RouteEntry] {
        (0..=name.component_count())
            .find_map(|dropped| self.entries.get(&name.prefix(dropped)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn remove_route(&mut self, prefix: &Name, face: FaceToken) -> bool {
        let Some(routes) = self.entries.get_mut(prefix) else {
            return false;
        };
        let before = routes.len();
        routes.retain(|r| r.face != face);
        let removed = routes.len() != before;
        if routes.is_empty() {
            self.entries.remove(prefix);
        }
        removed
    }

    /// Removes the face from every entry, e.g. once it is disconnected.
    pub fn remove_face(&mut self, face: FaceToken) {
        self.entries.retain(|_, routes| {
            routes.retain(|r| r.face != face);
            !routes.is_empty()
        });
    }
}

impl RouteTable for ReferenceRoutes {
    fn add_or_update_route(&mut self, prefix: &Name, face: FaceToken, preference: RoutePreference) {
        let routes = self.entries.entry(prefix.clone()).or_default();
        match routes.iter_mut().find(|r| r.face == face) {
            Some(existing) => existing.preference = preference,
            None => routes.push(RouteEntry { face, preference }),
        }
        routes.sort_by_key(|r| (r.preference, r.face));
        debug!(%prefix, face = face.0, ?preference, "route registered");
    }
}
