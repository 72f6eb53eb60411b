mod reference;
pub use reference::*;

use crate::{face::FaceToken, name::Name};

/// How strongly a route should be preferred. Green routes are known to work
/// and are tried first, red ones are known to be broken.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoutePreference {
    Green,
    Yellow,
    Red,
}

pub trait RouteTable {
    // FIB methods
    // Interests under "prefix" will be forwarded to "face". Call this again
    //  with the same face to change the preference.
    fn add_or_update_route(&mut self, prefix: &Name, face: FaceToken, preference: RoutePreference);
}

impl<T: RouteTable + ?Sized> RouteTable for &mut T {
    fn add_or_update_route(&mut self, prefix: &Name, face: FaceToken, preference: RoutePreference) {
        (**self).add_or_update_route(prefix, face, preference)
    }
}
