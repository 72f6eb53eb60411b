mod gate;
pub use gate::*;

mod limited;
pub use limited::*;

use crate::packet::Interest;

// The Face abstracts away the underlying data transfer.

// Here only the outgoing direction matters: the agent hands finished Interest
//  descriptors to a sender and never hears back. Whether the packet actually
//  leaves (admission limits, a face that is down) is the sender's business.

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceToken(pub u32);

pub trait InterestSender {
    fn send(&mut self, interest: Interest);
}

impl<S: InterestSender + ?Sized> InterestSender for &mut S {
    fn send(&mut self, interest: Interest) {
        (**self).send(interest)
    }
}

impl<S: InterestSender + ?Sized> InterestSender for Box<S> {
    fn send(&mut self, interest: Interest) {
        (**self).send(interest)
    }
}

// Collects everything sent, in order
impl InterestSender for Vec<Interest> {
    fn send(&mut self, interest: Interest) {
        self.push(interest)
    }
}
