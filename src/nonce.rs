/// Source of Interest nonces. One value is drawn for every Interest sent.
pub trait NonceSource {
    fn next_nonce(&mut self) -> u32;
}

/// Hands out consecutive nonces, for reproducible runs.
#[derive(Clone, Debug, Default)]
pub struct SequentialNonces {
    next: u32,
}

impl SequentialNonces {
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }
}

impl NonceSource for SequentialNonces {
    fn next_nonce(&mut self) -> u32 {
        let nonce = self.next;
        self.next = self.next.wrapping_add(1);
        nonce
    }
}

impl<F: FnMut() -> u32> NonceSource for F {
    fn next_nonce(&mut self) -> u32 {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_wraps() {
        let mut nonces = SequentialNonces::starting_at(u32::MAX);
        assert_eq!(nonces.next_nonce(), u32::MAX);
        assert_eq!(nonces.next_nonce(), 0);
        assert_eq!(nonces.next_nonce(), 1);
    }

    #[test]
    fn test_closure_source() {
        let mut calls = 0;
        let mut source = || {
            calls += 1;
            calls * 10
        };
        assert_eq!(source.next_nonce(), 10);
        assert_eq!(source.next_nonce(), 20);
    }
}
