use crate::clock::Timestamp;

/// A leaky-bucket allowance for outgoing Interests on one face.
///
/// Every admitted Interest adds one unit to the bucket and the bucket drains
/// at `bucket_leak` units per second. A non-positive `bucket_max` disables the
/// limit entirely.
#[derive(Clone, Debug, PartialEq)]
pub struct AdmissionGate {
    bucket: f64,
    bucket_max: f64,
    bucket_leak: f64,
    last_leak: Option<Timestamp>,
}

impl AdmissionGate {
    pub fn new(bucket_max: f64, bucket_leak: f64) -> Self {
        Self {
            bucket: 0.0,
            bucket_max,
            bucket_leak,
            last_leak: None,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(-1.0, 0.0)
    }

    pub fn is_limited(&self) -> bool {
        self.bucket_max > 0.0
    }

    pub fn bucket(&self) -> f64 {
        self.bucket
    }

    pub fn set_bucket_max(&mut self, bucket_max: f64) {
        self.bucket_max = bucket_max;
    }

    pub fn set_bucket_leak(&mut self, bucket_leak: f64) {
        self.bucket_leak = bucket_leak;
    }

    /// Consumes one unit of allowance if there is room for it.
    pub fn try_admit(&mut self) -> bool {
        if !self.is_limited() {
            return true;
        }
        if self.bucket + 1.0 > self.bucket_max {
            return false;
        }
        self.bucket += 1.0;
        true
    }

    /// Drains the bucket in proportion to the time since the last drain.
    ///
    /// The first call only starts the measurement. Leaks smaller than one unit
    /// are deferred so that frequent calls do not lose fractional progress.
    pub fn leak(&mut self, now: Timestamp) {
        let last = match self.last_leak {
            Some(last) => last,
            None => {
                self.last_leak = Some(now);
                return;
            }
        };

        let elapsed_ms = now.difference(&last).unwrap_or(0);
        let leak = self.bucket_leak * (elapsed_ms as f64 / 1000.0);
        if leak >= 1.0 {
            self.bucket = (self.bucket - leak).max(0.0);
            self.last_leak = Some(now);
        }
    }
}

impl Default for AdmissionGate {
    fn default() -> Self {
        Self::unlimited()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_always_admits() {
        let mut gate = AdmissionGate::unlimited();
        for _ in 0..1000 {
            assert!(gate.try_admit());
        }
        assert_eq!(gate.bucket(), 0.0);
    }

    #[test]
    fn test_bucket_fills_up() {
        let mut gate = AdmissionGate::new(2.0, 1.0);
        assert!(gate.try_admit());
        assert!(gate.try_admit());
        assert!(!gate.try_admit());
        assert_eq!(gate.bucket(), 2.0);
    }

    #[test]
    fn test_leak() {
        let mut gate = AdmissionGate::new(2.0, 4.0);
        let t0 = Timestamp::from_ms(10_000);
        gate.leak(t0);
        assert!(gate.try_admit());
        assert!(gate.try_admit());
        assert!(!gate.try_admit());

        // 100ms at 4 per second is less than one unit, nothing drains yet
        gate.leak(t0.adding(100));
        assert!(!gate.try_admit());

        // 250ms from the last drain is exactly one unit
        gate.leak(t0.adding(250));
        assert_eq!(gate.bucket(), 1.0);
        assert!(gate.try_admit());
        assert!(!gate.try_admit());

        // Never goes below empty
        gate.leak(t0.adding(60_000));
        assert_eq!(gate.bucket(), 0.0);
    }

    #[test]
    fn test_clock_going_backwards_does_not_refill() {
        let mut gate = AdmissionGate::new(1.0, 1000.0);
        let t0 = Timestamp::from_ms(5_000);
        gate.leak(t0);
        assert!(gate.try_admit());
        gate.leak(t0.removing(1_000));
        assert!(!gate.try_admit());
    }
}
