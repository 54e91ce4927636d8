use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-key sliding-window limiter for the forgot-password endpoint. Purely
/// in-process: this service runs as a single instance and the source sets
/// no distributed policy.
pub struct Throttle {
    max_requests: u32,
    window: Duration,
    hits: Mutex<HashMap<String, Vec<Instant>>>,
}

impl Throttle {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Record a hit for the key; true when still within the limit.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut hits = self.hits.lock().expect("throttle lock poisoned");
        let entries = hits.entry(key.to_string()).or_default();
        entries.retain(|t| now.duration_since(*t) < self.window);
        if entries.len() as u32 >= self.max_requests {
            return false;
        }
        entries.push(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_up_to_max_then_blocks() {
        let throttle = Throttle::new(3, Duration::from_secs(60));
        assert!(throttle.check("ana@x.com"));
        assert!(throttle.check("ana@x.com"));
        assert!(throttle.check("ana@x.com"));
        assert!(!throttle.check("ana@x.com"));
    }

    #[test]
    fn keys_are_independent() {
        let throttle = Throttle::new(1, Duration::from_secs(60));
        assert!(throttle.check("ana@x.com"));
        assert!(!throttle.check("ana@x.com"));
        assert!(throttle.check("bob@x.com"));
    }

    #[test]
    fn window_expiry_readmits() {
        let throttle = Throttle::new(1, Duration::from_millis(20));
        assert!(throttle.check("ana@x.com"));
        assert!(!throttle.check("ana@x.com"));
        std::thread::sleep(Duration::from_millis(30));
        assert!(throttle.check("ana@x.com"));
    }
}
