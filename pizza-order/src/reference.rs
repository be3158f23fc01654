use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 6;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Builds payment references of the form `PREFIX_<unix millis>_<6 base36 chars>`.
///
/// Collisions are possible in principle; the order store's unique index is the arbiter.
#[derive(Debug, Clone)]
pub struct ReferenceGenerator {
    prefix: String,
}

impl ReferenceGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        format!("{}_{}_{}", self.prefix, Utc::now().timestamp_millis(), suffix)
    }
}

impl Default for ReferenceGenerator {
    fn default() -> Self {
        Self::new("PIZZA")
    }
}
