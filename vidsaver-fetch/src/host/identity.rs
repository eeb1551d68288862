//! Client identity rotation.
//!
//! Every outbound request picks a user agent uniformly at random from a
//! read-only pool, so consecutive requests are not trivially linkable.
//! The pool is a plain value held by the fetch context; tests swap in a
//! single fixed identity.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Used only if a pool somehow ends up empty.
const FALLBACK_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Built-in identities: (device class, user agent).
const BUILTIN_IDENTITIES: &[(DeviceClass, &str)] = &[
    // iPhone Safari
    (
        DeviceClass::Mobile,
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 \
         (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
    ),
    (
        DeviceClass::Mobile,
        "Mozilla/5.0 (iPhone; CPU iPhone OS 16_6 like Mac OS X) AppleWebKit/605.1.15 \
         (KHTML, like Gecko) Version/16.6 Mobile/15E148 Safari/604.1",
    ),
    // Android Chrome
    (
        DeviceClass::Mobile,
        "Mozilla/5.0 (Linux; Android 14; SM-S918B) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/120.0.6099.144 Mobile Safari/537.36",
    ),
    (
        DeviceClass::Mobile,
        "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/119.0.0.0 Mobile Safari/537.36",
    ),
    // Desktop
    (
        DeviceClass::Desktop,
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (DeviceClass::Desktop, FALLBACK_USER_AGENT),
    // Instagram in-app browser
    (
        DeviceClass::InApp,
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 \
         (KHTML, like Gecko) Mobile/15E148 Instagram 305.0.0.21.111",
    ),
    (
        DeviceClass::InApp,
        "Mozilla/5.0 (Linux; Android 12; SM-A525F Build/SP1A.210812.016; wv) \
         AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/118.0.0.0 \
         Mobile Safari/537.36 Instagram 305.0.0.21.111",
    ),
];

// ============================================================================
// Client Identity
// ============================================================================

/// Broad family of a client identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Phone browser.
    Mobile,
    /// Desktop browser.
    Desktop,
    /// A social app's embedded web view.
    InApp,
}

/// One client identity presented to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIdentity {
    /// Device family.
    pub class: DeviceClass,
    /// User agent header value.
    pub user_agent: String,
}

impl ClientIdentity {
    /// Creates an identity.
    pub fn new(class: DeviceClass, user_agent: impl Into<String>) -> Self {
        Self {
            class,
            user_agent: user_agent.into(),
        }
    }
}

// ============================================================================
// Identity Pool
// ============================================================================

/// Read-only pool of client identities.
#[derive(Debug, Clone)]
pub struct IdentityPool {
    profiles: Vec<ClientIdentity>,
}

impl IdentityPool {
    /// Creates a pool. An empty list falls back to the built-in identities.
    pub fn new(profiles: Vec<ClientIdentity>) -> Self {
        if profiles.is_empty() {
            return Self::builtin();
        }
        Self { profiles }
    }

    /// The built-in mix of mobile, desktop and in-app identities.
    pub fn builtin() -> Self {
        Self {
            profiles: BUILTIN_IDENTITIES
                .iter()
                .map(|(class, ua)| ClientIdentity::new(*class, *ua))
                .collect(),
        }
    }

    /// A pool that always yields the same user agent.
    pub fn fixed(user_agent: impl Into<String>) -> Self {
        Self {
            profiles: vec![ClientIdentity::new(DeviceClass::Desktop, user_agent)],
        }
    }

    /// Picks a user agent uniformly at random.
    pub fn pick(&self) -> &str {
        self.pick_with(&mut rand::thread_rng())
    }

    /// Picks a user agent using the given random source.
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.profiles
            .choose(rng)
            .map_or(FALLBACK_USER_AGENT, |p| p.user_agent.as_str())
    }

    /// All identities in the pool.
    pub fn profiles(&self) -> &[ClientIdentity] {
        &self.profiles
    }

    /// Number of identities.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for IdentityPool {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// Tests
// ============================================================================
