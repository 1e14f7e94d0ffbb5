//! Seeded random streams shared by every engine.
//!
//! A single user seed fans out into independent, domain-separated streams so
//! that adding a draw to one system never shifts the rolls of another.
use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use sha2::Sha256;

/// Upper bound (exclusive) of every percent roll.
pub const PERCENT_ROLL_MAX: u32 = 100;

/// Draw a uniform integer in `0..100`.
pub fn roll_percent<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(0..PERCENT_ROLL_MAX)
}

/// Roll against a percent chance. Chances above 100 always hit, chances at or
/// below zero never do.
pub fn percent_hit<R: Rng + ?Sized>(rng: &mut R, chance: i32) -> bool {
    i64::from(roll_percent(rng)) < i64::from(chance)
}

/// Named random streams owned by a game session.
#[derive(Debug, Clone)]
pub struct RngBundle {
    weather: CountingRng<SmallRng>,
    drops: CountingRng<SmallRng>,
    hazard: CountingRng<SmallRng>,
    companion: CountingRng<SmallRng>,
    craft: CountingRng<SmallRng>,
    tools: CountingRng<SmallRng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            weather: CountingRng::new(derive_stream_seed(seed, b"weather")),
            drops: CountingRng::new(derive_stream_seed(seed, b"drops")),
            hazard: CountingRng::new(derive_stream_seed(seed, b"hazard")),
            companion: CountingRng::new(derive_stream_seed(seed, b"companion")),
            craft: CountingRng::new(derive_stream_seed(seed, b"craft")),
            tools: CountingRng::new(derive_stream_seed(seed, b"tools")),
        }
    }

    /// Daily weather rolls.
    pub const fn weather(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.weather
    }

    /// Material drop rolls, including the deep sea scan.
    pub const fn drops(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.drops
    }

    /// Hazard checks and hazard losses.
    pub const fn hazard(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.hazard
    }

    /// Companion-driven exploration events.
    pub const fn companion(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.companion
    }

    /// Craft success rolls.
    pub const fn craft(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.craft
    }

    /// Tool usage rolls (panning, hunting).
    pub const fn tools(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.tools
    }

    /// Total draws across every stream.
    #[must_use]
    pub const fn total_draws(&self) -> u64 {
        self.weather
            .draws()
            .saturating_add(self.drops.draws())
            .saturating_add(self.hazard.draws())
            .saturating_add(self.companion.draws())
            .saturating_add(self.craft.draws())
            .saturating_add(self.tools.draws())
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    // HMAC accepts keys of any length.
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    for (dst, src) in seed_bytes.iter_mut().zip(digest.iter()) {
        *dst = *src;
    }
    u64::from_le_bytes(seed_bytes)
}
