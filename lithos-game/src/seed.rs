//! Reversible share codes for seeds.
//! Code format: `LT-<WORD><NN>`, e.g. `LT-BASALT42`.

const CODE_PREFIX: &str = "LT";

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    bytes.iter().fold(FNV_OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

fn sanitize_word(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub const WORD_LIST: [&str; 64] = [
    "BASALT", "GRANITE", "FLINT", "QUARTZ", "OBSIDN", "MARBLE", "SLATE", "PUMICE", "GNEISS",
    "SHALE", "PAINITE", "PEARL", "CORAL", "SULFUR", "NITRIC", "SALT", "CLAY", "GRAPES", "TIMBER",
    "EMBER", "FURNACE", "BATEA", "SPEAR", "POTION", "ALEMBIC", "RETORT", "CRUCIBL", "KILN",
    "RIVER", "FOREST", "BEACH", "CAVE", "SHORE", "TIDE", "STORM", "SUNRISE", "DAWN", "DUSK",
    "LANTERN", "COMPASS", "MAP", "TORCH", "KINO", "BEM", "AKIO", "STATUE", "PETRIFY", "AWAKEN",
    "REVIVE", "HOPE", "SCIENCE", "ROCKET", "ENGINE", "GEAR", "LENS", "PRISM", "BEAKER", "FLASK",
    "ANVIL", "CHISEL", "HAMMER", "PULLEY", "LEVER", "WHEEL",
];

#[inline]
const fn pack(word_index: u16, nn: u8) -> u16 {
    (word_index & 0x01FF) | ((nn as u16 & 0x7F) << 9)
}

#[inline]
const fn unpack(packed: u16) -> (u16, u8) {
    (packed & 0x01FF, ((packed >> 9) & 0x7F) as u8)
}

fn compose_seed(word_index: u16, nn: u8) -> u64 {
    let packed = pack(word_index, nn);
    let [lo, hi] = packed.to_le_bytes();
    // Domain-separated FNV input
    let mut buf = [0u8; 10];
    buf[..7].copy_from_slice(b"LITHOS-");
    buf[7] = lo;
    buf[8] = hi;
    buf[9] = 0x5A;
    let h = fnv1a64(&buf);
    (h & 0xFFFF_FFFF_FFFF_0000) | u64::from(packed)
}

/// Render the low 16 bits of `seed` as a share code.
#[must_use]
pub fn encode_friendly(seed: u64) -> String {
    let [lo, hi, ..] = seed.to_le_bytes();
    let (wi, nn) = unpack(u16::from_le_bytes([lo, hi]));
    let word = WORD_LIST
        .get(usize::from(wi))
        .copied()
        .unwrap_or(WORD_LIST[0]);
    format!("{CODE_PREFIX}-{word}{:02}", nn % 100)
}

/// Recover the canonical seed for a share code.
#[must_use]
pub fn decode_to_seed(code: &str) -> Option<u64> {
    let (prefix, rest) = code.trim().split_once('-')?;
    if !prefix.eq_ignore_ascii_case(CODE_PREFIX) || !rest.is_ascii() || rest.len() < 3 {
        return None;
    }
    let (word_part, nn_part) = rest.split_at(rest.len().checked_sub(2)?);
    let nn: u8 = nn_part.parse().ok()?;
    let word = sanitize_word(word_part);
    let idx = WORD_LIST.iter().position(|w| sanitize_word(w) == word)?;
    let wi = u16::try_from(idx).ok()?;
    Some(compose_seed(wi, nn))
}

/// Accept either a share code or a plain decimal seed.
#[must_use]
pub fn parse_share_code(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    trimmed
        .parse::<u64>()
        .ok()
        .or_else(|| decode_to_seed(trimmed))
}
