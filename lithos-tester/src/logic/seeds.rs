use anyhow::{Context, Result, bail};
use lithos_game::{decode_to_seed, encode_friendly, parse_share_code};
use std::collections::HashMap;

/// Seed plus the share code it was entered as, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    pub code: Option<String>,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self { seed, code: None }
    }

    #[must_use]
    pub const fn from_share_code(seed: u64, code: String) -> Self {
        Self {
            seed,
            code: Some(code),
        }
    }

    /// The code the seed was entered as, or its canonical `LT-` form.
    #[must_use]
    pub fn share_code(&self) -> String {
        self.code.clone().unwrap_or_else(|| encode_friendly(self.seed))
    }
}

/// Resolve CLI seed arguments into canonical seed metadata.
///
/// Accepts integers, `LT-` share codes, and `all` which expands to every
/// share code.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut pending: Vec<SeedInfo> = Vec::new();
    let mut request_all = false;

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if token.eq_ignore_ascii_case("all") {
            request_all = true;
            continue;
        }

        if let Some(seed) = parse_share_code(token) {
            let trimmed = token.trim();
            if trimmed.starts_with(|c: char| c.is_ascii_alphabetic()) {
                pending.push(SeedInfo::from_share_code(seed, trimmed.to_uppercase()));
            } else {
                pending.push(SeedInfo::from_numeric(seed));
            }
            continue;
        }

        // Negative integers seed the same run as their magnitude.
        if let Ok(value) = token.trim().parse::<i64>() {
            pending.push(SeedInfo::from_numeric(value.unsigned_abs()));
            continue;
        }

        bail!("Unrecognized seed token: {token}");
    }

    if request_all {
        pending.extend(all_share_code_seeds()?);
    }

    let mut deduped: Vec<SeedInfo> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();

    for info in pending {
        if let Some(&existing) = index.get(&info.seed) {
            if let Some(entry) = deduped.get_mut(existing)
                && entry.code.is_none()
                && info.code.is_some()
            {
                *entry = info;
            }
        } else {
            index.insert(info.seed, deduped.len());
            deduped.push(info);
        }
    }

    if deduped.is_empty() {
        deduped.push(SeedInfo::from_numeric(1337));
    }

    Ok(deduped)
}

fn all_share_code_seeds() -> Result<Vec<SeedInfo>> {
    use lithos_game::seed::WORD_LIST;

    let mut seeds = Vec::with_capacity(WORD_LIST.len() * 100);
    for word in WORD_LIST {
        for suffix in 0..100 {
            let code = format!("LT-{word}{suffix:02}");
            let seed = decode_to_seed(&code)
                .with_context(|| format!("failed to parse share code: {code}"))?;
            seeds.push(SeedInfo::from_share_code(seed, code));
        }
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_numeric_and_share_code() {
        let raw = vec!["42".to_string(), "-7".to_string(), "lt-bem21".to_string()];
        let seeds = resolve_seed_inputs(&raw).unwrap();
        assert!(seeds.iter().any(|s| s.seed == 42 && s.code.is_none()));
        assert!(seeds.iter().any(|s| s.seed == 7 && s.code.is_none()));
        assert!(
            seeds
                .iter()
                .any(|s| s.code.as_deref() == Some("LT-BEM21")
                    && Some(s.seed) == decode_to_seed("LT-BEM21"))
        );
    }

    #[test]
    fn padded_tokens_resolve_like_trimmed_ones() {
        let seeds = resolve_seed_inputs(&[" lt-kino07 ".to_string(), " 99 ".to_string()]).unwrap();
        assert_eq!(
            seeds,
            vec![
                SeedInfo::from_share_code(parse_share_code("LT-KINO07").unwrap(), "LT-KINO07".to_string()),
                SeedInfo::from_numeric(99),
            ]
        );
    }

    #[test]
    fn empty_input_defaults_and_junk_fails() {
        let seeds = resolve_seed_inputs(&[]).unwrap();
        assert_eq!(seeds, vec![SeedInfo::from_numeric(1337)]);
        assert!(resolve_seed_inputs(&["XX-NOPE".to_string()]).is_err());
    }

    #[test]
    fn share_code_prefers_the_entered_form() {
        let code = encode_friendly(5);
        let seed = decode_to_seed(&code).unwrap();
        let numeric = SeedInfo::from_numeric(seed);
        let coded = resolve_seed_inputs(&[seed.to_string(), code.clone()]).unwrap();
        assert_eq!(coded.len(), 1);
        assert_eq!(coded[0].code.as_deref(), Some(code.as_str()));
        assert_eq!(numeric.share_code(), code);
    }

    #[test]
    fn expands_all_share_codes() {
        let seeds = resolve_seed_inputs(&["all".to_string()]).unwrap();
        assert_eq!(seeds.len(), lithos_game::seed::WORD_LIST.len() * 100);
        assert!(seeds.iter().all(|s| s.code.is_some()));
    }
}
