//! Builders for individual entities: users, timestamps and security findings.

use chrono::{Duration, NaiveDateTime};
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::Rng;

use crate::model::{SecurityFinding, Severity, Timestamp, User};
use crate::pools::{self, ADJECTIVES, NOUNS, VULNERABILITY_TYPES};

/// Relative odds of a pull request carrying 0, 1, 2, 3 or 4 findings.
pub const FINDING_COUNT_WEIGHTS: [u32; 5] = [20, 40, 25, 10, 5];

/// Findings are commented within this many days of the pull request opening.
const FINDING_DELAY_DAYS: i64 = 1;

/// Distribution over finding counts, indexed by count.
pub fn finding_count_distribution() -> Result<WeightedIndex<u32>, WeightedError> {
    WeightedIndex::new(FINDING_COUNT_WEIGHTS)
}

/// Build a user record. The id is drawn fresh on every call.
pub fn user<R: Rng + ?Sized>(rng: &mut R, login: &str) -> User {
    User {
        login: login.to_string(),
        id: rng.gen_range(10_000..=99_999),
        avatar_url: format!("https://i.pravatar.cc/150?u={}", login),
        html_url: format!("https://github.com/{}", login),
    }
}

/// A random instant after `base`: up to `max_days` days, plus 1-23 hours and 1-59 minutes.
pub fn timestamp<R: Rng + ?Sized>(rng: &mut R, base: NaiveDateTime, max_days: i64) -> Timestamp {
    let offset = Duration::days(rng.gen_range(0..=max_days))
        + Duration::hours(rng.gen_range(1..=23))
        + Duration::minutes(rng.gen_range(1..=59));
    Timestamp::new(base + offset)
}

/// Generate the security bot's findings for a pull request opened at `created_at`.
pub fn security_analysis<R: Rng + ?Sized>(
    rng: &mut R,
    counts: &WeightedIndex<u32>,
    created_at: Timestamp,
) -> Vec<SecurityFinding> {
    let count = counts.sample(rng);
    (0..count)
        .map(|_| security_finding(&mut *rng, created_at))
        .collect()
}

fn security_finding<R: Rng + ?Sized>(rng: &mut R, created_at: Timestamp) -> SecurityFinding {
    // Built from RNG bytes so seeded runs reproduce ids
    let id = uuid::Builder::from_random_bytes(rng.gen::<[u8; 16]>()).into_uuid();
    let severity = Severity::ALL[rng.gen_range(0..Severity::ALL.len())];
    let vulnerability_type = pools::pick(rng, VULNERABILITY_TYPES).to_string();
    let file_path = format!(
        "src/{}/util/{}.py",
        pools::pick(rng, ADJECTIVES),
        pools::pick(rng, NOUNS)
    );

    SecurityFinding {
        id,
        severity,
        vulnerability_type,
        file_path,
        line_number: rng.gen_range(10..=200),
        comment_created_at: timestamp(rng, created_at.naive(), FINDING_DELAY_DAYS),
    }
}
