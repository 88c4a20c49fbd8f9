//! Static candidate pools the generator samples from.

use rand::Rng;

/// Repository name prefixes, also used as the directory in finding file paths.
pub const ADJECTIVES: &[&str] = &[
    "auth",
    "payment",
    "user",
    "notification",
    "api",
    "data",
    "infra",
    "search",
];

/// Repository name suffixes, also used as the file stem in finding file paths.
pub const NOUNS: &[&str] = &[
    "service", "gateway", "engine", "handler", "manager", "pipeline", "proxy", "core",
];

pub const VERBS: &[&str] = &["Refactor", "Implement", "Fix", "Update", "Improve", "Add", "Remove"];

pub const SUBJECTS: &[&str] = &[
    "login logic",
    "caching layer",
    "API endpoint",
    "database schema",
    "user authentication",
];

pub const USER_LOGINS: &[&str] = &[
    "jdoe", "asmith", "bwhite", "mgreen", "kblack", "dev-lead", "s-kim", "r-chen",
];

pub const VULNERABILITY_TYPES: &[&str] = &[
    "SQL Injection",
    "Cross-Site Scripting (XSS)",
    "Insecure Deserialization",
    "Broken Authentication",
    "Sensitive Data Exposure",
    "Command Injection",
];

/// Number of distinct `{adjective}-{noun}` repository names.
pub const fn repository_name_capacity() -> usize {
    ADJECTIVES.len() * NOUNS.len()
}

/// Pick one entry uniformly. Pools are non-empty constants.
pub fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool[rng.gen_range(0..pool.len())]
}
