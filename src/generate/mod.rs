pub mod factory;
pub mod risk;

use chrono::{Duration, NaiveDateTime};
use rand::distributions::{WeightedError, WeightedIndex};
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::config::{ConfigError, GeneratorConfig};
use crate::model::{PrState, PullRequest, Repository, RepositoryAnalytics, ResolutionStatus};
use crate::pools::{self, ADJECTIVES, NOUNS, SUBJECTS, USER_LOGINS, VERBS};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid generator configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid finding count weights: {0}")]
    Weights(#[from] WeightedError),
}

/// First pull request number in every repository.
pub const FIRST_PR_NUMBER: u32 = 101;

/// Pull requests are opened up to this many days after the start of the window.
const PR_SPREAD_DAYS: i64 = 5;

/// Builds repositories and fills them with pull requests.
///
/// All randomness is drawn from the borrowed RNG and all times are relative to
/// `now`, so a seeded RNG and a fixed `now` reproduce the same dataset.
/// Analytics are left zeroed; see [`crate::analytics::build`].
pub struct Assembler<'a, R: Rng + ?Sized> {
    config: &'a GeneratorConfig,
    organization: &'a str,
    now: NaiveDateTime,
    finding_counts: WeightedIndex<u32>,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Assembler<'a, R> {
    pub fn new(
        config: &'a GeneratorConfig,
        organization: &'a str,
        now: NaiveDateTime,
        rng: &'a mut R,
    ) -> Result<Self, GenerateError> {
        config.validate()?;
        Ok(Self {
            config,
            organization,
            now,
            finding_counts: factory::finding_count_distribution()?,
            rng,
        })
    }

    /// Run the generation pass.
    #[instrument(
        skip_all,
        fields(
            repositories = self.config.repositories,
            pull_requests = self.config.pull_requests
        )
    )]
    pub fn assemble(mut self) -> Vec<Repository> {
        let mut repositories = self.create_repositories();
        info!(count = repositories.len(), "created repositories");

        let window_start = self.now - Duration::days(self.config.window_days);
        for index in 0..self.config.pull_requests {
            let target = self.rng.gen_range(0..repositories.len());
            let pr = self.create_pull_request(&repositories[target], index, window_start);
            debug!(
                repo = %repositories[target].name,
                number = pr.number,
                risk = %pr.risk_level,
                "created pull request"
            );
            repositories[target].pull_requests.push(pr);
        }
        info!(count = self.config.pull_requests, "assigned pull requests");

        repositories
    }

    /// Create repositories with unique `{adjective}-{noun}` names, redrawing on collision.
    fn create_repositories(&mut self) -> Vec<Repository> {
        let mut names = HashSet::new();
        let mut repositories = Vec::with_capacity(self.config.repositories);

        while repositories.len() < self.config.repositories {
            let name = format!(
                "{}-{}",
                pools::pick(self.rng, ADJECTIVES),
                pools::pick(self.rng, NOUNS)
            );
            if !names.insert(name.clone()) {
                debug!(name = %name, "repository name collision, redrawing");
                continue;
            }

            let html_url = format!("https://github.com/{}/{}", self.organization, name);
            repositories.push(Repository {
                id: self.rng.gen_range(1_000_000..=9_999_999),
                full_name: format!("{}/{}", self.organization, name),
                name,
                html_url,
                private: self.rng.gen_bool(0.5),
                pull_requests: Vec::new(),
                analytics: RepositoryAnalytics::default(),
            });
        }

        repositories
    }

    /// `index` is the pull request's position across the whole run. Its link
    /// is numbered from that position, not from its per-repository `number`,
    /// matching the links the dashboard data has always carried.
    fn create_pull_request(
        &mut self,
        repo: &Repository,
        index: usize,
        window_start: NaiveDateTime,
    ) -> PullRequest {
        let created_at = factory::timestamp(self.rng, window_start, PR_SPREAD_DAYS);
        let is_open = self.rng.gen_bool(self.config.open_probability);
        let security_analysis =
            factory::security_analysis(self.rng, &self.finding_counts, created_at);
        let (risk_score, risk_level) = risk::score(&security_analysis);

        let number = FIRST_PR_NUMBER + repo.pull_requests.len() as u32;
        let title = format!(
            "{} {}",
            pools::pick(self.rng, VERBS),
            pools::pick(self.rng, SUBJECTS)
        );
        let (state, resolution_status) = if is_open {
            let statuses = ResolutionStatus::NON_TERMINAL;
            (PrState::Open, statuses[self.rng.gen_range(0..statuses.len())])
        } else {
            (PrState::Closed, ResolutionStatus::Resolved)
        };

        let author_login = pools::pick(self.rng, USER_LOGINS);
        let user = factory::user(self.rng, author_login);
        let additions = self.rng.gen_range(5..=500);
        let deletions = self.rng.gen_range(0..=200);
        let assignees = if self.rng.gen_bool(self.config.assignee_probability) {
            let login = pools::pick(self.rng, USER_LOGINS);
            vec![factory::user(self.rng, login)]
        } else {
            Vec::new()
        };

        PullRequest {
            id: self.rng.gen_range(100_000..=999_999),
            number,
            title,
            state,
            resolution_status,
            html_url: format!("{}/pull/{}", repo.html_url, FIRST_PR_NUMBER as usize + index),
            user,
            created_at,
            additions,
            deletions,
            assignees,
            risk_score,
            risk_level,
            security_analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RiskLevel;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 30)
            .unwrap()
            .and_hms_opt(17, 45, 0)
            .unwrap()
    }

    fn config(repositories: usize, pull_requests: usize) -> GeneratorConfig {
        GeneratorConfig {
            repositories,
            pull_requests,
            ..GeneratorConfig::default()
        }
    }

    fn assemble(config: &GeneratorConfig, seed: u64) -> Vec<Repository> {
        let mut rng = StdRng::seed_from_u64(seed);
        Assembler::new(config, "secure-corp", now(), &mut rng)
            .unwrap()
            .assemble()
    }

    #[test]
    fn test_repository_names_unique() {
        for seed in 0..10 {
            let repos = assemble(&config(8, 0), seed);
            let names: HashSet<_> = repos.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(repos.len(), 8);
            assert_eq!(names.len(), 8);
        }
    }

    #[test]
    fn test_every_name_can_be_generated() {
        let repos = assemble(&config(64, 0), 5);
        let names: HashSet<_> = repos.iter().map(|r| r.name.clone()).collect();
        assert_eq!(names.len(), 64);
    }

    #[test]
    fn test_repository_links_use_organization() {
        let repos = assemble(&config(3, 0), 1);
        for repo in &repos {
            assert_eq!(repo.full_name, format!("secure-corp/{}", repo.name));
            assert_eq!(repo.html_url, format!("https://github.com/secure-corp/{}", repo.name));
            assert!((1_000_000..=9_999_999).contains(&repo.id));
            assert_eq!(repo.analytics, RepositoryAnalytics::default());
        }
    }

    #[test]
    fn test_pull_request_numbers_contiguous() {
        let repos = assemble(&config(4, 60), 11);
        let total: usize = repos.iter().map(|r| r.pull_requests.len()).sum();
        assert_eq!(total, 60);
        for repo in &repos {
            let numbers: Vec<u32> = repo.pull_requests.iter().map(|pr| pr.number).collect();
            let expected: Vec<u32> =
                (FIRST_PR_NUMBER..FIRST_PR_NUMBER + numbers.len() as u32).collect();
            assert_eq!(numbers, expected);
        }
    }

    #[test]
    fn test_pull_request_links_use_run_position() {
        let repos = assemble(&config(4, 60), 11);
        let mut link_numbers = Vec::new();
        for repo in &repos {
            let prefix = format!("{}/pull/", repo.html_url);
            let numbers: Vec<usize> = repo
                .pull_requests
                .iter()
                .map(|pr| pr.html_url.strip_prefix(&prefix).unwrap().parse().unwrap())
                .collect();
            // Later pull requests in a repository were created later in the run
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
            link_numbers.extend(numbers);
        }
        link_numbers.sort_unstable();
        assert_eq!(link_numbers, (101..161).collect::<Vec<usize>>());

        // With several repositories the run position and per-repository number diverge
        assert!(repos
            .iter()
            .flat_map(|r| &r.pull_requests)
            .any(|pr| !pr.html_url.ends_with(&format!("/pull/{}", pr.number))));
    }

    #[test]
    fn test_risk_matches_findings() {
        let repos = assemble(&config(8, 200), 21);
        for pr in repos.iter().flat_map(|r| &r.pull_requests) {
            let empty = pr.security_analysis.is_empty();
            assert_eq!(pr.risk_score == 0, empty);
            assert_eq!(pr.risk_level == RiskLevel::None, empty);
            let expected: u32 = pr.security_analysis.iter().map(|f| f.severity.weight()).sum();
            assert_eq!(pr.risk_score, expected);
        }
    }

    #[test]
    fn test_resolution_status_follows_state() {
        let repos = assemble(&config(8, 200), 33);
        let prs: Vec<&PullRequest> = repos.iter().flat_map(|r| &r.pull_requests).collect();
        assert!(prs.iter().any(|pr| pr.is_open()));
        assert!(prs.iter().any(|pr| !pr.is_open()));
        for pr in prs {
            if pr.is_open() {
                assert!(ResolutionStatus::NON_TERMINAL.contains(&pr.resolution_status));
            } else {
                assert_eq!(pr.resolution_status, ResolutionStatus::Resolved);
            }
        }
    }

    #[test]
    fn test_pull_request_fields_in_range() {
        let repos = assemble(&config(3, 100), 8);
        let window_start = now() - Duration::days(90);
        for pr in repos.iter().flat_map(|r| &r.pull_requests) {
            assert!((100_000..=999_999).contains(&pr.id));
            assert!((5..=500).contains(&pr.additions));
            assert!(pr.deletions <= 200);
            assert!(pr.assignees.len() <= 1);
            assert!(USER_LOGINS.contains(&pr.user.login.as_str()));
            assert!(pr.created_at.naive() > window_start);
            assert!(pr.created_at.naive() < window_start + Duration::days(6));
            let (verb, subject) = pr.title.split_once(' ').unwrap();
            assert!(VERBS.contains(&verb));
            assert!(SUBJECTS.contains(&subject));
        }
    }

    #[test]
    fn test_probability_extremes() {
        let config = GeneratorConfig {
            open_probability: 0.0,
            assignee_probability: 1.0,
            ..config(2, 20)
        };
        let repos = assemble(&config, 3);
        for pr in repos.iter().flat_map(|r| &r.pull_requests) {
            assert_eq!(pr.state, PrState::Closed);
            assert_eq!(pr.assignees.len(), 1);
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let config = config(5, 40);
        assert_eq!(assemble(&config, 99), assemble(&config, 99));
        assert_ne!(assemble(&config, 99), assemble(&config, 100));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = config(100, 10);
        assert!(matches!(
            Assembler::new(&config, "secure-corp", now(), &mut rng),
            Err(GenerateError::Config(ConfigError::TooManyRepositories { .. }))
        ));
    }

    #[test]
    fn test_out_of_range_window_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = GeneratorConfig {
            window_days: 1_000_000_000,
            ..config(1, 1)
        };
        assert!(matches!(
            Assembler::new(&config, "secure-corp", now(), &mut rng),
            Err(GenerateError::Config(ConfigError::InvalidWindow { .. }))
        ));
    }

    #[test]
    fn test_widest_window_assembles() {
        let config = GeneratorConfig {
            window_days: crate::config::MAX_WINDOW_DAYS,
            ..config(1, 5)
        };
        let repos = assemble(&config, 4);
        let window_start = now() - Duration::days(crate::config::MAX_WINDOW_DAYS);
        for pr in &repos[0].pull_requests {
            assert!(pr.created_at.naive() > window_start);
            assert!(pr.created_at.naive() < now());
        }
    }

    #[test]
    fn test_empty_dataset() {
        let repos = assemble(&config(0, 0), 0);
        assert!(repos.is_empty());
    }
}
