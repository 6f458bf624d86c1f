//! Short code issuance service.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::error::{LinkError, StoreError};
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::cache::HotCache;
use crate::utils::code_generator::{generate_code, validate_custom_code};

/// Tunables for code issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPolicy {
    /// Length of auto-generated codes.
    pub code_length: usize,
    pub custom_code_min_length: usize,
    pub custom_code_max_length: usize,
    pub min_days: u32,
    pub max_days: u32,
    /// Ceiling on auto-generation attempts before giving up.
    pub max_generation_attempts: u32,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            code_length: 8,
            custom_code_min_length: 4,
            custom_code_max_length: 16,
            min_days: 1,
            max_days: 7,
            max_generation_attempts: 100,
        }
    }
}

/// A request to bind a target URL to a short code.
#[derive(Debug, Clone)]
pub struct IssueRequest {
    pub target: String,
    pub days: i64,
    pub custom_code: Option<String>,
}

/// Service issuing unique short codes.
///
/// The hot cache is consulted first as a cheap collision hint; the store
/// decides. A uniqueness violation raised by the final insert is the
/// authoritative conflict signal when two requests race for the same code.
pub struct IssuanceService {
    repository: Arc<dyn ShortLinkRepository>,
    cache: Arc<HotCache>,
    policy: LinkPolicy,
}

impl IssuanceService {
    /// Creates a new issuance service.
    pub fn new(
        repository: Arc<dyn ShortLinkRepository>,
        cache: Arc<HotCache>,
        policy: LinkPolicy,
    ) -> Self {
        Self {
            repository,
            cache,
            policy,
        }
    }

    pub fn policy(&self) -> &LinkPolicy {
        &self.policy
    }

    /// Issues a code for `request.target` living `request.days` days.
    ///
    /// On success the link is persisted and then cached.
    ///
    /// # Errors
    ///
    /// - [`LinkError::DaysOutOfRange`] / [`LinkError::EmptyTarget`] for bad input
    /// - [`LinkError::CodeTooShort`], [`LinkError::CodeTooLong`],
    ///   [`LinkError::CodeInvalidCharacters`] for a malformed custom code
    /// - [`LinkError::CodeAlreadyUsed`] if the custom code is taken
    /// - [`LinkError::GenerationExhausted`] if no free code was found
    /// - [`LinkError::Storage`] on store failures; nothing is cached then
    pub async fn issue(&self, request: IssueRequest) -> Result<ShortLink, LinkError> {
        let days = self.validate_days(request.days)?;

        if request.target.trim().is_empty() {
            return Err(LinkError::EmptyTarget);
        }

        let link = match request.custom_code {
            Some(code) => self.issue_custom(request.target, days, code).await?,
            None => self.issue_generated(request.target, days).await?,
        };

        self.cache.put(&link.code, &link.target);

        Ok(link)
    }

    fn validate_days(&self, days: i64) -> Result<u32, LinkError> {
        let out_of_range = || LinkError::DaysOutOfRange {
            days,
            min: self.policy.min_days,
            max: self.policy.max_days,
        };

        let days = u32::try_from(days).map_err(|_| out_of_range())?;
        if !(self.policy.min_days..=self.policy.max_days).contains(&days) {
            return Err(out_of_range());
        }

        Ok(days)
    }

    async fn issue_custom(
        &self,
        target: String,
        days: u32,
        code: String,
    ) -> Result<ShortLink, LinkError> {
        validate_custom_code(
            &code,
            self.policy.custom_code_min_length,
            self.policy.custom_code_max_length,
        )?;

        if self.cache.contains(&code) || self.repository.exists(&code).await? {
            return Err(LinkError::CodeAlreadyUsed { code });
        }

        let new_link = NewShortLink {
            code: code.clone(),
            target,
            days,
        };

        self.repository
            .insert(new_link)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation => LinkError::CodeAlreadyUsed { code },
                other => LinkError::Storage(other),
            })
    }

    async fn issue_generated(&self, target: String, days: u32) -> Result<ShortLink, LinkError> {
        let max_attempts = self.policy.max_generation_attempts;

        for attempt in 1..=max_attempts {
            let candidate = generate_code(&target, self.policy.code_length);

            if self.cache.contains(&candidate) || self.repository.exists(&candidate).await? {
                continue;
            }

            let new_link = NewShortLink {
                code: candidate,
                target: target.clone(),
                days,
            };

            match self.repository.insert(new_link).await {
                Ok(link) => {
                    debug!(attempts = attempt, code = %link.code, "Generated short code");
                    return Ok(link);
                }
                Err(StoreError::UniqueViolation) => {
                    debug!(attempt, "Generated code was taken concurrently, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(attempts = max_attempts, "Short code generation exhausted");

        Err(LinkError::GenerationExhausted {
            attempts: max_attempts,
        })
    }
}
