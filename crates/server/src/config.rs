use anyhow::{bail, Context, Result};
use std::env;

/// Work factors bcrypt accepts.
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    /// bcrypt work factor applied when hashing new passwords.
    pub bcrypt_cost: u32,
    /// Sessions idle longer than this are treated as absent.
    pub session_ttl_secs: u64,
    pub cookie_name: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            bcrypt_cost: validate_bcrypt_cost(
                env::var("BCRYPT_COST")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("BCRYPT_COST must be a valid number")?,
            )?,
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .context("SESSION_TTL_SECS must be a valid number")?,
            cookie_name: env::var("SESSION_COOKIE").unwrap_or_else(|_| "session_id".to_string()),
        })
    }
}

/// Reject work factors bcrypt would refuse, so a bad value fails at
/// startup instead of on the first registration.
fn validate_bcrypt_cost(cost: u32) -> Result<u32> {
    if !BCRYPT_COST_RANGE.contains(&cost) {
        bail!(
            "BCRYPT_COST must be between {} and {}, got {}",
            BCRYPT_COST_RANGE.start(),
            BCRYPT_COST_RANGE.end(),
            cost
        );
    }
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_cost_in_range_accepted() {
        assert_eq!(validate_bcrypt_cost(4).unwrap(), 4);
        assert_eq!(validate_bcrypt_cost(10).unwrap(), 10);
        assert_eq!(validate_bcrypt_cost(31).unwrap(), 31);
    }

    #[test]
    fn test_bcrypt_cost_out_of_range_rejected() {
        assert!(validate_bcrypt_cost(3).is_err());
        assert!(validate_bcrypt_cost(32).is_err());
        assert!(validate_bcrypt_cost(0).is_err());
    }
}
