//! The authenticated MUIP session.

use crate::transport::{EndpointMode, SessionGrant};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Timestamps above this are treated as milliseconds (year 2001 in ms, year
/// 33658 in seconds).
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// A live, authorized session. Owned exclusively by the session manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub rsa_public_key: String,
    pub expire_at: DateTime<Utc>,
    pub ssl_mode: bool,
}

impl Session {
    pub fn from_grant(grant: SessionGrant, mode: EndpointMode) -> Self {
        Self {
            session_id: grant.session_id,
            rsa_public_key: grant.rsa_public_key,
            expire_at: expiry_from_timestamp(grant.expire_time_stamp),
            ssl_mode: mode.is_secure(),
        }
    }

    pub fn endpoint_mode(&self) -> EndpointMode {
        EndpointMode::from_ssl(self.ssl_mode)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expire_at
    }
}

/// Converts a server expiry stamp in seconds or milliseconds.
///
/// Out-of-range stamps yield the earliest representable time, which makes the session count as
/// already expired.
pub fn expiry_from_timestamp(stamp: i64) -> DateTime<Utc> {
    let parsed = if stamp >= MILLIS_THRESHOLD {
        Utc.timestamp_millis_opt(stamp).single()
    } else {
        Utc.timestamp_opt(stamp, 0).single()
    };
    parsed.unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_and_millis_agree() {
        assert_eq!(
            expiry_from_timestamp(1_700_000_000),
            expiry_from_timestamp(1_700_000_000_000)
        );
    }

    #[test]
    fn test_expiry_is_inclusive() {
        let session = Session::from_grant(
            SessionGrant {
                session_id: "s".into(),
                expire_time_stamp: 1_700_000_000,
                rsa_public_key: "k".into(),
            },
            EndpointMode::Secure,
        );
        assert!(session.ssl_mode);
        assert!(session.is_expired_at(session.expire_at));
        assert!(!session.is_expired_at(session.expire_at - chrono::Duration::seconds(1)));
    }
}
