use rand::{rngs::OsRng, Rng};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::debug;

pub const OTP_TTL_MINUTES: i64 = 15;

/// One-way hash of an OTP code. Only the hash is ever persisted.
pub fn hash_otp(otp: &str) -> String {
    hex::encode(Sha256::digest(otp.as_bytes()))
}

/// Cryptographically random 6-digit code.
pub fn generate_otp() -> String {
    OsRng.gen_range(100_000..=999_999).to_string()
}

/// Password-recovery OTP store backed by the `password_resets` table.
///
/// At most one valid record is active per email: issuing supersedes all
/// prior records. Expired rows are purged opportunistically on every issue
/// and excluded by predicate in every lookup, so a stale code can never be
/// replayed even if it was never explicitly deleted.
pub struct PasswordReset;

impl PasswordReset {
    /// Issue a fresh code for the email, superseding any prior ones. The
    /// purge + delete + insert run in one transaction so concurrent issues
    /// settle as last-writer-wins with exactly one surviving code.
    /// Returns the plaintext code; delivery is the caller's concern.
    pub async fn issue(db: &PgPool, email: &str) -> anyhow::Result<String> {
        let otp = generate_otp();
        let otp_hash = hash_otp(&otp);

        let mut tx = db.begin().await?;
        sqlx::query("DELETE FROM password_resets WHERE expires_at < now()")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM password_resets WHERE email = $1")
            .bind(email)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            r#"
            INSERT INTO password_resets (email, otp_hash, expires_at)
            VALUES ($1, $2, now() + make_interval(mins => $3))
            "#,
        )
        .bind(email)
        .bind(&otp_hash)
        .bind(OTP_TTL_MINUTES as i32)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        debug!(%email, "otp issued");
        Ok(otp)
    }

    /// Check a candidate code. Marks the record verified on a match but does
    /// not delete it, so the check may be repeated within the same reset
    /// flow. A miss says nothing about whether the code exists or expired.
    pub async fn verify(db: &PgPool, email: &str, candidate: &str) -> anyhow::Result<bool> {
        let otp_hash = hash_otp(candidate);
        let row: Option<(uuid::Uuid,)> = sqlx::query_as(
            r#"
            UPDATE password_resets
            SET verified_at = now()
            WHERE email = $1 AND otp_hash = $2 AND expires_at > now()
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(&otp_hash)
        .fetch_optional(db)
        .await?;
        Ok(row.is_some())
    }

    /// Consume the verified record for this email exactly once. Returns
    /// false when no still-valid, verified record exists.
    pub async fn consume_verified(db: &PgPool, email: &str) -> anyhow::Result<bool> {
        let row: Option<(uuid::Uuid,)> = sqlx::query_as(
            r#"
            DELETE FROM password_resets
            WHERE email = $1 AND verified_at IS NOT NULL AND expires_at > now()
            RETURNING id
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(row.is_some())
    }

    /// Drop every record for the email (reset completed).
    pub async fn invalidate(db: &PgPool, email: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM password_resets WHERE email = $1")
            .bind(email)
            .execute(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_otp_is_six_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            let n: u32 = otp.parse().expect("numeric");
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[test]
    fn hash_is_deterministic_and_code_distinct() {
        assert_eq!(hash_otp("123456"), hash_otp("123456"));
        assert_ne!(hash_otp("123456"), hash_otp("123457"));
    }

    #[test]
    fn hash_does_not_contain_plaintext() {
        let hash = hash_otp("123456");
        assert_eq!(hash.len(), 64);
        assert!(!hash.contains("123456"));
        // sha256 of "123456", fixed reference
        assert_eq!(
            hash,
            "8d969eef6ecad3c29a3a629280e686cf0c3f5d5a86aff3ca12020c923adc6c92"
        );
    }
}
