use serde::Deserialize;

/// Which unique user field is the login identity. The deployment decides
/// once; handlers never branch on it beyond this config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityField {
    Username,
    Email,
}

impl IdentityField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "username" => Some(Self::Username),
            "email" => Some(Self::Email),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: u64,
}

/// Strictly positive minutes; zero, negative and unparseable values are
/// treated as unset so the default applies instead of a wrapped TTL.
fn positive_minutes(value: &str) -> Option<u64> {
    value.parse::<u64>().ok().filter(|m| *m > 0)
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub identity_field: IdentityField,
    pub password_min_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| positive_minutes(&v))
                .unwrap_or(60),
        };
        let auth = AuthConfig {
            identity_field: std::env::var("IDENTITY_FIELD")
                .ok()
                .and_then(|v| IdentityField::parse(&v))
                .unwrap_or(IdentityField::Username),
            password_min_len: std::env::var("PASSWORD_MIN_LEN")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(6),
        };
        Ok(Self {
            database_url,
            jwt,
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_field_parses_known_values() {
        assert_eq!(IdentityField::parse("username"), Some(IdentityField::Username));
        assert_eq!(IdentityField::parse("email"), Some(IdentityField::Email));
        assert_eq!(IdentityField::parse("phone"), None);
    }

    #[test]
    fn identity_field_round_trips_through_as_str() {
        for field in [IdentityField::Username, IdentityField::Email] {
            assert_eq!(IdentityField::parse(field.as_str()), Some(field));
        }
    }

    #[test]
    fn ttl_minutes_must_be_strictly_positive() {
        assert_eq!(positive_minutes("60"), Some(60));
        assert_eq!(positive_minutes("1"), Some(1));
        assert_eq!(positive_minutes("0"), None);
        assert_eq!(positive_minutes("-5"), None);
        assert_eq!(positive_minutes("abc"), None);
    }
}
