/// Service configuration loaded from environment variables.
///
/// Implementors derive `serde::Deserialize`; field names map to upper-case env
/// vars (`database_url` reads `DATABASE_URL`). Use `#[serde(default = "...")]`
/// for optional values.
///
/// # Panics
///
/// `from_env` panics if a required env var is missing or cannot be parsed.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Self {
        envy::from_env().expect("failed to load config from environment")
    }

    /// Same as [`Config::from_env`] but reads from an explicit iterator; used in tests.
    fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
