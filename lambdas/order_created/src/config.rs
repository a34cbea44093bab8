use figment::providers::Env;
use figment::Figment;
use serde::{Deserialize, Serialize};
use shared::error::ConfigError;

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Config {
    pub teams_webhook_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Env::raw().only(&["TEAMS_WEBHOOK_URL"]))
            .extract()
    }

    /// The configured webhook, rejecting a missing or blank value.
    pub fn webhook_url(&self) -> Result<&str, ConfigError> {
        self.teams_webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingWebhookUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use shared::error::ConfigError;

    #[test]
    fn when_env_var_set_should_load_webhook_url() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TEAMS_WEBHOOK_URL", "https://example.webhook.office.com/hook");
            jail.set_env("TABLE_NAME", "ignored");

            let config = Config::load()?;

            assert_eq!(
                config.webhook_url().unwrap(),
                "https://example.webhook.office.com/hook"
            );

            Ok(())
        });
    }

    #[test]
    fn when_env_var_missing_should_load_but_reject_url() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load()?;

            assert!(config.teams_webhook_url.is_none());
            assert!(matches!(
                config.webhook_url(),
                Err(ConfigError::MissingWebhookUrl)
            ));

            Ok(())
        });
    }

    #[test]
    fn when_env_var_blank_should_reject_url() {
        let config = Config {
            teams_webhook_url: Some("   ".to_string()),
        };

        let err = config.webhook_url().unwrap_err();

        assert_eq!(
            err.to_string(),
            "TEAMS_WEBHOOK_URL environment variable is not set."
        );
    }
}
