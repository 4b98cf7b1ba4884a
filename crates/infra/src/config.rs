use birthday_greetings_domain::Tz;
use chrono::NaiveTime;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Id of the profile field where members store their date of birth
    pub birthday_field_id: i64,
    /// Timezone of the site. Decides what "today" is and the offset
    /// applied to every stored date of birth.
    pub site_timezone: Tz,
    /// Name of the site used in the greeting text
    pub site_name: String,
    /// Base url of the private message compose page. When it is not set
    /// members are listed without a link to send a greeting.
    pub messages_compose_url: Option<String>,
    /// Site local time of day at which the daily scan runs
    pub daily_scan_at: NaiveTime,
    /// Whether the daily scan job should be started together with the server
    pub daily_scan_job_enabled: bool,
    /// Number of days notification ledger entries are kept before they are pruned
    pub ledger_retention_days: i64,
}

const DEFAULT_PORT: usize = 5000;
const DEFAULT_BIRTHDAY_FIELD_ID: i64 = 1;
const DEFAULT_SITE_NAME: &str = "Our community";
const DEFAULT_LEDGER_RETENTION_DAYS: i64 = 2;
const MAX_LEDGER_RETENTION_DAYS: i64 = 3650;

fn default_daily_scan_at() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 5, 0).unwrap_or(NaiveTime::MIN)
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T
where
    T: std::fmt::Debug,
{
    match std::env::var(name) {
        Ok(value) => match value.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {:?}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let port = parse_env("PORT", DEFAULT_PORT);
        let birthday_field_id = parse_env("BIRTHDAY_FIELD_ID", DEFAULT_BIRTHDAY_FIELD_ID);
        let site_timezone = parse_env("SITE_TIMEZONE", chrono_tz::UTC);

        let site_name = match std::env::var("SITE_NAME") {
            Ok(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_SITE_NAME.into(),
        };

        let messages_compose_url = std::env::var("MESSAGES_COMPOSE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        if messages_compose_url.is_none() {
            info!("Did not find MESSAGES_COMPOSE_URL environment variable. Greeting links are disabled.");
        }

        let daily_scan_at = match std::env::var("DAILY_SCAN_AT") {
            Ok(time) => match NaiveTime::parse_from_str(time.trim(), "%H:%M") {
                Ok(time) => time,
                Err(_) => {
                    let default = default_daily_scan_at();
                    warn!(
                        "The given DAILY_SCAN_AT: {} is not valid, falling back to the default: {}.",
                        time, default
                    );
                    default
                }
            },
            Err(_) => default_daily_scan_at(),
        };

        let daily_scan_job_enabled = parse_env("DAILY_SCAN_JOB_ENABLED", true);

        let ledger_retention_days =
            match parse_env("LEDGER_RETENTION_DAYS", DEFAULT_LEDGER_RETENTION_DAYS) {
                days if !(1..=MAX_LEDGER_RETENTION_DAYS).contains(&days) => {
                    warn!(
                        "LEDGER_RETENTION_DAYS must be between 1 and {}, falling back to the default: {}.",
                        MAX_LEDGER_RETENTION_DAYS, DEFAULT_LEDGER_RETENTION_DAYS
                    );
                    DEFAULT_LEDGER_RETENTION_DAYS
                }
                days => days,
            };

        Self {
            port,
            birthday_field_id,
            site_timezone,
            site_name,
            messages_compose_url,
            daily_scan_at,
            daily_scan_job_enabled,
            ledger_retention_days,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "PORT",
        "BIRTHDAY_FIELD_ID",
        "SITE_TIMEZONE",
        "SITE_NAME",
        "MESSAGES_COMPOSE_URL",
        "DAILY_SCAN_AT",
        "DAILY_SCAN_JOB_ENABLED",
        "LEDGER_RETENTION_DAYS",
    ];

    fn clear_env() {
        for var in &VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn it_uses_defaults() {
        clear_env();
        let config = Config::new();

        assert_eq!(config.port, 5000);
        assert_eq!(config.birthday_field_id, 1);
        assert_eq!(config.site_timezone, chrono_tz::UTC);
        assert_eq!(config.site_name, "Our community");
        assert_eq!(config.messages_compose_url, None);
        assert_eq!(config.daily_scan_at, NaiveTime::from_hms_opt(0, 5, 0).unwrap());
        assert!(config.daily_scan_job_enabled);
        assert_eq!(config.ledger_retention_days, 2);
    }

    #[test]
    #[serial]
    fn it_reads_environment() {
        clear_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("BIRTHDAY_FIELD_ID", "7");
        std::env::set_var("SITE_TIMEZONE", "Europe/Oslo");
        std::env::set_var("SITE_NAME", "Rust Club");
        std::env::set_var("MESSAGES_COMPOSE_URL", "https://rust.club/messages/compose/");
        std::env::set_var("DAILY_SCAN_AT", "06:30");
        std::env::set_var("DAILY_SCAN_JOB_ENABLED", "false");
        std::env::set_var("LEDGER_RETENTION_DAYS", "5");

        let config = Config::new();
        clear_env();

        assert_eq!(config.port, 8080);
        assert_eq!(config.birthday_field_id, 7);
        assert_eq!(config.site_timezone, chrono_tz::Europe::Oslo);
        assert_eq!(config.site_name, "Rust Club");
        assert_eq!(
            config.messages_compose_url.as_deref(),
            Some("https://rust.club/messages/compose/")
        );
        assert_eq!(config.daily_scan_at, NaiveTime::from_hms_opt(6, 30, 0).unwrap());
        assert!(!config.daily_scan_job_enabled);
        assert_eq!(config.ledger_retention_days, 5);
    }

    #[test]
    #[serial]
    fn it_falls_back_on_invalid_values() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("SITE_TIMEZONE", "Mars/Olympus");
        std::env::set_var("DAILY_SCAN_AT", "25:99");
        std::env::set_var("LEDGER_RETENTION_DAYS", "0");

        let config = Config::new();
        clear_env();

        assert_eq!(config.port, 5000);
        assert_eq!(config.site_timezone, chrono_tz::UTC);
        assert_eq!(config.daily_scan_at, NaiveTime::from_hms_opt(0, 5, 0).unwrap());
        assert_eq!(config.ledger_retention_days, 2);
    }

    #[test]
    #[serial]
    fn it_caps_ledger_retention() {
        clear_env();
        std::env::set_var("LEDGER_RETENTION_DAYS", "1000000000");
        assert_eq!(Config::new().ledger_retention_days, 2);

        std::env::set_var("LEDGER_RETENTION_DAYS", "3650");
        assert_eq!(Config::new().ledger_retention_days, 3650);
        clear_env();
    }
}
