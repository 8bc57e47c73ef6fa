use std::{env, fs, path::Path, time::Duration};

use crate::{domain::UserId, errors::Error, Result};

/// Typed process configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    /// The bot's own account id, derived from the access token prefix.
    /// The classifier uses it to ignore the bot's own membership changes.
    pub bot_id: UserId,

    /// Fixed delay before the single retry of a transient remote failure.
    pub retry_delay: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let bot_id = bot_id_from_token(&telegram_bot_token).ok_or_else(|| {
            Error::Config("TELEGRAM_BOT_TOKEN has no numeric bot id prefix".to_string())
        })?;

        let retry_delay = Duration::from_millis(env_u64("RETRY_DELAY_MS").unwrap_or(500));

        Ok(Self {
            telegram_bot_token,
            bot_id,
            retry_delay,
        })
    }
}

/// Bot tokens look like `123456:ABC-DEF...`; the prefix is the account id.
fn bot_id_from_token(token: &str) -> Option<UserId> {
    let (id, _) = token.split_once(':')?;
    id.trim().parse::<i64>().ok().map(UserId)
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_id_is_the_token_prefix() {
        assert_eq!(
            bot_id_from_token("123456789:AAFakeTokenBody"),
            Some(UserId(123456789))
        );
        assert_eq!(bot_id_from_token("no-colon-here"), None);
        assert_eq!(bot_id_from_token("notanumber:body"), None);
    }
}
