//! Password policy enforcement for new passwords.

use zxcvbn::Score;

use extensus_core::config::AuthConfig;
use extensus_core::error::AppError;

/// Validates new passwords against the configured length and strength floors.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
    min_strength: Option<Score>,
}

impl PasswordPolicy {
    /// Create a policy. A `min_strength` of zero disables the strength check.
    pub fn new(min_length: usize, min_strength: u8) -> Self {
        let min_strength = match min_strength {
            0 => None,
            1 => Some(Score::One),
            2 => Some(Score::Two),
            3 => Some(Score::Three),
            _ => Some(Score::Four),
        };
        Self {
            min_length,
            min_strength,
        }
    }

    /// Create a policy from the `auth` configuration section.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.password_min_length, config.password_min_strength)
    }

    /// Check `password`, penalizing reuse of the account's own details.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if let Some(floor) = self.min_strength {
            let estimate = zxcvbn::zxcvbn(password, user_inputs);
            if estimate.score() < floor {
                return Err(AppError::validation(
                    "Password is too weak. Please use a stronger password.",
                ));
            }
        }

        Ok(())
    }
}
