use std::ops::RangeInclusive;

use crate::errors::domain::{DomainError, ValidationKind};

pub const ROUNDS_RANGE: RangeInclusive<u8> = 1..=20;
pub const PLAYERS_RANGE: RangeInclusive<u8> = 2..=20;
pub const MIN_PLAYERS_TO_START: usize = 2;

/// Points awarded by the judge's ranking.
pub const FIRST_PLACE_POINTS: u32 = 5;
pub const SECOND_PLACE_POINTS: u32 = 2;
/// Bonus for the audience-favorite channel. The core never awards this on
/// its own; an external vote collaborator may feed it into `RoundAwards`.
pub const AUDIENCE_FAVORITE_POINTS: u32 = 1;

/// Session creation options supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub max_rounds: u8,
    pub max_players: u8,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            max_players: 8,
        }
    }
}

pub fn validate_options(options: &SessionOptions) -> Result<(), DomainError> {
    if !ROUNDS_RANGE.contains(&options.max_rounds) {
        return Err(DomainError::validation(
            ValidationKind::InvalidConfig,
            format!(
                "max_rounds {} outside {}..={}",
                options.max_rounds,
                ROUNDS_RANGE.start(),
                ROUNDS_RANGE.end()
            ),
        ));
    }
    if !PLAYERS_RANGE.contains(&options.max_players) {
        return Err(DomainError::validation(
            ValidationKind::InvalidConfig,
            format!(
                "max_players {} outside {}..={}",
                options.max_players,
                PLAYERS_RANGE.start(),
                PLAYERS_RANGE.end()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        for max_rounds in [1u8, 20] {
            let options = SessionOptions {
                max_rounds,
                max_players: 4,
            };
            assert!(validate_options(&options).is_ok());
        }
        for max_players in [2u8, 20] {
            let options = SessionOptions {
                max_rounds: 3,
                max_players,
            };
            assert!(validate_options(&options).is_ok());
        }
    }

    #[test]
    fn out_of_range_options_are_rejected() {
        for (max_rounds, max_players) in [(0u8, 4u8), (21, 4), (3, 1), (3, 21)] {
            let options = SessionOptions {
                max_rounds,
                max_players,
            };
            let err = validate_options(&options).unwrap_err();
            assert!(matches!(
                err,
                DomainError::Validation(ValidationKind::InvalidConfig, _)
            ));
        }
    }
}
