use chrono::prelude::*;
use pocket_arcade_core as arcade;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Current wall-clock time from JavaScript's Date
pub(crate) fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

pub(crate) fn format_for_counter(num: i32) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

pub(crate) trait HasUpdate {
    fn has_update(self) -> bool;
}

impl HasUpdate for arcade::Result<arcade::MarkOutcome> {
    fn has_update(self) -> bool {
        match self {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::warn!("mark rejected: {}", err);
                false
            }
        }
    }
}

impl HasUpdate for arcade::Result<arcade::RevealOutcome> {
    fn has_update(self) -> bool {
        match self {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::warn!("reveal rejected: {}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_pads_and_saturates() {
        assert_eq!(format_for_counter(-150), "-99");
        assert_eq!(format_for_counter(-3), "-03");
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(20), "020");
        assert_eq!(format_for_counter(1234), "999");
    }

    #[test]
    fn errors_never_trigger_a_redraw() {
        let rejected: arcade::Result<arcade::RevealOutcome> = Err(arcade::GameError::InvalidCoords);

        assert!(!rejected.has_update());
        assert!(Ok::<_, arcade::GameError>(arcade::MarkOutcome::Flagged).has_update());
    }
}
