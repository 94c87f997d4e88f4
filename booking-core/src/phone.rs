//! Brazilian phone numbers: live input formatting and submission validation.

use thiserror::Error;

/// A national number is DDD + 8 or 9 digits.
const MAX_DIGITS: usize = 11;
const MIN_DIGITS: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("phone number must have 10 or 11 digits including the area code, got {0}")]
    InvalidLength(usize),
}

/// Strips everything that is not a digit, capped at 11 digits. This mirrors
/// what the input mask keeps while the user types.
pub fn digits(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_DIGITS)
        .collect()
}

/// Reformats whatever the user has typed so far into the national pattern,
/// `(DD) NNNNN-NNNN` for 11 digits or `(DD) NNNN-NNNN` for 10. Partial
/// input yields partial formatting, e.g. `(4` or `(47) 999`.
pub fn format_partial(raw: &str) -> String {
    let d = digits(raw);
    match d.len() {
        0 => String::new(),
        1..=2 => format!("({}", d),
        3..=6 => format!("({}) {}", &d[..2], &d[2..]),
        7..=10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

/// Submission-time check. Counts digits without the input-mask cap so that
/// an over-long paste is rejected rather than silently truncated.
pub fn validate(raw: &str) -> Result<(), PhoneError> {
    let count = raw.chars().filter(|c| c.is_ascii_digit()).count();
    if (MIN_DIGITS..=MAX_DIGITS).contains(&count) {
        Ok(())
    } else {
        Err(PhoneError::InvalidLength(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_eleven_digit_mobile() {
        assert_eq!(format_partial("47999887766"), "(47) 99988-7766");
    }

    #[test]
    fn formats_ten_digit_landline() {
        assert_eq!(format_partial("4733445566"), "(47) 3344-5566");
    }

    #[test]
    fn partial_input_yields_partial_formatting() {
        assert_eq!(format_partial(""), "");
        assert_eq!(format_partial("4"), "(4");
        assert_eq!(format_partial("47"), "(47");
        assert_eq!(format_partial("479"), "(47) 9");
        assert_eq!(format_partial("4799988"), "(47) 9998-8");
    }

    #[test]
    fn formatting_is_idempotent_on_its_own_output() {
        let once = format_partial("47999887766");
        assert_eq!(format_partial(&once), once);
        let once = format_partial("4733445566");
        assert_eq!(format_partial(&once), once);
    }

    #[test]
    fn strips_noise_and_caps_at_eleven_digits() {
        assert_eq!(digits("+55 (47) 99988-7766 ext 9"), "55479998877");
        assert_eq!(digits("abc"), "");
    }

    #[test]
    fn rejects_nine_digits() {
        assert_eq!(validate("(47) 9998-8"), Err(PhoneError::InvalidLength(9)));
    }

    #[test]
    fn rejects_over_long_numbers() {
        assert_eq!(
            validate("474799988776655"),
            Err(PhoneError::InvalidLength(15))
        );
    }

    #[test]
    fn accepts_formatted_ten_and_eleven_digit_numbers() {
        assert!(validate("(47) 99988-7766").is_ok());
        assert!(validate("(47) 3344-5566").is_ok());
    }
}
