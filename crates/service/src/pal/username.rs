//! Username decoding.
//!
//! A username is `tku` + department abbreviation + a 4-digit seat number,
//! e.g. `tkubm1760`. Slicing is positional over characters: the first three
//! are the school, the last four the seat number, the rest the department.

use thiserror::Error;

use super::domain::SeatInfo;

pub const SCHOOL_NAME: &str = "tku";

const SCHOOL_LEN: usize = 3;
const SEAT_LEN: usize = 4;
const MIN_LEN: usize = SCHOOL_LEN + SEAT_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("student name format is incorrect, expected tku + department abbreviation + 4-digit seat number, e.g. tkubm1760")]
    Format,
    #[error("school name must be tku")]
    SchoolName,
    #[error("seat number format is incorrect, must be 4 digits")]
    SeatNumberFormat,
    #[error("seat number already exists")]
    SeatNumberTaken,
}

/// Decode and check the format of `name`. Seat uniqueness is checked by the
/// service, which knows the existing records.
pub fn parse_username(name: &str) -> Result<SeatInfo, UsernameError> {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() < MIN_LEN {
        return Err(UsernameError::Format);
    }
    let seat_start = chars.len() - SEAT_LEN;
    let school_name: String = chars[..SCHOOL_LEN].iter().collect();
    let department: String = chars[SCHOOL_LEN..seat_start].iter().collect();
    let seat_number: String = chars[seat_start..].iter().collect();

    if school_name != SCHOOL_NAME {
        return Err(UsernameError::SchoolName);
    }
    if !is_seat_number(&seat_number) {
        return Err(UsernameError::SeatNumberFormat);
    }
    if department.is_empty() {
        return Err(UsernameError::Format);
    }
    Ok(SeatInfo { school_name, department, seat_number })
}

fn is_seat_number(s: &str) -> bool {
    s.len() == SEAT_LEN && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_school_department_and_seat() {
        let info = parse_username("tkubm1760").unwrap();
        assert_eq!(info.school_name, "tku");
        assert_eq!(info.department, "bm");
        assert_eq!(info.seat_number, "1760");
    }

    #[test]
    fn long_department_is_kept_whole() {
        let info = parse_username("tkucsie0042").unwrap();
        assert_eq!(info.department, "csie");
        assert_eq!(info.seat_number, "0042");
    }

    #[test]
    fn valid_names_for_any_department_length() {
        for dept in ["a", "bm", "ime", "csie", "economics"] {
            let name = format!("tku{dept}1234");
            assert!(parse_username(&name).is_ok(), "{name} should decode");
        }
    }

    #[test]
    fn short_names_are_format_errors() {
        for name in ["", "t", "tku", "tku123", "abcdef"] {
            assert_eq!(parse_username(name), Err(UsernameError::Format), "{name:?}");
        }
    }

    #[test]
    fn empty_department_is_a_format_error() {
        assert_eq!(parse_username("tku1234"), Err(UsernameError::Format));
    }

    #[test]
    fn wrong_school_is_rejected() {
        assert_eq!(parse_username("ntubm1760"), Err(UsernameError::SchoolName));
        assert_eq!(parse_username("TKUbm1760"), Err(UsernameError::SchoolName));
    }

    #[test]
    fn seat_number_must_be_four_digits() {
        for name in ["tkubm176a", "tkubm17 0", "tkubmx760", "tkubm-760"] {
            assert_eq!(parse_username(name), Err(UsernameError::SeatNumberFormat), "{name}");
        }
    }

    #[test]
    fn non_ascii_digits_are_not_seat_numbers() {
        assert_eq!(parse_username("tkubm١٢٣٤"), Err(UsernameError::SeatNumberFormat));
    }

    #[test]
    fn multibyte_names_do_not_panic() {
        assert_eq!(parse_username("tku資管1760").unwrap().department, "資管");
    }

    #[test]
    fn messages_are_stable() {
        assert_eq!(UsernameError::SchoolName.to_string(), "school name must be tku");
        assert_eq!(UsernameError::SeatNumberTaken.to_string(), "seat number already exists");
        assert!(UsernameError::Format.to_string().contains("tkubm1760"));
        assert!(UsernameError::SeatNumberFormat.to_string().contains("4 digits"));
    }
}
