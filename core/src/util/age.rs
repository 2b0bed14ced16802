//! Age-spec parsing for list filters ("created in the last hour").

use chrono::{DateTime, Duration, Utc};

use crate::error::ParamError;

/// Convert an age spec into a create-time filter in UTC epoch seconds.
///
/// An empty spec means no filter. A bare integer is taken as absolute epoch
/// seconds. `<integer><unit>` with unit `s`, `m`, `h`, `d`, or `w` is an
/// interval subtracted from `from_time`.
pub fn parse_age(age: &str, from_time: DateTime<Utc>) -> Result<Option<i64>, ParamError> {
    if age.is_empty() {
        return Ok(None);
    }

    let invalid = || ParamError::InvalidAgeSpec(age.to_string());

    let last = age.chars().last().ok_or_else(invalid)?;
    if matches!(last, 's' | 'm' | 'h' | 'd' | 'w') {
        let count: i64 = age[..age.len() - last.len_utf8()]
            .parse()
            .map_err(|_| invalid())?;
        let interval = match last {
            's' => Duration::seconds(count),
            'm' => Duration::minutes(count),
            'h' => Duration::hours(count),
            'd' => Duration::days(count),
            'w' => Duration::weeks(count),
            _ => unreachable!(),
        };
        Ok(Some((from_time - interval).timestamp()))
    } else {
        age.parse::<i64>().map(Some).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_spec_is_no_filter() {
        assert_eq!(parse_age("", reference()).unwrap(), None);
    }

    #[test]
    fn bare_integer_is_absolute_epoch_seconds() {
        assert_eq!(parse_age("10", reference()).unwrap(), Some(10));
    }

    #[test]
    fn unit_specs_subtract_from_reference() {
        let t = reference();
        assert_eq!(
            parse_age("1h", t).unwrap(),
            Some((t - Duration::hours(1)).timestamp())
        );
        assert_eq!(
            parse_age("90s", t).unwrap(),
            Some((t - Duration::seconds(90)).timestamp())
        );
        assert_eq!(
            parse_age("2w", t).unwrap(),
            Some((t - Duration::weeks(2)).timestamp())
        );
    }

    #[test]
    fn bad_specs_fail() {
        assert!(matches!(
            parse_age("bogus", reference()),
            Err(ParamError::InvalidAgeSpec(_))
        ));
        assert!(matches!(
            parse_age("h", reference()),
            Err(ParamError::InvalidAgeSpec(_))
        ));
        assert!(matches!(
            parse_age("12x", reference()),
            Err(ParamError::InvalidAgeSpec(_))
        ));
    }
}
