use std::sync::LazyLock;

use hifitime::{Epoch, TimeScale, Unit};
use regex::Regex;

use crate::constants::{Second, JD_J2000};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

static SATELLITE_EPOCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}) *([A-Z][a-z]{2})\. *(\d+(?:\.\d+)?) +(TT|TDT)$")
        .expect("static regex")
});

/// J2000.0 reference instant (2000-01-01 12:00:00) in the given time scale.
pub fn j2000(time_scale: TimeScale) -> Epoch {
    Epoch::from_gregorian(2000, 1, 1, 12, 0, 0, 0, time_scale)
}

/// Signed number of seconds elapsed from J2000 to `epoch`, in the epoch's own time scale.
pub fn seconds_since_j2000(epoch: Epoch) -> Second {
    (epoch - j2000(epoch.time_scale)).to_seconds()
}

/// Transformation from a satellite table epoch to seconds relative to J2000
///
/// Argument
/// --------
/// * `epoch_str`: an epoch in the format `YYYY Mon. DD.dd TT` (`TDT` is accepted as a
///   synonym of Terrestrial Time)
///
/// Return
/// ------
/// * the signed number of seconds between J2000 TT and the epoch, or `None` when the
///   string does not follow the format
pub fn satellite_epoch_to_seconds(epoch_str: &str) -> Option<Second> {
    let captures = SATELLITE_EPOCH.captures(epoch_str.trim())?;

    let year: i32 = captures[1].parse().ok()?;
    let month = MONTHS.iter().position(|m| *m == &captures[2])? as u8 + 1;
    let day: f64 = captures[3].parse().ok()?;
    if !(1.0..32.0).contains(&day) {
        return None;
    }

    // day 1.0 is the first midnight of the month
    let start_of_month = Epoch::from_gregorian(year, month, 1, 0, 0, 0, 0, TimeScale::TT);
    let epoch = start_of_month + Unit::Day * (day - 1.0);

    Some(seconds_since_j2000(epoch))
}

/// Transformation from a Julian date (TDB) to seconds relative to J2000 TDB
pub fn jd_tdb_to_seconds(jd: f64) -> Second {
    (Epoch::from_jde_tdb(jd) - Epoch::from_jde_tdb(JD_J2000)).to_seconds()
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_satellite_epoch_at_j2000() {
        assert_abs_diff_eq!(
            satellite_epoch_to_seconds("2000 Jan. 1.50 TT").unwrap(),
            0.0,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            satellite_epoch_to_seconds("2000 Jan. 1.50 TDT").unwrap(),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_satellite_epoch_offsets() {
        // 2013-01-01 00:00 TT is 4748.5 days after J2000
        assert_abs_diff_eq!(
            satellite_epoch_to_seconds("2013 Jan. 1.00 TT").unwrap(),
            4748.5 * 86400.0,
            epsilon = 1e-6
        );
        // before J2000
        assert_abs_diff_eq!(
            satellite_epoch_to_seconds("1999 Dec. 31.50 TT").unwrap(),
            -86400.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_satellite_epoch_rejects_garbage() {
        assert_eq!(satellite_epoch_to_seconds("2000 January 1.5 TT"), None);
        assert_eq!(satellite_epoch_to_seconds("2000 Foo. 1.5 TT"), None);
        assert_eq!(satellite_epoch_to_seconds("2000 Jan. 1.5 UTC"), None);
        assert_eq!(satellite_epoch_to_seconds(""), None);
    }

    #[test]
    fn test_jd_tdb() {
        assert_abs_diff_eq!(jd_tdb_to_seconds(JD_J2000), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            jd_tdb_to_seconds(2460600.5),
            (2460600.5 - JD_J2000) * 86400.0,
            epsilon = 1e-3
        );
    }
}
