use e57_simple::{
    Error,
    gps_time::{self, UtcDateTime},
};
use std::time::{Duration, SystemTime};

#[test]
fn leap_seconds() {
    // GPS-UTC was 17 seconds for all of 2016.
    let before = gps_time::gps_from_utc(2016, 12, 31, 23, 59, 59.).unwrap();
    let after = gps_time::gps_from_utc(2017, 1, 1, 0, 0, 0.).unwrap();
    assert_eq!(2., after - before);
    assert_eq!(1_167_264_018., after);
}

#[test]
fn utc_roundtrip() {
    for gps in [0., 1., 86_399.5, 1e8, 1e9 + 0.25, 1_167_264_018.] {
        let utc = gps_time::utc_from_gps(gps).unwrap();
        assert!((0. ..60.).contains(&utc.seconds));
        assert!((utc.to_gps().unwrap() - gps).abs() < 1e-5);
    }
}

#[test]
fn before_the_epoch() {
    let gps = gps_time::gps_from_utc(1980, 1, 5, 0, 0, 0.).unwrap();
    assert_eq!(-86_400., gps);
    let utc = gps_time::utc_from_gps(gps).unwrap();
    assert_eq!(
        UtcDateTime {
            year: 1980,
            month: 1,
            day: 5,
            hour: 0,
            minute: 0,
            seconds: 0.,
        },
        utc
    );
}

#[test]
fn invalid_fields() {
    assert!(matches!(
        gps_time::gps_from_utc(2020, 13, 1, 0, 0, 0.),
        Err(Error::InvalidCalendarField { .. })
    ));
    assert!(gps_time::gps_from_utc(2021, 2, 29, 0, 0, 0.).is_err());
    assert!(gps_time::gps_from_utc(2020, 2, 29, 24, 0, 0.).is_err());
    assert!(gps_time::gps_from_utc(2020, 2, 29, 0, 60, 0.).is_err());
    assert!(gps_time::gps_from_utc(2020, 2, 29, 0, 0, 60.).is_err());
    assert!(gps_time::gps_from_utc(1899, 1, 1, 0, 0, 0.).is_err());
    assert!(gps_time::utc_from_gps(f64::INFINITY).is_err());
}

#[test]
fn system_time() {
    let time = SystemTime::UNIX_EPOCH + Duration::from_secs(1_500_000_000);
    let gps = gps_time::gps_from_system_time(time).unwrap();
    assert_eq!(time, gps_time::system_time_from_gps(gps).unwrap());
}
