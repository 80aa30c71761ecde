use super::*;

#[test]
fn fake_clock_advances_monotonically() {
    let clock = FakeClock::default();
    let t0 = clock.now();
    clock.advance(chrono::Duration::seconds(60));
    let t1 = clock.now();
    assert_eq!(t1 - t0, chrono::Duration::seconds(60));
}

#[test]
fn fake_clock_set_is_absolute() {
    let clock = FakeClock::default();
    let target = DateTime::from_timestamp(2_000_000_000, 0).unwrap();
    clock.set(target);
    assert_eq!(clock.now(), target);
}
