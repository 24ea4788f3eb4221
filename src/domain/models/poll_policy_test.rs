use std::time::Duration;

use super::PollPolicy;

#[test]
fn it_doubles_delay_until_cap() {
    let policy = PollPolicy {
        interval: Duration::from_millis(100),
        max_interval: Duration::from_millis(350),
        timeout: Duration::from_secs(5),
    };

    let second = policy.next_delay(policy.interval);
    let third = policy.next_delay(second);
    let fourth = policy.next_delay(third);

    assert_eq!(second, Duration::from_millis(200));
    assert_eq!(third, Duration::from_millis(350));
    assert_eq!(fourth, Duration::from_millis(350));
}

#[test]
fn it_never_drops_below_interval_when_cap_is_smaller() {
    let policy = PollPolicy {
        interval: Duration::from_millis(500),
        max_interval: Duration::from_millis(100),
        timeout: Duration::from_secs(5),
    };

    assert_eq!(
        policy.next_delay(policy.interval),
        Duration::from_millis(500)
    );
}

#[test]
fn it_stays_at_zero_for_zero_interval() {
    let policy = PollPolicy {
        interval: Duration::ZERO,
        max_interval: Duration::ZERO,
        timeout: Duration::ZERO,
    };

    assert_eq!(policy.next_delay(policy.interval), Duration::ZERO);
}

#[test]
fn it_parses_millisecond_settings() -> anyhow::Result<()> {
    let policy = PollPolicy::parse("100", "800", "5000")?;

    assert_eq!(
        policy,
        PollPolicy {
            interval: Duration::from_millis(100),
            max_interval: Duration::from_millis(800),
            timeout: Duration::from_millis(5000),
        }
    );

    return Ok(());
}

#[test]
fn it_rejects_zero_interval() {
    let res = PollPolicy::parse("0", "2000", "120000");

    match res {
        Err(err) => assert!(err.to_string().contains("poll-interval")),
        Ok(_) => panic!("A zero poll interval must be rejected"),
    }
}

#[test]
fn it_names_key_of_bad_value() {
    let res = PollPolicy::parse("250", "2000", "soon");

    match res {
        Err(err) => assert!(err.to_string().contains("poll-timeout")),
        Ok(_) => panic!("A non-numeric timeout must be rejected"),
    }
}
