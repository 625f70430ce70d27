use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use dialicon_proto::ports::time::ClockPort;

/// Wall clock backed by the system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed offset of the local time zone at the moment of the call.
pub fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use dialicon_proto::ports::time::ClockPort;

    use super::SystemClock;

    #[test]
    fn system_clock_tracks_utc() {
        let before = Utc::now();
        let now = SystemClock.now();
        let after = Utc::now();

        assert!(before <= now && now <= after);
    }
}
