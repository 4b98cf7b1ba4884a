use crate::{birthday::run_daily_scan::RunDailyScanUseCase, shared::usecase::execute};
use actix_web::rt::time::sleep;
use birthday_greetings_domain::Tz;
use birthday_greetings_infra::BirthdayContext;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::time::Duration;
use tracing::info;

/// The instant the clock in `tz` shows `scan_at` on `date`. When a DST gap
/// skips that time the scan runs an hour later on the moved clock.
fn scan_instant(date: NaiveDate, scan_at: NaiveTime, tz: &Tz) -> Option<DateTime<Utc>> {
    let local = date.and_time(scan_at);
    tz.from_local_datetime(&local)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(local + ChronoDuration::hours(1))).earliest())
        .map(|instant| instant.with_timezone(&Utc))
}

/// Seconds from `now_ts` until the clock in `tz` next shows `scan_at`.
/// Never returns zero, a scan that is due right now is scheduled for tomorrow.
pub fn get_start_delay(now_ts: i64, scan_at: NaiveTime, tz: &Tz) -> u64 {
    const FALLBACK_DELAY: u64 = 24 * 60 * 60;

    let now = match Utc.timestamp_millis_opt(now_ts).single() {
        Some(now) => now,
        None => return FALLBACK_DELAY,
    };

    now.with_timezone(tz)
        .date_naive()
        .iter_days()
        .take(3)
        .filter_map(|date| scan_instant(date, scan_at, tz))
        .find(|next_run| *next_run > now)
        .map(|next_run| (next_run - now).num_seconds().max(1) as u64)
        .unwrap_or(FALLBACK_DELAY)
}

/// Runs the birthday scan once right away, to catch up on a day the server
/// was down for, and then every day at the configured site local time.
pub fn start_daily_scan_job(ctx: BirthdayContext) {
    actix_web::rt::spawn(async move {
        let _ = execute(RunDailyScanUseCase {}, &ctx).await;

        loop {
            let secs_to_next_run = get_start_delay(
                ctx.sys.get_timestamp_millis(),
                ctx.config.daily_scan_at,
                &ctx.config.site_timezone,
            );
            info!("Next birthday scan in {} seconds", secs_to_next_run);
            sleep(Duration::from_secs(secs_to_next_run)).await;

            let _ = execute(RunDailyScanUseCase {}, &ctx).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(m: u32, d: u32, h: u32, min: u32) -> i64 {
        Utc.with_ymd_and_hms(2021, m, d, h, min, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn time(h: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn start_delay_works() {
        let utc = chrono_tz::UTC;
        assert_eq!(get_start_delay(millis(3, 15, 0, 0), time(0, 5), &utc), 5 * 60);
        assert_eq!(
            get_start_delay(millis(3, 15, 0, 5), time(0, 5), &utc),
            24 * 60 * 60
        );
        assert_eq!(
            get_start_delay(millis(3, 15, 0, 6), time(0, 5), &utc),
            24 * 60 * 60 - 60
        );
        assert_eq!(
            get_start_delay(millis(3, 15, 23, 0), time(6, 30), &utc),
            7 * 60 * 60 + 30 * 60
        );
    }

    #[test]
    fn start_delay_uses_site_local_time() {
        // 23:00 UTC is midnight in Oslo
        let oslo = chrono_tz::Europe::Oslo;
        assert_eq!(get_start_delay(millis(3, 14, 23, 0), time(0, 5), &oslo), 5 * 60);

        // 04:00 UTC is 00:00 in New York
        let new_york = chrono_tz::America::New_York;
        assert_eq!(
            get_start_delay(millis(3, 15, 4, 0), time(0, 5), &new_york),
            5 * 60
        );
    }

    #[test]
    fn start_delay_follows_dst_changes() {
        let oslo = chrono_tz::Europe::Oslo;

        // Midnight in Oslo the night the clocks move forward, 06:00 is five hours away
        assert_eq!(
            get_start_delay(millis(3, 27, 23, 0), time(6, 0), &oslo),
            5 * 60 * 60
        );
        // 02:30 does not exist that night, the scan runs at 03:30
        assert_eq!(
            get_start_delay(millis(3, 27, 23, 0), time(2, 30), &oslo),
            2 * 60 * 60 + 30 * 60
        );
        // Midnight in Oslo the night the clocks move back, 06:00 is seven hours away
        assert_eq!(
            get_start_delay(millis(10, 30, 22, 0), time(6, 0), &oslo),
            7 * 60 * 60
        );
    }
}
