pub mod capacity;
pub mod config;
pub mod plan;
pub mod simulate;
pub mod status;
pub mod tool;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use biosched_core::{CapacityReport, Config, SqliteTelemetryStore};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Current local wall-clock time, truncated to the minute.
pub fn now_minute() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

/// Parse "HH:MM" (on `day`) or an RFC3339 timestamp (its own wall clock).
pub fn parse_when(value: &str, day: NaiveDate) -> Result<NaiveDateTime, String> {
    if let Ok(time) = NaiveTime::parse_from_str(value, "%H:%M") {
        return Ok(day.and_time(time));
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_local())
        .map_err(|_| format!("invalid time '{value}': use HH:MM or RFC3339"))
}

/// Open the telemetry database named by `config`, honoring its retry policy.
pub fn open_store(config: &Config) -> Result<SqliteTelemetryStore, Box<dyn std::error::Error>> {
    let path = config.database_path()?;
    Ok(SqliteTelemetryStore::open_with_retry(
        &path,
        config.storage.retry_policy(),
    )?)
}

/// Human-readable capacity block.
pub fn print_report(title: &str, report: &CapacityReport) {
    println!("\n--- {title} ---");
    println!(
        "Capacity:       {:.2} ({:.0}%)",
        report.capacity_score,
        report.capacity_score * 100.0
    );
    println!("Freshness (S):  {:.2}", report.components.freshness);
    println!("Circadian (C):  {:.2}", report.components.circadian);
    println!("Advice:         {}", report.recommendation);
    println!("{}", "-".repeat(27));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 17).unwrap()
    }

    #[test]
    fn parse_clock_time() {
        let t = parse_when("07:30", day()).unwrap();
        assert_eq!(t, day().and_hms_opt(7, 30, 0).unwrap());
    }

    #[test]
    fn parse_rfc3339_keeps_wall_clock() {
        let t = parse_when("2024-02-18T08:00:00+05:00", day()).unwrap();
        assert_eq!(
            t,
            NaiveDate::from_ymd_opt(2024, 2, 18)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_when("soon", day()).is_err());
    }
}
