//! Session report rendering.
//!
//! Replays a parsed log through the club and renders the opening time, the
//! echoed events with any messages they caused, the closing departures, the
//! closing time, and one summary line per table.

use std::io::Write;

use anyhow::Result;
use clubday_core::clock::{format_clock, format_duration};
use clubday_core::{Club, ClubLog, TableStat, parse_log};

/// Renders the report for `input` and writes it to `writer`.
///
/// Structural input errors are not failures: the offending line is written
/// in place of the report.
pub fn run<W: Write>(writer: &mut W, input: &str) -> Result<()> {
    let output = render(input);
    writer.write_all(output.as_bytes())?;
    Ok(())
}

/// Renders the full output for a raw log.
pub fn render(input: &str) -> String {
    match parse_log(input) {
        Ok(log) => format_session(&log),
        Err(err) => {
            tracing::info!(%err, "invalid input, printing offending line only");
            err.output().to_string()
        }
    }
}

/// Replays `log` and formats the session. Lines are joined with `\n`
/// without a trailing newline.
pub fn format_session(log: &ClubLog) -> String {
    let mut club = Club::new(log.config.clone());
    let mut lines = vec![format_clock(log.config.open)];

    for event in &log.events {
        lines.push(event.to_string());
        if let Some(message) = club.apply(event) {
            lines.push(message.to_string());
        }
    }

    lines.extend(club.close().iter().map(ToString::to_string));
    lines.push(format_clock(log.config.close));

    lines.extend(
        club.table_stats()
            .iter()
            .enumerate()
            .map(|(i, stat)| format_table(i + 1, stat)),
    );

    lines.join("\n")
}

/// Formats one summary line: `<table> <revenue> <HH:MM>`.
pub fn format_table(table: usize, stat: &TableStat) -> String {
    format!("{table} {} {}", stat.revenue, format_duration(stat.busy))
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeDelta;
    use insta::assert_snapshot;

    const FULL_DAY: &str = "\
3
09:00 19:00
10
08:48 1 client1
09:41 1 client1
09:48 1 client2
09:52 3 client1
09:54 2 client1 1
10:25 2 client2 2
10:58 1 client3
10:59 2 client3 3
11:30 1 client4
11:35 2 client4 2
11:45 3 client4
12:33 4 client1
12:43 4 client2
15:52 4 client4
";

    #[test]
    fn full_day_report() {
        assert_snapshot!(render(FULL_DAY), @r"
        09:00
        08:48 1 client1
        08:48 13 NotOpenYet
        09:41 1 client1
        09:48 1 client2
        09:52 3 client1
        09:52 13 ICanWaitNoLonger!
        09:54 2 client1 1
        10:25 2 client2 2
        10:58 1 client3
        10:59 2 client3 3
        11:30 1 client4
        11:35 2 client4 2
        11:35 13 PlaceIsBusy
        11:45 3 client4
        12:33 4 client1
        12:33 12 client4 1
        12:43 4 client2
        15:52 4 client4
        19:00 11 client3
        19:00
        1 70 05:58
        2 30 02:18
        3 90 08:01
        ");
    }

    #[test]
    fn error_messages_report() {
        let input = "\
1
09:00 19:00
10
08:48 1 client1
09:41 1 client1
09:41 1 client2
09:48 2 client1 1
09:52 3 client2
09:54 2 client3 1
10:00 4 client3
10:05 1 client2
";
        assert_snapshot!(render(input), @r"
        09:00
        08:48 1 client1
        08:48 13 NotOpenYet
        09:41 1 client1
        09:41 1 client2
        09:48 2 client1 1
        09:52 3 client2
        09:54 2 client3 1
        09:54 13 PlaceIsBusy
        10:00 4 client3
        10:00 13 ClientUnknown
        10:05 1 client2
        10:05 13 YouShallNotPass
        19:00 11 client1
        19:00 11 client2
        19:00
        1 100 09:12
        ");
    }

    #[test]
    fn overflowing_queue_report() {
        let input = "\
1
09:00 19:00
5
09:00 1 a
09:00 1 b
09:00 1 c
09:05 2 a 1
09:10 3 b
09:15 3 c
10:40 4 a
";
        assert_snapshot!(render(input), @r"
        09:00
        09:00 1 a
        09:00 1 b
        09:00 1 c
        09:05 2 a 1
        09:10 3 b
        09:15 3 c
        09:15 11 c
        10:40 4 a
        10:40 12 b 1
        19:00 11 b
        19:00
        1 55 09:55
        ");
    }

    #[test]
    fn empty_event_stream_reports_zeroed_tables() {
        let output = render("2\n10:00 22:00\n7\n");
        assert_eq!(output, "10:00\n22:00\n1 0 00:00\n2 0 00:00");
    }

    #[test]
    fn invalid_event_line_replaces_report() {
        let input = "2\n09:00 19:00\n10\n09:00 1 a\n09:30 2 a 3\n09:40 4 a\n";
        assert_eq!(render(input), "09:30 2 a 3");
    }

    #[test]
    fn invalid_header_replaces_report() {
        assert_eq!(render("0\n09:00 19:00\n10\n"), "0");
        assert_eq!(render("1\n9am 7pm\n10\n"), "9am 7pm");
        assert_eq!(render("1\n09:00 19:00\nfree\n"), "free");
        assert_eq!(render(""), "not enough lines in file");
        assert_eq!(render("1\n"), "not enough lines in file");
    }

    #[test]
    fn time_going_backward_replaces_report() {
        let input = "1\n09:00 19:00\n10\n10:00 1 a\n09:00 1 b\n";
        assert_eq!(render(input), "09:00 1 b");
    }

    #[test]
    fn report_has_one_line_per_table() {
        let output = render("5\n09:00 19:00\n10\n09:30 1 a\n09:31 2 a 4\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.first(), Some(&"09:00"));
        assert_eq!(lines[lines.len() - 6], "19:00");
        assert_eq!(&lines[lines.len() - 5..], ["1 0 00:00", "2 0 00:00", "3 0 00:00", "4 100 09:29", "5 0 00:00"]);
        assert!(!output.ends_with('\n'));
    }

    #[test]
    fn table_line_format() {
        let stat = TableStat {
            busy: TimeDelta::minutes(61),
            revenue: 20,
        };
        assert_eq!(format_table(2, &stat), "2 20 01:01");
    }

    #[test]
    fn run_writes_rendered_output() {
        let mut output = Vec::new();
        run(&mut output, "1\n09:00 19:00\n10\n").unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "09:00\n19:00\n1 0 00:00");
    }
}
