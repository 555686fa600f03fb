//! Output formatting for a presentation session.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output, written as each step completes
//! - JSON: one structured document written when the session ends

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::adapter::RequestError;
use crate::person::{Admin, Person, User};

/// Steps of a session, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Admins,
    Users,
    ServerTime,
    QueueLength,
}

impl Section {
    pub fn heading(&self) -> &'static str {
        match self {
            Section::Admins => "Admins:",
            Section::Users => "Users:",
            Section::ServerTime => "Server time:",
            Section::QueueLength => "Coffee machine queue length:",
        }
    }
}

/// Receives session results as they arrive.
pub trait Reporter {
    /// Called before the request for `section` is made.
    fn section(&mut self, section: Section) -> io::Result<()>;
    fn admins(&mut self, admins: &[Admin]) -> io::Result<()>;
    fn users(&mut self, users: &[User]) -> io::Result<()>;
    fn server_time(&mut self, millis: i64) -> io::Result<()>;
    fn queue_length(&mut self, length: u64) -> io::Result<()>;
    /// Called at most once, after which no further steps are reported.
    fn failure(&mut self, error: &RequestError) -> io::Result<()>;
    fn finish(&mut self) -> io::Result<()>;
}

/// Format epoch milliseconds the way an en-US locale prints a date and time.
pub fn format_server_time<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(utc) => utc
            .with_timezone(tz)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        None => format!("Invalid Date ({})", millis),
    }
}

/// The line printed when a session ends early.
pub fn failure_line(error: &RequestError) -> String {
    format!(
        "{} \"{}\", but it's fine, sometimes errors are inevitable.",
        "Error:".red(),
        error
    )
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Human-readable reporter writing each step as soon as it completes.
pub struct PrettyReporter<W: Write> {
    out: W,
    /// `None` prints local time, using the offset in effect at each timestamp.
    offset: Option<FixedOffset>,
}

impl<W: Write> PrettyReporter<W> {
    /// Create a reporter printing times in the local time zone.
    pub fn new(out: W) -> Self {
        Self { out, offset: None }
    }

    /// Print times at a fixed UTC offset instead of local time.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    fn format_time(&self, millis: i64) -> String {
        match &self.offset {
            Some(offset) => format_server_time(millis, offset),
            None => format_server_time(millis, &Local),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn person(&mut self, person: &Person) -> io::Result<()> {
        writeln!(
            self.out,
            "  - {}, {}, {}",
            person.name().green(),
            person.age(),
            person.detail()
        )
    }
}

impl<W: Write> Reporter for PrettyReporter<W> {
    fn section(&mut self, section: Section) -> io::Result<()> {
        writeln!(self.out, "{}", section.heading().yellow())
    }

    fn admins(&mut self, admins: &[Admin]) -> io::Result<()> {
        for admin in admins {
            self.person(&Person::from(admin.clone()))?;
        }
        writeln!(self.out)
    }

    fn users(&mut self, users: &[User]) -> io::Result<()> {
        for user in users {
            self.person(&Person::from(user.clone()))?;
        }
        writeln!(self.out)
    }

    fn server_time(&mut self, millis: i64) -> io::Result<()> {
        writeln!(self.out, "  {}", self.format_time(millis))?;
        writeln!(self.out)
    }

    fn queue_length(&mut self, length: u64) -> io::Result<()> {
        writeln!(self.out, "  {}", length)
    }

    fn failure(&mut self, error: &RequestError) -> io::Result<()> {
        writeln!(self.out, "{}", failure_line(error))
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON document describing a whole session.
///
/// Steps that never ran are omitted.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admins: Option<Vec<Person>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<Person>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_time: Option<JsonServerTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coffee_machine_queue_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Server time as both raw milliseconds and an RFC 3339 string.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonServerTime {
    pub millis: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rfc3339: Option<String>,
}

/// Reporter that collects the session and writes it as JSON on finish.
pub struct JsonReporter<W: Write> {
    out: W,
    report: JsonReport,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            report: JsonReport {
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn section(&mut self, _section: Section) -> io::Result<()> {
        Ok(())
    }

    fn admins(&mut self, admins: &[Admin]) -> io::Result<()> {
        self.report.admins = Some(admins.iter().cloned().map(Person::from).collect());
        Ok(())
    }

    fn users(&mut self, users: &[User]) -> io::Result<()> {
        self.report.users = Some(users.iter().cloned().map(Person::from).collect());
        Ok(())
    }

    fn server_time(&mut self, millis: i64) -> io::Result<()> {
        self.report.server_time = Some(JsonServerTime {
            millis,
            rfc3339: DateTime::<Utc>::from_timestamp_millis(millis).map(|t| t.to_rfc3339()),
        });
        Ok(())
    }

    fn queue_length(&mut self, length: u64) -> io::Result<()> {
        self.report.coffee_machine_queue_length = Some(length);
        Ok(())
    }

    fn failure(&mut self, error: &RequestError) -> io::Result<()> {
        self.report.error = Some(error.to_string());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&self.report)?;
        writeln!(self.out, "{}", json)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person;

    fn plain() {
        colored::control::set_override(false);
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_format_server_time() {
        // 2023-11-14T22:13:20Z
        assert_eq!(
            format_server_time(1_700_000_000_000, &utc()),
            "11/14/2023, 10:13:20 PM"
        );
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_server_time(1_700_000_000_000, &plus_two),
            "11/15/2023, 12:13:20 AM"
        );
        assert!(format_server_time(i64::MAX, &utc()).starts_with("Invalid Date"));
    }

    #[test]
    fn test_local_time_uses_offset_at_each_timestamp() {
        let reporter = PrettyReporter::new(Vec::<u8>::new());
        // Mid-January and mid-July 2023, on opposite sides of any DST change.
        for millis in [1_673_784_000_000, 1_689_422_400_000] {
            let expected = Local
                .timestamp_millis_opt(millis)
                .unwrap()
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string();
            assert_eq!(reporter.format_time(millis), expected);
        }
    }

    #[test]
    fn test_fixed_offset_overrides_local_time() {
        let reporter = PrettyReporter::new(Vec::<u8>::new()).with_offset(utc());
        assert_eq!(reporter.format_time(0), "1/1/1970, 12:00:00 AM");
    }

    #[test]
    fn test_pretty_lists_people() {
        plain();
        let mut reporter = PrettyReporter::new(Vec::new()).with_offset(utc());
        reporter.section(Section::Admins).unwrap();
        reporter.admins(person::admins()).unwrap();
        reporter.finish().unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            output,
            "Admins:\n  - Jane Doe, 32, Administrator\n  - Bruce Willis, 64, World saver\n\n"
        );
    }

    #[test]
    fn test_failure_line() {
        plain();
        let error = RequestError::RequestFailed("out of beans".to_string());
        assert_eq!(
            failure_line(&error),
            "Error: \"out of beans\", but it's fine, sometimes errors are inevitable."
        );
    }

    #[test]
    fn test_json_omits_missing_steps() {
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.users(person::users()).unwrap();
        reporter
            .failure(&RequestError::RequestFailed("nope".to_string()))
            .unwrap();
        reporter.finish().unwrap();

        let value: serde_json::Value = serde_json::from_slice(&reporter.into_inner()).unwrap();
        assert_eq!(value["users"][0]["type"], "user");
        assert_eq!(value["users"][0]["name"], "Max Mustermann");
        assert_eq!(value["error"], "nope");
        assert!(value.get("admins").is_none());
        assert!(value.get("server_time").is_none());
    }

    #[test]
    fn test_json_server_time() {
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.server_time(0).unwrap();
        reporter.finish().unwrap();

        let report: JsonReport = serde_json::from_slice(&reporter.into_inner()).unwrap();
        let time = report.server_time.unwrap();
        assert_eq!(time.millis, 0);
        assert_eq!(time.rfc3339.as_deref(), Some("1970-01-01T00:00:00+00:00"));
    }
}
