//! Cron expression parser with a stateful cursor to step to the next or previous scheduled time.
#![deny(unsafe_code, warnings, missing_docs)]

//! The crate is intended to:
//! - parse six-fields cron expressions;
//! - find the next or previous scheduled time from any point in time, optionally limited by a window.
//!
//! _This is not a cron jobs scheduler or runner._ It only answers the question "when".
//!
//! ## Cron expression format
//!
//! Expression is a list of up to six fields separated by single spaces:
//! seconds, minutes, hours, day of month, month and day of week.
//! Fields are aligned to the right: the last field is always day of week,
//! so the traditional 5-fields expression gets seconds `0` by default.
//! Every omitted leading field gets its default value from [`DEFAULT_FIELDS`](schedule::DEFAULT_FIELDS):
//! `0` for seconds and `*` for the rest.
//!
//! | Field        | Allowed values  | Allowed special characters |
//! |--------------|-----------------|----------------------------|
//! | Seconds      | 0-59            | * , - /                    |
//! | Minutes      | 0-59            | * , - /                    |
//! | Hours        | 0-23            | * , - /                    |
//! | Day of Month | 1-31            | * , - / ? L                |
//! | Month        | 1-12 or JAN-DEC | * , - /                    |
//! | Day of Week  | 0-7 or SUN-SAT  | * , - / ? L                |
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `,` - list of values or patterns, i.e. `1,7,12`, `SUN,FRI`;
//! - `-` - range of values, i.e. `0-15`, `JAN-MAR`;
//! - `/` - repeating values, i.e. `*/12`, `10/5`, `30-59/2`;
//! - `L` - last day of the month (for day of month field), or Sunday (for day of week field);
//! - `?` - for days of month or week means the field matches nothing, so the other day field decides alone.
//!
//! Day of week `7` is Sunday, the same as `0`.
//! Day of month and day of week are joined with OR: the day matches if either of them matches.
//! So `0 0 0 1 * MON` fires on the first day of every month and on every Monday.
//!
//! ## How to use
//!
//! [`Schedule`] is a parsed expression, it answers stateless queries:
//! [next_after()](Schedule::next_after), [prev_before()](Schedule::prev_before)
//! and [seek()](Schedule::seek) with an optional bound.
//!
//! [`CronCursor`] remembers the last found time and steps from it in both directions,
//! respecting the optional [`Window`].
//!
//! ### Example with `Schedule`
//! ```rust
//! use chrono::Utc;
//! use cron_cursor::{Result, Schedule};
//!
//! fn next_midnight() -> Result<()> {
//!     let schedule = Schedule::new("0 0 0 * * *")?;
//!     let now = Utc::now();
//!
//!     let next = schedule.next_after(&now)?;
//!     println!("next: {next}");
//!
//!     Ok(())
//! }
//! # next_midnight().unwrap();
//! ```
//!
//! ### Example with `CronCursor`
//! ```rust
//! use chrono::{Duration, Utc};
//! use cron_cursor::{CronCursor, Result, Window};
//!
//! fn weekdays() -> Result<()> {
//!     let now = Utc::now();
//!     let window = Window::unbounded().with_end(now + Duration::days(14));
//!     let mut cursor = CronCursor::with_window("0 30 9 ? * MON-FRI", &now, window)?;
//!
//!     // every weekday at 09:30 during the next two weeks
//!     cursor.upcoming().for_each(|t| println!("next: {t}"));
//!     assert!(!cursor.has_next());
//!
//!     Ok(())
//! }
//! # weekdays().unwrap();
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`Schedule`].

/// Stateful schedule walker.
pub mod cursor;
/// Crate specific Error implementation.
pub mod error;
/// Cron expression fields parser.
pub mod field;
/// Cron expression parser and scheduled time search.
pub mod schedule;
mod series;
mod utils;

// Re-export of public entities.
pub use cursor::{CronCursor, Events, Window};
pub use error::CronError;
pub use field::{Field, FieldType, Token};
pub use schedule::{Direction, Schedule};

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;
