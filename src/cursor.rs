use crate::{
    schedule::{Direction, Schedule},
    CronError, Result,
};
use chrono::{DateTime, Local, TimeZone};

/// Optional bounds of the schedule search.
///
/// Search forward fails with [`CronError::OutOfTimespan`] after passing `end`,
/// search backward fails after passing `start`. Unset bound doesn't limit anything.
#[derive(Debug, Clone)]
pub struct Window<Tz: TimeZone> {
    start: Option<DateTime<Tz>>,
    end: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> Window<Tz> {
    /// Constructs window with both bounds optional.
    pub fn new(start: Option<DateTime<Tz>>, end: Option<DateTime<Tz>>) -> Self {
        Self { start, end }
    }

    /// Window without bounds.
    pub fn unbounded() -> Self {
        Self { start: None, end: None }
    }

    /// Sets the start bound.
    pub fn with_start(mut self, start: DateTime<Tz>) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the end bound.
    pub fn with_end(mut self, end: DateTime<Tz>) -> Self {
        self.end = Some(end);
        self
    }

    /// Start bound, if set.
    pub fn start(&self) -> Option<&DateTime<Tz>> {
        self.start.as_ref()
    }

    /// End bound, if set.
    pub fn end(&self) -> Option<&DateTime<Tz>> {
        self.end.as_ref()
    }

    /// The bound which limits search in the `direction`.
    fn limit(&self, direction: Direction) -> Option<&DateTime<Tz>> {
        match direction {
            Direction::Forward => self.end(),
            Direction::Backward => self.start(),
        }
    }
}

impl<Tz: TimeZone> Default for Window<Tz> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<Tz: TimeZone> PartialEq for Window<Tz> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<Tz: TimeZone> Eq for Window<Tz> {}

/// Stateful walker over the times of the [`Schedule`].
///
/// Remembers the last found time (or the reference time if nothing was found yet)
/// and moves from it to the next or previous matching time.
///
/// # Examples:
/// ```rust
/// use chrono::{DateTime, Utc};
/// use cron_cursor::{CronCursor, Result};
///
/// fn walk() -> Result<()> {
///     let reference = DateTime::parse_from_rfc3339("2024-01-01T10:00:00Z").unwrap().with_timezone(&Utc);
///     let mut cursor = CronCursor::new("0 0 12 * * ?", &reference)?;
///
///     assert_eq!(cursor.next()?.to_rfc3339(), "2024-01-01T12:00:00+00:00");
///     assert_eq!(cursor.next()?.to_rfc3339(), "2024-01-02T12:00:00+00:00");
///     assert_eq!(cursor.prev()?.to_rfc3339(), "2024-01-01T12:00:00+00:00");
///
///     Ok(())
/// }
/// # walk().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CronCursor<Tz: TimeZone = Local> {
    schedule: Schedule,
    current: DateTime<Tz>,
    window: Window<Tz>,
}

impl<Tz: TimeZone> CronCursor<Tz> {
    /// Parses `expression` and sets cursor to the `reference` time, without search bounds.
    pub fn new(expression: &str, reference: &DateTime<Tz>) -> Result<Self> {
        Self::with_window(expression, reference, Window::unbounded())
    }

    /// Parses `expression` and sets cursor to the `reference` time, search is limited by `window`.
    pub fn with_window(expression: &str, reference: &DateTime<Tz>, window: Window<Tz>) -> Result<Self> {
        Ok(Self::from_schedule(Schedule::new(expression)?, reference, window))
    }

    /// Constructs cursor from already parsed `schedule`.
    pub fn from_schedule(schedule: Schedule, reference: &DateTime<Tz>, window: Window<Tz>) -> Self {
        Self {
            schedule,
            current: reference.clone(),
            window,
        }
    }

    /// Moves cursor to the next scheduled time and returns it.
    ///
    /// Cursor stays in place on error.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<DateTime<Tz>> {
        self.step(Direction::Forward)
    }

    /// Moves cursor to the previous scheduled time and returns it.
    ///
    /// Cursor stays in place on error.
    pub fn prev(&mut self) -> Result<DateTime<Tz>> {
        self.step(Direction::Backward)
    }

    /// Returns `true` if [`next()`](Self::next) would succeed. Cursor isn't moved.
    pub fn has_next(&self) -> bool {
        self.probe(Direction::Forward).is_ok()
    }

    /// Returns `true` if [`prev()`](Self::prev) would succeed. Cursor isn't moved.
    pub fn has_previous(&self) -> bool {
        self.probe(Direction::Backward).is_ok()
    }

    /// Current position: the last returned time, or the reference time.
    pub fn current(&self) -> &DateTime<Tz> {
        &self.current
    }

    /// Parsed schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Search bounds.
    pub fn window(&self) -> &Window<Tz> {
        &self.window
    }

    /// Returns iterator which moves cursor forward until the first error.
    pub fn upcoming(&mut self) -> Events<'_, Tz> {
        Events {
            cursor: self,
            direction: Direction::Forward,
        }
    }

    /// Returns iterator which moves cursor backward until the first error.
    pub fn preceding(&mut self) -> Events<'_, Tz> {
        Events {
            cursor: self,
            direction: Direction::Backward,
        }
    }

    fn probe(&self, direction: Direction) -> Result<DateTime<Tz>> {
        self.schedule
            .seek(&self.current, direction, self.window.limit(direction))
    }

    fn step(&mut self, direction: Direction) -> Result<DateTime<Tz>> {
        let found = self.probe(direction)?;
        self.current = found.clone();
        Ok(found)
    }
}

impl<Tz: TimeZone> PartialEq for CronCursor<Tz> {
    fn eq(&self, other: &Self) -> bool {
        self.schedule == other.schedule && self.current == other.current && self.window == other.window
    }
}

impl<Tz: TimeZone> Eq for CronCursor<Tz> {}

impl CronCursor<Local> {
    /// Constructs cursor in the local time zone from Unix timestamps (seconds).
    ///
    /// `start` or `end` equal to `0` means the bound isn't set.
    pub fn from_timestamps(expression: &str, current: i64, start: i64, end: i64) -> Result<Self> {
        let bound = |secs: i64| (secs != 0).then(|| local_time(secs)).transpose();
        let window = Window::new(bound(start)?, bound(end)?);

        Self::with_window(expression, &local_time(current)?, window)
    }
}

fn local_time(secs: i64) -> Result<DateTime<Local>> {
    Local
        .timestamp_opt(secs, 0)
        .single()
        .ok_or(CronError::InvalidTimestamp(secs))
}

/// Iterator over scheduled times produced by [`CronCursor::upcoming`] or [`CronCursor::preceding`].
///
/// Ends at the first search failure: window bound reached or nothing found.
#[derive(Debug)]
pub struct Events<'a, Tz: TimeZone> {
    cursor: &'a mut CronCursor<Tz>,
    direction: Direction,
}

impl<Tz: TimeZone> Iterator for Events<'_, Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.step(self.direction).ok()
    }
}
