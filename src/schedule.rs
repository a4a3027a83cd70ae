use crate::{
    field::{Field, FieldType, Token, FIELDS_COUNT},
    utils, CronError, Result,
};
use chrono::{DateTime, Datelike, NaiveDateTime, SubsecRound, TimeDelta, TimeZone, Timelike, Weekday};
use std::{fmt::Display, str::FromStr};

/// Maximum number of search steps before the expression is considered unsatisfiable.
pub const MAX_LOOP: u32 = 10_000;

/// Values of the leading fields omitted in the expression.
pub const DEFAULT_FIELDS: [&str; FIELDS_COUNT] = ["0", "*", "*", "*", "*", "*"];

/// Direction of the schedule search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Towards the future.
    Forward,
    /// Towards the past.
    Backward,
}

impl Direction {
    #[inline]
    fn step(&self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// Returns `true` if `candidate` is beyond `limit` in this direction.
    #[inline]
    fn crossed(&self, candidate: &NaiveDateTime, limit: &NaiveDateTime) -> bool {
        match self {
            Direction::Forward => candidate > limit,
            Direction::Backward => candidate < limit,
        }
    }
}

/// Represents a parsed cron expression with its search methods.
///
/// For cron expression format, please refer to the [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Schedule {
    source: String,
    fields: [Field; FIELDS_COUNT],
}

impl Schedule {
    /// Parses provided `expression` and constructs [`Schedule`] instance.
    ///
    /// Fields are aligned to the right: the last one is always day of week,
    /// missing leading fields are taken from [`DEFAULT_FIELDS`].
    /// So the classic 5-fields expression gets `0` as seconds.
    ///
    /// Returns [`CronError`] in a case provided expression is unparsable.
    pub fn new(expression: impl Into<String>) -> Result<Self> {
        let source = expression.into();
        let expression = if source.is_empty() { "?" } else { source.as_str() };

        let elements = utils::split(expression, " ", None);
        if elements.len() > FIELDS_COUNT {
            return Err(CronError::InvalidCronSchedule(source));
        }

        let omitted = FIELDS_COUNT - elements.len();
        let mut fields: [Field; FIELDS_COUNT] = Default::default();
        for (index, type_) in FieldType::ALL.into_iter().enumerate() {
            let element = if index < omitted {
                DEFAULT_FIELDS[index]
            } else {
                elements[index - omitted]
            };
            fields[index] = Field::parse(type_, element)?;
        }

        let schedule = Self { source, fields };
        log::debug!("parsed cron expression {:?} as {}", schedule.source, schedule.fields_string());

        Ok(schedule)
    }

    /// Parsed field of the specified type.
    pub fn field(&self, type_: FieldType) -> &Field {
        &self.fields[type_ as usize]
    }

    /// Returns the next matching time strictly after `current`.
    pub fn next_after<Tz: TimeZone>(&self, current: &DateTime<Tz>) -> Result<DateTime<Tz>> {
        self.seek(current, Direction::Forward, None)
    }

    /// Returns the previous matching time strictly before `current`.
    pub fn prev_before<Tz: TimeZone>(&self, current: &DateTime<Tz>) -> Result<DateTime<Tz>> {
        self.seek(current, Direction::Backward, None)
    }

    /// Walks the calendar from `origin` in the `direction` until a time matching every field is found.
    ///
    /// Time is checked field by field, starting from seconds: the first mismatched field is moved
    /// by one unit and the check starts over, so carrying into bigger units is done by the calendar.
    /// Day matches if either day of month or day of week matches.
    /// Result never equals `origin` (with precision of seconds).
    ///
    /// Returns [`CronError::OutOfTimespan`] if the search went beyond `limit`
    /// and [`CronError::LoopLimitExceeded`] if nothing was found in [`MAX_LOOP`] steps.
    pub fn seek<Tz: TimeZone>(
        &self,
        origin: &DateTime<Tz>,
        direction: Direction,
        limit: Option<&DateTime<Tz>>,
    ) -> Result<DateTime<Tz>> {
        let tz = origin.timezone();
        let origin = origin.naive_local().trunc_subsecs(0);
        let limit = limit.map(|limit| limit.with_timezone(&tz).naive_local());
        let step = direction.step();
        let mut candidate = origin;

        for iteration in 0..MAX_LOOP {
            if limit.is_some_and(|limit| direction.crossed(&candidate, &limit)) {
                log::debug!(
                    "search {direction:?} from {origin} for {:?} is out of the timespan at {candidate}",
                    self.source
                );
                return Err(CronError::OutOfTimespan);
            }

            if !self.field(FieldType::Second).contains(candidate.second()) {
                candidate = shift(candidate, FieldType::Second, step)?;
                continue;
            }
            if !self.field(FieldType::Minute).contains(candidate.minute()) {
                candidate = shift(candidate, FieldType::Minute, step)?;
                continue;
            }
            if !self.field(FieldType::Hour).contains(candidate.hour()) {
                candidate = shift(candidate, FieldType::Hour, step)?;
                continue;
            }
            if !self.matches_day_of_month(&candidate) && !self.matches_day_of_week(&candidate) {
                candidate = shift(candidate, FieldType::DayOfMonth, step)?;
                continue;
            }
            if !self.field(FieldType::Month).contains(candidate.month()) {
                candidate = shift(candidate, FieldType::Month, step)?;
                continue;
            }

            if candidate == origin {
                candidate = shift(candidate, FieldType::Second, step)?;
                continue;
            }

            match tz.from_local_datetime(&candidate).earliest() {
                Some(found) => {
                    log::trace!(
                        "search {direction:?} from {origin} for {:?} found {candidate} in {} steps",
                        self.source,
                        iteration + 1
                    );
                    return Ok(found);
                }
                None => {
                    // local time is skipped by the time zone transition
                    log::trace!("skipping nonexistent local time {candidate}");
                    candidate = shift(candidate, FieldType::Second, step)?;
                }
            }
        }

        log::debug!(
            "search {direction:?} from {origin} for {:?} exceeded {MAX_LOOP} steps",
            self.source
        );
        Err(CronError::LoopLimitExceeded)
    }

    fn matches_day_of_month(&self, candidate: &NaiveDateTime) -> bool {
        let field = self.field(FieldType::DayOfMonth);
        field.contains(candidate.day())
            || (field.has_token(Token::Last)
                && candidate.day() == utils::days_in_month(candidate.year(), candidate.month()))
    }

    fn matches_day_of_week(&self, candidate: &NaiveDateTime) -> bool {
        let field = self.field(FieldType::DayOfWeek);
        let weekday = candidate.weekday();
        field.contains(weekday.num_days_from_sunday()) || (field.has_token(Token::Last) && weekday == Weekday::Sun)
    }

    fn fields_string(&self) -> String {
        FieldType::ALL
            .iter()
            .map(|type_| format!("{type_}=[{}]", self.field(*type_)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Moves `current` by `step` units of the `field`, the calendar normalizes the result.
fn shift(current: NaiveDateTime, field: FieldType, step: i64) -> Result<NaiveDateTime> {
    match field {
        FieldType::Second => current.checked_add_signed(TimeDelta::seconds(step)),
        FieldType::Minute => current.checked_add_signed(TimeDelta::minutes(step)),
        FieldType::Hour => current.checked_add_signed(TimeDelta::hours(step)),
        FieldType::DayOfMonth | FieldType::DayOfWeek => current.checked_add_signed(TimeDelta::days(step)),
        FieldType::Month => utils::shift_months(current, step),
    }
    .ok_or(CronError::LoopLimitExceeded)
}

impl From<Schedule> for String {
    fn from(value: Schedule) -> Self {
        value.source
    }
}

impl From<&Schedule> for String {
    fn from(value: &Schedule) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Schedule {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for Schedule {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Schedule {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for Schedule {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}
