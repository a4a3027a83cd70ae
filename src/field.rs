use crate::{series::SeriesWithStep, utils, CronError, Result};
use std::{borrow::Cow, collections::BTreeSet, fmt::Display, num::NonZeroU8};

/// Type of values stored in the parsed [`Field`].
pub type FieldValueType = u8;

/// Number of fields in the cron expression.
pub const FIELDS_COUNT: usize = 6;

/// Position of the field in the cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldType {
    /// Seconds, `0-59`.
    Second = 0,
    /// Minutes, `0-59`.
    Minute = 1,
    /// Hours, `0-23`.
    Hour = 2,
    /// Day of month, `1-31` or `L`.
    DayOfMonth = 3,
    /// Month, `1-12` or `JAN-DEC`.
    Month = 4,
    /// Day of week, `0-7` (both `0` and `7` are Sunday), `SUN-SAT` or `L`.
    DayOfWeek = 5,
}

/// Special (non-numeric) field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
    /// `L`: last day of the month for day of month, Sunday for day of week.
    Last,
}

impl Token {
    fn as_str(&self) -> &'static str {
        match self {
            Token::Last => "l",
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Allowed range and special values of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraint {
    /// Minimal value.
    pub min: FieldValueType,
    /// Maximal value.
    pub max: FieldValueType,
    /// Allowed special tokens.
    pub tokens: &'static [Token],
}

const CONSTRAINTS: [Constraint; FIELDS_COUNT] = [
    Constraint { min: 0, max: 59, tokens: &[] },
    Constraint { min: 0, max: 59, tokens: &[] },
    Constraint { min: 0, max: 23, tokens: &[] },
    Constraint { min: 1, max: 31, tokens: &[Token::Last] },
    Constraint { min: 1, max: 12, tokens: &[] },
    Constraint { min: 0, max: 7, tokens: &[Token::Last] },
];

impl FieldType {
    /// All field types in the order of the cron expression.
    pub const ALL: [FieldType; FIELDS_COUNT] = [
        FieldType::Second,
        FieldType::Minute,
        FieldType::Hour,
        FieldType::DayOfMonth,
        FieldType::Month,
        FieldType::DayOfWeek,
    ];

    const DAYS_OF_WEEK: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
    const MONTHS: [&str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    /// Returns allowed range and tokens of the field.
    pub fn constraint(&self) -> &'static Constraint {
        &CONSTRAINTS[*self as usize]
    }

    /// Mnemonic names and the value of the first one.
    fn aliases(&self) -> Option<(&'static [&'static str], FieldValueType)> {
        match self {
            FieldType::Month => Some((&Self::MONTHS, 1)),
            FieldType::DayOfWeek => Some((&Self::DAYS_OF_WEEK, 0)),
            _ => None,
        }
    }

    fn accepts_any(&self) -> bool {
        matches!(self, FieldType::DayOfMonth | FieldType::DayOfWeek)
    }

    /// Replaces three-letter month or weekday names with their numbers, i.e. `jan-mar` becomes `1-3`.
    /// Unknown words are left as is.
    fn resolve_aliases<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let Some((names, first)) = self.aliases() else {
            return Cow::Borrowed(input);
        };

        let mut resolved = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(start) = rest.find(|c: char| c.is_ascii_alphabetic()) {
            resolved.push_str(&rest[..start]);
            rest = &rest[start..];
            let end = rest.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(rest.len());
            let word = &rest[..end];
            match utils::parse_string_value(word, names) {
                Some(index) => resolved.push_str(&(index + first).to_string()),
                None => resolved.push_str(word),
            }
            rest = &rest[end..];
        }
        resolved.push_str(rest);

        Cow::Owned(resolved)
    }

    /// Day of week `7` is Sunday as well as `0`.
    fn normalize(&self, value: FieldValueType) -> FieldValueType {
        match self {
            FieldType::DayOfWeek => value % self.constraint().max,
            _ => value,
        }
    }

    fn parse_value(&self, input: &str) -> Result<FieldValueType> {
        utils::parse_digital_value(input).ok_or_else(|| CronError::InvalidDigitalValue(input.to_owned()))
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldType::Second => "second",
            FieldType::Minute => "minute",
            FieldType::Hour => "hour",
            FieldType::DayOfMonth => "day of month",
            FieldType::Month => "month",
            FieldType::DayOfWeek => "day of week",
        };
        write!(f, "{name}")
    }
}

/// Parsed cron field: set of matching values and special tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Field {
    values: BTreeSet<FieldValueType>,
    tokens: BTreeSet<Token>,
}

impl Field {
    /// Parses a single field of the cron expression, i.e. `*/15`, `1-5`, `mon,wed,fri` or `L`.
    pub fn parse(type_: FieldType, input: &str) -> Result<Self> {
        let lowercase = input.to_lowercase();
        let input = type_.resolve_aliases(&lowercase);

        let mut field = Self::default();
        for item in utils::split(&input, ",", None) {
            field.parse_repeat(type_, item)?;
        }

        Ok(field)
    }

    /// Matching values in ascending order.
    pub fn values(&self) -> &BTreeSet<FieldValueType> {
        &self.values
    }

    /// Special tokens of the field.
    pub fn tokens(&self) -> &BTreeSet<Token> {
        &self.tokens
    }

    /// Returns `true` if `value` is one of the field values.
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        FieldValueType::try_from(value).is_ok_and(|value| self.values.contains(&value))
    }

    /// Returns `true` if the field has the `token`.
    #[inline]
    pub fn has_token(&self, token: Token) -> bool {
        self.tokens.contains(&token)
    }

    /// Returns `true` if the field doesn't match anything, i.e. it was `?`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.tokens.is_empty()
    }

    fn parse_repeat(&mut self, type_: FieldType, input: &str) -> Result<()> {
        let (base, step) = match input.rsplit_once('/') {
            Some((base, step)) => {
                let step = step
                    .parse::<NonZeroU8>()
                    .ok()
                    .filter(|_| step.bytes().all(|b| b.is_ascii_digit()))
                    .ok_or_else(|| CronError::InvalidRepeatingPattern(input.to_owned()))?;
                (base, step)
            }
            None => (input, NonZeroU8::MIN),
        };

        if base == "*" {
            let constraint = type_.constraint();
            let full_range = format!("{}-{}", constraint.min, constraint.max);
            self.parse_range(type_, &full_range, step)
        } else {
            self.parse_range(type_, base, step)
        }
    }

    fn parse_range(&mut self, type_: FieldType, input: &str, step: NonZeroU8) -> Result<()> {
        if let Some(token) = type_.constraint().tokens.iter().find(|t| t.as_str() == input) {
            self.tokens.insert(*token);
            return Ok(());
        } else if input == "?" && type_.accepts_any() {
            return Ok(());
        }

        let (min, max) = match input.split_once('-') {
            Some((min, max)) => (type_.parse_value(min)?, type_.parse_value(max)?),
            None => {
                let value = type_.parse_value(input)?;
                (value, value)
            }
        };

        self.values
            .extend(SeriesWithStep::new(min, max, step).map(|value| type_.normalize(value)));

        Ok(())
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "?");
        }

        let items = self
            .values
            .iter()
            .map(|v| v.to_string())
            .chain(self.tokens.iter().map(|t| t.to_string()))
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{items}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn values(field: &Field) -> Vec<FieldValueType> {
        field.values().iter().copied().collect()
    }

    #[test]
    fn test_constraints_are_consistent() {
        for type_ in FieldType::ALL {
            let constraint = type_.constraint();
            assert!(constraint.min <= constraint.max, "type = {type_:?}");
        }
        assert_eq!(FieldType::DayOfMonth.constraint().tokens, &[Token::Last]);
        assert_eq!(FieldType::DayOfWeek.constraint().tokens, &[Token::Last]);
        assert!(FieldType::Month.constraint().tokens.is_empty());
    }

    #[rstest]
    #[case(FieldType::Month, "jan", "1")]
    #[case(FieldType::Month, "jun-aug", "6-8")]
    #[case(FieldType::Month, "mar/3", "3/3")]
    #[case(FieldType::Month, "feb,oct-dec", "2,10-12")]
    #[case(FieldType::Month, "/jan/", "/1/")]
    #[case(FieldType::Month, "january", "january")]
    #[case(FieldType::Month, "sun", "sun")]
    #[case(FieldType::DayOfWeek, "sun", "0")]
    #[case(FieldType::DayOfWeek, "mon-fri", "1-5")]
    #[case(FieldType::DayOfWeek, "sat,sun", "6,0")]
    #[case(FieldType::DayOfWeek, "l", "l")]
    #[case(FieldType::DayOfWeek, "jan", "jan")]
    #[case(FieldType::Minute, "jan", "jan")]
    #[case(FieldType::DayOfMonth, "mon", "mon")]
    fn test_resolve_aliases(#[case] type_: FieldType, #[case] input: &str, #[case] expected: &str) {
        assert_eq!(type_.resolve_aliases(input), expected);
    }

    #[rstest]
    #[case(FieldType::Minute, "*/15", vec![0, 15, 30, 45])]
    #[case(FieldType::Second, "*/20", vec![0, 20, 40])]
    #[case(FieldType::Hour, "*/6", vec![0, 6, 12, 18])]
    #[case(FieldType::DayOfMonth, "*/10", vec![1, 11, 21, 31])]
    #[case(FieldType::Month, "*/3", vec![1, 4, 7, 10])]
    #[case(FieldType::Minute, "1-5", vec![1, 2, 3, 4, 5])]
    #[case(FieldType::Minute, "10-30/5", vec![10, 15, 20, 25, 30])]
    #[case(FieldType::Minute, "5", vec![5])]
    #[case(FieldType::Minute, "05", vec![5])]
    #[case(FieldType::Minute, "3,1,2-5", vec![1, 2, 3, 4, 5])]
    #[case(FieldType::Minute, "5-1", vec![])]
    #[case(FieldType::Second, "75", vec![75])]
    #[case(FieldType::Hour, "*", (0..=23).collect::<Vec<_>>())]
    #[case(FieldType::DayOfMonth, "*", (1..=31).collect::<Vec<_>>())]
    #[case(FieldType::DayOfMonth, "?", vec![])]
    #[case(FieldType::DayOfMonth, "L", vec![])]
    #[case(FieldType::Month, "JAN", vec![1])]
    #[case(FieldType::Month, "Jun-Aug", vec![6, 7, 8])]
    #[case(FieldType::Month, "dec,1", vec![1, 12])]
    #[case(FieldType::DayOfWeek, "*", vec![0, 1, 2, 3, 4, 5, 6])]
    #[case(FieldType::DayOfWeek, "0", vec![0])]
    #[case(FieldType::DayOfWeek, "7", vec![0])]
    #[case(FieldType::DayOfWeek, "5-7", vec![0, 5, 6])]
    #[case(FieldType::DayOfWeek, "MON-FRI", vec![1, 2, 3, 4, 5])]
    #[case(FieldType::DayOfWeek, "sun,sat", vec![0, 6])]
    #[case(FieldType::DayOfWeek, "*/2", vec![0, 2, 4, 6])]
    #[case(FieldType::DayOfWeek, "?", vec![])]
    fn test_field_parse_values(
        #[case] type_: FieldType,
        #[case] input: &str,
        #[case] expected: Vec<FieldValueType>,
    ) {
        let field = Field::parse(type_, input);
        assert!(field.is_ok(), "type = {type_:?}, input = {input}, error = {:?}", field.err());
        assert_eq!(values(&field.unwrap()), expected, "type = {type_:?}, input = {input}");
    }

    #[rstest]
    #[case(FieldType::DayOfMonth, "L")]
    #[case(FieldType::DayOfMonth, "l")]
    #[case(FieldType::DayOfMonth, "1,L")]
    #[case(FieldType::DayOfWeek, "L")]
    #[case(FieldType::DayOfWeek, "mon,l")]
    fn test_field_parse_last_token(#[case] type_: FieldType, #[case] input: &str) {
        let field = Field::parse(type_, input).unwrap();
        assert!(field.has_token(Token::Last), "type = {type_:?}, input = {input}");
    }

    #[test]
    fn test_day_of_week_seven_equals_zero() {
        assert_eq!(
            Field::parse(FieldType::DayOfWeek, "7").unwrap(),
            Field::parse(FieldType::DayOfWeek, "0").unwrap()
        );
        assert_eq!(
            Field::parse(FieldType::DayOfWeek, "sun").unwrap(),
            Field::parse(FieldType::DayOfWeek, "7").unwrap()
        );
    }

    #[test]
    fn test_question_mark_is_empty() {
        assert!(Field::parse(FieldType::DayOfMonth, "?").unwrap().is_empty());
        assert!(Field::parse(FieldType::DayOfWeek, "?").unwrap().is_empty());
    }

    #[rstest]
    #[case(FieldType::Second, "?")]
    #[case(FieldType::Minute, "L")]
    #[case(FieldType::Hour, "")]
    #[case(FieldType::Hour, "1,")]
    #[case(FieldType::Hour, "a")]
    #[case(FieldType::Hour, "1-")]
    #[case(FieldType::Hour, "-1")]
    #[case(FieldType::Hour, "1-2-3")]
    #[case(FieldType::Hour, "256")]
    #[case(FieldType::Month, "l")]
    #[case(FieldType::Month, "january")]
    #[case(FieldType::Month, "xyz")]
    #[case(FieldType::DayOfWeek, "we")]
    #[case(FieldType::Minute, "jan")]
    fn test_field_parse_invalid_value(#[case] type_: FieldType, #[case] input: &str) {
        assert!(
            matches!(Field::parse(type_, input), Err(CronError::InvalidDigitalValue(_))),
            "type = {type_:?}, input = {input}"
        );
    }

    #[rstest]
    #[case(FieldType::Minute, "*/0")]
    #[case(FieldType::Minute, "*/")]
    #[case(FieldType::Minute, "0/a")]
    #[case(FieldType::Minute, "0/-5")]
    #[case(FieldType::Minute, "0/+5")]
    #[case(FieldType::Minute, "0/256")]
    #[case(FieldType::Minute, "1,*/x")]
    fn test_field_parse_invalid_step(#[case] type_: FieldType, #[case] input: &str) {
        assert!(
            matches!(Field::parse(type_, input), Err(CronError::InvalidRepeatingPattern(e)) if input.ends_with(&e)),
            "type = {type_:?}, input = {input}"
        );
    }

    #[rstest]
    #[case(FieldType::Minute, 0, true)]
    #[case(FieldType::Minute, 15, true)]
    #[case(FieldType::Minute, 16, false)]
    #[case(FieldType::Minute, 300, false)]
    fn test_field_contains(#[case] type_: FieldType, #[case] value: u32, #[case] expected: bool) {
        let field = Field::parse(type_, "*/15").unwrap();
        assert_eq!(field.contains(value), expected);
    }

    #[rstest]
    #[case(FieldType::Minute, "*/15", "0,15,30,45")]
    #[case(FieldType::DayOfMonth, "1,15,L", "1,15,L")]
    #[case(FieldType::DayOfWeek, "?", "?")]
    #[case(FieldType::DayOfWeek, "fri,mon", "1,5")]
    fn test_field_display(#[case] type_: FieldType, #[case] input: &str, #[case] expected: &str) {
        assert_eq!(Field::parse(type_, input).unwrap().to_string(), expected);
    }
}
