//! Mission date parsing
//!
//! Mission dates arrive as free-form strings from the form layer. Three
//! shapes are accepted: ISO `YYYY-MM-DD` (optionally followed by a time),
//! compact `YYYYMMDD` and French `DD/MM/YYYY`.

use chrono::NaiveDate;
use nom::bytes::complete::take_while_m_n;
use nom::character::complete::char;
use nom::error::{Error, ErrorKind};
use nom::IResult;

/// Parse exactly `min..=max` ASCII digits as a number
fn number(min: usize, max: usize) -> impl Fn(&str) -> IResult<&str, u32> {
    move |input: &str| {
        let (rest, digits) = take_while_m_n(min, max, |c: char| c.is_ascii_digit())(input)?;
        let value = digits
            .parse::<u32>()
            .map_err(|_| nom::Err::Error(Error::new(input, ErrorKind::Digit)))?;
        Ok((rest, value))
    }
}

fn iso_date(input: &str) -> IResult<&str, (u32, u32, u32)> {
    let (input, year) = number(4, 4)(input)?;
    let (input, _) = char('-')(input)?;
    let (input, month) = number(1, 2)(input)?;
    let (input, _) = char('-')(input)?;
    let (input, day) = number(1, 2)(input)?;
    Ok((input, (year, month, day)))
}

fn compact_date(input: &str) -> IResult<&str, (u32, u32, u32)> {
    let (input, year) = number(4, 4)(input)?;
    let (input, month) = number(2, 2)(input)?;
    let (input, day) = number(2, 2)(input)?;
    Ok((input, (year, month, day)))
}

fn french_date(input: &str) -> IResult<&str, (u32, u32, u32)> {
    let (input, day) = number(1, 2)(input)?;
    let (input, _) = char('/')(input)?;
    let (input, month) = number(1, 2)(input)?;
    let (input, _) = char('/')(input)?;
    let (input, year) = number(4, 4)(input)?;
    Ok((input, (year, month, day)))
}

fn to_date((year, month, day): (u32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Parse a mission date in any accepted shape.
///
/// ISO dates may carry a trailing time component (`2024-03-15T10:30:00`);
/// the other shapes must match the whole string.
pub fn parse_mission_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok((rest, ymd)) = iso_date(input) {
        if rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ') {
            return to_date(ymd);
        }
        return None;
    }
    if let Ok(("", ymd)) = compact_date(input) {
        return to_date(ymd);
    }
    if let Ok(("", ymd)) = french_date(input) {
        return to_date(ymd);
    }
    None
}

/// Format a date for display in the report body (`DD/MM/YYYY`)
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a mission date string for display, passing unparseable input through
pub fn display_mission_date(input: &str) -> String {
    match parse_mission_date(input) {
        Some(date) => display_date(date),
        None => input.trim().to_string(),
    }
}
