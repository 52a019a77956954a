use nom::bytes::complete::take_while_m_n;
use nom::error::{Error, ErrorKind};
use nom::IResult;

use crate::error::ConfigError;

/// Parse two hex digits into one channel value
fn hex_channel(input: &str) -> IResult<&str, u8> {
    let (rest, digits) = take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit())(input)?;
    let value = u8::from_str_radix(digits, 16)
        .map_err(|_| nom::Err::Error(Error::new(input, ErrorKind::HexDigit)))?;
    Ok((rest, value))
}

/// Parse `#RRGGBB` or `RRGGBB` into its three 8-bit channels
pub fn hex_color(input: &str) -> IResult<&str, (u8, u8, u8)> {
    let input = input.strip_prefix('#').unwrap_or(input);
    let (input, r) = hex_channel(input)?;
    let (input, g) = hex_channel(input)?;
    let (input, b) = hex_channel(input)?;
    Ok((input, (r, g, b)))
}

/// Parse a complete color string. Surrounding or trailing characters,
/// whitespace included, are rejected.
pub fn parse_hex_color(input: &str) -> Result<(u8, u8, u8), ConfigError> {
    match hex_color(input) {
        Ok(("", rgb)) => Ok(rgb),
        _ => Err(ConfigError::InvalidColorFormat(input.to_string())),
    }
}
