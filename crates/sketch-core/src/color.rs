//! Parser for CSS-style color strings delivered by color pickers.
//!
//! Built on `winnow` 0.7. Accepts hex notation (`#RGB`, `#RGBA`, `#RRGGBB`,
//! `#RRGGBBAA`) and the functional `rgb(r, g, b)` / `rgba(r, g, b, a)`
//! notation, with `r`, `g`, `b` in 0..=255 and `a` in 0.0..=1.0.

use crate::model::Color;
use winnow::combinator::{alt, opt, preceded};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::take_while;

impl Color {
    /// Parse a color string. See the module docs for accepted forms.
    pub fn parse(input: &str) -> Result<Color, String> {
        parse_color(input)
    }
}

/// Parse a complete color string; trailing input is an error.
#[must_use = "parsing result should be used"]
pub fn parse_color(input: &str) -> Result<Color, String> {
    let mut rest = input.trim();
    let color = alt((parse_hex_color, parse_rgb_function))
        .parse_next(&mut rest)
        .map_err(|e| format!("Color parse error in {input:?}: {e}"))?;
    if !rest.is_empty() {
        return Err(format!("Unexpected trailing input in color: {rest:?}"));
    }
    Ok(color)
}

/// Consume optional whitespace (concrete error type avoids inference issues).
fn skip_space(input: &mut &str) {
    use winnow::ascii::space0;
    let _: Result<&str, winnow::error::ErrMode<ContextError>> = space0.parse_next(input);
}

fn parse_hex_color(input: &mut &str) -> ModalResult<Color> {
    let _ = '#'.parse_next(input)?;
    let hex_digits: &str = take_while(3..=8, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;
    Color::from_hex(hex_digits).ok_or_else(|| winnow::error::ErrMode::Backtrack(ContextError::new()))
}

fn parse_rgb_function(input: &mut &str) -> ModalResult<Color> {
    let _ = alt(("rgba", "rgb")).parse_next(input)?;
    skip_space(input);
    let _ = '('.parse_next(input)?;
    skip_space(input);
    let r = parse_channel(input)?;
    parse_comma(input)?;
    let g = parse_channel(input)?;
    parse_comma(input)?;
    let b = parse_channel(input)?;
    let a = opt(preceded(parse_comma, parse_number)).parse_next(input)?;
    skip_space(input);
    let _ = ')'.parse_next(input)?;

    let a = a.unwrap_or(1.0);
    if !(0.0..=1.0).contains(&a) {
        return Err(winnow::error::ErrMode::Cut(ContextError::new()));
    }
    Ok(Color::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a))
}

fn parse_comma(input: &mut &str) -> ModalResult<()> {
    skip_space(input);
    let _ = ','.parse_next(input)?;
    skip_space(input);
    Ok(())
}

fn parse_channel(input: &mut &str) -> ModalResult<u8> {
    let value = parse_number(input)?;
    if !(0.0..=255.0).contains(&value) {
        return Err(winnow::error::ErrMode::Cut(ContextError::new()));
    }
    Ok(value.round() as u8)
}

fn parse_number(input: &mut &str) -> ModalResult<f32> {
    let start = *input;
    let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ =
            take_while::<_, _, ContextError>(0.., |c: char| c.is_ascii_digit()).parse_next(input);
    }
    let matched = &start[..start.len() - input.len()];
    matched
        .parse::<f32>()
        .map_err(|_| winnow::error::ErrMode::Backtrack(ContextError::new()))
}
