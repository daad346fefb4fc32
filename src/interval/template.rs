//! Index Name Templates
//!
//! Parses the date template carried by a rollover index pattern id and
//! renders it for a given bucket instant.
//!
//! # Supported Syntax
//!
//! ```text
//! [literal text]   copied verbatim
//! YYYY YY          calendar year (4 / 2 digits)
//! GGGG GG          ISO week-year (4 / 2 digits)
//! MM M             month (padded / unpadded)
//! DD D             day of month (padded / unpadded)
//! HH H             hour of day (padded / unpadded)
//! WW W             ISO week number (padded / unpadded)
//! ```
//!
//! Any other character is literal, so `[logstash-]YYYY.MM.DD` renders as
//! `logstash-2015.09.22`.

use chrono::{DateTime, Datelike, Timelike, Utc};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, none_of},
    combinator::{map, value},
    multi::many0,
    sequence::delimited,
    IResult,
};

use crate::interval::error::{IntervalError, IntervalResult};

/// Date token substituted into an index name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    Year4,
    Year2,
    IsoYear4,
    IsoYear2,
    Month2,
    Month,
    Day2,
    Day,
    Hour2,
    Hour,
    IsoWeek2,
    IsoWeek,
}

/// A single piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateItem {
    Literal(String),
    Token(DateToken),
}

/// Parsed index name template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTemplate {
    items: Vec<TemplateItem>,
}

impl IndexTemplate {
    /// Parse a template string
    pub fn parse(input: &str) -> IntervalResult<Self> {
        match parse_items(input) {
            Ok(("", items)) => Ok(Self {
                items: merge_literals(items),
            }),
            // Only an unmatched '[' can stop the parser early
            _ => Err(IntervalError::InvalidTemplate(input.to_string())),
        }
    }

    /// Parsed items, adjacent literals merged
    pub fn items(&self) -> &[TemplateItem] {
        &self.items
    }

    /// Render the template for the given instant
    pub fn render(&self, at: &DateTime<Utc>) -> String {
        let mut out = String::new();
        for item in &self.items {
            match item {
                TemplateItem::Literal(text) => out.push_str(text),
                TemplateItem::Token(token) => out.push_str(&render_token(*token, at)),
            }
        }
        out
    }
}

fn render_token(token: DateToken, at: &DateTime<Utc>) -> String {
    let iso = at.iso_week();
    match token {
        DateToken::Year4 => format!("{:04}", at.year()),
        DateToken::Year2 => format!("{:02}", at.year().rem_euclid(100)),
        DateToken::IsoYear4 => format!("{:04}", iso.year()),
        DateToken::IsoYear2 => format!("{:02}", iso.year().rem_euclid(100)),
        DateToken::Month2 => format!("{:02}", at.month()),
        DateToken::Month => at.month().to_string(),
        DateToken::Day2 => format!("{:02}", at.day()),
        DateToken::Day => at.day().to_string(),
        DateToken::Hour2 => format!("{:02}", at.hour()),
        DateToken::Hour => at.hour().to_string(),
        DateToken::IsoWeek2 => format!("{:02}", iso.week()),
        DateToken::IsoWeek => iso.week().to_string(),
    }
}

fn parse_items(input: &str) -> IResult<&str, Vec<TemplateItem>> {
    many0(alt((parse_escaped, parse_token, parse_literal_char)))(input)
}

/// Parse `[literal]`
fn parse_escaped(input: &str) -> IResult<&str, TemplateItem> {
    map(delimited(char('['), take_until("]"), char(']')), |s: &str| {
        TemplateItem::Literal(s.to_string())
    })(input)
}

/// Parse a date token, longest spelling first
fn parse_token(input: &str) -> IResult<&str, TemplateItem> {
    map(
        alt((
            value(DateToken::Year4, tag("YYYY")),
            value(DateToken::Year2, tag("YY")),
            value(DateToken::IsoYear4, tag("GGGG")),
            value(DateToken::IsoYear2, tag("GG")),
            value(DateToken::Month2, tag("MM")),
            value(DateToken::Month, tag("M")),
            value(DateToken::Day2, tag("DD")),
            value(DateToken::Day, tag("D")),
            value(DateToken::Hour2, tag("HH")),
            value(DateToken::Hour, tag("H")),
            value(DateToken::IsoWeek2, tag("WW")),
            value(DateToken::IsoWeek, tag("W")),
        )),
        TemplateItem::Token,
    )(input)
}

/// Parse one literal character (anything but the start of an escape)
fn parse_literal_char(input: &str) -> IResult<&str, TemplateItem> {
    map(none_of("["), |c: char| TemplateItem::Literal(c.to_string()))(input)
}

fn merge_literals(items: Vec<TemplateItem>) -> Vec<TemplateItem> {
    let mut merged: Vec<TemplateItem> = Vec::with_capacity(items.len());
    for item in items {
        if let TemplateItem::Literal(text) = &item {
            if let Some(TemplateItem::Literal(prev)) = merged.last_mut() {
                prev.push_str(text);
                continue;
            }
        }
        merged.push(item);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_logstash_template() {
        let template = IndexTemplate::parse("[logstash-]YYYY.MM.DD").unwrap();
        assert_eq!(
            template.items(),
            &[
                TemplateItem::Literal("logstash-".to_string()),
                TemplateItem::Token(DateToken::Year4),
                TemplateItem::Literal(".".to_string()),
                TemplateItem::Token(DateToken::Month2),
                TemplateItem::Literal(".".to_string()),
                TemplateItem::Token(DateToken::Day2),
            ]
        );
    }

    #[test]
    fn test_render_daily() {
        let template = IndexTemplate::parse("[logstash-]YYYY.MM.DD").unwrap();
        assert_eq!(template.render(&at(2015, 9, 2, 13)), "logstash-2015.09.02");
    }

    #[test]
    fn test_render_hourly_unpadded() {
        let template = IndexTemplate::parse("[app-]YYYY.M.D.H").unwrap();
        assert_eq!(template.render(&at(2015, 9, 2, 7)), "app-2015.9.2.7");
    }

    #[test]
    fn test_render_iso_week() {
        // 2016-01-01 belongs to ISO week 53 of 2015
        let template = IndexTemplate::parse("[weekly-]GGGG.WW").unwrap();
        assert_eq!(template.render(&at(2016, 1, 1, 0)), "weekly-2015.53");
    }

    #[test]
    fn test_unbracketed_lowercase_is_literal() {
        let template = IndexTemplate::parse("logs-YYYY").unwrap();
        assert_eq!(template.render(&at(2020, 1, 1, 0)), "logs-2020");
    }

    #[test]
    fn test_bracket_escapes_tokens() {
        let template = IndexTemplate::parse("[MYDATA-]YY").unwrap();
        assert_eq!(template.render(&at(2021, 6, 1, 0)), "MYDATA-21");
    }

    #[test]
    fn test_unterminated_bracket() {
        let err = IndexTemplate::parse("[logstash-YYYY").unwrap_err();
        assert_eq!(
            err,
            IntervalError::InvalidTemplate("[logstash-YYYY".to_string())
        );
    }
}
