//! NMEA sentence recognition
//!
//! Matches one line against the supported sentence shapes. Patterns are
//! anchored at the start of the line and ignore anything after the fields
//! they consume. Checksums are not validated.

use crate::error::{Result, TrackError};
use crate::types::{Attitude, FixFields, Hemisphere, PackedCoordinate, Sentence};
use regex::{Captures, Regex};

const GGA_PATTERN: &str = r"^\$GNGGA,([^,]+),([^,]*),([NS]),([^,]*),([EW]),";
const HDT_PATTERN: &str = r"^\$HEHDT,([^,]*),T";
const PRDID_PATTERN: &str = r"^\$PRDID,([^,*]*),([^,*]*),([^,*]*)(?:[*,]|$)";

/// Compiled sentence patterns
#[derive(Debug, Clone)]
pub struct SentenceParser {
    gga: Regex,
    hdt: Regex,
    prdid: Regex,
}

impl SentenceParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            gga: Regex::new(GGA_PATTERN)?,
            hdt: Regex::new(HDT_PATTERN)?,
            prdid: Regex::new(PRDID_PATTERN)?,
        })
    }

    /// Parse one line
    ///
    /// Returns `Ok(None)` for lines matching no supported pattern and an
    /// error when a pattern matched but one of its numeric fields did not
    /// decode. Both cases leave the caller's state untouched.
    pub fn parse_line(&self, line: &str) -> Result<Option<Sentence>> {
        let line = line.trim_end_matches(&['\r', '\n'][..]);

        if let Some(caps) = self.gga.captures(line) {
            return parse_gga(&caps).map(Some);
        }

        if let Some(caps) = self.hdt.captures(line) {
            let heading_deg = parse_decimal(capture(&caps, 1), "HEHDT heading")?;
            return Ok(Some(Sentence::TrueHeading { heading_deg }));
        }

        if let Some(caps) = self.prdid.captures(line) {
            return Ok(Some(Sentence::Attitude(Attitude {
                roll_deg: parse_decimal(capture(&caps, 1), "PRDID roll")?,
                pitch_deg: parse_decimal(capture(&caps, 2), "PRDID pitch")?,
                heading_deg: parse_decimal(capture(&caps, 3), "PRDID heading")?,
            })));
        }

        Ok(None)
    }
}

fn capture<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map(|m| m.as_str()).unwrap_or("")
}

fn parse_gga(caps: &Captures<'_>) -> Result<Sentence> {
    let latitude = parse_packed(capture(caps, 2), capture(caps, 3), "GNGGA latitude")?;
    let longitude = parse_packed(capture(caps, 4), capture(caps, 5), "GNGGA longitude")?;

    Ok(Sentence::Fix(FixFields {
        timestamp: capture(caps, 1).to_string(),
        latitude,
        longitude,
    }))
}

fn parse_packed(value: &str, letter: &str, field: &str) -> Result<PackedCoordinate> {
    let raw = parse_decimal(value, field)?;
    if raw < 0.0 {
        return Err(TrackError::Parse(format!(
            "{} must be unsigned, got '{}'",
            field, value
        )));
    }
    let hemisphere = Hemisphere::from_letter(letter).ok_or_else(|| {
        TrackError::Parse(format!("{} has invalid hemisphere '{}'", field, letter))
    })?;
    Ok(PackedCoordinate { raw, hemisphere })
}

/// Parse a signed decimal literal, rejecting empty, non-numeric and
/// non-finite values
fn parse_decimal(value: &str, field: &str) -> Result<f64> {
    let trimmed = value.trim();
    let is_literal = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
    if !is_literal {
        return Err(TrackError::Parse(format!(
            "{} is not a decimal number: '{}'",
            field, value
        )));
    }

    trimmed
        .parse::<f64>()
        .map_err(|e| TrackError::Parse(format!("{} '{}': {}", field, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> SentenceParser {
        SentenceParser::new().unwrap()
    }

    #[test]
    fn test_parse_gga() {
        let line = "$GNGGA,123519.00,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
        let sentence = parser().parse_line(line).unwrap().unwrap();

        match sentence {
            Sentence::Fix(fix) => {
                assert_eq!(fix.timestamp, "123519.00");
                assert_eq!(fix.latitude.raw, 4807.038);
                assert_eq!(fix.latitude.hemisphere, Hemisphere::North);
                assert_eq!(fix.longitude.raw, 1131.0);
                assert_eq!(fix.longitude.hemisphere, Hemisphere::East);
            }
            other => panic!("expected fix, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_gga_southern_western() {
        let line = "$GNGGA,081836.00,3351.000,S,15112.000,W,1,10,0.8,12.0,M,,M,,";
        match parser().parse_line(line).unwrap() {
            Some(Sentence::Fix(fix)) => {
                assert_eq!(fix.latitude.hemisphere, Hemisphere::South);
                assert_eq!(fix.longitude.hemisphere, Hemisphere::West);
            }
            other => panic!("expected fix, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_hdt() {
        let sentence = parser().parse_line("$HEHDT,274.07,T*03").unwrap();
        assert_eq!(
            sentence,
            Some(Sentence::TrueHeading {
                heading_deg: 274.07
            })
        );
    }

    #[test]
    fn test_parse_prdid() {
        let sentence = parser().parse_line("$PRDID,-1.31,+7.53,359.50*6E").unwrap();
        assert_eq!(
            sentence,
            Some(Sentence::Attitude(Attitude {
                roll_deg: -1.31,
                pitch_deg: 7.53,
                heading_deg: 359.5,
            }))
        );

        // No checksum and extra trailing fields are both accepted
        assert!(parser().parse_line("$PRDID,1.0,2.0,3.0").unwrap().is_some());
        assert!(parser().parse_line("$PRDID,1.0,2.0,3.0,extra").unwrap().is_some());
    }

    #[test]
    fn test_unsupported_sentences_do_not_match() {
        let p = parser();
        assert_eq!(p.parse_line("").unwrap(), None);
        assert_eq!(p.parse_line("$GPGSV,3,1,11,03,03,111,00*74").unwrap(), None);
        assert_eq!(p.parse_line("$GPGGA,123519,4807.038,N,01131.000,E,1").unwrap(), None);
        assert_eq!(p.parse_line("garbage $HEHDT,10.0,T").unwrap(), None);
        // Fix without position data
        assert_eq!(p.parse_line("$GNGGA,123519.00,,,,,0,00,99.99,,,,,,*56").unwrap(), None);
    }

    #[test]
    fn test_malformed_fields_are_errors() {
        let p = parser();
        assert!(p.parse_line("$HEHDT,abc,T").is_err());
        assert!(p.parse_line("$HEHDT,,T").is_err());
        assert!(p.parse_line("$HEHDT,inf,T").is_err());
        assert!(p.parse_line("$PRDID,1.0,x,3.0*00").is_err());
        assert!(p.parse_line("$GNGGA,1,48O7.038,N,01131.000,E,1").is_err());
        assert!(p.parse_line("$GNGGA,1,-4807.038,N,01131.000,E,1").is_err());
    }

    #[test]
    fn test_crlf_line_endings() {
        let sentence = parser().parse_line("$HEHDT,12.5,T*1F\r\n").unwrap();
        assert_eq!(sentence, Some(Sentence::TrueHeading { heading_deg: 12.5 }));
    }
}
