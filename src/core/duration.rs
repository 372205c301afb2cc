use crate::error::{Error, Result};

/// Convert a compact ISO-8601 duration (`PT1H2M3S`, every component
/// optional) into total whole seconds.
///
/// The YouTube API only emits well-formed values; anything else is a caller
/// bug, so malformed input fails loudly instead of silently parsing to 0.
/// Out-of-order or duplicated unit markers (`PT5S10M`) leave residual text
/// behind the marker scan and are rejected the same way.
pub fn parse_duration(literal: &str) -> Result<u64> {
    let mut rest = literal
        .strip_prefix("PT")
        .ok_or_else(|| Error::invalid_duration(literal))?;

    let mut total: u64 = 0;
    for (marker, scale) in [('H', 3600), ('M', 60), ('S', 1)] {
        if let Some(pos) = rest.find(marker) {
            let value: u64 = rest[..pos]
                .parse()
                .map_err(|_| Error::invalid_duration(literal))?;
            total += value * scale;
            rest = &rest[pos + 1..];
        }
    }

    if !rest.is_empty() {
        return Err(Error::invalid_duration(literal));
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::parse_duration;

    #[test]
    fn full_duration() {
        assert_eq!(parse_duration("PT1H2M3S").expect("valid"), 3723);
    }

    #[test]
    fn seconds_only() {
        assert_eq!(parse_duration("PT45S").expect("valid"), 45);
    }

    #[test]
    fn minutes_only() {
        assert_eq!(parse_duration("PT2M").expect("valid"), 120);
    }

    #[test]
    fn degenerate_empty() {
        assert_eq!(parse_duration("PT").expect("valid"), 0);
    }

    #[test]
    fn hours_and_seconds_without_minutes() {
        assert_eq!(parse_duration("PT2H30S").expect("valid"), 7230);
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(parse_duration("1H2M3S").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn rejects_non_numeric_component() {
        assert!(parse_duration("PTxS").is_err());
        assert!(parse_duration("PT1H2xM").is_err());
    }

    #[test]
    fn rejects_out_of_order_markers() {
        assert!(parse_duration("PT5S10M").is_err());
    }

    #[test]
    fn rejects_duplicated_markers() {
        assert!(parse_duration("PT1M2M").is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse_duration("PT45S extra").is_err());
    }

    #[test]
    fn rejects_negative_component() {
        assert!(parse_duration("PT-5S").is_err());
    }
}
