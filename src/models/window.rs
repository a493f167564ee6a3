use saturation_key::Rect;

/// Parse a render window given as `x1,y1,x2,y2` (half-open).
///
/// Used as a clap value parser, hence the `String` error.
pub fn parse_window(s: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(format!("expected x1,y1,x2,y2, got '{s}'"));
    }

    let mut coords = [0i32; 4];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid coordinate '{part}': {e}"))?;
    }

    let [x1, y1, x2, y2] = coords;
    if x2 < x1 || y2 < y1 {
        return Err(format!("window corners are inverted: {s}"));
    }
    Ok(Rect::new(x1, y1, x2, y2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window() {
        assert_eq!(parse_window("0,0,800,480"), Ok(Rect::new(0, 0, 800, 480)));
        assert_eq!(parse_window(" -4, 2 ,10,3"), Ok(Rect::new(-4, 2, 10, 3)));
    }

    #[test]
    fn test_parse_window_empty_is_allowed() {
        assert_eq!(parse_window("5,5,5,9"), Ok(Rect::new(5, 5, 5, 9)));
    }

    #[test]
    fn test_parse_window_rejects_bad_input() {
        assert!(parse_window("1,2,3").is_err());
        assert!(parse_window("1,2,3,x").is_err());
        assert!(parse_window("10,0,0,10").is_err());
    }
}
