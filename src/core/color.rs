/// `#RRGGBB` color strings, the only color representation the data model
/// carries. Parsing is forgiving about case, nothing else.

pub fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

pub fn format_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        assert_eq!(parse_hex("#30D158"), Some((0x30, 0xD1, 0x58)));
        assert_eq!(format_hex(0x30, 0xD1, 0x58), "#30D158");
        assert_eq!(parse_hex(&format_hex(0, 128, 255)), Some((0, 128, 255)));
    }

    #[test]
    fn lowercase_accepted() {
        assert_eq!(parse_hex("#ff9f0a"), Some((0xFF, 0x9F, 0x0A)));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse_hex("30D158"), None);
        assert_eq!(parse_hex("#30D15"), None);
        assert_eq!(parse_hex("#30D1588"), None);
        assert_eq!(parse_hex("#30D15G"), None);
        assert_eq!(parse_hex(""), None);
    }
}
