use no_std_strings::str32;

const DIGITS: &str = "0123456789ABCDEF";
// str32 holds up to 31 bytes.
const MAX_DIGITS: usize = 31;

/// Formats `n` in `radix` (clamped to 2..=16), zero padded to at least `width` digits.
///
/// Numbers needing more than 31 digits keep their lowest 31.
pub fn format_number(n: u32, radix: u8, width: u8) -> str32 {
    let radix = radix.clamp(2, 16) as u32;
    let width = (width as usize).min(MAX_DIGITS);

    let mut digits = [0u8; MAX_DIGITS];
    let mut len = 0;
    let mut rest = n;
    while len < MAX_DIGITS && (len < width || rest != 0 || len == 0) {
        digits[len] = (rest % radix) as u8;
        rest /= radix;
        len += 1;
    }

    let mut out = str32::new();
    for &d in digits[..len].iter().rev() {
        let d = d as usize;
        out.push(&DIGITS[d..d + 1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_padding() {
        assert_eq!(format_number(1234, 10, 10), "0000001234");
        assert_eq!(format_number(0, 10, 1), "0");
        assert_eq!(format_number(0, 10, 0), "0");
        assert_eq!(format_number(98765, 10, 3), "98765");
    }

    #[test]
    fn other_radices() {
        assert_eq!(format_number(0x2f, 16, 2), "2F");
        assert_eq!(format_number(5, 2, 4), "0101");
        assert_eq!(format_number(255, 99, 0), "FF");
    }

    #[test]
    fn width_is_capped() {
        assert_eq!(format_number(7, 10, 200).to_string().len(), 31);
    }
}
