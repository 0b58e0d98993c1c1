//! Shortest-round-trip decimal text for finite 64-bit floats.
//!
//! The output is the exact form of ECMAScript `Number.prototype.toString`
//! (decimal with optional `e` exponent), which `ryu-js` produces. The
//! walker, not this formatter, maps non-finite doubles to `null`.

use crate::error::TranscodeError;
use crate::sink::Sink;

/// Longest text `ryu-js` can produce, e.g. `-1.7976931348623157e+308`.
const MAX_DOUBLE_TEXT: usize = 25;

/// Writes the shortest round-trip decimal representation of a finite `d`.
pub(crate) fn write_double(sink: &mut Sink, d: f64) -> Result<(), TranscodeError> {
    debug_assert!(d.is_finite());
    let mut buf = ryu_js::Buffer::new();
    let text = buf.format_finite(d);
    sink.ensure_space(MAX_DOUBLE_TEXT)?;
    sink.put_slice(text.as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn format(d: f64) -> String {
        let mut sink = Sink::realloc(0, 32, None).unwrap();
        write_double(&mut sink, d).unwrap();
        String::from_utf8(sink.into_output()).unwrap()
    }

    #[test]
    fn test_integral_doubles_have_no_fraction() {
        assert_eq!(format(0.0), "0");
        assert_eq!(format(1.0), "1");
        assert_eq!(format(-2.0), "-2");
    }

    #[test]
    fn test_short_decimals() {
        assert_eq!(format(0.5), "0.5");
        assert_eq!(format(0.1), "0.1");
        assert_eq!(format(3.14), "3.14");
        assert_eq!(format(-2.5), "-2.5");
    }

    #[test]
    fn test_exponent_boundaries() {
        // ECMAScript switches to exponent form at 1e21 and below 1e-6.
        assert_eq!(format(1e20), "100000000000000000000");
        assert_eq!(format(1e21), "1e+21");
        assert_eq!(format(0.000001), "0.000001");
        assert_eq!(format(1e-7), "1e-7");
    }

    proptest! {
        #[test]
        fn prop_finite_doubles_round_trip(d in proptest::num::f64::ANY) {
            prop_assume!(d.is_finite());
            let text = format(d);
            let parsed: f64 = text.parse().unwrap();
            // -0.0 renders as "0", so compare numerically and check bits
            // only for nonzero values.
            prop_assert_eq!(parsed, d);
            if d != 0.0 {
                prop_assert_eq!(parsed.to_bits(), d.to_bits());
            }
        }
    }
}
