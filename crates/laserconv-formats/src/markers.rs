//! Class-marker detection shared by both formats.
//!
//! A parameter list selects the ENGRAVE class when it contains the
//! literal token "2" or "3" anywhere; order and the other tokens are
//! irrelevant. GEO edge records and LST `TC_LASER_ON` commands use the
//! same rule.

use laserconv_core::CutClass;

pub(crate) fn class_from_markers<'a, I>(tokens: I) -> CutClass
where
    I: IntoIterator<Item = &'a str>,
{
    for token in tokens {
        if token == "2" || token == "3" {
            return CutClass::Engrave;
        }
    }
    CutClass::Cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_membership() {
        assert_eq!(class_from_markers("1 0".split_whitespace()), CutClass::Cut);
        assert_eq!(
            class_from_markers("3 0".split_whitespace()),
            CutClass::Engrave
        );
        assert_eq!(
            class_from_markers("0 2".split_whitespace()),
            CutClass::Engrave
        );
        // "20" is not a marker; the test is exact token membership.
        assert_eq!(class_from_markers("20 0".split_whitespace()), CutClass::Cut);
        assert_eq!(class_from_markers(std::iter::empty()), CutClass::Cut);
    }
}
