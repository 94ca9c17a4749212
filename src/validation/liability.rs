//! Liability expression parts: `<person><suffix>`, joined by '/'

/// How one '/'-separated part of a liability reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LiabilityPart<'s> {
    /// A person followed by one of the accepted suffixes
    Person(&'s str, &'static str),
    /// An accepted suffix with nothing in front of it
    NoPerson,
    /// None of the accepted suffixes
    BadSuffix,
}

pub(crate) fn split_part<'s>(part: &'s str, suffixes: &[&'static str]) -> LiabilityPart<'s> {
    let part = part.trim();
    for suffix in suffixes {
        if let Some(person) = part.strip_suffix(suffix) {
            let person = person.trim();
            return if person.is_empty() {
                LiabilityPart::NoPerson
            } else {
                LiabilityPart::Person(person, suffix)
            };
        }
    }
    LiabilityPart::BadSuffix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::keywords::{CGT_SUFFIX, NI_SUFFIX};

    #[test]
    fn test_split_part() {
        assert_eq!(
            split_part("Joe(NI)", &[CGT_SUFFIX, NI_SUFFIX]),
            LiabilityPart::Person("Joe", NI_SUFFIX)
        );
        assert_eq!(split_part(" (CGT) ", &[CGT_SUFFIX]), LiabilityPart::NoPerson);
        assert_eq!(split_part("Joe", &[CGT_SUFFIX]), LiabilityPart::BadSuffix);
    }
}
