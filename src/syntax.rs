use std::sync::LazyLock;

use regex::Regex;

const ADDRESS_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$";

static DEFAULT_CHECKER: LazyLock<SyntaxChecker> = LazyLock::new(SyntaxChecker::new);

/// Address shape check: `local@domain.tld`, ASCII only, TLD of 2 to 64 letters.
///
/// Owns its compiled pattern so a [`Validator`](crate::Validator) can carry
/// one instance instead of reaching for process-wide state.
#[derive(Debug, Clone)]
pub struct SyntaxChecker {
    pattern: Regex,
}

impl SyntaxChecker {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(ADDRESS_PATTERN).expect("address pattern compiles"),
        }
    }

    pub fn is_valid(&self, address: &str) -> bool {
        self.pattern.is_match(address)
    }
}

impl Default for SyntaxChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns `true` when `address` has a plausible mailbox shape. No I/O.
pub fn check_syntax(address: &str) -> bool {
    DEFAULT_CHECKER.is_valid(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_plain_and_tagged_addresses() {
        assert!(check_syntax("s.mancke@tarent.de"));
        assert!(check_syntax("s.Mancke+yzz42@tarent.de"));
        assert!(check_syntax("first_last%ops@mail.example.museum"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for input in [
            "",
            "xxx",
            "s.mancketarent.de",
            "s.mancke@tarentde",
            "s.mancke@tarent@sdc.de",
            "@example.org",
            "user@.",
            "user@example.o",
            "user@example.org\n",
            " user@example.org",
        ] {
            assert!(!check_syntax(input), "{input:?} should be rejected");
        }
    }

    #[test]
    fn tld_length_is_capped() {
        let ok = format!("user@example.{}", "a".repeat(64));
        let too_long = format!("user@example.{}", "a".repeat(65));
        assert!(check_syntax(&ok));
        assert!(!check_syntax(&too_long));
    }

    proptest! {
        #[test]
        fn more_than_one_at_is_never_valid(local in "[a-z]{1,8}", mid in "[a-z]{1,8}", tld in "[a-z]{2,6}") {
            let input = format!("{local}@{mid}@example.{tld}");
            prop_assert!(!check_syntax(&input));
        }

        #[test]
        fn dotless_domain_is_never_valid(local in "[a-z0-9._%+-]{1,12}", domain in "[a-z0-9-]{1,12}") {
            let input = format!("{local}@{domain}");
            prop_assert!(!check_syntax(&input));
        }

        #[test]
        fn checker_is_deterministic(input in ".{0,40}") {
            let checker = SyntaxChecker::new();
            prop_assert_eq!(checker.is_valid(&input), checker.is_valid(&input));
            prop_assert_eq!(checker.is_valid(&input), check_syntax(&input));
        }
    }
}
