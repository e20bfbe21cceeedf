//! Macros for ergonomic interpretation construction.

/// Build an [`Interpretation`](crate::core::Interpretation) from symbol names.
///
/// # Example
///
/// ```
/// use temporal_reward::interpretation;
///
/// let now = interpretation!["at_door", "has_key"];
/// assert!(now.contains("has_key"));
///
/// let nothing = interpretation![];
/// assert!(nothing.is_empty());
/// ```
#[macro_export]
macro_rules! interpretation {
    () => {
        $crate::core::Interpretation::empty()
    };
    ($($symbol:expr),+ $(,)?) => {
        <$crate::core::Interpretation as ::std::iter::FromIterator<$crate::core::Symbol>>::from_iter(
            [$($crate::core::Symbol::from($symbol)),+]
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Interpretation;

    #[test]
    fn interpretation_macro_collects_symbols() {
        let interpretation = interpretation!["b", "a", "b"];
        assert_eq!(interpretation, Interpretation::from_iter(["a", "b"]));
    }

    #[test]
    fn interpretation_macro_accepts_owned_strings() {
        let name = String::from("goal");
        let interpretation = interpretation![name.clone(), "door"];
        assert!(interpretation.contains("goal"));
        assert_eq!(interpretation.len(), 2);
    }

    #[test]
    fn empty_interpretation_macro() {
        assert_eq!(interpretation![], Interpretation::empty());
    }
}
