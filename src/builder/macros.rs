//! Macros for ergonomic expression construction.

/// Build an [`Expression`](crate::core::Expression) from alternating tokens.
///
/// Integers become operands and [`Operator`](crate::core::Operator) values
/// become operators.
///
/// # Panics
///
/// Panics if the tokens do not alternate or start with an operator.
///
/// # Example
///
/// ```
/// use calcmind::core::Operator::*;
/// use calcmind::expression;
///
/// let expression = expression![1, Plus, 32];
/// assert_eq!(expression.to_string(), "1 + 32");
/// assert!(expression![].is_empty());
/// ```
#[macro_export]
macro_rules! expression {
    () => {
        $crate::core::Expression::empty()
    };
    ($($token:expr),+ $(,)?) => {{
        let tokens: ::std::vec::Vec<$crate::core::Token> =
            ::std::vec![$($crate::core::Token::from($token)),+];
        match <$crate::core::Expression as ::std::convert::TryFrom<_>>::try_from(tokens) {
            ::std::result::Result::Ok(expression) => expression,
            ::std::result::Result::Err(error) => panic!("expression!: {}", error),
        }
    }};
}
