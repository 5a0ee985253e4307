use crate::expression::token::Token;

/// Splits the tokens preceding an operator into its operand sequences.
///
/// `prefix` is everything before the operator token. A unary operator takes
/// the whole prefix as its single operand, and the right sequence is empty.
///
/// For a binary operator the split point is found by tracking the simulated
/// stack depth over the prefix. A complete sub-expression leaves the depth at
/// exactly one, so the last position where the depth is one (not counting the
/// final token, which always belongs to the right operand) closes the left
/// operand.
///
/// # Example
/// ```
/// use rpnexpr::expression::{reader::read_postfix, segment::segment, token::render};
///
/// // (a + b) * (c - d), operator `*` removed
/// let prefix = read_postfix("a b + c d -", &[]).unwrap();
/// let (left, right) = segment(&prefix, 2);
///
/// assert_eq!(render(left), "a b +");
/// assert_eq!(render(right), "c d -");
/// ```
#[must_use]
pub fn segment(prefix: &[Token], arity: usize) -> (&[Token], &[Token]) {
    if arity != 2 {
        return (prefix, &[]);
    }

    let mut depth: isize = 0;
    let mut boundary = 0;
    for (index, token) in prefix.iter()
                                .enumerate()
                                .take(prefix.len().saturating_sub(1))
    {
        depth += token.stack_effect();
        if depth == 1 {
            boundary = index;
        }
    }

    prefix.split_at((boundary + 1).min(prefix.len()))
}
