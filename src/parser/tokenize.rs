use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1, take_while};
use nom::combinator::{all_consuming, map_res, value};
use nom::error::VerboseError;
use nom::number::complete::recognize_float;
use nom::sequence::preceded;

/// Splits `input` into tokens: `(` and `)` always stand alone, every other
/// maximal run of non-whitespace characters is one token.
pub fn tokenize(input: &str) -> Vec<&str> {
    let mut next_token = preceded(space, token);
    let mut tokens = Vec::new();
    let mut rest = input;
    while let Ok((remaining, tok)) = next_token(rest) {
        tokens.push(tok);
        rest = remaining;
    }
    tokens
}

/// Reads a whole token as a number: decimal or exponent notation, or a signed
/// `Infinity`. `nan`, `inf` and other spellings are not numbers.
pub(crate) fn number(token: &str) -> Option<f64> {
    all_consuming(literal)(token).ok().map(|(_, value)| value)
}

fn literal(input: &str) -> IResult<&str, f64, VerboseError<&str>> {
    alt((
        value(f64::INFINITY, alt((tag("Infinity"), tag("+Infinity")))),
        value(f64::NEG_INFINITY, tag("-Infinity")),
        map_res(recognize_float, str::parse::<f64>),
    ))(input)
}

fn token(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    alt((
        tag("("),
        tag(")"),
        take_till1(|c: char| c.is_whitespace() || c == '(' || c == ')'),
    ))(input)
}

fn space(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    take_while(char::is_whitespace)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_are_singleton_tokens() {
        assert_eq!(tokenize("(+ x 1)"), vec!["(", "+", "x", "1", ")"]);
        assert_eq!(tokenize("((x))"), vec!["(", "(", "x", ")", ")"]);
        assert_eq!(tokenize("(x y)z"), vec!["(", "x", "y", ")", "z"]);
    }

    #[test]
    fn whitespace_separates_runs() {
        assert_eq!(tokenize("  sumCb\tx\n-2.5  "), vec!["sumCb", "x", "-2.5"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\n ").is_empty());
    }

    #[test]
    fn numbers_must_fill_the_token() {
        assert_eq!(number("42"), Some(42.0));
        assert_eq!(number("-0.5"), Some(-0.5));
        assert_eq!(number("1e3"), Some(1000.0));
        assert_eq!(number("2x"), None);
        assert_eq!(number("x"), None);
        assert_eq!(number("+"), None);
        assert_eq!(number(".5"), Some(0.5));
        assert_eq!(number("1e"), None);
    }

    #[test]
    fn only_infinity_is_spelled_out() {
        assert_eq!(number("Infinity"), Some(f64::INFINITY));
        assert_eq!(number("-Infinity"), Some(f64::NEG_INFINITY));
        for word in ["nan", "NaN", "inf", "INF", "-inf", "infinity", "Infinityx"] {
            assert_eq!(number(word), None, "{word}");
        }
    }
}
