//! Condition text grammar.
//!
//! ```text
//! condition := any_of
//! any_of    := all_of ("OR" all_of)*
//! all_of    := negated ("AND" negated)*
//! negated   := "NOT"* atom
//! atom      := "(" any_of ")" | key (op json)?
//! key       := bare | "`" (escaped | char)* "`"
//! ```
//!
//! Keywords match in any case. Values are JSON literals handed to
//! `serde_json`, so anything a form can submit can be compared against.

use serde_json::Value;
use winnow::ascii::{multispace0, till_line_ending, Caseless};
use winnow::combinator::{
    alt, cut_err, delimited, not, opt, preceded, repeat, separated_foldl1, terminated,
};
use winnow::error::{ContextError, ErrMode, ModalResult, ParserError, StrContext};
use winnow::prelude::*;
use winnow::token::{any, none_of, one_of, take, take_while};

use crate::types::expr::{is_key_char, is_reserved};
use crate::{CompareOp, Expr};

/// Whitespace and `#` comments running to the end of the line.
fn blank(input: &mut &str) -> ModalResult<()> {
    multispace0.parse_next(input)?;
    while opt(('#', till_line_ending, multispace0))
        .parse_next(input)?
        .is_some()
    {}
    Ok(())
}

/// `word` in any case, not followed by a key character, so `notes` stays a
/// key and is not read as `NOT es`.
fn keyword<'i>(word: &'static str) -> impl Parser<&'i str, (), ErrMode<ContextError>> {
    preceded(blank, terminated(Caseless(word), not(one_of(is_key_char)))).void()
}

fn bare_key<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., is_key_char),
    )
        .take()
        .verify(|k: &str| !is_reserved(k))
        .parse_next(input)
}

/// A backtick-quoted key. `\` makes the next character literal.
fn quoted_key(input: &mut &str) -> ModalResult<String> {
    delimited(
        '`',
        repeat(0.., alt((preceded('\\', any), none_of(['`', '\\'])))),
        cut_err('`').context(StrContext::Label("closing backtick")),
    )
    .parse_next(input)
}

fn key(input: &mut &str) -> ModalResult<String> {
    alt((quoted_key, bare_key.map(str::to_owned)))
        .context(StrContext::Label("key"))
        .parse_next(input)
}

fn operator(input: &mut &str) -> ModalResult<CompareOp> {
    preceded(blank, take_while(1..=2, ['<', '>', '=', '!']))
        .try_map(str::parse::<CompareOp>)
        .parse_next(input)
}

/// Byte length of the JSON literal at the start of `text`: a string, a
/// balanced array or object, or a run of number and word characters.
fn json_extent(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            c if depth == 0 && !(c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) => {
                return (i > 0).then_some(i);
            }
            _ => {}
        }
    }
    (depth == 0 && !in_string && !text.is_empty()).then_some(text.len())
}

fn json_value(input: &mut &str) -> ModalResult<Value> {
    blank.parse_next(input)?;
    let Some(len) = json_extent(input) else {
        return Err(ErrMode::from_input(input));
    };
    take(len)
        .try_map(|text: &str| serde_json::from_str::<Value>(text))
        .context(StrContext::Label("JSON value"))
        .parse_next(input)
}

/// A key on its own tests truthiness; with an operator it compares.
fn key_condition(input: &mut &str) -> ModalResult<Expr> {
    let name = key.parse_next(input)?;
    match opt(operator).parse_next(input)? {
        Some(op) => {
            let value = cut_err(json_value).parse_next(input)?;
            Ok(Expr::Compare {
                key: name,
                op,
                value,
            })
        }
        None => Ok(Expr::Truthy(name)),
    }
}

fn atom(input: &mut &str) -> ModalResult<Expr> {
    blank.parse_next(input)?;
    alt((
        delimited('(', any_of, (blank, cut_err(')'))),
        key_condition,
    ))
    .context(StrContext::Label("condition"))
    .parse_next(input)
}

fn negated(input: &mut &str) -> ModalResult<Expr> {
    let nots: usize = repeat(0.., keyword("not")).parse_next(input)?;
    let inner = if nots > 0 {
        cut_err(atom).parse_next(input)?
    } else {
        atom.parse_next(input)?
    };
    Ok((0..nots).fold(inner, |expr, _| !expr))
}

fn all_of(input: &mut &str) -> ModalResult<Expr> {
    separated_foldl1(negated, keyword("and"), |a: Expr, (), b| a.and(b)).parse_next(input)
}

fn any_of(input: &mut &str) -> ModalResult<Expr> {
    separated_foldl1(all_of, keyword("or"), |a: Expr, (), b| a.or(b)).parse_next(input)
}

/// Full condition with trailing blanks; `Parser::parse` rejects leftovers.
pub fn parse_condition(input: &mut &str) -> ModalResult<Expr> {
    terminated(any_of, blank).parse_next(input)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::key as k;
    use crate::parse::parse;

    use super::*;

    #[test]
    fn parse_single_comparison() {
        let expr = parse(r#"type != "percentage""#).unwrap();
        assert_eq!(expr, k("type").neq("percentage"));
    }

    #[test]
    fn parse_bare_key_is_truthy() {
        assert_eq!(parse("enabled").unwrap(), Expr::Truthy("enabled".into()));
    }

    #[test]
    fn parse_dotted_and_dashed_keys() {
        assert_eq!(
            parse("shipping.free-over > 50").unwrap(),
            k("shipping.free-over").gt(50)
        );
    }

    #[test]
    fn parse_quoted_keys() {
        assert_eq!(
            parse("`shipping fee` > 5").unwrap(),
            k("shipping fee").gt(5)
        );
        assert_eq!(parse("`2fa`").unwrap(), k("2fa").truthy());
        assert_eq!(parse("`not`").unwrap(), k("not").truthy());
        assert_eq!(parse("``").unwrap(), k("").truthy());
        assert_eq!(parse(r"`a\`b\\c`").unwrap(), k(r"a`b\c").truthy());
        assert_eq!(
            parse("NOT `true` AND `and`").unwrap(),
            (!k("true").truthy()).and(k("and").truthy())
        );
    }

    #[test]
    fn reserved_words_are_not_bare_keys() {
        for bad in ["true", "null", "and", "Or", "NOT", "true AND x", "x OR false"] {
            assert!(parse(bad).is_err(), "expected error for {bad:?}");
        }
    }

    #[test]
    fn parse_and_expression() {
        assert!(matches!(parse("x == 1 AND y == 2").unwrap(), Expr::And(_, _)));
    }

    #[test]
    fn parse_or_expression() {
        assert!(matches!(parse("x == 1 or y == 2").unwrap(), Expr::Or(_, _)));
    }

    #[test]
    fn parse_not_expression() {
        assert!(matches!(parse("NOT x == 1").unwrap(), Expr::Not(_)));
        assert_eq!(
            parse("not NOT x").unwrap(),
            !!k("x").truthy()
        );
    }

    #[test]
    fn keywords_need_a_boundary() {
        assert_eq!(parse("notes").unwrap(), Expr::Truthy("notes".into()));
        assert_eq!(parse("order").unwrap(), Expr::Truthy("order".into()));
        assert_eq!(
            parse("android And ornate").unwrap(),
            k("android").truthy().and(k("ornate").truthy())
        );
    }

    #[test]
    fn parse_precedence_and_before_or() {
        match parse("a OR b AND c").unwrap() {
            Expr::Or(left, right) => {
                assert!(matches!(left.as_ref(), Expr::Truthy(n) if n == "a"));
                assert!(matches!(right.as_ref(), Expr::And(_, _)));
            }
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn parse_parenthesized_grouping() {
        match parse("(a OR b) AND c").unwrap() {
            Expr::And(left, right) => {
                assert!(matches!(left.as_ref(), Expr::Or(_, _)));
                assert!(matches!(right.as_ref(), Expr::Truthy(n) if n == "c"));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn parse_all_comparison_ops() {
        let ops = [
            ("==", CompareOp::Eq),
            ("!=", CompareOp::Neq),
            (">", CompareOp::Gt),
            (">=", CompareOp::Gte),
            ("<", CompareOp::Lt),
            ("<=", CompareOp::Lte),
        ];
        for (sym, expected_op) in ops {
            match parse(&format!("x {sym}-1")).unwrap() {
                Expr::Compare { op, value, .. } => {
                    assert_eq!(op, expected_op, "failed for {sym}");
                    assert_eq!(value, json!(-1));
                }
                other => panic!("expected Compare for {sym}, got {other:?}"),
            }
        }
    }

    #[test]
    fn parse_json_values() {
        let cases = [
            ("42", json!(42)),
            ("-5", json!(-5)),
            ("3.5", json!(3.5)),
            ("-0.25", json!(-0.25)),
            ("1e+21", json!(1e21)),
            ("18446744073709551615", json!(u64::MAX)),
            ("true", json!(true)),
            ("false", json!(false)),
            ("null", json!(null)),
            (r#""hello""#, json!("hello")),
            (r#"["a"]"#, json!(["a"])),
            (r#"[1, [2, "]"]]"#, json!([1, [2, "]"]])),
            (r#"{"min": 1, "max": {"x": null}}"#, json!({"min": 1, "max": {"x": null}})),
        ];
        for (literal, expected) in cases {
            match parse(&format!("(x == {literal})")).unwrap() {
                Expr::Compare { value, .. } => assert_eq!(value, expected, "failed for {literal}"),
                other => panic!("expected Compare for {literal}, got {other:?}"),
            }
        }
    }

    #[test]
    fn parse_string_with_escapes() {
        match parse(r#"x == "a\"b\\cé""#).unwrap() {
            Expr::Compare { value, .. } => assert_eq!(value, json!("a\"b\\c\u{e9}")),
            other => panic!("expected Compare, got {other:?}"),
        }
    }

    #[test]
    fn parse_comments_ignored() {
        let expr = parse("# shown for percentage discounts\ntype == \"percentage\" # only").unwrap();
        assert_eq!(expr, k("type").eq("percentage"));
    }

    #[test]
    fn parse_display_output() {
        let expr = k("enabled")
            .truthy()
            .and(!k("mode").eq("off").or(k("level").gte(2.5)));
        assert_eq!(parse(&expr.to_string()).unwrap(), expr);

        let awkward = k("shipping fee")
            .eq(json!(["a"]))
            .or(!k("true").truthy())
            .and(k("big").lt(u64::MAX));
        assert_eq!(parse(&awkward.to_string()).unwrap(), awkward);
    }

    #[test]
    fn json_extent_stops_at_the_literal() {
        assert_eq!(json_extent("5 AND y"), Some(1));
        assert_eq!(json_extent("-1.5e3)"), Some(6));
        assert_eq!(json_extent(r#""a)" OR b"#), Some(4));
        assert_eq!(json_extent(r#"{"a": [1]} x"#), Some(10));
        assert_eq!(json_extent(")"), None);
        assert_eq!(json_extent("[1"), None);
        assert_eq!(json_extent("]"), None);
        assert_eq!(json_extent(""), None);
    }

    #[test]
    fn parse_errors() {
        for bad in [
            "",
            "x ==",
            "x = 1",
            "(a AND b",
            "a AND",
            "NOT",
            "x == y",
            "x == [1",
            "1 == x",
            "a b",
            "`open",
        ] {
            assert!(parse(bad).is_err(), "expected error for {bad:?}");
        }
    }
}
