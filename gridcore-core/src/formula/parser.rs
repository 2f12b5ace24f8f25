use crate::{Result, SpreadsheetError};
use crate::types::CellValue;
use super::ast::{Expr, BinaryOperator, UnaryOperator};
use super::tokenizer::Tokenizer;
use chumsky::prelude::*;

pub struct FormulaParser;

impl FormulaParser {
    /// Parse a formula string into an AST.
    ///
    /// Builds a precedence-climbing grammar out of the tokenizer's
    /// primitives: unary minus binds tighter than `^`, which binds tighter
    /// than `* /`, then `+ -`, then `&`, then comparisons (loosest).
    pub fn parse(formula: &str) -> Result<Expr> {
        let formula = formula.trim_start_matches('=').trim();

        if formula.is_empty() {
            return Err(SpreadsheetError::Parse("Empty formula".to_string()));
        }

        Self::expr_parser()
            .then_ignore(end())
            .parse(formula)
            .into_result()
            .map_err(|errs| Self::convert_error(formula, &errs))
    }

    fn convert_error(formula: &str, errs: &[Rich<char>]) -> SpreadsheetError {
        if errs.iter().any(|e| e.to_string().contains("#REF!")) {
            return SpreadsheetError::RefError;
        }
        let detail = errs
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unexpected input".to_string());
        SpreadsheetError::Parse(format!("Unable to parse formula '{}': {}", formula, detail))
    }

    /// The full expression grammar, built bottom-up from tightest to loosest
    /// binding: primary -> postfix `%` -> unary `-`/`+` -> `^` (right-assoc)
    /// -> `* /` -> `+ -` -> `&` -> comparisons.
    fn expr_parser<'a>() -> impl Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone {
        recursive(|expr| {
            let function_call = Tokenizer::function_name()
                .then(
                    expr.clone()
                        .separated_by(just(',').padded())
                        .allow_trailing()
                        .collect::<Vec<_>>()
                        .delimited_by(just('(').padded(), just(')').padded()),
                )
                .map(|(name, args)| Expr::FunctionCall { name, args });

            let parenthesized = expr
                .clone()
                .delimited_by(just('(').padded(), just(')').padded());

            let primary = choice((
                Tokenizer::number(),
                Tokenizer::boolean(),
                Tokenizer::string(),
                function_call,
                Tokenizer::cell_range(),
                Tokenizer::cell_reference(),
                parenthesized,
            ));

            let postfix = primary.foldl(just('%').padded().repeated(), |e, _| Expr::UnaryOp {
                op: UnaryOperator::Percent,
                expr: Box::new(e),
            });

            let unary = recursive(|unary| {
                choice((
                    just('-')
                        .padded()
                        .ignore_then(unary.clone())
                        .map(|e| Expr::UnaryOp {
                            op: UnaryOperator::Negate,
                            expr: Box::new(e),
                        }),
                    just('+').padded().ignore_then(unary),
                    postfix,
                ))
            });

            let power = recursive(|power| {
                unary
                    .clone()
                    .then(just('^').padded().ignore_then(power).or_not())
                    .map(|(base, exp)| match exp {
                        Some(rhs) => Expr::BinaryOp {
                            op: BinaryOperator::Power,
                            left: Box::new(base),
                            right: Box::new(rhs),
                        },
                        None => base,
                    })
            });

            let term_op = choice((
                just('*').to(BinaryOperator::Multiply),
                just('/').to(BinaryOperator::Divide),
            ))
            .padded();
            let term = power
                .clone()
                .foldl(term_op.then(power).repeated(), |left, (op, right)| {
                    Expr::BinaryOp {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    }
                });

            let additive_op = choice((
                just('+').to(BinaryOperator::Add),
                just('-').to(BinaryOperator::Subtract),
            ))
            .padded();
            let additive =
                term.clone()
                    .foldl(additive_op.then(term).repeated(), |left, (op, right)| {
                        Expr::BinaryOp {
                            op,
                            left: Box::new(left),
                            right: Box::new(right),
                        }
                    });

            let concat_op = just('&').to(BinaryOperator::Concat).padded();
            let concat = additive.clone().foldl(
                concat_op.then(additive).repeated(),
                |left, (op, right)| Expr::BinaryOp {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            );

            // Longer operators must be tried before their single-char
            // prefixes, or `<=`/`>=`/`<>` would be truncated to `<`/`>`.
            let comparison_op = choice((
                just("<=").to(BinaryOperator::LessThanOrEqual),
                just(">=").to(BinaryOperator::GreaterThanOrEqual),
                just("<>").to(BinaryOperator::NotEqual),
                just('=').to(BinaryOperator::Equal),
                just('<').to(BinaryOperator::LessThan),
                just('>').to(BinaryOperator::GreaterThan),
            ))
            .padded();

            concat.clone().foldl(
                comparison_op.then(concat).repeated(),
                |left, (op, right)| Expr::BinaryOp {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            )
        })
        .padded()
    }
}
