//! Combinators: positional mapping, alternatives, lists and field lookup.

use tracing::trace;

use crate::{
    errors::{combine, combine_all, FieldError},
    parse::{primitives::tree_validation, Parser},
    tree::{Identifier, Node},
};

// ============================================================================
// MAPPING
// ============================================================================

/// Runs `a` then `b` on the node `a` left behind and combines their values.
///
/// When both fail, the errors are merged under the identifier of the node
/// being parsed, `a`'s error first.
pub fn map2<Id, A, B, C>(
    f: impl Fn(A, B) -> C + 'static,
    a: Parser<Id, A>,
    b: Parser<Id, B>,
) -> Parser<Id, C>
where
    Id: Identifier,
    A: 'static,
    B: 'static,
    C: 'static,
{
    Parser::new(move |node: &Node<Id>| {
        let (node, left) = a.run(node);
        let (node, right) = b.run(&node);
        let result = match (left, right) {
            (Ok(a), Ok(b)) => Ok(f(a, b)),
            (Err(error), Ok(_)) | (Ok(_), Err(error)) => Err(error),
            (Err(first), Err(second)) => Err(combine(node.identifier().cloned(), first, second)),
        };
        (node, result)
    })
}

fn pair<Id: Identifier, A: 'static, B: 'static>(
    a: Parser<Id, A>,
    b: Parser<Id, B>,
) -> Parser<Id, (A, B)> {
    map2(|a, b| (a, b), a, b)
}

pub fn map3<Id, A, B, C, R>(
    f: impl Fn(A, B, C) -> R + 'static,
    a: Parser<Id, A>,
    b: Parser<Id, B>,
    c: Parser<Id, C>,
) -> Parser<Id, R>
where
    Id: Identifier,
    A: 'static,
    B: 'static,
    C: 'static,
    R: 'static,
{
    map2(move |(a, b), c| f(a, b, c), pair(a, b), c)
}

pub fn map4<Id, A, B, C, D, R>(
    f: impl Fn(A, B, C, D) -> R + 'static,
    a: Parser<Id, A>,
    b: Parser<Id, B>,
    c: Parser<Id, C>,
    d: Parser<Id, D>,
) -> Parser<Id, R>
where
    Id: Identifier,
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    R: 'static,
{
    map2(move |((a, b), c), d| f(a, b, c, d), pair(pair(a, b), c), d)
}

pub fn map5<Id, A, B, C, D, E, R>(
    f: impl Fn(A, B, C, D, E) -> R + 'static,
    a: Parser<Id, A>,
    b: Parser<Id, B>,
    c: Parser<Id, C>,
    d: Parser<Id, D>,
    e: Parser<Id, E>,
) -> Parser<Id, R>
where
    Id: Identifier,
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    E: 'static,
    R: 'static,
{
    map2(
        move |(((a, b), c), d), e| f(a, b, c, d, e),
        pair(pair(pair(a, b), c), d),
        e,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn map6<Id, A, B, C, D, E, F, R>(
    f: impl Fn(A, B, C, D, E, F) -> R + 'static,
    a: Parser<Id, A>,
    b: Parser<Id, B>,
    c: Parser<Id, C>,
    d: Parser<Id, D>,
    e: Parser<Id, E>,
    g: Parser<Id, F>,
) -> Parser<Id, R>
where
    Id: Identifier,
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    E: 'static,
    F: 'static,
    R: 'static,
{
    map2(
        move |((((a, b), c), d), e), g| f(a, b, c, d, e, g),
        pair(pair(pair(pair(a, b), c), d), e),
        g,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn map7<Id, A, B, C, D, E, F, G, R>(
    f: impl Fn(A, B, C, D, E, F, G) -> R + 'static,
    a: Parser<Id, A>,
    b: Parser<Id, B>,
    c: Parser<Id, C>,
    d: Parser<Id, D>,
    e: Parser<Id, E>,
    g: Parser<Id, F>,
    h: Parser<Id, G>,
) -> Parser<Id, R>
where
    Id: Identifier,
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    E: 'static,
    F: 'static,
    G: 'static,
    R: 'static,
{
    map2(
        move |(((((a, b), c), d), e), g), h| f(a, b, c, d, e, g, h),
        pair(pair(pair(pair(pair(a, b), c), d), e), g),
        h,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn map8<Id, A, B, C, D, E, F, G, H, R>(
    f: impl Fn(A, B, C, D, E, F, G, H) -> R + 'static,
    a: Parser<Id, A>,
    b: Parser<Id, B>,
    c: Parser<Id, C>,
    d: Parser<Id, D>,
    e: Parser<Id, E>,
    g: Parser<Id, F>,
    h: Parser<Id, G>,
    i: Parser<Id, H>,
) -> Parser<Id, R>
where
    Id: Identifier,
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    E: 'static,
    F: 'static,
    G: 'static,
    H: 'static,
    R: 'static,
{
    map2(
        move |((((((a, b), c), d), e), g), h), i| f(a, b, c, d, e, g, h, i),
        pair(pair(pair(pair(pair(pair(a, b), c), d), e), g), h),
        i,
    )
}

// ============================================================================
// ALTERNATIVES AND LISTS
// ============================================================================

/// Tries each parser against the same node and keeps the first success.
///
/// When every parser fails, all their errors are merged and the node is
/// returned as it came in. With no parsers at all the result is a
/// `ParseError` for the node.
pub fn one_of<Id: Identifier, A: 'static>(
    parsers: impl IntoIterator<Item = Parser<Id, A>>,
) -> Parser<Id, A> {
    let parsers: Vec<Parser<Id, A>> = parsers.into_iter().collect();
    Parser::new(move |node: &Node<Id>| {
        let id = node.identifier().cloned();
        let mut errors = Vec::with_capacity(parsers.len());
        for parser in &parsers {
            match parser.run(node) {
                (rewritten, Ok(a)) => return (rewritten, Ok(a)),
                (_, Err(error)) => errors.push(error),
            }
        }
        let error = combine_all(id.clone(), errors).unwrap_or(FieldError::ParseError(id));
        (node.clone(), Err(error))
    })
}

/// Runs `parser` over every child of the node, in order.
///
/// Each child is replaced by whatever the parser left behind. Failures from
/// several children are merged right to left, which keeps them in child
/// order.
pub fn list<Id: Identifier, A: 'static>(parser: Parser<Id, A>) -> Parser<Id, Vec<A>> {
    Parser::new(move |node: &Node<Id>| {
        let id = node.identifier().cloned();
        let (children, results): (im::Vector<Node<Id>>, Vec<_>) =
            node.children().iter().map(|child| parser.run(child)).unzip();

        let mut values = Vec::with_capacity(results.len());
        let mut failure: Option<FieldError<Id>> = None;
        for result in results.into_iter().rev() {
            match result {
                Ok(value) => values.push(value),
                Err(error) => {
                    failure = Some(match failure {
                        Some(later) => combine(id.clone(), error, later),
                        None => error,
                    })
                }
            }
        }

        let result = match failure {
            Some(error) => Err(error),
            None => {
                values.reverse();
                Ok(values)
            }
        };
        (node.with_children(children), result)
    })
}

// ============================================================================
// FIELD LOOKUP
// ============================================================================

/// Runs `parser` on the first node, in pre-order, identified by `id`, and
/// grafts the node it leaves behind back into the tree.
///
/// The whole tree is validated alongside, so a required field left blank
/// anywhere fails this parser even if it is not the one being looked up.
pub fn field<Id: Identifier, A: 'static>(id: Id, parser: Parser<Id, A>) -> Parser<Id, A> {
    map2(|(), a| a, tree_validation(), field_help(id, parser))
}

fn field_help<Id: Identifier, A: 'static>(id: Id, parser: Parser<Id, A>) -> Parser<Id, A> {
    Parser::new(move |node: &Node<Id>| {
        let Some(path) = node.find_path(&id) else {
            trace!(identifier = ?id, "no field found");
            return (node.clone(), Err(FieldError::InputNotFound(id.clone())));
        };
        trace!(identifier = ?id, path = %path, "field found");
        let Some(target) = node.get(&path) else {
            return (node.clone(), Err(FieldError::InputNotFound(id.clone())));
        };
        let (rewritten, result) = parser.run(target);
        let grafted = node
            .update_at(&path, |_| rewritten)
            .unwrap_or_else(|| node.clone());
        (grafted, result)
    })
}
