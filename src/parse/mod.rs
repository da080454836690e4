//! Parser combinators over the field tree.
//!
//! A [`Parser`] is a function from a node to a (possibly rewritten) node and a
//! result. Parsers thread the node through each other left to right, so a
//! parser that reformats a value hands the reformatted tree to the next one.
//!
//! Unlike short-circuiting decoders, applicative combination ([`map2`] and
//! everything built on it) runs both sides and merges both failures with
//! [`combine`](crate::errors::combine). Monadic chaining
//! ([`Parser::and_then`], [`Parser::and_update`]) stops at the first failure.
//!
//! ```rust
//! use formtree::parse::{self, field, int, map2};
//! use formtree::tree::{attr, builder::{group, int as int_field}};
//!
//! let form = group([], [
//!     int_field([attr::identifier("a"), attr::value(2)]),
//!     int_field([attr::identifier("b"), attr::value(3)]),
//! ]);
//! let sum = map2(|a, b| a + b, field("a", int()), field("b", int()));
//! assert_eq!(parse::parse(&sum, &form), Ok(5));
//! ```

use std::rc::Rc;

use crate::{
    errors::FieldError,
    tree::{Identifier, Node},
    update::{self, Msg},
};

pub mod combinators;
pub mod primitives;

pub use combinators::{field, list, map2, map3, map4, map5, map6, map7, map8, one_of};
pub use primitives::{
    bool, datetime, email, fail, float, formatted_string, int, json, maybe, posix, string,
    string_lenient, succeed, tree_validation, url, value,
};

/// What running a parser produces: the node it leaves behind and its result.
pub type Outcome<Id, A> = (Node<Id>, Result<A, FieldError<Id>>);

// ============================================================================
// PARSER
// ============================================================================

pub struct Parser<Id: Identifier, A> {
    run: Rc<dyn Fn(&Node<Id>) -> Outcome<Id, A>>,
}

impl<Id: Identifier, A> Clone for Parser<Id, A> {
    fn clone(&self) -> Self {
        Self {
            run: Rc::clone(&self.run),
        }
    }
}

impl<Id: Identifier, A: 'static> Parser<Id, A> {
    pub fn new(run: impl Fn(&Node<Id>) -> Outcome<Id, A> + 'static) -> Self {
        Self { run: Rc::new(run) }
    }

    /// Runs the parser against `node` without validating anything first.
    pub fn run(&self, node: &Node<Id>) -> Outcome<Id, A> {
        (self.run)(node)
    }

    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + 'static) -> Parser<Id, B> {
        Parser::new(move |node| {
            let (node, result) = self.run(node);
            (node, result.map(&f))
        })
    }

    /// Applies a parser of functions to this parser's value. Both run; when
    /// both fail their errors are merged, the function side first.
    pub fn and_map<B: 'static, F>(self, functions: Parser<Id, F>) -> Parser<Id, B>
    where
        F: Fn(A) -> B + 'static,
    {
        map2(|f: F, a| f(a), functions, self)
    }

    /// Runs the parser `f` builds from this parser's value against the node
    /// this parser left behind. Stops at the first failure.
    pub fn and_then<B: 'static>(self, f: impl Fn(A) -> Parser<Id, B> + 'static) -> Parser<Id, B> {
        Parser::new(move |node| match self.run(node) {
            (node, Ok(a)) => f(a).run(&node),
            (node, Err(error)) => (node, Err(error)),
        })
    }

    /// Like [`and_then`](Self::and_then), but `f` also sees the node this
    /// parser produced and returns a replacement node to continue on. This is
    /// how a parse can toggle visibility or fill in derived fields before
    /// parsing them.
    pub fn and_update<B: 'static>(
        self,
        f: impl Fn(&Node<Id>, A) -> (Node<Id>, Parser<Id, B>) + 'static,
    ) -> Parser<Id, B> {
        Parser::new(move |node| match self.run(node) {
            (node, Ok(a)) => {
                let (node, next) = f(&node, a);
                next.run(&node)
            }
            (node, Err(error)) => (node, Err(error)),
        })
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Validates the whole tree, then runs the parser. Validation failures
/// anywhere in the tree are merged into the result, even when the parser only
/// looks at one field.
fn validated<Id: Identifier, A: 'static>(parser: &Parser<Id, A>) -> Parser<Id, A> {
    map2(|(), a| a, tree_validation(), parser.clone())
}

pub fn parse<Id: Identifier, A: 'static>(
    parser: &Parser<Id, A>,
    tree: &Node<Id>,
) -> Result<A, FieldError<Id>> {
    validated(parser).run(tree).1
}

/// Applies `msg` to the tree, then parses the updated tree.
pub fn parse_update<Id: Identifier, A: 'static>(
    parser: &Parser<Id, A>,
    msg: Msg<Id>,
    tree: &Node<Id>,
) -> Outcome<Id, A> {
    let tree = update::update(msg, tree);
    validated(parser).run(&tree)
}

/// Parses, then marks every node touched so all errors become visible. Used
/// for submit actions.
pub fn parse_validate<Id: Identifier, A: 'static>(
    parser: &Parser<Id, A>,
    tree: &Node<Id>,
) -> Outcome<Id, A> {
    let (tree, result) = validated(parser).run(tree);
    (tree.touch_all().validate(), result)
}
