use crate::arena::Handle;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Black => "BLACK",
        }
    }
}

/// A struct representing an internal node of a red black tree.
#[derive(Serialize, Deserialize)]
pub struct Node<T> {
    pub value: T,
    pub color: Color,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl<T> Node<T> {
    pub fn new(value: T, parent: Option<Handle>) -> Self {
        Node {
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_color_tokens() {
        assert_tokens(
            &Color::Red,
            &[Token::UnitVariant { name: "Color", variant: "Red" }],
        );
        assert_tokens(
            &Color::Black,
            &[Token::UnitVariant { name: "Color", variant: "Black" }],
        );
    }
}
