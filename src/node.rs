//! Nodes of the game tree explored by [`AiPlayer`](crate::search::AiPlayer)

use crate::{board::Board, WIDTH};

/// A position in the search tree, owning its board
#[derive(Clone, Debug)]
pub struct Node {
    pub board: Board,
    /// Plies from the root of the search
    pub depth: usize,
    /// The column played to reach this node, `None` at the root
    pub column: Option<usize>,
    /// The minimax value, once evaluated
    pub value: Option<i32>,
    /// Children in the order they were searched; pruned siblings are never created
    pub children: Vec<Node>,
}

impl Node {
    /// Creates the root of a search
    pub fn root(board: Board) -> Self {
        Self {
            board,
            depth: 0,
            column: None,
            value: None,
            children: Vec::new(),
        }
    }

    /// Lazily generates the positions one move away, trying columns from left to right
    pub fn successors(&self) -> Successors<'_> {
        Successors::new(&self.board, self.depth + 1)
    }
}

/// Iterator over the children of a [`Node`], see [`Node::successors`]
pub struct Successors<'a> {
    board: &'a Board,
    depth: usize,
    next_column: usize,
}

impl<'a> Successors<'a> {
    /// Generates the children of `board`, tagging them with `depth`
    pub fn new(board: &'a Board, depth: usize) -> Self {
        Self {
            board,
            depth,
            next_column: 0,
        }
    }
}

impl Iterator for Successors<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_column < WIDTH {
            let column = self.next_column;
            self.next_column += 1;

            if self.board.playable(column) {
                let mut board = self.board.clone();
                board.play(column);
                return Some(Node {
                    board,
                    depth: self.depth,
                    column: Some(column),
                    value: None,
                    children: Vec::new(),
                });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(WIDTH - self.next_column))
    }
}
