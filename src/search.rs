//! An agent to play Max Connect 4

use log::{debug, trace};

use crate::{
    board::{Board, Player},
    node::Node,
    WIDTH,
};

/// Lower bound of the search window, below any reachable utility
pub const MIN_VALUE: i32 = -999_999;
/// Upper bound of the search window, above any reachable utility
pub const MAX_VALUE: i32 = 999_999;

/// An agent choosing moves for one player with a depth-limited minimax search
///
/// # Notes
/// The game tree is searched to `depth_limit` plies with alpha-beta pruning. Leaves
/// (full boards, or nodes at the depth limit) are scored with the utility heuristic,
/// always from the point of view of the agent's own player: maximizing layers model
/// the agent's moves and minimizing layers the opponent's.
///
/// Children are generated one at a time in column order, so a cutoff skips creating
/// the remaining siblings altogether. Among equally valued moves the lowest column wins.
#[derive(Clone, Debug)]
pub struct AiPlayer {
    player: Player,
    depth_limit: usize,

    /// The number of nodes searched by the last call (for diagnostics only)
    pub node_count: usize,
}

impl AiPlayer {
    /// Creates an agent playing for `player`, searching `depth_limit` plies ahead
    ///
    /// A depth limit of 0 disables the search: the agent then plays the leftmost
    /// open column.
    pub fn new(player: Player, depth_limit: usize) -> Self {
        Self {
            player,
            depth_limit,
            node_count: 0,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Returns the column to play in `board`, or `None` if the board is full
    pub fn best_move(&mut self, board: &Board) -> Option<usize> {
        self.solve(board).1
    }

    /// Returns the minimax value of `board` and the column leading to it
    pub fn solve(&mut self, board: &Board) -> (i32, Option<usize>) {
        if self.depth_limit == 0 {
            self.node_count = 0;
            let first = (0..WIDTH).find(|&column| board.playable(column));
            return (board.utility(self.player), first);
        }

        let root = self.search(board);
        let value = root.value.unwrap_or(MIN_VALUE);
        // the first child in column order holding the root value breaks ties
        let best_move = root
            .children
            .iter()
            .find(|child| child.value == Some(value))
            .and_then(|child| child.column);

        debug!(
            "player {} searched {} nodes to depth {}: value {}, best move {:?}",
            self.player, self.node_count, self.depth_limit, value, best_move
        );
        (value, best_move)
    }

    /// Runs the search from `board`, returning the evaluated root
    ///
    /// The root keeps its evaluated children (without their own subtrees) so the caller
    /// can inspect the value of every move that was searched.
    pub fn search(&mut self, board: &Board) -> Node {
        self.node_count = 0;
        let mut root = Node::root(board.clone());
        self.maximize(&mut root, MIN_VALUE, MAX_VALUE);
        root
    }

    fn is_leaf(&self, node: &Node) -> bool {
        node.board.is_full() || node.depth >= self.depth_limit
    }

    fn evaluate_leaf(&self, node: &mut Node) -> i32 {
        let value = node.board.utility(self.player);
        node.value = Some(value);
        value
    }

    fn maximize(&mut self, node: &mut Node, mut alpha: i32, beta: i32) -> i32 {
        self.node_count += 1;

        if self.is_leaf(node) {
            return self.evaluate_leaf(node);
        }

        let mut value = MIN_VALUE;
        let mut children = Vec::new();
        for mut child in node.successors() {
            value = value.max(self.minimize(&mut child, alpha, beta));
            // only the value of a child is needed once it is evaluated
            child.children = Vec::new();
            children.push(child);

            // the opponent will not allow this branch, prune the remaining moves
            if value >= beta {
                trace!(
                    "beta cutoff at depth {} after {} of the moves",
                    node.depth,
                    children.len()
                );
                break;
            }
            alpha = alpha.max(value);
        }

        node.children = children;
        node.value = Some(value);
        value
    }

    fn minimize(&mut self, node: &mut Node, alpha: i32, mut beta: i32) -> i32 {
        self.node_count += 1;

        if self.is_leaf(node) {
            return self.evaluate_leaf(node);
        }

        let mut value = MAX_VALUE;
        let mut children = Vec::new();
        for mut child in node.successors() {
            value = value.min(self.maximize(&mut child, alpha, beta));
            child.children = Vec::new();
            children.push(child);

            // a better move is already known higher up, prune the remaining moves
            if value <= alpha {
                trace!(
                    "alpha cutoff at depth {} after {} of the moves",
                    node.depth,
                    children.len()
                );
                break;
            }
            beta = beta.min(value);
        }

        node.children = children;
        node.value = Some(value);
        value
    }
}

/// Returns the column `player` should play in `board`, searching `depth_limit` plies ahead
pub fn best_move(board: &Board, player: Player, depth_limit: usize) -> Option<usize> {
    AiPlayer::new(player, depth_limit).best_move(board)
}
