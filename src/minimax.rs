use crate::{
    graph::Graph,
    node::Node,
    tracing_support::{debug, info_span, trace},
};

impl Graph {
    /// Picks the best move from `root` by minimax search with alpha-beta
    /// pruning, looking `depth` moves ahead.
    ///
    /// Moves follow directed connections only (see
    /// [`Self::forward_neighbors`]), and a position's value is its node's
    /// first payload read as an `i32`; nodes without one are not legal
    /// moves.  The opponent moves after `root`, so each candidate is scored
    /// by the minimizing player.  Ties go to the first candidate.  Returns
    /// `None` if `root` has no valued move.
    pub fn alpha_beta(&self, root: &Node, depth: usize) -> Option<Node> {
        let _span = info_span!("alpha_beta", depth).entered();
        let mut alpha = i32::MIN;
        let mut best: Option<(&Node, i32)> = None;
        for (child, value) in self.valued_moves(root) {
            let score = self.minimax(child, value, depth.saturating_sub(1), alpha, i32::MAX, false);
            trace!(node = %child.label(), score, "root move scored");
            if best.is_none_or(|(_, best_score)| best_score < score) {
                best = Some((child, score));
                alpha = alpha.max(score);
            }
        }
        if let Some((node, score)) = best {
            debug!(node = %node.label(), score, "alpha-beta choice");
        }
        best.map(|(node, _)| node.clone())
    }

    fn valued_moves<'g>(&'g self, node: &Node) -> Vec<(&'g Node, i32)> {
        self.forward_neighbors(node)
            .filter_map(|child| Some((child, child.value::<i32>().ok()?)))
            .collect()
    }

    /// Scores `node` by alpha-beta search, `depth` moves deep.  Frames live
    /// on an explicit stack, so `depth` is bounded by memory rather than by
    /// the thread stack.
    fn minimax(
        &self,
        node: &Node,
        value: i32,
        depth: usize,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> i32 {
        let Some(root) = self.open_frame(node, depth, alpha, beta, maximizing) else {
            return value;
        };
        let mut stack = vec![root];
        let mut finished: Option<i32> = None;

        while let Some(frame) = stack.last_mut() {
            if let Some(score) = finished.take() {
                if frame.absorb(score) {
                    trace!(depth = frame.depth, "cutoff");
                    frame.next = frame.moves.len();
                }
            }

            match frame.moves.get(frame.next).copied() {
                Some((child, child_value)) => {
                    frame.next += 1;
                    let (depth, alpha, beta, maximizing) =
                        (frame.depth - 1, frame.alpha, frame.beta, !frame.maximizing);
                    match self.open_frame(child, depth, alpha, beta, maximizing) {
                        Some(child_frame) => stack.push(child_frame),
                        None => finished = Some(child_value),
                    }
                }
                None => finished = stack.pop().map(|frame| frame.best),
            }
        }
        finished.unwrap_or(value)
    }

    /// Starts scoring `node`, or returns `None` when it is a leaf: out of
    /// depth or without valued moves.
    fn open_frame<'g>(
        &'g self,
        node: &Node,
        depth: usize,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> Option<Frame<'g>> {
        if depth == 0 {
            return None;
        }
        let moves = self.valued_moves(node);
        if moves.is_empty() {
            return None;
        }
        Some(Frame {
            moves,
            next: 0,
            depth,
            alpha,
            beta,
            maximizing,
            best: if maximizing { i32::MIN } else { i32::MAX },
        })
    }
}

struct Frame<'g> {
    moves: Vec<(&'g Node, i32)>,
    next: usize,
    depth: usize,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    best: i32,
}

impl Frame<'_> {
    /// Folds a child's score into this frame.  Returns true when the
    /// remaining moves can be pruned.
    fn absorb(&mut self, score: i32) -> bool {
        if self.maximizing {
            self.best = self.best.max(score);
            if self.best >= self.beta {
                return true;
            }
            self.alpha = self.alpha.max(self.best);
        } else {
            self.best = self.best.min(score);
            if self.best <= self.alpha {
                return true;
            }
            self.beta = self.beta.min(self.best);
        }
        false
    }
}
