//! A single-source Dijkstra search in the style of
//! [pathfinding's dijkstra function](https://docs.rs/pathfinding/latest/pathfinding/directed/dijkstra/index.html).
//! Reached nodes live in an insertion-ordered map together with the index of their parent and
//! their best known cost, so a path is rebuilt from a single predecessor per node. The queue
//! uses lazy deletion: improved nodes are pushed again and outdated entries are skipped when
//! popped.
use indexmap::map::Entry::{Occupied, Vacant};
use log::{debug, trace};
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use crate::graph::FxIndexMap;

/// Parent index of the search source.
pub const NO_PARENT: usize = usize::MAX;

/// When a search stops after the goal has been seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Termination {
    /// Stop when the goal is popped from the queue. The reported cost is optimal.
    #[default]
    OnSettle,
    /// Stop on the first relaxation that lowers the cost of the goal. This is cheaper but with
    /// mixed edge weights the reported cost can exceed the optimum.
    OnRelax,
}

/// Lifecycle of a search. A [SearchContext] is [Idle](SearchState::Idle) until run, and the
/// resulting [ShortestPathTree] is either [Found](SearchState::Found) or
/// [Exhausted](SearchState::Exhausted).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    /// Held only while [SearchContext::run] executes. It consumes the context, so callers see
    /// it in trace logs but never through [ShortestPathTree::state].
    Running,
    Found,
    Exhausted,
}

/// Counters collected while searching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub pushed: usize,
    pub popped: usize,
    pub stale: usize,
}

struct SmallestCostHolder<K> {
    cost: K,
    sequence: usize,
    index: usize,
}

impl<K: PartialOrd> Eq for SmallestCostHolder<K> {}

impl<K: PartialOrd> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; equal costs pop in insertion order
        match other.cost.partial_cmp(&self.cost) {
            Some(Ordering::Equal) | None => other.sequence.cmp(&self.sequence),
            Some(s) => s,
        }
    }
}

/// Queue and parent map for one search. Running it consumes the context.
pub struct SearchContext<N, C> {
    to_see: BinaryHeap<SmallestCostHolder<C>>,
    parents: FxIndexMap<N, (usize, C)>,
    termination: Termination,
    state: SearchState,
    stats: SearchStats,
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Copy,
{
    pub fn new(termination: Termination) -> SearchContext<N, C> {
        SearchContext {
            to_see: BinaryHeap::new(),
            parents: FxIndexMap::default(),
            termination,
            state: SearchState::Idle,
            stats: SearchStats::default(),
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    fn push(&mut self, cost: C, index: usize) {
        self.to_see.push(SmallestCostHolder {
            cost,
            sequence: self.stats.pushed,
            index,
        });
        self.stats.pushed += 1;
    }

    fn finish(mut self, goal: Option<(usize, C)>) -> ShortestPathTree<N, C> {
        self.state = if goal.is_some() {
            SearchState::Found
        } else {
            SearchState::Exhausted
        };
        debug!(
            "Search {:?} after {} pushes, {} pops ({} stale), {} nodes reached",
            self.state,
            self.stats.pushed,
            self.stats.popped,
            self.stats.stale,
            self.parents.len()
        );
        ShortestPathTree {
            parents: self.parents,
            state: self.state,
            goal,
            stats: self.stats,
        }
    }

    /// Runs Dijkstra from `start` until `success` accepts a node (according to the
    /// [Termination] policy) or every reachable node has been settled. `successors` yields
    /// `(node, move_cost)` pairs in the order they should be relaxed; move costs must not be
    /// negative. Relaxation is strict, so the first parent found at the minimal cost is kept.
    pub fn run<FN, IN, FS>(
        mut self,
        start: &N,
        mut successors: FN,
        mut success: FS,
    ) -> ShortestPathTree<N, C>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FS: FnMut(&N) -> bool,
    {
        self.state = SearchState::Running;
        trace!("Search {:?} with {:?} termination", self.state, self.termination);
        self.parents.insert(start.clone(), (NO_PARENT, C::zero()));
        if success(start) {
            return self.finish(Some((0, C::zero())));
        }
        self.push(C::zero(), 0);
        while let Some(SmallestCostHolder { cost, index, .. }) = self.to_see.pop() {
            self.stats.popped += 1;
            let successors = {
                let Some((node, &(_, c))) = self.parents.get_index(index) else {
                    continue;
                };
                // A node may sit in the heap several times if a better way to reach it was
                // found later. Only the entry matching its best cost is expanded.
                if cost > c {
                    self.stats.stale += 1;
                    continue;
                }
                if self.termination == Termination::OnSettle && success(node) {
                    return self.finish(Some((index, cost)));
                }
                successors(node)
            };
            for (successor, move_cost) in successors {
                assert!(
                    !(move_cost < C::zero()),
                    "negative edge weight in Dijkstra search"
                );
                let new_cost = cost + move_cost;
                let n = match self.parents.entry(successor) {
                    Vacant(e) => {
                        let n = e.index();
                        e.insert((index, new_cost));
                        n
                    }
                    Occupied(mut e) => {
                        if new_cost < e.get().1 {
                            e.insert((index, new_cost));
                            e.index()
                        } else {
                            continue;
                        }
                    }
                };
                self.push(new_cost, n);
                if self.termination == Termination::OnRelax
                    && self
                        .parents
                        .get_index(n)
                        .is_some_and(|(node, _)| success(node))
                {
                    return self.finish(Some((n, new_cost)));
                }
            }
        }
        self.finish(None)
    }
}

/// The outcome of a search: every reached node with its parent and best known cost. Nodes that
/// were never reached are absent, which stands for an infinite distance.
#[derive(Clone, Debug)]
pub struct ShortestPathTree<N, C> {
    parents: FxIndexMap<N, (usize, C)>,
    state: SearchState,
    goal: Option<(usize, C)>,
    stats: SearchStats,
}

impl<N, C> ShortestPathTree<N, C>
where
    N: Eq + Hash + Clone,
    C: Copy,
{
    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn found(&self) -> bool {
        self.state == SearchState::Found
    }

    /// The accepted goal and its cost.
    pub fn goal(&self) -> Option<(&N, C)> {
        let (index, cost) = self.goal?;
        self.parents.get_index(index).map(|(node, _)| (node, cost))
    }

    /// Best known cost of `node`, [None] if it was never reached.
    pub fn distance(&self, node: &N) -> Option<C> {
        self.parents.get(node).map(|&(_, c)| c)
    }

    /// Parent of `node` on its best known path. The source has none.
    pub fn predecessor(&self, node: &N) -> Option<&N> {
        let &(parent, _) = self.parents.get(node)?;
        self.parents.get_index(parent).map(|(p, _)| p)
    }

    pub fn contains(&self, node: &N) -> bool {
        self.parents.contains_key(node)
    }

    /// Reached nodes with their best known cost, in order of first discovery.
    pub fn iter(&self) -> impl Iterator<Item = (&N, C)> {
        self.parents.iter().map(|(node, &(_, c))| (node, c))
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn graph(edges: &[(char, char, i32)]) -> HashMap<char, Vec<(char, i32)>> {
        let mut graph: HashMap<char, Vec<(char, i32)>> = HashMap::new();
        for &(from, to, cost) in edges {
            graph.entry(from).or_default().push((to, cost));
        }
        graph
    }

    fn search(
        graph: &HashMap<char, Vec<(char, i32)>>,
        start: char,
        goal: char,
        termination: Termination,
    ) -> ShortestPathTree<char, i32> {
        SearchContext::new(termination).run(
            &start,
            |node| graph.get(node).cloned().unwrap_or_default(),
            |node| *node == goal,
        )
    }

    #[test]
    fn context_starts_idle() {
        let context: SearchContext<char, i32> = SearchContext::new(Termination::OnSettle);
        assert_eq!(context.state(), SearchState::Idle);
    }

    #[test]
    fn runs_end_in_a_terminal_state() {
        let g = graph(&[('a', 'b', 1), ('b', 'c', 1)]);
        for (goal, state) in [('c', SearchState::Found), ('z', SearchState::Exhausted)] {
            for termination in [Termination::OnSettle, Termination::OnRelax] {
                assert_eq!(search(&g, 'a', goal, termination).state(), state);
            }
        }
        assert_eq!(search(&g, 'a', 'a', Termination::OnSettle).state(), SearchState::Found);
    }

    #[test]
    fn finds_cheapest_route() {
        let g = graph(&[('a', 'b', 4), ('a', 'c', 1), ('c', 'b', 2), ('b', 'd', 1)]);
        let tree = search(&g, 'a', 'd', Termination::OnSettle);
        assert_eq!(tree.state(), SearchState::Found);
        assert_eq!(tree.goal(), Some((&'d', 4)));
        assert_eq!(tree.predecessor(&'d'), Some(&'b'));
        assert_eq!(tree.predecessor(&'b'), Some(&'c'));
        assert_eq!(tree.predecessor(&'c'), Some(&'a'));
        assert_eq!(tree.predecessor(&'a'), None);
    }

    /// With equal costs the first discovered parent is kept.
    #[test]
    fn first_predecessor_wins_ties() {
        let g = graph(&[('s', 'x', 1), ('s', 'y', 1), ('x', 't', 1), ('y', 't', 1)]);
        let tree = search(&g, 's', 't', Termination::OnSettle);
        assert_eq!(tree.goal(), Some((&'t', 2)));
        assert_eq!(tree.predecessor(&'t'), Some(&'x'));
    }

    #[test]
    fn improved_nodes_leave_stale_entries() {
        let g = graph(&[('a', 'b', 5), ('a', 'c', 1), ('c', 'b', 1), ('b', 'z', 10)]);
        let tree = search(&g, 'a', 'q', Termination::OnSettle);
        assert_eq!(tree.state(), SearchState::Exhausted);
        assert_eq!(tree.distance(&'b'), Some(2));
        assert_eq!(tree.stats().stale, 1);
        assert_eq!(tree.distance(&'q'), None);
        assert_eq!(tree.goal(), None);
    }

    /// Stopping on the first relaxation of the goal can report a longer route, stopping on
    /// settling cannot.
    #[test]
    fn termination_policies() {
        let g = graph(&[('s', 'u', 1), ('s', 'v', 2), ('u', 't', 5), ('v', 't', 1)]);
        let settle = search(&g, 's', 't', Termination::OnSettle);
        assert_eq!(settle.goal(), Some((&'t', 3)));
        assert_eq!(settle.predecessor(&'t'), Some(&'v'));
        let relax = search(&g, 's', 't', Termination::OnRelax);
        assert_eq!(relax.goal(), Some((&'t', 6)));
        assert_eq!(relax.predecessor(&'t'), Some(&'u'));
    }

    #[test]
    fn start_is_goal() {
        let g = graph(&[('a', 'b', 1)]);
        for termination in [Termination::OnSettle, Termination::OnRelax] {
            let tree = search(&g, 'a', 'a', termination);
            assert_eq!(tree.goal(), Some((&'a', 0)));
            assert_eq!(tree.len(), 1);
        }
    }

    #[test]
    fn zero_cost_cycles_terminate() {
        let g = graph(&[('a', 'b', 0), ('b', 'a', 0), ('b', 'c', 3)]);
        let tree = search(&g, 'a', 'c', Termination::OnSettle);
        assert_eq!(tree.goal(), Some((&'c', 3)));
        assert_eq!(tree.predecessor(&'a'), None);
    }

    #[test]
    fn float_costs_are_supported() {
        let tree = SearchContext::new(Termination::OnSettle).run(
            &0u8,
            |&node| match node {
                0 => vec![(1, 1.5), (2, 0.5)],
                2 => vec![(1, 0.5)],
                _ => vec![],
            },
            |&node| node == 1,
        );
        assert_eq!(tree.goal(), Some((&1, 1.0)));
    }

    #[test]
    #[should_panic(expected = "negative edge weight")]
    fn negative_weights_abort() {
        let g = graph(&[('a', 'b', -1)]);
        search(&g, 'a', 'b', Termination::OnSettle);
    }
}
