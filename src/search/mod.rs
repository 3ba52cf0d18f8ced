//! The generalized best-first search kernel.
//!
//! [PathFinder] is Dijkstra's algorithm with the notion of "cost" left to strategy objects:
//! the [EdgeRelaxer] decides what a node's best value is (a single best edge, several
//! non-dominated edges, ...), the [EdgeComparator] orders the frontier, and the
//! [AdjacencyMap] generates the implicit graph on demand. Every strategy trait is also
//! implemented for the matching closure type.
mod frontier;

pub mod conditions;

use std::cmp::Ordering;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use log::{debug, error, warn};

use crate::error::{PathFinderError, Result};
use crate::FxIndexMap;
use frontier::Frontier;

pub use conditions::{DestinationReached, EdgeCountStop, TimeoutStop};

/// Maps an edge (a path so far) to the node it ends in.
pub trait EdgeDestination<N, E> {
    fn destination(&self, edge: &E) -> N;
}

impl<N, E, F> EdgeDestination<N, E> for F
where
    F: Fn(&E) -> N,
{
    fn destination(&self, edge: &E) -> N {
        self(edge)
    }
}

/// Total order over edges; the frontier pops the smallest edge first.
pub trait EdgeComparator<E> {
    fn compare(&self, a: &E, b: &E) -> Ordering;
}

impl<E, F> EdgeComparator<E> for F
where
    F: Fn(&E, &E) -> Ordering,
{
    fn compare(&self, a: &E, b: &E) -> Ordering {
        self(a, b)
    }
}

/// Decides whether `candidate` improves the value currently stored for its node. Returns the
/// new value to store, or [None] when the candidate is no improvement and must be dropped.
pub trait EdgeRelaxer<C, E> {
    fn relax(&self, current: Option<&C>, candidate: &E, comparator: &dyn EdgeComparator<E>)
        -> Option<C>;
}

impl<C, E, F> EdgeRelaxer<C, E> for F
where
    F: Fn(Option<&C>, &E, &dyn EdgeComparator<E>) -> Option<C>,
{
    fn relax(
        &self,
        current: Option<&C>,
        candidate: &E,
        comparator: &dyn EdgeComparator<E>,
    ) -> Option<C> {
        self(current, candidate, comparator)
    }
}

/// Generates the edges that extend `edge` by one step.
pub trait AdjacencyMap<E> {
    fn adjacent(&mut self, edge: &E) -> Vec<E>;
}

impl<E, F> AdjacencyMap<E> for F
where
    F: FnMut(&E) -> Vec<E>,
{
    fn adjacent(&mut self, edge: &E) -> Vec<E> {
        self(edge)
    }
}

/// Prunes candidate edges before they reach the frontier.
pub trait EdgeFilter<E> {
    fn should_stay(&self, edge: &E) -> bool;

    fn filter(&self, mut edges: Vec<E>) -> Vec<E> {
        edges.retain(|e| self.should_stay(e));
        edges
    }
}

impl<E, F> EdgeFilter<E> for F
where
    F: Fn(&E) -> bool,
{
    fn should_stay(&self, edge: &E) -> bool {
        self(edge)
    }
}

/// Checked against every settled edge; the search halts as soon as one condition holds.
pub trait StopCondition<E> {
    fn should_stop(&mut self, edge: &E) -> bool;

    /// Called when a run starts.
    fn reset(&mut self) {}
}

impl<E, F> StopCondition<E> for F
where
    F: FnMut(&E) -> bool,
{
    fn should_stop(&mut self, edge: &E) -> bool {
        self(edge)
    }
}

/// How a run ended. Whatever was computed before the end stays readable in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchOutcome {
    /// The frontier ran dry.
    Exhausted,
    /// A stop condition fired.
    Stopped,
    /// The frontier outgrew its configured limit.
    FrontierLimit,
    /// A strategy panicked.
    Aborted,
}

impl SearchOutcome {
    pub fn halted_early(self) -> bool {
        matches!(self, SearchOutcome::FrontierLimit | SearchOutcome::Aborted)
    }
}

pub struct PathFinder<'a, N, C, E> {
    destination: Box<dyn EdgeDestination<N, E> + 'a>,
    relaxer: Box<dyn EdgeRelaxer<C, E> + 'a>,
    adjacency: Box<dyn AdjacencyMap<E> + 'a>,
    comparator: Rc<dyn EdgeComparator<E> + 'a>,
    filters: Vec<Box<dyn EdgeFilter<E> + 'a>>,
    stop_conditions: Vec<Box<dyn StopCondition<E> + 'a>>,
    max_frontier_size: Option<usize>,
    frontier: Frontier<'a, E>,
    costs: FxIndexMap<N, C>,
    settled: usize,
}

impl<'a, N, C, E> PathFinder<'a, N, C, E>
where
    N: Eq + Hash + Clone,
{
    pub fn new(
        destination: impl EdgeDestination<N, E> + 'a,
        relaxer: impl EdgeRelaxer<C, E> + 'a,
        adjacency: impl AdjacencyMap<E> + 'a,
        comparator: impl EdgeComparator<E> + 'a,
    ) -> PathFinder<'a, N, C, E> {
        let comparator: Rc<dyn EdgeComparator<E> + 'a> = Rc::new(comparator);
        PathFinder {
            destination: Box::new(destination),
            relaxer: Box::new(relaxer),
            adjacency: Box::new(adjacency),
            frontier: Frontier::new(Rc::clone(&comparator)),
            comparator,
            filters: Vec::new(),
            stop_conditions: Vec::new(),
            max_frontier_size: None,
            costs: FxIndexMap::default(),
            settled: 0,
        }
    }

    pub fn builder() -> PathFinderBuilder<'a, N, C, E> {
        PathFinderBuilder::default()
    }

    pub fn add_filter(&mut self, filter: impl EdgeFilter<E> + 'a) {
        self.filters.push(Box::new(filter));
    }

    pub fn add_stop_condition(&mut self, condition: impl StopCondition<E> + 'a) {
        self.stop_conditions.push(Box::new(condition));
    }

    /// Halts a run with [SearchOutcome::FrontierLimit] once more edges than this are queued.
    pub fn set_max_frontier_size(&mut self, limit: Option<usize>) {
        self.max_frontier_size = limit;
    }

    /// Whether `edge` would survive every filter.
    pub fn passes_filters(&self, edge: &E) -> bool {
        self.filters.iter().all(|f| f.should_stay(edge))
    }

    pub fn comparator(&self) -> &dyn EdgeComparator<E> {
        &*self.comparator
    }

    /// Best value found so far for `node`, [None] if it was never reached.
    pub fn cost_of(&self, node: &N) -> Option<&C> {
        self.costs.get(node)
    }

    /// All reached nodes with their values, in the order they were first reached.
    pub fn costs(&self) -> &FxIndexMap<N, C> {
        &self.costs
    }

    /// Edges popped from the frontier during the last run.
    pub fn settled_count(&self) -> usize {
        self.settled
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Searches from `starting_edges`, discarding the results of any previous run. Never
    /// fails; inspect the returned outcome and the cost map afterwards.
    pub fn run<I>(&mut self, starting_edges: I) -> SearchOutcome
    where
        I: IntoIterator<Item = E>,
    {
        self.frontier.clear();
        self.costs.clear();
        self.settled = 0;
        for condition in self.stop_conditions.iter_mut() {
            condition.reset();
        }
        for edge in starting_edges {
            self.frontier.push(edge);
        }
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| self.search())) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_default();
                error!(
                    "Search aborted after {} settled edges: {}",
                    self.settled, message
                );
                SearchOutcome::Aborted
            }
        };
        debug!(
            "Search finished ({:?}): {} settled edges, {} nodes reached",
            outcome,
            self.settled,
            self.costs.len()
        );
        outcome
    }

    fn search(&mut self) -> SearchOutcome {
        while let Some(edge) = self.frontier.pop() {
            self.settled += 1;
            let node = self.destination.destination(&edge);
            let relaxed = self
                .relaxer
                .relax(self.costs.get(&node), &edge, &*self.comparator);
            if let Some(cost) = relaxed {
                self.costs.insert(node, cost);
                let mut neighbours = self.adjacency.adjacent(&edge);
                for filter in self.filters.iter() {
                    neighbours = filter.filter(neighbours);
                }
                for neighbour in neighbours {
                    self.frontier.push(neighbour);
                }
                if let Some(limit) = self.max_frontier_size {
                    if self.frontier.len() > limit {
                        warn!(
                            "Frontier grew to {} edges (limit {}), keeping partial results",
                            self.frontier.len(),
                            limit
                        );
                        return SearchOutcome::FrontierLimit;
                    }
                }
            }
            if self
                .stop_conditions
                .iter_mut()
                .any(|condition| condition.should_stop(&edge))
            {
                return SearchOutcome::Stopped;
            }
        }
        SearchOutcome::Exhausted
    }
}

/// Assembles a [PathFinder], rejecting incomplete strategy sets.
pub struct PathFinderBuilder<'a, N, C, E> {
    destination: Option<Box<dyn EdgeDestination<N, E> + 'a>>,
    relaxer: Option<Box<dyn EdgeRelaxer<C, E> + 'a>>,
    adjacency: Option<Box<dyn AdjacencyMap<E> + 'a>>,
    comparator: Option<Rc<dyn EdgeComparator<E> + 'a>>,
    filters: Vec<Box<dyn EdgeFilter<E> + 'a>>,
    stop_conditions: Vec<Box<dyn StopCondition<E> + 'a>>,
    max_frontier_size: Option<usize>,
}

impl<'a, N, C, E> Default for PathFinderBuilder<'a, N, C, E> {
    fn default() -> Self {
        PathFinderBuilder {
            destination: None,
            relaxer: None,
            adjacency: None,
            comparator: None,
            filters: Vec::new(),
            stop_conditions: Vec::new(),
            max_frontier_size: None,
        }
    }
}

impl<'a, N, C, E> PathFinderBuilder<'a, N, C, E>
where
    N: Eq + Hash + Clone,
{
    pub fn destination(mut self, destination: impl EdgeDestination<N, E> + 'a) -> Self {
        self.destination = Some(Box::new(destination));
        self
    }
    pub fn relaxer(mut self, relaxer: impl EdgeRelaxer<C, E> + 'a) -> Self {
        self.relaxer = Some(Box::new(relaxer));
        self
    }
    pub fn adjacency(mut self, adjacency: impl AdjacencyMap<E> + 'a) -> Self {
        self.adjacency = Some(Box::new(adjacency));
        self
    }
    pub fn comparator(mut self, comparator: impl EdgeComparator<E> + 'a) -> Self {
        self.comparator = Some(Rc::new(comparator));
        self
    }
    pub fn filter(mut self, filter: impl EdgeFilter<E> + 'a) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
    pub fn stop_condition(mut self, condition: impl StopCondition<E> + 'a) -> Self {
        self.stop_conditions.push(Box::new(condition));
        self
    }
    pub fn max_frontier_size(mut self, limit: usize) -> Self {
        self.max_frontier_size = Some(limit);
        self
    }

    pub fn build(self) -> Result<PathFinder<'a, N, C, E>> {
        let destination = self
            .destination
            .ok_or(PathFinderError::MissingStrategy("destination"))?;
        let relaxer = self
            .relaxer
            .ok_or(PathFinderError::MissingStrategy("relaxer"))?;
        let adjacency = self
            .adjacency
            .ok_or(PathFinderError::MissingStrategy("adjacency"))?;
        let comparator = self
            .comparator
            .ok_or(PathFinderError::MissingStrategy("comparator"))?;
        Ok(PathFinder {
            destination,
            relaxer,
            adjacency,
            frontier: Frontier::new(Rc::clone(&comparator)),
            comparator,
            filters: self.filters,
            stop_conditions: self.stop_conditions,
            max_frontier_size: self.max_frontier_size,
            costs: FxIndexMap::default(),
            settled: 0,
        })
    }
}

/// Keeps the candidate only if it is strictly better than the stored edge.
pub fn scalar_relax<E: Clone>(
    current: Option<&E>,
    candidate: &E,
    comparator: &dyn EdgeComparator<E>,
) -> Option<E> {
    match current {
        Some(best) if comparator.compare(candidate, best) != Ordering::Less => None,
        _ => Some(candidate.clone()),
    }
}
