//! Dependency graph analysis.
//!
//! Nodes are batch positions; an edge `a -> b` means "a depends on b", so `b`
//! blocks `a`. The graph is an arena of adjacency lists keyed by task id and is
//! rebuilt for every call.
//!
//! Analysis does two things:
//! 1. Groups tasks into strongly connected components with an iterative Tarjan
//!    DFS. A component with more than one task, or a task depending on itself,
//!    is a cycle.
//! 2. Counts, for every task, the distinct tasks that depend on it directly or
//!    transitively, following edges in reverse. Edges between two tasks of the
//!    same component are cycle edges and are never followed.
//!
//! Both passes use explicit stacks so long chains cannot overflow the call stack.


use crate::task::{NormalizedTask, TaskId};

/// Component id of every task, plus the components that form cycles.
struct Components {
    component: Vec<usize>,
    cycles: Vec<Vec<TaskId>>,
}

/// Directed dependency graph over one batch.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// `depends_on[a]` holds every `b` with an edge `a -> b`, ascending.
    depends_on: Vec<Vec<TaskId>>,
    /// Reverse adjacency: `dependents[b]` holds every `a` with `a -> b`.
    dependents: Vec<Vec<TaskId>>,
}

/// Result of analyzing a [`DependencyGraph`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphAnalysis {
    /// Members of each cycle, ascending; cycles ordered by their lowest id.
    pub cycles: Vec<Vec<TaskId>>,
    /// Number of distinct tasks blocked by each task, indexed by id.
    pub blocked_counts: Vec<usize>,
}

impl GraphAnalysis {
    pub fn blocked_count(&self, id: TaskId) -> usize {
        self.blocked_counts.get(id).copied().unwrap_or(0)
    }

    /// Members of the cycle containing `id` (including `id`), ascending.
    /// Empty when the task is on no cycle.
    pub fn cycle_peers(&self, id: TaskId) -> Vec<TaskId> {
        self.cycles
            .iter()
            .find(|cycle| cycle.binary_search(&id).is_ok())
            .cloned()
            .unwrap_or_default()
    }
}

impl DependencyGraph {
    /// Build the graph from normalized tasks. Dependencies are already
    /// restricted to in-batch ids by the normalizer.
    pub fn build(tasks: &[NormalizedTask]) -> Self {
        let n = tasks.len();
        let mut depends_on = vec![Vec::new(); n];
        let mut dependents = vec![Vec::new(); n];

        for task in tasks {
            for &dep in &task.dependencies {
                if dep < n {
                    depends_on[task.id].push(dep);
                    dependents[dep].push(task.id);
                }
            }
        }
        for list in depends_on.iter_mut().chain(dependents.iter_mut()) {
            list.sort_unstable();
            list.dedup();
        }

        Self {
            depends_on,
            dependents,
        }
    }

    pub fn len(&self) -> usize {
        self.depends_on.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depends_on.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.depends_on.iter().map(Vec::len).sum()
    }

    /// Run cycle detection, then blocking counts on the cycle-free remainder.
    pub fn analyze(&self) -> GraphAnalysis {
        let Components { component, cycles } = self.components();
        let blocked_counts = self.blocked_counts(&component);

        tracing::debug!(
            nodes = self.len(),
            edges = self.edge_count(),
            cycles = cycles.len(),
            "dependency graph analyzed"
        );

        GraphAnalysis {
            cycles,
            blocked_counts,
        }
    }

    /// Iterative Tarjan over every node.
    fn components(&self) -> Components {
        let n = self.len();
        // discovery index; None while unvisited
        let mut index: Vec<Option<usize>> = vec![None; n];
        let mut lowlink = vec![0usize; n];
        let mut on_stack = vec![false; n];
        let mut pending: Vec<TaskId> = Vec::new();
        let mut component = vec![0usize; n];
        let mut component_count = 0;
        let mut cycles = Vec::new();
        let mut next_index = 0;

        for root in 0..n {
            if index[root].is_some() {
                continue;
            }
            index[root] = Some(next_index);
            lowlink[root] = next_index;
            next_index += 1;
            pending.push(root);
            on_stack[root] = true;
            // (node, index of the next dependency to explore)
            let mut stack: Vec<(TaskId, usize)> = vec![(root, 0)];

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                if let Some(&dep) = self.depends_on[node].get(frame.1) {
                    frame.1 += 1;
                    match index[dep] {
                        None => {
                            index[dep] = Some(next_index);
                            lowlink[dep] = next_index;
                            next_index += 1;
                            pending.push(dep);
                            on_stack[dep] = true;
                            stack.push((dep, 0));
                        }
                        Some(dep_index) if on_stack[dep] => {
                            lowlink[node] = lowlink[node].min(dep_index);
                        }
                        Some(_) => {}
                    }
                    continue;
                }

                stack.pop();
                if let Some(&(parent, _)) = stack.last() {
                    lowlink[parent] = lowlink[parent].min(lowlink[node]);
                }
                if Some(lowlink[node]) != index[node] {
                    continue;
                }

                // node is the root of a component: everything above it on `pending`
                let mut members = Vec::new();
                while let Some(member) = pending.pop() {
                    on_stack[member] = false;
                    component[member] = component_count;
                    members.push(member);
                    if member == node {
                        break;
                    }
                }
                component_count += 1;

                let self_loop = self.depends_on[node].binary_search(&node).is_ok();
                if members.len() > 1 || self_loop {
                    members.sort_unstable();
                    cycles.push(members);
                }
            }
        }

        cycles.sort_unstable_by_key(|members: &Vec<TaskId>| members[0]);
        Components { component, cycles }
    }

    /// Reverse reachability per task, never following an edge inside a component.
    fn blocked_counts(&self, component: &[usize]) -> Vec<usize> {
        let n = self.len();
        // seen[v] == target + 1 marks v as visited during target's pass
        let mut seen = vec![0usize; n];
        let mut stack = Vec::new();

        (0..n)
            .map(|target| {
                let stamp = target + 1;
                seen[target] = stamp;
                stack.clear();
                stack.push(target);
                let mut count = 0;

                while let Some(node) = stack.pop() {
                    for &dependent in &self.dependents[node] {
                        if seen[dependent] == stamp || component[dependent] == component[node] {
                            continue;
                        }
                        seen[dependent] = stamp;
                        count += 1;
                        stack.push(dependent);
                    }
                }
                count
            })
            .collect()
    }
}
