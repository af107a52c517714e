use std::cell::RefCell;

use super::var::Var;

/// Reverse-mode tape (Wengert list).
///
/// Every node stores the local partial derivatives with respect to the nodes
/// it was computed from. Edges of node `i` live in
/// `edges[offsets[i]..offsets[i + 1]]`, so a node may have any number of
/// parents without a per-node allocation.
#[derive(Debug)]
pub struct Tape {
    graph: RefCell<Graph>,
}

#[derive(Debug)]
struct Graph {
    offsets: Vec<usize>,
    edges: Vec<(usize, f64)>,
}

impl Graph {
    fn len(&self) -> usize {
        self.offsets.len() - 1
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-size the tape for `nodes` nodes and `edges` partial derivatives.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut offsets = Vec::with_capacity(nodes + 1);
        offsets.push(0);
        Self {
            graph: RefCell::new(Graph {
                offsets,
                edges: Vec::with_capacity(edges),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.graph.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all recorded nodes, keeping the allocations.
    ///
    /// Takes `&mut self` so that no `Var` recorded on this tape can still be
    /// alive.
    pub fn clear(&mut self) {
        let graph = self.graph.get_mut();
        graph.offsets.truncate(1);
        graph.edges.clear();
    }

    /// Record an independent variable.
    pub fn var(&self, value: f64) -> Var<'_> {
        self.push(value, &[])
    }

    /// Record one independent variable per entry of `values`.
    pub fn vars(&self, values: &[f64]) -> Vec<Var<'_>> {
        values.iter().map(|&v| self.var(v)).collect()
    }

    pub(crate) fn push(&self, value: f64, partials: &[(usize, f64)]) -> Var<'_> {
        let mut graph = self.graph.borrow_mut();
        let index = graph.len();
        graph.edges.extend_from_slice(partials);
        let end = graph.edges.len();
        graph.offsets.push(end);
        Var::new(self, index, value)
    }

    /// Single node computing `sum_i coeffs[i] * vars[i]`.
    pub fn linear_combination<'t>(&'t self, vars: &[Var<'t>], coeffs: &[f64]) -> Var<'t> {
        debug_assert_eq!(vars.len(), coeffs.len());
        let mut graph = self.graph.borrow_mut();
        let index = graph.len();
        let mut value = 0.0;
        for (v, &c) in vars.iter().zip(coeffs) {
            debug_assert!(v.belongs_to(self));
            value += c * v.value();
            graph.edges.push((v.index(), c));
        }
        let end = graph.edges.len();
        graph.offsets.push(end);
        Var::new(self, index, value)
    }

    /// Single node computing `sum_i vars[i]`.
    pub fn sum<'t>(&'t self, vars: &[Var<'t>]) -> Var<'t> {
        let mut graph = self.graph.borrow_mut();
        let index = graph.len();
        let mut value = 0.0;
        for v in vars {
            debug_assert!(v.belongs_to(self));
            value += v.value();
            graph.edges.push((v.index(), 1.0));
        }
        let end = graph.edges.len();
        graph.offsets.push(end);
        Var::new(self, index, value)
    }

    /// Back-propagate from `output` and return the adjoint of every node
    /// recorded before it.
    pub fn gradient(&self, output: Var<'_>) -> Gradient {
        debug_assert!(output.belongs_to(self));
        self.gradient_of(output.index())
    }

    pub(crate) fn gradient_of(&self, output: usize) -> Gradient {
        let graph = self.graph.borrow();
        let mut adjoints = vec![0.0; output + 1];
        adjoints[output] = 1.0;
        for node in (0..=output).rev() {
            let adjoint = adjoints[node];
            if adjoint == 0.0 {
                continue;
            }
            let edges = &graph.edges[graph.offsets[node]..graph.offsets[node + 1]];
            for &(parent, partial) in edges {
                adjoints[parent] += adjoint * partial;
            }
        }
        Gradient { adjoints }
    }
}

/// Adjoints produced by [`Tape::gradient`].
#[derive(Clone, Debug)]
pub struct Gradient {
    adjoints: Vec<f64>,
}

impl Gradient {
    /// d(output)/d(var). Nodes recorded after the output have zero adjoint.
    pub fn wrt(&self, var: Var<'_>) -> f64 {
        self.adjoints.get(var.index()).copied().unwrap_or(0.0)
    }

    pub fn wrt_all(&self, vars: &[Var<'_>]) -> Vec<f64> {
        vars.iter().map(|&v| self.wrt(v)).collect()
    }

    /// Adjoints of the first `n` nodes, i.e. the leading independent
    /// variables when they were recorded first.
    pub(crate) fn leading(&self, n: usize) -> impl Iterator<Item = f64> + '_ {
        (0..n).map(|i| self.adjoints.get(i).copied().unwrap_or(0.0))
    }
}
