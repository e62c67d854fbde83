//! # Proofs
//!
//! A proof is a graph over places, extracted from the tokens of a
//! successful search. Its root is `{formula}`; each edge is one inference
//! step read bottom-up, from a conclusion to one of its premises. Leaves
//! are identity axioms.
//!
//! The graph can share nodes, and it may contain cycles: extraction only
//! refuses to insert an edge twice.

use crate::{
    algo::{coalesce, TokenSet},
    errorstr,
    kernel::{Expr, Place},
    logdebug, logerr, logtrace, Error, Result,
};
use fnv::{FnvHashMap as HM, FnvHashSet as HS};
use smallvec::SmallVec;
use std::{collections::VecDeque, fmt};

pub mod print_proof;

pub use print_proof::{print_proof, print_witness, proof_to_dot};

/// Index of a node in a proof.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeIdx(u32);

impl NodeIdx {
    /// Access the unique index within.
    #[inline]
    pub fn idx(&self) -> usize {
        self.0 as usize
    }
}

/// The inference justifying an edge `start -> end`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Rule {
    /// `end` is a strict subset of `start`.
    Weakening,
    /// `start` and `end` differ by one element each, and the element of
    /// `end` is a child of the element of `start`.
    Unfold,
    /// `end` gains a child of some formula of `start`, dropping at most
    /// one element.
    Contraction,
}

/// Is `start -> end` a proof step? Returns the first rule that applies.
pub fn is_edge(start: &Place, end: &Place) -> Option<Rule> {
    if start.len() > end.len() && start.is_superset(end) {
        return Some(Rule::Weakening);
    }

    let parent_diff: SmallVec<[&Expr; 2]> = start.difference(end).take(2).collect();
    let child_diff: SmallVec<[&Expr; 2]> = end.difference(start).take(2).collect();

    if let ([parent], [child]) = (&parent_diff[..], &child_diff[..]) {
        if parent.has_child(child) {
            return Some(Rule::Unfold);
        }
    }

    if let [child] = &child_diff[..] {
        if parent_diff.len() <= 1 && start.iter().any(|e| e.has_child(child)) {
            return Some(Rule::Contraction);
        }
    }
    None
}

/// A proof graph.
#[derive(Clone)]
pub struct Proof {
    nodes: Vec<Place>,
    tbl: HM<Place, NodeIdx>,
    succ: Vec<SmallVec<[(NodeIdx, Rule); 4]>>,
    edges: HS<(NodeIdx, NodeIdx)>,
}

/// Extract a proof of `root` from `tokens`, then check it.
///
/// `root` must be one of the tokens. Fails with an inconsistency error if
/// the graph has a leaf that is not an axiom, or no axiom at all.
pub fn extract(root: &Place, tokens: &TokenSet) -> Result<Proof> {
    if !tokens.contains(root) {
        return Err(errorstr!("extract: {:?} is not a token", root));
    }

    let mut proof = Proof {
        nodes: vec![],
        tbl: HM::default(),
        succ: vec![],
        edges: HS::default(),
    };
    let (root_idx, _) = proof.add_node(root);

    let mut stack = vec![root_idx];
    while let Some(n) = stack.pop() {
        if proof.nodes[n.idx()].is_axiom() {
            continue;
        }
        for sub in tokens.iter() {
            let rule = match is_edge(&proof.nodes[n.idx()], sub) {
                Some(r) => r,
                None => continue,
            };
            let (m, is_new) = proof.add_node(sub);
            if proof.add_edge(n, m, rule) && is_new {
                stack.push(m);
            }
        }
    }

    logdebug!(
        "extract {:?}: {} nodes, {} edges",
        root,
        proof.nodes.len(),
        proof.edges.len()
    );
    if let Err(e) = proof.verify() {
        logerr!("extract: no certificate for {:?}: {}", root, e);
        let outer = Error::new_inconsistency(format!(
            "search succeeded on {:?} but no certificate could be built",
            root
        ));
        return Err(outer.with_source(e));
    }
    Ok(proof)
}

/// Search for a proof of `formula`. Returns `Ok(None)` if it is not
/// provable.
pub fn prove(formula: &Expr) -> Result<Option<Proof>> {
    let tokens = match coalesce(formula).into_tokens() {
        Some(t) => t,
        None => return Ok(None),
    };
    let p = extract(&Place::singleton(formula.clone()), &tokens)?;
    Ok(Some(p))
}

impl Proof {
    fn add_node(&mut self, p: &Place) -> (NodeIdx, bool) {
        if let Some(n) = self.tbl.get(p) {
            return (*n, false);
        }
        let n = NodeIdx(self.nodes.len() as u32);
        self.nodes.push(p.clone());
        self.succ.push(SmallVec::new());
        self.tbl.insert(p.clone(), n);
        (n, true)
    }

    /// Insert an edge. Returns `false` if it was already present.
    fn add_edge(&mut self, start: NodeIdx, end: NodeIdx, rule: Rule) -> bool {
        if !self.edges.insert((start, end)) {
            return false;
        }
        logtrace!(
            "edge {:?} --{:?}--> {:?}",
            self.nodes[start.idx()],
            rule,
            self.nodes[end.idx()]
        );
        self.succ[start.idx()].push((end, rule));
        true
    }

    /// The root node, `{formula}`.
    #[inline]
    pub fn root(&self) -> NodeIdx {
        NodeIdx(0)
    }

    /// The place at node `n`.
    #[inline]
    pub fn place(&self, n: NodeIdx) -> &Place {
        &self.nodes[n.idx()]
    }

    /// The formula being proved.
    pub fn goal(&self) -> Option<&Expr> {
        self.nodes.first().and_then(|p| p.iter().next())
    }

    /// Find the node for a place, if any.
    pub fn find(&self, p: &Place) -> Option<NodeIdx> {
        self.tbl.get(p).copied()
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// All nodes, in order of discovery.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        (0..self.nodes.len()).map(|i| NodeIdx(i as u32))
    }

    /// Premises of node `n`, with the rule of each step.
    pub fn successors(&self, n: NodeIdx) -> &[(NodeIdx, Rule)] {
        &self.succ[n.idx()][..]
    }

    /// All edges as `(start, rule, end)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIdx, Rule, NodeIdx)> + '_ {
        self.nodes()
            .flat_map(move |n| self.successors(n).iter().map(move |&(m, r)| (n, r, m)))
    }

    /// Nodes without premises.
    pub fn leaves(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.nodes().filter(move |n| self.succ[n.idx()].is_empty())
    }

    /// Nodes that are identity axioms.
    pub fn axioms(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.nodes().filter(move |n| self.place(*n).is_axiom())
    }

    /// Check that every leaf is an axiom and that there is at least one
    /// axiom. Every node is reachable from the root by construction.
    pub fn verify(&self) -> Result<()> {
        if let Some(n) = self.leaves().find(|n| !self.place(*n).is_axiom()) {
            return Err(Error::new_inconsistency(format!(
                "proof of {:?} has a leaf {:?} that is not an axiom",
                self.place(self.root()),
                self.place(n)
            )));
        }
        if self.axioms().next().is_none() {
            return Err(Error::new_inconsistency(format!(
                "proof of {:?} reaches no axiom",
                self.place(self.root())
            )));
        }
        Ok(())
    }

    /// A shortest path from the root to an axiom.
    ///
    /// Each element is a node and the rule used to reach it (`None` for
    /// the root). This is a single linear certificate for the root.
    pub fn witness(&self) -> Option<Vec<(NodeIdx, Option<Rule>)>> {
        let mut pred: HM<NodeIdx, (NodeIdx, Rule)> = HM::default();
        let mut q = VecDeque::new();
        q.push_back(self.root());

        let mut found = None;
        while let Some(n) = q.pop_front() {
            if self.place(n).is_axiom() {
                found = Some(n);
                break;
            }
            for &(m, rule) in self.successors(n) {
                if m != self.root() && !pred.contains_key(&m) {
                    pred.insert(m, (n, rule));
                    q.push_back(m);
                }
            }
        }

        let mut n = found?;
        let mut path = vec![];
        while let Some(&(prev, rule)) = pred.get(&n) {
            path.push((n, Some(rule)));
            n = prev;
        }
        path.push((n, None));
        path.reverse();
        Some(path)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Rule::Weakening => "weakening",
            Rule::Unfold => "unfold",
            Rule::Contraction => "contraction",
        };
        write!(out, "{}", s)
    }
}

impl fmt::Debug for Proof {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        print_proof::Printer::new(out).pp_proof(self)
    }
}
