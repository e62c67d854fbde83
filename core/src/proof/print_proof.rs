//! # Proof Printing

use {
    super::{NodeIdx, Proof},
    std::fmt::{self, Write},
};

pub struct Printer<'a> {
    out: &'a mut dyn Write,
}

impl<'a> Printer<'a> {
    /// New printer
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out }
    }

    fn pp_node(&mut self, p: &Proof, n: NodeIdx) -> fmt::Result {
        write!(self.out, "n{}: {:?}", n.idx(), p.place(n))?;
        if p.place(n).is_axiom() {
            write!(self.out, " (axiom)")?;
        }
        Ok(())
    }

    /// Print every node, followed by its premises.
    pub fn pp_proof(&mut self, p: &Proof) -> fmt::Result {
        for n in p.nodes() {
            self.pp_node(p, n)?;
            writeln!(self.out)?;
            for (m, rule) in p.successors(n) {
                writeln!(self.out, "  -> n{} ({})", m.idx(), rule)?;
            }
        }
        Ok(())
    }

    /// Print the witness path, one step per line.
    pub fn pp_witness(&mut self, p: &Proof) -> fmt::Result {
        let w = match p.witness() {
            Some(w) => w,
            None => return writeln!(self.out, "<no witness>"),
        };
        for (n, rule) in w {
            if let Some(r) = rule {
                write!(self.out, "  by {}: ", r)?;
            }
            self.pp_node(p, n)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Print in Graphviz's dot format.
    pub fn pp_dot(&mut self, p: &Proof) -> fmt::Result {
        writeln!(self.out, "digraph proof {{")?;
        if let Some(g) = p.goal() {
            writeln!(self.out, "  label=\"{}\";", escape(&g.to_string()))?;
        }
        for n in p.nodes() {
            let shape = if p.place(n).is_axiom() {
                "box"
            } else {
                "ellipse"
            };
            writeln!(
                self.out,
                "  n{} [label=\"{}\", shape={}];",
                n.idx(),
                escape(&p.place(n).to_string()),
                shape
            )?;
        }
        for (n, rule, m) in p.edges() {
            writeln!(
                self.out,
                "  n{} -> n{} [label=\"{}\"];",
                n.idx(),
                m.idx(),
                rule
            )?;
        }
        writeln!(self.out, "}}")
    }
}

fn escape(s: &str) -> String {
    let mut r = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '"' || c == '\\' {
            r.push('\\');
        }
        r.push(c);
    }
    r
}

/// Print the whole graph to a string.
pub fn print_proof(p: &Proof) -> String {
    let mut s = String::new();
    // writing into a `String` cannot fail
    let _ = Printer::new(&mut s).pp_proof(p);
    s
}

/// Print the witness path of `p` to a string.
pub fn print_witness(p: &Proof) -> String {
    let mut s = String::new();
    let _ = Printer::new(&mut s).pp_witness(p);
    s
}

/// Render `p` as a Graphviz graph.
pub fn proof_to_dot(p: &Proof) -> String {
    let mut s = String::new();
    let _ = Printer::new(&mut s).pp_dot(p);
    s
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{prove, RawExpr};

    fn simple() -> Proof {
        let e = RawExpr::implies(RawExpr::atom("a"), RawExpr::atom("a")).normalize();
        prove(&e).unwrap().unwrap()
    }

    #[test]
    fn test_print() {
        let p = simple();
        let s = print_proof(&p);
        assert!(s.starts_with("n0: {(~a | a)}\n"), "got {}", s);
        assert!(s.contains("(axiom)"));
        assert_eq!(s, format!("{:?}", p));
    }

    #[test]
    fn test_witness() {
        let p = simple();
        let s = print_witness(&p);
        assert!(s.starts_with("n0: {(~a | a)}"));
        assert!(s.trim_end().ends_with("(axiom)"));
    }

    #[test]
    fn test_dot() {
        let p = simple();
        let s = proof_to_dot(&p);
        assert!(s.starts_with("digraph proof {"));
        assert!(s.contains("label=\"~a | a\""));
        assert_eq!(s.matches(" -> ").count(), p.n_edges());
        assert!(s.trim_end().ends_with('}'));
        assert_eq!(escape("a\"b"), "a\\\"b");
    }
}
