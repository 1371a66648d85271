//! Chain a label's unordered unit edges into closed loops.
//!
//! Edges live in an arena (`&[Edge]`, referenced by index); a start-point
//! index maps each lattice point to the edges leaving it. Continuations are
//! popped from that index, so every edge is touched a constant number of
//! times and assembly is linear in the edge count.
//!
//! Branch points (single-pixel necks where two loops touch at a corner) have
//! two outgoing edges; the most recently indexed one wins. Any choice yields a
//! valid partition of the edge set, only the point-to-loop assignment varies.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::geom::{Edge, Loop, Pt};
use crate::raster::Label;

/// Partition `edges` into closed loops. Each loop lists the start point of
/// every edge it consumed, in chain order.
///
/// Fails with `UnterminatedChain` when a chain dead-ends away from its head,
/// which only happens if the edge set is not a union of cycles.
pub fn assemble(label: Label, edges: &[Edge]) -> Result<Vec<Loop>> {
    let mut by_start: HashMap<Pt, Vec<usize>> = HashMap::with_capacity(edges.len());
    for (i, e) in edges.iter().enumerate() {
        by_start.entry(e.from).or_default().push(i);
    }
    let mut used = vec![false; edges.len()];
    let mut remaining = edges.len();
    let mut loops = Vec::new();

    for start in (0..edges.len()).rev() {
        if used[start] {
            continue;
        }
        used[start] = true;
        remaining -= 1;
        let head = edges[start].from;
        let mut tail = edges[start].to;
        let mut points = vec![head];
        while let Some(next) = take_unused(&mut by_start, &used, tail) {
            used[next] = true;
            remaining -= 1;
            points.push(tail);
            tail = edges[next].to;
        }
        if tail != head {
            return Err(Error::UnterminatedChain {
                label,
                remaining: remaining + points.len(),
            });
        }
        loops.push(Loop::new(points));
    }
    debug_assert_eq!(remaining, 0);
    Ok(loops)
}

/// Pop an unused edge starting at `at`; stale (already used) ids are discarded.
fn take_unused(by_start: &mut HashMap<Pt, Vec<usize>>, used: &[bool], at: Pt) -> Option<usize> {
    let bucket = by_start.get_mut(&at)?;
    while let Some(i) = bucket.pop() {
        if !used[i] {
            return Some(i);
        }
    }
    None
}
