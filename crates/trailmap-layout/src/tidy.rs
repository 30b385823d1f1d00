//! Tidy tree placement (Reingold-Tilford with Buchheim/Walker's linear-time apportioning).
//!
//! Runs in "depth down, siblings across" space: each node gets a cross-axis position in
//! separation units, where neighbouring nodes are kept at least [`separation`] apart. The
//! results are then swapped so depth grows along x, and nodes on the left side are mirrored.

use crate::model::LayoutTree;

pub const LEAF_SIBLING_SEPARATION: f64 = 0.5;
pub const SIBLING_SEPARATION: f64 = 0.8;
pub const COUSIN_SEPARATION: f64 = 1.2;

/// Minimum cross-axis distance (in units of `nodeSpacingVertical`) between two adjacent nodes.
pub fn separation(tree: &LayoutTree, a: usize, b: usize) -> f64 {
    let (na, nb) = (&tree.nodes[a], &tree.nodes[b]);
    if na.parent != nb.parent {
        COUSIN_SEPARATION
    } else if na.is_leaf() && nb.is_leaf() {
        LEAF_SIBLING_SEPARATION
    } else {
        SIBLING_SEPARATION
    }
}

struct Walk<'a> {
    tree: &'a LayoutTree,
    /// Preliminary position.
    z: Vec<f64>,
    /// Modifier.
    m: Vec<f64>,
    /// Change / shift, for spreading apportioned shifts over intermediate siblings.
    c: Vec<f64>,
    s: Vec<f64>,
    /// Ancestor pointer.
    a: Vec<usize>,
    /// Contour thread.
    t: Vec<Option<usize>>,
    /// Index among siblings.
    i: Vec<usize>,
    /// Default ancestor, stored on the parent.
    default_ancestor: Vec<Option<usize>>,
}

impl<'a> Walk<'a> {
    fn new(tree: &'a LayoutTree) -> Self {
        let n = tree.len();
        let mut i = vec![0usize; n];
        for node in &tree.nodes {
            for (k, &c) in node.children.iter().enumerate() {
                i[c] = k;
            }
        }
        Self {
            tree,
            z: vec![0.0; n],
            m: vec![0.0; n],
            c: vec![0.0; n],
            s: vec![0.0; n],
            a: (0..n).collect(),
            t: vec![None; n],
            i,
            default_ancestor: vec![None; n],
        }
    }

    fn children(&self, v: usize) -> &'a [usize] {
        let tree: &'a LayoutTree = self.tree;
        &tree.nodes[v].children
    }

    fn parent(&self, v: usize) -> Option<usize> {
        self.tree.nodes[v].parent
    }

    fn next_left(&self, v: usize) -> Option<usize> {
        self.children(v).first().copied().or(self.t[v])
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.children(v).last().copied().or(self.t[v])
    }

    fn first_walk(&mut self, v: usize) {
        let parent = self.parent(v);
        let siblings: &[usize] = match parent {
            Some(p) => self.children(p),
            None => &[],
        };
        let w = (self.i[v] > 0).then(|| siblings[self.i[v] - 1]);
        let children = self.children(v);

        if let (Some(&first), Some(&last)) = (children.first(), children.last()) {
            self.execute_shifts(v);
            let midpoint = (self.z[first] + self.z[last]) / 2.0;
            if let Some(w) = w {
                self.z[v] = self.z[w] + separation(self.tree, v, w);
                self.m[v] = self.z[v] - midpoint;
            } else {
                self.z[v] = midpoint;
            }
        } else if let Some(w) = w {
            self.z[v] = self.z[w] + separation(self.tree, v, w);
        }

        if let Some(p) = parent {
            let ancestor = self.default_ancestor[p].unwrap_or(siblings[0]);
            self.default_ancestor[p] = Some(self.apportion(v, w, ancestor));
        }
    }

    fn second_walk(&mut self, v: usize, parent_modifier: f64) -> f64 {
        self.m[v] += parent_modifier;
        self.z[v] + parent_modifier
    }

    fn apportion(&mut self, v: usize, w: Option<usize>, mut ancestor: usize) -> usize {
        let Some(w) = w else {
            return ancestor;
        };
        let Some(p) = self.parent(v) else {
            return ancestor;
        };

        let mut vip = v;
        let mut vop = v;
        let mut vim = w;
        let mut vom = self.children(p)[0];
        let mut sip = self.m[vip];
        let mut sop = self.m[vop];
        let mut sim = self.m[vim];
        let mut som = self.m[vom];

        let mut next_im = self.next_right(vim);
        let mut next_ip = self.next_left(vip);
        while let (Some(im), Some(ip)) = (next_im, next_ip) {
            vim = im;
            vip = ip;
            let (Some(om), Some(op)) = (self.next_left(vom), self.next_right(vop)) else {
                break;
            };
            vom = om;
            vop = op;
            self.a[vop] = v;

            let shift = self.z[vim] + sim - self.z[vip] - sip + separation(self.tree, vim, vip);
            if shift > 0.0 {
                let wm = self.next_ancestor(vim, v, ancestor);
                self.move_subtree(wm, v, shift);
                sip += shift;
                sop += shift;
            }
            sim += self.m[vim];
            sip += self.m[vip];
            som += self.m[vom];
            sop += self.m[vop];

            next_im = self.next_right(vim);
            next_ip = self.next_left(vip);
        }

        if let Some(im) = next_im {
            if self.next_right(vop).is_none() {
                self.t[vop] = Some(im);
                self.m[vop] += sim - sop;
            }
        }
        if let Some(ip) = next_ip {
            if self.next_left(vom).is_none() {
                self.t[vom] = Some(ip);
                self.m[vom] += sip - som;
                ancestor = v;
            }
        }
        ancestor
    }

    fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        if self.parent(self.a[vim]) == self.parent(v) {
            self.a[vim]
        } else {
            ancestor
        }
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
        let change = shift / (self.i[wp] as f64 - self.i[wm] as f64);
        self.c[wp] -= change;
        self.s[wp] += shift;
        self.c[wm] += change;
        self.z[wp] += shift;
        self.m[wp] += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        for &w in self.children(v).iter().rev() {
            self.z[w] += shift;
            self.m[w] += shift;
            change += self.c[w];
            shift += self.s[w] + change;
        }
    }
}

fn post_order(tree: &LayoutTree) -> Vec<usize> {
    let mut out = Vec::with_capacity(tree.len());
    let mut stack = vec![(LayoutTree::ROOT, false)];
    while let Some((v, expanded)) = stack.pop() {
        if expanded {
            out.push(v);
            continue;
        }
        stack.push((v, true));
        for &c in tree.nodes[v].children.iter().rev() {
            stack.push((c, false));
        }
    }
    out
}

/// Cross-axis positions in separation units, indexed by node id. The root sits at `0`.
pub fn tidy_positions(tree: &LayoutTree) -> Vec<f64> {
    if tree.is_empty() {
        return Vec::new();
    }
    let mut walk = Walk::new(tree);
    for v in post_order(tree) {
        walk.first_walk(v);
    }

    // The tree is pre-ordered, so parents are always finalized before their children.
    let mut out = vec![0.0; tree.len()];
    let root_modifier = -walk.z[LayoutTree::ROOT];
    for v in 0..tree.len() {
        let parent_modifier = match tree.nodes[v].parent {
            Some(p) => walk.m[p],
            None => root_modifier,
        };
        out[v] = walk.second_walk(v, parent_modifier);
    }
    out
}

/// Positions every node: `y` from the tidy cross-axis placement, `x` from depth. Nodes whose
/// effective side is left get the mirrored depth distance.
///
/// `x` is always recomputed from `depth`, never from the current `x`, so running this twice
/// cannot double-negate a mirrored node.
pub fn layout_tree(tree: &mut LayoutTree, node_spacing_vertical: f64, node_spacing_horizontal: f64) {
    let cross = tidy_positions(tree);
    for (node, c) in tree.nodes.iter_mut().zip(cross) {
        let distance = node.depth as f64 * node_spacing_horizontal;
        node.y = c * node_spacing_vertical;
        node.x = node.effective_side().sign() * distance;
    }
    tracing::debug!(nodes = tree.len(), "tree layout done");
}
