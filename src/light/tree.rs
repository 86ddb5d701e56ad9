//! Ownership tree for propagated beams
//!
//! Beams are stored in a generational slot map and addressed by [`BeamId`].
//! A node owns its children exclusively: killing a node frees its whole
//! subtree, so no handle can outlive the geometry it points into.

use slotmap::{SlotMap, new_key_type};

use super::beam::BeamLightRay;
use crate::error::{LightError, LightResult};

new_key_type! {
    /// Stable handle to a beam node
    pub struct BeamId;
}

/// Lifecycle state of a beam node
#[derive(Debug, Clone)]
pub enum BeamNode {
    /// Rays valid, children may exist
    Live {
        beam: BeamLightRay,
        children: Vec<BeamId>,
    },
    /// Rays cleared and no children; any further use is an error
    Killed,
}

#[derive(Debug, Default)]
pub struct BeamTree {
    nodes: SlotMap<BeamId, BeamNode>,
}

impl BeamTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes still held, killed roots included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a parentless beam
    pub fn insert(&mut self, beam: BeamLightRay) -> BeamId {
        self.nodes.insert(BeamNode::Live {
            beam,
            children: Vec::new(),
        })
    }

    /// Insert `beam` as a new child of `parent`
    pub fn attach(&mut self, parent: BeamId, beam: BeamLightRay) -> LightResult<BeamId> {
        // Check the parent before allocating so a dead parent leaks nothing
        self.live_children_mut(parent)?;
        let child = self.insert(beam);
        self.live_children_mut(parent)?.push(child);
        Ok(child)
    }

    /// The beam at `id`, or [`LightError::DeadBeam`] once killed
    pub fn get(&self, id: BeamId) -> LightResult<&BeamLightRay> {
        match self.nodes.get(id) {
            Some(BeamNode::Live { beam, .. }) => Ok(beam),
            _ => Err(LightError::DeadBeam(id)),
        }
    }

    pub fn children(&self, id: BeamId) -> LightResult<&[BeamId]> {
        match self.nodes.get(id) {
            Some(BeamNode::Live { children, .. }) => Ok(children),
            _ => Err(LightError::DeadBeam(id)),
        }
    }

    pub fn is_live(&self, id: BeamId) -> bool {
        matches!(self.nodes.get(id), Some(BeamNode::Live { .. }))
    }

    /// Kill a node: tear down its subtree post-order, then clear its rays
    ///
    /// Killing a node that is already killed (or discarded) does nothing.
    pub fn kill(&mut self, id: BeamId) {
        self.kill_children(id);
        if let Some(node) = self.nodes.get_mut(id) {
            *node = BeamNode::Killed;
        }
    }

    /// Kill and detach every child of `id`, leaving `id` itself live
    pub fn kill_children(&mut self, id: BeamId) {
        let children = match self.nodes.get_mut(id) {
            Some(BeamNode::Live { children, .. }) => std::mem::take(children),
            _ => return,
        };
        for child in children {
            self.kill_children(child);
            self.nodes.remove(child);
        }
    }

    /// Discard a node and its subtree entirely
    pub fn remove(&mut self, id: BeamId) {
        self.kill_children(id);
        self.nodes.remove(id);
    }

    /// Every node below `id`, depth-first, parents before children
    pub fn descendants(&self, id: BeamId) -> LightResult<Vec<BeamId>> {
        let mut out = Vec::new();
        let mut stack: Vec<BeamId> = self.children(id)?.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Ok(children) = self.children(next) {
                stack.extend(children.iter().rev().copied());
            }
        }
        Ok(out)
    }

    /// Longest chain of children below `id` (0 for a leaf)
    pub fn depth(&self, id: BeamId) -> usize {
        self.children(id)
            .map(|children| children.iter().map(|&c| 1 + self.depth(c)).max().unwrap_or(0))
            .unwrap_or(0)
    }

    fn live_children_mut(&mut self, id: BeamId) -> LightResult<&mut Vec<BeamId>> {
        match self.nodes.get_mut(id) {
            Some(BeamNode::Live { children, .. }) => Ok(children),
            _ => Err(LightError::DeadBeam(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::LuxColour;
    use glam::DVec2;
    use proptest::prelude::*;

    fn beam() -> BeamLightRay {
        BeamLightRay::emit(LuxColour::WHITE, DVec2::ZERO, DVec2::X, 2.0, 10.0).unwrap()
    }

    #[test]
    fn test_attach_and_walk() {
        let mut tree = BeamTree::new();
        let root = tree.insert(beam());
        let a = tree.attach(root, beam()).unwrap();
        let b = tree.attach(root, beam()).unwrap();
        let a1 = tree.attach(a, beam()).unwrap();

        assert_eq!(tree.children(root).unwrap(), &[a, b]);
        assert_eq!(tree.descendants(root).unwrap(), vec![a, a1, b]);
        assert_eq!(tree.depth(root), 2);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_kill_frees_subtree() {
        let mut tree = BeamTree::new();
        let root = tree.insert(beam());
        let a = tree.attach(root, beam()).unwrap();
        let a1 = tree.attach(a, beam()).unwrap();

        tree.kill(root);
        assert!(!tree.is_live(root));
        assert!(matches!(tree.get(a), Err(LightError::DeadBeam(_))));
        assert!(matches!(tree.get(a1), Err(LightError::DeadBeam(_))));
        assert!(matches!(tree.get(root), Err(LightError::DeadBeam(_))));
        assert!(matches!(tree.attach(root, beam()), Err(LightError::DeadBeam(_))));
        // Killed root stays until removed
        assert_eq!(tree.len(), 1);
        tree.remove(root);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_kill_children_keeps_parent_live() {
        let mut tree = BeamTree::new();
        let root = tree.insert(beam());
        tree.attach(root, beam()).unwrap();
        tree.kill_children(root);
        assert!(tree.is_live(root));
        assert!(tree.children(root).unwrap().is_empty());
        // Idempotent with no children
        tree.kill_children(root);
        assert_eq!(tree.len(), 1);
    }

    proptest! {
        #[test]
        fn kill_twice_is_a_no_op(fanout in 0usize..5, depth in 0usize..4) {
            let mut tree = BeamTree::new();
            let root = tree.insert(beam());
            let mut frontier = vec![root];
            for _ in 0..depth {
                let mut next = Vec::new();
                for parent in frontier {
                    for _ in 0..fanout {
                        next.push(tree.attach(parent, beam()).unwrap());
                    }
                }
                frontier = next;
            }

            tree.kill(root);
            prop_assert_eq!(tree.len(), 1);
            tree.kill(root);
            prop_assert_eq!(tree.len(), 1);
            prop_assert!(tree.get(root).is_err());
        }
    }
}
