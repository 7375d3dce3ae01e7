use smallvec::SmallVec;

use super::{node_list::NodeList, search_graph::NodeIdx};

/// How many nodes of each list a partial route has consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExtendPosition {
    pub first: usize,
    pub second: usize,
}

impl ExtendPosition {
    pub const START: ExtendPosition = ExtendPosition {
        first: 0,
        second: 0,
    };
}

/// A legal next step of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extension {
    pub node: NodeIdx,
    pub position: ExtendPosition,
    /// The node comes from the list of visits to insert.
    pub is_inserted: bool,
    /// Every required node is consumed once this extension is taken.
    pub completes: bool,
}

pub type Extensions = SmallVec<[Extension; 2]>;

/// Node sequencing: tells the labelling algorithm which nodes may follow a
/// partial route.
///
/// Positions are numbered so that every extension leads to a strictly
/// larger [`ExtendInfo::position_index`]; the algorithm relies on this to
/// process positions in a single pass.
pub trait ExtendInfo {
    fn num_positions(&self) -> usize;

    fn position_index(&self, position: ExtendPosition) -> usize;

    fn is_complete(&self, position: ExtendPosition) -> bool;

    /// Clears `extensions` and fills it with the steps available at `position`.
    fn extensions(&self, position: ExtendPosition, extensions: &mut Extensions);
}

/// A fixed route: each position has exactly one successor.
pub struct ExtendInfoOneElement<'a> {
    nodes: &'a NodeList,
}

impl<'a> ExtendInfoOneElement<'a> {
    pub fn new(nodes: &'a NodeList) -> Self {
        ExtendInfoOneElement { nodes }
    }
}

impl ExtendInfo for ExtendInfoOneElement<'_> {
    fn num_positions(&self) -> usize {
        self.nodes.len() + 1
    }

    fn position_index(&self, position: ExtendPosition) -> usize {
        position.first
    }

    fn is_complete(&self, position: ExtendPosition) -> bool {
        position.first == self.nodes.len()
    }

    fn extensions(&self, position: ExtendPosition, extensions: &mut Extensions) {
        extensions.clear();

        if let Some(node) = self.nodes.get(position.first) {
            let next = ExtendPosition {
                first: position.first + 1,
                second: 0,
            };
            extensions.push(Extension {
                node,
                position: next,
                is_inserted: false,
                completes: self.is_complete(next),
            });
        }
    }
}

/// A fixed route and a list of visits to insert. The search may advance
/// along either list, so every order-preserving merge of the two is
/// reachable.
pub struct ExtendInfoTwoElements<'a> {
    first: &'a NodeList,
    second: &'a NodeList,
}

impl<'a> ExtendInfoTwoElements<'a> {
    pub fn new(first: &'a NodeList, second: &'a NodeList) -> Self {
        ExtendInfoTwoElements { first, second }
    }
}

impl ExtendInfo for ExtendInfoTwoElements<'_> {
    fn num_positions(&self) -> usize {
        (self.first.len() + 1) * (self.second.len() + 1)
    }

    fn position_index(&self, position: ExtendPosition) -> usize {
        position.first * (self.second.len() + 1) + position.second
    }

    fn is_complete(&self, position: ExtendPosition) -> bool {
        position.first == self.first.len() && position.second == self.second.len()
    }

    fn extensions(&self, position: ExtendPosition, extensions: &mut Extensions) {
        extensions.clear();

        if let Some(node) = self.first.get(position.first) {
            let next = ExtendPosition {
                first: position.first + 1,
                second: position.second,
            };
            extensions.push(Extension {
                node,
                position: next,
                is_inserted: false,
                completes: self.is_complete(next),
            });
        }

        if let Some(node) = self.second.get(position.second) {
            let next = ExtendPosition {
                first: position.first,
                second: position.second + 1,
            };
            extensions.push(Extension {
                node,
                position: next,
                is_inserted: true,
                completes: self.is_complete(next),
            });
        }
    }
}
