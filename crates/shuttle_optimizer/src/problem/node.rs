use serde::Serialize;

use crate::{define_index_newtype, problem::faculty::FacultyIdx};

define_index_newtype!(NodeIdx);

/// The depot always occupies node 0; faculty `k` is node `k + 1`.
impl NodeIdx {
    pub const DEPOT: NodeIdx = NodeIdx::new(0);

    pub fn is_depot(&self) -> bool {
        *self == Self::DEPOT
    }

    pub fn kind(&self) -> Node {
        match self.get() {
            0 => Node::Depot,
            index => Node::Faculty(FacultyIdx::new(index - 1)),
        }
    }

    pub fn faculty(&self) -> Option<FacultyIdx> {
        match self.kind() {
            Node::Depot => None,
            Node::Faculty(faculty) => Some(faculty),
        }
    }
}

impl From<FacultyIdx> for NodeIdx {
    fn from(faculty: FacultyIdx) -> Self {
        NodeIdx::new(faculty.get() + 1)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Depot,
    Faculty(FacultyIdx),
}
