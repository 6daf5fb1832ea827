use crate::{Vessel, Viewport};

/// Several nearby vessels collapsed into one representative.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Fields of the priority member with the positions averaged over all members.
    pub representative: Vessel,
    pub members: Vec<Vessel>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderEntity {
    Single(Vessel),
    Cluster(Cluster),
}

/// Input handed to a `ClusterExecutor`.
#[derive(Debug, Clone)]
pub struct ClusterRequest {
    pub vessels: Vec<Vessel>,
    pub viewport: Viewport,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

impl RenderEntity {
    pub fn vessel(&self) -> &Vessel {
        match self {
            RenderEntity::Single(v) => v,
            RenderEntity::Cluster(c) => &c.representative,
        }
    }

    pub fn cluster_size(&self) -> Option<usize> {
        match self {
            RenderEntity::Single(_) => None,
            RenderEntity::Cluster(c) => Some(c.size()),
        }
    }

    /// Number of vessels this entity stands for.
    pub fn vessel_count(&self) -> usize {
        self.cluster_size().unwrap_or(1)
    }
}
