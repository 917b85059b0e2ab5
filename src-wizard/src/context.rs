//! Simulation activity shared between the wizard and the views reading it

use std::sync::Arc;

use deboard_gateway::CreatedSimulation;
use parking_lot::RwLock;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationActivity {
    /// Last simulation started from this client
    pub active: Option<CreatedSimulation>,
    pub simulating: bool,
}

/// Cloneable handle; every clone sees the same state. Writes are
/// last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct SimulationContext {
    inner: Arc<RwLock<SimulationActivity>>,
}

impl SimulationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a started simulation
    pub fn start(&self, created: CreatedSimulation) {
        let mut state = self.inner.write();
        state.active = Some(created);
        state.simulating = true;
    }

    /// Mark nothing as running; the last started simulation is kept for
    /// display
    pub fn clear(&self) {
        self.inner.write().simulating = false;
    }

    pub fn is_simulating(&self) -> bool {
        self.inner.read().simulating
    }

    pub fn active(&self) -> Option<CreatedSimulation> {
        self.inner.read().active.clone()
    }

    pub fn snapshot(&self) -> SimulationActivity {
        self.inner.read().clone()
    }
}
