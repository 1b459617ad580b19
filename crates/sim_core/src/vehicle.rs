//! The fleet: vehicle kinds and per-vehicle mutable state.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleKind {
    Truck,
    Van,
    Drone,
    Helicopter,
    Boat,
}

/// A single vehicle. Mutated only by the Dispatch & Delivery Executor.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: u32,
    pub kind: VehicleKind,
    pub location: String,
    pub payload_capacity: f64,
    pub volume_capacity: f64,
    pub range: f64,
    pub fuel: f64,
}

impl Vehicle {
    pub fn new(
        id: u32,
        kind: VehicleKind,
        location: impl Into<String>,
        payload_capacity: f64,
        volume_capacity: f64,
        range: f64,
    ) -> Self {
        Self {
            id,
            kind,
            location: location.into(),
            payload_capacity,
            volume_capacity,
            range,
            fuel: range,
        }
    }

    /// `0 <= fuel <= range` must hold in every reachable state.
    pub fn fuel_invariant_holds(&self) -> bool {
        self.fuel >= 0.0 && self.fuel <= self.range
    }

    pub fn is_low_fuel(&self, trigger_fraction: f64) -> bool {
        self.fuel <= trigger_fraction * self.range
    }

    /// Whether this vehicle can carry the combined needs of a zone (payload only;
    /// volume capacity is tracked but the source data model does not separately
    /// size needs by volume, so only payload gates admission here).
    pub fn can_carry(&self, total_needs: f64) -> bool {
        self.payload_capacity >= total_needs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_fuel_threshold() {
        let mut v = Vehicle::new(1, VehicleKind::Truck, "B", 500.0, 500.0, 100.0);
        v.fuel = 60.0;
        assert!(v.is_low_fuel(0.6));
        v.fuel = 60.01;
        assert!(!v.is_low_fuel(0.6));
    }

    #[test]
    fn fuel_invariant() {
        let v = Vehicle::new(1, VehicleKind::Truck, "B", 500.0, 500.0, 100.0);
        assert!(v.fuel_invariant_holds());
    }
}
