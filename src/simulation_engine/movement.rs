use crate::models::{Direction, Vehicle};

impl Direction {
    /// Per-tick displacement for a vehicle travelling at `speed`.
    ///
    /// World coordinates: x grows to the right, y grows upwards.
    pub fn velocity(self, speed: f64) -> (f64, f64) {
        match self {
            Direction::Towards => (speed, 0.0),
            Direction::Backwards => (-speed, 0.0),
            Direction::Upwards => (0.0, speed),
            Direction::Downwards => (0.0, -speed),
        }
    }
}

/// Displacement applied to `vehicle` on one tick. Vehicles without a
/// direction do not move.
pub fn velocity_of(vehicle: &Vehicle) -> (f64, f64) {
    vehicle
        .direction
        .map_or((0.0, 0.0), |direction| direction.velocity(vehicle.speed))
}

/// Advances a vehicle by one tick.
///
/// Plain linear addition: no bounds, no collisions. A vehicle may leave the
/// canvas and keep going.
pub fn advance_vehicle(vehicle: &mut Vehicle) {
    let (dx, dy) = velocity_of(vehicle);
    vehicle.position_x += dx;
    vehicle.position_y += dy;
}

/// Advances every vehicle by one tick.
pub fn advance_all(vehicles: &mut [Vehicle]) {
    vehicles.iter_mut().for_each(advance_vehicle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;

    fn vehicle(direction: Option<Direction>, speed: f64) -> Vehicle {
        Vehicle {
            id: RecordId::new("1"),
            scenario_id: RecordId::new("1"),
            name: "v".to_string(),
            speed,
            position_x: 100.0,
            position_y: 100.0,
            direction,
        }
    }

    #[test]
    fn each_direction_moves_along_one_axis() {
        let cases = [
            (Direction::Towards, (105.0, 100.0)),
            (Direction::Backwards, (95.0, 100.0)),
            (Direction::Upwards, (100.0, 105.0)),
            (Direction::Downwards, (100.0, 95.0)),
        ];
        for (direction, expected) in cases {
            let mut v = vehicle(Some(direction), 5.0);
            advance_vehicle(&mut v);
            assert_eq!((v.position_x, v.position_y), expected, "{direction}");
        }
    }

    #[test]
    fn vehicle_without_direction_stays_put() {
        let mut v = vehicle(None, 50.0);
        advance_vehicle(&mut v);
        assert_eq!((v.position_x, v.position_y), (100.0, 100.0));
    }

    #[test]
    fn positions_are_not_clamped() {
        let mut v = vehicle(Some(Direction::Downwards), 60.0);
        for _ in 0..3 {
            advance_vehicle(&mut v);
        }
        assert_eq!(v.position_y, -80.0);
    }

    #[test]
    fn advance_all_moves_every_vehicle() {
        let mut vehicles = vec![
            vehicle(Some(Direction::Towards), 1.0),
            vehicle(Some(Direction::Upwards), 2.0),
        ];
        advance_all(&mut vehicles);
        assert_eq!(vehicles[0].position_x, 101.0);
        assert_eq!(vehicles[1].position_y, 102.0);
    }
}
