//! Street travel delay and admission behaviour

use manhattan_traffic::simulation::{Fleet, Position, Street, TrafficError, VehicleId};

fn spawn(fleet: &mut Fleet, name: &str) -> VehicleId {
    fleet.spawn(name, Position::new(0, 0), false)
}

#[test]
fn test_vehicle_exits_after_travel_time() {
    let mut fleet = Fleet::new();
    let mut street = Street::new(3);
    let id = spawn(&mut fleet, "car");

    assert!(street.try_enter(id));
    assert_eq!(street.load(), 1);

    assert!(street.tick(&mut fleet).is_empty());
    assert!(street.tick(&mut fleet).is_empty());
    assert_eq!(street.tick(&mut fleet), vec![id]);
    assert_eq!(street.load(), 0);
    assert!(street.tick(&mut fleet).is_empty());

    assert_eq!(fleet.get(id).expect("vehicle exists").travel_minutes(), 3);
}

#[test]
fn test_exit_order_follows_admission_order() {
    let mut fleet = Fleet::new();
    let mut street = Street::new(2);
    let first = spawn(&mut fleet, "first");
    let second = spawn(&mut fleet, "second");
    let third = spawn(&mut fleet, "third");

    assert!(street.try_enter(first));
    assert!(street.try_enter(second));
    assert!(street.tick(&mut fleet).is_empty());

    // Enters one minute later, so it leaves one minute later
    assert!(street.try_enter(third));
    assert_eq!(street.tick(&mut fleet), vec![first, second]);
    assert_eq!(street.occupants().collect::<Vec<_>>(), vec![(third, 1)]);
    assert_eq!(street.tick(&mut fleet), vec![third]);
}

#[test]
fn test_every_occupant_gets_one_minute_per_tick() {
    let mut fleet = Fleet::new();
    let mut street = Street::new(5);
    let ids: Vec<VehicleId> = (0..4).map(|i| spawn(&mut fleet, &format!("car-{}", i))).collect();
    for id in &ids {
        assert!(street.try_enter(*id));
    }

    street.tick(&mut fleet);
    street.tick(&mut fleet);

    for id in &ids {
        assert_eq!(fleet.get(*id).expect("vehicle exists").travel_minutes(), 2);
    }
    assert!(street.occupants().all(|(_, remaining)| remaining == 3));
}

#[test]
fn test_try_enter_fails_at_capacity() {
    let mut fleet = Fleet::new();
    let mut street = Street::new(1);
    street.set_capacity(2).expect("empty street");

    assert!(street.try_enter(spawn(&mut fleet, "a")));
    assert!(street.try_enter(spawn(&mut fleet, "b")));
    assert!(!street.try_enter(spawn(&mut fleet, "c")));
    assert_eq!(street.load(), street.capacity());

    // Room frees up once vehicles leave
    assert_eq!(street.tick(&mut fleet).len(), 2);
    assert!(street.try_enter(spawn(&mut fleet, "d")));
}

#[test]
fn test_closed_street_rejects_everyone() {
    let mut fleet = Fleet::new();
    let mut street = Street::new(1);
    street.set_closed(true);

    assert!(street.is_closed());
    assert!(!street.try_enter(spawn(&mut fleet, "a")));
    assert_eq!(street.load(), 0);

    street.set_closed(false);
    assert!(street.try_enter(spawn(&mut fleet, "b")));
}

#[test]
fn test_closed_street_keeps_moving_occupants() {
    let mut fleet = Fleet::new();
    let mut street = Street::new(2);
    let id = spawn(&mut fleet, "car");
    assert!(street.try_enter(id));

    street.set_closed(true);
    assert!(street.tick(&mut fleet).is_empty());
    assert_eq!(street.tick(&mut fleet), vec![id]);
}

#[test]
fn test_unknown_vehicle_still_travels() {
    let mut fleet = Fleet::new();
    let mut street = Street::new(1);
    let id = spawn(&mut fleet, "ghost");
    assert!(street.try_enter(id));
    fleet.remove(id);

    assert_eq!(street.tick(&mut fleet), vec![id]);
}

#[test]
fn test_capacity_cannot_drop_below_load() {
    let mut fleet = Fleet::new();
    let mut street = Street::new(2);
    assert!(street.try_enter(spawn(&mut fleet, "a")));
    assert!(street.try_enter(spawn(&mut fleet, "b")));

    assert_eq!(
        street.set_capacity(1),
        Err(TrafficError::CapacityBelowLoad {
            capacity: 1,
            load: 2
        })
    );
    assert!(street.load() <= street.capacity());

    street.set_capacity(2).expect("matches load");
    assert!(!street.try_enter(spawn(&mut fleet, "c")));
}
