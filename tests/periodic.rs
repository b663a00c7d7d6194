use nalgebra::Vector3;
use particle_locator::particles::{periodify, BoundingBox, ParticleContainer, Particles, PeriodicParticles};

fn cell_of(side: f64, pts: &[[f64; 3]]) -> Particles {
    let positions = pts.iter().map(|p| Vector3::new(p[0], p[1], p[2])).collect();
    Particles::new(positions, BoundingBox::cube(0.0, side))
}

#[test]
fn query_across_the_wrap_finds_both_sides() {
    let particles = cell_of(10.0, &[[9.9, 5.0, 5.0], [0.05, 5.0, 5.0]]);
    let periodic = PeriodicParticles::from_cell(&particles);

    let around_a = BoundingBox::around(&particles.position(0), 0.5);
    assert_eq!(particles.select_enclosed(&around_a), vec![0]);
    assert_eq!(periodic.select_enclosed(&around_a), vec![0, 1]);
    assert_eq!(periodic.select_within(0, 0.5), vec![1]);
    assert_eq!(periodic.select_within(1, 0.5), vec![0]);
}

#[test]
fn slab_through_the_x_face_wraps() {
    let particles = cell_of(10.0, &[[9.9, 5.0, 5.0], [0.05, 5.0, 5.0], [5.0, 5.0, 5.0]]);
    let periodic = PeriodicParticles::from_cell(&particles);
    let slab = BoundingBox::new(Vector3::new(9.5, 0.0, 0.0), Vector3::new(10.5, 10.0, 10.0));
    assert_eq!(periodic.select_enclosed(&slab), vec![0, 1]);
}

#[test]
fn suspicious_periods_are_kept_as_given() {
    let _ = env_logger::builder().is_test(true).try_init();
    let particles = cell_of(10.0, &[[9.9, 5.0, 5.0], [0.05, 5.0, 5.0]]);
    let cell = BoundingBox::cube(0.0, 10.0);
    let query = BoundingBox::new(Vector3::new(9.5, 0.0, 0.0), Vector3::new(10.5, 10.0, 10.0));

    let zero = PeriodicParticles::new(&particles, cell, Vector3::new(0.0, 10.0, 10.0));
    assert_eq!(zero.period(), Vector3::new(0.0, 10.0, 10.0));
    let d = zero.diff(0, 1);
    assert!((d[0] + 9.85).abs() < 1e-9, "zero period must not wrap: {d:?}");
    let found = zero.select_enclosed(&query);
    assert!(found.iter().all(|&i| i < particles.len()));
    assert!((zero.number_density() - 2.0 / 1000.0).abs() < 1e-12);

    let wide = PeriodicParticles::new(&particles, cell, Vector3::repeat(12.0));
    assert_eq!(wide.period(), Vector3::repeat(12.0));
    let mut v = Vector3::new(-9.85, 0.0, 0.0);
    periodify(&mut v, &wide.period());
    assert!((v[0] - 2.15).abs() < 1e-9);
    assert!(wide.select_enclosed(&query).contains(&0));
    assert!((wide.number_density() - 2.0 / 1000.0).abs() < 1e-12);
}

#[test]
fn difference_uses_minimum_image() {
    let particles = cell_of(20.0, &[[19.0, 10.0, 10.0], [1.0, 10.0, 10.0]]);
    let periodic = PeriodicParticles::from_cell(&particles);
    assert_eq!(particles.diff(0, 1), Vector3::new(-18.0, 0.0, 0.0));
    assert_eq!(periodic.diff(0, 1), Vector3::new(2.0, 0.0, 0.0));
    assert_eq!(periodic.diff(1, 0), Vector3::new(-2.0, 0.0, 0.0));
    let from = Vector3::new(0.5, 19.5, 10.0);
    assert_eq!(periodic.diff_from(&from, 1), Vector3::new(0.5, -9.5, 0.0));
}

#[test]
fn density_covers_the_whole_primary_cell() {
    let particles = cell_of(
        10.0,
        &[[0.1, 0.1, 0.1], [5.0, 5.0, 5.0], [9.9, 9.9, 9.9], [2.0, 7.0, 3.0]],
    )
    .with_boundary_margin(2.0);
    let periodic = PeriodicParticles::from_cell(&particles);
    assert!((periodic.number_density() - 4.0 / 1000.0).abs() < 1e-12);
    // the bounded container only counts what survives its margin
    assert!((particles.number_density() - 2.0 / 216.0).abs() < 1e-12);
}

#[test]
fn no_particle_is_near_a_boundary() {
    let particles = cell_of(10.0, &[[0.1, 0.1, 0.1], [5.0, 5.0, 5.0], [9.9, 9.9, 9.9]]);
    let periodic = PeriodicParticles::from_cell(&particles);
    assert_eq!(periodic.select_inside(0.0), vec![0, 1, 2]);
    assert_eq!(periodic.select_inside(100.0), vec![0, 1, 2]);
    assert_eq!(particles.select_inside(1.0), vec![1]);
}

#[test]
fn bonds_close_over_the_boundary() {
    let particles = cell_of(10.0, &[[0.2, 5.0, 5.0], [9.9, 5.0, 5.0], [5.0, 5.0, 5.0]]);
    assert!(particles.bonds(0.5).is_empty());
    let periodic = PeriodicParticles::from_cell(&particles);
    assert_eq!(periodic.bonds(0.5), vec![(0, 1)]);
}

#[test]
fn works_through_a_trait_object() {
    let particles = cell_of(10.0, &[[9.95, 9.95, 9.95], [0.02, 0.02, 0.02]]);
    let inner: &dyn ParticleContainer = &particles;
    let periodic = PeriodicParticles::new(inner, BoundingBox::cube(0.0, 10.0), Vector3::repeat(10.0));
    let d = periodic.diff(0, 1);
    assert!((d - Vector3::repeat(0.07)).norm() < 1e-9);
    assert_eq!(periodic.len(), 2);
    assert_eq!(periodic.bounding_box(), BoundingBox::cube(0.0, 10.0));
    assert_eq!(periodic.inner().len(), particles.len());
}

#[test]
fn wrapped_components_stay_in_half_open_interval() {
    let period = Vector3::new(4.0, 6.0, 10.0);
    for &x in &[-2.0, -1.999, 0.0, 1.5, 2.0, 2.001, 3.9] {
        let mut v = Vector3::new(x, x, x);
        periodify(&mut v, &period);
        for a in 0..3 {
            let half = period[a] / 2.0;
            assert!(v[a] > -half && v[a] <= half, "axis {a}: {} from {x}", v[a]);
        }
    }
}
