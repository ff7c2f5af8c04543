use super::*;
use crate::effects::field::FieldConfig;
use crate::foundation::core::Fps;
use crate::schedule::scheduler::VirtualScheduler;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn setup(count: i64) -> (Rc<VirtualScheduler>, Rc<dyn Scheduler>, ParticleField, StdRng) {
    let v = VirtualScheduler::shared(Fps::default());
    let d: Rc<dyn Scheduler> = v.clone();
    let mut rng = StdRng::seed_from_u64(42);
    let field = ParticleField::generate(
        &FieldConfig {
            count,
            ..FieldConfig::default()
        },
        &mut rng,
    );
    (v, d, field, rng)
}

fn particle(opacity: f64) -> Particle {
    Particle {
        id: 7,
        x: 50.0,
        y: 50.0,
        size: 2.0,
        opacity,
    }
}

#[test]
fn motion_follows_keyframes_and_repeats() {
    let m = ParticleMotion::new(particle(0.5), 10_000, &DriftConfig::default());
    let start = m.pose(0);
    assert_eq!(start.offset, Vec2::ZERO);
    assert_eq!(start.opacity, 0.5);

    let mid = m.pose(5_000);
    assert!((mid.offset.y + 20.0).abs() < 1e-9);
    assert!((mid.offset.x - 10.0).abs() < 1e-9);
    assert!((mid.opacity - 0.15).abs() < 1e-9);

    assert_eq!(m.pose(10_000), start);
    assert_eq!(m.pose(12_345), m.pose(2_345));
}

#[test]
fn motion_stays_within_envelope() {
    let m = ParticleMotion::new(particle(0.4), 13_000, &DriftConfig::default());
    for t in (0..26_000).step_by(97) {
        let p = m.pose(t);
        assert!((-20.0..=0.0).contains(&p.offset.y));
        assert!((0.0..=10.0).contains(&p.offset.x));
        assert!(p.opacity <= 0.4 + 1e-12 && p.opacity >= 0.12 - 1e-12);
    }
}

#[test]
fn cycle_lengths_are_drawn_per_particle() {
    let (_v, d, field, mut rng) = setup(50);
    let anim = LoopAnimator::mount(&field, &DriftConfig::default(), &d, &mut rng);
    let cycles: Vec<u64> = anim.motions().map(|m| m.cycle_ms).collect();
    assert_eq!(cycles.len(), 50);
    assert!(cycles.iter().all(|c| (10_000..=20_000).contains(c)));
    let first = cycles[0];
    assert!(cycles.iter().any(|c| *c != first));
}

#[test]
fn frames_update_poses() {
    let (v, d, field, mut rng) = setup(5);
    let anim = LoopAnimator::mount(&field, &DriftConfig::default(), &d, &mut rng);
    assert_eq!(v.pending(), 5);
    let before = anim.poses();
    v.advance_by(3_000);
    let after = anim.poses();
    assert_eq!(before.len(), after.len());
    assert!(before.iter().zip(&after).all(|(a, b)| a.id == b.id && a != b));
}

#[test]
fn unmount_stops_every_loop() {
    let (v, d, field, mut rng) = setup(50);
    let mut anim = LoopAnimator::mount(&field, &DriftConfig::default(), &d, &mut rng);
    v.advance_by(100);
    anim.unmount();
    assert!(!anim.is_mounted());
    assert_eq!(v.pending(), 0);
    let frozen = anim.poses();
    let calls = v.invocations();
    v.advance_by(5_000);
    assert_eq!(v.invocations(), calls);
    assert_eq!(anim.poses(), frozen);
    anim.unmount();
}

#[test]
fn dropping_animator_releases_subscriptions() {
    let (v, d, field, mut rng) = setup(10);
    let anim = LoopAnimator::mount(&field, &DriftConfig::default(), &d, &mut rng);
    assert_eq!(v.pending(), 10);
    drop(anim);
    assert_eq!(v.pending(), 0);
}

#[test]
fn empty_field_mounts_nothing() {
    let (v, d, field, mut rng) = setup(0);
    let anim = LoopAnimator::mount(&field, &DriftConfig::default(), &d, &mut rng);
    assert!(anim.is_empty());
    assert_eq!(v.pending(), 0);
}

#[test]
fn config_validation() {
    assert!(DriftConfig::default().validate().is_ok());
    let bad = DriftConfig {
        fade: 1.5,
        ..DriftConfig::default()
    };
    assert!(bad.validate().is_err());
    let bad = DriftConfig {
        cycle_ms: Span::new(0.0, 0.0),
        ..DriftConfig::default()
    };
    assert!(bad.validate().is_err());
}
