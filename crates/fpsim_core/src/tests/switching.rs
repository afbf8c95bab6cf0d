//! Categorical sampling and switching checkpoints

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::locations;
use crate::model::{MatrixFamily, MethodId, Person};
use crate::switching::{MethodSwitcher, sample_categorical, sample_weights};

#[test]
fn test_sample_weights_degenerate() {
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..50 {
        assert_eq!(sample_weights(&[0.0, 1.0, 0.0], &mut rng), 1);
    }
}

#[test]
fn test_sample_weights_covers_support() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut seen = [false; 3];
    for _ in 0..1_000 {
        seen[sample_weights(&[0.3, 0.3, 0.4], &mut rng)] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_sample_categorical_rejects_bad_row() {
    let mut rng = SmallRng::seed_from_u64(0);
    let err = sample_categorical(&[0.5, 0.3], MatrixFamily::Annual, "all", 0, &mut rng);
    assert!(err.is_err(), "a row summing to 0.8 must be rejected");
}

#[test]
fn test_sample_categorical_deterministic() {
    let row = [0.2, 0.5, 0.3];
    let draw = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..20)
            .map(|_| sample_categorical(&row, MatrixFamily::Annual, "all", 0, &mut rng).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(draw(3), draw(3));
}

#[test]
fn test_checkpoint_uses_postpartum_vector() {
    // pp0to1 puts everything on method B regardless of the current method
    let mut pars = locations::make_pars("test").unwrap();
    *pars.methods.matrices.vector_mut(0) = vec![0.0, 0.0, 1.0];

    let switcher = MethodSwitcher::new(&pars.methods, 2005.0).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut person = Person::new_female(25.0, 16.0, 1.0);
    person.method = MethodId(1);
    person.postpartum = Some(0);

    switcher.checkpoint(&mut person, 0, &mut rng).unwrap();
    assert_eq!(person.method, MethodId(2));
}

#[test]
fn test_checkpoint_uses_current_method_row() {
    // Annual matrix where method A continues with certainty
    let mut pars = locations::make_pars("test").unwrap();
    let matrix = pars.methods.matrices.matrix_mut(MatrixFamily::Annual, 0);
    *matrix.row_mut(1) = vec![0.0, 1.0, 0.0];

    let switcher = MethodSwitcher::new(&pars.methods, 2005.0).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut person = Person::new_female(25.0, 16.0, 1.0);
    person.method = MethodId(1);

    for _ in 0..10 {
        switcher.checkpoint(&mut person, 0, &mut rng).unwrap();
        assert_eq!(person.method, MethodId(1));
    }
}

#[test]
fn test_corrupted_row_is_fatal() {
    // Bypass the validated edit path and corrupt a row directly; building
    // the year's tables must fail rather than silently renormalize
    let mut pars = locations::make_pars("test").unwrap();
    let matrix = pars.methods.matrices.matrix_mut(MatrixFamily::Annual, 0);
    *matrix.row_mut(0) = vec![0.5, 0.1, 0.1];

    assert!(MethodSwitcher::new(&pars.methods, 2005.0).is_err());
}
