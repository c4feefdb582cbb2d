/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use muon_vibaverage::schemes::{DisplacementScheme, IndependentModeScheme, ModeCombination, SchemeOptions};
use muon_vibaverage::utils::{HarmonicOscillator, ThermalModel};
use muon_vibaverage::{AtomicMasses, PhononData};
use ndarray::{Array1, Array3};
use num_complex::Complex64;
use rstest::rstest;

const FREQUENCY: f64 = 1500.0;

/// Two atoms; only mode 5 vibrates, moving the muon (atom 1) along x
fn single_mode_phonons() -> PhononData {
    let mut evecs = Array3::zeros((6, 2, 3));
    for m in 0..5 {
        evecs[[m, 0, m % 3]] = Complex64::new(1.0, 0.0);
    }
    evecs[[5, 1, 0]] = Complex64::new(1.0, 0.0);
    let mut freqs = Array1::zeros(6);
    freqs[5] = FREQUENCY;
    let masses = AtomicMasses::with_muon(&[28.085, 1.008], Some(1)).unwrap();
    PhononData::new(freqs, evecs, masses).unwrap()
}

/// Four atoms with a spread of frequencies and mixed eigenvectors
fn lattice_phonons() -> PhononData {
    let atoms = 4;
    let mut evecs = Array3::zeros((3 * atoms, atoms, 3));
    for m in 0..3 * atoms {
        for a in 0..atoms {
            for k in 0..3 {
                let phase = (m * 7 + a * 3 + k) as f64;
                evecs[[m, a, k]] = Complex64::new(phase.sin(), 0.5 * phase.cos());
            }
        }
    }
    let freqs = Array1::from_shape_fn(3 * atoms, |m| if m < 3 { 0.01 } else { 150.0 * m as f64 });
    let masses = AtomicMasses::with_muon(&[24.305, 15.999, 15.999, 1.008], None).unwrap();
    PhononData::new(freqs, evecs, masses).unwrap()
}

#[test]
fn test_symmetric_grid_on_single_mode() {
    let mut scheme = IndependentModeScheme::new(single_mode_phonons(), &SchemeOptions::default()).unwrap();
    scheme.generate_displacements(5, 0.0).unwrap();

    let sigma = HarmonicOscillator::new(FREQUENCY, scheme.phonons().masses().target_mass()).zero_point_sigma();
    assert_eq!(scheme.configuration_count(), 5);

    let expected = [-3.0, -1.5, 0.0, 1.5, 3.0];
    for (d, factor) in scheme.displacements().iter().zip(expected) {
        assert_relative_eq!(d[[1, 0]], factor * sigma, max_relative = 1e-12);
        assert_eq!(d[[1, 1]], 0.0);
        assert_eq!(d[[1, 2]], 0.0);
        assert!(d.row(0).iter().all(|&x| x == 0.0));
    }

    assert_relative_eq!(scheme.weights().sum(), 1.0, epsilon = 1e-12);
    // Symmetric grid, symmetric weights, peaked at equilibrium
    let w = scheme.weights();
    assert_relative_eq!(w[0], w[4], epsilon = 1e-15);
    assert_relative_eq!(w[1], w[3], epsilon = 1e-15);
    assert!(w[2] > w[1] && w[1] > w[0]);
    assert_relative_eq!(w[1] / w[2], (-1.125f64).exp(), max_relative = 1e-12);
}

#[rstest]
#[case(2, ModeCombination::Mean)]
#[case(7, ModeCombination::Additive)]
#[case(20, ModeCombination::Mean)]
#[case(21, ModeCombination::Additive)]
fn test_zero_temperature_weights_are_normalized_gaussians(
    #[case] grid_n: usize,
    #[case] combination: ModeCombination,
) {
    let options = SchemeOptions {
        combination,
        ..SchemeOptions::default()
    };
    let mut scheme = IndependentModeScheme::new(lattice_phonons(), &options).unwrap();
    scheme.generate_displacements(grid_n, 500.0).unwrap();
    scheme.recompute_weights(0.0).unwrap();

    let modes = scheme.sampled_modes();
    assert_eq!(modes.len(), 9);
    assert_eq!(scheme.configuration_count(), modes.len() * grid_n);

    let positions = scheme.grid_positions();
    let mode_weights = scheme.mode_weights().to_vec();
    for (j, chunk) in mode_weights.chunks(grid_n).enumerate() {
        assert_relative_eq!(chunk.iter().sum::<f64>(), 1.0, epsilon = 1e-9);

        // Ratios follow the ground state Gaussian of the mode
        let x = positions[j];
        let first = chunk[0];
        for (i, &w) in chunk.iter().enumerate() {
            let variance = {
                let c = scheme.phonons().target_component(modes[j]);
                let weight = c.iter().map(|v| v * v).sum::<f64>();
                let mass = scheme.phonons().masses().target_mass() / weight;
                HarmonicOscillator::new(scheme.phonons().frequency(modes[j]), mass).mean_square_displacement(0.0)
            };
            let expected = (-(x[i] * x[i] - x[0] * x[0]) / (2.0 * variance)).exp();
            assert_relative_eq!(w / first, expected, max_relative = 1e-9);
        }
    }
    assert_relative_eq!(scheme.weights().sum(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_grid_widens_with_displacement_temperature() {
    let mut scheme = IndependentModeScheme::new(single_mode_phonons(), &SchemeOptions::default()).unwrap();
    scheme.generate_displacements(5, 0.0).unwrap();
    let cold = scheme.displacements()[4][[1, 0]];
    scheme.generate_displacements(5, 3000.0).unwrap();
    let hot = scheme.displacements()[4][[1, 0]];
    assert!(hot > cold);
}

#[test]
fn test_only_the_muon_moves() {
    let mut scheme = IndependentModeScheme::new(lattice_phonons(), &SchemeOptions::default()).unwrap();
    scheme.generate_displacements(5, 100.0).unwrap();
    for d in scheme.displacements() {
        for a in 0..3 {
            assert!(d.row(a).iter().all(|&x| x == 0.0));
        }
    }
}
