
use _fixtures::{bump, honest_proof, in_trace_domain, HonestProof};
use proptest::prelude::*;
use rpp_ood::air::example::{FibonacciAir, LfsrAir};
use rpp_ood::field::{FieldElement, PrimeField};
use rpp_ood::ood::{OodError, OodVerifier};

#[derive(Debug, Clone, Copy)]
enum Tamper {
    TransitionC0,
    TransitionC1,
    BoundaryC0,
    BoundaryC1,
    TransitionResidue,
    BoundaryResidue,
    Channel,
    Point,
    Generator,
}

fn tamper_strategy() -> impl Strategy<Value = Tamper> {
    prop_oneof![
        Just(Tamper::TransitionC0),
        Just(Tamper::TransitionC1),
        Just(Tamper::BoundaryC0),
        Just(Tamper::BoundaryC1),
        Just(Tamper::TransitionResidue),
        Just(Tamper::BoundaryResidue),
        Just(Tamper::Channel),
        Just(Tamper::Point),
        Just(Tamper::Generator),
    ]
}

fn lfsr_proof(seed: u64, z: u64, coeff_seed: u64) -> Option<HonestProof<FieldElement>> {
    let z = FieldElement::new(z);
    // z = 0 zeroes every degree adjustment, hiding c1 mutations.
    if z.is_zero() || in_trace_domain(z, 8) {
        return None;
    }
    let air = LfsrAir::new(8).ok()?;
    let trace = air.generate_trace(FieldElement::new(seed)).ok()?;
    let public_inputs = air.public_inputs(&trace).ok()?;
    Some(honest_proof(&air, &trace, public_inputs, 2, z, coeff_seed))
}

fn apply(proof: &mut HonestProof<FieldElement>, tamper: Tamper, index: usize, delta: u64) {
    let inputs = &mut proof.evaluated;
    match tamper {
        Tamper::TransitionC0 => {
            let ix = index % inputs.transition_coeffs.len();
            inputs.transition_coeffs[ix].c0 = bump(inputs.transition_coeffs[ix].c0, delta);
        }
        Tamper::TransitionC1 => {
            let ix = index % inputs.transition_coeffs.len();
            inputs.transition_coeffs[ix].c1 = bump(inputs.transition_coeffs[ix].c1, delta);
        }
        Tamper::BoundaryC0 => {
            let ix = index % inputs.boundary_coeffs.len();
            inputs.boundary_coeffs[ix].c0 = bump(inputs.boundary_coeffs[ix].c0, delta);
        }
        Tamper::BoundaryC1 => {
            let ix = index % inputs.boundary_coeffs.len();
            inputs.boundary_coeffs[ix].c1 = bump(inputs.boundary_coeffs[ix].c1, delta);
        }
        Tamper::TransitionResidue => {
            let ix = index % inputs.transition.residues.len();
            inputs.transition.residues[ix] = bump(inputs.transition.residues[ix], delta);
        }
        Tamper::BoundaryResidue => {
            let ix = index % inputs.boundary.assertions.len();
            let assertion = &mut inputs.boundary.assertions[ix];
            assertion.residue = bump(assertion.residue, delta);
        }
        Tamper::Channel => {
            let ix = index % inputs.channel_ood_evaluations.len();
            inputs.channel_ood_evaluations[ix] = bump(inputs.channel_ood_evaluations[ix], delta);
        }
        Tamper::Point => inputs.z = bump(inputs.z, delta),
        Tamper::Generator => inputs.g_trace = bump(inputs.g_trace, delta),
    }
}

fn is_flagged(err: &OodError) -> bool {
    err.is_rejection() || err.is_degenerate_point()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn proptest_single_mutation_is_rejected(
        seed in any::<u64>(),
        z in any::<u64>(),
        coeff_seed in any::<u64>(),
        tamper in tamper_strategy(),
        index in 0usize..4,
        delta in any::<u64>(),
    ) {
        let proof = lfsr_proof(seed, z, coeff_seed);
        prop_assume!(proof.is_some());
        let mut proof = proof.unwrap();
        let verifier = OodVerifier::new(proof.params);
        prop_assert!(verifier.verify(&proof.evaluated).is_ok());

        apply(&mut proof, tamper, index, delta);
        let err = verifier.verify(&proof.evaluated).unwrap_err();
        prop_assert!(is_flagged(&err), "{tamper:?} produced {err:?}");
    }

    #[test]
    fn proptest_frame_mutation_is_rejected(
        z in any::<u64>(),
        column in 0usize..2,
        next_row in any::<bool>(),
        delta in any::<u64>(),
    ) {
        let z = FieldElement::new(z);
        prop_assume!(!in_trace_domain(z, 8));
        let air = FibonacciAir::new(8).unwrap();
        let trace = air.generate_trace::<FieldElement>().unwrap();
        let public_inputs = air.public_inputs(&trace).unwrap();
        let mut proof = honest_proof(&air, &trace, public_inputs, 2, z, 3);
        let verifier = OodVerifier::new(proof.params);
        prop_assert!(verifier.verify_with_air(&air, &proof.frame_inputs).is_ok());

        let frame = &proof.frame_inputs.frame;
        let (mut current, mut next) = (frame.current().to_vec(), frame.next().to_vec());
        if next_row {
            next[column] = bump(next[column], delta);
        } else {
            current[column] = bump(current[column], delta);
        }
        proof.frame_inputs.frame = rpp_ood::air::EvaluationFrame::new(current, next).unwrap();
        let err = verifier.verify_with_air(&air, &proof.frame_inputs).unwrap_err();
        prop_assert!(is_flagged(&err));
    }

    #[test]
    fn proptest_public_input_mutation_is_rejected(
        seed in any::<u64>(),
        z in any::<u64>(),
        which in 0usize..2,
        delta in any::<u64>(),
    ) {
        let z = FieldElement::new(z);
        prop_assume!(!in_trace_domain(z, 8));
        let air = LfsrAir::new(8).unwrap();
        let trace = air.generate_trace(FieldElement::new(seed)).unwrap();
        let public_inputs = air.public_inputs(&trace).unwrap();
        let mut proof = honest_proof(&air, &trace, public_inputs, 2, z, 9);
        proof.frame_inputs.public_inputs[which] = bump(proof.frame_inputs.public_inputs[which], delta);
        let err = OodVerifier::new(proof.params)
            .verify_with_air(&air, &proof.frame_inputs)
            .unwrap_err();
        prop_assert!(err.is_rejection());
    }
}
