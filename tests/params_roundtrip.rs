use insta::assert_snapshot;
use proptest::prelude::*;
use rpp_ood::config::{OodParams, OodParamsBuilder, ParamsError, PARAM_DIGEST_DOMAIN_TAG};

fn arb_builder() -> impl Strategy<Value = OodParamsBuilder> {
    (1u32..=20, 1usize..=64, 0usize..=64, 0u32..=5, 0usize..=16).prop_map(
        |(log_length, trace_width, num_assertions, log_blowup, num_public_inputs)| {
            OodParamsBuilder {
                trace_length: 1 << log_length,
                trace_width,
                num_assertions,
                ce_blowup_factor: 1 << log_blowup,
                num_public_inputs,
            }
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn json_roundtrip_preserves_params(builder in arb_builder()) {
        let params = builder.build().unwrap();
        let json = params.to_json().unwrap();
        let decoded = OodParams::from_json(&json).unwrap();
        prop_assert_eq!(decoded, params);
        prop_assert_eq!(decoded.param_digest(), params.param_digest());
        let via_serde: OodParams = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(via_serde, params);
    }

    #[test]
    fn derived_bit_widths_bound_exponents(builder in arb_builder()) {
        let params = builder.build().unwrap();
        prop_assert!(params.max_degree() < 1u64 << params.degree_bits());
        prop_assert!((params.trace_length() as u64) < 1u64 << params.step_bits());
    }
}

#[test]
fn serde_rejects_invalid_documents() {
    let json = r#"{
        "trace_length": 6,
        "trace_width": 1,
        "num_assertions": 2,
        "ce_blowup_factor": 2,
        "num_public_inputs": 2
    }"#;
    let err = serde_json::from_str::<OodParams>(json).unwrap_err();
    assert!(err.to_string().contains("trace length 6 is not a power of two"));
    assert_eq!(
        OodParams::from_json(json),
        Err(ParamsError::TraceLengthNotPowerOfTwo { got: 6 })
    );
}

#[test]
fn default_params_json_snapshot() {
    let json = OodParamsBuilder::new().build().unwrap().to_json().unwrap();
    assert_snapshot!(json, @r###"
    {
      "trace_length": 8,
      "trace_width": 1,
      "num_assertions": 2,
      "ce_blowup_factor": 2,
      "num_public_inputs": 2
    }
    "###);
}

#[test]
fn digest_is_domain_separated() {
    let params = OodParamsBuilder::new().build().unwrap();
    let mut hasher = blake3::Hasher::new();
    hasher.update(PARAM_DIGEST_DOMAIN_TAG);
    for field in [8u64, 1, 2, 2, 2] {
        hasher.update(&field.to_le_bytes());
    }
    assert_eq!(params.param_digest(), *hasher.finalize().as_bytes());
}
