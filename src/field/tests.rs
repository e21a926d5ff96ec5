use super::prime_field::{FieldDeserializeError, FieldElement, FieldElementOps, Fp, PrimeField};

type F97 = Fp<97, 5>;

#[test]
fn add_mul_inv_laws_ok() {
    let a = FieldElement::from(5u64);
    let b = FieldElement::from(7u64);

    let sum = a.add(&b);
    assert_eq!(sum, FieldElement::from(12u64));

    let neg_a = a.neg();
    assert_eq!(a.add(&neg_a), FieldElement::ZERO);

    let product = a.mul(&b);
    assert_eq!(product, FieldElement::from(35u64));

    let inv_b = b.inv().expect("inverse exists for non-zero element");
    let product = b.mul(&inv_b);
    assert_eq!(product, FieldElement::ONE);
}

#[test]
fn small_field_wraps_modulus() {
    let a = F97::new(90);
    let b = F97::new(10);
    assert_eq!(a.add(&b), F97::new(3));
    assert_eq!(b.sub(&a), F97::new(17));
    assert_eq!(F97::new(5).sub(&F97::new(96)), F97::new(6));
    assert_eq!(F97::new(4).inv(), Some(F97::new(73)));
    assert_eq!(F97::new(194), F97::ZERO);
}

#[test]
fn zero_has_no_inverse() {
    assert_eq!(FieldElement::ZERO.inv(), None);
    assert_eq!(F97::new(97).inv(), None);
}

#[test]
fn goldilocks_wide_products_reduce() {
    let max = FieldElement::new(GOLDILOCKS_MAX);
    assert_eq!(max.mul(&max), FieldElement::ONE);
    assert_eq!(max.add(&FieldElement::ONE), FieldElement::ZERO);
}

const GOLDILOCKS_MAX: u64 = 0xffff_ffff_0000_0000;

#[test]
fn pow_fermat_inverse_ok() {
    let element = FieldElement::from(19u64);
    let fermat_inverse = element.pow(FieldElement::MODULUS - 2);
    let inv = element.inv().expect("inverse exists for non-zero element");
    assert_eq!(fermat_inverse, inv);
    assert_eq!(element.mul(&fermat_inverse), FieldElement::ONE);
}

#[test]
fn roots_of_unity_have_exact_order() {
    let root = F97::root_of_unity(2).expect("2 divides 96");
    assert_eq!(root, F97::new(96));
    let root = F97::root_of_unity(16).expect("16 divides 96");
    assert_eq!(root.pow(16), F97::ONE);
    assert_ne!(root.pow(8), F97::ONE);
    assert_eq!(F97::root_of_unity(64), None);

    let root = FieldElement::root_of_unity(1 << 20).expect("two-adic subgroup");
    assert_eq!(root.pow(1 << 20), FieldElement::ONE);
    assert_ne!(root.pow(1 << 19), FieldElement::ONE);
}

#[test]
fn serde_json_roundtrip_ok() {
    let element = FieldElement::from(42u64);
    let encoded = serde_json::to_string(&element).expect("serialize");
    assert_eq!(encoded, "42");
    let decoded: FieldElement = serde_json::from_str(&encoded).expect("canonical roundtrip");
    assert_eq!(decoded, element);
}

#[test]
fn reject_noncanonical_json_err() {
    let err = serde_json::from_str::<F97>("97").expect_err("non-canonical value");
    assert!(err
        .to_string()
        .contains("field element deserialization failed: non-canonical input"));
    assert_eq!(
        FieldDeserializeError::FieldDeserializeNonCanonical.to_string(),
        "field element deserialization failed: non-canonical input"
    );
    assert_eq!(F97::from_canonical(97), None);
    assert_eq!(F97::from_canonical(96), Some(F97::new(96)));
}
