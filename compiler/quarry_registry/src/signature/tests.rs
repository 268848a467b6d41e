use super::*;
use pretty_assertions::assert_eq;
use quarry_ir::Primitive;

#[allow(
    clippy::unnecessary_wraps,
    reason = "native entry points share the fallible signature"
)]
fn first(args: &[Value]) -> Result<Value, String> {
    Ok(args.first().cloned().unwrap_or(Value::Null))
}

fn count(args: &[Value]) -> Result<Value, String> {
    i64::try_from(args.len())
        .map(Value::Int)
        .map_err(|e| e.to_string())
}

const VALUE: DeclaredType = DeclaredType::VALUE;
const VALUES: DeclaredType = DeclaredType::VALUE_ARRAY;
const INT: DeclaredType = DeclaredType::Value(ValueClass::Int);
const HOST_INT: DeclaredType = DeclaredType::Primitive(Primitive::Int);

fn candidate(params: &'static [DeclaredType], returns: DeclaredType) -> NativeCandidate {
    NativeCandidate::new("f", params, returns, first)
}

// === Filter ===

#[test]
fn accepts_fixed_value_params() {
    assert!(SignatureFilter::is_compatible(&candidate(&[], VALUE)));
    assert!(SignatureFilter::is_compatible(&candidate(&[VALUE], VALUE)));
    assert!(SignatureFilter::is_compatible(&candidate(
        &[VALUE, VALUE],
        VALUE
    )));
}

#[test]
fn accepts_value_subclasses() {
    assert!(SignatureFilter::is_compatible(&candidate(&[INT], INT)));
    assert!(SignatureFilter::is_compatible(&candidate(
        &[DeclaredType::Value(ValueClass::Text), VALUE],
        DeclaredType::Value(ValueClass::Array)
    )));
}

#[test]
fn accepts_trailing_variadic() {
    assert!(SignatureFilter::is_compatible(
        &candidate(&[VALUES], VALUE).variadic()
    ));
    assert!(SignatureFilter::is_compatible(
        &candidate(&[VALUE, VALUES], VALUE).variadic()
    ));
}

#[test]
fn accepts_catch_all_array() {
    assert!(SignatureFilter::is_compatible(&candidate(&[VALUES], VALUE)));
    assert!(SignatureFilter::is_compatible(&candidate(
        &[DeclaredType::Array(&INT)],
        VALUE
    )));
}

#[test]
fn rejects_non_value_return() {
    assert!(!SignatureFilter::is_compatible(&candidate(
        &[VALUE],
        HOST_INT
    )));
    assert!(!SignatureFilter::is_compatible(&candidate(
        &[VALUE],
        VALUES
    )));
    assert!(!SignatureFilter::is_compatible(&candidate(
        &[VALUES],
        DeclaredType::Primitive(Primitive::Unit)
    )));
}

#[test]
fn rejects_primitive_params() {
    assert!(!SignatureFilter::is_compatible(&candidate(
        &[HOST_INT],
        VALUE
    )));
    assert!(!SignatureFilter::is_compatible(&candidate(
        &[VALUE, HOST_INT],
        VALUE
    )));
}

#[test]
fn rejects_misplaced_arrays() {
    // Array not in final position, even when variadic.
    assert!(!SignatureFilter::is_compatible(
        &candidate(&[VALUES, VALUE], VALUE).variadic()
    ));
    // Trailing array without the variadic flag.
    assert!(!SignatureFilter::is_compatible(&candidate(
        &[VALUE, VALUES],
        VALUE
    )));
    // Two arrays.
    assert!(!SignatureFilter::is_compatible(
        &candidate(&[VALUES, VALUES], VALUE).variadic()
    ));
    // Arrays of host scalars or nested arrays.
    assert!(!SignatureFilter::is_compatible(&candidate(
        &[DeclaredType::Array(&HOST_INT)],
        VALUE
    )));
    assert!(!SignatureFilter::is_compatible(&candidate(
        &[DeclaredType::Array(&VALUES)],
        VALUE
    )));
}

#[test]
fn compatible_keeps_order() {
    let table = [
        NativeCandidate::new("a", &[VALUE], VALUE, first),
        NativeCandidate::new("b", &[HOST_INT], VALUE, first),
        NativeCandidate::new("c", &[VALUES], VALUE, first),
    ];
    let names: Vec<_> = SignatureFilter::compatible(&table)
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["a", "c"]);
}

// === Signatures ===

#[test]
fn from_candidate_maps_shapes() {
    let Some(fixed) = CallableSignature::from_candidate(&candidate(&[VALUE, INT], VALUE)) else {
        panic!("fixed candidate should convert");
    };
    assert_eq!(
        fixed.params(),
        &[
            ParamKind::Fixed(ValueClass::Any),
            ParamKind::Fixed(ValueClass::Int)
        ]
    );
    assert!(!fixed.is_variadic());
    assert_eq!(fixed.fixed_arity(), 2);

    let Some(variadic) =
        CallableSignature::from_candidate(&candidate(&[INT, VALUES], VALUE).variadic())
    else {
        panic!("variadic candidate should convert");
    };
    assert_eq!(
        variadic.params(),
        &[
            ParamKind::Fixed(ValueClass::Int),
            ParamKind::Variadic(ValueClass::Any)
        ]
    );
    assert_eq!(variadic.fixed_arity(), 1);

    let Some(catch_all) = CallableSignature::from_candidate(&candidate(&[VALUES], VALUE)) else {
        panic!("catch-all candidate should convert");
    };
    assert_eq!(catch_all.params(), &[ParamKind::Variadic(ValueClass::Any)]);

    let host = candidate(&[HOST_INT], VALUE);
    assert!(CallableSignature::from_candidate(&host).is_none());
}

#[test]
fn variadic_must_be_last() {
    assert!(CallableSignature::new(
        vec![
            ParamKind::Variadic(ValueClass::Any),
            ParamKind::Fixed(ValueClass::Any)
        ],
        ValueClass::Any,
        first,
    )
    .is_none());
    assert!(CallableSignature::new(
        vec![
            ParamKind::Fixed(ValueClass::Any),
            ParamKind::Variadic(ValueClass::Any)
        ],
        ValueClass::Any,
        first,
    )
    .is_some());
}

#[test]
fn accepts_checks_arity_and_classes() {
    let Some(sig) = CallableSignature::from_candidate(&candidate(&[INT, VALUES], VALUE).variadic())
    else {
        panic!("variadic candidate should convert");
    };

    assert!(!sig.accepts(&[]));
    assert!(sig.accepts(&[Value::Int(1)]));
    assert!(sig.accepts(&[Value::Int(1), Value::Null, Value::text("x")]));
    assert!(!sig.accepts(&[Value::text("1")]));

    let Some(pair) = CallableSignature::from_candidate(&candidate(&[VALUE, VALUE], VALUE)) else {
        panic!("fixed candidate should convert");
    };
    assert!(pair.accepts(&[Value::Null, Value::Null]));
    assert!(!pair.accepts(&[Value::Null]));
    assert!(!pair.accepts(&[Value::Null, Value::Null, Value::Null]));
}

#[test]
fn invoke_passes_flattened_args() {
    let Some(sig) = CallableSignature::from_candidate(
        &NativeCandidate::new("count", &[VALUES], VALUE, count).variadic(),
    ) else {
        panic!("count should convert");
    };
    assert_eq!(
        sig.invoke(&[Value::Null, Value::Null, Value::Null]),
        Ok(Value::Int(3))
    );
}

#[test]
fn test_display() {
    let Some(sig) = CallableSignature::from_candidate(&candidate(&[INT, VALUES], VALUE).variadic())
    else {
        panic!("variadic candidate should convert");
    };
    assert_eq!(sig.to_string(), "(int, value...) -> value");
}

// === Property tests ===

mod proptest_filter {
    use super::super::*;
    use proptest::prelude::*;

    fn fixed_value() -> impl Strategy<Value = DeclaredType> {
        prop_oneof![
            Just(DeclaredType::VALUE),
            Just(DeclaredType::Value(ValueClass::Int)),
            Just(DeclaredType::Value(ValueClass::Text)),
            Just(DeclaredType::Value(ValueClass::Object)),
        ]
    }

    #[allow(
        clippy::unnecessary_wraps,
        reason = "native entry points share the fallible signature"
    )]
    fn noop(_: &[Value]) -> Result<Value, String> {
        Ok(Value::Null)
    }

    fn leak(params: Vec<DeclaredType>) -> &'static [DeclaredType] {
        Box::leak(params.into_boxed_slice())
    }

    proptest! {
        #[test]
        fn all_value_params_are_compatible(
            params in proptest::collection::vec(fixed_value(), 0..6),
        ) {
            let params = leak(params);
            let candidate = NativeCandidate::new("f", params, DeclaredType::VALUE, noop);
            prop_assert!(SignatureFilter::is_compatible(&candidate));

            let Some(sig) = CallableSignature::from_candidate(&candidate) else {
                return Err(TestCaseError::fail("compatible candidate did not convert"));
            };
            prop_assert_eq!(sig.params().len(), params.len());
            prop_assert!(!sig.is_variadic());
        }

        #[test]
        fn trailing_array_needs_variadic_flag(
            params in proptest::collection::vec(fixed_value(), 1..6),
        ) {
            let mut params = params;
            params.push(DeclaredType::VALUE_ARRAY);
            let params = leak(params);
            let candidate = NativeCandidate::new("f", params, DeclaredType::VALUE, noop);

            prop_assert!(!SignatureFilter::is_compatible(&candidate));
            prop_assert!(SignatureFilter::is_compatible(&candidate.variadic()));
        }

        #[test]
        fn host_scalar_anywhere_is_rejected(
            params in proptest::collection::vec(fixed_value(), 0..5),
            position in 0usize..5,
        ) {
            let mut params = params;
            let position = position.min(params.len());
            params.insert(position, DeclaredType::Primitive(quarry_ir::Primitive::Str));
            let candidate = NativeCandidate::new("f", leak(params), DeclaredType::VALUE, noop);

            prop_assert!(!SignatureFilter::is_compatible(&candidate));
            prop_assert!(!SignatureFilter::is_compatible(&candidate.variadic()));
        }
    }
}
