//! Property tests for the element-wise operations.

use pixarith_core::prelude::*;
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = Kind> {
    prop::sample::select(Kind::NUMERIC.to_vec())
}

/// Arbitrary bytes reinterpreted as `kind`, resident or mapped.
fn array_strategy() -> impl Strategy<Value = ArrayValue> {
    (kind_strategy(), 0usize..64, any::<bool>()).prop_flat_map(|(kind, len, mapped)| {
        let width = kind.width().unwrap_or(1);
        prop::collection::vec(any::<u8>(), len * width).prop_map(move |bytes| {
            let threshold = if mapped { 0 } else { usize::MAX };
            let mut a = ArrayValue::allocate(kind, vec![len], None, threshold).unwrap();
            if kind == Kind::Logical {
                let bools: Vec<u8> = bytes.iter().map(|&b| b & 1).collect();
                a.as_mut_slice::<u8>().unwrap().copy_from_slice(&bools);
            } else {
                let u8_view = cast_bytes(&mut a);
                u8_view.copy_from_slice(&bytes);
            }
            a
        })
    })
}

/// Mutable raw bytes of a non-logical array, through its typed view.
fn cast_bytes(a: &mut ArrayValue) -> &mut [u8] {
    match a.kind() {
        Kind::UInt8 => a.as_mut_slice::<u8>().unwrap(),
        Kind::Int8 => bytemuck_view(a.as_mut_slice::<i8>().unwrap()),
        Kind::UInt16 => bytemuck_view(a.as_mut_slice::<u16>().unwrap()),
        Kind::Int16 => bytemuck_view(a.as_mut_slice::<i16>().unwrap()),
        Kind::UInt32 => bytemuck_view(a.as_mut_slice::<u32>().unwrap()),
        Kind::Int32 => bytemuck_view(a.as_mut_slice::<i32>().unwrap()),
        Kind::UInt64 => bytemuck_view(a.as_mut_slice::<u64>().unwrap()),
        Kind::Int64 => bytemuck_view(a.as_mut_slice::<i64>().unwrap()),
        Kind::Float32 => bytemuck_view(a.as_mut_slice::<f32>().unwrap()),
        Kind::Float64 => bytemuck_view(a.as_mut_slice::<f64>().unwrap()),
        Kind::Logical | Kind::Bit => unreachable!(),
    }
}

fn bytemuck_view<T: bytemuck::Pod>(s: &mut [T]) -> &mut [u8] {
    bytemuck::cast_slice_mut(s)
}

/// Broadcast-compatible shape pairs, single-element shapes included.
fn operand_shapes() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    let single = prop_oneof![Just(Vec::<usize>::new()), Just(vec![1_usize]), Just(vec![1, 1])];
    let many = prop_oneof![
        Just(vec![6_usize]),
        Just(vec![2, 3]),
        Just(vec![3, 2]),
        Just(vec![1, 6]),
    ];
    prop_oneof![
        (single.clone(), single.clone()),
        (single.clone(), many.clone()),
        (many.clone(), single),
        (many.clone(), many),
    ]
}

/// An array of `shape` holding `seed, seed + 1, ...` in `kind`.
fn filled(kind: Kind, shape: Vec<usize>, seed: f64) -> ArrayValue {
    let n = shape.iter().product::<usize>();
    let values: Vec<f64> = (0..n).map(|i| seed + i as f64).collect();
    let a = ArrayValue::from_vec(values, shape).unwrap();
    cast(a, kind).unwrap()
}

fn finite_f64() -> impl Strategy<Value = f64> {
    -1.0e6_f64..1.0e6
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_cast_same_kind_is_identity(a in array_strategy()) {
        let b = cast(&a, a.kind()).unwrap();
        prop_assert_eq!(&b, &a);
        prop_assert_eq!(b.is_mapped(), a.is_mapped());
    }

    #[test]
    fn prop_not_is_boolean(a in array_strategy()) {
        let n = logical_not(&a).unwrap();
        prop_assert_eq!(n.kind(), Kind::Logical);
        prop_assert_eq!(n.shape(), a.shape());
        prop_assert!(n.as_slice::<u8>().unwrap().iter().all(|&x| x <= 1));
    }

    #[test]
    fn prop_double_not_is_logical_cast(a in array_strategy()) {
        let nn = logical_not(logical_not(&a).unwrap()).unwrap();
        prop_assert_eq!(nn, cast(&a, Kind::Logical).unwrap());
    }

    #[test]
    fn prop_pow_two_is_square(v in prop::collection::vec(-3000_i32..3000, 1..50)) {
        let squares: Vec<f64> = v.iter().map(|&x| f64::from(x) * f64::from(x)).collect();
        let a = ArrayValue::from_vec(v.iter().map(|&x| f64::from(x)).collect(), vec![v.len()])
            .unwrap();
        let two = ArrayValue::scalar(2.0_f64).unwrap();
        let r = binary_float_op(BinaryFloatOp::Pow, &a, &two, ReusePolicy::AllocateNew).unwrap();
        prop_assert_eq!(r.to_vec::<f64>().unwrap(), squares);
    }

    #[test]
    fn prop_reuse_matches_allocation(
        v in prop::collection::vec(finite_f64(), 1..50),
        e in -3.0_f64..3.0,
    ) {
        let a = ArrayValue::from_vec(v.clone(), vec![v.len()]).unwrap();
        let exp = ArrayValue::scalar(e).unwrap();
        let fresh =
            binary_float_op(BinaryFloatOp::Pow, &a, &exp, ReusePolicy::AllocateNew).unwrap();
        let reused =
            binary_float_op(BinaryFloatOp::Pow, a, exp, ReusePolicy::ReuseIfEligible).unwrap();
        prop_assert_eq!(fresh.as_bytes(), reused.as_bytes());
    }

    #[test]
    fn prop_right_reuse_matches_allocation(
        (left_shape, right_shape) in operand_shapes(),
        seed in -4.0_f64..4.0,
    ) {
        // A float32 left operand never matches the float64 output, so any
        // reuse has to come from the right.
        let left = filled(Kind::Float32, left_shape, seed);
        let right = filled(Kind::Float64, right_shape, seed * 0.5);
        let fresh =
            binary_float_op(BinaryFloatOp::Atan2, &left, &right, ReusePolicy::AllocateNew)
                .unwrap();
        let reused =
            binary_float_op(BinaryFloatOp::Atan2, left, right, ReusePolicy::ReuseIfEligible)
                .unwrap();
        prop_assert_eq!(reused.kind(), Kind::Float64);
        prop_assert_eq!(reused.shape(), fresh.shape());
        prop_assert_eq!(reused.as_bytes(), fresh.as_bytes());
    }

    #[test]
    fn prop_mapped_and_resident_agree(v in prop::collection::vec(finite_f64(), 1..200)) {
        let resident = MemoryConfig::default();
        let mapped = MemoryConfig::default().with_min_map_size(0);
        let mut outs = Vec::new();
        for config in [resident, mapped] {
            let mut a = config.allocate(Kind::Float64, vec![v.len()], None).unwrap();
            a.as_mut_slice::<f64>().unwrap().copy_from_slice(&v);
            let s = unary_float_op(UnaryFloatOp::Sqrt, a, ReusePolicy::ReuseIfEligible).unwrap();
            outs.push(cast(s, Kind::Int32).unwrap());
        }
        prop_assert!(!outs[0].is_mapped());
        prop_assert!(outs[1].is_mapped());
        prop_assert_eq!(&outs[0], &outs[1]);
    }

    #[test]
    fn prop_where_full_selection_is_cast(
        src in array_strategy(),
        out_kind in kind_strategy(),
    ) {
        let mut out = ArrayValue::zeros(out_kind, vec![src.size()]).unwrap();
        let cond = ArrayValue::logical(&vec![true; src.size()], vec![src.size()]).unwrap();
        where_select(&mut out, &cond, &src).unwrap();
        let expected = cast(&src, out_kind).unwrap();
        prop_assert_eq!(out.as_bytes(), expected.as_bytes());
    }

    #[test]
    fn prop_where_empty_selection_keeps_bytes(a in array_strategy(), fill in array_strategy()) {
        let mut out = a.try_clone().unwrap();
        let cond = ArrayValue::logical(&vec![false; a.size()], vec![a.size()]).unwrap();
        let fill = cast(&fill, Kind::Float64).unwrap();
        let result = where_select(&mut out, &cond, &fill);
        if fill.size() == 1 || fill.size() == a.size() {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(
                matches!(result, Err(ArithError::ShapeMismatch { .. })),
                "expected a shape mismatch"
            );
        }
        prop_assert_eq!(out.as_bytes(), a.as_bytes());
    }

    #[test]
    fn prop_broadcast_shape(n in 0usize..40, scalar_left in any::<bool>()) {
        let many = ArrayValue::zeros(Kind::Float32, vec![n]).unwrap();
        let one = ArrayValue::scalar(1.0_f32).unwrap();
        let r = if scalar_left {
            binary_float_op(BinaryFloatOp::Atan2, &one, &many, ReusePolicy::AllocateNew)
        } else {
            binary_float_op(BinaryFloatOp::Atan2, &many, &one, ReusePolicy::AllocateNew)
        }
        .unwrap();
        if n == 1 && scalar_left {
            prop_assert_eq!(r.shape(), &[] as &[usize]);
        } else {
            prop_assert_eq!(r.shape(), &[n]);
        }
    }
}
