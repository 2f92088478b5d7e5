use super::*;

#[test]
fn fnv_hash_is_incremental() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"pixmorph");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"pix");
    b.write_bytes(b"morph");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn hash01_is_deterministic_and_bounded() {
    for i in 0..1000u64 {
        let v = hash01(7, i, 3);
        assert!((0.0..1.0).contains(&v));
        assert_eq!(v, hash01(7, i, 3));
    }
    assert_ne!(hash01(7, 1, 3), hash01(8, 1, 3));
}

#[test]
fn hash_unit_vec3_is_normalized() {
    for i in 0..256u64 {
        let v = hash_unit_vec3(11, i, 0);
        assert!((v.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn smoothstep_endpoints() {
    assert_eq!(smoothstep01(0.0), 0.0);
    assert_eq!(smoothstep01(1.0), 1.0);
    assert_eq!(smoothstep01(-3.0), 0.0);
    assert!((smoothstep01(0.5) - 0.5).abs() < 1e-6);
}
