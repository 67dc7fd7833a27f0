//! Property-based tests for DAI identifiers.
//! Log output and error messages name devices through these types, so their
//! formatting and ordering must hold for every value, not just the named types.

use platform::{DaiId, DaiType};

proptest::proptest! {
    /// Display is always "<name>.<index>" and never panics.
    #[test]
    fn dai_id_display_is_name_dot_index(ty in 0u32..=u32::MAX, index in 0u32..=u32::MAX) {
        let id = DaiId::new(DaiType(ty), index);
        let shown = format!("{id}");
        assert_eq!(shown, format!("{}.{}", DaiType(ty).name(), index));
    }

    /// Identifiers order by type first, then by index.
    #[test]
    fn dai_id_orders_by_type_then_index(
        a_ty in 0u32..8, a_idx in 0u32..8,
        b_ty in 0u32..8, b_idx in 0u32..8,
    ) {
        let a = DaiId::new(DaiType(a_ty), a_idx);
        let b = DaiId::new(DaiType(b_ty), b_idx);
        assert_eq!(a.cmp(&b), (a_ty, a_idx).cmp(&(b_ty, b_idx)));
    }
}

/// The named types keep the numbering of the host IPC ABI.
#[test]
fn named_types_match_ipc_numbering() {
    assert_eq!(DaiType::SSP, DaiType(0));
    assert_eq!(DaiType::DMIC, DaiType(1));
    assert_eq!(DaiType::HDA, DaiType(2));
    assert_eq!(DaiType::SAI, DaiType(3));
}
