//! Acquisition flags.

bitflags::bitflags! {
    /// Options for [`DaiRegistry::acquire`](crate::DaiRegistry::acquire).
    ///
    /// Bits not named here are accepted and ignored.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DaiFlags: u32 {
        /// Activate (probe) the hardware if no other user holds it.
        ///
        /// Without this flag, acquiring an inactive device fails with
        /// [`DaiError::NotReady`](crate::DaiError::NotReady).
        const CREATE = 1 << 0;
    }
}

#[cfg(test)]
mod tests {
    use super::DaiFlags;

    #[test]
    fn test_default_is_empty() {
        assert!(!DaiFlags::default().contains(DaiFlags::CREATE));
    }

    #[test]
    fn test_unknown_bits_keep_create() {
        let flags = DaiFlags::from_bits_retain(0x8000_0001);
        assert!(flags.contains(DaiFlags::CREATE));
    }

    #[test]
    fn test_unknown_bits_alone_do_not_create() {
        let flags = DaiFlags::from_bits_retain(0x8000_0000);
        assert!(!flags.contains(DaiFlags::CREATE));
    }
}
