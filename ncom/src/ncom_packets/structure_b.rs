/// Packet reserved for internal use (navigation status 11).
///
/// Only the envelope is understood, the body is neither decoded nor written.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructureB {
    /// Result of the whole-packet checksum, the only one this structure carries
    pub checksum_valid: bool,
}

impl PartialEq for StructureB {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}
