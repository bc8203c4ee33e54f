use alloy_consensus::BlockHeader;

/// Returns `true` for headers produced after the merge.
///
/// Post-merge headers carry zero difficulty; AuRa headers never do.
pub fn is_pos_header<H: BlockHeader>(header: &H) -> bool {
    header.difficulty().is_zero()
}
