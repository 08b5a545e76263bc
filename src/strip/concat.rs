/// Join strips into a single strip.
///
/// Between two strips the last index of the previous one and the first
/// index of the next one are repeated, so every seam triangle has zero area.
/// When the next strip would then start at an odd position its first index
/// is repeated once more; each strip keeps its winding parity.
pub fn concatenate(strips: &[Vec<u32>]) -> Vec<u32> {
    let total: usize = strips.iter().map(|s| s.len() + 3).sum();
    let mut joined = Vec::with_capacity(total);

    for strip in strips.iter().filter(|s| !s.is_empty()) {
        if let Some(&last) = joined.last() {
            joined.push(last);
            joined.push(strip[0]);
            if joined.len() % 2 == 1 {
                joined.push(strip[0]);
            }
        }
        joined.extend_from_slice(strip);
    }

    joined
}

/// Split a strip built by [`concatenate`] back into its parts.
///
/// A part ends at the first pair of equal neighbors after its second index.
/// That holds for every strip the stripifier emits: the only repeated
/// neighbors inside one are an optional winding fix at its very start.
pub fn split(joined: &[u32]) -> Vec<Vec<u32>> {
    let mut strips = Vec::new();
    let mut start = 0;

    while start < joined.len() {
        let seam = (start + 1..joined.len().saturating_sub(1))
            .find(|&i| joined[i] == joined[i + 1]);
        match seam {
            Some(end) => {
                strips.push(joined[start..=end].to_vec());
                // Skip the two seam indices, plus the parity pad if present.
                let next = end + 3;
                start = next + next % 2;
            }
            None => {
                strips.push(joined[start..].to_vec());
                break;
            }
        }
    }

    strips
}
