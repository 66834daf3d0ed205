/// Splits selected indices into mating pairs `(S[2i], S[2i+1])`.
///
/// When a pair would mate an individual with itself, the partner is replaced by
/// the first element of the *whole* selection that differs from it; if every
/// selected index is the same the self-pair is kept. With an odd number of
/// indices the trailing one is dropped, so callers wanting full pairing must
/// supply an even count.
///
/// # Examples
///
/// ```
/// use simplega::selection::filter_pairs;
///
/// let (a, b) = filter_pairs(&[3, 3, 1, 2]);
/// assert_eq!(a, vec![3, 1]);
/// assert_eq!(b, vec![1, 2]);
/// ```
pub fn filter_pairs(selected: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let npairs = selected.len() / 2;
    let mut first = Vec::with_capacity(npairs);
    let mut second = Vec::with_capacity(npairs);

    for pair in selected.chunks_exact(2) {
        let a = pair[0];
        let mut b = pair[1];
        if a == b {
            if let Some(&other) = selected.iter().find(|&&s| s != a) {
                b = other;
            }
        }
        first.push(a);
        second.push(b);
    }

    (first, second)
}
